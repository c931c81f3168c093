//! qtext Hardware Abstraction Layer
//!
//! The puzzle grid never talks to a simulator directly. It hands a
//! [`Circuit`](qtext_ir::Circuit) to a [`Backend`] together with a
//! [`SampleMode`] and gets back a normalised outcome [`Distribution`].
//!
//! - [`SampleMode::Exact`] asks for the ideal final-state distribution.
//! - [`SampleMode::Shots`] asks for repeated stochastic sampling; the
//!   backend collects [`Counts`] and normalises them.
//!
//! Bitstrings are written with character `j` holding the outcome of
//! qubit `j`.

pub mod backend;
pub mod error;
pub mod result;

pub use backend::{Backend, BackendConfig};
pub use error::{HalError, HalResult};
pub use result::{Counts, Distribution, SampleMode};
