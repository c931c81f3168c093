//! CLI command implementations.

pub mod common;
pub mod grid;
pub mod puzzle;
pub mod toc;
pub mod version;
