//! qtext TOC Validator
//!
//! Checks a notebook tree against its `toc.yaml`: every course is well
//! formed, every file the manifest names exists, and every notebook on
//! disk is either referenced or explicitly marked as a draft.
//!
//! ```rust,no_run
//! use qtext_toc::Validator;
//!
//! let report = Validator::new("notebooks").run()?;
//! println!("{} notebooks checked", report.notebooks);
//! # Ok::<(), qtext_toc::TocError>(())
//! ```
//!
//! Manifest paths are relative to the notebook root; leading and trailing
//! `/` are ignored. Notebooks whose name starts with `_` or ends with
//! `-checkpoint` need no reference.

pub mod error;
pub mod model;
pub mod validate;

pub use error::{TocError, TocResult};
pub use model::{Course, Description, OverviewInfo, Page, Resource};
pub use validate::{Report, Validator, is_ignored, parse_toc, referenced_notebooks};
