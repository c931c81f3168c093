//! Validator error types.
//!
//! Each variant carries enough context to point the author at the
//! offending entry and the fix.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for validator operations.
pub type TocResult<T> = Result<T, TocError>;

/// The first problem found in a notebook tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TocError {
    /// A manifest path does not exist under the notebook root.
    #[error(
        "No file: {path}\n\n{toc} refers to a file ({path}) that does not exist. \
         Please add the missing file, or remove the reference."
    )]
    MissingFile { path: PathBuf, toc: PathBuf },

    /// Course type outside the allowed set.
    #[error(
        "Course '{course}' in {toc} has type '{kind}'. \
         Allowed types are: chapter, course, summer-school."
    )]
    InvalidCourseType {
        course: String,
        kind: String,
        toc: PathBuf,
    },

    /// A required entry is absent.
    #[error("Course '{course}' in {toc} has no '{field}'. Please add it.")]
    MissingField {
        course: String,
        field: &'static str,
        toc: PathBuf,
    },

    /// `overviewInfo` contains a key that is not allowed.
    #[error(
        "Course '{course}' in {toc} has unknown overviewInfo key '{key}'. \
         Allowed keys are: description, thumbnailUrl, prerequisites, \
         externalRecommendedReadings, externalRecommendedReadingsPreamble."
    )]
    UnknownOverviewKey {
        course: String,
        key: String,
        toc: PathBuf,
    },

    /// A resource contains a key that is not allowed.
    #[error(
        "'{key}' not allowed in resource:\n{resource}\n\n\
         Please edit this resource in {toc} so it only uses the keys \
         title, description, link and author."
    )]
    UnknownResourceKey {
        key: String,
        resource: String,
        toc: PathBuf,
    },

    /// A notebook that no course refers to.
    #[error(
        "Found notebook '{notebook}' with no reference in '{toc}'.\n\
         To fix, either add the notebook to '{toc}', or prefix the filename \
         with an underscore (i.e. '{file_name}' -> '_{file_name}')."
    )]
    UnreferencedNotebook {
        notebook: PathBuf,
        file_name: String,
        toc: PathBuf,
    },

    /// The manifest could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid YAML of the expected shape.
    #[error("Cannot parse table of contents: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// The notebook tree could not be walked.
    #[error("Cannot scan notebooks: {0}")]
    Walk(#[from] walkdir::Error),
}
