//! The validation pass.
//!
//! Courses are checked in manifest order, and within a course in this
//! order: type, description, thumbnail, overview keys, pages, external
//! readings, prerequisites. The notebook scan runs last. The first problem
//! found is returned.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::error::{TocError, TocResult};
use crate::model::{COURSE_TYPES, Course, OVERVIEW_KEYS, Page, Resource, key_name};

/// Counts from a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub courses: usize,
    pub pages: usize,
    /// Notebooks found on disk, ignored ones included.
    pub notebooks: usize,
    /// Notebooks skipped because of an `_` prefix or `-checkpoint` suffix.
    pub ignored: usize,
}

/// Validates a notebook tree against its table of contents.
#[derive(Debug, Clone)]
pub struct Validator {
    root: PathBuf,
    toc: PathBuf,
}

impl Validator {
    /// Validator for `root` using `root/toc.yaml`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let toc = root.join("toc.yaml");
        Self { root, toc }
    }

    /// Use a manifest at a different location.
    #[must_use]
    pub fn with_toc(mut self, toc: impl Into<PathBuf>) -> Self {
        self.toc = toc.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn toc_path(&self) -> &Path {
        &self.toc
    }

    /// Read and parse the manifest.
    pub fn load(&self) -> TocResult<Vec<Course>> {
        let source = fs::read_to_string(&self.toc).map_err(|source| TocError::Io {
            path: self.toc.clone(),
            source,
        })?;
        parse_toc(&source)
    }

    /// Load the manifest and check it and the notebook tree.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn run(&self) -> TocResult<Report> {
        let courses = self.load()?;
        let report = self.validate(&courses)?;
        info!(
            "{} course(s), {} page(s), {} notebook(s) checked",
            report.courses, report.pages, report.notebooks
        );
        Ok(report)
    }

    /// Check already-parsed courses and the notebook tree.
    pub fn validate(&self, courses: &[Course]) -> TocResult<Report> {
        for (index, course) in courses.iter().enumerate() {
            self.check_course(index, course)?;
        }
        let (notebooks, ignored) = self.check_notebooks(courses)?;
        Ok(Report {
            courses: courses.len(),
            pages: courses.iter().map(|c| c.sections.len()).sum(),
            notebooks,
            ignored,
        })
    }

    /// Resolve a manifest path under the root and check that it exists.
    pub fn check_exists(&self, path: &str) -> TocResult<PathBuf> {
        let full = self.root.join(path.trim_matches('/'));
        if full.exists() {
            Ok(full)
        } else {
            Err(TocError::MissingFile {
                path: full,
                toc: self.toc.clone(),
            })
        }
    }

    /// Check one course entry.
    pub fn check_course(&self, index: usize, course: &Course) -> TocResult<()> {
        let label = course.label(index);
        debug!("checking course {label}");

        let missing = |field: &'static str| TocError::MissingField {
            course: label.clone(),
            field,
            toc: self.toc.clone(),
        };

        let kind = course.kind.as_deref().ok_or_else(|| missing("type"))?;
        if !COURSE_TYPES.contains(&kind) {
            return Err(TocError::InvalidCourseType {
                course: label.clone(),
                kind: kind.to_string(),
                toc: self.toc.clone(),
            });
        }

        let overview = course.overview.as_ref().ok_or_else(|| missing("overviewInfo"))?;
        let description = overview
            .description
            .as_ref()
            .ok_or_else(|| missing("overviewInfo.description"))?;
        if description.short.is_none() {
            return Err(missing("overviewInfo.description.short"));
        }
        if description.long.is_none() {
            return Err(missing("overviewInfo.description.long"));
        }

        let thumbnail = overview
            .thumbnail_url
            .as_deref()
            .ok_or_else(|| missing("overviewInfo.thumbnailUrl"))?;
        self.check_exists(thumbnail)?;

        if let Some(key) = overview
            .extra
            .keys()
            .map(key_name)
            .find(|key| !OVERVIEW_KEYS.contains(&key.as_str()))
        {
            return Err(TocError::UnknownOverviewKey {
                course: label.clone(),
                key,
                toc: self.toc.clone(),
            });
        }

        for page in &course.sections {
            self.check_page(&label, page)?;
        }
        for resource in overview.external_recommended_readings.iter().flatten() {
            self.check_resource(resource)?;
        }
        for resource in overview.prerequisites.iter().flatten() {
            self.check_resource(resource)?;
        }
        Ok(())
    }

    /// The notebook and preview image of a page must exist.
    pub fn check_page(&self, course: &str, page: &Page) -> TocResult<()> {
        let missing = |field: &'static str| TocError::MissingField {
            course: course.to_string(),
            field,
            toc: self.toc.clone(),
        };
        let url = page.url.as_deref().ok_or_else(|| missing("sections[].url"))?;
        self.check_exists(&format!("{url}.ipynb"))?;
        let preview = page
            .preview_img_url
            .as_deref()
            .ok_or_else(|| missing("sections[].previewImgUrl"))?;
        self.check_exists(preview)?;
        Ok(())
    }

    /// A resource may only use the allowed keys; the first unknown key in
    /// document order is reported.
    pub fn check_resource(&self, resource: &Resource) -> TocResult<()> {
        match resource.extra.keys().next() {
            None => Ok(()),
            Some(key) => Err(TocError::UnknownResourceKey {
                key: key_name(key),
                resource: serde_yaml_ng::to_string(resource)
                    .unwrap_or_else(|_| format!("{resource:?}")),
                toc: self.toc.clone(),
            }),
        }
    }

    /// Every notebook under the root must be referenced unless ignored.
    /// Returns the number of notebooks found and how many were ignored.
    pub fn check_notebooks(&self, courses: &[Course]) -> TocResult<(usize, usize)> {
        let referenced = referenced_notebooks(courses);
        let mut found = 0;
        let mut ignored = 0;

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|e| e != "ipynb") {
                continue;
            }
            found += 1;

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if is_ignored(&stem) {
                ignored += 1;
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if !referenced.contains(relative) {
                return Err(TocError::UnreferencedNotebook {
                    notebook: path.to_path_buf(),
                    file_name: format!("{stem}.ipynb"),
                    toc: self.toc.clone(),
                });
            }
        }
        debug!("{found} notebook(s) on disk, {ignored} ignored");
        Ok((found, ignored))
    }
}

/// Parse manifest text.
pub fn parse_toc(source: &str) -> TocResult<Vec<Course>> {
    Ok(serde_yaml_ng::from_str(source)?)
}

/// Notebooks the manifest refers to, relative to the root.
pub fn referenced_notebooks(courses: &[Course]) -> BTreeSet<PathBuf> {
    courses
        .iter()
        .flat_map(|c| &c.sections)
        .filter_map(|page| page.url.as_deref())
        .map(|url| PathBuf::from(format!("{}.ipynb", url.trim_matches('/'))))
        .collect()
}

/// Drafts (`_name`) and editor checkpoints (`name-checkpoint`) need no
/// reference.
pub fn is_ignored(stem: &str) -> bool {
    stem.starts_with('_') || stem.ends_with("-checkpoint")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_names() {
        assert!(is_ignored("_draft"));
        assert!(is_ignored("intro-checkpoint"));
        assert!(!is_ignored("intro"));
        assert!(!is_ignored("my_notes"));
    }

    #[test]
    fn test_referenced_paths_are_normalised() {
        let courses = parse_toc(
            "- sections:\n    - url: /intro/hello\n    - url: intro/bye/\n",
        )
        .unwrap();
        let refs = referenced_notebooks(&courses);
        assert!(refs.contains(Path::new("intro/hello.ipynb")));
        assert!(refs.contains(Path::new("intro/bye.ipynb")));
    }

    #[test]
    fn test_invalid_type_message() {
        let validator = Validator::new("/nonexistent");
        let courses = parse_toc("- title: Basics\n  type: lecture\n").unwrap();
        let err = validator.check_course(0, &courses[0]).unwrap_err();
        assert!(matches!(err, TocError::InvalidCourseType { .. }));
        assert!(err.to_string().contains("'lecture'"));
    }

    #[test]
    fn test_missing_description_named() {
        let validator = Validator::new("/nonexistent");
        let courses = parse_toc(
            "- type: course\n  overviewInfo:\n    description: {short: s}\n",
        )
        .unwrap();
        let err = validator.check_course(0, &courses[0]).unwrap_err();
        assert!(err.to_string().contains("overviewInfo.description.long"));
    }
}
