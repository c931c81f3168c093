//! Typed view of `toc.yaml`.
//!
//! Entries the validator checks for are optional here so that a missing
//! field is reported by name instead of as a parse failure. Keys that are
//! not part of the schema land in `extra`, in document order.

use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};

/// Course types accepted in `type`.
pub const COURSE_TYPES: [&str; 3] = ["chapter", "course", "summer-school"];

/// Keys accepted in `overviewInfo`.
pub const OVERVIEW_KEYS: [&str; 5] = [
    "description",
    "thumbnailUrl",
    "prerequisites",
    "externalRecommendedReadings",
    "externalRecommendedReadingsPreamble",
];

/// Keys accepted in a resource.
pub const RESOURCE_KEYS: [&str; 4] = ["title", "description", "link", "author"];

/// Display form of a mapping key.
pub fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml_ng::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// A course, chapter or summer school.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "overviewInfo", default)]
    pub overview: Option<OverviewInfo>,
    #[serde(default)]
    pub sections: Vec<Page>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Course {
    /// Name used in messages: the `title` (or `id`) if present, else the
    /// position in the manifest.
    pub fn label(&self, index: usize) -> String {
        ["title", "id"]
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index + 1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewInfo {
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub prerequisites: Option<Vec<Resource>>,
    #[serde(rename = "externalRecommendedReadings", default)]
    pub external_recommended_readings: Option<Vec<Resource>>,
    #[serde(rename = "externalRecommendedReadingsPreamble", default)]
    pub external_recommended_readings_preamble: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default)]
    pub long: Option<String>,
}

/// A notebook page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Notebook path relative to the root, without `.ipynb`.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "previewImgUrl", default)]
    pub preview_img_url: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// An external reading or prerequisite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_are_captured() {
        let yaml = r#"
- title: Basics
  type: course
  overviewInfo:
    description: {short: s, long: l}
    thumbnailUrl: /images/t.png
    colour: red
  sections:
    - url: /intro/hello
      previewImgUrl: /images/p.png
      id: hello
"#;
        let toc: Vec<Course> = serde_yaml_ng::from_str(yaml).unwrap();
        let course = &toc[0];
        assert_eq!(course.kind.as_deref(), Some("course"));
        assert_eq!(course.label(0), "Basics");
        let overview = course.overview.as_ref().unwrap();
        assert!(overview.extra.contains_key("colour"));
        assert_eq!(course.sections[0].url.as_deref(), Some("/intro/hello"));
        assert!(course.sections[0].extra.contains_key("id"));
    }

    #[test]
    fn test_missing_fields_parse() {
        let toc: Vec<Course> = serde_yaml_ng::from_str("- sections: []").unwrap();
        assert!(toc[0].kind.is_none());
        assert!(toc[0].overview.is_none());
        assert_eq!(toc[0].label(2), "#3");
    }

    #[test]
    fn test_resource_extra_key() {
        let r: Resource = serde_yaml_ng::from_str("title: t\nurl: x\n").unwrap();
        assert!(r.title.is_some());
        assert!(r.extra.contains_key("url"));
    }

    #[test]
    fn test_extra_keeps_document_order() {
        let r: Resource = serde_yaml_ng::from_str("zeta: 1
title: t
alpha: 2
").unwrap();
        let keys: Vec<String> = r.extra.keys().map(key_name).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(key_name(&Value::from(2024)), "2024");
    }
}
