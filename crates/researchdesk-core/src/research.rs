use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DeskError;

pub const MIN_TOP_K: u32 = 1;
pub const MAX_TOP_K: u32 = 10;
pub const DEFAULT_TOP_K: u32 = 5;
pub const DEFAULT_VIDEO_TOP_K: u32 = 3;

/// Requested research depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchLength {
    Small,
    #[default]
    Medium,
    Deep,
}

impl ResearchLength {
    pub const ALL: &[ResearchLength] = &[
        ResearchLength::Small,
        ResearchLength::Medium,
        ResearchLength::Deep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchLength::Small => "small",
            ResearchLength::Medium => "medium",
            ResearchLength::Deep => "deep",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResearchLength::Small => "Small",
            ResearchLength::Medium => "Medium",
            ResearchLength::Deep => "Deep",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "small" => Some(ResearchLength::Small),
            "medium" => Some(ResearchLength::Medium),
            "deep" => Some(ResearchLength::Deep),
            _ => None,
        }
    }
}

impl fmt::Display for ResearchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Clamp a requested source count into the range the API accepts.
pub fn clamp_top_k(top_k: u32) -> u32 {
    top_k.clamp(MIN_TOP_K, MAX_TOP_K)
}

/// Empty or whitespace-only optional text goes over the wire as `null`.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub title: String,
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default)]
    pub length: ResearchLength,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

impl ResearchRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            brief: None,
            length: ResearchLength::default(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_brief(mut self, brief: Option<String>) -> Self {
        self.brief = non_blank(brief);
        self
    }

    pub fn with_length(mut self, length: ResearchLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = clamp_top_k(top_k);
        self
    }

    /// Presence check on the title. Nothing else is validated client-side.
    pub fn validate(&self) -> Result<(), DeskError> {
        if self.title.trim().is_empty() {
            return Err(DeskError::InvalidInput(
                "Please enter a research title".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRequest {
    pub title: String,
    #[serde(default = "default_video_top_k")]
    pub top_k: u32,
}

fn default_video_top_k() -> u32 {
    DEFAULT_VIDEO_TOP_K
}

impl VideoRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            top_k: DEFAULT_VIDEO_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = clamp_top_k(top_k);
        self
    }

    pub fn validate(&self) -> Result<(), DeskError> {
        if self.title.trim().is_empty() {
            return Err(DeskError::InvalidInput("Please enter a title first".into()));
        }
        Ok(())
    }
}

/// A cited web source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

impl Source {
    /// Display text: the title, falling back to the url.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

/// Videos share the `{title, url}` shape of sources.
pub type Video = Source;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<Video>,
}

/// `{ "success": true, "data": { ... } }` wrapper used by the v2 endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let req = ResearchRequest::new("AI in healthcare");
        assert_eq!(req.length, ResearchLength::Medium);
        assert_eq!(req.top_k, DEFAULT_TOP_K);
        assert!(req.brief.is_none());
    }

    #[test]
    fn test_request_wire_format() {
        let req = ResearchRequest::new("Grid storage")
            .with_brief(Some("   ".into()))
            .with_length(ResearchLength::Deep)
            .with_top_k(7);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({ "title": "Grid storage", "brief": null, "length": "deep", "top_k": 7 })
        );
    }

    #[test]
    fn test_top_k_is_clamped() {
        assert_eq!(ResearchRequest::new("t").with_top_k(0).top_k, 1);
        assert_eq!(ResearchRequest::new("t").with_top_k(42).top_k, 10);
        assert_eq!(VideoRequest::new("t").with_top_k(99).top_k, 10);
    }

    #[test]
    fn test_presence_checks() {
        let err = ResearchRequest::new("  ").validate().unwrap_err();
        assert!(err.to_string().contains("Please enter a research title"));
        assert!(ResearchRequest::new("x").validate().is_ok());

        let err = VideoRequest::new("").validate().unwrap_err();
        assert!(matches!(err, DeskError::InvalidInput(_)));
    }

    #[test]
    fn test_length_round_trip_names() {
        for length in ResearchLength::ALL {
            assert_eq!(ResearchLength::parse_str(length.as_str()), Some(*length));
        }
        assert_eq!(ResearchLength::parse_str("huge"), None);
    }

    #[test]
    fn test_result_missing_fields_default() {
        let result: ResearchResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.content.is_empty());
        assert!(result.sources.is_empty());

        let result: ResearchResult =
            serde_json::from_value(json!({ "content": null, "sources": null, "extra": 1 }))
                .unwrap();
        assert_eq!(result, ResearchResult::default());
    }

    #[test]
    fn test_source_label_falls_back_to_url() {
        let source: Source =
            serde_json::from_value(json!({ "url": "https://example.org/a" })).unwrap();
        assert_eq!(source.label(), "https://example.org/a");

        let source: Source =
            serde_json::from_value(json!({ "title": "Paper", "url": "https://x.y" })).unwrap();
        assert_eq!(source.label(), "Paper");
    }

    #[test]
    fn test_envelope_decodes_videos() {
        let env: Envelope<VideoList> = serde_json::from_value(json!({
            "success": true,
            "data": { "videos": [{ "title": "Intro", "url": "https://v/1" }] }
        }))
        .unwrap();
        assert!(env.success);
        assert_eq!(env.data.videos.len(), 1);
        assert_eq!(env.data.videos[0].title, "Intro");
    }
}
