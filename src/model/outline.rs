//! Outline types: heading levels, outline entries, and the per-document
//! outline that serializes directly to the public output schema.

use serde::{Deserialize, Serialize};

/// Heading level in the public outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Nesting depth, 1 for H1 through 3 for H3.
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Level for a numbering depth (`1.` is 1, `1.1` is 2, `1.1.1` is 3).
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        };
        f.write_str(s)
    }
}

/// One entry in the document outline.
///
/// Serializes to `{"level": "H1", "text": ..., "page": ...}` as required by
/// the outline output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text as it appears in the document
    pub text: String,
    /// Page the heading starts on (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The extracted outline of one document.
///
/// Serializes directly to the `{"title": ..., "outline": [...]}` schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title ("" when the document has no extractable text)
    pub title: String,
    /// Headings in (page, span order), title excluded
    #[serde(rename = "outline")]
    pub entries: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an empty outline with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_depth_roundtrip() {
        for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
            assert_eq!(
                HeadingLevel::from_depth(level.depth() as usize),
                Some(level)
            );
        }
        assert_eq!(HeadingLevel::from_depth(4), None);
        assert_eq!(HeadingLevel::from_depth(0), None);
    }

    #[test]
    fn test_outline_schema_field_names() {
        let outline = DocumentOutline {
            title: "Annual Report".to_string(),
            entries: vec![OutlineEntry::new(HeadingLevel::H1, "1. Introduction", 1)],
        };
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json["title"], "Annual Report");
        assert_eq!(json["outline"][0]["level"], "H1");
        assert_eq!(json["outline"][0]["text"], "1. Introduction");
        assert_eq!(json["outline"][0]["page"], 1);
    }

    #[test]
    fn test_empty_outline() {
        let outline = DocumentOutline::with_title("");
        assert!(outline.is_empty());
        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }
}
