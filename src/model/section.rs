//! Section types: the heading-owned text ranges that relevance scoring
//! operates on, and the ranked artifacts it produces.

use serde::{Deserialize, Serialize};

use super::HeadingLevel;

/// The text range owned by one heading, from the heading (inclusive) to the
/// next heading of equal-or-higher level or the end of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Owning document name
    pub document: String,
    /// Page the section's heading starts on (1-indexed)
    pub page: u32,
    /// Heading text
    pub title: String,
    /// Heading level of the owning heading
    pub level: HeadingLevel,
    /// Concatenated body text between this heading and the section end
    pub body_text: String,
}

impl Section {
    /// Create a new section.
    pub fn new(
        document: impl Into<String>,
        page: u32,
        title: impl Into<String>,
        level: HeadingLevel,
        body_text: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            page,
            title: title.into(),
            level,
            body_text: body_text.into(),
        }
    }

    /// Title and body joined for keyword matching.
    pub fn search_text(&self) -> String {
        if self.body_text.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.body_text)
        }
    }
}

/// A section with its relevance score and display rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Owning document name
    pub document: String,
    /// Page the section starts on
    pub page: u32,
    /// Section title
    pub title: String,
    /// Final relevance score in [0, 1]
    pub score: f64,
    /// Importance bucket, 1 (most important) through 10
    pub importance_rank: u32,
}

/// A trimmed excerpt of a highly-ranked section's body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSectionExcerpt {
    /// Owning document name
    pub document: String,
    /// Page the section starts on
    pub page: u32,
    /// First ~500 characters of body text, trimmed at a sentence boundary
    /// when possible
    pub refined_text: String,
}
