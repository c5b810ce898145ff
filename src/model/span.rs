//! Input span types.
//!
//! Spans are produced by an external text-layout source (one per contiguous
//! run of text sharing font attributes) and are read-only to the rest of the
//! crate.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned bounding box in page coordinates, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Whether the vertical extents of two boxes overlap.
    pub fn vertical_overlap(&self, other: &BoundingBox) -> bool {
        self.y0 < other.y1 && other.y0 < self.y1
    }

    fn is_valid(&self) -> bool {
        self.x0.is_finite()
            && self.y0.is_finite()
            && self.x1.is_finite()
            && self.y1.is_finite()
            && self.x1 >= self.x0
            && self.y1 >= self.y0
    }
}

/// A text span with page, font, and position information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font appears to be bold
    pub bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Bounding box on the page
    pub bbox: BoundingBox,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        bold: bool,
        page: u32,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold,
            page,
            bbox,
        }
    }

    /// Number of characters in the span, used for weighting statistics.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A span as it arrives from the external layout source.
///
/// Every field is optional so a batch with a few broken spans still
/// deserializes; [`RawSpan::validate`] turns each entry into a [`TextSpan`]
/// or reports why it must be skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpan {
    /// Text content
    pub text: Option<String>,
    /// Font size in points
    pub font_size: Option<f32>,
    /// Bold flag (absent means regular weight)
    #[serde(default)]
    pub bold: bool,
    /// 1-indexed page number
    pub page: Option<u32>,
    /// Bounding box
    pub bbox: Option<BoundingBox>,
}

impl RawSpan {
    /// Validate the raw span into a [`TextSpan`].
    pub fn validate(self) -> Result<TextSpan> {
        let text = self
            .text
            .ok_or_else(|| Error::MalformedSpan("missing text".to_string()))?;
        if text.trim().is_empty() {
            return Err(Error::MalformedSpan("empty text".to_string()));
        }

        let font_size = self
            .font_size
            .ok_or_else(|| Error::MalformedSpan("missing font_size".to_string()))?;
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(Error::MalformedSpan(format!(
                "invalid font_size {font_size}"
            )));
        }

        let page = self
            .page
            .ok_or_else(|| Error::MalformedSpan("missing page".to_string()))?;
        if page == 0 {
            return Err(Error::MalformedSpan("page must be >= 1".to_string()));
        }

        let bbox = self
            .bbox
            .ok_or_else(|| Error::MalformedSpan("missing bbox".to_string()))?;
        if !bbox.is_valid() {
            return Err(Error::MalformedSpan(format!("invalid bbox {bbox:?}")));
        }

        Ok(TextSpan::new(text, font_size, self.bold, page, bbox))
    }
}

/// One document's identity plus its ordered span sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSpans {
    /// Document name (filename or other caller-supplied identity)
    pub name: String,
    /// Spans in reading order
    pub spans: Vec<TextSpan>,
}

impl DocumentSpans {
    /// Create a document from already-validated spans.
    pub fn new(name: impl Into<String>, spans: Vec<TextSpan>) -> Self {
        Self {
            name: name.into(),
            spans,
        }
    }

    /// Build a document from raw spans, skipping malformed entries.
    ///
    /// Returns the document together with the number of spans that were
    /// dropped. Each drop is logged at warn level.
    pub fn from_raw(name: impl Into<String>, raw: Vec<RawSpan>) -> (Self, usize) {
        let name = name.into();
        let mut spans = Vec::with_capacity(raw.len());
        let mut skipped = 0usize;

        for (idx, raw_span) in raw.into_iter().enumerate() {
            match raw_span.validate() {
                Ok(span) => spans.push(span),
                Err(e) => {
                    skipped += 1;
                    log::warn!("{name}: skipping span {idx}: {e}");
                }
            }
        }

        (Self { name, spans }, skipped)
    }

    /// Whether the document has no spans at all.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Highest page number seen in the span sequence (0 when empty).
    pub fn page_count(&self) -> u32 {
        self.spans.iter().map(|s| s.page).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, size: f32, page: u32) -> RawSpan {
        RawSpan {
            text: Some(text.to_string()),
            font_size: Some(size),
            bold: false,
            page: Some(page),
            bbox: Some(BoundingBox::new(0.0, 0.0, 100.0, 12.0)),
        }
    }

    #[test]
    fn test_validate_ok() {
        let span = raw("Hello", 12.0, 1).validate().unwrap();
        assert_eq!(span.text, "Hello");
        assert_eq!(span.page, 1);
        assert!(!span.bold);
    }

    #[test]
    fn test_validate_missing_fields() {
        let missing_text = RawSpan {
            text: None,
            ..raw("x", 12.0, 1)
        };
        assert!(matches!(
            missing_text.validate(),
            Err(crate::Error::MalformedSpan(_))
        ));

        let zero_page = raw("x", 12.0, 1);
        let zero_page = RawSpan {
            page: Some(0),
            ..zero_page
        };
        assert!(zero_page.validate().is_err());

        let bad_size = RawSpan {
            font_size: Some(f32::NAN),
            ..raw("x", 12.0, 1)
        };
        assert!(bad_size.validate().is_err());
    }

    #[test]
    fn test_from_raw_skips_malformed() {
        let raws = vec![
            raw("Good", 12.0, 1),
            RawSpan::default(),
            raw("Also good", 12.0, 2),
        ];
        let (doc, skipped) = DocumentSpans::from_raw("test.pdf", raws);
        assert_eq!(doc.spans.len(), 2);
        assert_eq!(skipped, 1);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_bbox_union_and_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 20.0, 15.0);
        let u = a.union(&b);
        assert_eq!(u.x0, 0.0);
        assert_eq!(u.y1, 15.0);
        assert!(a.vertical_overlap(&b));

        let c = BoundingBox::new(0.0, 20.0, 10.0, 30.0);
        assert!(!a.vertical_overlap(&c));
    }

    #[test]
    fn test_raw_span_json() {
        let json = r#"{"text":"Intro","font_size":14.5,"bold":true,"page":1,"bbox":{"x0":10,"y0":20,"x1":200,"y1":35}}"#;
        let raw: RawSpan = serde_json::from_str(json).unwrap();
        let span = raw.validate().unwrap();
        assert!(span.bold);
        assert_eq!(span.bbox.height(), 15.0);
    }
}
