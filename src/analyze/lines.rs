//! Merging the span sequence into lines.
//!
//! The external layout source reports one span per run of identically-styled
//! text; a visual line is often split across several spans. Classification
//! works on whole lines, so consecutive spans on the same page are merged
//! when their vertical extents overlap and their font attributes agree.

use crate::model::{BoundingBox, TextSpan};

/// A merged line of text, the unit the heading classifier works on.
#[derive(Debug, Clone)]
pub struct Line {
    /// Merged text of all spans, space-joined
    pub text: String,
    /// Dominant font size, weighted by character count
    pub font_size: f32,
    /// Whether the majority of characters are bold
    pub bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Union of the member spans' boxes
    pub bbox: BoundingBox,
    /// Position in the original span order, used for stable ordering
    pub order: usize,
}

impl Line {
    fn from_spans(spans: &[&TextSpan], order: usize) -> Self {
        let mut text = String::new();
        for span in spans {
            let piece = span.text.trim();
            if piece.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(piece);
        }

        // Dominant size and boldness weighted by character count, so a short
        // styled fragment cannot flip the attributes of a long line.
        let total_chars: usize = spans.iter().map(|s| s.char_count()).sum();
        let weighted_size: f32 = spans
            .iter()
            .map(|s| s.font_size * s.char_count() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted_size / total_chars as f32
        } else {
            spans[0].font_size
        };

        let bold_chars: usize = spans
            .iter()
            .filter(|s| s.bold)
            .map(|s| s.char_count())
            .sum();
        let bold = total_chars > 0 && bold_chars * 2 > total_chars;

        let bbox = spans
            .iter()
            .skip(1)
            .fold(spans[0].bbox, |acc, s| acc.union(&s.bbox));

        Self {
            text,
            font_size,
            bold,
            page: spans[0].page,
            bbox,
            order,
        }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Merge a span sequence (in reading order) into lines.
///
/// Consecutive spans join the current line when they sit on the same page,
/// their vertical extents overlap, and their font attributes agree (size
/// within `tolerance` points, same boldness).
pub fn merge_spans(spans: &[TextSpan], tolerance: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<&TextSpan> = Vec::new();
    let mut current_order = 0usize;

    for (idx, span) in spans.iter().enumerate() {
        if span.text.trim().is_empty() {
            continue;
        }

        let joins = match current.last() {
            Some(prev) => {
                prev.page == span.page
                    && prev.bbox.vertical_overlap(&span.bbox)
                    && (prev.font_size - span.font_size).abs() <= tolerance
                    && prev.bold == span.bold
            }
            None => false,
        };

        if joins {
            current.push(span);
        } else {
            if !current.is_empty() {
                lines.push(Line::from_spans(&current, current_order));
            }
            current.clear();
            current.push(span);
            current_order = idx;
        }
    }

    if !current.is_empty() {
        lines.push(Line::from_spans(&current, current_order));
    }

    lines
}
