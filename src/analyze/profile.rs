//! Layout profiling: document-wide font statistics that calibrate the
//! heading classifier.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::TextSpan;

/// Document-wide layout statistics.
#[derive(Debug, Clone)]
pub struct LayoutProfile {
    /// Dominant body-text font size
    pub body_font_size: f32,
    /// 75th percentile of font size
    pub p75: f32,
    /// 90th percentile of font size
    pub p90: f32,
    /// 95th percentile of font size
    pub p95: f32,
    /// Number of pages in the document
    pub page_count: u32,
}

impl LayoutProfile {
    /// Compute the profile for one document's span sequence.
    ///
    /// The body size is the most frequent font size weighted by summed
    /// character count rather than span count, so a handful of short large
    /// spans (a title, a few headings) cannot outvote the running text.
    /// Returns [`Error::EmptyDocument`] when the sequence is empty.
    pub fn compute(spans: &[TextSpan]) -> Result<Self> {
        if spans.is_empty() {
            return Err(Error::EmptyDocument);
        }

        // Histogram keyed at 0.1pt precision, weighted by character count.
        let mut histogram: HashMap<i32, usize> = HashMap::new();
        for span in spans {
            let key = (span.font_size * 10.0).round() as i32;
            *histogram.entry(key).or_insert(0) += span.char_count();
        }

        let body_key = histogram
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(key, _)| *key)
            .unwrap_or(120);
        let body_font_size = body_key as f32 / 10.0;

        // Char-weighted percentiles over the same distribution, nearest-rank.
        let mut buckets: Vec<(i32, usize)> = histogram.into_iter().collect();
        buckets.sort_by_key(|(key, _)| *key);
        let total_weight: usize = buckets.iter().map(|(_, w)| w).sum();

        let percentile = |p: f64| -> f32 {
            let rank = ((p / 100.0) * total_weight as f64).ceil().max(1.0) as usize;
            let mut cumulative = 0usize;
            for (key, weight) in &buckets {
                cumulative += weight;
                if cumulative >= rank {
                    return *key as f32 / 10.0;
                }
            }
            buckets.last().map(|(key, _)| *key as f32 / 10.0).unwrap_or(12.0)
        };

        let page_count = spans.iter().map(|s| s.page).max().unwrap_or(1);

        Ok(Self {
            body_font_size,
            p75: percentile(75.0),
            p90: percentile(90.0),
            p95: percentile(95.0),
            page_count,
        })
    }

    /// Ratio of a font size against the body baseline.
    pub fn size_ratio(&self, font_size: f32) -> f32 {
        if self.body_font_size > 0.0 {
            font_size / self.body_font_size
        } else {
            1.0
        }
    }
}
