//! Analysis options and classifier calibration.

/// Options for per-document layout analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Classifier calibration thresholds
    pub thresholds: ClassifierThresholds,

    /// How many leading pages are searched for the document title
    pub title_page_limit: u32,

    /// Font-size tolerance (points) when merging spans into a line
    pub line_merge_tolerance: f32,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set classifier thresholds.
    pub fn with_thresholds(mut self, thresholds: ClassifierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the number of leading pages searched for the title.
    pub fn with_title_page_limit(mut self, pages: u32) -> Self {
        self.title_page_limit = pages.max(1);
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            thresholds: ClassifierThresholds::default(),
            title_page_limit: 2,
            line_merge_tolerance: 0.5,
        }
    }
}

/// Calibration for the heading rule chain.
///
/// Every cutoff the classifier uses lives here so tests can vary them
/// without touching the rules themselves.
#[derive(Debug, Clone)]
pub struct ClassifierThresholds {
    /// Minimum font-size ratio for the H1/Title band
    pub h1_ratio: f32,
    /// Minimum font-size ratio for the H2 band
    pub h2_ratio: f32,
    /// Minimum font-size ratio for the H3 band
    pub h3_ratio: f32,
    /// Ratio treated as the ceiling of the H1 band when scaling confidence
    pub ratio_ceiling: f32,
    /// Confidence contributed by a numbering-pattern match
    pub numbering_confidence: f32,
    /// Confidence added by the bold + short-line cue
    pub bold_short_confidence: f32,
    /// Maximum word count for the bold + short-line cue
    pub bold_max_words: usize,
    /// Confidence added by a section-keyword match
    pub keyword_confidence: f32,
    /// Confidence added by the page-leading isolated-line cue
    pub positional_confidence: f32,
    /// Vertical gap, as a multiple of line font size, that counts as isolated
    pub isolation_gap_factor: f32,
    /// Minimum accumulated confidence for a line to become a heading
    pub min_confidence: f32,
    /// Fraction of pages a normalized line must repeat on to be suppressed
    pub repeat_page_fraction: f32,
    /// Fraction of the page's vertical extent treated as header/footer band
    pub edge_band_fraction: f32,
    /// Maximum word count for edge-band suppression
    pub edge_max_words: usize,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            h1_ratio: 1.5,
            h2_ratio: 1.25,
            h3_ratio: 1.1,
            ratio_ceiling: 2.0,
            numbering_confidence: 0.9,
            bold_short_confidence: 0.3,
            bold_max_words: 12,
            keyword_confidence: 0.2,
            positional_confidence: 0.1,
            isolation_gap_factor: 1.5,
            min_confidence: 0.5,
            repeat_page_fraction: 0.6,
            edge_band_fraction: 0.05,
            edge_max_words: 6,
        }
    }
}
