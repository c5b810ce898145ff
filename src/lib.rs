//! # docsift
//!
//! Document outline extraction and persona-driven section ranking from page
//! text layout.
//!
//! The input is a page-level layout: ordered text spans annotated with font
//! size, boldness, page number, and bounding box, as produced by an external
//! rendering library. From that, docsift derives:
//!
//! - a hierarchical outline (title plus H1/H2/H3 headings with pages), and
//! - given a persona and a job-to-be-done, a cross-document ranking of the
//!   most relevant sections with refined excerpts.
//!
//! ## Quick Start
//!
//! ```
//! use docsift::{extract_outline, AnalyzeOptions, BoundingBox, DocumentSpans, TextSpan};
//!
//! let doc = DocumentSpans::new(
//!     "guide.pdf",
//!     vec![
//!         TextSpan::new("User Guide", 24.0, true, 1, BoundingBox::new(72.0, 40.0, 300.0, 64.0)),
//!         TextSpan::new("1. Setup", 15.0, true, 1, BoundingBox::new(72.0, 120.0, 180.0, 135.0)),
//!         TextSpan::new(
//!             "Install the package and run the configuration wizard once.",
//!             10.0,
//!             false,
//!             1,
//!             BoundingBox::new(72.0, 160.0, 520.0, 170.0),
//!         ),
//!     ],
//! );
//!
//! let outline = extract_outline(&doc, &AnalyzeOptions::default());
//! assert_eq!(outline.title, "User Guide");
//! assert_eq!(outline.entries[0].text, "1. Setup");
//! ```
//!
//! ## Features
//!
//! - **Rule-chain heading classifier**: numbering, font-ratio, style,
//!   keyword, and positional cues folded in a fixed priority order
//! - **Header/footer suppression**: repeated lines and page-edge material
//!   never become headings
//! - **Deterministic ranking**: weighted keyword matching with a documented
//!   tie-break; identical input yields identical output
//! - **Bounded parallelism**: one worker per document, budget per document,
//!   partial results instead of batch failures

pub mod analyze;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod render;

// Re-export commonly used types
pub use analyze::{AnalyzeOptions, ClassifierThresholds, LayoutProfile};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, DocumentOutline, DocumentSpans, HeadingLevel, OutlineEntry, RankedSection,
    RawSpan, Section, SubSectionExcerpt, TextSpan,
};
pub use pipeline::{
    analyze_collection, extract_outline, process_collection, process_document,
    CollectionAnalysis, Deadline, Diagnostic, DocumentResult, PipelineOptions,
};
pub use rank::{rank_sections, RankOptions, Ranking, ScoreWeights};
pub use render::{analysis_to_json, outline_to_json, JsonFormat};

/// Builder for configuring and running the analysis pipeline.
///
/// # Example
///
/// ```
/// use docsift::{Docsift, DocumentSpans};
///
/// let docs = vec![DocumentSpans::new("empty.pdf", vec![])];
/// let analysis = Docsift::new()
///     .with_top_k(3)
///     .with_workers(1)
///     .analyze(&docs, "Researcher", "Survey prior work");
/// assert_eq!(analysis.documents.len(), 1);
/// ```
pub struct Docsift {
    options: PipelineOptions,
}

impl Docsift {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: PipelineOptions::default(),
        }
    }

    /// Set classifier thresholds.
    pub fn with_thresholds(mut self, thresholds: ClassifierThresholds) -> Self {
        self.options.analyze = self.options.analyze.with_thresholds(thresholds);
        self
    }

    /// Set score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.options.rank = self.options.rank.with_weights(weights);
        self
    }

    /// Set how many top sections receive refined excerpts.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.options.rank = self.options.rank.with_top_k(top_k);
        self
    }

    /// Set the worker pool size (0 = available CPU count).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.options = self.options.with_workers(workers);
        self
    }

    /// Set the per-document processing budget.
    pub fn with_document_timeout(mut self, budget: std::time::Duration) -> Self {
        self.options = self.options.with_document_timeout(budget);
        self
    }

    /// Pin the metadata timestamp for reproducible output.
    pub fn with_timestamp(mut self, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        self.options.rank = self.options.rank.with_timestamp(timestamp);
        self
    }

    /// Extract the outline of a single document.
    pub fn outline(&self, doc: &DocumentSpans) -> DocumentOutline {
        extract_outline(doc, &self.options.analyze)
    }

    /// Run the persona analysis over a document collection.
    pub fn analyze(&self, docs: &[DocumentSpans], persona: &str, job: &str) -> CollectionAnalysis {
        analyze_collection(docs, persona, job, &self.options)
    }

    /// Access the assembled options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }
}

impl Default for Docsift {
    fn default() -> Self {
        Self::new()
    }
}
