//! Batch orchestration.
//!
//! Each document runs the profile → classify → assemble pipeline
//! independently on a bounded worker pool; the relevance scorer is the
//! single-threaded fan-in point. Per-document failures (no text, budget
//! exceeded) degrade that document only and never fail the batch.

use std::time::{Duration, Instant};

use crate::analyze::{
    assemble, merge_spans, select_title, AnalyzeOptions, HeadingClassifier, LayoutProfile,
};
use crate::error::Error;
use crate::model::{DocumentOutline, DocumentSpans, Section};
use crate::rank::{rank_sections, RankOptions, Ranking};

/// How often the classification loop checks the deadline, in lines.
const DEADLINE_CHECK_INTERVAL: usize = 64;

/// A cooperative per-document processing budget.
///
/// The pipeline checks it between stages and periodically inside the
/// classification loop; an expired deadline makes the document return
/// whatever has been classified so far.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self { at: None }
    }

    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// Whether the budget has been used up.
    pub fn expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}

/// A recoverable condition attached to one document's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The document had no extractable text
    EmptyDocument,
    /// The per-document budget expired; the result is partial
    Timeout,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::EmptyDocument => f.write_str("no extractable text"),
            Diagnostic::Timeout => f.write_str("processing budget exceeded, result is partial"),
        }
    }
}

/// The outcome of one document's pipeline run.
#[derive(Debug, Clone)]
pub struct DocumentResult {
    /// Document name
    pub name: String,
    /// Extracted outline (possibly empty)
    pub outline: DocumentOutline,
    /// Sections cut from the outline, in heading order
    pub sections: Vec<Section>,
    /// Recoverable conditions hit while processing
    pub diagnostics: Vec<Diagnostic>,
}

/// The fan-in result of a persona analysis over a document collection.
#[derive(Debug, Clone)]
pub struct CollectionAnalysis {
    /// Per-document results, in input order
    pub documents: Vec<DocumentResult>,
    /// Cross-document ranking and excerpts
    pub ranking: Ranking,
    /// Persona string the ranking was computed for
    pub persona: String,
    /// Job-to-be-done string the ranking was computed for
    pub job: String,
}

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Per-document analysis options
    pub analyze: AnalyzeOptions,
    /// Ranking options
    pub rank: RankOptions,
    /// Worker pool size; 0 means the available CPU count
    pub workers: usize,
    /// Per-document wall-clock budget
    pub document_timeout: Duration,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker pool size (0 = available CPU count).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the per-document budget.
    pub fn with_document_timeout(mut self, budget: Duration) -> Self {
        self.document_timeout = budget;
        self
    }

    /// Set analysis options.
    pub fn with_analyze(mut self, analyze: AnalyzeOptions) -> Self {
        self.analyze = analyze;
        self
    }

    /// Set ranking options.
    pub fn with_rank(mut self, rank: RankOptions) -> Self {
        self.rank = rank;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            analyze: AnalyzeOptions::default(),
            rank: RankOptions::default(),
            workers: 0,
            document_timeout: Duration::from_secs(10),
        }
    }
}

/// Run the full pipeline for one document without a budget.
///
/// Never fails: an empty document yields an empty outline with an empty
/// title.
pub fn extract_outline(doc: &DocumentSpans, options: &AnalyzeOptions) -> DocumentOutline {
    process_document(doc, options, Deadline::none()).outline
}

/// Run the per-document pipeline under a deadline.
pub fn process_document(
    doc: &DocumentSpans,
    options: &AnalyzeOptions,
    deadline: Deadline,
) -> DocumentResult {
    let mut diagnostics = Vec::new();

    let profile = match LayoutProfile::compute(&doc.spans) {
        Ok(profile) => profile,
        Err(Error::EmptyDocument) => {
            log::info!("{}: no extractable text", doc.name);
            return DocumentResult {
                name: doc.name.clone(),
                outline: DocumentOutline::default(),
                sections: Vec::new(),
                diagnostics: vec![Diagnostic::EmptyDocument],
            };
        }
        Err(e) => {
            // Profiling has no other failure mode today; treat anything new
            // as an empty result rather than poisoning the batch.
            log::warn!("{}: profiling failed: {e}", doc.name);
            return DocumentResult {
                name: doc.name.clone(),
                outline: DocumentOutline::default(),
                sections: Vec::new(),
                diagnostics: vec![Diagnostic::EmptyDocument],
            };
        }
    };

    let lines = merge_spans(&doc.spans, options.line_merge_tolerance);
    let classifier = HeadingClassifier::new(options.thresholds.clone());
    let ctx = classifier.build_context(&lines, &profile);

    let mut classified = Vec::with_capacity(lines.len());
    for (idx, line) in lines.into_iter().enumerate() {
        if idx % DEADLINE_CHECK_INTERVAL == 0 && deadline.expired() {
            log::warn!(
                "{}: budget expired after {idx} lines, returning partial result",
                doc.name
            );
            diagnostics.push(Diagnostic::Timeout);
            break;
        }
        classified.push(classifier.classify_line(line, &profile, &ctx));
    }

    let title = select_title(&classified, options.title_page_limit);
    let assembled = assemble(&doc.name, &classified, title);

    log::info!(
        "{}: {} pages, {} headings",
        doc.name,
        profile.page_count,
        assembled.outline.entries.len()
    );

    DocumentResult {
        name: doc.name.clone(),
        outline: assembled.outline,
        sections: assembled.sections,
        diagnostics,
    }
}

/// Process a document collection on a bounded worker pool.
///
/// Results come back in input order regardless of completion order, so
/// repeated runs over identical input are identical. One document timing
/// out or coming up empty never cancels its siblings.
pub fn process_collection(
    docs: &[DocumentSpans],
    options: &PipelineOptions,
) -> Vec<DocumentResult> {
    let workers = effective_workers(options.workers, docs.len());

    if workers <= 1 || docs.len() <= 1 {
        return docs
            .iter()
            .map(|doc| {
                process_document(doc, &options.analyze, Deadline::after(options.document_timeout))
            })
            .collect();
    }

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("worker pool unavailable ({e}), processing sequentially");
            return docs
                .iter()
                .map(|doc| {
                    process_document(
                        doc,
                        &options.analyze,
                        Deadline::after(options.document_timeout),
                    )
                })
                .collect();
        }
    };

    let (tx, rx) = crossbeam_channel::unbounded();
    pool.scope(|scope| {
        for (idx, doc) in docs.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move |_| {
                // The budget starts when the document acquires a worker.
                let deadline = Deadline::after(options.document_timeout);
                let result = process_document(doc, &options.analyze, deadline);
                let _ = tx.send((idx, result));
            });
        }
    });
    drop(tx);

    let mut indexed: Vec<(usize, DocumentResult)> = rx.iter().collect();
    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, result)| result).collect()
}

/// Full persona analysis: per-document pipelines fanned out, ranking joined
/// single-threaded over all sections.
pub fn analyze_collection(
    docs: &[DocumentSpans],
    persona: &str,
    job: &str,
    options: &PipelineOptions,
) -> CollectionAnalysis {
    let documents = process_collection(docs, options);

    let sections: Vec<Section> = documents
        .iter()
        .flat_map(|doc| doc.sections.iter().cloned())
        .collect();
    let ranking = rank_sections(&sections, persona, job, &options.rank);

    CollectionAnalysis {
        documents,
        ranking,
        persona: persona.to_string(),
        job: job.to_string(),
    }
}

fn effective_workers(configured: usize, docs: usize) -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let cap = if configured == 0 {
        available
    } else {
        configured.min(available)
    };
    cap.min(docs).max(1)
}
