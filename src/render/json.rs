//! JSON rendering of outlines and persona analyses.
//!
//! Field names in both schemas are part of the public contract and must not
//! change.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::DocumentOutline;
use crate::pipeline::CollectionAnalysis;
use crate::rank::RankOptions;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Metadata block of the persona analysis schema.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// Names of every input document, in input order
    pub input_documents: Vec<String>,
    /// Persona string as supplied by the caller
    pub persona: String,
    /// Job-to-be-done string as supplied by the caller
    pub job_to_be_done: String,
    /// ISO-8601 UTC timestamp of the run
    pub processing_timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
struct ExtractedSection {
    document: String,
    page_number: u32,
    section_title: String,
    importance_rank: u32,
}

#[derive(Debug, Clone, Serialize)]
struct SubSectionEntry {
    document: String,
    page_number: u32,
    refined_text: String,
}

#[derive(Debug, Clone, Serialize)]
struct AnalysisJson {
    metadata: AnalysisMetadata,
    extracted_sections: Vec<ExtractedSection>,
    sub_section_analysis: Vec<SubSectionEntry>,
}

/// Serialize a document outline to the outline schema.
pub fn outline_to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Serialize a collection analysis to the persona analysis schema.
///
/// The timestamp comes from `options.timestamp` when set, otherwise the
/// current time.
pub fn analysis_to_json(
    analysis: &CollectionAnalysis,
    options: &RankOptions,
    format: JsonFormat,
) -> Result<String> {
    let timestamp = options
        .timestamp
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let json = AnalysisJson {
        metadata: AnalysisMetadata {
            input_documents: analysis
                .documents
                .iter()
                .map(|doc| doc.name.clone())
                .collect(),
            persona: analysis.persona.clone(),
            job_to_be_done: analysis.job.clone(),
            processing_timestamp: timestamp,
        },
        extracted_sections: analysis
            .ranking
            .sections
            .iter()
            .map(|section| ExtractedSection {
                document: section.document.clone(),
                page_number: section.page,
                section_title: section.title.clone(),
                importance_rank: section.importance_rank,
            })
            .collect(),
        sub_section_analysis: analysis
            .ranking
            .excerpts
            .iter()
            .map(|excerpt| SubSectionEntry {
                document: excerpt.document.clone(),
                page_number: excerpt.page,
                refined_text: excerpt.refined_text.clone(),
            })
            .collect(),
    };

    serialize(&json, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {e}")))
}
