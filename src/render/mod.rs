//! Rendering module: serializing pipeline results to the public output
//! schemas.

mod json;

pub use json::{analysis_to_json, outline_to_json, AnalysisMetadata, JsonFormat};
