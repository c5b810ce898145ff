//! Data model for layout-driven outline extraction and section ranking.
//!
//! This module defines the types that flow through the pipeline: input spans
//! from the external layout source, the classified outline, and the section
//! artifacts consumed by the relevance scorer.

mod outline;
mod section;
mod span;

pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
pub use section::{RankedSection, Section, SubSectionExcerpt};
pub use span::{BoundingBox, DocumentSpans, RawSpan, TextSpan};
