//! Persona-driven relevance scoring over assembled sections.

mod keywords;
mod options;
mod scorer;

pub use keywords::{extract_keywords, tokenize};
pub use options::{RankOptions, ScoreWeights};
pub use scorer::{rank_sections, Ranking};
