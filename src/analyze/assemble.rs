//! Outline assembly.
//!
//! Walks classified lines in document order, emits the public outline
//! (title excluded, adjacent duplicates collapsed), and cuts the section
//! ranges the relevance scorer consumes.

use unicode_normalization::UnicodeNormalization;

use crate::analyze::classify::{ClassifiedLine, LineClass, TitleChoice, TitleSource};
use crate::model::{DocumentOutline, HeadingLevel, OutlineEntry, Section};

/// Outline and sections of one document.
#[derive(Debug, Clone, Default)]
pub struct AssembledDocument {
    /// Title plus public outline entries
    pub outline: DocumentOutline,
    /// One section per heading, in heading order
    pub sections: Vec<Section>,
}

/// A section still collecting body text.
struct OpenSection {
    output_index: usize,
    depth: u8,
}

/// Assemble the outline and sections for one document.
///
/// A line chosen as the title through a title-eligible candidate is excluded
/// from the outline and owns no section; a fallback title (largest font on
/// page 1) keeps whatever outline entry it earned on its own. A section runs
/// from its heading to the next heading of equal-or-higher level (or end of
/// document), so an H1 section also absorbs the body text of its nested
/// H2/H3 ranges.
pub fn assemble(
    document: &str,
    classified: &[ClassifiedLine],
    title: Option<TitleChoice>,
) -> AssembledDocument {
    let title_text = title
        .map(|choice| classified[choice.index].line.text.clone())
        .unwrap_or_default();
    let excluded_index = title.and_then(|choice| match choice.source {
        TitleSource::Candidate => Some(choice.index),
        TitleSource::FallbackLargestFont => None,
    });

    let mut entries: Vec<OutlineEntry> = Vec::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut open: Vec<OpenSection> = Vec::new();

    for (idx, cl) in classified.iter().enumerate() {
        match cl.class {
            LineClass::Heading { level, .. } => {
                if Some(idx) == excluded_index {
                    continue;
                }

                // Collapse adjacent duplicates (same normalized text + page).
                if let Some(last) = entries.last() {
                    if last.page == cl.line.page
                        && normalize(&last.text) == normalize(&cl.line.text)
                    {
                        continue;
                    }
                }

                close_at_or_below(&mut open, level);
                entries.push(OutlineEntry::new(level, cl.line.text.clone(), cl.line.page));
                open.push(OpenSection {
                    output_index: sections.len(),
                    depth: level.depth(),
                });
                sections.push(Section::new(
                    document,
                    cl.line.page,
                    cl.line.text.clone(),
                    level,
                    String::new(),
                ));
            }
            LineClass::Body => {
                for section in &open {
                    let body = &mut sections[section.output_index].body_text;
                    if !body.is_empty() {
                        body.push(' ');
                    }
                    body.push_str(cl.line.text.trim());
                }
            }
            LineClass::Noise => {}
        }
    }

    AssembledDocument {
        outline: DocumentOutline {
            title: title_text,
            entries,
        },
        sections,
    }
}

/// Close every open section at the given level or deeper.
fn close_at_or_below(open: &mut Vec<OpenSection>, level: HeadingLevel) {
    let depth = level.depth();
    open.retain(|section| section.depth < depth);
}

/// Normalization used for duplicate collapsing: NFC, lowercased, whitespace
/// collapsed.
fn normalize(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    nfc.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
