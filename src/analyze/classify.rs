//! Heading classification.
//!
//! Each line is labelled Heading, Body, or Noise by folding an ordered chain
//! of scoring rules. Every rule is a pure function of the line, the layout
//! profile, and a document-wide context; the first rule to propose a level
//! fixes it, agreeing signals accumulate confidence (capped at 1.0), and a
//! conflicting proposal from a lower-priority rule contributes nothing.
//! Header/footer suppression overrides the whole chain.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::analyze::lines::Line;
use crate::analyze::options::ClassifierThresholds;
use crate::analyze::profile::LayoutProfile;
use crate::model::HeadingLevel;

/// Section keywords that commonly open a heading line.
const HEADING_KEYWORDS: &[&str] = &[
    "abstract",
    "introduction",
    "background",
    "overview",
    "summary",
    "methodology",
    "methods",
    "results",
    "discussion",
    "analysis",
    "conclusion",
    "conclusions",
    "recommendations",
    "references",
    "bibliography",
    "acknowledgements",
    "appendix",
    "chapter",
    "section",
    "part",
    "preface",
    "foreword",
    "glossary",
];

/// Classification of one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// A heading candidate that cleared the confidence threshold
    Heading {
        /// Assigned level
        level: HeadingLevel,
        /// Accumulated confidence in [0, 1]
        confidence: f32,
        /// Whether the line may serve as the document title
        title_eligible: bool,
    },
    /// Running body text
    Body,
    /// Suppressed header/footer/page-number material
    Noise,
}

/// A line together with its classification.
#[derive(Debug, Clone)]
pub struct ClassifiedLine {
    /// The merged line
    pub line: Line,
    /// Its label
    pub class: LineClass,
}

impl ClassifiedLine {
    /// Whether this line was classified as a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.class, LineClass::Heading { .. })
    }
}

/// One rule's contribution to a line's classification.
#[derive(Debug, Clone, Copy, Default)]
struct RuleSignal {
    /// Hard level proposal; the first one in chain order wins
    level: Option<HeadingLevel>,
    /// Soft default applied only when no rule has fixed a level
    fallback: Option<HeadingLevel>,
    /// Marks the line as a title candidate
    title_eligible: bool,
    /// Confidence contribution
    delta: f32,
}

/// Accumulated candidate state folded over the rule chain.
#[derive(Debug, Default)]
struct Accumulated {
    level: Option<HeadingLevel>,
    confidence: f32,
    title_eligible: bool,
}

impl Accumulated {
    fn fold(&mut self, signal: RuleSignal) {
        match (self.level, signal.level) {
            (None, Some(level)) => {
                self.level = Some(level);
                self.confidence += signal.delta;
                self.title_eligible |= signal.title_eligible;
            }
            (Some(current), Some(proposed)) if current == proposed => {
                self.confidence += signal.delta;
                self.title_eligible |= signal.title_eligible;
            }
            // Conflicting proposal from a lower-priority rule: ignored.
            (Some(_), Some(_)) => {}
            (_, None) => {
                self.confidence += signal.delta;
                if self.level.is_none() {
                    self.level = signal.fallback;
                }
                self.title_eligible |= signal.title_eligible;
            }
        }
        self.confidence = self.confidence.min(1.0);
    }
}

/// Document-wide facts needed by the per-line rules.
#[derive(Debug, Default)]
pub struct ClassifyContext {
    /// Normalized line text -> number of distinct pages it appears on
    repeats: HashMap<String, usize>,
    /// Page -> (top, bottom) of the page's text extent
    page_extents: HashMap<u32, (f32, f32)>,
    /// Order index of each page's first line -> vertical gap to the next line
    leading_gaps: HashMap<usize, f32>,
    /// Number of pages in the document
    page_count: u32,
}

/// Rule-chain heading classifier.
pub struct HeadingClassifier {
    thresholds: ClassifierThresholds,
    numbering: Regex,
    noise_patterns: Vec<Regex>,
}

impl HeadingClassifier {
    /// Create a classifier with the given calibration.
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self {
            thresholds,
            numbering: Regex::new(r"^(\d+(?:\.\d+){0,2})[.)]?\s+\S").unwrap(),
            noise_patterns: vec![
                Regex::new(r"^\d+$").unwrap(),
                Regex::new(r"(?i)^page\s+\d+").unwrap(),
                Regex::new(r"(?i)^(figure|table)\s+\d+").unwrap(),
                Regex::new(r"^\S+@\S+\.\S+$").unwrap(),
                Regex::new(r"(?i)^(https?://|www\.)").unwrap(),
                Regex::new(r"^[^\p{L}\p{N}]+$").unwrap(),
            ],
        }
    }

    /// Build the document-wide context for a line sequence.
    pub fn build_context(&self, lines: &[Line], profile: &LayoutProfile) -> ClassifyContext {
        let mut pages_by_text: HashMap<String, HashSet<u32>> = HashMap::new();
        let mut page_extents: HashMap<u32, (f32, f32)> = HashMap::new();
        let mut leading_gaps: HashMap<usize, f32> = HashMap::new();

        for line in lines {
            let normalized = normalize_repeat(&line.text);
            if !normalized.is_empty() {
                pages_by_text.entry(normalized).or_default().insert(line.page);
            }

            let extent = page_extents
                .entry(line.page)
                .or_insert((line.bbox.y0, line.bbox.y1));
            extent.0 = extent.0.min(line.bbox.y0);
            extent.1 = extent.1.max(line.bbox.y1);
        }

        // First line of each page plus its gap to the following line.
        let mut seen_pages: HashSet<u32> = HashSet::new();
        for (idx, line) in lines.iter().enumerate() {
            if seen_pages.insert(line.page) {
                let gap = lines
                    .get(idx + 1)
                    .filter(|next| next.page == line.page)
                    .map(|next| next.bbox.y0 - line.bbox.y1)
                    .unwrap_or(f32::MAX);
                leading_gaps.insert(line.order, gap);
            }
        }

        ClassifyContext {
            repeats: pages_by_text
                .into_iter()
                .map(|(text, pages)| (text, pages.len()))
                .collect(),
            page_extents,
            leading_gaps,
            page_count: profile.page_count,
        }
    }

    /// Classify every line of a document.
    pub fn classify(&self, lines: Vec<Line>, profile: &LayoutProfile) -> Vec<ClassifiedLine> {
        let ctx = self.build_context(&lines, profile);
        lines
            .into_iter()
            .map(|line| self.classify_line(line, profile, &ctx))
            .collect()
    }

    /// Classify a single line against the rule chain.
    pub fn classify_line(
        &self,
        line: Line,
        profile: &LayoutProfile,
        ctx: &ClassifyContext,
    ) -> ClassifiedLine {
        if self.is_suppressed(&line, ctx) {
            log::debug!("suppressed as header/footer: {:?}", line.text);
            return ClassifiedLine {
                line,
                class: LineClass::Noise,
            };
        }

        if self.is_excluded(&line) {
            return ClassifiedLine {
                line,
                class: LineClass::Body,
            };
        }

        let signals = [
            self.numbering_rule(&line),
            self.font_ratio_rule(&line, profile),
            self.bold_short_rule(&line),
            self.keyword_rule(&line),
            self.positional_rule(&line, ctx),
        ];

        let mut acc = Accumulated::default();
        for signal in signals.into_iter().flatten() {
            acc.fold(signal);
        }

        let class = match acc.level {
            Some(level) if acc.confidence >= self.thresholds.min_confidence => {
                log::debug!(
                    "heading {} ({:.2}): {:?}",
                    level,
                    acc.confidence,
                    line.text
                );
                LineClass::Heading {
                    level,
                    confidence: acc.confidence,
                    title_eligible: acc.title_eligible,
                }
            }
            _ => LineClass::Body,
        };

        ClassifiedLine { line, class }
    }

    /// Rule 1: explicit numbering (`1.`, `1.1`, `1.1.1`) fixes the level.
    fn numbering_rule(&self, line: &Line) -> Option<RuleSignal> {
        let caps = self.numbering.captures(line.text.trim())?;
        let depth = caps.get(1)?.as_str().split('.').count();
        let level = HeadingLevel::from_depth(depth)?;
        Some(RuleSignal {
            level: Some(level),
            delta: self.thresholds.numbering_confidence,
            ..Default::default()
        })
    }

    /// Rule 2: font-size ratio bands against the body baseline.
    ///
    /// Confidence scales linearly from 0.50 at the band floor to 0.85 at the
    /// band ceiling, so a numbering match always outranks a pure ratio
    /// signal.
    fn font_ratio_rule(&self, line: &Line, profile: &LayoutProfile) -> Option<RuleSignal> {
        let t = &self.thresholds;
        let ratio = profile.size_ratio(line.font_size);

        let (level, band_lo, band_hi, title_eligible) = if ratio >= t.h1_ratio {
            (HeadingLevel::H1, t.h1_ratio, t.ratio_ceiling, true)
        } else if ratio >= t.h2_ratio {
            (HeadingLevel::H2, t.h2_ratio, t.h1_ratio, false)
        } else if ratio >= t.h3_ratio {
            (HeadingLevel::H3, t.h3_ratio, t.h2_ratio, false)
        } else {
            return None;
        };

        let span = (band_hi - band_lo).max(f32::EPSILON);
        let position = ((ratio - band_lo) / span).clamp(0.0, 1.0);
        Some(RuleSignal {
            level: Some(level),
            title_eligible,
            delta: 0.50 + 0.35 * position,
            ..Default::default()
        })
    }

    /// Rule 3: bold, short, and not a sentence.
    fn bold_short_rule(&self, line: &Line) -> Option<RuleSignal> {
        let t = &self.thresholds;
        if !line.bold || line.word_count() > t.bold_max_words {
            return None;
        }
        let ends_sentence = line
            .text
            .trim_end()
            .ends_with(['.', '!', '?'])
            // A numbered heading like "2.1." keeps its trailing dot.
            && !self.numbering.is_match(line.text.trim());
        if ends_sentence {
            return None;
        }
        Some(RuleSignal {
            fallback: Some(HeadingLevel::H3),
            delta: t.bold_short_confidence,
            ..Default::default()
        })
    }

    /// Rule 4: line opens with a well-known section keyword.
    fn keyword_rule(&self, line: &Line) -> Option<RuleSignal> {
        let lower = line.text.trim().to_lowercase();
        let matched = HEADING_KEYWORDS.iter().any(|kw| {
            lower == *kw
                || lower
                    .strip_prefix(kw)
                    .is_some_and(|rest| rest.starts_with([' ', ':', '.']))
        });
        if !matched {
            return None;
        }
        Some(RuleSignal {
            fallback: Some(HeadingLevel::H1),
            delta: self.thresholds.keyword_confidence,
            ..Default::default()
        })
    }

    /// Rule 5: first line of its page, vertically isolated from what follows.
    fn positional_rule(&self, line: &Line, ctx: &ClassifyContext) -> Option<RuleSignal> {
        let gap = *ctx.leading_gaps.get(&line.order)?;
        if gap < self.thresholds.isolation_gap_factor * line.font_size {
            return None;
        }
        Some(RuleSignal {
            delta: self.thresholds.positional_confidence,
            ..Default::default()
        })
    }

    /// Rule 6: header/footer suppression, overriding all other signals.
    fn is_suppressed(&self, line: &Line, ctx: &ClassifyContext) -> bool {
        let t = &self.thresholds;

        if ctx.page_count >= 2 {
            let normalized = normalize_repeat(&line.text);
            if !normalized.is_empty() {
                if let Some(&pages) = ctx.repeats.get(&normalized) {
                    if pages as f32 >= t.repeat_page_fraction * ctx.page_count as f32 {
                        return true;
                    }
                }
            }
        }

        if line.word_count() <= t.edge_max_words {
            if let Some(&(top, bottom)) = ctx.page_extents.get(&line.page) {
                let band = t.edge_band_fraction * (bottom - top);
                if band > 0.0
                    && (line.bbox.y1 <= top + band || line.bbox.y0 >= bottom - band)
                {
                    return true;
                }
            }
        }

        false
    }

    /// Rule 0: obvious non-heading material (bare numbers, captions, URLs).
    fn is_excluded(&self, line: &Line) -> bool {
        let text = line.text.trim();
        if text.chars().count() < 3 {
            return true;
        }
        self.noise_patterns.iter().any(|p| p.is_match(text))
    }
}

/// Where the document title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// A title-eligible heading candidate; excluded from the outline
    Candidate,
    /// The largest-font line on page 1; the line keeps any outline entry it
    /// earned on its own
    FallbackLargestFont,
}

/// The line chosen as the document title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleChoice {
    /// Index into the classified line sequence
    pub index: usize,
    /// How the line was chosen
    pub source: TitleSource,
}

/// Pick the title line: the highest-confidence title-eligible heading on the
/// leading pages, falling back to the largest-font line on page 1.
///
/// Returns `None` for an empty document.
pub fn select_title(classified: &[ClassifiedLine], title_page_limit: u32) -> Option<TitleChoice> {
    let candidate = classified
        .iter()
        .enumerate()
        .filter_map(|(idx, cl)| match cl.class {
            LineClass::Heading {
                confidence,
                title_eligible: true,
                ..
            } if cl.line.page <= title_page_limit => Some((idx, confidence)),
            _ => None,
        })
        .max_by(|(a_idx, a_conf), (b_idx, b_conf)| {
            a_conf
                .total_cmp(b_conf)
                .then_with(|| {
                    classified[*a_idx]
                        .line
                        .font_size
                        .total_cmp(&classified[*b_idx].line.font_size)
                })
                .then_with(|| b_idx.cmp(a_idx))
        });

    if let Some((index, _)) = candidate {
        return Some(TitleChoice {
            index,
            source: TitleSource::Candidate,
        });
    }

    // Fallback: largest font on page 1, noise excluded.
    classified
        .iter()
        .enumerate()
        .filter(|(_, cl)| cl.line.page == 1 && cl.class != LineClass::Noise)
        .max_by(|(a_idx, a), (b_idx, b)| {
            a.line
                .font_size
                .total_cmp(&b.line.font_size)
                .then_with(|| b_idx.cmp(a_idx))
        })
        .map(|(index, _)| TitleChoice {
            index,
            source: TitleSource::FallbackLargestFont,
        })
}

/// Normalize a line for repetition matching: NFC, lowercased, digits
/// stripped, whitespace collapsed. Page numbers embedded in running headers
/// ("Report 2024 - page 3") normalize away so the header still matches
/// across pages.
fn normalize_repeat(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    let stripped: String = nfc
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
