//! Relevance scoring across the sections of a document collection.

use std::collections::HashSet;

use crate::model::{RankedSection, Section, SubSectionExcerpt};
use crate::rank::keywords::{extract_keywords, tokenize};
use crate::rank::options::RankOptions;

/// Outcome of ranking a section collection.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Sections sorted by descending score with the deterministic tie-break
    pub sections: Vec<RankedSection>,
    /// Refined excerpts for the top-K ranked sections
    pub excerpts: Vec<SubSectionExcerpt>,
}

/// Score and rank sections against a persona and a job-to-be-done.
///
/// Zero matches anywhere is a valid outcome: all scores are 0 and the order
/// falls back entirely to the (document, page) tie-break.
pub fn rank_sections(
    sections: &[Section],
    persona: &str,
    job: &str,
    options: &RankOptions,
) -> Ranking {
    let persona_keywords = extract_keywords(persona);
    let job_keywords = extract_keywords(job);
    log::debug!(
        "ranking {} sections against {} persona / {} job keywords",
        sections.len(),
        persona_keywords.len(),
        job_keywords.len()
    );

    let mut scored: Vec<(f64, &Section)> = sections
        .iter()
        .map(|section| (score_section(section, &persona_keywords, &job_keywords, options), section))
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .total_cmp(score_a)
            .then_with(|| a.document.cmp(&b.document))
            .then_with(|| a.page.cmp(&b.page))
    });

    let ranks = bucket_ranks(&scored);

    let ranked: Vec<RankedSection> = scored
        .iter()
        .zip(ranks)
        .map(|((score, section), importance_rank)| RankedSection {
            document: section.document.clone(),
            page: section.page,
            title: section.title.clone(),
            score: *score,
            importance_rank,
        })
        .collect();

    let excerpts = scored
        .iter()
        .take(options.top_k)
        .map(|(_, section)| SubSectionExcerpt {
            document: section.document.clone(),
            page: section.page,
            refined_text: refine_excerpt(&section.body_text, options.excerpt_chars),
        })
        .collect();

    Ranking {
        sections: ranked,
        excerpts,
    }
}

/// Score one section: weighted distinct keyword matches, a bonus for broad
/// coverage, then a logarithmic discount so long sections cannot win on
/// sheer length.
fn score_section(
    section: &Section,
    persona_keywords: &std::collections::BTreeSet<String>,
    job_keywords: &std::collections::BTreeSet<String>,
    options: &RankOptions,
) -> f64 {
    let words: HashSet<String> = tokenize(&section.search_text()).collect();

    let persona_matches = persona_keywords
        .iter()
        .filter(|kw| words.contains(kw.as_str()))
        .count();
    let job_matches = job_keywords
        .iter()
        .filter(|kw| words.contains(kw.as_str()))
        .count();
    let total_distinct = persona_keywords
        .union(job_keywords)
        .filter(|kw| words.contains(kw.as_str()))
        .count();

    let w = &options.weights;
    let mut raw = w.persona * persona_matches as f64 + w.job * job_matches as f64;
    if total_distinct >= w.bonus_matches {
        raw += w.bonus;
    }

    let body_len = section.body_text.chars().count() as f64;
    let pivot = options.length_discount_pivot.max(1) as f64;
    let discounted = raw / (1.0 + (1.0 + body_len / pivot).ln());

    discounted.clamp(0.0, 1.0)
}

/// Map sorted scores onto importance ranks 1..=10 through equal-width
/// buckets over the observed score range. A degenerate range (every score
/// equal) collapses to rank 1; the ranked order itself stays total through
/// the sort tie-break.
fn bucket_ranks(scored: &[(f64, &Section)]) -> Vec<u32> {
    if scored.is_empty() {
        return Vec::new();
    }

    let max = scored.first().map(|(s, _)| *s).unwrap_or(0.0);
    let min = scored.last().map(|(s, _)| *s).unwrap_or(0.0);
    let range = max - min;

    if range <= f64::EPSILON {
        return vec![1; scored.len()];
    }

    let width = range / 10.0;
    scored
        .iter()
        .map(|(score, _)| {
            let bucket = ((max - score) / width).floor() as u32;
            (1 + bucket).min(10)
        })
        .collect()
}

/// Trim body text to roughly `limit` characters, preferring a sentence
/// boundary in the back half of the window, then a word boundary, then a
/// hard cut.
fn refine_excerpt(body_text: &str, limit: usize) -> String {
    let text = body_text.trim();
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= limit {
        return text.to_string();
    }

    let window: String = chars[..limit].iter().collect();

    // Last sentence end past the halfway point of the window.
    let sentence_end = window
        .char_indices()
        .filter(|&(_, c)| matches!(c, '.' | '!' | '?'))
        .map(|(i, c)| i + c.len_utf8())
        .filter(|&end| {
            window[end..]
                .chars()
                .next()
                .map(|next| next.is_whitespace())
                .unwrap_or(true)
        })
        .last()
        .filter(|&end| end * 2 >= window.len());

    if let Some(end) = sentence_end {
        return window[..end].trim_end().to_string();
    }

    // Fall back to the last word boundary.
    if let Some(space) = window.rfind(char::is_whitespace) {
        if space > 0 {
            return window[..space].trim_end().to_string();
        }
    }

    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    fn section(document: &str, page: u32, title: &str, body: &str) -> Section {
        Section::new(document, page, title, HeadingLevel::H1, body)
    }

    #[test]
    fn test_chemistry_student_scenario() {
        let sections = vec![
            section(
                "notes.pdf",
                2,
                "Reaction Mechanisms",
                "The reaction starts quickly. A second reaction follows. \
                 Each reaction releases heat, and the final reaction completes \
                 the chemistry sequence.",
            ),
            section(
                "notes.pdf",
                5,
                "Unrelated Notes",
                "Nothing of interest appears in this range of the text.",
            ),
        ];

        let ranking = rank_sections(
            &sections,
            "Chemistry Student",
            "Summarize Key Reactions",
            &RankOptions::default(),
        );

        assert_eq!(ranking.sections[0].title, "Reaction Mechanisms");
        assert_eq!(ranking.sections[0].importance_rank, 1);
        assert!(ranking.sections[0].score > 0.0);
        assert!(ranking.sections[1].score < ranking.sections[0].score);
    }

    #[test]
    fn test_score_bounds_and_monotonicity() {
        let base = section("a.pdf", 1, "Results", "method results data");
        let more = section(
            "a.pdf",
            1,
            "Results",
            "method results data benchmark evaluation",
        );

        let options = RankOptions::default();
        let persona = extract_keywords("PhD Researcher");
        let job = extract_keywords("method results data benchmark evaluation");

        let low = score_section(&base, &persona, &job, &options);
        let high = score_section(&more, &persona, &job, &options);

        assert!((0.0..=1.0).contains(&low));
        assert!((0.0..=1.0).contains(&high));
        // More distinct job matches never lowers the score.
        assert!(high >= low);
    }

    #[test]
    fn test_matches_are_whole_word() {
        let s = section("a.pdf", 1, "Artful", "artfully artless");
        let persona = extract_keywords("art");
        let job = extract_keywords("");
        let score = score_section(&s, &persona, &job, &RankOptions::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_length_discount() {
        let short = section("a.pdf", 1, "Reactions", "reaction chemistry summary");
        let filler = "unrelated filler text goes on and on without adding matches. ".repeat(60);
        let long = section(
            "a.pdf",
            1,
            "Reactions",
            &format!("reaction chemistry summary {filler}"),
        );

        let persona = extract_keywords("Chemistry Student");
        let job = extract_keywords("Summarize Key Reactions");
        let options = RankOptions::default();

        let short_score = score_section(&short, &persona, &job, &options);
        let long_score = score_section(&long, &persona, &job, &options);
        assert!(short_score > long_score);
    }

    #[test]
    fn test_no_matches_is_not_an_error() {
        let sections = vec![
            section("b.pdf", 4, "Alpha", "nothing relevant"),
            section("a.pdf", 9, "Beta", "still nothing"),
            section("a.pdf", 2, "Gamma", "irrelevant"),
        ];
        let ranking = rank_sections(&sections, "Astronaut", "Fly to orbit", &RankOptions::default());

        assert!(ranking.sections.iter().all(|s| s.score == 0.0));
        // Deterministic tie-break: document ascending, then page ascending.
        let order: Vec<(&str, u32)> = ranking
            .sections
            .iter()
            .map(|s| (s.document.as_str(), s.page))
            .collect();
        assert_eq!(order, vec![("a.pdf", 2), ("a.pdf", 9), ("b.pdf", 4)]);
        assert!(ranking.sections.iter().all(|s| s.importance_rank == 1));
    }

    #[test]
    fn test_bucket_ranks_span_range() {
        let s = section("a.pdf", 1, "t", "b");
        let scored: Vec<(f64, &Section)> =
            vec![(1.0, &s), (0.55, &s), (0.5, &s), (0.0, &s)];
        let ranks = bucket_ranks(&scored);
        assert_eq!(ranks[0], 1);
        assert_eq!(ranks[1], 5);
        assert_eq!(ranks[2], 6);
        assert_eq!(ranks[3], 10);
    }

    #[test]
    fn test_ranks_consistent_with_descending_score() {
        let sections = vec![
            section("a.pdf", 1, "Reactions", "reaction chemistry summary reactions key"),
            section("a.pdf", 2, "Partial", "reaction only"),
            section("a.pdf", 3, "Nothing", "no relevant words"),
        ];
        let ranking = rank_sections(
            &sections,
            "Chemistry Student",
            "Summarize Key Reactions",
            &RankOptions::default(),
        );
        for pair in ranking.sections.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            assert!(pair[0].importance_rank <= pair[1].importance_rank);
        }
    }

    #[test]
    fn test_top_k_excerpts() {
        let sections: Vec<Section> = (1..=8)
            .map(|i| section("a.pdf", i, "Heading", "Some body text."))
            .collect();
        let options = RankOptions::default().with_top_k(3);
        let ranking = rank_sections(&sections, "Reader", "Read things", &options);
        assert_eq!(ranking.excerpts.len(), 3);
    }

    #[test]
    fn test_refine_excerpt_sentence_boundary() {
        let body = format!(
            "{} The tail continues well past the window and should be dropped.",
            "A sentence of reasonable length that fills space. ".repeat(12)
        );
        let excerpt = refine_excerpt(&body, 500);
        assert!(excerpt.chars().count() <= 500);
        assert!(excerpt.ends_with('.'));
    }

    #[test]
    fn test_refine_excerpt_short_body_untouched() {
        let excerpt = refine_excerpt("Short body.", 500);
        assert_eq!(excerpt, "Short body.");
    }

    #[test]
    fn test_refine_excerpt_word_boundary_fallback() {
        let body = "word ".repeat(200);
        let excerpt = refine_excerpt(&body, 500);
        assert!(excerpt.chars().count() <= 500);
        assert!(!excerpt.ends_with(' '));
        assert!(excerpt.ends_with("word"));
    }
}
