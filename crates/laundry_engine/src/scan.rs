use engine_logging::engine_warn;
use scraper::{ElementRef, Html, Selector};

use crate::heuristics::ExtractorConfig;
use crate::rich_text::RichTextProjector;

/// An element that plausibly renders one machine card.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub element: ElementRef<'a>,
    pub text: String,
    /// Length of `text` in characters.
    pub text_len: usize,
    pub score: f64,
    pub id: String,
}

/// Identifier and relevance score of one projected text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextScore {
    pub id: String,
    pub score: f64,
}

/// Walks the candidate pool in document order and keeps every element whose
/// rich text carries a unit number and clears the acceptance threshold.
pub fn scan_candidates<'a>(document: &'a Html, config: &ExtractorConfig) -> Vec<Candidate<'a>> {
    let selector = match Selector::parse(&config.candidate_selector) {
        Ok(selector) => selector,
        Err(err) => {
            engine_warn!(
                "Invalid candidate selector {:?}: {:?}",
                config.candidate_selector,
                err
            );
            return Vec::new();
        }
    };
    let projector = RichTextProjector::new(&config.cues, &config.skipped_tags);

    document
        .select(&selector)
        .filter(|element| element.inner_html().chars().count() <= config.max_inner_html_chars)
        .filter_map(|element| {
            let text = projector.project(element);
            let TextScore { id, score } = score_text(&text, config)?;
            if score < config.acceptance_threshold {
                return None;
            }
            Some(Candidate {
                element,
                text_len: text.chars().count(),
                text,
                score,
                id,
            })
        })
        .collect()
}

/// Scores projected text. `None` when no unit number is present, since such an
/// element cannot be a machine card.
pub fn score_text(text: &str, config: &ExtractorConfig) -> Option<TextScore> {
    let patterns = &config.patterns;
    let id = patterns.identifier.captures(text)?.get(1)?.as_str().to_string();

    let mut score = config.identifier_weight;
    if patterns.type_signal.is_match(text) {
        score += config.type_weight;
    }
    if patterns.status_signal.is_match(text) {
        score += config.status_weight;
    }
    let len = text.chars().count() as f64;
    score -= (len / config.length_penalty_divisor).min(config.max_length_penalty);

    Some(TextScore { id, score })
}
