//! Tunable knobs of the card extractor.
//!
//! The defaults are tuned against one laundromat chain's markup. Every
//! keyword list and weight lives here so a different site can be targeted
//! without touching the scanning or classification code.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

const DEFAULT_CANDIDATE_SELECTOR: &str = "div, li, tr, article, dl, section, td";

static DEFAULT_PATTERNS: Lazy<PatternSet> = Lazy::new(PatternSet::build_default);

/// Compiled, case-insensitive patterns used for scoring and classification.
#[derive(Debug, Clone)]
pub struct PatternSet {
    /// Unit number; capture group 1 holds the digits.
    pub identifier: Regex,
    /// Any machine-type word. Scoring only.
    pub type_signal: Regex,
    /// Any status or duration word. Scoring only.
    pub status_signal: Regex,
    /// Countdown; capture group 1 holds the minutes.
    pub duration: Regex,
    pub available: Regex,
    pub in_use: Regex,
    pub finished: Regex,
    pub error: Regex,
    pub washer_dryer: Regex,
    pub sneaker: Regex,
    pub drying: Regex,
    pub washing: Regex,
    /// Capacity label such as `8kg`; capture group 1 is the label.
    pub capacity: Regex,
}

impl PatternSet {
    fn build_default() -> Self {
        Self {
            identifier: pattern(r"(?:No\.|#|号機|^|\s)([0-9]{1,2})(?:\s|$|号|番)"),
            type_signal: pattern(r"洗濯|乾燥|Wash|Dry|Sneaker|Shoes|スニーカー"),
            status_signal: pattern(
                r"空き|Available|空室|利用可|運転中|稼働中|In Use|終了|Finished|残り|あと|Remaining|min|分",
            ),
            duration: pattern(r"(?:残り|あと|Remaining)?\s*[:：]?\s*([0-9]+)\s*(?:分|min)"),
            available: pattern(r"空き|Available|空室|利用可|Vacant"),
            in_use: pattern(r"運転中|稼働中|In Use|Running|Driving"),
            finished: pattern(r"終了|Finished|Stop"),
            error: pattern(r"故障|Error|Out of order"),
            washer_dryer: pattern(r"洗濯乾燥|Washer.*Dryer|洗乾"),
            sneaker: pattern(r"スニーカー|Shoe"),
            drying: pattern(r"乾燥|Dry"),
            washing: pattern(r"洗濯|Wash"),
            capacity: pattern(r"([0-9]+kg)"),
        }
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        DEFAULT_PATTERNS.clone()
    }
}

fn pattern(source: &str) -> Regex {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .expect("built-in extraction pattern must compile")
}

/// Attribute substring cue that injects a synthetic keyword into rich text.
///
/// Image sources and class names are lower-cased before matching, so the
/// needles must be lower-case too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCue {
    pub token: String,
    pub src_needles: Vec<String>,
    pub class_needles: Vec<String>,
}

impl AttributeCue {
    pub fn new(token: &str, src_needles: &[&str], class_needles: &[&str]) -> Self {
        Self {
            token: token.to_string(),
            src_needles: src_needles.iter().map(|s| s.to_string()).collect(),
            class_needles: class_needles.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn matches(&self, src: &str, class: &str) -> bool {
        self.src_needles.iter().any(|n| src.contains(n.as_str()))
            || self.class_needles.iter().any(|n| class.contains(n.as_str()))
    }
}

pub fn default_cues() -> Vec<AttributeCue> {
    vec![
        AttributeCue::new("Available", &["vacant", "aki", "ok", "open"], &["available"]),
        AttributeCue::new(
            "In Use",
            &["working", "unten", "use", "busy", "running"],
            &["busy"],
        ),
        AttributeCue::new("Finished", &["stop", "end", "finish"], &[]),
        AttributeCue::new("Washer", &["sentaku", "wash"], &["wash"]),
        AttributeCue::new("Dryer", &["kansou", "dry"], &["dry"]),
        AttributeCue::new("Sneaker", &["kutsu", "shoe"], &["shoe"]),
    ]
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// CSS selector for the candidate pool.
    pub candidate_selector: String,
    /// Elements with more inner markup than this are page wrappers, not cards.
    pub max_inner_html_chars: usize,
    pub identifier_weight: f64,
    pub type_weight: f64,
    pub status_weight: f64,
    pub length_penalty_divisor: f64,
    pub max_length_penalty: f64,
    pub acceptance_threshold: f64,
    /// Subtrees that never contribute text.
    pub skipped_tags: Vec<String>,
    pub cues: Vec<AttributeCue>,
    pub patterns: PatternSet,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            candidate_selector: DEFAULT_CANDIDATE_SELECTOR.to_string(),
            max_inner_html_chars: 2000,
            identifier_weight: 10.0,
            type_weight: 5.0,
            status_weight: 5.0,
            length_penalty_divisor: 100.0,
            max_length_penalty: 5.0,
            acceptance_threshold: 10.0,
            skipped_tags: vec![
                "script".to_string(),
                "style".to_string(),
                "noscript".to_string(),
            ],
            cues: default_cues(),
            patterns: PatternSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_pattern_needs_a_separator() {
        let p = PatternSet::default();
        let id = |text: &str| {
            p.identifier
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        };
        assert_eq!(id("No.3 洗濯機").as_deref(), Some("3"));
        assert_eq!(id("no.12 dryer").as_deref(), Some("12"));
        assert_eq!(id("#7 故障").as_deref(), Some("7"));
        assert_eq!(id("5号機").as_deref(), Some("5"));
        assert_eq!(id("洗濯機 4番").as_deref(), Some("4"));
        assert_eq!(id("price 500 yen"), None);
        assert_eq!(id("row-12"), None);
    }

    #[test]
    fn cue_matches_source_or_class() {
        let cue = AttributeCue::new("Dryer", &["kansou"], &["dry"]);
        assert!(cue.matches("/img/kansou_01.png", ""));
        assert!(cue.matches("", "machine dry-large"));
        assert!(!cue.matches("/img/sentaku.png", "washer"));
    }

    #[test]
    fn default_config_matches_tuned_values() {
        let config = ExtractorConfig::default();
        assert_eq!(config.max_inner_html_chars, 2000);
        assert_eq!(config.acceptance_threshold, 10.0);
        assert_eq!(config.cues.len(), 6);
    }
}
