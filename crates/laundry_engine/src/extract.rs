use engine_logging::engine_debug;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::classify::classify;
use crate::heuristics::ExtractorConfig;
use crate::rank::rank_and_dedupe;
use crate::scan::scan_candidates;
use crate::MachineRecord;

static DEFAULT_EXTRACTOR: Lazy<HeuristicExtractor> = Lazy::new(HeuristicExtractor::default);

pub trait Extractor: Send + Sync {
    fn extract_document(&self, document: &Html) -> Vec<MachineRecord>;

    fn extract(&self, html: &str) -> Vec<MachineRecord> {
        self.extract_document(&Html::parse_document(html))
    }
}

/// Score-based machine card extractor:
/// - scans generic containers that carry a unit number
/// - keeps the best-scoring, most compact element per unit number
/// - classifies each survivor from its rich text
///
/// Output is sorted by unit number and identical for identical input.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor {
    config: ExtractorConfig,
}

impl HeuristicExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}

impl Extractor for HeuristicExtractor {
    fn extract_document(&self, document: &Html) -> Vec<MachineRecord> {
        let candidates = scan_candidates(document, &self.config);
        let scanned = candidates.len();
        let survivors = rank_and_dedupe(candidates);

        let mut machines: Vec<MachineRecord> = survivors
            .iter()
            .map(|c| classify(&c.id, &c.text, &self.config.patterns))
            .collect();
        machines.sort_by_key(MachineRecord::numeric_id);

        engine_debug!(
            "Extracted {} machines from {} accepted candidates",
            machines.len(),
            scanned
        );
        machines
    }
}

/// Extracts machines with the default heuristics.
pub fn extract_machines(html: &str) -> Vec<MachineRecord> {
    DEFAULT_EXTRACTOR.extract(html)
}

pub fn page_title(document: &Html) -> Option<String> {
    let title_sel = Selector::parse("title").ok()?;
    document
        .select(&title_sel)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
