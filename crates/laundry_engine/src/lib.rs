//! Laundry engine: page retrieval and heuristic machine-card extraction.
mod chain;
mod classify;
mod decode;
mod engine;
mod extract;
mod fetch;
mod heuristics;
mod rank;
mod rich_text;
mod scan;
mod sources;
mod status;
mod types;

pub use chain::{AttemptOutcome, RetrievalError, RetrievedPage, SourceAttempt, SourceChain};
pub use classify::{capacity_label, classify, classify_kind, classify_status};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use engine::{EngineConfig, EngineHandle};
pub use extract::{extract_machines, page_title, Extractor, HeuristicExtractor};
pub use fetch::{FetchSettings, Fetcher, NullProgressSink, ProgressSink, ReqwestFetcher};
pub use heuristics::{default_cues, AttributeCue, ExtractorConfig, PatternSet};
pub use rank::rank_and_dedupe;
pub use rich_text::RichTextProjector;
pub use scan::{scan_candidates, score_text, Candidate, TextScore};
pub use sources::{default_sources, RetrievalSettings, SourceFormat, SourceSpec};
pub use status::{check_status, summarize, StatusError, StatusReport};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, MachineKind,
    MachineRecord, MachineStatus, RefreshId, RefreshProgress, Stage,
};
