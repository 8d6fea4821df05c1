use engine_logging::{engine_info, engine_warn};
use scraper::Html;

use crate::chain::{RetrievalError, RetrievedPage, SourceAttempt, SourceChain};
use crate::extract::{page_title, Extractor};
use crate::fetch::ProgressSink;
use crate::sources::RetrievalSettings;
use crate::{EngineEvent, MachineRecord, RefreshId, RefreshProgress, Stage};

/// Outcome of one successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub machines: Vec<MachineRecord>,
    pub source_name: String,
    pub char_len: usize,
    pub title: Option<String>,
    pub attempts: Vec<SourceAttempt>,
}

impl StatusReport {
    pub fn debug_summary(&self) -> String {
        format!(
            "Fetched via {}. Length: {} chars. Title: {}",
            self.source_name,
            self.char_len,
            self.title.as_deref().unwrap_or("No Title")
        )
    }
}

/// Terminal failures of a refresh. Extraction itself never fails; only an
/// unreachable page or an unrecognisable layout ends a refresh early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("All sources failed to access the site. The site might be blocking access.")]
    AllSourcesFailed { attempts: Vec<SourceAttempt> },
    #[error("This laundry site requires JavaScript and cannot be auto-read.")]
    RequiresJavaScript { attempts: Vec<SourceAttempt> },
    #[error("Connected to site, but could not find machine data. Layout might be dynamic (JS-only).")]
    LayoutNotRecognized {
        source_name: String,
        char_len: usize,
        title: Option<String>,
        attempts: Vec<SourceAttempt>,
    },
}

impl StatusError {
    pub fn attempts(&self) -> &[SourceAttempt] {
        match self {
            StatusError::AllSourcesFailed { attempts }
            | StatusError::RequiresJavaScript { attempts }
            | StatusError::LayoutNotRecognized { attempts, .. } => attempts,
        }
    }

    /// One line per attempted source, for the "show debug info" panel.
    pub fn debug_trail(&self) -> String {
        let mut lines: Vec<String> = self.attempts().iter().map(ToString::to_string).collect();
        if let StatusError::LayoutNotRecognized {
            title, char_len, ..
        } = self
        {
            lines.push(format!(
                "Raw content length: {char_len}. Title: {}",
                title.as_deref().unwrap_or("No Title")
            ));
        }
        lines.join("\n")
    }
}

impl From<RetrievalError> for StatusError {
    fn from(err: RetrievalError) -> Self {
        if err.requires_javascript {
            StatusError::RequiresJavaScript {
                attempts: err.attempts,
            }
        } else {
            StatusError::AllSourcesFailed {
                attempts: err.attempts,
            }
        }
    }
}

/// Retrieve the status page through `chain` and extract its machines.
pub async fn check_status(
    chain: &SourceChain,
    extractor: &dyn Extractor,
    refresh_id: RefreshId,
    target: &str,
    sink: &dyn ProgressSink,
) -> Result<StatusReport, StatusError> {
    let page = chain.retrieve(refresh_id, target, sink).await?;

    sink.emit(stage_event(refresh_id, Stage::Parsing, &page.source_name));
    let source_name = page.source_name.clone();
    let result = summarize(page, extractor, chain.settings());
    sink.emit(stage_event(refresh_id, Stage::Done, &source_name));

    match &result {
        Ok(report) => engine_info!("Refresh {} found {} machines", refresh_id, report.machines.len()),
        Err(err) => engine_warn!("Refresh {} failed: {}", refresh_id, err),
    }
    result
}

/// Parses a retrieved page. Kept synchronous: the parsed document is not `Send`.
pub fn summarize(
    page: RetrievedPage,
    extractor: &dyn Extractor,
    settings: &RetrievalSettings,
) -> Result<StatusReport, StatusError> {
    let document = Html::parse_document(&page.html);
    let title = page_title(&document);
    let machines = extractor.extract_document(&document);
    let char_len = page.html.chars().count();

    if machines.is_empty() {
        if char_len < settings.min_content_len
            && page.html.contains(settings.javascript_hint.as_str())
        {
            return Err(StatusError::RequiresJavaScript {
                attempts: page.attempts,
            });
        }
        return Err(StatusError::LayoutNotRecognized {
            source_name: page.source_name,
            char_len,
            title,
            attempts: page.attempts,
        });
    }

    Ok(StatusReport {
        machines,
        source_name: page.source_name,
        char_len,
        title,
        attempts: page.attempts,
    })
}

fn stage_event(refresh_id: RefreshId, stage: Stage, source_name: &str) -> EngineEvent {
    EngineEvent::Progress(RefreshProgress {
        refresh_id,
        stage,
        source_name: Some(source_name.to_string()),
        bytes: None,
    })
}
