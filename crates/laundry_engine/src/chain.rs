use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use engine_logging::{engine_info, engine_warn};
use serde::Deserialize;

use crate::decode::decode_html;
use crate::fetch::{Fetcher, ProgressSink};
use crate::sources::{RetrievalSettings, SourceFormat, SourceSpec};
use crate::{EngineEvent, FailureKind, FetchError, RefreshId, RefreshProgress, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Accepted { chars: usize },
    TooShort { chars: usize },
    Failed(FetchError),
}

/// What happened when one source was tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAttempt {
    pub source_name: String,
    pub outcome: AttemptOutcome,
}

impl fmt::Display for SourceAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AttemptOutcome::Accepted { chars } => {
                write!(f, "{} OK: {chars} chars", self.source_name)
            }
            AttemptOutcome::TooShort { chars } => {
                write!(f, "{} Failed: response too short ({chars} chars)", self.source_name)
            }
            AttemptOutcome::Failed(err) => write!(f, "{} Failed: {err}", self.source_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedPage {
    pub source_name: String,
    pub html: String,
    pub attempts: Vec<SourceAttempt>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no source returned usable content ({} tried)", .attempts.len())]
pub struct RetrievalError {
    pub attempts: Vec<SourceAttempt>,
    /// Some source answered with a short "enable JavaScript" stub.
    pub requires_javascript: bool,
}

#[derive(Deserialize)]
struct AllOriginsPayload {
    contents: Option<String>,
}

/// Sequential fallback over [`SourceSpec`]s sharing one [`Fetcher`].
pub struct SourceChain {
    fetcher: Arc<dyn Fetcher>,
    settings: RetrievalSettings,
}

impl SourceChain {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: RetrievalSettings) -> Self {
        Self { fetcher, settings }
    }

    pub fn settings(&self) -> &RetrievalSettings {
        &self.settings
    }

    pub async fn retrieve(
        &self,
        refresh_id: RefreshId,
        target: &str,
        sink: &dyn ProgressSink,
    ) -> Result<RetrievedPage, RetrievalError> {
        let mut attempts = Vec::with_capacity(self.settings.sources.len());
        let mut requires_javascript = false;

        for source in &self.settings.sources {
            engine_info!("Trying source {}", source.name);
            sink.emit(EngineEvent::Progress(RefreshProgress {
                refresh_id,
                stage: Stage::Connecting,
                source_name: Some(source.name.clone()),
                bytes: None,
            }));

            let url = source.request_url(target, now_millis());
            let outcome = match self.fetch_text(refresh_id, source, &url, sink).await {
                Ok(html) => {
                    let chars = html.chars().count();
                    if chars > self.settings.min_content_len {
                        engine_info!("Source {} returned {} chars", source.name, chars);
                        attempts.push(SourceAttempt {
                            source_name: source.name.clone(),
                            outcome: AttemptOutcome::Accepted { chars },
                        });
                        return Ok(RetrievedPage {
                            source_name: source.name.clone(),
                            html,
                            attempts,
                        });
                    }
                    if html.contains(self.settings.javascript_hint.as_str()) {
                        requires_javascript = true;
                    }
                    AttemptOutcome::TooShort { chars }
                }
                Err(err) => AttemptOutcome::Failed(err),
            };

            let attempt = SourceAttempt {
                source_name: source.name.clone(),
                outcome,
            };
            engine_warn!("{}", attempt);
            attempts.push(attempt);
        }

        Err(RetrievalError {
            attempts,
            requires_javascript,
        })
    }

    async fn fetch_text(
        &self,
        refresh_id: RefreshId,
        source: &SourceSpec,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<String, FetchError> {
        let output = self.fetcher.fetch(refresh_id, url, sink).await?;
        match source.format {
            SourceFormat::RawHtml => {
                decode_html(&output.bytes, output.metadata.content_type.as_deref())
                    .map(|decoded| decoded.html)
                    .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
            }
            SourceFormat::AllOriginsJson => {
                let payload: AllOriginsPayload = serde_json::from_slice(&output.bytes)
                    .map_err(|err| FetchError::new(FailureKind::InvalidPayload, err.to_string()))?;
                payload
                    .contents
                    .filter(|contents| !contents.is_empty())
                    .ok_or_else(|| FetchError::new(FailureKind::InvalidPayload, "empty contents"))
            }
        }
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
