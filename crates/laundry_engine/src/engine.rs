use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::chain::SourceChain;
use crate::extract::HeuristicExtractor;
use crate::fetch::{ChannelProgressSink, FetchSettings, Fetcher, ReqwestFetcher};
use crate::heuristics::ExtractorConfig;
use crate::sources::RetrievalSettings;
use crate::status::check_status;
use crate::{EngineEvent, RefreshId};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub target_url: String,
    pub fetch: FetchSettings,
    pub retrieval: RetrievalSettings,
    pub extractor: ExtractorConfig,
}

impl EngineConfig {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            fetch: FetchSettings::default(),
            retrieval: RetrievalSettings::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

enum EngineCommand {
    Refresh { refresh_id: RefreshId },
}

struct Worker {
    chain: SourceChain,
    extractor: HeuristicExtractor,
    target_url: String,
}

/// Runs refreshes on a background thread and reports back through events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker = Arc::new(Worker {
            chain: SourceChain::new(fetcher, config.retrieval),
            extractor: HeuristicExtractor::new(config.extractor),
            target_url: config.target_url,
        });

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let worker = worker.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(worker.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn refresh(&self, refresh_id: RefreshId) {
        let _ = self.cmd_tx.send(EngineCommand::Refresh { refresh_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(worker: &Worker, command: EngineCommand, event_tx: mpsc::Sender<EngineEvent>) {
    match command {
        EngineCommand::Refresh { refresh_id } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = check_status(
                &worker.chain,
                &worker.extractor,
                refresh_id,
                &worker.target_url,
                &sink,
            )
            .await;
            let _ = event_tx.send(EngineEvent::RefreshCompleted { refresh_id, result });
        }
    }
}
