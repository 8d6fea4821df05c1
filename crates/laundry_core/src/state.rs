use crate::view_model::{self, AppViewModel};
use crate::vocab::{default_language, find_language, Language};

pub type RefreshId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connecting,
    Downloading,
    Parsing,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineKind {
    Washer,
    Dryer,
    WasherDryer,
    SneakerWasher,
    SneakerDryer,
}

impl MachineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineKind::Washer => "washer",
            MachineKind::Dryer => "dryer",
            MachineKind::WasherDryer => "washer_dryer",
            MachineKind::SneakerWasher => "sneaker_washer",
            MachineKind::SneakerDryer => "sneaker_dryer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineStatus {
    Available,
    InUse,
    Finished,
    Error,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Available => "available",
            MachineStatus::InUse => "in_use",
            MachineStatus::Finished => "finished",
            MachineStatus::Error => "error",
        }
    }
}

/// A machine as reported by the last successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub id: String,
    pub kind: MachineKind,
    pub status: MachineStatus,
    pub remaining_minutes: Option<u32>,
    pub capacity: Option<String>,
}

impl Machine {
    pub fn is_available(&self) -> bool {
        self.status == MachineStatus::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub stage: Stage,
    pub source_name: Option<String>,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    target_url: String,
    language: &'static Language,
    phase: Phase,
    machines: Option<Vec<Machine>>,
    error: Option<String>,
    debug: Option<String>,
    show_debug: bool,
    last_updated: Option<String>,
    progress: Option<ProgressSnapshot>,
    next_refresh_id: RefreshId,
    in_flight: Option<RefreshId>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("")
    }
}

impl AppState {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            language: default_language(),
            phase: Phase::Idle,
            machines: None,
            error: None,
            debug: None,
            show_debug: false,
            last_updated: None,
            progress: None,
            next_refresh_id: 1,
            in_flight: None,
            dirty: false,
        }
    }

    pub fn with_language(mut self, language: &'static Language) -> Self {
        self.language = language;
        self
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn language(&self) -> &'static Language {
        self.language
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn machines(&self) -> Option<&[Machine]> {
        self.machines.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn debug(&self) -> Option<&str> {
        self.debug.as_deref()
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn progress(&self) -> Option<&ProgressSnapshot> {
        self.progress.as_ref()
    }

    pub fn in_flight(&self) -> Option<RefreshId> {
        self.in_flight
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub(crate) fn is_current(&self, refresh_id: RefreshId) -> bool {
        self.in_flight == Some(refresh_id)
    }

    pub(crate) fn begin_refresh(&mut self) -> RefreshId {
        let refresh_id = self.next_refresh_id;
        self.next_refresh_id += 1;
        self.in_flight = Some(refresh_id);
        self.phase = Phase::Loading;
        self.machines = None;
        self.error = None;
        self.debug = None;
        self.progress = None;
        self.mark_dirty();
        refresh_id
    }

    pub(crate) fn apply_progress(&mut self, progress: ProgressSnapshot) {
        // Downloads only report bytes; keep the source from the connecting step.
        let source_name = progress.source_name.or_else(|| {
            self.progress
                .as_ref()
                .and_then(|previous| previous.source_name.clone())
        });
        self.progress = Some(ProgressSnapshot {
            source_name,
            ..progress
        });
        self.mark_dirty();
    }

    pub(crate) fn apply_success(
        &mut self,
        machines: Vec<Machine>,
        debug: String,
        updated_at: String,
    ) {
        self.in_flight = None;
        self.phase = Phase::Loaded;
        self.machines = Some(machines);
        self.debug = Some(debug);
        self.last_updated = Some(updated_at);
        self.progress = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, message: String, debug: String) {
        self.in_flight = None;
        self.phase = Phase::Failed;
        self.error = Some(message);
        self.debug = Some(debug);
        self.progress = None;
        self.mark_dirty();
    }

    pub(crate) fn select_language(&mut self, code: &str) -> bool {
        match find_language(code) {
            Some(language) if language.code != self.language.code => {
                self.language = language;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn toggle_debug(&mut self) {
        self.show_debug = !self.show_debug;
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
