use crate::state::{AppState, Machine, MachineKind, MachineStatus, Phase, ProgressSnapshot};
use crate::vocab::Vocab;

/// Card pictogram, named after the Font Awesome glyph the page used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Soap,
    Wind,
    LayerGroup,
    ShoePrints,
}

impl Icon {
    pub fn for_kind(kind: MachineKind) -> Self {
        match kind {
            MachineKind::SneakerWasher | MachineKind::SneakerDryer => Icon::ShoePrints,
            MachineKind::Dryer => Icon::Wind,
            MachineKind::WasherDryer => Icon::LayerGroup,
            MachineKind::Washer => Icon::Soap,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Soap => "soap",
            Icon::Wind => "wind",
            Icon::LayerGroup => "layer-group",
            Icon::ShoePrints => "shoe-prints",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineCardView {
    pub id: String,
    pub kind: MachineKind,
    pub status: MachineStatus,
    pub remaining_minutes: Option<u32>,
    pub type_label: String,
    pub capacity: Option<String>,
    pub available: bool,
    pub icon: Icon,
    pub status_line: String,
    /// Broken machines are greyed out rather than shown as busy.
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub language_code: &'static str,
    pub heading: &'static str,
    pub phase: Phase,
    pub progress_line: Option<String>,
    pub cards: Vec<MachineCardView>,
    pub available_count: usize,
    pub error: Option<String>,
    /// Only present while the debug panel is open.
    pub debug: Option<String>,
    pub last_updated: Option<String>,
    pub source_url: String,
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let vocab = &state.language().vocab;
    let cards: Vec<MachineCardView> = state
        .machines()
        .unwrap_or_default()
        .iter()
        .map(|machine| machine_card(machine, vocab))
        .collect();

    AppViewModel {
        language_code: state.language().code,
        heading: vocab.hello,
        phase: state.phase(),
        progress_line: (state.phase() == Phase::Loading).then(|| progress_line(state.progress())),
        available_count: cards.iter().filter(|card| card.available).count(),
        cards,
        error: state.error().map(str::to_string),
        debug: state
            .show_debug()
            .then(|| state.debug().map(str::to_string))
            .flatten(),
        last_updated: state.last_updated().map(str::to_string),
        source_url: state.target_url().to_string(),
    }
}

pub fn type_label(kind: MachineKind, vocab: &Vocab) -> &'static str {
    match kind {
        MachineKind::Washer => vocab.washer,
        MachineKind::Dryer => vocab.dryer,
        MachineKind::WasherDryer => vocab.washer_dryer,
        MachineKind::SneakerWasher => vocab.sneaker_washer,
        MachineKind::SneakerDryer => vocab.sneaker_dryer,
    }
}

/// Availability wins, then a known countdown, then the bare status label.
pub fn status_line(machine: &Machine, vocab: &Vocab) -> String {
    if machine.is_available() {
        return vocab.available.to_string();
    }
    if let Some(minutes) = machine.remaining_minutes {
        return format!("{} {} {}", vocab.remaining_prefix, minutes, vocab.min);
    }
    match machine.status {
        MachineStatus::Finished => vocab.finished,
        MachineStatus::Error => vocab.error,
        MachineStatus::Available | MachineStatus::InUse => vocab.in_use,
    }
    .to_string()
}

fn machine_card(machine: &Machine, vocab: &Vocab) -> MachineCardView {
    MachineCardView {
        id: machine.id.clone(),
        kind: machine.kind,
        status: machine.status,
        remaining_minutes: machine.remaining_minutes,
        type_label: type_label(machine.kind, vocab).to_string(),
        capacity: machine.capacity.clone(),
        available: machine.is_available(),
        icon: Icon::for_kind(machine.kind),
        status_line: status_line(machine, vocab),
        is_error: machine.status == MachineStatus::Error,
    }
}

fn progress_line(progress: Option<&ProgressSnapshot>) -> String {
    let Some(progress) = progress else {
        return "Connecting to laundry system...".to_string();
    };
    let via = progress
        .source_name
        .as_deref()
        .map(|name| format!(" via {name}"))
        .unwrap_or_default();
    match (progress.stage, progress.bytes) {
        (crate::Stage::Downloading, Some(bytes)) => format!("Downloading{via} ({bytes} bytes)..."),
        (crate::Stage::Downloading, None) => format!("Downloading{via}..."),
        (crate::Stage::Parsing, _) => format!("Reading machine cards{via}..."),
        (crate::Stage::Done, _) => "Done".to_string(),
        (crate::Stage::Connecting, _) => format!("Connecting{via}..."),
    }
}
