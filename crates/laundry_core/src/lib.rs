//! Laundry core: pure state machine, view model and display vocabulary.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;
mod vocab;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, Machine, MachineKind, MachineStatus, Phase, ProgressSnapshot, RefreshId, Stage,
};
pub use update::update;
pub use view_model::{status_line, type_label, AppViewModel, Icon, MachineCardView};
pub use vocab::{
    default_language, detect_language, find_language, Language, Vocab, DEFAULT_LANGUAGE,
    LANGUAGES,
};
