#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a fresh status check.
    RefreshClicked,
    /// User picked a display language by code.
    LanguageSelected(String),
    /// User toggled the debug details panel.
    ToggleDebug,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Engine progress for a refresh.
    RefreshProgress {
        refresh_id: crate::RefreshId,
        stage: crate::Stage,
        source_name: Option<String>,
        bytes: Option<u64>,
    },
    /// Engine completion with machines.
    RefreshSucceeded {
        refresh_id: crate::RefreshId,
        machines: Vec<crate::Machine>,
        debug: String,
        updated_at: String,
    },
    /// Engine completion without machines.
    RefreshFailed {
        refresh_id: crate::RefreshId,
        message: String,
        debug: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
