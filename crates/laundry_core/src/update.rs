use crate::state::ProgressSnapshot;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshClicked => {
            // One refresh at a time; the button is disabled while loading.
            if state.is_loading() {
                Vec::new()
            } else {
                let refresh_id = state.begin_refresh();
                vec![Effect::StartRefresh { refresh_id }]
            }
        }
        Msg::LanguageSelected(code) => {
            state.select_language(&code);
            Vec::new()
        }
        Msg::ToggleDebug => {
            state.toggle_debug();
            Vec::new()
        }
        Msg::RefreshProgress {
            refresh_id,
            stage,
            source_name,
            bytes,
        } => {
            if state.is_current(refresh_id) {
                state.apply_progress(ProgressSnapshot {
                    stage,
                    source_name,
                    bytes,
                });
            }
            Vec::new()
        }
        Msg::RefreshSucceeded {
            refresh_id,
            machines,
            debug,
            updated_at,
        } => {
            if state.is_current(refresh_id) {
                state.apply_success(machines, debug, updated_at);
            }
            Vec::new()
        }
        Msg::RefreshFailed {
            refresh_id,
            message,
            debug,
        } => {
            if state.is_current(refresh_id) {
                state.apply_failure(message, debug);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
