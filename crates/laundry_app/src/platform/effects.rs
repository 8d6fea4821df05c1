use std::time::Duration;

use chrono::Local;
use engine_logging::{engine_info, engine_warn};
use laundry_core::{Effect, Machine, MachineKind, MachineStatus, Msg, Stage};
use laundry_engine::{EngineEvent, EngineHandle, MachineRecord};

/// Executes core effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartRefresh { refresh_id } => {
                    engine_info!("StartRefresh refresh_id={}", refresh_id);
                    self.engine.refresh(refresh_id);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(engine_event_to_msg)
    }
}

fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::RefreshProgress {
            refresh_id: progress.refresh_id,
            stage: map_stage(progress.stage),
            source_name: progress.source_name,
            bytes: progress.bytes,
        },
        EngineEvent::RefreshCompleted { refresh_id, result } => match result {
            Ok(report) => Msg::RefreshSucceeded {
                refresh_id,
                debug: report.debug_summary(),
                machines: report.machines.into_iter().map(map_machine).collect(),
                updated_at: Local::now().format("%H:%M:%S").to_string(),
            },
            Err(err) => {
                engine_warn!("Refresh {} failed: {}", refresh_id, err);
                Msg::RefreshFailed {
                    refresh_id,
                    message: err.to_string(),
                    debug: err.debug_trail(),
                }
            }
        },
    }
}

fn map_stage(stage: laundry_engine::Stage) -> Stage {
    match stage {
        laundry_engine::Stage::Connecting => Stage::Connecting,
        laundry_engine::Stage::Downloading => Stage::Downloading,
        laundry_engine::Stage::Parsing => Stage::Parsing,
        laundry_engine::Stage::Done => Stage::Done,
    }
}

fn map_machine(record: MachineRecord) -> Machine {
    Machine {
        id: record.id,
        kind: match record.kind {
            laundry_engine::MachineKind::Washer => MachineKind::Washer,
            laundry_engine::MachineKind::Dryer => MachineKind::Dryer,
            laundry_engine::MachineKind::WasherDryer => MachineKind::WasherDryer,
            laundry_engine::MachineKind::SneakerWasher => MachineKind::SneakerWasher,
            laundry_engine::MachineKind::SneakerDryer => MachineKind::SneakerDryer,
        },
        status: match record.status {
            laundry_engine::MachineStatus::Available => MachineStatus::Available,
            laundry_engine::MachineStatus::InUse => MachineStatus::InUse,
            laundry_engine::MachineStatus::Finished => MachineStatus::Finished,
            laundry_engine::MachineStatus::Error => MachineStatus::Error,
        },
        remaining_minutes: record.remaining_minutes,
        capacity: record.capacity,
    }
}

#[cfg(test)]
mod tests {
    use laundry_engine::{RefreshProgress, StatusError, StatusReport};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn progress_maps_stage_and_source() {
        let msg = engine_event_to_msg(EngineEvent::Progress(RefreshProgress {
            refresh_id: 3,
            stage: laundry_engine::Stage::Downloading,
            source_name: None,
            bytes: Some(512),
        }));
        assert_eq!(
            msg,
            Msg::RefreshProgress {
                refresh_id: 3,
                stage: Stage::Downloading,
                source_name: None,
                bytes: Some(512),
            }
        );
    }

    #[test]
    fn report_becomes_success_with_debug_summary() {
        let report = StatusReport {
            machines: vec![MachineRecord {
                id: "2".to_string(),
                kind: laundry_engine::MachineKind::SneakerDryer,
                status: laundry_engine::MachineStatus::InUse,
                remaining_minutes: Some(9),
                capacity: Some("8kg".to_string()),
            }],
            source_name: "CodeTabs".to_string(),
            char_len: 1200,
            title: None,
            attempts: Vec::new(),
        };
        let msg = engine_event_to_msg(EngineEvent::RefreshCompleted {
            refresh_id: 4,
            result: Ok(report),
        });

        let (refresh_id, machines, debug, updated_at) = match msg {
            Msg::RefreshSucceeded {
                refresh_id,
                machines,
                debug,
                updated_at,
            } => (refresh_id, machines, debug, updated_at),
            other => panic!("unexpected message {other:?}"),
        };
        assert_eq!(refresh_id, 4);
        assert_eq!(debug, "Fetched via CodeTabs. Length: 1200 chars. Title: No Title");
        assert_eq!(updated_at.len(), 8);
        assert_eq!(
            machines,
            vec![Machine {
                id: "2".to_string(),
                kind: MachineKind::SneakerDryer,
                status: MachineStatus::InUse,
                remaining_minutes: Some(9),
                capacity: Some("8kg".to_string()),
            }]
        );
    }

    #[test]
    fn error_becomes_failure_with_message() {
        let msg = engine_event_to_msg(EngineEvent::RefreshCompleted {
            refresh_id: 5,
            result: Err(StatusError::AllSourcesFailed {
                attempts: Vec::new(),
            }),
        });
        assert_eq!(
            msg,
            Msg::RefreshFailed {
                refresh_id: 5,
                message: "All sources failed to access the site. The site might be blocking access."
                    .to_string(),
                debug: String::new(),
            }
        );
    }
}
