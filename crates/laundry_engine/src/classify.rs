use crate::heuristics::PatternSet;
use crate::{MachineKind, MachineRecord, MachineStatus};

/// Builds a record from a winning candidate's rich text. Never fails: every
/// field falls back to a default when no rule matches.
pub fn classify(id: &str, text: &str, patterns: &PatternSet) -> MachineRecord {
    let (status, remaining_minutes) = classify_status(text, patterns);
    MachineRecord {
        id: id.to_string(),
        kind: classify_kind(text, patterns),
        status,
        remaining_minutes,
        capacity: capacity_label(text, patterns),
    }
}

/// First matching rule wins. A countdown outranks every keyword.
pub fn classify_status(text: &str, patterns: &PatternSet) -> (MachineStatus, Option<u32>) {
    if let Some(minutes) = patterns
        .duration
        .captures(text)
        .and_then(|caps| caps.get(1))
    {
        // Only overflow can fail here; clamp instead of dropping the countdown.
        let minutes = minutes.as_str().parse().unwrap_or(u32::MAX);
        return (MachineStatus::InUse, Some(minutes));
    }

    let status = if patterns.available.is_match(text) {
        MachineStatus::Available
    } else if patterns.in_use.is_match(text) {
        MachineStatus::InUse
    } else if patterns.finished.is_match(text) {
        MachineStatus::Finished
    } else if patterns.error.is_match(text) {
        MachineStatus::Error
    } else {
        // Idle machines are rendered with the least markup.
        MachineStatus::Available
    };
    (status, None)
}

pub fn classify_kind(text: &str, patterns: &PatternSet) -> MachineKind {
    let drying = patterns.drying.is_match(text);
    if patterns.washer_dryer.is_match(text) {
        MachineKind::WasherDryer
    } else if patterns.sneaker.is_match(text) {
        if drying {
            MachineKind::SneakerDryer
        } else {
            MachineKind::SneakerWasher
        }
    } else if drying {
        MachineKind::Dryer
    } else {
        // `washing` matches and the fallback agree.
        MachineKind::Washer
    }
}

pub fn capacity_label(text: &str, patterns: &PatternSet) -> Option<String> {
    patterns
        .capacity
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
