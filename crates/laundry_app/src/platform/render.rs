use std::fmt::Write as _;

use laundry_core::{AppViewModel, MachineCardView, Phase};
use serde::Serialize;

/// One piece of output. Progress is transient and goes to stderr; reports go to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Progress(String),
    Report(String),
}

/// Turns view models into terminal output, suppressing repeats.
pub struct Renderer {
    json: bool,
    last_progress: Option<String>,
    last_report: Option<String>,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            last_progress: None,
            last_report: None,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> Option<Frame> {
        match view.phase {
            Phase::Idle => None,
            Phase::Loading => {
                self.last_report = None;
                if self.json {
                    return None;
                }
                let line = view.progress_line.clone()?;
                if self.last_progress.as_ref() == Some(&line) {
                    return None;
                }
                self.last_progress = Some(line.clone());
                Some(Frame::Progress(line))
            }
            Phase::Loaded | Phase::Failed => {
                self.last_progress = None;
                let report = if self.json {
                    json_report(view)
                } else {
                    text_report(view)
                };
                if self.last_report.as_ref() == Some(&report) {
                    return None;
                }
                self.last_report = Some(report.clone());
                Some(Frame::Report(report))
            }
        }
    }
}

fn text_report(view: &AppViewModel) -> String {
    let mut out = String::new();
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Check Failed");
        let _ = writeln!(out, "{error}");
        let _ = writeln!(out, "Open Official Site: {}", view.source_url);
    } else {
        let _ = write!(out, "Live Status");
        if let Some(updated) = &view.last_updated {
            let _ = write!(out, "  (Updated: {updated})");
        }
        let _ = writeln!(out, "  {}/{} available", view.available_count, view.cards.len());
        for card in &view.cards {
            let _ = writeln!(out, "{}", card_line(card));
        }
        let _ = writeln!(out, "Source: {}", view.source_url);
    }
    if let Some(debug) = &view.debug {
        let _ = writeln!(out, "\nDebug Info:\n{debug}");
    }
    out
}

fn card_line(card: &MachineCardView) -> String {
    let marker = if card.available {
        '●'
    } else if card.is_error {
        '×'
    } else {
        '○'
    };
    let capacity = card
        .capacity
        .as_deref()
        .map(|c| format!(" {c}"))
        .unwrap_or_default();
    format!(
        "{marker} #{:<3} {}{}  {}  [{}]",
        card.id,
        card.type_label,
        capacity,
        card.status_line,
        card.icon.as_str()
    )
}

#[derive(Serialize)]
struct JsonMachine<'a> {
    id: &'a str,
    kind: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacity: Option<&'a str>,
    label: &'a str,
    status_line: &'a str,
    icon: &'static str,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    language: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<&'a str>,
    available: usize,
    machines: Vec<JsonMachine<'a>>,
    source_url: &'a str,
}

fn json_report(view: &AppViewModel) -> String {
    let report = JsonReport {
        language: view.language_code,
        updated_at: view.last_updated.as_deref(),
        error: view.error.as_deref(),
        debug: view.debug.as_deref(),
        available: view.available_count,
        machines: view
            .cards
            .iter()
            .map(|card| JsonMachine {
                id: &card.id,
                kind: card.kind.as_str(),
                status: card.status.as_str(),
                remaining_minutes: card.remaining_minutes,
                capacity: card.capacity.as_deref(),
                label: &card.type_label,
                status_line: &card.status_line,
                icon: card.icon.as_str(),
            })
            .collect(),
        source_url: &view.source_url,
    };
    // Plain structs of strings and integers always serialize.
    serde_json::to_string_pretty(&report).unwrap_or_default()
}
