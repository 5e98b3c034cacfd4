#![expect(clippy::print_stdout, reason = "CLI output is emitted here")]
#![expect(clippy::print_stderr, reason = "CLI output is emitted here")]

//! CLI output presenter.

use clap::ValueEnum;
use serde::Serialize;

use crate::common::Colors;

/// Output format for CLI commands
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Counters gathered over one grid session, reported when it ends.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub command: &'static str,
    pub seed: u64,
    pub mode: String,
    pub rows: usize,
    pub columns: usize,
    pub visible_slots: usize,
    pub ticks: u64,
    pub mutations: u64,
    pub skipped: u64,
    pub renders: u64,
    pub highlights: u64,
    pub binds: u64,
    pub rebinds: u64,
    pub releases: u64,
    pub scrolls: u64,
    pub leaked_observers: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorView {
    pub error: String,
    pub kind: &'static str,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

pub trait Presenter {
    fn present_summary(&self, summary: &SessionSummary);

    fn present_error(&self, error: &ErrorView);
}

pub struct TextPresenter;

impl TextPresenter {
    fn row(label: &str, value: impl std::fmt::Display) {
        println!("  {:<18}{}", Colors::dim(label), value);
    }
}

impl Presenter for TextPresenter {
    fn present_summary(&self, summary: &SessionSummary) {
        let title = match summary.command {
            "simulate" => "Simulation finished",
            _ => "Session finished",
        };
        println!("{}", Colors::bold(title));
        Self::row("seed", summary.seed);
        Self::row("mode", &summary.mode);
        Self::row("grid", format!("{} x {}", summary.rows, summary.columns));
        Self::row("visible slots", summary.visible_slots);
        Self::row("ticks", summary.ticks);
        Self::row("mutations", summary.mutations);
        Self::row("skipped", summary.skipped);
        Self::row("renders", summary.renders);
        Self::row("highlights", summary.highlights);
        Self::row("binds", summary.binds);
        Self::row("rebinds", summary.rebinds);
        Self::row("releases", summary.releases);
        Self::row("scrolls", summary.scrolls);
        let leaked = if summary.leaked_observers == 0 {
            Colors::success("0")
        } else {
            Colors::error(&summary.leaked_observers.to_string())
        };
        Self::row("leaked observers", leaked);
    }

    fn present_error(&self, error: &ErrorView) {
        eprintln!("livegrid: {} {}", Colors::error("Error:"), error.error);
        if let Some(suggestion) = &error.suggestion {
            eprintln!("{} {}", Colors::dim("Suggestion:"), suggestion);
        }
    }
}

pub struct JsonPresenter;

impl JsonPresenter {
    fn print<T: Serialize>(value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("livegrid: failed to encode JSON output: {err}"),
        }
    }
}

impl Presenter for JsonPresenter {
    fn present_summary(&self, summary: &SessionSummary) {
        Self::print(summary);
    }

    fn present_error(&self, error: &ErrorView) {
        Self::print(error);
    }
}

pub fn create_presenter(format: OutputFormat) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Text => Box::new(TextPresenter),
        OutputFormat::Json => Box::new(JsonPresenter),
    }
}
