use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::logging::LogDestination;

/// Where log records are written.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Live machine availability for a self-service laundromat.
#[derive(Parser, Debug)]
#[command(name = "laundry", version)]
pub struct Cli {
    /// Status page to read (overrides the config file)
    #[arg(long)]
    pub url: Option<String>,

    /// Display language code, e.g. `ja` or `zh-TW`
    #[arg(long)]
    pub lang: Option<String>,

    /// Print machines as JSON instead of a text grid
    #[arg(long)]
    pub json: bool,

    /// Keep running and refresh every N seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(5..))]
    pub watch: Option<u64>,

    /// Show per-source retrieval details and verbose logs
    #[arg(long)]
    pub debug: bool,

    /// Log destination
    #[arg(long, value_enum, default_value = "terminal")]
    pub log: LogTarget,

    /// Config file (RON); defaults to ./laundry.ron when present
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_one_shot_text_output() {
        let cli = Cli::try_parse_from(["laundry"]).unwrap();
        assert!(!cli.json);
        assert_eq!(cli.watch, None);
        assert_eq!(cli.log, LogTarget::Terminal);
        assert!(cli.config.is_none());
    }

    #[test]
    fn all_flags_parse() {
        let cli = Cli::try_parse_from([
            "laundry",
            "--url",
            "https://shop.example/1/",
            "--lang",
            "ja",
            "--json",
            "--watch",
            "60",
            "--debug",
            "--log",
            "both",
            "--config",
            "custom.ron",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://shop.example/1/"));
        assert_eq!(cli.lang.as_deref(), Some("ja"));
        assert!(cli.json && cli.debug);
        assert_eq!(cli.watch, Some(60));
        assert_eq!(cli.log, LogTarget::Both);
        assert_eq!(cli.config, Some(PathBuf::from("custom.ron")));
    }

    #[test]
    fn watch_interval_has_a_floor() {
        assert!(Cli::try_parse_from(["laundry", "--watch", "1"]).is_err());
        assert!(Cli::try_parse_from(["laundry", "--log", "syslog"]).is_err());
    }
}
