use std::process::ExitCode;

use clap::Parser;

mod platform;

fn main() -> anyhow::Result<ExitCode> {
    platform::run_app(platform::Cli::parse())
}
