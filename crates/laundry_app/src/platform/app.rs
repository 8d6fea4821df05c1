use std::io::{self, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use engine_logging::{engine_debug, engine_info};
use laundry_core::{detect_language, update, AppState, Language, Msg, Phase};
use laundry_engine::EngineHandle;
use log::LevelFilter;

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::render::{Frame, Renderer};

/// Upper bound on how long the loop blocks waiting for engine events.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let level = if cli.debug {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    logging::initialize(cli.log.into(), level);

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = &cli.url {
        config.target_url = url.clone();
    }
    config.validate()?;

    let language = resolve_language(cli.lang.as_deref().or(config.language.as_deref()));
    engine_info!(
        "Checking {} (language {}, watch {:?})",
        config.target_url,
        language.code,
        cli.watch
    );

    let runner = EffectRunner::new(EngineHandle::new(config.engine_config()));
    let mut app = App {
        state: AppState::new(config.target_url.clone()).with_language(language),
        runner,
        renderer: Renderer::new(cli.json),
    };

    if cli.debug {
        app.dispatch(Msg::ToggleDebug)?;
    }
    app.dispatch(Msg::RefreshClicked)?;

    let watch = cli.watch.map(Duration::from_secs);
    let mut next_refresh: Option<Instant> = None;
    loop {
        let msg = app.runner.next_msg(TICK).unwrap_or(Msg::Tick);
        app.dispatch(msg)?;

        if app.state.phase() == Phase::Loading {
            continue;
        }
        let Some(interval) = watch else {
            break;
        };
        let due = *next_refresh.get_or_insert_with(|| Instant::now() + interval);
        if Instant::now() >= due {
            next_refresh = None;
            app.dispatch(Msg::RefreshClicked)?;
        }
    }

    Ok(if app.state.phase() == Phase::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Explicit code if known, else the process locale (`LC_ALL`, `LANG`), else English.
fn resolve_language(requested: Option<&str>) -> &'static Language {
    if let Some(code) = requested {
        return detect_language(code);
    }
    let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .unwrap_or_default();
    // `ja_JP.UTF-8` -> `ja_JP`
    let locale = locale.split('.').next().unwrap_or_default();
    detect_language(locale)
}

struct App {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
}

impl App {
    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        if was_dirty {
            let view = self.state.view();
            match self.renderer.render(&view) {
                Some(Frame::Progress(line)) => {
                    engine_debug!("{}", line);
                    let mut err = io::stderr().lock();
                    writeln!(err, "{line}")?;
                }
                Some(Frame::Report(report)) => {
                    let mut out = io::stdout().lock();
                    write!(out, "{report}")?;
                    if !report.ends_with('\n') {
                        writeln!(out)?;
                    }
                    out.flush()?;
                }
                None => {}
            }
        }
        Ok(())
    }
}
