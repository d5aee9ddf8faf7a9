use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use tmenu::app::{App, Outcome};
use tmenu::config::ConfigResolver;
use tmenu::event::{EventHandler, interrupt_flag};
use tmenu::{exec, logging};

#[derive(Parser)]
#[command(name = "tmenu", version, about = "Terminal menu and application launcher")]
struct Cli {
    #[arg(short, long, help = "Path to the config file")]
    config: Option<PathBuf>,
}

/// Owns the terminal while the menu is on screen. Dropping it restores the
/// terminal, on every exit path.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let terminal = set_up(&mut io::stdout(), || {
            Terminal::new(CrosstermBackend::new(io::stdout())).context("creating the terminal")
        })?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore(self.terminal.backend_mut());
    }
}

/// Switch `out` to the menu screen, then run `build`. A failure in either step
/// undoes the switch and raw mode before the error is returned.
fn set_up<W: Write, T>(out: &mut W, build: impl FnOnce() -> Result<T>) -> Result<T> {
    let result = execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)
        .context("entering the alternate screen")
        .and_then(|()| build());
    if result.is_err() {
        restore(out);
    }
    result
}

fn restore<W: Write>(out: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(out, DisableMouseCapture, LeaveAlternateScreen, Show);
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(Some(path)) = logging::init() {
        log::info!("logging to {}", path.display());
    }

    let resolver = ConfigResolver::from_env();
    let menu = resolver.resolve(cli.config.as_deref());
    if menu.catalog.is_empty() {
        let expected = cli
            .config
            .clone()
            .or_else(|| resolver.paths().default_config_file());
        match expected {
            Some(path) => eprintln!("Error: no menu items found in {}", path.display()),
            None => eprintln!("Error: no menu items found (no config directory)"),
        }
        return ExitCode::from(1);
    }

    let outcome = match run(&menu, &resolver) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("Error: {err:?}");
            return ExitCode::from(1);
        }
    };

    match outcome {
        Outcome::Execute(command) => {
            let err = exec::replace_process(&command);
            log::error!("{err}");
            eprintln!("tmenu: {err}");
            ExitCode::from(err.exit_code())
        }
        other => ExitCode::from(other.exit_code().unwrap_or(1)),
    }
}

/// Show the menu until it yields an outcome. The terminal is restored before
/// this returns, so a command can take over a clean screen.
fn run(menu: &tmenu::config::ResolvedMenu, resolver: &ConfigResolver) -> Result<Outcome> {
    let interrupted = interrupt_flag().unwrap_or_else(|err| {
        log::warn!("signals not handled: {err}");
        Arc::new(AtomicBool::new(false))
    });
    let events = EventHandler::new(interrupted, Duration::from_millis(100));
    let mut guard = TerminalGuard::enter()?;
    let mut app = App::new(menu, resolver.paths());

    loop {
        guard
            .terminal
            .draw(|frame| {
                let area = frame.area();
                app.render(area, frame.buffer_mut());
            })?;

        let event = events.next()?;
        if let Some(outcome) = app.handle_event(event, Instant::now()) {
            log::debug!("session ended: {outcome:?}");
            return Ok(outcome);
        }
    }
}
