//! Slot machine session on the terminal.
//!
//! The operator fills in the participant fields, then hands the keyboard to
//! the participant for two blocks of trials. The log lands in the configured
//! output directory (the working directory by default).
//!
//! Config location:
//! - Linux: ~/.config/slotlab/config.json
//! - Windows: %APPDATA%\slotlab\config.json
//! - MacOS: ~/Library/Application Support/slotlab/config.json
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` for phase transitions.

use slotlab::config::SessionConfig;
use slotlab::error::SessionError;
use slotlab::participant::SessionTimestamp;
use slotlab::session::{collect_participant, SessionOutcome, SessionRunner};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod paths;
mod terminal;

use paths::AppPaths;
use terminal::{TerminalIntake, TerminalPresenter};

fn run() -> Result<SessionOutcome, SessionError> {
    let paths = AppPaths::new().map_err(SessionError::Config)?;
    let config = SessionConfig::load(&paths.config_file())?;

    // Each surface takes the stdin lock in turn; intake is done before the
    // participant gets the keyboard.
    let participant = {
        let mut intake = TerminalIntake::new(io::stdin().lock(), io::stderr());
        match collect_participant(&mut intake, &config.gender_choices)? {
            Some(p) => p,
            None => return Ok(SessionOutcome::Cancelled),
        }
    };

    let presenter = TerminalPresenter::new(io::stdin().lock(), io::stdout(), &config.continue_key);
    let mut runner = SessionRunner::new(config, presenter)?;
    runner
        .run_with(participant, SessionTimestamp::now())
        .map(SessionOutcome::Completed)
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(SessionOutcome::Completed(report)) => {
            info!("Session complete: {}", report.log_path.display());
            eprintln!("Log written to {}", report.log_path.display());
            ExitCode::SUCCESS
        }
        Ok(SessionOutcome::Cancelled) => {
            eprintln!("Cancelled; no log written.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Session aborted: {}", e);
            eprintln!("slotlab: session aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
