//! # slotlab
//!
//! A two-armed slot machine task for a single participant: two blocks of
//! trials (one framed as gains, one as losses, in random order), rewards
//! drawn from a fixed probability table, and a CSV log written once at the
//! end of the session.
//!
//! Presentation is left to the caller through the [`surface`] traits; this
//! crate owns sequencing, sampling, scoring and persistence.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slotlab::prelude::*;
//!
//! fn run<P: Presenter, I: IntakePrompt>(presenter: P, intake: &mut I) -> Result<(), SessionError> {
//!     let cfg = SessionConfig::default().with_seed(42);
//!     match run_session(cfg, presenter, intake)? {
//!         SessionOutcome::Completed(report) => println!("log: {}", report.log_path.display()),
//!         SessionOutcome::Cancelled => println!("cancelled"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`outcome`]: reward table and the seeded sampler
//! - [`trial_log`]: per-trial records and block summaries
//! - [`session`]: the session state machine
//! - [`persistence`]: CSV write/read of a session log

#[path = "core/error.rs"]
pub mod error;

#[path = "core/outcome.rs"]
pub mod outcome;

#[path = "core/participant.rs"]
pub mod participant;

#[path = "core/trial_log.rs"]
pub mod trial_log;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/messages.rs"]
pub mod messages;

#[path = "core/surface.rs"]
pub mod surface;

#[path = "core/persistence.rs"]
pub mod persistence;

#[path = "core/session.rs"]
pub mod session;

/// Prelude module for convenient imports.
///
/// ```
/// use slotlab::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SessionConfig;
    pub use crate::error::{SessionError, SurfaceError};
    pub use crate::outcome::{outcome_table, Choice, Condition, Outcome, RewardSampler};
    pub use crate::participant::{Gender, IntakeForm, Participant, SessionTimestamp};
    pub use crate::session::{run_session, Phase, SessionOutcome, SessionReport, SessionRunner};
    pub use crate::surface::{IntakePrompt, Presenter};
    pub use crate::trial_log::{BlockSummary, TrialLog, TrialRecord};
}
