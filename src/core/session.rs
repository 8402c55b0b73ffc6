//! Session runner: intake, instructions, two blocks of trials, log flush.
//!
//! The runner owns the session's random source and drives the surfaces.
//! Block-local score lives in the block loop and starts at zero for every
//! block; the only state that spans blocks is the append-only [`TrialLog`].

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::messages;
use crate::outcome::{Choice, Condition, RewardSampler};
use crate::participant::{IntakeForm, Participant, SessionTimestamp};
use crate::persistence;
use crate::surface::{IntakePrompt, Presenter};
use crate::trial_log::{BlockSummary, TrialLog, TrialRecord};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Instructions,
    Block { index: usize, condition: Condition },
    Trial { condition: Condition, trial: u32 },
    Feedback { condition: Condition, trial: u32 },
    BlockTransition,
    Done,
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub participant: Participant,
    pub timestamp: SessionTimestamp,
    pub order: [Condition; 2],
    pub log: TrialLog,
    pub log_path: PathBuf,
    pub summaries: Vec<BlockSummary>,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum SessionOutcome {
    Completed(SessionReport),
    /// Operator cancelled intake; nothing ran and nothing was written.
    Cancelled,
}

pub struct SessionRunner<P> {
    config: SessionConfig,
    presenter: P,
    sampler: RewardSampler,
    phase: Phase,
}

impl<P: Presenter> SessionRunner<P> {
    pub fn new(config: SessionConfig, presenter: P) -> Result<Self, SessionError> {
        let sampler = RewardSampler::new(config.seed);
        Self::with_sampler(config, presenter, sampler)
    }

    pub fn with_sampler(
        config: SessionConfig,
        presenter: P,
        sampler: RewardSampler,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            config,
            presenter,
            sampler,
            phase: Phase::Init,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    fn enter(&mut self, phase: Phase) {
        debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Full session: intake, then [`run_with`](Self::run_with).
    pub fn run<I: IntakePrompt + ?Sized>(
        &mut self,
        intake: &mut I,
    ) -> Result<SessionOutcome, SessionError> {
        self.enter(Phase::Init);
        let Some(participant) = collect_participant(intake, &self.config.gender_choices)? else {
            return Ok(SessionOutcome::Cancelled);
        };
        self.run_with(participant, SessionTimestamp::now())
            .map(SessionOutcome::Completed)
    }

    /// Everything after intake.
    pub fn run_with(
        &mut self,
        participant: Participant,
        timestamp: SessionTimestamp,
    ) -> Result<SessionReport, SessionError> {
        let order = self.sampler.shuffled_conditions();
        info!("Session {}: {} then {}", timestamp, order[0], order[1]);

        self.enter(Phase::Instructions);
        let text = messages::instructions(self.config.trials_per_block, &self.config.continue_key);
        self.show_message(&text)?;

        let mut log = TrialLog::with_capacity(order.len() * self.config.trials_per_block as usize);
        for (index, &condition) in order.iter().enumerate() {
            self.enter(Phase::Block { index, condition });
            let score = self.run_block(condition, &participant, &timestamp, &mut log)?;
            info!("Block {} ({}) finished, score {}", index + 1, condition, score);

            if index == 0 {
                self.enter(Phase::BlockTransition);
                self.show_message(messages::INTERMEDIARY)?;
            }
        }

        self.enter(Phase::Done);
        let log_path =
            persistence::save_log(&log, &self.config.output_dir, &participant.id, &timestamp)?;
        self.show_message(messages::GOODBYE)?;

        let summaries: Vec<BlockSummary> = order.iter().filter_map(|&c| log.summary(c)).collect();
        for s in &summaries {
            info!(
                "{}: {} trials, left {} / right {} ({:.0}% left), total {} (expected {:.1})",
                s.condition,
                s.trials,
                s.left,
                s.right,
                s.left_rate() * 100.0,
                s.total,
                s.expected_total()
            );
        }

        Ok(SessionReport {
            participant,
            timestamp,
            order,
            log,
            log_path,
            summaries,
        })
    }

    /// Run one block and return its final score.
    fn run_block(
        &mut self,
        condition: Condition,
        participant: &Participant,
        timestamp: &SessionTimestamp,
        log: &mut TrialLog,
    ) -> Result<i32, SessionError> {
        let mut score = 0;
        for trial in 0..self.config.trials_per_block {
            self.enter(Phase::Trial { condition, trial });
            self.presenter.show_image(&self.config.image)?;
            let choice = self.await_choice()?;

            let reward = self.sampler.sample_reward(condition, choice);
            score += reward;
            log.append(TrialRecord::new(
                timestamp,
                participant,
                condition,
                trial,
                choice,
                reward,
                score,
            ));

            self.enter(Phase::Feedback { condition, trial });
            self.show_message(&messages::feedback(reward, score))?;
        }
        Ok(score)
    }

    /// Block until `left` or `right`; every other key is dropped.
    pub fn await_choice(&mut self) -> Result<Choice, SessionError> {
        loop {
            let key = self.presenter.next_key()?;
            match Choice::from_key(&key) {
                Some(choice) => return Ok(choice),
                None => debug!("Ignoring key {:?} while waiting for a choice", key),
            }
        }
    }

    /// Show `text` and block until the continue key.
    pub fn show_message(&mut self, text: &str) -> Result<(), SessionError> {
        self.presenter.show_text(text)?;
        loop {
            let key = self.presenter.next_key()?;
            if key == self.config.continue_key {
                return Ok(());
            }
            debug!("Ignoring key {:?} on message screen", key);
        }
    }
}

/// Ask the operator for the participant fields. `Ok(None)` if cancelled.
pub fn collect_participant<I: IntakePrompt + ?Sized>(
    intake: &mut I,
    gender_choices: &[String],
) -> Result<Option<Participant>, SessionError> {
    let form = IntakeForm::participant(gender_choices);
    let Some(answers) = intake.prompt_fields(&form)? else {
        info!("Intake cancelled; ending session without a log");
        return Ok(None);
    };
    let participant = Participant::from_answers(&answers)?;
    info!(
        "Participant {:?} (age {:?}, gender {})",
        participant.id, participant.age, participant.gender
    );
    Ok(Some(participant))
}

/// Convenience wrapper: build a runner from `config` and run one session.
pub fn run_session<P, I>(
    config: SessionConfig,
    presenter: P,
    intake: &mut I,
) -> Result<SessionOutcome, SessionError>
where
    P: Presenter,
    I: IntakePrompt + ?Sized,
{
    SessionRunner::new(config, presenter)?.run(intake)
}
