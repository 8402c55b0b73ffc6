use crate::error::SessionError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────
// Two-armed slot machine: the block condition frames both arms as gains or
// losses. In each condition one arm pays a rare large outcome (|4| at 25%),
// the other a frequent small one (|1| at 75%); the rest of the mass is 0.
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Gain,
    Loss,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::Gain, Condition::Loss];

    pub fn label(self) -> &'static str {
        match self {
            Condition::Gain => "gain",
            Condition::Loss => "loss",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gain" => Ok(Condition::Gain),
            "loss" => Ok(Condition::Loss),
            _ => Err(SessionError::InvalidInput {
                what: "condition",
                got: s.to_string(),
                expected: "gain|loss",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Left,
    Right,
}

impl Choice {
    pub fn label(self) -> &'static str {
        match self {
            Choice::Left => "left",
            Choice::Right => "right",
        }
    }

    /// Resolve a key name to an arm. Any other key is not a choice.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "left" => Some(Choice::Left),
            "right" => Some(Choice::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Choice {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Choice::from_key(s).ok_or_else(|| SessionError::InvalidInput {
            what: "choice",
            got: s.to_string(),
            expected: "left|right",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub value: i32,
    pub probability: f64,
}

const fn outcome(value: i32, probability: f64) -> Outcome {
    Outcome { value, probability }
}

/// The fixed reward schedule for one arm under one condition.
pub fn outcome_table(condition: Condition, choice: Choice) -> [Outcome; 2] {
    match (condition, choice) {
        (Condition::Gain, Choice::Left) => [outcome(4, 0.25), outcome(0, 0.75)],
        (Condition::Gain, Choice::Right) => [outcome(1, 0.75), outcome(0, 0.25)],
        (Condition::Loss, Choice::Left) => [outcome(-1, 0.75), outcome(0, 0.25)],
        (Condition::Loss, Choice::Right) => [outcome(-4, 0.25), outcome(0, 0.75)],
    }
}

pub fn expected_value(condition: Condition, choice: Choice) -> f64 {
    outcome_table(condition, choice)
        .iter()
        .map(|o| o.value as f64 * o.probability)
        .sum()
}

/// The session's single random source.
///
/// Draws are independent: nothing but the generator state carries over
/// between calls.
#[derive(Debug, Clone)]
pub struct RewardSampler {
    rng: StdRng,
}

impl RewardSampler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Random block order; each condition appears exactly once.
    pub fn shuffled_conditions(&mut self) -> [Condition; 2] {
        let mut order = Condition::ALL;
        order.shuffle(&mut self.rng);
        order
    }

    pub fn sample_reward(&mut self, condition: Condition, choice: Choice) -> i32 {
        let [first, second] = outcome_table(condition, choice);
        if self.rng.gen_bool(first.probability) {
            first.value
        } else {
            second.value
        }
    }

    /// String-keyed entry point; unknown labels fail instead of defaulting.
    pub fn sample_reward_labeled(
        &mut self,
        condition: &str,
        choice: &str,
    ) -> Result<i32, SessionError> {
        let condition: Condition = condition.parse()?;
        let choice: Choice = choice.parse()?;
        Ok(self.sample_reward(condition, choice))
    }
}
