use crate::outcome::{expected_value, Choice, Condition};
use crate::participant::{Gender, Participant, SessionTimestamp};
use serde::{Deserialize, Serialize};

/// One row of the session log. Field order is the column order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub timestamp: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub age: String,
    pub gender: Gender,
    pub condition: Condition,
    pub trial: u32,
    pub choice: Choice,
    pub reward: i32,
    pub cum_reward: i32,
}

impl TrialRecord {
    pub fn new(
        timestamp: &SessionTimestamp,
        participant: &Participant,
        condition: Condition,
        trial: u32,
        choice: Choice,
        reward: i32,
        cum_reward: i32,
    ) -> Self {
        Self {
            timestamp: timestamp.as_str().to_string(),
            id: participant.id.clone(),
            age: participant.age.clone(),
            gender: participant.gender.clone(),
            condition,
            trial,
            choice,
            reward,
            cum_reward,
        }
    }
}

/// Append-only, insertion-ordered trial history for one session.
#[derive(Debug, Clone, Default)]
pub struct TrialLog {
    records: Vec<TrialRecord>,
}

impl TrialLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            records: Vec::with_capacity(n),
        }
    }

    pub fn append(&mut self, record: TrialRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn block(&self, condition: Condition) -> impl Iterator<Item = &TrialRecord> + '_ {
        self.records.iter().filter(move |r| r.condition == condition)
    }

    /// Tally for one block; `None` if the block has not started.
    pub fn summary(&self, condition: Condition) -> Option<BlockSummary> {
        let mut summary = BlockSummary::new(condition);
        for r in self.block(condition) {
            summary.record_trial(r.choice, r.reward);
        }
        (summary.trials > 0).then_some(summary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub condition: Condition,
    pub trials: u32,
    pub left: u32,
    pub right: u32,
    pub total: i32,
}

impl BlockSummary {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            trials: 0,
            left: 0,
            right: 0,
            total: 0,
        }
    }

    pub fn record_trial(&mut self, choice: Choice, reward: i32) {
        match choice {
            Choice::Left => self.left += 1,
            Choice::Right => self.right += 1,
        }
        self.trials += 1;
        self.total += reward;
    }

    pub fn left_rate(&self) -> f32 {
        if self.trials == 0 {
            0.5
        } else {
            self.left as f32 / self.trials as f32
        }
    }

    /// Score the same choices would earn on average.
    pub fn expected_total(&self) -> f64 {
        self.left as f64 * expected_value(self.condition, Choice::Left)
            + self.right as f64 * expected_value(self.condition, Choice::Right)
    }
}
