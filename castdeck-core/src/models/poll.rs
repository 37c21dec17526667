use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OptionId, PollId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: OptionId,
    pub text: String,
    pub votes: u64,
}

/// Live poll. `total_votes` always equals the sum of option votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<PollOption>,
    pub active: bool,
    pub total_votes: u64,
    pub created_at: DateTime<Utc>,
}

impl Poll {
    pub fn new(question: String, option_texts: Vec<String>) -> Self {
        let options = option_texts
            .into_iter()
            .map(|text| PollOption {
                id: OptionId::new(),
                text,
                votes: 0,
            })
            .collect();

        Self {
            id: PollId::new(),
            question,
            options,
            active: true,
            total_votes: 0,
            created_at: Utc::now(),
        }
    }

    pub fn option(&self, option_id: &OptionId) -> Option<&PollOption> {
        self.options.iter().find(|o| &o.id == option_id)
    }

    pub(crate) fn recompute_total(&mut self) {
        self.total_votes = self.options.iter().map(|o| o.votes).sum();
    }

    /// Share of the vote for an option, in whole percent
    pub fn percentage(&self, option_id: &OptionId) -> Option<u32> {
        self.option(option_id)
            .map(|o| percentage_of(o.votes, self.total_votes))
    }

    pub fn results(&self) -> PollResults {
        PollResults {
            poll_id: self.id.clone(),
            question: self.question.clone(),
            active: self.active,
            total_votes: self.total_votes,
            options: self
                .options
                .iter()
                .map(|o| OptionResult {
                    option_id: o.id.clone(),
                    text: o.text.clone(),
                    votes: o.votes,
                    percentage: percentage_of(o.votes, self.total_votes),
                })
                .collect(),
        }
    }
}

/// `round(votes / total * 100)` with halves rounded up, 0 when nobody voted
pub fn percentage_of(votes: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = (u128::from(votes) * 200 + u128::from(total)) / (u128::from(total) * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionResult {
    pub option_id: OptionId,
    pub text: String,
    pub votes: u64,
    pub percentage: u32,
}

/// Render-ready poll tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResults {
    pub poll_id: PollId,
    pub question: String,
    pub active: bool,
    pub total_votes: u64,
    pub options: Vec<OptionResult>,
}
