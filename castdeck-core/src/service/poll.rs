//! Poll manager
//!
//! Polls carry two to four options. Vote counts only ever grow by one and
//! the poll's total is recomputed from its options after every vote, so
//! `total_votes` always equals the sum of option votes.

use tracing::info;

use crate::{
    models::{OptionId, Poll, PollId, PollResults},
    validation::{validate_option_count, TextValidator, LABEL_MAX},
    Error, Result,
};

#[derive(Debug, Clone)]
pub struct PollManager {
    polls: Vec<Poll>,
    max_question_length: usize,
}

impl PollManager {
    #[must_use]
    pub const fn new(max_question_length: usize) -> Self {
        Self {
            polls: Vec::new(),
            max_question_length,
        }
    }

    pub fn create_poll(&mut self, question: &str, options: &[String]) -> Result<Poll> {
        let question = TextValidator::new("poll question")
            .with_max_length(self.max_question_length)
            .validate(question)?;
        validate_option_count(options.len())?;

        let option_validator = TextValidator::new("poll option").with_max_length(LABEL_MAX);
        let options = options
            .iter()
            .map(|text| option_validator.validate(text))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let poll = Poll::new(question, options);
        self.polls.push(poll.clone());

        info!(
            poll_id = %poll.id,
            options = poll.options.len(),
            "Poll created"
        );
        Ok(poll)
    }

    pub fn vote(&mut self, poll_id: &PollId, option_id: &OptionId) -> Result<Poll> {
        let poll = self.get_mut(poll_id)?;
        let option = poll
            .options
            .iter_mut()
            .find(|o| &o.id == option_id)
            .ok_or_else(|| {
                Error::NotFound(format!("Option {option_id} not found in poll {poll_id}"))
            })?;

        option.votes += 1;
        poll.recompute_total();

        info!(
            poll_id = %poll.id,
            option_id = %option_id,
            total_votes = poll.total_votes,
            "Vote recorded"
        );
        Ok(poll.clone())
    }

    /// Share of the vote for one option, 0 when nobody has voted
    pub fn percentage(&self, poll_id: &PollId, option_id: &OptionId) -> Result<u32> {
        self.get(poll_id)?.percentage(option_id).ok_or_else(|| {
            Error::NotFound(format!("Option {option_id} not found in poll {poll_id}"))
        })
    }

    pub fn results(&self, poll_id: &PollId) -> Result<PollResults> {
        Ok(self.get(poll_id)?.results())
    }

    /// Open or close one poll; other polls are unaffected
    pub fn set_active(&mut self, poll_id: &PollId, active: bool) -> Result<Poll> {
        let poll = self.get_mut(poll_id)?;
        poll.active = active;

        info!(poll_id = %poll.id, active, "Poll activity changed");
        Ok(poll.clone())
    }

    pub fn delete_poll(&mut self, poll_id: &PollId) -> Result<Poll> {
        let index = self
            .polls
            .iter()
            .position(|p| &p.id == poll_id)
            .ok_or_else(|| Error::NotFound(format!("Poll {poll_id} not found")))?;

        let removed = self.polls.remove(index);
        info!(poll_id = %removed.id, "Poll deleted");
        Ok(removed)
    }

    pub fn get(&self, poll_id: &PollId) -> Result<&Poll> {
        self.polls
            .iter()
            .find(|p| &p.id == poll_id)
            .ok_or_else(|| Error::NotFound(format!("Poll {poll_id} not found")))
    }

    fn get_mut(&mut self, poll_id: &PollId) -> Result<&mut Poll> {
        self.polls
            .iter_mut()
            .find(|p| &p.id == poll_id)
            .ok_or_else(|| Error::NotFound(format!("Poll {poll_id} not found")))
    }

    /// Polls in creation order
    pub fn polls(&self) -> &[Poll] {
        &self.polls
    }
}
