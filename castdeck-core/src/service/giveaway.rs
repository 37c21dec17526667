//! Giveaway manager
//!
//! A giveaway collects named entrants while active. Drawing a winner is a
//! one-way transition: the winner is recorded, the giveaway is closed and
//! every later draw fails with [`Error::InvalidState`].

use std::sync::Arc;

use rand::RngExt;
use tracing::info;

use crate::{
    models::{Giveaway, GiveawayId},
    validation::{TextValidator, LABEL_MAX},
    Error, Result,
};

/// Source of randomness for winner draws
pub trait WinnerPicker: Send + Sync + std::fmt::Debug {
    /// Returns an index in `0..len`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
}

/// Uniform draw from the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl WinnerPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Always draws the same position, clamped to the pool; used for replays
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl WinnerPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

#[derive(Debug, Clone)]
pub struct GiveawayManager {
    giveaways: Vec<Giveaway>,
    picker: Arc<dyn WinnerPicker>,
}

impl GiveawayManager {
    #[must_use]
    pub fn new(picker: Arc<dyn WinnerPicker>) -> Self {
        Self {
            giveaways: Vec::new(),
            picker,
        }
    }

    pub fn create_giveaway(&mut self, title: &str, prize: &str) -> Result<Giveaway> {
        let title = TextValidator::new("giveaway title")
            .with_max_length(LABEL_MAX)
            .validate(title)?;
        let prize = TextValidator::new("prize")
            .with_max_length(LABEL_MAX)
            .validate(prize)?;

        let giveaway = Giveaway::new(title, prize);
        self.giveaways.push(giveaway.clone());

        info!(giveaway_id = %giveaway.id, title = %giveaway.title, "Giveaway created");
        Ok(giveaway)
    }

    /// Add an entrant to an open giveaway
    pub fn enter(&mut self, giveaway_id: &GiveawayId, participant: &str) -> Result<Giveaway> {
        let participant = TextValidator::new("participant")
            .with_max_length(LABEL_MAX)
            .validate(participant)?;
        let giveaway = self.get_mut(giveaway_id)?;

        if !giveaway.is_open() {
            return Err(Error::InvalidState(format!(
                "Giveaway {giveaway_id} is closed"
            )));
        }
        if giveaway.participants.contains(&participant) {
            return Err(Error::DuplicateEntry(format!(
                "{participant} already entered giveaway {giveaway_id}"
            )));
        }

        giveaway.participants.push(participant);
        giveaway.participant_count = giveaway.participants.len();

        info!(
            giveaway_id = %giveaway.id,
            participant_count = giveaway.participant_count,
            "Giveaway entry added"
        );
        Ok(giveaway.clone())
    }

    pub fn select_winner(&mut self, giveaway_id: &GiveawayId) -> Result<Giveaway> {
        let picker = Arc::clone(&self.picker);
        let giveaway = self.get_mut(giveaway_id)?;

        if let Some(winner) = &giveaway.winner {
            return Err(Error::InvalidState(format!(
                "Giveaway {giveaway_id} already has a winner: {winner}"
            )));
        }
        if !giveaway.active {
            return Err(Error::InvalidState(format!(
                "Giveaway {giveaway_id} is not active"
            )));
        }
        if giveaway.participants.is_empty() {
            return Err(Error::NoParticipants(format!(
                "Giveaway {giveaway_id} has no participants"
            )));
        }

        let index = picker.pick(giveaway.participants.len());
        let winner = giveaway
            .participants
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("Winner index {index} out of range")))?;

        giveaway.winner = Some(winner);
        giveaway.active = false;

        info!(
            giveaway_id = %giveaway.id,
            winner = ?giveaway.winner,
            participant_count = giveaway.participant_count,
            "Giveaway winner selected"
        );
        Ok(giveaway.clone())
    }

    pub fn delete_giveaway(&mut self, giveaway_id: &GiveawayId) -> Result<Giveaway> {
        let index = self
            .giveaways
            .iter()
            .position(|g| &g.id == giveaway_id)
            .ok_or_else(|| Error::NotFound(format!("Giveaway {giveaway_id} not found")))?;

        let removed = self.giveaways.remove(index);
        info!(giveaway_id = %removed.id, "Giveaway deleted");
        Ok(removed)
    }

    pub fn get(&self, giveaway_id: &GiveawayId) -> Option<&Giveaway> {
        self.giveaways.iter().find(|g| &g.id == giveaway_id)
    }

    fn get_mut(&mut self, giveaway_id: &GiveawayId) -> Result<&mut Giveaway> {
        self.giveaways
            .iter_mut()
            .find(|g| &g.id == giveaway_id)
            .ok_or_else(|| Error::NotFound(format!("Giveaway {giveaway_id} not found")))
    }

    pub fn giveaways(&self) -> &[Giveaway] {
        &self.giveaways
    }
}
