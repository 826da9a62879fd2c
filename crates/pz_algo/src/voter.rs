//! Per-vote mutable allocation state.
//!
//! A `VoterAllocation` starts on the voter's priority-1 choice and only ever
//! moves forward through the ranked list, ending either on a choice or in
//! the terminal "unallocated" state.

use pz_core::{PizzaOptionId, RankedChoice, VoteRecord, VoterId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoterAllocation {
    pub voter_id: VoterId,
    pub voter_name: String,
    pub slice_count: u32,
    /// Choices sorted by ascending priority.
    choices: Vec<RankedChoice>,
    /// Index into `choices`; `None` once unallocated.
    cursor: Option<usize>,
}

impl VoterAllocation {
    pub fn from_vote(vote: &VoteRecord) -> Self {
        let mut choices = vote.choices.clone();
        choices.sort_by_key(|c| c.priority);
        let cursor = if choices.is_empty() { None } else { Some(0) };
        Self {
            voter_id: vote.voter_id.clone(),
            voter_name: vote.voter_name.clone(),
            slice_count: vote.slice_count,
            choices,
            cursor,
        }
    }

    pub fn allocated_to(&self) -> Option<&PizzaOptionId> {
        self.cursor.map(|i| &self.choices[i].pizza_option_id)
    }

    pub fn current_priority(&self) -> Option<u8> {
        self.cursor.map(|i| self.choices[i].priority)
    }

    pub fn is_allocated(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn choices(&self) -> &[RankedChoice] {
        &self.choices
    }

    /// Move to the choice with the smallest priority greater than the current
    /// one, or to unallocated if none remains. Returns the new target.
    pub fn advance(&mut self) -> Option<&PizzaOptionId> {
        let Some(i) = self.cursor else {
            return None;
        };
        let current = self.choices[i].priority;
        self.cursor = self.choices[i + 1..]
            .iter()
            .position(|c| c.priority > current)
            .map(|off| i + 1 + off);
        self.allocated_to()
    }
}
