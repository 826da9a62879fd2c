//! Input entities: the catalog snapshot and the validated vote records.
//!
//! These are read-only inputs to the engine. The engine never mutates a
//! `VoteRecord`; per-run mutable state lives in `pz_algo::voter`.

use serde::{Deserialize, Serialize};

use crate::tokens::{PizzaOptionId, VoterId};

/// One pizza option configured for the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaCatalogEntry {
    pub id: PizzaOptionId,
    pub name: String,
    #[serde(default)]
    pub topping_count: u32,
}

impl PizzaCatalogEntry {
    pub fn new(id: PizzaOptionId, name: impl Into<String>, topping_count: u32) -> Self {
        Self { id, name: name.into(), topping_count }
    }
}

/// A voter's preference for one pizza option. Priority 1 is most preferred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedChoice {
    pub pizza_option_id: PizzaOptionId,
    pub priority: u8,
}

/// One voter's ballot: a slice weight plus a priority-ordered list of choices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voter_id: VoterId,
    pub voter_name: String,
    pub slice_count: u32,
    pub choices: Vec<RankedChoice>,
}

impl VoteRecord {
    /// Convenience constructor; choices are given most-preferred first and
    /// numbered 1, 2, 3... in that order.
    pub fn ranked(
        voter_id: VoterId,
        voter_name: impl Into<String>,
        slice_count: u32,
        ranked: &[PizzaOptionId],
    ) -> Self {
        let choices = ranked
            .iter()
            .enumerate()
            .map(|(i, id)| RankedChoice {
                pizza_option_id: id.clone(),
                priority: u8::try_from(i + 1).unwrap_or(u8::MAX),
            })
            .collect();
        Self { voter_id, voter_name: voter_name.into(), slice_count, choices }
    }
}

/// Descriptive header for the event a report is computed for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub title: String,
}

/// Full input snapshot for one report computation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBallots {
    #[serde(default)]
    pub event: EventInfo,
    pub catalog: Vec<PizzaCatalogEntry>,
    #[serde(default)]
    pub votes: Vec<VoteRecord>,
}
