//! pz_report: Pure offline report model + renderers (JSON/HTML).
//!
//! Determinism rules:
//! - No I/O here. Callers supply the engine outcome already in memory.
//! - Order lines sort by slices ↓, name ↑, id ↑; dropped entries follow
//!   catalog order then vote order; voters follow vote order.

#![deny(unsafe_code)]

use serde::Serialize;
use thiserror::Error;

use pz_algo::AllocError;
use pz_core::{EngineParams, EventInfo, PizzaOptionId, VoterId};

pub mod assemble;
pub mod render_html;
pub mod render_json;

pub use assemble::assemble;
pub use render_html::render_html;
pub use render_json::render_json;

/// Shown in a voter's breakdown when no choice survived reallocation.
pub const NOT_ALLOCATED: &str = "not allocated";

// ===== Errors =====
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("render failed: {0}")]
    Render(String),
}

// ===== Model =====
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub event: EventInfo,
    pub orders: Vec<OrderLine>,
    pub dropped: Vec<DroppedDemand>,
    pub voters: Vec<VoterBreakdown>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<Integrity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub pizza_option_id: PizzaOptionId,
    pub pizza_name: String,
    pub topping_count: u32,
    pub quantity: u64,
    /// Final demand after reallocation.
    pub slices_requested: u64,
}

/// Demand that did not make it into the order, with an admin-facing message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DroppedDemand {
    /// Sub-threshold remainder of an option's demand.
    Remainder {
        pizza_option_id: PizzaOptionId,
        pizza_name: String,
        slices: u64,
        message: String,
    },
    /// A voter none of whose choices stayed viable.
    Unallocated {
        voter_id: VoterId,
        voter_name: String,
        slices: u64,
        message: String,
    },
}

impl DroppedDemand {
    pub fn remainder(pizza_option_id: PizzaOptionId, pizza_name: &str, slices: u64) -> Self {
        let message = format!(
            "{pizza_name}: {slices} {} not ordered (less than half a pizza)",
            plural_slices(slices)
        );
        DroppedDemand::Remainder {
            pizza_option_id,
            pizza_name: pizza_name.to_string(),
            slices,
            message,
        }
    }

    pub fn unallocated(voter_id: VoterId, voter_name: &str, slices: u64) -> Self {
        let message = format!(
            "{voter_name}: {slices} {} not allocated (none of their choices had enough demand)",
            plural_slices(slices)
        );
        DroppedDemand::Unallocated {
            voter_id,
            voter_name: voter_name.to_string(),
            slices,
            message,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DroppedDemand::Remainder { message, .. } | DroppedDemand::Unallocated { message, .. } => message,
        }
    }

    pub fn slices(&self) -> u64 {
        match self {
            DroppedDemand::Remainder { slices, .. } | DroppedDemand::Unallocated { slices, .. } => *slices,
        }
    }
}

fn plural_slices(n: u64) -> &'static str {
    if n == 1 { "slice" } else { "slices" }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub priority: u8,
    pub pizza_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoterBreakdown {
    pub voter_id: VoterId,
    pub voter_name: String,
    pub slice_count: u32,
    pub choices: Vec<ChoiceView>,
    /// Pizza name, or `NOT_ALLOCATED`.
    pub allocated_to: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_voters: u64,
    /// Σ slice_count over the input votes, whatever the allocation outcome.
    pub total_slices_requested: u64,
    pub total_pizzas: u64,
    /// Σ quantity × slices_per_pizza. Differs from requested demand once
    /// rounding adds or drops slices; it is the size of the order, not of the appetite.
    pub total_slices_ordered: u64,
    pub passes: u32,
    pub converged: bool,
}

/// Provenance echoed into the report so it can be reproduced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Integrity {
    pub input_sha256: String,
    pub params: EngineParams,
    pub engine_name: String,
    pub engine_version: String,
}
