// crates/pz_algo/src/lib.rs
//! Allocation engine: converts ranked, weighted votes into per-pizza demand
//! and whole-pizza quantities.
//!
//! Pure and synchronous. Scratch state (`VoterAllocation`, `PizzaDemand`) is
//! local to one call; nothing is shared between computations.

#![forbid(unsafe_code)]

use thiserror::Error;

pub use pz_core::{PizzaOptionId, VoterId};

/// Structural violations. Business outcomes (thin demand, unallocated
/// voters) are never errors; they flow into the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("pizza option {option_id} is not in the catalog (referenced by voter {voter_id:?})")]
    UnknownOption {
        option_id: PizzaOptionId,
        voter_id: Option<VoterId>,
    },
    #[error("pizza option {0} appears more than once in the catalog")]
    DuplicateOption(PizzaOptionId),
    #[error("invalid engine params: {0}")]
    InvalidParams(String),
}

pub mod catalog;
pub mod quantize;
pub mod voter;
pub mod waterfall;

pub use catalog::{CatalogIndex, CatalogItem};
pub use quantize::{quantize, quantize_all, Quantity};
pub use voter::VoterAllocation;
pub use waterfall::{reallocate, PassRecord, PizzaDemand, VoterMove, WaterfallLog, WaterfallOutcome};
