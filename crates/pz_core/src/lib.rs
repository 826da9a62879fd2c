//! pz_core: Core types, engine parameters, and ordering helpers.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`pz_io`, `pz_algo`, `pz_report`, `pz_pipeline`, `pz_cli`).
//!
//! - Registry tokens: `PizzaOptionId`, `VoterId`
//! - Input entities: `PizzaCatalogEntry`, `RankedChoice`, `VoteRecord`, `EventBallots`
//! - Policy constants: `EngineParams` (slices per pizza, thresholds, pass cap)
//! - Deterministic ordering helpers for report emission

#![forbid(unsafe_code)]

pub mod errors {
    use thiserror::Error;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        #[error("invalid token: {0:?}")]
        InvalidToken(String),
        #[error("parameter out of range: {0}")]
        DomainOutOfRange(&'static str),
    }
}

pub mod determinism;
pub mod entities;
pub mod tokens;
pub mod variables;

pub use entities::{EventBallots, EventInfo, PizzaCatalogEntry, RankedChoice, VoteRecord};
pub use errors::CoreError;
pub use tokens::{PizzaOptionId, VoterId};
pub use variables::EngineParams;
