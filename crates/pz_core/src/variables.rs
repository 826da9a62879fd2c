//! Engine parameters (policy constants) with safe defaults.
//!
//! Every field has a serde default so a partial params file is accepted;
//! `validate()` rejects combinations the engine cannot honor.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const DEFAULT_SLICES_PER_PIZZA: u32 = 8;
pub const DEFAULT_MIN_VIABLE_SLICES: u32 = 4;
pub const DEFAULT_ROUND_UP_REMAINDER: u32 = 4;
pub const DEFAULT_MAX_PASSES: u32 = 10;
pub const DEFAULT_MIN_SLICE_COUNT: u32 = 1;
/// Slice counts are opaque weights; no upper bound unless configured.
pub const DEFAULT_MAX_SLICE_COUNT: u32 = u32::MAX;
pub const DEFAULT_MAX_CHOICES: usize = 3;

fn default_slices_per_pizza() -> u32 { DEFAULT_SLICES_PER_PIZZA }
fn default_min_viable_slices() -> u32 { DEFAULT_MIN_VIABLE_SLICES }
fn default_round_up_remainder() -> u32 { DEFAULT_ROUND_UP_REMAINDER }
fn default_max_passes() -> u32 { DEFAULT_MAX_PASSES }
fn default_min_slice_count() -> u32 { DEFAULT_MIN_SLICE_COUNT }
fn default_max_slice_count() -> u32 { DEFAULT_MAX_SLICE_COUNT }
fn default_max_choices() -> usize { DEFAULT_MAX_CHOICES }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Slice capacity of one whole pizza.
    #[serde(default = "default_slices_per_pizza")]
    pub slices_per_pizza: u32,
    /// Options with demand in `1..min_viable_slices` are evicted during reallocation.
    #[serde(default = "default_min_viable_slices")]
    pub min_viable_slices: u32,
    /// A remainder of at least this many slices buys one extra pizza.
    #[serde(default = "default_round_up_remainder")]
    pub round_up_remainder: u32,
    /// Hard cap on reallocation passes.
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
    /// Inclusive bounds on a vote's slice count (input validation only).
    #[serde(default = "default_min_slice_count")]
    pub min_slice_count: u32,
    #[serde(default = "default_max_slice_count")]
    pub max_slice_count: u32,
    /// Maximum ranked choices per vote (input validation only).
    #[serde(default = "default_max_choices")]
    pub max_choices: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            slices_per_pizza: DEFAULT_SLICES_PER_PIZZA,
            min_viable_slices: DEFAULT_MIN_VIABLE_SLICES,
            round_up_remainder: DEFAULT_ROUND_UP_REMAINDER,
            max_passes: DEFAULT_MAX_PASSES,
            min_slice_count: DEFAULT_MIN_SLICE_COUNT,
            max_slice_count: DEFAULT_MAX_SLICE_COUNT,
            max_choices: DEFAULT_MAX_CHOICES,
        }
    }
}

impl EngineParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.slices_per_pizza == 0 {
            return Err(CoreError::DomainOutOfRange("slices_per_pizza must be > 0"));
        }
        if self.round_up_remainder > self.slices_per_pizza {
            return Err(CoreError::DomainOutOfRange("round_up_remainder must be <= slices_per_pizza"));
        }
        if self.max_passes == 0 {
            return Err(CoreError::DomainOutOfRange("max_passes must be > 0"));
        }
        if self.min_slice_count == 0 || self.min_slice_count > self.max_slice_count {
            return Err(CoreError::DomainOutOfRange("slice count bounds must satisfy 1 <= min <= max"));
        }
        if self.max_choices == 0 {
            return Err(CoreError::DomainOutOfRange("max_choices must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_constants() {
        let p = EngineParams::default();
        assert_eq!(p.slices_per_pizza, 8);
        assert_eq!(p.min_viable_slices, 4);
        assert_eq!(p.round_up_remainder, 4);
        assert_eq!(p.max_passes, 10);
        assert_eq!(p.max_slice_count, u32::MAX);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: EngineParams = serde_json::from_str(r#"{"round_up_remainder": 3}"#).unwrap();
        assert_eq!(p.round_up_remainder, 3);
        assert_eq!(p.slices_per_pizza, 8);
        assert_eq!(p.max_choices, 3);
    }

    #[test]
    fn rejects_nonsense() {
        let p = EngineParams { slices_per_pizza: 0, ..EngineParams::default() };
        assert!(p.validate().is_err());
        let p = EngineParams { round_up_remainder: 9, ..EngineParams::default() };
        assert!(p.validate().is_err());
        let p = EngineParams { max_passes: 0, ..EngineParams::default() };
        assert!(p.validate().is_err());
        let p = EngineParams { min_slice_count: 5, ..EngineParams::default() };
        assert!(p.validate().is_err());
    }
}
