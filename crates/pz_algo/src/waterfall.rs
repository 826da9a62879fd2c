//! Waterfall reallocation.
//!
//! Each pass recomputes demand from scratch, marks every option with demand
//! in `1..min_viable_slices` as unviable, and advances every voter sitting on
//! an unviable option to their next-ranked choice. Passes repeat until no
//! voter moves or `max_passes` is reached.
//!
//! Eviction is re-evaluated globally each pass: moving one voter can push a
//! previously viable option below the threshold on the next pass.

use std::collections::BTreeSet;

use pz_core::{EngineParams, PizzaOptionId, VoteRecord, VoterId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::CatalogIndex;
use crate::voter::VoterAllocation;
use crate::AllocError;

/// Aggregate slice demand per catalog entry, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PizzaDemand {
    entries: Vec<(PizzaOptionId, u64)>,
}

impl PizzaDemand {
    /// Sum `slice_count` over allocations currently pointing at each entry.
    pub fn compute(index: &CatalogIndex, allocations: &[VoterAllocation]) -> Result<Self, AllocError> {
        let mut entries: Vec<(PizzaOptionId, u64)> =
            index.iter().map(|item| (item.id.clone(), 0)).collect();
        for a in allocations {
            if let Some(id) = a.allocated_to() {
                let i = index.order_index(id).ok_or_else(|| AllocError::UnknownOption {
                    option_id: id.clone(),
                    voter_id: Some(a.voter_id.clone()),
                })?;
                entries[i].1 += u64::from(a.slice_count);
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, id: &PizzaOptionId) -> u64 {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, d)| *d)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PizzaOptionId, u64)> {
        self.entries.iter().map(|(k, d)| (k, *d))
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, d)| d).sum()
    }
}

/// One voter moved off an unviable option during a pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoterMove {
    pub voter_id: VoterId,
    pub from: PizzaOptionId,
    /// `None` when the voter ran out of choices.
    pub to: Option<PizzaOptionId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PassRecord {
    /// 1-based pass number.
    pub pass: u32,
    /// Demand observed at the start of the pass.
    pub demand: PizzaDemand,
    pub unviable: Vec<PizzaOptionId>,
    pub moves: Vec<VoterMove>,
}

/// Audit trail of a reallocation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WaterfallLog {
    pub passes: Vec<PassRecord>,
}

#[derive(Clone, Debug)]
pub struct WaterfallOutcome {
    /// Final per-voter state, in input vote order.
    pub allocations: Vec<VoterAllocation>,
    /// Demand after the last pass.
    pub demand: PizzaDemand,
    pub passes: u32,
    /// False when the pass cap stopped the loop while voters were still moving.
    pub converged: bool,
    pub log: WaterfallLog,
}

impl WaterfallOutcome {
    pub fn unallocated(&self) -> impl Iterator<Item = &VoterAllocation> {
        self.allocations.iter().filter(|a| !a.is_allocated())
    }
}

/// Run the waterfall over `votes`.
///
/// Every choice of every vote must reference `index`; a dangling reference
/// is returned as `AllocError::UnknownOption` before any pass runs.
/// `params` are checked here for callers that skip the pipeline; the
/// pipeline rejects bad params earlier, before input validation reads them.
pub fn reallocate(
    index: &CatalogIndex,
    votes: &[VoteRecord],
    params: &EngineParams,
) -> Result<WaterfallOutcome, AllocError> {
    params
        .validate()
        .map_err(|e| AllocError::InvalidParams(e.to_string()))?;

    for v in votes {
        for c in &v.choices {
            if index.get(&c.pizza_option_id).is_none() {
                return Err(AllocError::UnknownOption {
                    option_id: c.pizza_option_id.clone(),
                    voter_id: Some(v.voter_id.clone()),
                });
            }
        }
    }

    let mut allocations: Vec<VoterAllocation> = votes.iter().map(VoterAllocation::from_vote).collect();
    let mut log = WaterfallLog::default();
    let mut converged = false;
    let mut passes = 0u32;
    let min_viable = u64::from(params.min_viable_slices);

    while passes < params.max_passes {
        passes += 1;
        let demand = PizzaDemand::compute(index, &allocations)?;

        let unviable: BTreeSet<&PizzaOptionId> = demand
            .iter()
            .filter(|&(_, d)| d > 0 && d < min_viable)
            .map(|(id, _)| id)
            .collect();

        let mut moves = Vec::new();
        for a in allocations.iter_mut() {
            let Some(from) = a.allocated_to().filter(|id| unviable.contains(id)).cloned() else {
                continue;
            };
            let to = a.advance().cloned();
            moves.push(VoterMove { voter_id: a.voter_id.clone(), from, to });
        }

        debug!(pass = passes, unviable = unviable.len(), moved = moves.len(), "waterfall pass");

        let settled = moves.is_empty();
        let unviable = unviable.into_iter().cloned().collect();
        log.passes.push(PassRecord { pass: passes, demand, unviable, moves });

        if settled {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(max_passes = params.max_passes, "waterfall stopped at pass cap before reaching a fixed point");
    }

    let demand = PizzaDemand::compute(index, &allocations)?;
    Ok(WaterfallOutcome { allocations, demand, passes, converged, log })
}
