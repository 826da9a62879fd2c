//! Report Assembler: final allocation state → `Report`.
//!
//! Pure function of its inputs. Totals of requested slices come from the
//! untouched votes, not from post-allocation demand.

use pz_algo::{quantize_all, CatalogIndex, WaterfallOutcome};
use pz_core::determinism::{cmp_order_lines, OrderKey};
use pz_core::{EngineParams, EventInfo, VoteRecord};

use crate::{ChoiceView, DroppedDemand, OrderLine, Report, ReportError, Summary, VoterBreakdown, NOT_ALLOCATED};

pub fn assemble(
    event: &EventInfo,
    index: &CatalogIndex,
    votes: &[VoteRecord],
    outcome: &WaterfallOutcome,
    params: &EngineParams,
) -> Result<Report, ReportError> {
    let mut orders: Vec<OrderLine> = Vec::new();
    let mut dropped: Vec<DroppedDemand> = Vec::new();

    // Orders + remainder drops, walked in catalog order.
    for (id, q) in quantize_all(&outcome.demand, params) {
        let item = index.require(&id)?;
        if q.dropped_slices() > 0 {
            dropped.push(DroppedDemand::remainder(id.clone(), &item.name, q.dropped_slices()));
        }
        if q.quantity > 0 {
            orders.push(OrderLine {
                pizza_option_id: id,
                pizza_name: item.name.clone(),
                topping_count: item.topping_count,
                quantity: q.quantity,
                slices_requested: q.demand,
            });
        }
    }
    orders.sort_by(|a, b| {
        cmp_order_lines(
            &OrderKey { slices: a.slices_requested, name: &a.pizza_name, option_id: &a.pizza_option_id },
            &OrderKey { slices: b.slices_requested, name: &b.pizza_name, option_id: &b.pizza_option_id },
        )
    });

    // Unallocated voters, in vote order.
    for a in outcome.unallocated() {
        dropped.push(DroppedDemand::unallocated(a.voter_id.clone(), &a.voter_name, u64::from(a.slice_count)));
    }

    let mut voters = Vec::with_capacity(outcome.allocations.len());
    for a in &outcome.allocations {
        let mut choices = Vec::with_capacity(a.choices().len());
        for c in a.choices() {
            choices.push(ChoiceView {
                priority: c.priority,
                pizza_name: index.require(&c.pizza_option_id)?.name.clone(),
            });
        }
        let allocated_to = match a.allocated_to() {
            Some(id) => index.require(id)?.name.clone(),
            None => NOT_ALLOCATED.to_string(),
        };
        voters.push(VoterBreakdown {
            voter_id: a.voter_id.clone(),
            voter_name: a.voter_name.clone(),
            slice_count: a.slice_count,
            choices,
            allocated_to,
        });
    }

    let total_pizzas: u64 = orders.iter().map(|o| o.quantity).sum();
    let summary = Summary {
        total_voters: votes.len() as u64,
        total_slices_requested: votes.iter().map(|v| u64::from(v.slice_count)).sum(),
        total_pizzas,
        total_slices_ordered: total_pizzas * u64::from(params.slices_per_pizza),
        passes: outcome.passes,
        converged: outcome.converged,
    };

    Ok(Report {
        event: event.clone(),
        orders,
        dropped,
        voters,
        summary,
        integrity: None,
    })
}
