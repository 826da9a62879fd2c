//! Quantizer: final slice demand → whole-pizza quantity.
//!
//! quantity = floor(d / slices_per_pizza) + (1 if d % slices_per_pizza >= round_up_remainder)
//!
//! A remainder below the round-up threshold is not ordered; it is reported
//! as dropped slices.

use pz_core::{EngineParams, PizzaOptionId};
use serde::Serialize;

use crate::waterfall::PizzaDemand;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Quantity {
    pub demand: u64,
    pub full_pizzas: u64,
    pub remainder: u64,
    pub rounded_up: bool,
    pub quantity: u64,
}

impl Quantity {
    /// Requested slices that do not turn into any ordered pizza.
    pub fn dropped_slices(&self) -> u64 {
        if self.rounded_up { 0 } else { self.remainder }
    }
}

pub fn quantize(demand: u64, params: &EngineParams) -> Quantity {
    let per = u64::from(params.slices_per_pizza.max(1));
    let full_pizzas = demand / per;
    let remainder = demand % per;
    let rounded_up = remainder > 0 && remainder >= u64::from(params.round_up_remainder);
    Quantity {
        demand,
        full_pizzas,
        remainder,
        rounded_up,
        quantity: full_pizzas + u64::from(rounded_up),
    }
}

/// Quantize every entry with non-zero demand, in catalog order.
pub fn quantize_all(demand: &PizzaDemand, params: &EngineParams) -> Vec<(PizzaOptionId, Quantity)> {
    demand
        .iter()
        .filter(|&(_, d)| d > 0)
        .map(|(id, d)| (id.clone(), quantize(d, params)))
        .collect()
}
