//! Stable ordering helpers.

use core::cmp::Ordering;

use crate::tokens::PizzaOptionId;

/// Minimal view of an order line used for deterministic report ordering.
#[derive(Clone, Copy, Debug)]
pub struct OrderKey<'a> {
    pub slices: u64,
    pub name: &'a str,
    pub option_id: &'a PizzaOptionId,
}

/// Compare by slices descending, then display name, then option id.
///
/// Catalog fetch order is not a stable key, so the name is used as the
/// secondary key and the id makes the order total.
pub fn cmp_order_lines(a: &OrderKey<'_>, b: &OrderKey<'_>) -> Ordering {
    b.slices
        .cmp(&a.slices)
        .then_with(|| a.name.cmp(b.name))
        .then_with(|| a.option_id.as_str().cmp(b.option_id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PizzaOptionId { s.parse().unwrap() }

    #[test]
    fn higher_demand_first_then_name() {
        let (a, b, c) = (id("a"), id("b"), id("c"));
        let mut keys = vec![
            OrderKey { slices: 8, name: "Veggie", option_id: &a },
            OrderKey { slices: 12, name: "Pepperoni", option_id: &b },
            OrderKey { slices: 8, name: "Margherita", option_id: &c },
        ];
        keys.sort_by(cmp_order_lines);
        let names: Vec<&str> = keys.iter().map(|k| k.name).collect();
        assert_eq!(names, ["Pepperoni", "Margherita", "Veggie"]);
    }

    #[test]
    fn identical_names_fall_back_to_id() {
        let (a, b) = (id("a"), id("b"));
        let x = OrderKey { slices: 4, name: "Same", option_id: &b };
        let y = OrderKey { slices: 4, name: "Same", option_id: &a };
        assert_eq!(cmp_order_lines(&x, &y), Ordering::Greater);
    }
}
