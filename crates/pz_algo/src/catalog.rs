//! Catalog Index: O(1) lookup from pizza option id to its attributes.
//!
//! Iteration follows catalog insertion order, which is also the order used
//! for demand vectors.

use std::collections::HashMap;

use pz_core::{PizzaCatalogEntry, PizzaOptionId};

use crate::AllocError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: PizzaOptionId,
    pub name: String,
    pub topping_count: u32,
    /// Position in the catalog snapshot.
    pub order_index: usize,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogIndex {
    items: Vec<CatalogItem>,
    by_id: HashMap<PizzaOptionId, usize>,
}

impl CatalogIndex {
    /// Build the index. A repeated id is a structural error.
    pub fn build(entries: &[PizzaCatalogEntry]) -> Result<Self, AllocError> {
        let mut items = Vec::with_capacity(entries.len());
        let mut by_id = HashMap::with_capacity(entries.len());
        for (i, e) in entries.iter().enumerate() {
            if by_id.insert(e.id.clone(), i).is_some() {
                return Err(AllocError::DuplicateOption(e.id.clone()));
            }
            items.push(CatalogItem {
                id: e.id.clone(),
                name: e.name.clone(),
                topping_count: e.topping_count,
                order_index: i,
            });
        }
        Ok(Self { items, by_id })
    }

    pub fn get(&self, id: &PizzaOptionId) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&i| &self.items[i])
    }

    /// Lookup that treats "not found" as the structural error it is.
    pub fn require(&self, id: &PizzaOptionId) -> Result<&CatalogItem, AllocError> {
        self.get(id).ok_or_else(|| AllocError::UnknownOption {
            option_id: id.clone(),
            voter_id: None,
        })
    }

    pub fn order_index(&self, id: &PizzaOptionId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }
}
