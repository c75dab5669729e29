//! InventoryIndex - inventory grouped by destination, cheapest first

use super::item::InventoryItem;
use std::collections::BTreeMap;

/// Immutable destination → price-sorted items map.
///
/// Built fresh for each generation pass and handed to the generator by
/// value; there is no process-wide inventory.
#[derive(Debug, Clone)]
pub struct InventoryIndex<T> {
    by_destination: BTreeMap<String, Vec<T>>,
}

impl<T: InventoryItem + Clone> InventoryIndex<T> {
    /// Group `items` by destination and sort each group ascending by price.
    ///
    /// The sort is stable, so equal prices keep their input order.
    pub fn build(items: &[T]) -> Self {
        let mut by_destination: BTreeMap<String, Vec<T>> = BTreeMap::new();
        for item in items {
            by_destination
                .entry(item.destination().to_string())
                .or_default()
                .push(item.clone());
        }
        for group in by_destination.values_mut() {
            group.sort_by(|a, b| a.price().total_cmp(&b.price()));
        }
        Self { by_destination }
    }
}

impl<T> InventoryIndex<T> {
    /// Items for a destination, empty if the destination is unknown
    pub fn get(&self, destination: &str) -> &[T] {
        self.by_destination
            .get(destination)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.by_destination.keys().map(String::as_str)
    }

    pub fn contains(&self, destination: &str) -> bool {
        self.by_destination.contains_key(destination)
    }

    pub fn is_empty(&self) -> bool {
        self.by_destination.is_empty()
    }
}
