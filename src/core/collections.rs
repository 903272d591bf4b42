//! Local list maintenance after backend calls.

use crate::core::models::{Campaign, Identified, Product};

/// Remove every item whose id equals `id`. Returns how many were removed.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> usize {
    let before = items.len();
    items.retain(|item| item.id() != id);
    before - items.len()
}

/// Records with a display name to search on.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Campaign {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive substring match on the name. An empty query matches all.
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
        .collect()
}
