//! Logical gallery items and their expansion into fixed tile slots.
//!
//! Items arrive from the catalog as JSON. The viewport renders a fixed number
//! of slots, so the item list is repeated (each repetition independently
//! shuffled) until every slot is filled.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("invalid item JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item at index {index} has an empty id")]
    EmptyId { index: usize },
}

/// Image URL groups for an item, in thumbnail priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemImages {
    pub above: Vec<String>,
    pub detailed: Vec<String>,
    pub background: Vec<String>,
    pub how_to_use: Vec<String>,
}

/// A catalog product as served by the items endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub available_colors: Vec<String>,
    #[serde(default)]
    pub matching_palette: Vec<String>,
    #[serde(default)]
    pub images: ItemImages,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub products_in_collection: u32,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub handmade: bool,
    #[serde(default)]
    pub material: String,
}

impl Item {
    /// First non-blank image URL, searching above, detailed, background and
    /// how-to-use in that order. `None` means render a placeholder.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        let ItemImages { above, detailed, background, how_to_use } = &self.images;
        [above, detailed, background, how_to_use]
            .into_iter()
            .flatten()
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
    }
}

/// Parse a JSON array of items.
///
/// # Errors
///
/// Returns [`ItemError::Json`] for malformed JSON and [`ItemError::EmptyId`]
/// when an item has a blank id.
pub fn parse_items(json: &str) -> Result<Vec<Item>, ItemError> {
    let items: Vec<Item> = serde_json::from_str(json)?;
    if let Some(index) = items.iter().position(|item| item.id.trim().is_empty()) {
        return Err(ItemError::EmptyId { index });
    }
    Ok(items)
}

/// Fill `slot_count` slots with indices into an item list of length
/// `item_count`, appending a freshly shuffled copy of the list each round.
///
/// Returns no slots when there are no items.
pub fn expand_slots<R: Rng>(item_count: usize, slot_count: usize, rng: &mut R) -> Vec<usize> {
    if item_count == 0 {
        return Vec::new();
    }
    let mut slots = Vec::with_capacity(slot_count + item_count);
    let mut round: Vec<usize> = (0..item_count).collect();
    while slots.len() < slot_count {
        round.sort_unstable();
        round.shuffle(rng);
        slots.extend_from_slice(&round);
    }
    slots.truncate(slot_count);
    slots
}
