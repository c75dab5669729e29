//! Travel inventory: flights, hotels and activities from external providers.

pub mod index;
pub mod item;
pub mod matching;

pub use index::InventoryIndex;
pub use item::{Activity, Flight, Hotel, Inventory, InventoryItem};
pub use matching::{DestinationMatcher, ExactMatch, FuzzyContains, MatchStrategy, fuzzy_contains};
