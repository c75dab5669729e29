//! Travel group participants and what they ask for.

pub mod member;
pub mod preference;

pub use member::{Member, summarize_names};
pub use preference::{
    BudgetStats, DateRange, MIN_GROUP_PREFERENCES, Preference, preference_destinations,
};
