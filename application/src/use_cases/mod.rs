//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod cast_vote;
pub mod error;
pub mod query;
pub(crate) mod shared;
pub mod start_consensus;

#[cfg(test)]
pub(crate) mod test_support;
