//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`] - group, member, inventory, consensus and option identifiers
//! - [`letter::OptionLetter`] - the A..H letter shown for an option
//! - [`random::RandomSource`] - injected, seedable randomness
//! - [`money`] - price and budget helpers
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod ids;
pub mod letter;
pub mod money;
pub mod random;
