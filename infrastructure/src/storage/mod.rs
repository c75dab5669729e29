//! Ballot storage adapters

mod memory;

pub use memory::InMemoryBallotRepository;
