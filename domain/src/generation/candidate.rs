//! Priced (flight, hotel) pairings

use crate::core::ids::InventoryId;
use crate::core::money::round_cents;
use crate::group::DateRange;
use crate::inventory::{Flight, Hotel};
use serde::{Deserialize, Serialize};

/// Nights used when no trip length is known at generation time
pub const DEFAULT_NIGHTS: u32 = 7;

/// Number of hotel nights priced into an option.
///
/// `estimated` marks the fixed approximation so callers can tell the
/// price is not for the real trip length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightCount {
    pub nights: u32,
    pub estimated: bool,
}

impl NightCount {
    pub fn exact(nights: u32) -> Self {
        Self {
            nights: nights.max(1),
            estimated: false,
        }
    }

    pub fn estimated(nights: u32) -> Self {
        Self {
            nights: nights.max(1),
            estimated: true,
        }
    }

    /// Exact nights from the travel window when known, the estimate otherwise
    pub fn for_trip(range: Option<DateRange>, default_nights: u32) -> Self {
        match range {
            Some(range) => Self::exact(range.nights()),
            None => Self::estimated(default_nights),
        }
    }
}

impl Default for NightCount {
    fn default() -> Self {
        Self::estimated(DEFAULT_NIGHTS)
    }
}

/// Identity of a pairing, unique within one generation pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    pub flight: InventoryId,
    pub hotel: InventoryId,
}

impl PairKey {
    pub fn new(flight: &InventoryId, hotel: &InventoryId) -> Self {
        Self {
            flight: flight.clone(),
            hotel: hotel.clone(),
        }
    }
}

/// A priced (flight, hotel) pairing considered for an option
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub destination: String,
    pub flight: Flight,
    pub hotel: Hotel,
    /// `flight.price + hotel.price_per_night * nights`
    pub total_cost: f64,
}

impl Candidate {
    pub fn new(destination: impl Into<String>, flight: Flight, hotel: Hotel, nights: NightCount) -> Self {
        let total_cost = round_cents(flight.price + hotel.price_per_night * f64::from(nights.nights));
        Self {
            destination: destination.into(),
            flight,
            hotel,
            total_cost,
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(&self.flight.id, &self.hotel.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_total_cost_uses_nights() {
        let flight = Flight::new("f1", "Paris", 300.0);
        let hotel = Hotel::new("h1", "Paris", 100.0);

        let estimated = Candidate::new("Paris", flight.clone(), hotel.clone(), NightCount::default());
        assert_eq!(estimated.total_cost, 1000.0);

        let exact = Candidate::new("Paris", flight, hotel, NightCount::exact(3));
        assert_eq!(exact.total_cost, 600.0);
    }

    #[test]
    fn test_night_count_for_trip() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 11).unwrap(),
        );
        assert_eq!(NightCount::for_trip(Some(range), 7), NightCount::exact(10));
        assert_eq!(NightCount::for_trip(None, 5), NightCount::estimated(5));
        assert!(NightCount::for_trip(None, 5).estimated);
    }

    #[test]
    fn test_night_count_minimum_one() {
        assert_eq!(NightCount::exact(0).nights, 1);
    }
}
