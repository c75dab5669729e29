//! Externally sourced travel products.
//!
//! Inventory comes from third-party providers and is only partially trusted:
//! [`Inventory::sanitized`] drops records without a destination or with an
//! unusable price before anything is built on top of them.

use crate::core::ids::InventoryId;
use crate::core::money::is_valid_price;
use serde::{Deserialize, Serialize};

/// Common view over flights, hotels and activities
pub trait InventoryItem {
    fn id(&self) -> &InventoryId;
    fn destination(&self) -> &str;
    /// Price used for ordering (per night for hotels)
    fn price(&self) -> f64;

    /// Non-empty destination and a finite, non-negative price
    fn is_usable(&self) -> bool {
        !self.destination().trim().is_empty() && is_valid_price(self.price())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: InventoryId,
    pub destination: String,
    pub price: f64,
    #[serde(default)]
    pub airline: Option<String>,
}

impl Flight {
    pub fn new(id: impl Into<InventoryId>, destination: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            price,
            airline: None,
        }
    }

    pub fn with_airline(mut self, airline: impl Into<String>) -> Self {
        self.airline = Some(airline.into());
        self
    }

    /// Airline if known, otherwise the provider id
    pub fn label(&self) -> String {
        match &self.airline {
            Some(airline) => airline.clone(),
            None => format!("flight {}", self.id),
        }
    }
}

impl InventoryItem for Flight {
    fn id(&self) -> &InventoryId {
        &self.id
    }
    fn destination(&self) -> &str {
        &self.destination
    }
    fn price(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: InventoryId,
    pub destination: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Hotel {
    pub fn new(
        id: impl Into<InventoryId>,
        destination: impl Into<String>,
        price_per_night: f64,
    ) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            price_per_night,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("hotel {}", self.id),
        }
    }
}

impl InventoryItem for Hotel {
    fn id(&self) -> &InventoryId {
        &self.id
    }
    fn destination(&self) -> &str {
        &self.destination
    }
    fn price(&self) -> f64 {
        self.price_per_night
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: InventoryId,
    pub destination: String,
    pub price: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Activity {
    pub fn new(id: impl Into<InventoryId>, destination: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            price,
            name: None,
        }
    }
}

impl InventoryItem for Activity {
    fn id(&self) -> &InventoryId {
        &self.id
    }
    fn destination(&self) -> &str {
        &self.destination
    }
    fn price(&self) -> f64 {
        self.price
    }
}

/// Snapshot of everything the providers returned for one generation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Inventory {
    pub fn new(flights: Vec<Flight>, hotels: Vec<Hotel>, activities: Vec<Activity>) -> Self {
        Self {
            flights,
            hotels,
            activities,
        }
    }

    /// Drop unusable records, returning the cleaned snapshot and how many were dropped
    pub fn sanitized(self) -> (Self, usize) {
        let before = self.len();
        let cleaned = Self {
            flights: self.flights.into_iter().filter(|f| f.is_usable()).collect(),
            hotels: self.hotels.into_iter().filter(|h| h.is_usable()).collect(),
            activities: self
                .activities
                .into_iter()
                .filter(|a| a.is_usable())
                .collect(),
        };
        let dropped = before - cleaned.len();
        (cleaned, dropped)
    }

    pub fn len(&self) -> usize {
        self.flights.len() + self.hotels.len() + self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flight(&self, id: &InventoryId) -> Option<&Flight> {
        self.flights.iter().find(|f| &f.id == id)
    }

    pub fn hotel(&self, id: &InventoryId) -> Option<&Hotel> {
        self.hotels.iter().find(|h| &h.id == id)
    }

    pub fn activity(&self, id: &InventoryId) -> Option<&Activity> {
        self.activities.iter().find(|a| &a.id == id)
    }
}
