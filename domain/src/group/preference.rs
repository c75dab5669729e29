//! Member trip preferences and the figures derived from them

use crate::core::ids::MemberId;
use crate::core::money::parse_amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A round is a group decision: fewer completed preferences never open one
pub const MIN_GROUP_PREFERENCES: usize = 2;

/// Inclusive travel window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Hotel nights covered by the range, never less than one
    pub fn nights(&self) -> u32 {
        let days = (self.end - self.start).num_days();
        days.max(1) as u32
    }
}

/// One member's trip ask within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub member_id: MemberId,
    pub destination: String,
    /// Free-form budget as entered, e.g. `"$1,700"`
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// Only completed preferences count toward generation
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

impl Preference {
    pub fn new(member_id: impl Into<MemberId>, destination: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            destination: destination.into(),
            budget: String::new(),
            date_range: None,
            completed: true,
        }
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = budget.into();
        self
    }

    pub fn with_dates(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn incomplete(mut self) -> Self {
        self.completed = false;
        self
    }

    /// Parsed budget amount, if the member entered a usable one
    pub fn budget_amount(&self) -> Option<f64> {
        parse_amount(&self.budget)
    }
}

/// Distinct, trimmed, non-empty destinations across completed preferences
pub fn preference_destinations(preferences: &[Preference]) -> Vec<String> {
    preferences
        .iter()
        .filter(|p| p.completed)
        .map(|p| p.destination.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Spread of the budgets members entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetStats {
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl BudgetStats {
    /// `None` when no member entered a usable budget
    pub fn from_preferences(preferences: &[Preference]) -> Option<Self> {
        let mut budgets: Vec<f64> = preferences
            .iter()
            .filter(|p| p.completed)
            .filter_map(Preference::budget_amount)
            .collect();
        if budgets.is_empty() {
            return None;
        }
        budgets.sort_by(f64::total_cmp);

        let mid = budgets.len() / 2;
        let median = if budgets.len() % 2 == 0 {
            (budgets[mid - 1] + budgets[mid]) / 2.0
        } else {
            budgets[mid]
        };

        Some(Self {
            min: budgets[0],
            median,
            max: budgets[budgets.len() - 1],
        })
    }
}
