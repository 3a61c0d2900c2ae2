//! Client risk conditions
//!
//! A condition (pre-existing illness, hazardous occupation, age band) adds a
//! percentage surcharge to the premium of every contract the client signs.
//! Conditions are catalog entries shared across clients.

use core_kernel::ConditionId;
use serde::{Deserialize, Serialize};

/// A risk condition carried by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Unique identifier
    pub id: ConditionId,
    /// Unique condition name
    pub name: String,
    /// Description
    pub description: String,
    /// Whole-percent surcharge added to the base premium; absent means 0
    pub added_percentage: Option<i32>,
}

impl Condition {
    /// Returns the surcharge, treating an absent percentage as 0
    pub fn surcharge(&self) -> i32 {
        self.added_percentage.unwrap_or(0)
    }
}
