//! Renewable resource model.
//!
//! A renewable resource offers a fixed number of units in every time
//! period; units held by an activity return to the pool when it finishes.
//!
//! # Reference
//! Brucker et al. (1999), "Resource-constrained project scheduling:
//! Notation, classification, models, and methods"

use serde::{Deserialize, Serialize};

/// A renewable resource with constant per-period capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Human-readable name (e.g. "R1").
    pub name: String,
    /// Units available in every period.
    pub capacity: u32,
}

impl Resource {
    /// Creates an unnamed renewable resource.
    pub fn renewable(capacity: u32) -> Self {
        Self {
            name: String::new(),
            capacity,
        }
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
