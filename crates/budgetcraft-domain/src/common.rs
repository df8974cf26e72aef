//! Shared enums and numeric helpers for budgeting primitives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies which category list a name belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Spending,
    Budget,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Spending => "spending",
            CategoryKind::Budget => "budget",
        };
        f.write_str(label)
    }
}

/// Collapses NaN and infinities to zero so they never reach stored fields.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Rounds a monetary value to two decimal places.
pub fn round_currency(value: f64) -> f64 {
    (finite_or_zero(value) * 100.0).round() / 100.0
}

/// Case-insensitive comparison used for category-name uniqueness.
pub fn names_match(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}
