//! Priorities and the named comparators shared by the engines.
//!
//! Every ordering used in a report is one of the functions below, so ties
//! break the same way wherever a list is sorted.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Higher rank sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn parse(value: &str) -> Option<Priority> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or_default())
    }
}

/// Priority descending, then score descending.
pub fn by_priority_then_score(
    a_priority: Priority,
    a_score: f64,
    b_priority: Priority,
    b_score: f64,
) -> Ordering {
    b_priority
        .rank()
        .cmp(&a_priority.rank())
        .then_with(|| descending(a_score, b_score))
}

/// Largest exposure first.
pub fn by_exposure_desc(a_pct: f64, b_pct: f64) -> Ordering {
    descending(a_pct, b_pct)
}

/// Largest absolute magnitude first, sign ignored.
pub fn by_magnitude_desc(a: f64, b: f64) -> Ordering {
    descending(a.abs(), b.abs())
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
