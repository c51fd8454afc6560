//! Financial goals as read by the recommendation engine.
//!
//! Goal lifecycle belongs to whoever supplies the context; this module only
//! derives progress and time remaining.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::holding::percent_of;
use super::ranking::Priority;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(deserialize_with = "lenient_date")]
    pub target_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl Goal {
    pub fn progress_pct(&self) -> f64 {
        percent_of(self.current_amount, self.target_amount)
    }

    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    /// Whole calendar months from `as_of` to the target date, floored at 0.
    /// `None` when the goal has no target date.
    pub fn months_remaining(&self, as_of: NaiveDate) -> Option<u32> {
        let target = self.target_date?;
        let mut months = (target.year() - as_of.year()) * 12
            + target.month() as i32
            - as_of.month() as i32;
        if target.day() < as_of.day() {
            months -= 1;
        }
        Some(months.max(0) as u32)
    }

    /// Contribution per month that closes the gap by the target date.
    pub fn required_monthly(&self, as_of: NaiveDate) -> Option<f64> {
        match self.months_remaining(as_of) {
            Some(months) if months > 0 => Some(self.remaining_amount() / months as f64),
            _ => None,
        }
    }

    /// `id` if present, else `name`.
    pub fn key(&self) -> &str {
        if self.id.is_empty() { &self.name } else { &self.id }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp; anything else is `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let day = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }))
}
