//! Pickup/drop time representations.
//!
//! Pickers hand over decimal hours (`8.5` is half past eight) moving in
//! 30-minute steps; rehydrated sessions and drafts may carry `"HH:MM:SS"`
//! strings instead. The backends want the string form, so hours are
//! formatted when a payload is built and strings pass through untouched.

use serde::{Deserialize, Serialize};

/// A time as supplied by a caller: decimal hours or an already formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Hours(f64),
    Formatted(String),
}

impl TimeValue {
    /// Decimal-hour form, if the value can be read as one.
    #[must_use]
    pub fn as_hours(&self) -> Option<f64> {
        match self {
            TimeValue::Hours(h) => Some(*h),
            TimeValue::Formatted(s) => time_to_hour(s),
        }
    }

    /// Wire form (`"HH:MM:SS"`).
    #[must_use]
    pub fn to_wire(&self) -> String {
        match self {
            TimeValue::Hours(h) => hour_to_time(*h),
            TimeValue::Formatted(s) => s.clone(),
        }
    }
}

/// Formats a decimal hour as `"HH:MM:00"`.
///
/// The hour component is `floor(hour)`; minutes are `"30"` only when the
/// fractional part is exactly 0.5, otherwise `"00"`.
#[must_use]
pub fn hour_to_time(hour: f64) -> String {
    let whole = hour.floor();
    let minutes = if (hour - whole - 0.5).abs() < f64::EPSILON {
        "30"
    } else {
        "00"
    };
    #[allow(clippy::cast_possible_truncation)]
    let whole = whole as i64;
    format!("{whole:02}:{minutes}:00")
}

/// Parses `"HH:MM"` or `"HH:MM:SS"` back into decimal hours.
#[must_use]
pub fn time_to_hour(time: &str) -> Option<f64> {
    let mut parts = time.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    if let Some(seconds) = parts.next() {
        seconds.parse::<u32>().ok()?;
    }
    if parts.next().is_some() || minutes >= 60 {
        return None;
    }
    Some(f64::from(hours) + f64::from(minutes) / 60.0)
}
