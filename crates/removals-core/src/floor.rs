//! Floor labels and their canonical integer form.
//!
//! Forms collect floors as display labels ("Ground floor", "5th floor +")
//! while backends want an integer. Every conversion in the workspace goes
//! through [`floor_to_number`].

use serde::{Deserialize, Serialize};

/// Display labels in floor order; the index is the floor number.
pub const FLOOR_LABELS: [&str; 6] = [
    "Ground floor",
    "1st floor",
    "2nd floor",
    "3rd floor",
    "4th floor",
    "5th floor +",
];

/// A floor as it arrives from a form or from checkout metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Floor {
    Number(i64),
    Label(String),
}

impl Default for Floor {
    fn default() -> Self {
        Floor::Number(0)
    }
}

impl From<i64> for Floor {
    fn from(n: i64) -> Self {
        Floor::Number(n)
    }
}

impl From<&str> for Floor {
    fn from(label: &str) -> Self {
        Floor::Label(label.to_owned())
    }
}

impl Floor {
    #[must_use]
    pub fn number(&self) -> i64 {
        floor_to_number(self)
    }
}

/// Maps a floor label or number to its integer.
///
/// Known labels map to 0–5. Numbers pass through unchanged. A string holding
/// a number parses; anything else is 0.
#[must_use]
pub fn floor_to_number(floor: &Floor) -> i64 {
    match floor {
        Floor::Number(n) => *n,
        Floor::Label(label) => {
            let trimmed = label.trim();
            FLOOR_LABELS
                .iter()
                .position(|l| l.eq_ignore_ascii_case(trimmed))
                .and_then(|idx| i64::try_from(idx).ok())
                .or_else(|| trimmed.parse::<i64>().ok())
                .unwrap_or(0)
        }
    }
}
