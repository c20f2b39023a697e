//! Booking record shapes held by the [`crate::BookingStore`].
//!
//! Wire names are camelCase to match what the forms and checkout metadata
//! carry. Legacy spellings seen on extra stops (`doorNumber`, `lift`) are
//! accepted on input only.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::floor::Floor;
use crate::time::TimeValue;

/// A pickup or delivery address with access details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub address: String,
    pub postcode: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub flat_no: Option<String>,
    pub floor: Floor,
    #[serde(alias = "lift", deserialize_with = "de_flag")]
    pub lift_available: bool,
    pub property_type: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

impl Location {
    /// A location carrying only an address line.
    #[must_use]
    pub fn at(address: &str) -> Self {
        Self {
            address: address.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }
}

/// An intermediate stop between pickup and delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraStop {
    pub address: String,
    #[serde(alias = "doorNumber")]
    pub door_flat_no: String,
    pub property_type: String,
    pub floor: Floor,
    #[serde(alias = "lift", deserialize_with = "de_flag")]
    pub lift_available: bool,
}

/// A catalogue item and how many of it are moving. `name` is the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
}

impl Item {
    #[must_use]
    pub fn new(name: &str, quantity: u32) -> Self {
        Self {
            name: name.to_owned(),
            quantity,
        }
    }
}

/// Derived distance and duration for the current route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Journey {
    /// Human readable, e.g. `"12.3 miles"`.
    pub distance: Option<String>,
    /// Human readable, e.g. `"1 hr 5 min"`.
    pub duration: Option<String>,
    pub route: Option<String>,
}

impl Journey {
    /// Leading number of [`Journey::distance`], or 0 when absent or unparseable.
    #[must_use]
    pub fn distance_value(&self) -> f64 {
        self.distance
            .as_deref()
            .and_then(|d| d.split_whitespace().next())
            .and_then(|n| n.replace(',', "").parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

/// Move date, time window, crew size and the price quoted for that slot.
///
/// Times keep the shape they arrived in, so a formatted string reaches the
/// wire unchanged and decimal hours are formatted by the payload builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectedDate {
    pub date: Option<String>,
    #[serde(deserialize_with = "de_time")]
    pub pickup_time: Option<TimeValue>,
    #[serde(deserialize_with = "de_time")]
    pub drop_time: Option<TimeValue>,
    pub number_of_movers: Option<u32>,
    pub price: Option<f64>,
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%A, %d %B %Y", "%d %B %Y"];

impl SelectedDate {
    /// Parses [`SelectedDate::date`] in any of the display forms the forms produce.
    #[must_use]
    pub fn move_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VanType {
    Small,
    Medium,
    Large,
    Luton,
    /// A type assigned by the booking service that the client does not know.
    Other(String),
}

impl From<String> for VanType {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => VanType::Small,
            "medium" => VanType::Medium,
            "large" => VanType::Large,
            "luton" => VanType::Luton,
            _ => VanType::Other(s),
        }
    }
}

impl From<VanType> for String {
    fn from(v: VanType) -> Self {
        v.as_str().to_owned()
    }
}

impl VanType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            VanType::Small => "Small",
            VanType::Medium => "Medium",
            VanType::Large => "Large",
            VanType::Luton => "Luton",
            VanType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for VanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Van {
    #[serde(rename = "type")]
    pub van_type: VanType,
}

impl Van {
    #[must_use]
    pub fn new(van_type: VanType) -> Self {
        Self { van_type }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "de_flag")]
    pub is_business_customer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalServices {
    pub basic_compensation: bool,
    pub comprehensive_insurance: bool,
    /// Item names to dismantle, in selection order.
    pub dismantling: Vec<String>,
    /// Item names to reassemble, in selection order.
    pub reassembly: Vec<String>,
    pub special_requirements: String,
}

/// Reads a flag that may arrive as a bool, a number or a string.
///
/// # Errors
///
/// Never fails on well-formed JSON/YAML scalars; unknown strings read as `false`.
pub fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        Some(Flag::Text(s)) => parse_flag(&s),
        None => false,
    })
}

/// String form of [`de_flag`]: `"true"`, `"yes"` and `"1"` are true.
#[must_use]
pub fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}

/// Keeps the time as supplied; strings that are not a clock time read as unset.
fn de_time<'de, D>(deserializer: D) -> Result<Option<TimeValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TimeValue>::deserialize(deserializer)?.filter(|t| t.as_hours().is_some()))
}
