//! YAML booking drafts: a whole wizard's worth of input in one file.

use std::path::Path;

use serde::Deserialize;

use crate::booking::{
    AdditionalServices, CustomerDetails, ExtraStop, Item, Location, SelectedDate, Van,
};
use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    pub pickup: Location,
    pub delivery: Location,
    pub items: Vec<Item>,
    pub extra_stops: Vec<ExtraStop>,
    pub selected_date: SelectedDate,
    pub van: Option<Van>,
    pub motor_bike: Option<String>,
    pub piano: Option<String>,
    pub customer_details: CustomerDetails,
    pub additional_services: AdditionalServices,
}

/// Reads and parses a booking draft file.
///
/// # Errors
///
/// Returns [`ConfigError::DraftIo`] if the file cannot be read and
/// [`ConfigError::DraftParse`] if it is not a valid draft.
pub fn load_draft(path: &Path) -> Result<BookingDraft, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DraftIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_draft(&content)
}

/// Parses a booking draft from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::DraftParse`] if the text is not a valid draft.
pub fn parse_draft(content: &str) -> Result<BookingDraft, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::VanType;
    use crate::time::TimeValue;

    const DRAFT: &str = r#"
pickup:
  address: 12 Mill Lane
  postcode: LS1 4AP
  city: Leeds
  floor: 1st floor
  liftAvailable: false
  propertyType: Flat
delivery:
  address: 9 Low Rd
  floor: 0
items:
  - { name: Sofa, quantity: 1 }
  - { name: Box, quantity: 12 }
extraStops:
  - { address: 4 Side St, doorNumber: "2", lift: "yes", floor: 3 }
selectedDate:
  date: "2026-11-02"
  pickupTime: 8.5
  dropTime: "12:00:00"
  numberOfMovers: 2
van:
  type: Medium
customerDetails:
  name: Sam Carter
  email: sam@example.com
  phone: "07123 456 789"
additionalServices:
  dismantling: [Bed]
"#;

    #[test]
    fn parses_full_draft() {
        let draft = parse_draft(DRAFT).expect("draft should parse");
        assert_eq!(draft.pickup.floor.number(), 1);
        assert_eq!(draft.delivery.floor.number(), 0);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.extra_stops[0].door_flat_no, "2");
        assert!(draft.extra_stops[0].lift_available);
        assert_eq!(draft.selected_date.pickup_time, Some(TimeValue::Hours(8.5)));
        assert_eq!(draft.selected_date.drop_time, Some(TimeValue::Hours(12.0)));
        assert_eq!(draft.van.map(|v| v.van_type), Some(VanType::Medium));
        assert_eq!(draft.additional_services.dismantling, ["Bed"]);
    }

    #[test]
    fn empty_draft_is_default() {
        let draft = parse_draft("{}").expect("empty mapping should parse");
        assert!(draft.items.is_empty());
        assert!(draft.van.is_none());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_draft("items: [").unwrap_err();
        assert!(matches!(err, ConfigError::DraftParse(_)));
    }
}
