use removals_core::{
    compose_address, floor_to_number, format_address_with_postcode, BookingStore, BookingUpdate,
    ExtraStop, Location,
};

use super::{check_phone, StepController, WizardStep};
use crate::error::ValidationErrors;

const MAX_FLOOR: i64 = 5;

/// Pickup, delivery and any extra stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationStep {
    pub pickup: Location,
    pub delivery: Location,
    pub extra_stops: Vec<ExtraStop>,
}

/// Fills `address` from the structured parts when it is blank and makes
/// sure a known postcode is part of it.
fn prepare(location: &Location) -> Location {
    let mut prepared = location.clone();
    let postcode = location.postcode.as_deref().filter(|p| !p.trim().is_empty());
    if !location.has_address() {
        if let Some(line) = location.address_line1.as_deref().filter(|l| !l.trim().is_empty()) {
            prepared.address = compose_address(line, location.city.as_deref(), postcode);
        }
    } else if let Some(postcode) = postcode {
        prepared.address = format_address_with_postcode(&location.address, postcode);
    }
    prepared
}

fn check_location(
    location: &Location,
    field: &'static str,
    floor_field: &'static str,
    contact_field: &'static str,
    errors: &mut ValidationErrors,
) {
    if !prepare(location).has_address() {
        errors.push(field, format!("{field} address is required"));
    }
    if !(0..=MAX_FLOOR).contains(&floor_to_number(&location.floor)) {
        errors.push(floor_field, "floor must be between ground and 5th");
    }
    if let Some(phone) = location.contact_phone.as_deref().filter(|p| !p.trim().is_empty()) {
        check_phone(contact_field, phone, errors);
    }
}

impl StepController for LocationStep {
    const STEP: WizardStep = WizardStep::Locations;

    fn validate(&self, _store: &BookingStore) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_location(
            &self.pickup,
            "pickup",
            "pickupFloor",
            "pickupContactPhone",
            &mut errors,
        );
        check_location(
            &self.delivery,
            "delivery",
            "dropFloor",
            "dropContactPhone",
            &mut errors,
        );
        if self.extra_stops.iter().any(|s| s.address.trim().is_empty()) {
            errors.push("extraStops", "every extra stop needs an address");
        }
        errors.into_result()
    }

    fn into_updates(self, _store: &BookingStore) -> Vec<BookingUpdate> {
        vec![
            BookingUpdate::ReplacePickup(prepare(&self.pickup)),
            BookingUpdate::ReplaceDelivery(prepare(&self.delivery)),
            BookingUpdate::ExtraStops(self.extra_stops),
        ]
    }
}
