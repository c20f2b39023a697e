//! The Payload Normalizer: store state in, backend request shapes out.
//!
//! Quote creation, direct booking and post-payment booking all send the
//! [`BookingPayload`] built by [`normalize_booking`]; the pricing service gets
//! a [`PricingRequest`] from [`pricing_request`]. Both use the same floor,
//! lift and extra-stop rules. Normalization never fails: absent values fall
//! back to `"NA"` (identity-like fields), `"N/A"` (type/category fields) or 0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::booking::{ExtraStop, Location};
use crate::floor::floor_to_number;
use crate::store::BookingStore;
use crate::time::TimeValue;

const NA: &str = "NA";
const N_A: &str = "N/A";

/// Canonical extra-stop shape on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStop {
    pub address: String,
    pub door_number: String,
    pub property_type: String,
    pub floor: i64,
    pub lift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingLocation {
    pub location: String,
    pub floor: i64,
    pub lift: bool,
}

/// Body of `POST /price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub pickup_location: PricingLocation,
    pub drop_location: PricingLocation,
    pub van_type: String,
    pub worker: u32,
    pub items_to_dismantle: usize,
    pub items_to_assemble: usize,
    pub stoppage: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadLocation {
    pub location: String,
    pub postcode: String,
    pub flat_no: String,
    pub floor: i64,
    pub lift: bool,
    pub property_type: String,
    pub contact_name: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadItems {
    pub name: Vec<String>,
    pub quantity: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadDetails {
    pub items: PayloadItems,
    pub dismantle: Vec<String>,
    pub reassemble: Vec<String>,
    pub special_requirements: String,
    pub basic_compensation: bool,
    pub comprehensive_insurance: bool,
    pub piano_type: String,
    pub motor_bike: String,
}

/// Body of `POST /quote` and `POST /new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub is_business_customer: bool,
    pub pickup_location: PayloadLocation,
    pub drop_location: PayloadLocation,
    pub stoppage: Vec<NormalizedStop>,
    pub van_type: String,
    pub worker: u32,
    pub items_to_dismantle: usize,
    pub items_to_assemble: usize,
    pub pickup_date: String,
    pub pickup_time: String,
    pub drop_time: String,
    pub price: f64,
    pub distance: f64,
    pub duration: String,
    pub route: String,
    pub quotation_ref: String,
    pub details: PayloadDetails,
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn opt_or_default(value: Option<&str>, default: &str) -> String {
    or_default(value.unwrap_or_default(), default)
}

/// Canonical form of one extra stop. Applying it to its own output is a no-op.
#[must_use]
pub fn normalize_extra_stop(stop: &ExtraStop) -> NormalizedStop {
    NormalizedStop {
        address: stop.address.trim().to_owned(),
        door_number: stop.door_flat_no.trim().to_owned(),
        property_type: stop.property_type.trim().to_owned(),
        floor: floor_to_number(&stop.floor),
        lift: stop.lift_available,
    }
}

fn pricing_location(location: &Location) -> PricingLocation {
    PricingLocation {
        location: or_default(&location.address, N_A),
        floor: floor_to_number(&location.floor),
        lift: location.lift_available,
    }
}

fn payload_location(location: &Location) -> PayloadLocation {
    PayloadLocation {
        location: or_default(&location.address, N_A),
        postcode: opt_or_default(location.postcode.as_deref(), NA),
        flat_no: opt_or_default(location.flat_no.as_deref(), NA),
        floor: floor_to_number(&location.floor),
        lift: location.lift_available,
        property_type: or_default(&location.property_type, N_A),
        contact_name: opt_or_default(location.contact_name.as_deref(), NA),
        contact_phone: opt_or_default(location.contact_phone.as_deref(), NA),
    }
}

fn van_type(store: &BookingStore) -> String {
    opt_or_default(store.van().map(|v| v.van_type.as_str()), N_A)
}

/// Builds the `POST /price` body from the current store.
#[must_use]
pub fn pricing_request(store: &BookingStore) -> PricingRequest {
    let services = store.additional_services();
    PricingRequest {
        pickup_location: pricing_location(store.pickup()),
        drop_location: pricing_location(store.delivery()),
        van_type: van_type(store),
        worker: store.selected_date().number_of_movers.unwrap_or(0),
        items_to_dismantle: services.dismantling.len(),
        items_to_assemble: services.reassembly.len(),
        stoppage: store
            .extra_stops()
            .iter()
            .map(|s| s.address.trim().to_owned())
            .filter(|a| !a.is_empty())
            .collect(),
    }
}

/// Builds the quote/booking body from the current store.
#[must_use]
pub fn normalize_booking(store: &BookingStore) -> BookingPayload {
    let customer = store.customer_details();
    let services = store.additional_services();
    let date = store.selected_date();
    let journey = store.journey();

    let pickup_date = match (date.move_date(), date.date.as_deref()) {
        (Some(d), _) => d.format("%Y-%m-%d").to_string(),
        (None, raw) => opt_or_default(raw, NA),
    };

    let (names, quantities) = store
        .items()
        .iter()
        .map(|i| (i.name.clone(), i.quantity))
        .unzip();

    BookingPayload {
        username: or_default(&customer.name, NA),
        email: or_default(&customer.email, NA),
        phone_number: or_default(&customer.phone, NA),
        is_business_customer: customer.is_business_customer,
        pickup_location: payload_location(store.pickup()),
        drop_location: payload_location(store.delivery()),
        stoppage: store.extra_stops().iter().map(normalize_extra_stop).collect(),
        van_type: van_type(store),
        worker: date.number_of_movers.unwrap_or(0),
        items_to_dismantle: services.dismantling.len(),
        items_to_assemble: services.reassembly.len(),
        pickup_date,
        pickup_time: date
            .pickup_time
            .as_ref()
            .map_or_else(|| NA.to_owned(), TimeValue::to_wire),
        drop_time: date
            .drop_time
            .as_ref()
            .map_or_else(|| NA.to_owned(), TimeValue::to_wire),
        price: store.total_price().or(date.price).unwrap_or(0.0),
        distance: journey.distance_value(),
        duration: opt_or_default(journey.duration.as_deref(), NA),
        route: opt_or_default(journey.route.as_deref(), NA),
        quotation_ref: opt_or_default(store.quote_ref(), NA),
        details: PayloadDetails {
            items: PayloadItems {
                name: names,
                quantity: quantities,
            },
            dismantle: services.dismantling.clone(),
            reassemble: services.reassembly.clone(),
            special_requirements: or_default(&services.special_requirements, NA),
            basic_compensation: services.basic_compensation,
            comprehensive_insurance: services.comprehensive_insurance,
            piano_type: opt_or_default(store.piano(), N_A),
            motor_bike: opt_or_default(store.motor_bike(), N_A),
        },
    }
}

/// Metadata keys shared by checkout-session creation and reconciliation.
pub mod metadata_keys {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const IS_BUSINESS: &str = "isBusinessCustomer";
    pub const PICKUP_ADDRESS: &str = "pickupAddress";
    pub const PICKUP_POSTCODE: &str = "pickupPostcode";
    pub const PICKUP_CITY: &str = "pickupCity";
    pub const PICKUP_FLAT_NO: &str = "pickupFlatNo";
    pub const PICKUP_FLOOR: &str = "pickupFloor";
    pub const PICKUP_LIFT: &str = "pickupLift";
    pub const PICKUP_PROPERTY_TYPE: &str = "pickupPropertyType";
    pub const DROP_ADDRESS: &str = "dropAddress";
    pub const DROP_POSTCODE: &str = "dropPostcode";
    pub const DROP_CITY: &str = "dropCity";
    pub const DROP_FLAT_NO: &str = "dropFlatNo";
    pub const DROP_FLOOR: &str = "dropFloor";
    pub const DROP_LIFT: &str = "dropLift";
    pub const DROP_PROPERTY_TYPE: &str = "dropPropertyType";
    pub const ITEMS: &str = "items";
    pub const EXTRA_STOPS: &str = "extraStops";
    pub const DATE: &str = "date";
    pub const PICKUP_TIME: &str = "pickupTime";
    pub const DROP_TIME: &str = "dropTime";
    pub const WORKERS: &str = "workers";
    pub const VAN_TYPE: &str = "vanType";
    pub const PIANO_TYPE: &str = "pianoType";
    pub const MOTOR_BIKE: &str = "motorBike";
    pub const DISMANTLE_ITEMS: &str = "dismantleItems";
    pub const ASSEMBLE_ITEMS: &str = "assembleItems";
    pub const ITEMS_TO_DISMANTLE: &str = "itemsToDismantle";
    pub const ITEMS_TO_ASSEMBLE: &str = "itemsToAssemble";
    pub const SPECIAL_REQUIREMENTS: &str = "specialRequirements";
    pub const BASIC_COMPENSATION: &str = "basicCompensation";
    pub const COMPREHENSIVE_INSURANCE: &str = "comprehensiveInsurance";
    pub const TOTAL_PRICE: &str = "totalPrice";
    pub const DISTANCE: &str = "distance";
    pub const DURATION: &str = "duration";
    pub const ROUTE: &str = "route";
    pub const QUOTE_REF: &str = "quoteRef";
}

/// Flat string map sent with `POST /create-checkout-session`.
///
/// Absent values are omitted rather than defaulted so that reconciliation can
/// tell "not sent" from a real value. Lists are JSON-encoded.
#[must_use]
pub fn checkout_metadata(store: &BookingStore) -> BTreeMap<String, String> {
    use metadata_keys as k;

    let mut meta = BTreeMap::new();
    let mut put = |key: &str, value: String| {
        if !value.trim().is_empty() {
            meta.insert(key.to_owned(), value);
        }
    };

    let customer = store.customer_details();
    put(k::NAME, customer.name.clone());
    put(k::EMAIL, customer.email.clone());
    put(k::PHONE, customer.phone.clone());
    put(k::IS_BUSINESS, customer.is_business_customer.to_string());

    for (loc, keys) in [
        (
            store.pickup(),
            [
                k::PICKUP_ADDRESS,
                k::PICKUP_POSTCODE,
                k::PICKUP_CITY,
                k::PICKUP_FLAT_NO,
                k::PICKUP_FLOOR,
                k::PICKUP_LIFT,
                k::PICKUP_PROPERTY_TYPE,
            ],
        ),
        (
            store.delivery(),
            [
                k::DROP_ADDRESS,
                k::DROP_POSTCODE,
                k::DROP_CITY,
                k::DROP_FLAT_NO,
                k::DROP_FLOOR,
                k::DROP_LIFT,
                k::DROP_PROPERTY_TYPE,
            ],
        ),
    ] {
        let [address, postcode, city, flat_no, floor, lift, property_type] = keys;
        put(address, loc.address.clone());
        put(postcode, loc.postcode.clone().unwrap_or_default());
        put(city, loc.city.clone().unwrap_or_default());
        put(flat_no, loc.flat_no.clone().unwrap_or_default());
        put(floor, floor_to_number(&loc.floor).to_string());
        put(lift, loc.lift_available.to_string());
        put(property_type, loc.property_type.clone());
    }

    put(k::ITEMS, to_json(store.items()));
    put(
        k::EXTRA_STOPS,
        to_json(
            &store
                .extra_stops()
                .iter()
                .map(normalize_extra_stop)
                .collect::<Vec<_>>(),
        ),
    );

    let date = store.selected_date();
    put(k::DATE, date.date.clone().unwrap_or_default());
    put(
        k::PICKUP_TIME,
        date.pickup_time.as_ref().map(TimeValue::to_wire).unwrap_or_default(),
    );
    put(
        k::DROP_TIME,
        date.drop_time.as_ref().map(TimeValue::to_wire).unwrap_or_default(),
    );
    put(
        k::WORKERS,
        date.number_of_movers.map(|n| n.to_string()).unwrap_or_default(),
    );

    put(
        k::VAN_TYPE,
        store
            .van()
            .map(|v| v.van_type.as_str().to_owned())
            .unwrap_or_default(),
    );
    put(k::PIANO_TYPE, store.piano().unwrap_or_default().to_owned());
    put(k::MOTOR_BIKE, store.motor_bike().unwrap_or_default().to_owned());

    let services = store.additional_services();
    put(k::DISMANTLE_ITEMS, to_json(&services.dismantling));
    put(k::ASSEMBLE_ITEMS, to_json(&services.reassembly));
    put(k::ITEMS_TO_DISMANTLE, services.dismantling.len().to_string());
    put(k::ITEMS_TO_ASSEMBLE, services.reassembly.len().to_string());
    put(k::SPECIAL_REQUIREMENTS, services.special_requirements.clone());
    put(k::BASIC_COMPENSATION, services.basic_compensation.to_string());
    put(
        k::COMPREHENSIVE_INSURANCE,
        services.comprehensive_insurance.to_string(),
    );

    put(
        k::TOTAL_PRICE,
        store
            .total_price()
            .or(date.price)
            .map(|p| p.to_string())
            .unwrap_or_default(),
    );
    let journey = store.journey();
    put(k::DISTANCE, journey.distance.clone().unwrap_or_default());
    put(k::DURATION, journey.duration.clone().unwrap_or_default());
    put(k::ROUTE, journey.route.clone().unwrap_or_default());
    put(k::QUOTE_REF, store.quote_ref().unwrap_or_default().to_owned());

    meta
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to encode checkout metadata value");
        String::new()
    })
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
