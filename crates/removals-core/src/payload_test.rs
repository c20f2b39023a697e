use super::*;
use crate::booking::{ExtraStop, Item, Journey, Van, VanType};
use crate::floor::Floor;
use crate::store::{
    AdditionalServicesPatch, BookingUpdate, CustomerDetailsPatch, LocationPatch,
    SelectedDatePatch,
};
use crate::time::TimeValue;

fn populated_store() -> BookingStore {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::Pickup(LocationPatch {
        address: Some("1 High St, Leeds LS1 4AP, UK".to_owned()),
        postcode: Some("LS1 4AP".to_owned()),
        floor: Some(Floor::from("2nd floor")),
        lift_available: Some(true),
        property_type: Some("Flat".to_owned()),
        ..LocationPatch::default()
    }));
    store.apply(BookingUpdate::Delivery(LocationPatch::address(
        "9 Low Rd, York YO1 7HH, UK",
    )));
    store.apply(BookingUpdate::Items(vec![
        Item::new("Sofa", 1),
        Item::new("Box", 10),
    ]));
    store.apply(BookingUpdate::AddStop(ExtraStop {
        address: "Stop 1".to_owned(),
        door_flat_no: "3".to_owned(),
        property_type: "House".to_owned(),
        floor: Floor::from("1st floor"),
        lift_available: false,
    }));
    store.apply(BookingUpdate::Van(Van::new(VanType::Luton)));
    store.apply(BookingUpdate::SelectedDate(SelectedDatePatch {
        date: Some("2026-11-02".to_owned()),
        pickup_time: Some(TimeValue::Hours(8.5)),
        drop_time: Some(TimeValue::Hours(13.0)),
        number_of_movers: Some(2),
        price: Some(180.0),
    }));
    store.apply(BookingUpdate::CustomerDetails(CustomerDetailsPatch {
        name: Some("Sam Carter".to_owned()),
        email: Some("sam@example.com".to_owned()),
        phone: Some("07123456789".to_owned()),
        is_business_customer: Some(false),
    }));
    store.apply(BookingUpdate::AdditionalServices(AdditionalServicesPatch {
        dismantling: Some(vec!["Bed".to_owned()]),
        reassembly: Some(vec!["Bed".to_owned(), "Wardrobe".to_owned()]),
        ..AdditionalServicesPatch::default()
    }));
    store.apply(BookingUpdate::Journey(Journey {
        distance: Some("24.6 miles".to_owned()),
        duration: Some("1 hr 5 min".to_owned()),
        route: Some("1 High St → Stop 1 → 9 Low Rd".to_owned()),
    }));
    store.apply(BookingUpdate::TotalPrice(Some(199.0)));
    store
}

// -----------------------------------------------------------------------
// defaults
// -----------------------------------------------------------------------

#[test]
fn empty_store_produces_default_payload() {
    let payload = normalize_booking(&BookingStore::new());
    assert_eq!(payload.username, "NA");
    assert_eq!(payload.email, "NA");
    assert_eq!(payload.phone_number, "NA");
    assert_eq!(payload.van_type, "N/A");
    assert_eq!(payload.pickup_location.location, "N/A");
    assert_eq!(payload.pickup_date, "NA");
    assert_eq!(payload.pickup_time, "NA");
    assert_eq!(payload.route, "NA");
    assert!(payload.distance.abs() < f64::EPSILON);
    assert!(payload.price.abs() < f64::EPSILON);
    assert_eq!(payload.items_to_dismantle, 0);
    assert_eq!(payload.items_to_assemble, 0);
    assert!(payload.stoppage.is_empty());
    assert!(payload.details.items.name.is_empty());
    assert!(payload.details.items.quantity.is_empty());
}

#[test]
fn empty_store_serializes_empty_arrays() {
    let json = serde_json::to_value(normalize_booking(&BookingStore::new())).unwrap();
    assert_eq!(json["stoppage"], serde_json::json!([]));
    assert_eq!(json["details"]["items"]["name"], serde_json::json!([]));
    assert_eq!(json["details"]["items"]["quantity"], serde_json::json!([]));
    assert_eq!(json["vanType"], "N/A");
    assert_eq!(json["username"], "NA");
}

// -----------------------------------------------------------------------
// populated
// -----------------------------------------------------------------------

#[test]
fn populated_store_maps_every_group() {
    let payload = normalize_booking(&populated_store());
    assert_eq!(payload.username, "Sam Carter");
    assert_eq!(payload.pickup_location.floor, 2);
    assert!(payload.pickup_location.lift);
    assert_eq!(payload.pickup_location.postcode, "LS1 4AP");
    assert_eq!(payload.drop_location.floor, 0);
    assert_eq!(payload.van_type, "Luton");
    assert_eq!(payload.worker, 2);
    assert_eq!(payload.pickup_date, "2026-11-02");
    assert_eq!(payload.pickup_time, "08:30:00");
    assert_eq!(payload.drop_time, "13:00:00");
    assert!((payload.price - 199.0).abs() < f64::EPSILON);
    assert!((payload.distance - 24.6).abs() < f64::EPSILON);
    assert_eq!(payload.items_to_dismantle, 1);
    assert_eq!(payload.items_to_assemble, 2);
    assert_eq!(payload.details.items.name, ["Sofa", "Box"]);
    assert_eq!(payload.details.items.quantity, [1, 10]);
    assert_eq!(
        payload.stoppage,
        [NormalizedStop {
            address: "Stop 1".to_owned(),
            door_number: "3".to_owned(),
            property_type: "House".to_owned(),
            floor: 1,
            lift: false,
        }]
    );
}

#[test]
fn price_falls_back_to_selected_slot_price() {
    let mut store = populated_store();
    store.apply(BookingUpdate::TotalPrice(None));
    let payload = normalize_booking(&store);
    assert!((payload.price - 180.0).abs() < f64::EPSILON);
}

#[test]
fn normalizing_twice_gives_equal_payloads() {
    let store = populated_store();
    assert_eq!(normalize_booking(&store), normalize_booking(&store.clone()));
}

// -----------------------------------------------------------------------
// pricing request
// -----------------------------------------------------------------------

#[test]
fn pricing_request_matches_wire_shape() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::Pickup(LocationPatch::address("A")));
    store.apply(BookingUpdate::Delivery(LocationPatch::address("B")));
    store.apply(BookingUpdate::Van(Van::new(VanType::Medium)));
    store.apply(BookingUpdate::SelectedDate(SelectedDatePatch {
        number_of_movers: Some(2),
        ..SelectedDatePatch::default()
    }));
    store.apply(BookingUpdate::AddItem {
        name: "Sofa".to_owned(),
        quantity: 1,
    });

    let json = serde_json::to_value(pricing_request(&store)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "pickupLocation": { "location": "A", "floor": 0, "lift": false },
            "dropLocation": { "location": "B", "floor": 0, "lift": false },
            "vanType": "Medium",
            "worker": 2,
            "itemsToDismantle": 0,
            "itemsToAssemble": 0,
            "stoppage": []
        })
    );
}

#[test]
fn pricing_request_lists_stop_addresses_in_order() {
    let store = populated_store();
    let req = pricing_request(&store);
    assert_eq!(req.stoppage, ["Stop 1"]);
    assert_eq!(req.pickup_location.floor, 2);
    assert!(req.pickup_location.lift);
}

// -----------------------------------------------------------------------
// extra stops
// -----------------------------------------------------------------------

#[test]
fn extra_stop_normalization_is_a_fixed_point() {
    let raw: ExtraStop = serde_json::from_value(serde_json::json!({
        "address": " 4 Side St ",
        "liftAvailable": "true",
        "floor": "3rd floor"
    }))
    .unwrap();

    let once = normalize_extra_stop(&raw);
    assert_eq!(once.door_number, "");
    assert!(once.lift);
    assert_eq!(once.floor, 3);

    let reparsed: ExtraStop = serde_json::from_value(serde_json::to_value(&once).unwrap()).unwrap();
    let twice = normalize_extra_stop(&reparsed);
    assert_eq!(once, twice);
}

// -----------------------------------------------------------------------
// checkout metadata
// -----------------------------------------------------------------------

#[test]
fn formatted_times_reach_the_payload_unchanged() {
    let mut store = populated_store();
    store.apply(BookingUpdate::SelectedDate(SelectedDatePatch {
        pickup_time: Some(TimeValue::Formatted("09:15:00".to_owned())),
        drop_time: Some(TimeValue::Formatted("13:45:30".to_owned())),
        ..SelectedDatePatch::default()
    }));

    let payload = normalize_booking(&store);
    assert_eq!(payload.pickup_time, "09:15:00");
    assert_eq!(payload.drop_time, "13:45:30");

    let meta = checkout_metadata(&store);
    assert_eq!(meta[metadata_keys::PICKUP_TIME], "09:15:00");
    assert_eq!(meta[metadata_keys::DROP_TIME], "13:45:30");
}

#[test]
fn checkout_metadata_is_flat_strings() {
    let meta = checkout_metadata(&populated_store());
    assert_eq!(meta["name"], "Sam Carter");
    assert_eq!(meta["pickupFloor"], "2");
    assert_eq!(meta["pickupLift"], "true");
    assert_eq!(meta["pickupTime"], "08:30:00");
    assert_eq!(meta["workers"], "2");
    assert_eq!(meta["vanType"], "Luton");
    assert_eq!(meta["totalPrice"], "199");
    assert_eq!(meta["itemsToAssemble"], "2");

    let items: Vec<Item> = serde_json::from_str(&meta["items"]).unwrap();
    assert_eq!(items, [Item::new("Sofa", 1), Item::new("Box", 10)]);
    let stops: Vec<NormalizedStop> = serde_json::from_str(&meta["extraStops"]).unwrap();
    assert_eq!(stops[0].door_number, "3");
}

#[test]
fn checkout_metadata_omits_absent_values() {
    let meta = checkout_metadata(&BookingStore::new());
    assert!(!meta.contains_key("name"));
    assert!(!meta.contains_key("vanType"));
    assert!(!meta.contains_key("totalPrice"));
    assert!(!meta.contains_key("quoteRef"));
}
