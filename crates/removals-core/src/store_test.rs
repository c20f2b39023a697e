use super::*;
use crate::booking::VanType;

fn add(store: &mut BookingStore, name: &str, quantity: u32) -> Triggers {
    store.apply(BookingUpdate::AddItem {
        name: name.to_owned(),
        quantity,
    })
}

// -----------------------------------------------------------------------
// items
// -----------------------------------------------------------------------

#[test]
fn decrementing_to_zero_removes_the_item() {
    let mut store = BookingStore::new();
    add(&mut store, "Sofa", 2);
    add(&mut store, "Chair", 1);

    store.apply(BookingUpdate::RemoveItem {
        name: "Sofa".to_owned(),
    });
    assert_eq!(store.items(), &[Item::new("Sofa", 1), Item::new("Chair", 1)]);

    store.apply(BookingUpdate::RemoveItem {
        name: "Sofa".to_owned(),
    });
    assert_eq!(store.items(), &[Item::new("Chair", 1)]);
}

#[test]
fn no_zero_quantity_item_is_ever_stored() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::Items(vec![
        Item::new("Bed", 0),
        Item::new("Desk", 1),
        Item::new("Desk", 2),
    ]));
    add(&mut store, "Lamp", 0);
    store.apply(BookingUpdate::SetItemQuantity {
        name: "Desk".to_owned(),
        quantity: 0,
    });
    store.apply(BookingUpdate::SetItemQuantity {
        name: "Mirror".to_owned(),
        quantity: 0,
    });
    assert!(store.items().iter().all(|i| i.quantity > 0));
    assert!(store.items().is_empty());
}

#[test]
fn replacing_items_folds_duplicates_in_order() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::Items(vec![
        Item::new("Desk", 1),
        Item::new("Box", 3),
        Item::new("Desk", 2),
    ]));
    assert_eq!(store.items(), &[Item::new("Desk", 3), Item::new("Box", 3)]);
}

#[test]
fn removing_unknown_item_is_a_no_op() {
    let mut store = BookingStore::new();
    add(&mut store, "Sofa", 1);
    store.apply(BookingUpdate::RemoveItem {
        name: "Piano".to_owned(),
    });
    assert_eq!(store.items().len(), 1);
}

// -----------------------------------------------------------------------
// merging
// -----------------------------------------------------------------------

#[test]
fn patches_to_different_fields_of_one_group_compose() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::Pickup(LocationPatch::address("1 High St")));
    store.apply(BookingUpdate::Pickup(LocationPatch {
        floor: Some(Floor::from("2nd floor")),
        ..LocationPatch::default()
    }));
    store.apply(BookingUpdate::Pickup(LocationPatch {
        lift_available: Some(true),
        ..LocationPatch::default()
    }));

    let pickup = store.pickup();
    assert_eq!(pickup.address, "1 High St");
    assert_eq!(pickup.floor.number(), 2);
    assert!(pickup.lift_available);
}

#[test]
fn selected_date_patch_keeps_other_fields() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::SelectedDate(SelectedDatePatch {
        date: Some("2026-11-02".to_owned()),
        pickup_time: Some(TimeValue::Hours(8.5)),
        ..SelectedDatePatch::default()
    }));
    store.apply(BookingUpdate::SelectedDate(SelectedDatePatch {
        number_of_movers: Some(3),
        ..SelectedDatePatch::default()
    }));
    let date = store.selected_date();
    assert_eq!(date.date.as_deref(), Some("2026-11-02"));
    assert_eq!(date.pickup_time, Some(TimeValue::Hours(8.5)));
    assert_eq!(date.number_of_movers, Some(3));
}

#[test]
fn replacing_a_location_clears_fields_the_new_one_leaves_unset() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::ReplacePickup(Location {
        postcode: Some("LS1 4AP".to_owned()),
        contact_phone: Some("07123456789".to_owned()),
        flat_no: Some("4".to_owned()),
        ..Location::at("1 High St, Leeds LS1 4AP, UK")
    }));

    let t = store.apply(BookingUpdate::ReplacePickup(Location::at(
        "9 Other Rd, York, UK",
    )));

    assert_eq!(store.pickup(), &Location::at("9 Other Rd, York, UK"));
    assert!(t.route);
}

// -----------------------------------------------------------------------
// extra stops
// -----------------------------------------------------------------------

#[test]
fn stops_are_appended_and_removed_by_index() {
    let mut store = BookingStore::new();
    for addr in ["A", "B", "C"] {
        store.apply(BookingUpdate::AddStop(ExtraStop {
            address: addr.to_owned(),
            ..ExtraStop::default()
        }));
    }
    store.apply(BookingUpdate::RemoveStop(1));
    let addrs: Vec<_> = store.extra_stops().iter().map(|s| s.address.as_str()).collect();
    assert_eq!(addrs, ["A", "C"]);

    let triggers = store.apply(BookingUpdate::RemoveStop(9));
    assert_eq!(store.extra_stops().len(), 2);
    assert!(!triggers.any());
}

// -----------------------------------------------------------------------
// triggers
// -----------------------------------------------------------------------

#[test]
fn address_change_triggers_price_and_route() {
    let mut store = BookingStore::new();
    let t = store.apply(BookingUpdate::Pickup(LocationPatch::address("A")));
    assert!(t.price);
    assert!(t.route);
    assert!(!t.waypoints);
}

#[test]
fn floor_change_triggers_price_only() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::Pickup(LocationPatch::address("A")));
    let t = store.apply(BookingUpdate::Pickup(LocationPatch {
        floor: Some(Floor::Number(3)),
        ..LocationPatch::default()
    }));
    assert!(t.price);
    assert!(!t.route);
}

#[test]
fn unchanged_value_triggers_nothing() {
    let mut store = BookingStore::new();
    store.apply(BookingUpdate::Van(Van::new(VanType::Medium)));
    let t = store.apply(BookingUpdate::Van(Van::new(VanType::Medium)));
    assert!(!t.any());
}

#[test]
fn mover_and_service_counts_trigger_price() {
    let mut store = BookingStore::new();
    let t = store.apply(BookingUpdate::SelectedDate(SelectedDatePatch {
        number_of_movers: Some(2),
        ..SelectedDatePatch::default()
    }));
    assert!(t.price && !t.route);

    let t = store.apply(BookingUpdate::AdditionalServices(AdditionalServicesPatch {
        dismantling: Some(vec!["Bed".to_owned()]),
        ..AdditionalServicesPatch::default()
    }));
    assert!(t.price);

    let t = store.apply(BookingUpdate::AdditionalServices(AdditionalServicesPatch {
        special_requirements: Some("Fragile".to_owned()),
        ..AdditionalServicesPatch::default()
    }));
    assert!(!t.any());
}

#[test]
fn stop_change_flags_waypoints_and_price() {
    let mut store = BookingStore::new();
    let t = store.apply(BookingUpdate::AddStop(ExtraStop {
        address: "Stop".to_owned(),
        ..ExtraStop::default()
    }));
    assert!(t.price);
    assert!(t.waypoints);
    assert!(!t.route);
}

#[test]
fn writing_derived_values_triggers_nothing() {
    let mut store = BookingStore::new();
    let t = store.apply(BookingUpdate::Journey(Journey {
        distance: Some("3.1 miles".to_owned()),
        duration: Some("12 min".to_owned()),
        route: None,
    }));
    assert!(!t.any());
    let t = store.apply(BookingUpdate::TotalPrice(Some(120.0)));
    assert!(!t.any());
}

// -----------------------------------------------------------------------
// placeholders
// -----------------------------------------------------------------------

#[test]
fn placeholder_marker_clears_on_first_update() {
    let mut store = BookingStore::with_placeholders();
    assert!(store.is_placeholder(FieldGroup::Pickup));
    assert!(store.is_placeholder(FieldGroup::Delivery));
    assert!(!store.is_placeholder(FieldGroup::Items));

    store.apply(BookingUpdate::Pickup(LocationPatch::address("A")));
    assert!(!store.is_placeholder(FieldGroup::Pickup));
    assert!(store.is_placeholder(FieldGroup::Delivery));
}

#[test]
fn empty_store_has_no_placeholders() {
    let store = BookingStore::new();
    assert!(!store.is_placeholder(FieldGroup::Pickup));
    assert!(store.total_price().is_none());
}
