//! The Booking Store: the one mutable record a wizard session owns.
//!
//! All writes go through [`BookingStore::apply`]. Object-valued groups take a
//! patch whose `Some` fields overwrite and whose `None` fields keep the
//! current value, so two updates to different fields of the same group
//! compose instead of clobbering each other. `apply` reports which
//! derivations the change invalidated.

use std::collections::BTreeSet;

use crate::booking::{
    AdditionalServices, CustomerDetails, ExtraStop, Item, Journey, Location, SelectedDate, Van,
    VanType,
};
use crate::floor::Floor;
use crate::time::TimeValue;

/// Field groups of the store, one per [`BookingUpdate`] target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldGroup {
    Pickup,
    Delivery,
    Items,
    ExtraStops,
    SelectedDate,
    Van,
    MotorBike,
    Piano,
    CustomerDetails,
    AdditionalServices,
    Journey,
    TotalPrice,
    QuoteRef,
    BookingRef,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub flat_no: Option<String>,
    pub floor: Option<Floor>,
    pub lift_available: Option<bool>,
    pub property_type: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

impl LocationPatch {
    #[must_use]
    pub fn address(address: &str) -> Self {
        Self {
            address: Some(address.to_owned()),
            ..Self::default()
        }
    }

    fn merge_into(self, target: &mut Location) {
        merge(&mut target.address, self.address);
        merge_opt(&mut target.postcode, self.postcode);
        merge_opt(&mut target.address_line1, self.address_line1);
        merge_opt(&mut target.address_line2, self.address_line2);
        merge_opt(&mut target.city, self.city);
        merge_opt(&mut target.country, self.country);
        merge_opt(&mut target.flat_no, self.flat_no);
        merge(&mut target.floor, self.floor);
        merge(&mut target.lift_available, self.lift_available);
        merge(&mut target.property_type, self.property_type);
        merge_opt(&mut target.contact_name, self.contact_name);
        merge_opt(&mut target.contact_phone, self.contact_phone);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedDatePatch {
    pub date: Option<String>,
    pub pickup_time: Option<TimeValue>,
    pub drop_time: Option<TimeValue>,
    pub number_of_movers: Option<u32>,
    pub price: Option<f64>,
}

impl SelectedDatePatch {
    fn merge_into(self, target: &mut SelectedDate) {
        merge_opt(&mut target.date, self.date);
        merge_opt(&mut target.pickup_time, self.pickup_time);
        merge_opt(&mut target.drop_time, self.drop_time);
        merge_opt(&mut target.number_of_movers, self.number_of_movers);
        merge_opt(&mut target.price, self.price);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetailsPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_business_customer: Option<bool>,
}

impl CustomerDetailsPatch {
    fn merge_into(self, target: &mut CustomerDetails) {
        merge(&mut target.name, self.name);
        merge(&mut target.email, self.email);
        merge(&mut target.phone, self.phone);
        merge(&mut target.is_business_customer, self.is_business_customer);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalServicesPatch {
    pub basic_compensation: Option<bool>,
    pub comprehensive_insurance: Option<bool>,
    pub dismantling: Option<Vec<String>>,
    pub reassembly: Option<Vec<String>>,
    pub special_requirements: Option<String>,
}

impl AdditionalServicesPatch {
    fn merge_into(self, target: &mut AdditionalServices) {
        merge(&mut target.basic_compensation, self.basic_compensation);
        merge(&mut target.comprehensive_insurance, self.comprehensive_insurance);
        merge(&mut target.dismantling, self.dismantling);
        merge(&mut target.reassembly, self.reassembly);
        merge(&mut target.special_requirements, self.special_requirements);
    }
}

fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn merge_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// One write to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingUpdate {
    Pickup(LocationPatch),
    Delivery(LocationPatch),
    /// Overwrites the whole pickup, clearing fields `location` leaves unset.
    ReplacePickup(Location),
    ReplaceDelivery(Location),
    /// Replaces the item list. Zero-quantity entries are dropped and duplicate
    /// names are folded into the first occurrence.
    Items(Vec<Item>),
    AddItem { name: String, quantity: u32 },
    /// Takes one unit off an item; the item is removed when it reaches zero.
    RemoveItem { name: String },
    SetItemQuantity { name: String, quantity: u32 },
    ExtraStops(Vec<ExtraStop>),
    AddStop(ExtraStop),
    RemoveStop(usize),
    SelectedDate(SelectedDatePatch),
    Van(Van),
    MotorBike(Option<String>),
    Piano(Option<String>),
    CustomerDetails(CustomerDetailsPatch),
    AdditionalServices(AdditionalServicesPatch),
    Journey(Journey),
    TotalPrice(Option<f64>),
    QuoteRef(String),
    BookingRef(String),
}

impl BookingUpdate {
    #[must_use]
    pub fn group(&self) -> FieldGroup {
        match self {
            BookingUpdate::Pickup(_) | BookingUpdate::ReplacePickup(_) => FieldGroup::Pickup,
            BookingUpdate::Delivery(_) | BookingUpdate::ReplaceDelivery(_) => {
                FieldGroup::Delivery
            }
            BookingUpdate::Items(_)
            | BookingUpdate::AddItem { .. }
            | BookingUpdate::RemoveItem { .. }
            | BookingUpdate::SetItemQuantity { .. } => FieldGroup::Items,
            BookingUpdate::ExtraStops(_)
            | BookingUpdate::AddStop(_)
            | BookingUpdate::RemoveStop(_) => FieldGroup::ExtraStops,
            BookingUpdate::SelectedDate(_) => FieldGroup::SelectedDate,
            BookingUpdate::Van(_) => FieldGroup::Van,
            BookingUpdate::MotorBike(_) => FieldGroup::MotorBike,
            BookingUpdate::Piano(_) => FieldGroup::Piano,
            BookingUpdate::CustomerDetails(_) => FieldGroup::CustomerDetails,
            BookingUpdate::AdditionalServices(_) => FieldGroup::AdditionalServices,
            BookingUpdate::Journey(_) => FieldGroup::Journey,
            BookingUpdate::TotalPrice(_) => FieldGroup::TotalPrice,
            BookingUpdate::QuoteRef(_) => FieldGroup::QuoteRef,
            BookingUpdate::BookingRef(_) => FieldGroup::BookingRef,
        }
    }
}

/// Derivations invalidated by an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    /// Price inputs changed.
    pub price: bool,
    /// Pickup or delivery address changed.
    pub route: bool,
    /// Extra stops changed; only routing strategies that draw waypoints care.
    pub waypoints: bool,
}

impl Triggers {
    #[must_use]
    pub fn any(self) -> bool {
        self.price || self.route || self.waypoints
    }

    #[must_use]
    pub fn union(self, other: Triggers) -> Triggers {
        Triggers {
            price: self.price || other.price,
            route: self.route || other.route,
            waypoints: self.waypoints || other.waypoints,
        }
    }

    /// Every derivation, for a freshly loaded store.
    #[must_use]
    pub fn all() -> Triggers {
        Triggers {
            price: true,
            route: true,
            waypoints: true,
        }
    }
}

/// Snapshot of the fields derivations depend on.
#[derive(PartialEq)]
struct DerivationInputs {
    pickup: Location,
    delivery: Location,
    van_type: Option<VanType>,
    movers: Option<u32>,
    dismantle_count: usize,
    assemble_count: usize,
    stops: Vec<ExtraStop>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    pickup: Location,
    delivery: Location,
    items: Vec<Item>,
    extra_stops: Vec<ExtraStop>,
    selected_date: SelectedDate,
    van: Option<Van>,
    motor_bike: Option<String>,
    piano: Option<String>,
    customer_details: CustomerDetails,
    additional_services: AdditionalServices,
    journey: Journey,
    total_price: Option<f64>,
    quote_ref: Option<String>,
    booking_ref: Option<String>,
    placeholders: BTreeSet<FieldGroup>,
}

impl BookingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with demo values.
    ///
    /// Seeded groups report [`BookingStore::is_placeholder`] until their first
    /// update; step validation treats placeholder addresses as missing.
    #[must_use]
    pub fn with_placeholders() -> Self {
        let mut store = Self {
            pickup: Location::at("10 Downing Street, London SW1A 2AA, UK"),
            delivery: Location::at("1 Piccadilly, Manchester M1 1RG, UK"),
            selected_date: SelectedDate {
                date: Some(chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()),
                pickup_time: Some(TimeValue::Hours(8.0)),
                drop_time: Some(TimeValue::Hours(12.0)),
                number_of_movers: Some(1),
                price: Some(0.0),
            },
            total_price: Some(0.0),
            ..Self::default()
        };
        store.placeholders.extend([
            FieldGroup::Pickup,
            FieldGroup::Delivery,
            FieldGroup::SelectedDate,
            FieldGroup::TotalPrice,
        ]);
        store
    }

    #[must_use]
    pub fn is_placeholder(&self, group: FieldGroup) -> bool {
        self.placeholders.contains(&group)
    }

    #[must_use]
    pub fn pickup(&self) -> &Location {
        &self.pickup
    }

    #[must_use]
    pub fn delivery(&self) -> &Location {
        &self.delivery
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn extra_stops(&self) -> &[ExtraStop] {
        &self.extra_stops
    }

    #[must_use]
    pub fn selected_date(&self) -> &SelectedDate {
        &self.selected_date
    }

    #[must_use]
    pub fn van(&self) -> Option<&Van> {
        self.van.as_ref()
    }

    #[must_use]
    pub fn motor_bike(&self) -> Option<&str> {
        self.motor_bike.as_deref()
    }

    #[must_use]
    pub fn piano(&self) -> Option<&str> {
        self.piano.as_deref()
    }

    #[must_use]
    pub fn customer_details(&self) -> &CustomerDetails {
        &self.customer_details
    }

    #[must_use]
    pub fn additional_services(&self) -> &AdditionalServices {
        &self.additional_services
    }

    #[must_use]
    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    #[must_use]
    pub fn total_price(&self) -> Option<f64> {
        self.total_price
    }

    #[must_use]
    pub fn quote_ref(&self) -> Option<&str> {
        self.quote_ref.as_deref()
    }

    #[must_use]
    pub fn booking_ref(&self) -> Option<&str> {
        self.booking_ref.as_deref()
    }

    /// Applies one update and returns the derivations it invalidated.
    pub fn apply(&mut self, update: BookingUpdate) -> Triggers {
        let before = self.derivation_inputs();
        let group = update.group();

        match update {
            BookingUpdate::Pickup(patch) => patch.merge_into(&mut self.pickup),
            BookingUpdate::Delivery(patch) => patch.merge_into(&mut self.delivery),
            BookingUpdate::ReplacePickup(location) => self.pickup = location,
            BookingUpdate::ReplaceDelivery(location) => self.delivery = location,
            BookingUpdate::Items(items) => self.items = fold_items(items),
            BookingUpdate::AddItem { name, quantity } => self.add_item(name, quantity),
            BookingUpdate::RemoveItem { name } => self.remove_one(&name),
            BookingUpdate::SetItemQuantity { name, quantity } => {
                self.set_item_quantity(name, quantity);
            }
            BookingUpdate::ExtraStops(stops) => self.extra_stops = stops,
            BookingUpdate::AddStop(stop) => self.extra_stops.push(stop),
            BookingUpdate::RemoveStop(index) => {
                if index < self.extra_stops.len() {
                    self.extra_stops.remove(index);
                } else {
                    tracing::warn!(
                        index,
                        len = self.extra_stops.len(),
                        "ignoring removal of non-existent extra stop"
                    );
                }
            }
            BookingUpdate::SelectedDate(patch) => patch.merge_into(&mut self.selected_date),
            BookingUpdate::Van(van) => self.van = Some(van),
            BookingUpdate::MotorBike(kind) => self.motor_bike = kind,
            BookingUpdate::Piano(kind) => self.piano = kind,
            BookingUpdate::CustomerDetails(patch) => patch.merge_into(&mut self.customer_details),
            BookingUpdate::AdditionalServices(patch) => {
                patch.merge_into(&mut self.additional_services);
            }
            BookingUpdate::Journey(journey) => self.journey = journey,
            BookingUpdate::TotalPrice(price) => self.total_price = price,
            BookingUpdate::QuoteRef(r) => self.quote_ref = Some(r),
            BookingUpdate::BookingRef(r) => self.booking_ref = Some(r),
        }

        self.placeholders.remove(&group);
        let after = self.derivation_inputs();
        diff(&before, &after)
    }

    fn add_item(&mut self, name: String, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.name == name) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(Item { name, quantity }),
        }
    }

    fn remove_one(&mut self, name: &str) {
        if let Some(idx) = self.items.iter().position(|i| i.name == name) {
            if self.items[idx].quantity <= 1 {
                self.items.remove(idx);
            } else {
                self.items[idx].quantity -= 1;
            }
        }
    }

    fn set_item_quantity(&mut self, name: String, quantity: u32) {
        let existing = self.items.iter().position(|i| i.name == name);
        match (existing, quantity) {
            (Some(idx), 0) => {
                self.items.remove(idx);
            }
            (Some(idx), q) => self.items[idx].quantity = q,
            (None, 0) => {}
            (None, q) => self.items.push(Item { name, quantity: q }),
        }
    }

    fn derivation_inputs(&self) -> DerivationInputs {
        DerivationInputs {
            pickup: self.pickup.clone(),
            delivery: self.delivery.clone(),
            van_type: self.van.as_ref().map(|v| v.van_type.clone()),
            movers: self.selected_date.number_of_movers,
            dismantle_count: self.additional_services.dismantling.len(),
            assemble_count: self.additional_services.reassembly.len(),
            stops: self.extra_stops.clone(),
        }
    }
}

fn diff(before: &DerivationInputs, after: &DerivationInputs) -> Triggers {
    let stops_changed = before.stops != after.stops;
    Triggers {
        price: before != after,
        route: before.pickup.address != after.pickup.address
            || before.delivery.address != after.delivery.address,
        waypoints: stops_changed,
    }
}

fn fold_items(items: Vec<Item>) -> Vec<Item> {
    let mut folded: Vec<Item> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|i| i.quantity > 0) {
        match folded.iter_mut().find(|f| f.name == item.name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => folded.push(item),
        }
    }
    folded
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
