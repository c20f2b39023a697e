//! Payment reconciliation after the checkout redirect.
//!
//! The checkout session's metadata is the source of truth: it is written
//! back into the store, the booking payload is built from the result and
//! submitted once. A reconciler instance never submits twice.

use std::collections::BTreeMap;
use std::sync::Arc;

use removals_api::RemovalsClient;
use removals_core::booking::parse_flag;
use removals_core::payload::metadata_keys as keys;
use removals_core::{
    normalize_booking, time_to_hour, AdditionalServicesPatch, BookingStore, BookingUpdate,
    CustomerDetailsPatch, ExtraStop, Floor, Item, Journey, LocationPatch, SelectedDatePatch,
    TimeValue, Van, VanType,
};
use reqwest::Url;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileState {
    AwaitingRedirectReturn,
    FetchingSession,
    RehydratingStore,
    SubmittingBooking,
    Confirmed { booking_ref: String },
    Failed { reason: String },
}

/// Where the customer goes once reconciliation finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Confirmation { booking_ref: String },
    Failure { reason: String },
}

pub struct PaymentReconciler {
    client: Arc<RemovalsClient>,
    handled: bool,
    state: ReconcileState,
}

/// The `session_id` query parameter of a return URL. Relative URLs are
/// accepted.
#[must_use]
pub fn session_id_from_url(return_url: &str) -> Option<String> {
    let parsed = Url::parse(return_url).or_else(|_| {
        Url::parse("http://localhost/").and_then(|base| base.join(return_url))
    });
    let url = parsed.ok()?;
    url.query_pairs()
        .find(|(k, v)| k == "session_id" && !v.trim().is_empty())
        .map(|(_, v)| v.into_owned())
}

impl PaymentReconciler {
    #[must_use]
    pub fn new(client: Arc<RemovalsClient>) -> Self {
        Self {
            client,
            handled: false,
            state: ReconcileState::AwaitingRedirectReturn,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ReconcileState {
        &self.state
    }

    /// Runs the fetch, rehydrate and submit sequence. Returns `None` on any
    /// call after the first.
    pub async fn run(&mut self, store: &mut BookingStore, return_url: &str) -> Option<Navigation> {
        if self.handled {
            tracing::debug!("payment return already handled");
            return None;
        }
        self.handled = true;
        Some(match self.reconcile(store, return_url).await {
            Ok(booking_ref) => {
                tracing::info!(booking_ref = %booking_ref, "payment reconciled");
                self.state = ReconcileState::Confirmed {
                    booking_ref: booking_ref.clone(),
                };
                Navigation::Confirmation { booking_ref }
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "payment reconciliation failed");
                self.state = ReconcileState::Failed {
                    reason: reason.clone(),
                };
                Navigation::Failure { reason }
            }
        })
    }

    async fn reconcile(
        &mut self,
        store: &mut BookingStore,
        return_url: &str,
    ) -> Result<String, String> {
        let session_id = session_id_from_url(return_url)
            .ok_or_else(|| "return URL has no session_id".to_owned())?;

        self.state = ReconcileState::FetchingSession;
        let session = self
            .client
            .get_checkout_session(&session_id)
            .await
            .map_err(|e| format!("fetching checkout session {session_id}: {e}"))?;

        self.state = ReconcileState::RehydratingStore;
        for update in rehydration_updates(store, &session.metadata) {
            store.apply(update);
        }

        self.state = ReconcileState::SubmittingBooking;
        let created = self
            .client
            .create_booking(&normalize_booking(store))
            .await
            .map_err(|e| format!("creating booking: {e}"))?;
        store.apply(BookingUpdate::BookingRef(created.booking_ref.clone()));
        if let Some(van_type) = created.van_type.filter(|v| !v.trim().is_empty()) {
            store.apply(BookingUpdate::Van(Van::new(VanType::from(van_type))));
        }
        Ok(created.booking_ref)
    }
}

/// Store updates recovering the booking from checkout metadata. Absent keys
/// keep the in-store value; so do list values that fail to parse.
#[must_use]
pub fn rehydration_updates(
    store: &BookingStore,
    metadata: &BTreeMap<String, String>,
) -> Vec<BookingUpdate> {
    let get = |key: &str| {
        metadata
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };
    let mut updates = vec![
        BookingUpdate::CustomerDetails(CustomerDetailsPatch {
            name: get(keys::NAME),
            email: get(keys::EMAIL),
            phone: get(keys::PHONE),
            is_business_customer: get(keys::IS_BUSINESS).as_deref().map(parse_flag),
        }),
        BookingUpdate::Pickup(location_patch(
            &get,
            [
                keys::PICKUP_ADDRESS,
                keys::PICKUP_POSTCODE,
                keys::PICKUP_CITY,
                keys::PICKUP_FLAT_NO,
                keys::PICKUP_FLOOR,
                keys::PICKUP_LIFT,
                keys::PICKUP_PROPERTY_TYPE,
            ],
        )),
        BookingUpdate::Delivery(location_patch(
            &get,
            [
                keys::DROP_ADDRESS,
                keys::DROP_POSTCODE,
                keys::DROP_CITY,
                keys::DROP_FLAT_NO,
                keys::DROP_FLOOR,
                keys::DROP_LIFT,
                keys::DROP_PROPERTY_TYPE,
            ],
        )),
        BookingUpdate::SelectedDate(SelectedDatePatch {
            date: get(keys::DATE),
            pickup_time: get(keys::PICKUP_TIME).as_deref().and_then(parse_time),
            drop_time: get(keys::DROP_TIME).as_deref().and_then(parse_time),
            number_of_movers: get(keys::WORKERS).and_then(|w| w.parse().ok()),
            price: None,
        }),
        BookingUpdate::AdditionalServices(AdditionalServicesPatch {
            basic_compensation: get(keys::BASIC_COMPENSATION).as_deref().map(parse_flag),
            comprehensive_insurance: get(keys::COMPREHENSIVE_INSURANCE)
                .as_deref()
                .map(parse_flag),
            dismantling: get(keys::DISMANTLE_ITEMS)
                .and_then(|v| parse_list(keys::DISMANTLE_ITEMS, &v)),
            reassembly: get(keys::ASSEMBLE_ITEMS)
                .and_then(|v| parse_list(keys::ASSEMBLE_ITEMS, &v)),
            special_requirements: get(keys::SPECIAL_REQUIREMENTS),
        }),
    ];

    if let Some(items) = get(keys::ITEMS).and_then(|v| parse_list::<Item>(keys::ITEMS, &v)) {
        updates.push(BookingUpdate::Items(items));
    }
    if let Some(stops) =
        get(keys::EXTRA_STOPS).and_then(|v| parse_list::<ExtraStop>(keys::EXTRA_STOPS, &v))
    {
        updates.push(BookingUpdate::ExtraStops(stops));
    }
    if let Some(van_type) = get(keys::VAN_TYPE) {
        updates.push(BookingUpdate::Van(Van::new(VanType::from(van_type))));
    }
    if let Some(piano) = get(keys::PIANO_TYPE) {
        updates.push(BookingUpdate::Piano(Some(piano)));
    }
    if let Some(bike) = get(keys::MOTOR_BIKE) {
        updates.push(BookingUpdate::MotorBike(Some(bike)));
    }
    if let Some(price) = get(keys::TOTAL_PRICE).and_then(|p| p.parse::<f64>().ok()) {
        updates.push(BookingUpdate::TotalPrice(Some(price)));
    }

    let (distance, duration, route) = (
        get(keys::DISTANCE),
        get(keys::DURATION),
        get(keys::ROUTE),
    );
    if distance.is_some() || duration.is_some() || route.is_some() {
        let current = store.journey();
        updates.push(BookingUpdate::Journey(Journey {
            distance: distance.or_else(|| current.distance.clone()),
            duration: duration.or_else(|| current.duration.clone()),
            route: route.or_else(|| current.route.clone()),
        }));
    }
    if let Some(quote_ref) = get(keys::QUOTE_REF) {
        updates.push(BookingUpdate::QuoteRef(quote_ref));
    }
    updates
}

fn location_patch(get: &impl Fn(&str) -> Option<String>, fields: [&str; 7]) -> LocationPatch {
    let [address, postcode, city, flat_no, floor, lift, property_type] = fields;
    LocationPatch {
        address: get(address),
        postcode: get(postcode),
        city: get(city),
        flat_no: get(flat_no),
        floor: get(floor).map(|f| {
            f.parse::<i64>()
                .map_or_else(|_| Floor::from(f.as_str()), Floor::Number)
        }),
        lift_available: get(lift).as_deref().map(parse_flag),
        property_type: get(property_type),
        ..LocationPatch::default()
    }
}

/// `"08:30:00"` is kept verbatim; a bare decimal hour is read as hours.
fn parse_time(raw: &str) -> Option<TimeValue> {
    if time_to_hour(raw).is_some() {
        return Some(TimeValue::Formatted(raw.trim().to_owned()));
    }
    raw.trim().parse().ok().map(TimeValue::Hours)
}

fn parse_list<T: DeserializeOwned>(key: &str, raw: &str) -> Option<Vec<T>> {
    match serde_json::from_str(raw) {
        Ok(list) => Some(list),
        Err(e) => {
            tracing::warn!(key, error = %e, "unparseable metadata list; keeping current value");
            None
        }
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
