//! Derived fields: total price and journey.
//!
//! [`DerivationEngine::refresh`] runs after every store update with the
//! [`Triggers`] the update raised. Lookup failures are logged and leave the
//! previous value in place.

use std::sync::Arc;

use removals_api::RemovalsClient;
use removals_core::{
    pricing_request, BookingStore, BookingUpdate, DistanceStrategy, FieldGroup, Triggers,
};

use crate::journey::{describe_route, journey_from_matrix, journey_from_route};
use crate::route::{DirectionsRoute, DirectionsStatus, RouteRequestId, RouteTracker};

/// A route the host's routing collaborator should compute. The result comes
/// back through [`DerivationEngine::on_directions_result`] tagged with `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsRequest {
    pub id: RouteRequestId,
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
}

pub struct DerivationEngine {
    client: Arc<RemovalsClient>,
    strategy: DistanceStrategy,
    tracker: RouteTracker,
    pending: Option<DirectionsRequest>,
    requested_route: String,
}

impl DerivationEngine {
    #[must_use]
    pub fn new(client: Arc<RemovalsClient>, strategy: DistanceStrategy) -> Self {
        Self {
            client,
            strategy,
            tracker: RouteTracker::new(),
            pending: None,
            requested_route: String::new(),
        }
    }

    pub async fn refresh(&mut self, store: &mut BookingStore, triggers: Triggers) {
        if !triggers.any() {
            return;
        }
        if triggers.price {
            self.refresh_price(store).await;
        }
        let route_changed = match self.strategy {
            DistanceStrategy::Matrix => triggers.route,
            DistanceStrategy::Directions => triggers.route || triggers.waypoints,
        };
        if route_changed {
            match self.strategy {
                DistanceStrategy::Matrix => self.refresh_matrix(store).await,
                DistanceStrategy::Directions => self.request_directions(store),
            }
        }
    }

    async fn refresh_price(&self, store: &mut BookingStore) {
        if endpoints(store).is_none() {
            tracing::debug!("pricing skipped until both addresses are entered");
            return;
        }
        let request = pricing_request(store);
        match self.client.price(&request).await {
            Ok(price) => {
                tracing::debug!(price, "price updated");
                store.apply(BookingUpdate::TotalPrice(Some(price)));
            }
            Err(e) => {
                tracing::warn!(error = %e, "pricing failed; keeping previous total");
            }
        }
    }

    async fn refresh_matrix(&mut self, store: &mut BookingStore) {
        let Some((origin, destination)) = endpoints(store) else {
            return;
        };
        let id = self.tracker.begin();
        let response = match self.client.distance(&origin, &destination).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, request = %id, "distance lookup failed");
                return;
            }
        };
        let description = describe_route(&origin, &[], &destination);
        let Some(journey) = response
            .first_element()
            .and_then(|el| journey_from_matrix(el, &description))
        else {
            tracing::warn!(request = %id, "distance response had no usable element");
            return;
        };
        if self.tracker.accept(id) {
            store.apply(BookingUpdate::Journey(journey));
        }
    }

    fn request_directions(&mut self, store: &BookingStore) {
        let Some((origin, destination)) = endpoints(store) else {
            return;
        };
        let id = self.tracker.begin();
        let waypoints: Vec<String> = store
            .extra_stops()
            .iter()
            .filter(|s| !s.address.trim().is_empty())
            .map(|s| s.address.clone())
            .collect();
        self.requested_route = describe_route(&origin, &waypoints, &destination);
        tracing::debug!(request = %id, stops = waypoints.len(), "directions requested");
        self.pending = Some(DirectionsRequest {
            id,
            origin,
            destination,
            waypoints,
        });
    }

    /// The outstanding directions request, if any. Taking it does not cancel
    /// it; a newer request supersedes it.
    pub fn take_directions_request(&mut self) -> Option<DirectionsRequest> {
        self.pending.take()
    }

    /// Applies a routing callback. Returns whether the journey was written.
    pub fn on_directions_result(
        &mut self,
        store: &mut BookingStore,
        id: RouteRequestId,
        status: &DirectionsStatus,
        route: &DirectionsRoute,
    ) -> bool {
        if *status != DirectionsStatus::Ok {
            tracing::warn!(request = %id, ?status, "directions lookup failed");
            return false;
        }
        if !self.tracker.accept(id) {
            tracing::debug!(
                request = %id,
                current = ?self.tracker.current(),
                "ignoring stale or repeated directions result"
            );
            return false;
        }
        store.apply(BookingUpdate::Journey(journey_from_route(route, &self.requested_route)));
        true
    }
}

/// Both addresses, once the user has entered them. Seeded demo addresses
/// never reach the pricing or routing services.
fn endpoints(store: &BookingStore) -> Option<(String, String)> {
    if store.is_placeholder(FieldGroup::Pickup) || store.is_placeholder(FieldGroup::Delivery) {
        return None;
    }
    let pickup = store.pickup();
    let delivery = store.delivery();
    if !pickup.has_address() || !delivery.has_address() {
        return None;
    }
    Some((pickup.address.clone(), delivery.address.clone()))
}
