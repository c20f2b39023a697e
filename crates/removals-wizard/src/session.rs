//! One customer's wizard session: the store plus everything that reacts to it.

use std::sync::Arc;

use removals_api::{Quotation, RemovalsClient};
use removals_core::{
    checkout_metadata, normalize_booking, BookingStore, BookingUpdate, DistanceStrategy, Triggers,
    Van, VanType,
};

use crate::derive::{DerivationEngine, DirectionsRequest};
use crate::error::WizardError;
use crate::route::{DirectionsRoute, DirectionsStatus, RouteRequestId};
use crate::steps::{validate_booking_ready, validate_quote_ready, StepController, WizardStep};

/// Owns the [`BookingStore`] for a session. Every write goes through
/// [`BookingSession::update`] (or a step), which runs the derivations the
/// write invalidated before returning.
pub struct BookingSession {
    store: BookingStore,
    engine: DerivationEngine,
    client: Arc<RemovalsClient>,
    step: WizardStep,
    submitting: bool,
}

impl BookingSession {
    #[must_use]
    pub fn new(client: Arc<RemovalsClient>, strategy: DistanceStrategy) -> Self {
        Self::with_store(BookingStore::new(), client, strategy)
    }

    #[must_use]
    pub fn with_store(
        store: BookingStore,
        client: Arc<RemovalsClient>,
        strategy: DistanceStrategy,
    ) -> Self {
        Self {
            store,
            engine: DerivationEngine::new(Arc::clone(&client), strategy),
            client,
            step: WizardStep::Locations,
            submitting: false,
        }
    }

    #[must_use]
    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Applies one update and refreshes whatever it invalidated.
    pub async fn update(&mut self, update: BookingUpdate) -> Triggers {
        let triggers = self.store.apply(update);
        self.engine.refresh(&mut self.store, triggers).await;
        triggers
    }

    /// Applies a batch, then refreshes once for the union of their triggers.
    pub async fn update_all(&mut self, updates: Vec<BookingUpdate>) -> Triggers {
        let triggers = updates
            .into_iter()
            .fold(Triggers::default(), |acc, u| acc.union(self.store.apply(u)));
        self.engine.refresh(&mut self.store, triggers).await;
        triggers
    }

    /// Validates and applies a step, then advances past it.
    ///
    /// # Errors
    ///
    /// [`WizardError::Validation`] when the step's inputs are rejected; the
    /// store is left untouched in that case.
    pub async fn submit_step<S: StepController>(
        &mut self,
        step: S,
    ) -> Result<WizardStep, WizardError> {
        step.validate(&self.store)?;
        let updates = step.into_updates(&self.store);
        self.update_all(updates).await;
        self.step = S::STEP.next();
        tracing::info!(completed = %S::STEP, next = %self.step, "wizard step completed");
        Ok(self.step)
    }

    /// The outstanding directions request for the routing collaborator.
    pub fn take_directions_request(&mut self) -> Option<DirectionsRequest> {
        self.engine.take_directions_request()
    }

    /// Feeds a routing callback back in. Returns whether it was accepted.
    pub fn on_directions_result(
        &mut self,
        id: RouteRequestId,
        status: &DirectionsStatus,
        route: &DirectionsRoute,
    ) -> bool {
        self.engine
            .on_directions_result(&mut self.store, id, status, route)
    }

    /// Creates a quotation from the current store and records its reference.
    ///
    /// # Errors
    ///
    /// - [`WizardError::Validation`] if addresses, van or movers are missing.
    /// - [`WizardError::Submission`] if the backend rejects the quotation.
    pub async fn submit_quote(&mut self) -> Result<String, WizardError> {
        validate_quote_ready(&self.store)?;
        self.submitting = true;
        let result = self.client.create_quote(&normalize_booking(&self.store)).await;
        self.submitting = false;
        let created = result?;
        self.store
            .apply(BookingUpdate::QuoteRef(created.quotation_ref.clone()));
        Ok(created.quotation_ref)
    }

    /// Books directly, without payment, and records the booking reference.
    ///
    /// # Errors
    ///
    /// - [`WizardError::Validation`] if the booking is incomplete.
    /// - [`WizardError::Submission`] if the backend rejects the booking.
    pub async fn submit_booking(&mut self) -> Result<String, WizardError> {
        validate_booking_ready(&self.store)?;
        self.submitting = true;
        let result = self
            .client
            .create_booking(&normalize_booking(&self.store))
            .await;
        self.submitting = false;
        let created = result?;
        self.store
            .apply(BookingUpdate::BookingRef(created.booking_ref.clone()));
        if let Some(van_type) = created.van_type.filter(|v| !v.trim().is_empty()) {
            self.store
                .apply(BookingUpdate::Van(Van::new(VanType::from(van_type))));
        }
        self.step = WizardStep::Confirmation;
        Ok(created.booking_ref)
    }

    /// Loads the stored quotation for the payment step. A quoted price
    /// replaces the running total.
    ///
    /// # Errors
    ///
    /// - [`WizardError::MissingReference`] if no quotation was created yet.
    /// - [`WizardError::Submission`] if the lookup fails.
    pub async fn load_quote(&mut self) -> Result<Quotation, WizardError> {
        let quote_ref = self
            .store
            .quote_ref()
            .ok_or(WizardError::MissingReference("quotation reference"))?
            .to_owned();
        let quotation = self.client.get_quote(&quote_ref).await?;
        if let Some(price) = quotation.price() {
            self.store.apply(BookingUpdate::TotalPrice(Some(price)));
        }
        Ok(quotation)
    }

    /// Creates a payment checkout session and returns its redirect URL.
    ///
    /// # Errors
    ///
    /// - [`WizardError::Validation`] if the booking is incomplete.
    /// - [`WizardError::Submission`] if the session cannot be created.
    pub async fn start_checkout(&mut self) -> Result<String, WizardError> {
        validate_booking_ready(&self.store)?;
        self.submitting = true;
        let result = self
            .client
            .create_checkout_session(&checkout_metadata(&self.store))
            .await;
        self.submitting = false;
        let url = result?;
        self.step = WizardStep::Payment;
        tracing::info!("checkout session created");
        Ok(url)
    }
}
