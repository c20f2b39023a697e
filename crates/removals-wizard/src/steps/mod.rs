//! Wizard steps.
//!
//! Each step is a form value implementing [`StepController`]: it validates
//! its own inputs against the current store and turns itself into store
//! updates. [`crate::BookingSession::submit_step`] applies them and advances.

mod details;
mod items;
mod location;
mod schedule;
mod services;

pub use details::DetailsStep;
pub use items::ItemsStep;
pub use location::LocationStep;
pub use schedule::ScheduleStep;
pub use services::ServicesStep;

use removals_core::{is_valid_uk_mobile, BookingStore, BookingUpdate, FieldGroup};

use crate::error::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Locations,
    Items,
    Schedule,
    Services,
    Details,
    Payment,
    Confirmation,
}

impl WizardStep {
    /// The step after this one; `Confirmation` is terminal.
    #[must_use]
    pub fn next(self) -> WizardStep {
        match self {
            Self::Locations => Self::Items,
            Self::Items => Self::Schedule,
            Self::Schedule => Self::Services,
            Self::Services => Self::Details,
            Self::Details => Self::Payment,
            Self::Payment | Self::Confirmation => Self::Confirmation,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Items => "items",
            Self::Schedule => "schedule",
            Self::Services => "services",
            Self::Details => "details",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait StepController {
    const STEP: WizardStep;

    /// Checks this step's inputs.
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    fn validate(&self, store: &BookingStore) -> Result<(), ValidationErrors>;

    /// The store writes this step performs once validated.
    fn into_updates(self, store: &BookingStore) -> Vec<BookingUpdate>;
}

/// Pickup and delivery must be real addresses, not seeded placeholders.
pub(crate) fn check_route(store: &BookingStore, errors: &mut ValidationErrors) {
    if !store.pickup().has_address() || store.is_placeholder(FieldGroup::Pickup) {
        errors.push("pickup", "pickup address is required");
    }
    if !store.delivery().has_address() || store.is_placeholder(FieldGroup::Delivery) {
        errors.push("delivery", "delivery address is required");
    }
}

/// What a quotation needs: addresses, a van and at least one mover.
///
/// # Errors
///
/// Returns every missing field.
pub fn validate_quote_ready(store: &BookingStore) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_route(store, &mut errors);
    if store.van().is_none() {
        errors.push("van", "select a van");
    }
    if store.selected_date().number_of_movers.unwrap_or(0) < 1 {
        errors.push("numberOfMovers", "select at least one mover");
    }
    errors.into_result()
}

/// What a booking needs on top of a quotation: the customer's contact details.
///
/// # Errors
///
/// Returns every missing or invalid field.
pub fn validate_booking_ready(store: &BookingStore) -> Result<(), ValidationErrors> {
    let mut errors = match validate_quote_ready(store) {
        Ok(()) => ValidationErrors::new(),
        Err(e) => e,
    };
    details::check_customer(store.customer_details(), &mut errors);
    errors.into_result()
}

pub(crate) fn check_phone(field: &'static str, phone: &str, errors: &mut ValidationErrors) {
    if !is_valid_uk_mobile(phone) {
        errors.push(field, "enter a valid UK mobile number");
    }
}
