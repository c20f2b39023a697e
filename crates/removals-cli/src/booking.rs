//! Draft-driven booking commands: price, quote, book and checkout.
//!
//! A draft is replayed through the same step controllers a customer would
//! go through, so validation and derivations run exactly as in the wizard.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use removals_api::RemovalsClient;
use removals_core::{load_draft, AppConfig, BookingDraft, BookingStore, TimeValue};
use removals_wizard::{
    BookingSession, DetailsStep, ItemsStep, LocationStep, ScheduleStep, ServicesStep,
    StepController, WizardError,
};

/// One draft split into the wizard's steps.
pub(crate) struct DraftSteps {
    pub location: LocationStep,
    pub items: ItemsStep,
    pub schedule: ScheduleStep,
    pub services: ServicesStep,
    pub details: DetailsStep,
}

impl From<BookingDraft> for DraftSteps {
    fn from(draft: BookingDraft) -> Self {
        let selected = draft.selected_date;
        Self {
            location: LocationStep {
                pickup: draft.pickup,
                delivery: draft.delivery,
                extra_stops: draft.extra_stops,
            },
            items: ItemsStep { items: draft.items },
            schedule: ScheduleStep {
                date: selected.date.unwrap_or_default(),
                pickup_time: selected
                    .pickup_time
                    .unwrap_or_else(|| TimeValue::Formatted(String::new())),
                drop_time: selected.drop_time,
                number_of_movers: selected.number_of_movers.unwrap_or(0),
                van_type: draft.van.map(|v| v.van_type),
            },
            services: ServicesStep {
                services: draft.additional_services,
                piano: draft.piano,
                motor_bike: draft.motor_bike,
            },
            details: DetailsStep {
                customer: draft.customer_details,
            },
        }
    }
}

impl DraftSteps {
    /// Writes every step into `store` without validating.
    pub(crate) fn seed(self, store: &mut BookingStore) {
        let updates = [
            self.location.into_updates(store),
            self.items.into_updates(store),
            self.schedule.into_updates(store),
            self.services.into_updates(store),
            self.details.into_updates(store),
        ];
        for update in updates.into_iter().flatten() {
            store.apply(update);
        }
    }
}

/// Replays a draft through the wizard. Customer details are only required
/// when `with_details` is set.
async fn session_from_draft(
    client: Arc<RemovalsClient>,
    config: &AppConfig,
    path: &Path,
    with_details: bool,
) -> anyhow::Result<BookingSession> {
    let draft = load_draft(path).with_context(|| format!("loading draft {}", path.display()))?;
    let steps = DraftSteps::from(draft);
    let mut session = BookingSession::new(client, config.distance_strategy);

    submit(&mut session, steps.location).await?;
    submit(&mut session, steps.items).await?;
    submit(&mut session, steps.schedule).await?;
    submit(&mut session, steps.services).await?;
    if with_details {
        submit(&mut session, steps.details).await?;
    }
    Ok(session)
}

/// Submits one step, logging each rejected field before bailing out.
async fn submit<S: StepController>(session: &mut BookingSession, step: S) -> anyhow::Result<()> {
    match session.submit_step(step).await {
        Ok(_) => Ok(()),
        Err(WizardError::Validation(errors)) => {
            for error in errors.errors() {
                tracing::warn!(
                    step = %S::STEP,
                    field = error.field,
                    message = %error.message,
                    "draft field rejected"
                );
            }
            Err(WizardError::Validation(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_summary(store: &BookingStore) {
    match store.total_price() {
        Some(price) => println!("price:    £{price:.2}"),
        None => println!("price:    unavailable"),
    }
    let journey = store.journey();
    println!(
        "distance: {}",
        journey.distance.as_deref().unwrap_or("unavailable")
    );
    println!(
        "duration: {}",
        journey.duration.as_deref().unwrap_or("unavailable")
    );
    if let Some(route) = journey.route.as_deref() {
        println!("route:    {route}");
    }
}

/// # Errors
///
/// Returns an error if the draft cannot be loaded or fails validation.
pub(crate) async fn run_price(
    client: Arc<RemovalsClient>,
    config: &AppConfig,
    draft: &Path,
) -> anyhow::Result<()> {
    let session = session_from_draft(client, config, draft, false).await?;
    print_summary(session.store());
    Ok(())
}

/// # Errors
///
/// Returns an error if the draft is invalid or the quotation is rejected.
pub(crate) async fn run_quote(
    client: Arc<RemovalsClient>,
    config: &AppConfig,
    draft: &Path,
) -> anyhow::Result<()> {
    let mut session = session_from_draft(client, config, draft, false).await?;
    let quote_ref = session.submit_quote().await?;
    print_summary(session.store());
    println!("quote:    {quote_ref}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the draft is invalid or the booking is rejected.
pub(crate) async fn run_book(
    client: Arc<RemovalsClient>,
    config: &AppConfig,
    draft: &Path,
) -> anyhow::Result<()> {
    let mut session = session_from_draft(client, config, draft, true).await?;
    let booking_ref = session.submit_booking().await?;
    print_summary(session.store());
    println!("booking:  {booking_ref}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the draft is invalid or the checkout session cannot
/// be created.
pub(crate) async fn run_checkout(
    client: Arc<RemovalsClient>,
    config: &AppConfig,
    draft: &Path,
) -> anyhow::Result<()> {
    let mut session = session_from_draft(client, config, draft, true).await?;
    let url = session.start_checkout().await?;
    print_summary(session.store());
    println!("checkout: {url}");
    Ok(())
}
