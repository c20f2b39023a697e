//! Post-payment commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use removals_api::RemovalsClient;
use removals_core::{load_draft, BookingStore};
use removals_wizard::{Navigation, PaymentReconciler};

use crate::booking::DraftSteps;

/// Runs payment reconciliation for a return URL.
///
/// # Errors
///
/// Returns an error if the draft cannot be loaded or reconciliation ends in
/// failure.
pub(crate) async fn run_reconcile(
    client: Arc<RemovalsClient>,
    return_url: &str,
    draft: Option<&Path>,
) -> anyhow::Result<()> {
    let mut store = BookingStore::new();
    if let Some(path) = draft {
        let draft =
            load_draft(path).with_context(|| format!("loading draft {}", path.display()))?;
        DraftSteps::from(draft).seed(&mut store);
    }

    let mut reconciler = PaymentReconciler::new(client);
    match reconciler.run(&mut store, return_url).await {
        Some(Navigation::Confirmation { booking_ref }) => {
            println!("booking confirmed: {booking_ref}");
            Ok(())
        }
        Some(Navigation::Failure { reason }) => anyhow::bail!("booking failed: {reason}"),
        None => anyhow::bail!("payment return was already handled"),
    }
}

/// Prints a stored quotation.
///
/// # Errors
///
/// Returns an error if the quotation cannot be found.
pub(crate) async fn run_quote_status(
    client: &RemovalsClient,
    quote_ref: &str,
) -> anyhow::Result<()> {
    let quotation = client
        .get_quote(quote_ref)
        .await
        .with_context(|| format!("fetching quotation {quote_ref}"))?;
    println!("quote: {}", quotation.quotation_ref);
    if let Some(price) = quotation.price() {
        println!("price: £{price:.2}");
    }
    println!("{}", serde_json::to_string_pretty(&quotation.body)?);
    Ok(())
}
