//! Debounced address search.
//!
//! Each keystroke reschedules a single lookup; a newer keystroke aborts the
//! pending one, so only the last input in a burst reaches the backend.
//! Suggestions are published on a `watch` channel. Selecting a suggestion
//! resolves its postcode and suppresses input for a short window, so the
//! text written back into the field does not start another search.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use removals_api::{ApiError, Prediction, RemovalsClient};
use removals_core::{format_address_with_postcode, AppConfig};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Address lookups the search needs from the backend.
pub trait PlaceLookup: Send + Sync + 'static {
    fn suggestions(
        &self,
        input: &str,
    ) -> impl Future<Output = Result<Vec<Prediction>, ApiError>> + Send;

    fn postcode(&self, place_id: &str) -> impl Future<Output = Result<String, ApiError>> + Send;
}

impl PlaceLookup for RemovalsClient {
    fn suggestions(
        &self,
        input: &str,
    ) -> impl Future<Output = Result<Vec<Prediction>, ApiError>> + Send {
        self.autocomplete(input)
    }

    fn postcode(&self, place_id: &str) -> impl Future<Output = Result<String, ApiError>> + Send {
        self.postal_code(place_id)
    }
}

pub struct AddressSearch<L: PlaceLookup> {
    lookup: Arc<L>,
    debounce: Duration,
    suppress: Duration,
    pending: Option<JoinHandle<()>>,
    suppressed_until: Option<Instant>,
    results: Arc<watch::Sender<Vec<Prediction>>>,
}

impl<L: PlaceLookup> AddressSearch<L> {
    #[must_use]
    pub fn new(lookup: Arc<L>, debounce: Duration, suppress: Duration) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            lookup,
            debounce,
            suppress,
            pending: None,
            suppressed_until: None,
            results: Arc::new(tx),
        }
    }

    /// Windows from `REMOVALS_AUTOCOMPLETE_DEBOUNCE_MS` and
    /// `REMOVALS_SELECTION_SUPPRESS_MS`.
    #[must_use]
    pub fn from_config(lookup: Arc<L>, config: &AppConfig) -> Self {
        Self::new(
            lookup,
            Duration::from_millis(config.autocomplete_debounce_ms),
            Duration::from_millis(config.selection_suppress_ms),
        )
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Prediction>> {
        self.results.subscribe()
    }

    #[must_use]
    pub fn suggestions(&self) -> Vec<Prediction> {
        self.results.borrow().clone()
    }

    /// Handles a change to the address field. Returns whether a lookup was
    /// scheduled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input(&mut self, text: &str) -> bool {
        if self
            .suppressed_until
            .is_some_and(|until| Instant::now() < until)
        {
            tracing::debug!("input ignored during selection window");
            return false;
        }
        self.cancel_pending();

        let query = text.trim().to_owned();
        if query.is_empty() {
            self.results.send_replace(Vec::new());
            return false;
        }

        let lookup = Arc::clone(&self.lookup);
        let results = Arc::clone(&self.results);
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            match lookup.suggestions(&query).await {
                Ok(predictions) => {
                    tracing::debug!(count = predictions.len(), "address suggestions received");
                    results.send_replace(predictions);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "address autocomplete failed");
                }
            }
        }));
        true
    }

    /// Accepts a suggestion and returns the address to write into the field,
    /// with the postcode appended when it can be resolved.
    pub async fn select(&mut self, prediction: &Prediction) -> String {
        self.cancel_pending();
        self.results.send_replace(Vec::new());

        let address = match self.lookup.postcode(&prediction.place_id).await {
            Ok(postcode) => format_address_with_postcode(&prediction.description, &postcode),
            Err(e) => {
                tracing::warn!(error = %e, place_id = %prediction.place_id, "postcode lookup failed");
                prediction.description.clone()
            }
        };
        self.suppressed_until = Some(Instant::now() + self.suppress);
        address
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<L: PlaceLookup> Drop for AddressSearch<L> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
