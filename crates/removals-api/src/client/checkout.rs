//! Payment checkout sessions.

use std::collections::BTreeMap;

use crate::client::RemovalsClient;
use crate::error::ApiError;
use crate::types::{CheckoutSession, CheckoutSessionResponse, CheckoutUrlResponse};

impl RemovalsClient {
    /// Creates a checkout session and returns the URL to redirect the customer to
    /// (`POST /create-checkout-session`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingField`] if the response has no `url`.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] /
    ///   [`ApiError::Deserialize`] on transport, status or shape failure.
    pub async fn create_checkout_session(
        &self,
        metadata: &BTreeMap<String, String>,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(&["create-checkout-session"]);
        let response: CheckoutUrlResponse = self.post_json(&url, metadata).await?;
        response
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ApiError::MissingField {
                context: "POST /create-checkout-session".to_owned(),
                field: "url",
            })
    }

    /// Retrieves a checkout session after the payment redirect
    /// (`GET /checkout-session/{id}`).
    ///
    /// Metadata values that are not strings are rendered as JSON text.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if the session is unknown.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] /
    ///   [`ApiError::Deserialize`] on transport, status or shape failure.
    pub async fn get_checkout_session(&self, session_id: &str) -> Result<CheckoutSession, ApiError> {
        let url = self.endpoint(&["checkout-session", session_id]);
        let response: CheckoutSessionResponse = self.get_json(&url).await?;
        let metadata = response
            .metadata
            .into_iter()
            .filter_map(|(k, v)| match v {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some((k, s)),
                other => Some((k, other.to_string())),
            })
            .collect();
        Ok(CheckoutSession {
            id: session_id.to_owned(),
            metadata,
        })
    }
}
