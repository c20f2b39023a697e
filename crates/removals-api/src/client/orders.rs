//! Quote and booking endpoints.
//!
//! Creation calls are sent exactly once. A success response without the
//! expected reference is an error, never a synthesized reference.

use removals_core::BookingPayload;

use crate::client::RemovalsClient;
use crate::error::ApiError;
use crate::types::{
    BookingCreated, BookingResponse, QuoteCreated, QuoteLookupResponse, QuoteResponse, Quotation,
};

const QUOTATION_FOUND: &str = "Quotation found";

impl RemovalsClient {
    /// Creates a quotation (`POST /quote`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingField`] if the response has no `newQuote.quotationRef`.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] /
    ///   [`ApiError::Deserialize`] on transport, status or shape failure.
    pub async fn create_quote(&self, payload: &BookingPayload) -> Result<QuoteCreated, ApiError> {
        let url = self.endpoint(&["quote"]);
        let response: QuoteResponse = self.post_json(&url, payload).await?;
        let created = response
            .new_quote
            .filter(|q| !q.quotation_ref.trim().is_empty())
            .ok_or_else(|| ApiError::MissingField {
                context: "POST /quote".to_owned(),
                field: "newQuote.quotationRef",
            })?;
        tracing::info!(quotation_ref = %created.quotation_ref, "quotation created");
        Ok(created)
    }

    /// Creates a booking (`POST /new`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingField`] if the response has no `newOrder.bookingRef`.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] /
    ///   [`ApiError::Deserialize`] on transport, status or shape failure.
    pub async fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> Result<BookingCreated, ApiError> {
        let url = self.endpoint(&["new"]);
        let response: BookingResponse = self.post_json(&url, payload).await?;
        let created = response
            .new_order
            .filter(|o| !o.booking_ref.trim().is_empty())
            .ok_or_else(|| ApiError::MissingField {
                context: "POST /new".to_owned(),
                field: "newOrder.bookingRef",
            })?;
        tracing::info!(booking_ref = %created.booking_ref, "booking created");
        Ok(created)
    }

    /// Fetches a stored quotation (`GET /quote/get/{ref}`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if the backend does not report
    ///   `"Quotation found"` or answers 404.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] /
    ///   [`ApiError::Deserialize`] on transport, status or shape failure.
    pub async fn get_quote(&self, quotation_ref: &str) -> Result<Quotation, ApiError> {
        let url = self.endpoint(&["quote", "get", quotation_ref]);
        let response: QuoteLookupResponse = self.get_json(&url).await?;
        match response.quotation {
            Some(body) if response.msg == QUOTATION_FOUND => Ok(Quotation {
                quotation_ref: quotation_ref.to_owned(),
                body,
            }),
            _ => Err(ApiError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}
