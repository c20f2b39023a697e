//! Pricing and distance lookups.

use removals_core::PricingRequest;

use crate::client::RemovalsClient;
use crate::error::ApiError;
use crate::types::{DistanceRequest, DistanceResponse, PriceResponse};

impl RemovalsClient {
    /// Prices a move (`POST /price`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingField`] if the response carries no numeric `price`.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] /
    ///   [`ApiError::Deserialize`] on transport, status or shape failure.
    pub async fn price(&self, request: &PricingRequest) -> Result<f64, ApiError> {
        let url = self.endpoint(&["price"]);
        let response: PriceResponse = self.post_lookup(&url, request).await?;
        response.price.ok_or_else(|| ApiError::MissingField {
            context: "POST /price".to_owned(),
            field: "price",
        })
    }

    /// Road distance and duration between two addresses (`POST /distance`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] /
    /// [`ApiError::Deserialize`] on transport, status or shape failure.
    pub async fn distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceResponse, ApiError> {
        let url = self.endpoint(&["distance"]);
        self.post_lookup(
            &url,
            &DistanceRequest {
                origin,
                destination,
            },
        )
        .await
    }
}
