//! Address autocomplete and postal-code lookup.

use crate::client::RemovalsClient;
use crate::error::ApiError;
use crate::types::{AutocompleteRequest, AutocompleteResponse, PostcodeResponse, Prediction};

impl RemovalsClient {
    /// Address suggestions for partial input (`POST /autocomplete`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] on transport or
    ///   status failure after retries.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn autocomplete(&self, place: &str) -> Result<Vec<Prediction>, ApiError> {
        let url = self.endpoint(&["autocomplete"]);
        let response: AutocompleteResponse = self
            .post_lookup(&url, &AutocompleteRequest { place })
            .await?;
        Ok(response.predictions)
    }

    /// Postcode for a selected suggestion (`GET /postalcode/{place_id}`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if the place is unknown.
    /// - [`ApiError::MissingField`] if the response has no `long_name`.
    /// - [`ApiError::Http`] / [`ApiError::Deserialize`] as for any lookup.
    pub async fn postal_code(&self, place_id: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["postalcode", place_id]);
        let response: PostcodeResponse = self.get_json(&url).await?;
        response
            .long_name
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ApiError::MissingField {
                context: "GET /postalcode".to_owned(),
                field: "long_name",
            })
    }
}
