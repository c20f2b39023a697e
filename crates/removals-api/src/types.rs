//! Request and response shapes of the removals backend.
//!
//! Responses are modelled leniently (`Option` and `#[serde(default)]`) so a
//! missing reference surfaces as [`crate::ApiError::MissingField`] from the
//! client instead of an opaque deserialization error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct AutocompleteRequest<'a> {
    pub place: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One address suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostcodeResponse {
    pub long_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PriceResponse {
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DistanceRequest<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
}

/// Distance-matrix shaped response of `POST /distance`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistanceResponse {
    #[serde(default)]
    pub rows: Vec<DistanceRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistanceRow {
    #[serde(default)]
    pub elements: Vec<DistanceElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DistanceElement {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    /// Per-element status; `None` or `"OK"` means usable.
    pub status: Option<String>,
}

/// A human-readable text with an optional numeric value (metres or seconds).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    pub value: Option<f64>,
}

impl DistanceResponse {
    /// The single origin/destination element, if present.
    #[must_use]
    pub fn first_element(&self) -> Option<&DistanceElement> {
        self.rows.first().and_then(|r| r.elements.first())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteResponse {
    pub new_quote: Option<QuoteCreated>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCreated {
    #[serde(default)]
    pub quotation_ref: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingResponse {
    pub new_order: Option<BookingCreated>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    #[serde(default)]
    pub booking_ref: String,
    pub van_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutUrlResponse {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutSessionResponse {
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// A retrieved checkout session, metadata flattened to strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteLookupResponse {
    #[serde(default)]
    pub msg: String,
    pub quotation: Option<serde_json::Value>,
}

/// A stored quotation as returned by `GET /quote/get/{ref}`.
///
/// The body is kept as JSON; the payment step only reads a handful of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Quotation {
    pub quotation_ref: String,
    pub body: serde_json::Value,
}

impl Quotation {
    /// Quoted price, if the stored quotation carries one.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        let value = self.body.get("price")?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
    }
}
