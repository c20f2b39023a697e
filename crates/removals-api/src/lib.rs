pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::RemovalsClient;
pub use error::ApiError;
pub use types::{
    BookingCreated, CheckoutSession, DistanceElement, DistanceResponse, Prediction, QuoteCreated,
    Quotation,
};
