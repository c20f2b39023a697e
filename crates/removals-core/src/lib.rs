pub mod address;
pub mod app_config;
pub mod booking;
pub mod config;
pub mod draft;
pub mod error;
pub mod floor;
pub mod payload;
pub mod phone;
pub mod store;
pub mod time;

pub use address::{compose_address, contains_uk_postcode, format_address_with_postcode};
pub use app_config::{AppConfig, DistanceStrategy, Environment};
pub use booking::{
    AdditionalServices, CustomerDetails, ExtraStop, Item, Journey, Location, SelectedDate, Van,
    VanType,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use draft::{load_draft, BookingDraft};
pub use error::ConfigError;
pub use floor::{floor_to_number, Floor};
pub use payload::{
    checkout_metadata, normalize_booking, normalize_extra_stop, pricing_request, BookingPayload,
    NormalizedStop, PricingLocation, PricingRequest,
};
pub use phone::is_valid_uk_mobile;
pub use store::{
    AdditionalServicesPatch, BookingStore, BookingUpdate, CustomerDetailsPatch, FieldGroup,
    LocationPatch, SelectedDatePatch, Triggers,
};
pub use time::{hour_to_time, time_to_hour, TimeValue};
