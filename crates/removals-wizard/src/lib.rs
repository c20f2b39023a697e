pub mod derive;
pub mod error;
pub mod journey;
pub mod reconcile;
pub mod route;
pub mod search;
pub mod session;
pub mod steps;

pub use derive::{DerivationEngine, DirectionsRequest};
pub use error::{FieldError, ValidationErrors, WizardError};
pub use reconcile::{session_id_from_url, Navigation, PaymentReconciler, ReconcileState};
pub use route::{DirectionsRoute, DirectionsStatus, RouteLeg, RouteRequestId, RouteTracker};
pub use search::{AddressSearch, PlaceLookup};
pub use session::BookingSession;
pub use steps::{
    DetailsStep, ItemsStep, LocationStep, ScheduleStep, ServicesStep, StepController, WizardStep,
};
