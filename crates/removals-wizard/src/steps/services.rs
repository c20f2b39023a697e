use removals_core::{AdditionalServices, AdditionalServicesPatch, BookingStore, BookingUpdate};

use super::{StepController, WizardStep};
use crate::error::ValidationErrors;

/// Dismantling, reassembly, cover and special items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicesStep {
    pub services: AdditionalServices,
    pub piano: Option<String>,
    pub motor_bike: Option<String>,
}

fn check_known(
    names: &[String],
    store: &BookingStore,
    field: &'static str,
    errors: &mut ValidationErrors,
) {
    let unknown: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| !store.items().iter().any(|i| i.name.eq_ignore_ascii_case(n)))
        .collect();
    if !unknown.is_empty() {
        errors.push(field, format!("not in the inventory: {}", unknown.join(", ")));
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl StepController for ServicesStep {
    const STEP: WizardStep = WizardStep::Services;

    fn validate(&self, store: &BookingStore) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_known(&self.services.dismantling, store, "dismantling", &mut errors);
        check_known(&self.services.reassembly, store, "reassembly", &mut errors);
        errors.into_result()
    }

    fn into_updates(self, _store: &BookingStore) -> Vec<BookingUpdate> {
        let AdditionalServices {
            basic_compensation,
            comprehensive_insurance,
            dismantling,
            reassembly,
            special_requirements,
        } = self.services;
        vec![
            BookingUpdate::AdditionalServices(AdditionalServicesPatch {
                basic_compensation: Some(basic_compensation),
                comprehensive_insurance: Some(comprehensive_insurance),
                dismantling: Some(dismantling),
                reassembly: Some(reassembly),
                special_requirements: Some(special_requirements),
            }),
            BookingUpdate::Piano(non_blank(self.piano)),
            BookingUpdate::MotorBike(non_blank(self.motor_bike)),
        ]
    }
}
