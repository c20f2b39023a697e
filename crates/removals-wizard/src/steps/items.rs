use removals_core::{BookingStore, BookingUpdate, Item};

use super::{StepController, WizardStep};
use crate::error::ValidationErrors;

/// The inventory. Duplicate names are folded by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsStep {
    pub items: Vec<Item>,
}

impl StepController for ItemsStep {
    const STEP: WizardStep = WizardStep::Items;

    fn validate(&self, _store: &BookingStore) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.items.iter().any(|i| i.name.trim().is_empty()) {
            errors.push("items", "every item needs a name");
        }
        errors.into_result()
    }

    fn into_updates(self, _store: &BookingStore) -> Vec<BookingUpdate> {
        vec![BookingUpdate::Items(self.items)]
    }
}
