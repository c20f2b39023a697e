use removals_core::{BookingStore, BookingUpdate, CustomerDetails, CustomerDetailsPatch};

use super::{check_phone, StepController, WizardStep};
use crate::error::ValidationErrors;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsStep {
    pub customer: CustomerDetails,
}

fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

pub(super) fn check_customer(customer: &CustomerDetails, errors: &mut ValidationErrors) {
    if customer.name.trim().is_empty() {
        errors.push("name", "name is required");
    }
    if !looks_like_email(&customer.email) {
        errors.push("email", "enter a valid email address");
    }
    check_phone("phone", &customer.phone, errors);
}

impl StepController for DetailsStep {
    const STEP: WizardStep = WizardStep::Details;

    fn validate(&self, _store: &BookingStore) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_customer(&self.customer, &mut errors);
        errors.into_result()
    }

    fn into_updates(self, _store: &BookingStore) -> Vec<BookingUpdate> {
        let CustomerDetails {
            name,
            email,
            phone,
            is_business_customer,
        } = self.customer;
        vec![BookingUpdate::CustomerDetails(CustomerDetailsPatch {
            name: Some(name.trim().to_owned()),
            email: Some(email.trim().to_owned()),
            phone: Some(phone.trim().to_owned()),
            is_business_customer: Some(is_business_customer),
        })]
    }
}
