use removals_api::ApiError;

/// A single field that failed validation, for inline display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field error found by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_fields(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// True when some error is reported against `field`.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was pushed.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("submission failed: {0}")]
    Submission(#[from] ApiError),

    #[error("missing {0}")]
    MissingReference(&'static str),
}
