//! # Feedback Module
//!
//! Field-level validation messages, collected per form and rendered as a
//! plain text block for terminal surfaces.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The field name as it appears in the remote JSON.
    pub field: String,
    /// The message shown beneath the field.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for FieldError {
    fn from(err: ValidationError) -> Self {
        Self::new(err.field(), err.message())
    }
}

/// All field messages for a single form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFeedback {
    errors: Vec<FieldError>,
}

impl FormFeedback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Format as plain text with the standard template.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str("│ CADASTRAR META                      │\n");
        output.push_str("├─────────────────────────────────────┤\n");

        if self.errors.is_empty() {
            output.push_str("│ - (ok)                              │\n");
        } else {
            for error in &self.errors {
                output.push_str(&format!("│ - {}: {}\n", error.field, error.message));
            }
        }

        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EMPTY_TITLE_MESSAGE;

    #[test]
    fn field_error_from_validation() {
        let err = FieldError::from(ValidationError::EmptyTitle);
        assert_eq!(err.field, "title");
        assert_eq!(err.message, EMPTY_TITLE_MESSAGE);
    }

    #[test]
    fn feedback_building() {
        let mut feedback = FormFeedback::new();
        assert!(feedback.is_empty());

        feedback.add(ValidationError::OutOfRange.into());

        assert!(!feedback.is_empty());
        assert_eq!(feedback.errors().len(), 1);
        assert!(feedback.message_for("desiredWeeklyFrequency").is_some());
        assert!(feedback.message_for("title").is_none());
    }

    #[test]
    fn to_text_format() {
        let mut feedback = FormFeedback::new();
        feedback.add(ValidationError::EmptyTitle.into());

        let text = feedback.to_text();

        assert!(text.contains("CADASTRAR META"));
        assert!(text.contains("title: Informe a atividade que deseja realizar"));
    }

    #[test]
    fn to_text_without_errors() {
        assert!(FormFeedback::new().to_text().contains("(ok)"));
    }
}
