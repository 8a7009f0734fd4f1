//! # Goal Draft
//!
//! The state behind the "create goal" form and the pure validation that
//! turns it into something the remote service will accept.
//!
//! A [`GoalDraft`] holds raw user input and is allowed to be invalid.
//! [`validate`] is the only way to obtain a [`ValidGoal`], so nothing
//! unvalidated can reach the network layer.

use crate::error::ValidationError;
use crate::feedback::{FieldError, FormFeedback};
use crate::frequency::WeeklyFrequency;
use serde::{Deserialize, Serialize};

// =============================================================================
// RAW FREQUENCY INPUT
// =============================================================================

/// Frequency as entered: either already numeric (a radio choice) or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencyInput {
    Number(i64),
    Text(String),
}

impl FrequencyInput {
    /// Coerce the input to an integer.
    ///
    /// Text is trimmed before parsing. Anything that is not a plain integer
    /// (`"abc"`, `""`, `"2.5"`) yields `None`.
    #[must_use]
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// Coerce and range-check in one step.
    pub fn to_frequency(&self) -> Result<WeeklyFrequency, ValidationError> {
        self.coerce()
            .ok_or(ValidationError::OutOfRange)
            .and_then(WeeklyFrequency::try_from)
    }
}

impl Default for FrequencyInput {
    fn default() -> Self {
        Self::Number(i64::from(WeeklyFrequency::DEFAULT.get()))
    }
}

impl From<i64> for FrequencyInput {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FrequencyInput {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u8> for FrequencyInput {
    fn from(value: u8) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<WeeklyFrequency> for FrequencyInput {
    fn from(value: WeeklyFrequency) -> Self {
        Self::Number(i64::from(value.get()))
    }
}

impl From<&str> for FrequencyInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FrequencyInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// =============================================================================
// GOAL DRAFT
// =============================================================================

/// Unvalidated form state for a new goal.
///
/// The default value is the empty form: no title, one time per week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    pub desired_weekly_frequency: FrequencyInput,
}

impl GoalDraft {
    /// Create a draft from raw input.
    #[must_use]
    pub fn new(title: impl Into<String>, frequency: impl Into<FrequencyInput>) -> Self {
        Self {
            title: title.into(),
            desired_weekly_frequency: frequency.into(),
        }
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the frequency.
    pub fn set_frequency(&mut self, frequency: impl Into<FrequencyInput>) {
        self.desired_weekly_frequency = frequency.into();
    }

    /// Return to the empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the draft still equals the empty form.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// VALID GOAL
// =============================================================================

/// A draft that passed validation. Safe to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidGoal {
    title: String,
    desired_weekly_frequency: WeeklyFrequency,
}

impl ValidGoal {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn desired_weekly_frequency(&self) -> WeeklyFrequency {
        self.desired_weekly_frequency
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate a draft.
///
/// The title is checked before the frequency, so a draft failing both
/// reports [`ValidationError::EmptyTitle`].
pub fn validate(draft: &GoalDraft) -> Result<ValidGoal, ValidationError> {
    if draft.title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let desired_weekly_frequency = draft.desired_weekly_frequency.to_frequency()?;

    Ok(ValidGoal {
        title: draft.title.clone(),
        desired_weekly_frequency,
    })
}

/// Every failing field of a draft, in form order.
///
/// Empty when [`validate`] would succeed.
#[must_use]
pub fn field_errors(draft: &GoalDraft) -> FormFeedback {
    let mut feedback = FormFeedback::new();
    if draft.title.is_empty() {
        feedback.add(FieldError::from(ValidationError::EmptyTitle));
    }
    if let Err(err) = draft.desired_weekly_frequency.to_frequency() {
        feedback.add(FieldError::from(err));
    }
    feedback
}

// =============================================================================
// TESTS
// =============================================================================
