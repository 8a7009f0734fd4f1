//! Validation errors raised before a goal ever leaves the process.

use thiserror::Error;

/// Message shown under the title field when it is left empty.
pub const EMPTY_TITLE_MESSAGE: &str = "Informe a atividade que deseja realizar";

/// Message shown under the frequency selector when the value is unusable.
pub const OUT_OF_RANGE_MESSAGE: &str = "Escolha uma frequência entre 1 e 7 vezes na semana";

/// A draft that must not be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title has no characters.
    #[error("{}", EMPTY_TITLE_MESSAGE)]
    EmptyTitle,

    /// The weekly frequency is not an integer in `1..=7`.
    #[error("{}", OUT_OF_RANGE_MESSAGE)]
    OutOfRange,
}

impl ValidationError {
    /// Name of the form field the error belongs to.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::OutOfRange => "desiredWeeklyFrequency",
        }
    }

    /// Inline message for the field.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyTitle => EMPTY_TITLE_MESSAGE,
            Self::OutOfRange => OUT_OF_RANGE_MESSAGE,
        }
    }
}
