//! # Weekly Frequency Catalog
//!
//! The fixed set of seven "times per week" choices offered when a goal is
//! created. The catalog is configuration data: built at compile time, never
//! mutated, never persisted.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Lowest accepted weekly frequency.
pub const MIN_WEEKLY_FREQUENCY: u8 = 1;

/// Highest accepted weekly frequency (every day of the week).
pub const MAX_WEEKLY_FREQUENCY: u8 = 7;

/// Id of the option preselected on an empty form.
pub const DEFAULT_FREQUENCY_ID: &str = "1";

// =============================================================================
// FREQUENCY OPTION
// =============================================================================

/// One selectable entry in the weekly frequency choice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyOption {
    /// The numeric frequency as text. Doubles as the list key.
    pub id: &'static str,
    /// Display label, kept verbatim in pt-BR.
    pub label: &'static str,
    /// Glyph hinting at the intensity of the frequency.
    pub icon: &'static str,
}

static WEEKLY_FREQUENCIES: [FrequencyOption; 7] = [
    FrequencyOption {
        id: "1",
        label: "1x na semana",
        icon: "🥱",
    },
    FrequencyOption {
        id: "2",
        label: "2x na semana",
        icon: "😐",
    },
    FrequencyOption {
        id: "3",
        label: "3x na semana",
        icon: "😎",
    },
    FrequencyOption {
        id: "4",
        label: "4x na semana",
        icon: "😜",
    },
    FrequencyOption {
        id: "5",
        label: "5x na semana",
        icon: "😯",
    },
    FrequencyOption {
        id: "6",
        label: "6x na semana",
        icon: "🤯",
    },
    FrequencyOption {
        id: "7",
        label: "Todos os dias da semana",
        icon: "🔥",
    },
];

/// All frequency options, ascending by id.
#[must_use]
pub fn list_frequency_options() -> &'static [FrequencyOption] {
    &WEEKLY_FREQUENCIES
}

/// Find the option with the given id.
#[must_use]
pub fn frequency_option(id: &str) -> Option<&'static FrequencyOption> {
    WEEKLY_FREQUENCIES.iter().find(|option| option.id == id)
}

impl FrequencyOption {
    /// The numeric frequency this option selects.
    #[must_use]
    pub fn frequency(&self) -> Option<WeeklyFrequency> {
        self.id
            .parse::<u8>()
            .ok()
            .and_then(|n| WeeklyFrequency::new(n).ok())
    }
}

// =============================================================================
// WEEKLY FREQUENCY
// =============================================================================

/// A desired number of occurrences per week, always in `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct WeeklyFrequency(u8);

impl WeeklyFrequency {
    /// Frequency used by an empty form.
    pub const DEFAULT: Self = Self(MIN_WEEKLY_FREQUENCY);

    /// Build a frequency, rejecting anything outside `1..=7`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (MIN_WEEKLY_FREQUENCY..=MAX_WEEKLY_FREQUENCY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfRange)
        }
    }

    /// The raw count.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The catalog entry for this frequency.
    #[must_use]
    pub fn option(self) -> &'static FrequencyOption {
        // The range check in `new` keeps the index in bounds.
        &WEEKLY_FREQUENCIES[usize::from(self.0 - 1)]
    }
}

impl Default for WeeklyFrequency {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for WeeklyFrequency {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ValidationError::OutOfRange)
            .and_then(Self::new)
    }
}

impl From<WeeklyFrequency> for u8 {
    fn from(value: WeeklyFrequency) -> Self {
        value.0
    }
}

impl fmt::Display for WeeklyFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seven_options_in_order() {
        let ids: Vec<_> = list_frequency_options().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn catalog_labels_are_verbatim() {
        let labels: Vec<_> = list_frequency_options().iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![
                "1x na semana",
                "2x na semana",
                "3x na semana",
                "4x na semana",
                "5x na semana",
                "6x na semana",
                "Todos os dias da semana",
            ]
        );
    }

    #[test]
    fn catalog_is_restartable() {
        let first: Vec<_> = list_frequency_options().iter().collect();
        let second: Vec<_> = list_frequency_options().iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn every_option_has_an_icon() {
        assert!(list_frequency_options().iter().all(|o| !o.icon.is_empty()));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(frequency_option("7").map(|o| o.label), Some("Todos os dias da semana"));
        assert!(frequency_option("0").is_none());
        assert!(frequency_option("8").is_none());
        assert!(frequency_option(DEFAULT_FREQUENCY_ID).is_some());
    }

    #[test]
    fn option_and_frequency_agree() {
        for option in list_frequency_options() {
            let frequency = option.frequency().expect("catalog ids are valid frequencies");
            assert_eq!(frequency.option(), option);
            assert_eq!(frequency.to_string(), option.id);
        }
    }

    #[test]
    fn weekly_frequency_bounds() {
        assert!(WeeklyFrequency::new(0).is_err());
        assert!(WeeklyFrequency::new(1).is_ok());
        assert!(WeeklyFrequency::new(7).is_ok());
        assert!(WeeklyFrequency::new(8).is_err());
        assert_eq!(WeeklyFrequency::try_from(-1), Err(ValidationError::OutOfRange));
        assert_eq!(WeeklyFrequency::try_from(300), Err(ValidationError::OutOfRange));
        assert_eq!(WeeklyFrequency::default().get(), 1);
    }

    #[test]
    fn weekly_frequency_serializes_as_number() {
        let json = serde_json::to_string(&WeeklyFrequency::new(3).expect("in range"))
            .expect("serializes");
        assert_eq!(json, "3");

        let parsed: Result<WeeklyFrequency, _> = serde_json::from_str("9");
        assert!(parsed.is_err());
    }
}
