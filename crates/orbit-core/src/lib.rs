//! # Orbit Core
//!
//! The rules behind creating a weekly goal.
//!
//! - [`draft`]: form state and pure validation
//! - [`frequency`]: the fixed 1-7 times-per-week catalog
//! - [`cache`]: named query regions that can be marked stale
//! - [`feedback`]: field-level messages for rendering surfaces
//!
//! Nothing in this crate performs I/O.

pub mod cache;
pub mod draft;
pub mod error;
pub mod feedback;
pub mod frequency;

pub use cache::{CacheInvalidator, PENDING_GOALS, QueryCache, QueryKey, SUMMARY};
pub use draft::{FrequencyInput, GoalDraft, ValidGoal, field_errors, validate};
pub use error::ValidationError;
pub use feedback::{FieldError, FormFeedback};
pub use frequency::{
    DEFAULT_FREQUENCY_ID, FrequencyOption, WeeklyFrequency, frequency_option,
    list_frequency_options,
};
