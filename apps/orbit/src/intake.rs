//! # Goal Intake
//!
//! validate -> submit -> invalidate -> reset.
//!
//! The workflow owns the draft and is handed its two collaborators: the
//! service that creates goals remotely and the cache that must hear about
//! the new goal. Validation failures never reach the service; service
//! failures never touch the cache or the draft.

use orbit_core::{
    CacheInvalidator, FormFeedback, GoalDraft, QueryKey, ValidGoal, ValidationError, field_errors,
    validate,
};
use orbit_sdk::{CreateGoalRequest, OrbitClient};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// SERVICE SEAM
// =============================================================================

/// Remote goal creation.
pub trait GoalService {
    type Error: std::error::Error + 'static;

    /// Create `goal` remotely.
    fn create(&self, goal: &ValidGoal) -> impl Future<Output = Result<(), Self::Error>>;
}

impl GoalService for OrbitClient {
    type Error = orbit_sdk::Error;

    async fn create(&self, goal: &ValidGoal) -> Result<(), Self::Error> {
        self.create_goal(&CreateGoalRequest::from(goal)).await
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Why a submission did not go through.
#[derive(Debug, Error)]
pub enum IntakeError<E: std::error::Error + 'static> {
    /// The draft was rejected locally. Nothing was sent.
    #[error("invalid goal: {0}")]
    Validation(#[from] ValidationError),

    /// The goal service failed. The draft is kept for a retry.
    #[error("goal service failed: {0}")]
    Remote(#[source] E),
}

// =============================================================================
// WORKFLOW
// =============================================================================

/// Regions made stale by a new goal.
#[must_use]
pub fn regions_touched_by_new_goal() -> [QueryKey; 2] {
    [QueryKey::summary(), QueryKey::pending_goals()]
}

/// The "create goal" form and what happens when it is submitted.
#[derive(Debug)]
pub struct GoalIntake<S, C> {
    draft: GoalDraft,
    service: S,
    invalidator: C,
}

impl<S: GoalService, C: CacheInvalidator> GoalIntake<S, C> {
    /// Start with an empty draft.
    pub fn new(service: S, invalidator: C) -> Self {
        Self {
            draft: GoalDraft::default(),
            service,
            invalidator,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &GoalDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut GoalDraft {
        &mut self.draft
    }

    /// Field messages for the current draft.
    #[must_use]
    pub fn feedback(&self) -> FormFeedback {
        field_errors(&self.draft)
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub fn invalidator(&self) -> &C {
        &self.invalidator
    }

    /// Submit the current draft.
    ///
    /// On success the summary and pending-goals regions are invalidated once
    /// each and the draft goes back to its defaults. Taking `&mut self` keeps
    /// a single workflow from running two submissions at once.
    pub async fn submit(&mut self) -> Result<ValidGoal, IntakeError<S::Error>> {
        let goal = validate(&self.draft).inspect_err(|err| {
            debug!(field = err.field(), "draft rejected");
        })?;

        info!(
            title = goal.title(),
            frequency = goal.desired_weekly_frequency().get(),
            "creating goal"
        );

        if let Err(err) = self.service.create(&goal).await {
            warn!(error = %err, "goal creation failed, keeping draft");
            return Err(IntakeError::Remote(err));
        }

        for key in regions_touched_by_new_goal() {
            self.invalidator.invalidate(&key);
        }
        self.draft.reset();

        debug!("goal created, draft reset");
        Ok(goal)
    }
}

// =============================================================================
// TESTS
// =============================================================================
