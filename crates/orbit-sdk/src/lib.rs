//! # Orbit SDK - The Kit
//!
//! Typed client for the Orbit goals service.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orbit_core::{GoalDraft, validate};
//! use orbit_sdk::{CreateGoalRequest, OrbitClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OrbitClient::new("http://localhost:3333");
//!
//!     let goal = validate(&GoalDraft::new("Meditar", 3))?;
//!     client.create_goal(&CreateGoalRequest::from(&goal)).await?;
//!
//!     for pending in client.pending_goals().await? {
//!         println!("{} ({}/{})", pending.title, pending.completion_count, pending.desired_weekly_frequency);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Endpoints
//!
//! ```text
//! ┌─────────────────────┐          HTTP           ┌─────────────────────┐
//! │   orbit (CLI)       │ ◄───────────────────►   │   Goals service     │
//! │                     │  POST /goals            │                     │
//! │  ┌───────────────┐  │  GET  /pending-goals    │                     │
//! │  │ orbit-sdk     │  │  GET  /summary          │                     │
//! │  └───────────────┘  │                         │                     │
//! └─────────────────────┘                         └─────────────────────┘
//! ```

use orbit_core::ValidGoal;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;

/// Request timeout applied to every call.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors from the Orbit SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error response.
    #[error("Server error: {0}")]
    Server(String),
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Body of `POST /goals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub title: String,
    pub desired_weekly_frequency: u8,
}

impl From<&ValidGoal> for CreateGoalRequest {
    fn from(goal: &ValidGoal) -> Self {
        Self {
            title: goal.title().to_string(),
            desired_weekly_frequency: goal.desired_weekly_frequency().get(),
        }
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// A goal not yet completed as often as desired this week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingGoal {
    pub id: String,
    pub title: String,
    pub desired_weekly_frequency: u8,
    pub completion_count: u32,
}

impl PendingGoal {
    /// Whether the goal reached its weekly target.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.completion_count >= u32::from(self.desired_weekly_frequency)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingGoalsResponse {
    pending_goals: Vec<PendingGoal>,
}

/// One completion listed in the weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedGoal {
    pub id: String,
    pub title: String,
    pub completed_at: String,
}

/// Progress for the current week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub completed: u32,
    pub total: u32,
    /// Completions grouped by day (`YYYY-MM-DD`). Absent when nothing was completed.
    #[serde(default)]
    pub goals_per_day: Option<BTreeMap<String, Vec<CompletedGoal>>>,
}

impl Summary {
    /// Completion as integer percentage (0-100).
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            0
        } else {
            (self.completed.min(self.total).saturating_mul(100) / self.total) as u8
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SummaryResponse {
    summary: Summary,
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client for the Orbit goals service.
#[derive(Debug, Clone)]
pub struct OrbitClient {
    base_url: String,
    client: reqwest::Client,
}

impl OrbitClient {
    /// Create a new client connecting to the given base URL.
    ///
    /// A trailing slash on the base URL is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create a new client that sends `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] if the token contains invalid header characters,
    /// or [`Error::Http`] if the HTTP client fails to build.
    pub fn with_token(base_url: impl Into<String>, token: &str) -> Result<Self, Error> {
        use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Server(format!("Invalid token header: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            base_url: normalize_base_url(base_url.into()),
            client,
        })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a goal.
    ///
    /// Any 2xx status counts as success; the response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] on a non-2xx status or [`Error::Http`] on
    /// connection failure.
    pub async fn create_goal(&self, request: &CreateGoalRequest) -> Result<(), Error> {
        let url = format!("{}/goals", self.base_url);
        let resp = self.client.post(&url).json(request).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// Goals still pending this week.
    pub async fn pending_goals(&self) -> Result<Vec<PendingGoal>, Error> {
        let url = format!("{}/pending-goals", self.base_url);
        let resp: PendingGoalsResponse = self.get_json(&url).await?;
        Ok(resp.pending_goals)
    }

    /// Weekly summary.
    pub async fn summary(&self) -> Result<Summary, Error> {
        let url = format!("{}/summary", self.base_url);
        let resp: SummaryResponse = self.get_json(&url).await?;
        Ok(resp.summary)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let resp = self.client.get(url).send().await?;
        let body = ensure_success(resp).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

/// Turn a non-2xx response into [`Error::Server`].
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if body.is_empty() {
        Err(Error::Server(status.as_u16().to_string()))
    } else {
        Err(Error::Server(format!("{}: {}", status.as_u16(), body)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
