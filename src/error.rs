//! Error handling for the API.
//!
//! Failures from the backing store are [StoreError]s. The resolver tags
//! each one with the [Stage] that produced it, and the HTTP layer only
//! ever sees a [DashboardError]. Every variant documents its status code
//! and JSON body.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

/// A failed read against the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    /// A lookup expected at most one row and found more.
    #[error("more than one {table} row matches {key}")]
    Ambiguous { table: &'static str, key: String },
    #[error("{0}")]
    Other(String),
}

/// One of the discrete backing-store reads that make up a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Identity,
    Links,
    Members,
    Skills,
    SkillNames,
    Enrollments,
    Classes,
    Notes,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Identity,
        Stage::Links,
        Stage::Members,
        Stage::Skills,
        Stage::SkillNames,
        Stage::Enrollments,
        Stage::Classes,
        Stage::Notes,
    ];

    /// What the stage loads, as it reads in an error message.
    pub fn subject(self) -> &'static str {
        match self {
            Stage::Identity => "person",
            Stage::Links => "guardian links",
            Stage::Members => "members",
            Stage::Skills => "member skills",
            Stage::SkillNames => "skills",
            Stage::Enrollments => "enrollments",
            Stage::Classes => "classes",
            Stage::Notes => "evaluations",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Identity => "identity",
            Stage::Links => "links",
            Stage::Members => "members",
            Stage::Skills => "skills",
            Stage::SkillNames => "skill-names",
            Stage::Enrollments => "enrollments",
            Stage::Classes => "classes",
            Stage::Notes => "notes",
        };

        f.write_str(name)
    }
}

/// The error enum for the dashboard endpoint.
///
/// See each variant for its corresponding status code and JSON body.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// \[400\] A required query parameter was not given.
    ///
    /// ```json
    /// { "error": "Missing required query param: email" }
    /// ```
    #[error("Missing required query param: {0}")]
    MissingParameter(&'static str),
    /// \[404\] No person has the given email.
    ///
    /// Carries the same empty shape as a snapshot so callers can render
    /// an empty state either way.
    ///
    /// ```json
    /// {
    ///     "userName": "",
    ///     "swimmers": [],
    ///     "skillsBySwimmer": {},
    ///     "notes": [],
    ///     "error": "No person found for email <email>"
    /// }
    /// ```
    #[error("No person found for email {email}")]
    NotFound { email: String },
    /// \[500\] One of the backing-store reads failed.
    ///
    /// ```json
    /// { "error": "Failed to load <what the stage loads>: <cause>" }
    /// ```
    #[error("Failed to load {}: {}", .stage.subject(), .source)]
    Stage { stage: Stage, source: StoreError },
    /// \[500\] Something failed outside of the store reads.
    ///
    /// ```json
    /// { "error": <message or "Unknown server error"> }
    /// ```
    #[error("{0}")]
    Unexpected(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::Stage { .. } | DashboardError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Value {
        match self {
            DashboardError::NotFound { .. } => json!({
                "userName": "",
                "swimmers": [],
                "skillsBySwimmer": {},
                "notes": [],
                "error": self.to_string(),
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }

    /// The stage that failed, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DashboardError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Tags a store failure with the stage that produced it.
pub trait StageContext<T> {
    fn stage(self, stage: Stage) -> DashboardResult<T>;
}

impl<T> StageContext<T> for Result<T, StoreError> {
    fn stage(self, stage: Stage) -> DashboardResult<T> {
        self.map_err(|source| {
            warn!(%stage, error = %source, "Dashboard stage failed");
            DashboardError::Stage { stage, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_is_a_bad_request() {
        let error = DashboardError::MissingParameter("email");

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.body(),
            json!({ "error": "Missing required query param: email" })
        );
    }

    #[test]
    fn not_found_keeps_the_empty_shape() {
        let error = DashboardError::NotFound {
            email: "nobody@example.com".to_owned(),
        };

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            error.body(),
            json!({
                "userName": "",
                "swimmers": [],
                "skillsBySwimmer": {},
                "notes": [],
                "error": "No person found for email nobody@example.com",
            })
        );
    }

    #[test]
    fn stage_failures_name_what_failed_to_load() {
        let failed: Result<(), StoreError> = Err(StoreError::Other("connection reset".to_owned()));
        let error = failed.stage(Stage::SkillNames).unwrap_err();

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.stage(), Some(Stage::SkillNames));
        assert_eq!(
            error.to_string(),
            "Failed to load skills: connection reset"
        );
    }

    #[test]
    fn every_stage_has_a_distinct_subject() {
        let mut subjects: Vec<_> = Stage::ALL.iter().map(|stage| stage.subject()).collect();
        subjects.sort_unstable();
        subjects.dedup();

        assert_eq!(subjects.len(), Stage::ALL.len());
    }

    #[test]
    fn ambiguous_lookups_describe_the_key() {
        let error = StoreError::Ambiguous {
            table: "person",
            key: "a@b.com".to_owned(),
        };

        assert_eq!(error.to_string(), "more than one person row matches a@b.com");
    }
}
