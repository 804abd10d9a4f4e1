use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::LocationPayload;
use crate::models::application::ApplicationStatus;
use crate::models::job::{Job, JobStatus, JobType};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub position: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub job_type: Option<JobType>,
    pub job_status: Option<JobStatus>,
    #[validate(nested)]
    pub job_location: LocationPayload,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// Patch payload: absent fields keep their current value. `createdBy` and
/// `id` are not representable here, so they can never be overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub company: Option<String>,
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub position: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub job_type: Option<JobType>,
    pub job_status: Option<JobStatus>,
    #[validate(nested)]
    pub job_location: Option<LocationPayload>,
    pub application_deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum SortKey {
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "a-z")]
    AToZ,
    #[serde(rename = "z-a")]
    ZToA,
}

impl SortKey {
    pub fn order_clause(self) -> &'static str {
        match self {
            SortKey::Newest => "created_at DESC",
            SortKey::Oldest => "created_at ASC",
            SortKey::AToZ => "position ASC",
            SortKey::ZToA => "position DESC",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    pub search: Option<String>,
    pub job_status: Option<String>,
    pub job_type: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total_jobs: i64,
    pub num_of_pages: i64,
    pub page: i64,
}

/// Applicant view of a job, computed on read from `job_applications`
/// (single source of truth, no denormalized cache on the job row).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicant {
    pub talent_id: Uuid,
    pub talent_name: String,
    pub talent_email: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub resume: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parses_wire_labels() {
        let key: SortKey = serde_json::from_str("\"a-z\"").unwrap();
        assert_eq!(key, SortKey::AToZ);
        assert_eq!(SortKey::default(), SortKey::Newest);
        assert_eq!(SortKey::ZToA.order_clause(), "position DESC");
    }

    #[test]
    fn update_payload_cannot_touch_owner() {
        // createdBy in the body must be ignored rather than applied
        let raw = r#"{"title":"New title","createdBy":"2c3f8a10-0000-0000-0000-000000000000"}"#;
        let payload: UpdateJobPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.title.as_deref(), Some("New title"));
    }
}
