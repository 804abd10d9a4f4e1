use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::application::{ApplicationStatus, ExperienceLevel};

/// Text fields collected from the multipart apply form. The `cv` file part is
/// handled separately and is mandatory.
#[derive(Debug, Clone, Default)]
pub struct ApplyFields {
    pub cover_letter: Option<String>,
    pub portfolio: Option<String>,
    pub linkedin_profile: Option<String>,
    pub skills: Vec<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub availability: Option<String>,
    pub location_preferences: Option<String>,
    pub referees: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdatePayload {
    pub status: ApplicationStatus,
}

/// Application joined with its job, for talent-facing listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_id: Uuid,
    pub talent_id: Uuid,
    pub status: ApplicationStatus,
    pub cv_path: String,
    pub applied_at: DateTime<Utc>,
    pub job_title: String,
    pub job_position: String,
    pub job_company: String,
    pub job_is_closed: bool,
}

/// Application joined with its talent, for employer-facing listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithTalent {
    pub id: Uuid,
    pub job_id: Uuid,
    pub talent_id: Uuid,
    pub status: ApplicationStatus,
    pub cv_path: String,
    pub cover_letter: Option<String>,
    pub portfolio: Option<String>,
    pub linkedin_profile: Option<String>,
    pub skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub applied_at: DateTime<Utc>,
    pub talent_name: String,
    pub talent_last_name: String,
    pub talent_email: String,
    pub talent_phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_payload_rejects_withdrawn_spelling_variants() {
        assert!(serde_json::from_str::<StatusUpdatePayload>(r#"{"status":"underreview"}"#).is_err());
        let ok: StatusUpdatePayload =
            serde_json::from_str(r#"{"status":"under review"}"#).unwrap();
        assert_eq!(ok.status, ApplicationStatus::UnderReview);
    }
}
