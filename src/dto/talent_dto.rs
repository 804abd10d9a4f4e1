use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One row of the employer's applications export.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub talent_name: String,
    pub talent_email: String,
    pub talent_phone: String,
    pub job_title: String,
    pub job_position: String,
    pub job_company: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
