use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::{ApplicationWithJob, ApplicationWithTalent};
use crate::dto::talent_dto::ExportRow;
use crate::error::Result;

#[derive(Clone)]
pub struct TalentService {
    pool: PgPool,
}

impl TalentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All applications across every job the employer owns.
    pub async fn list_applicants(&self, employer_id: Uuid) -> Result<Vec<ApplicationWithTalent>> {
        let applications = sqlx::query_as::<_, ApplicationWithTalent>(
            r#"
            SELECT
                a.id, a.job_id, a.talent_id, a.status, a.cv_path, a.cover_letter,
                a.portfolio, a.linkedin_profile, a.skills, a.experience_level, a.applied_at,
                u.name AS talent_name,
                u.last_name AS talent_last_name,
                u.email AS talent_email,
                u.phone AS talent_phone
            FROM job_applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.talent_id
            WHERE j.created_by = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// One talent's applications, scoped to the calling employer's jobs.
    pub async fn talent_applications(
        &self,
        employer_id: Uuid,
        talent_id: Uuid,
    ) -> Result<Vec<ApplicationWithJob>> {
        let applications = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT
                a.id, a.job_id, a.talent_id, a.status, a.cv_path, a.applied_at,
                j.title AS job_title,
                j.position AS job_position,
                j.company AS job_company,
                j.is_closed AS job_is_closed
            FROM job_applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE j.created_by = $1 AND a.talent_id = $2
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(employer_id)
        .bind(talent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    pub async fn export_rows(&self, employer_id: Uuid) -> Result<Vec<ExportRow>> {
        let rows = sqlx::query_as::<_, ExportRow>(
            r#"
            SELECT
                u.name AS talent_name,
                u.email AS talent_email,
                u.phone AS talent_phone,
                j.title AS job_title,
                j.position AS job_position,
                j.company AS job_company,
                a.status::TEXT AS status,
                a.created_at
            FROM job_applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.talent_id
            WHERE j.created_by = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Serialize export rows to an in-memory CSV document.
pub fn rows_to_csv(rows: &[ExportRow]) -> crate::error::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::error::Error::Internal(format!("CSV buffer error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row() -> ExportRow {
        ExportRow {
            talent_name: "Jane".into(),
            talent_email: "jane@example.com".into(),
            talent_phone: "+123456".into(),
            job_title: "Backend Engineer".into(),
            job_position: "Senior".into(),
            job_company: "Acme".into(),
            status: "under review".into(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let bytes = rows_to_csv(&[row()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "talentName,talentEmail,talentPhone,jobTitle,jobPosition,jobCompany,status,createdAt"
        );
        let data = lines.next().unwrap();
        assert!(data.starts_with("Jane,jane@example.com"));
        assert!(data.contains("under review"));
    }

    #[test]
    fn empty_rows_produce_empty_document() {
        let bytes = rows_to_csv(&[]).unwrap();
        assert!(bytes.is_empty());
    }
}
