use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::{ApplicationWithJob, ApplicationWithTalent, ApplyFields};
use crate::error::{Error, Result};
use crate::models::application::{ApplicationStatus, ExperienceLevel, JobApplication};
use crate::models::job::Job;

const APPLICATION_COLUMNS: &str = "id, job_id, talent_id, status, cv_path, cover_letter, \
     portfolio, linkedin_profile, skills, experience_level, availability, \
     location_preferences, referees, applied_at, created_at, updated_at";

/// Error for a repeat application, given the prior attempt's status. A past
/// rejection blocks permanently; anything else is the generic duplicate.
fn reapply_block(prior: ApplicationStatus) -> Error {
    if prior == ApplicationStatus::Rejected {
        Error::BadRequest(
            "Your application was rejected. You cannot reapply to this job".to_string(),
        )
    } else {
        Error::BadRequest("You have already applied for this job".to_string())
    }
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobApplication> {
        let application = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {} FROM job_applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    async fn find_existing(
        &self,
        job_id: Uuid,
        talent_id: Uuid,
    ) -> Result<Option<ApplicationStatus>> {
        let status = sqlx::query_scalar::<_, ApplicationStatus>(
            "SELECT status FROM job_applications WHERE job_id = $1 AND talent_id = $2",
        )
        .bind(job_id)
        .bind(talent_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(status)
    }

    /// Submits an application in state `pending`. The caller has already
    /// resolved the job and stored the CV file. A racing duplicate slips past
    /// the pre-check only to hit the unique index and surface as a conflict.
    pub async fn apply(
        &self,
        job: &Job,
        talent_id: Uuid,
        cv_path: &str,
        fields: ApplyFields,
    ) -> Result<JobApplication> {
        if job.is_closed {
            return Err(Error::BadRequest(
                "This job is no longer accepting applications".to_string(),
            ));
        }
        if !job.accepts_applications(Utc::now()) {
            return Err(Error::BadRequest(
                "The application deadline has passed".to_string(),
            ));
        }

        if let Some(prior) = self.find_existing(job.id, talent_id).await? {
            return Err(reapply_block(prior));
        }

        let application = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            INSERT INTO job_applications (
                job_id, talent_id, cv_path, cover_letter, portfolio, linkedin_profile,
                skills, experience_level, availability, location_preferences, referees
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(job.id)
        .bind(talent_id)
        .bind(cv_path)
        .bind(fields.cover_letter.as_deref())
        .bind(fields.portfolio.as_deref())
        .bind(fields.linkedin_profile.as_deref())
        .bind(&fields.skills)
        .bind(fields.experience_level.unwrap_or(ExperienceLevel::Beginner))
        .bind(fields.availability.as_deref())
        .bind(fields.location_preferences.as_deref())
        .bind(&fields.referees)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    /// Employer-side status transition; `withdrawn` is not assignable here.
    pub async fn update_status(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<JobApplication> {
        if !status.employer_assignable() {
            return Err(Error::BadRequest(format!(
                "Invalid status value: {}",
                status
            )));
        }

        let application = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            UPDATE job_applications
            SET status = $3, updated_at = NOW()
            WHERE job_id = $1 AND talent_id = $2
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(job_id)
        .bind(applicant_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            Error::NotFound("No application found for this job and applicant".to_string())
        })?;

        Ok(application)
    }

    /// Talent-side withdrawal, permitted only before a decision.
    pub async fn withdraw(&self, id: Uuid, talent_id: Uuid) -> Result<JobApplication> {
        let application = self.get_by_id(id).await?;

        if application.talent_id != talent_id {
            return Err(Error::Unauthorized(
                "Not authorized to access this resource".to_string(),
            ));
        }
        if !application.status.withdrawable() {
            return Err(Error::BadRequest(
                "Cannot withdraw after a decision has been made".to_string(),
            ));
        }

        let application = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            UPDATE job_applications
            SET status = 'withdrawn', updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    pub async fn list_for_talent(&self, talent_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
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
            WHERE a.talent_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(talent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationWithTalent>> {
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
            JOIN users u ON u.id = a.talent_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_blocks_reapply_permanently() {
        match reapply_block(ApplicationStatus::Rejected) {
            Error::BadRequest(msg) => {
                assert_eq!(
                    msg,
                    "Your application was rejected. You cannot reapply to this job"
                );
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn other_prior_statuses_report_generic_duplicate() {
        for prior in [
            ApplicationStatus::Pending,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interview,
            ApplicationStatus::Withdrawn,
        ] {
            match reapply_block(prior) {
                Error::BadRequest(msg) => {
                    assert_eq!(msg, "You have already applied for this job");
                }
                other => panic!("expected BadRequest, got {:?}", other),
            }
        }
    }
}
