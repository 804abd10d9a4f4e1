use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, JobApplicant, JobListQuery, UpdateJobPayload};
use crate::error::Result;
use crate::models::job::{Job, JobStatus, JobType};

const JOB_COLUMNS: &str = "id, company, title, position, description, job_type, job_status, \
     country, city, application_deadline, is_closed, created_by, created_at, updated_at";

const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub jobs: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobPayload, created_by: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (
                company, title, position, description, job_type, job_status,
                country, city, application_deadline, created_by
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(payload.company.trim())
        .bind(payload.title.trim())
        .bind(payload.position.trim())
        .bind(payload.description.trim())
        .bind(payload.job_type.unwrap_or(JobType::FullTime))
        .bind(payload.job_status.unwrap_or(JobStatus::Pending))
        .bind(payload.job_location.country.trim())
        .bind(payload.job_location.city.trim())
        .bind(payload.application_deadline)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    fn push_filters(builder: &mut QueryBuilder<Postgres>, owner: Uuid, query: &JobListQuery) {
        builder.push(" WHERE created_by = ").push_bind(owner);

        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            builder
                .push(" AND (position ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR company ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR title ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        // "all" is a passthrough; unknown labels are ignored rather than failing
        if let Some(status) = query
            .job_status
            .as_deref()
            .and_then(|s| s.parse::<JobStatus>().ok())
        {
            builder.push(" AND job_status = ").push_bind(status);
        }
        if let Some(job_type) = query
            .job_type
            .as_deref()
            .and_then(|s| s.parse::<JobType>().ok())
        {
            builder.push(" AND job_type = ").push_bind(job_type);
        }
    }

    /// Owner-scoped, filtered, sorted, paginated listing.
    pub async fn list(&self, owner: Uuid, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
        let offset = (page - 1) * limit;
        let sort = query.sort.unwrap_or_default();

        let mut count_builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        Self::push_filters(&mut count_builder, owner, &query);
        let total: i64 = count_builder
            .build()
            .fetch_one(&self.pool)
            .await?
            .get(0);

        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
        Self::push_filters(&mut builder, owner, &query);
        builder
            .push(format!(" ORDER BY {}", sort.order_clause()))
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let jobs = builder.build_query_as::<Job>().fetch_all(&self.pool).await?;

        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

        Ok(JobList {
            jobs,
            total,
            page,
            total_pages,
        })
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let (country, city) = match payload.job_location {
            Some(loc) => (Some(loc.country), Some(loc.city)),
            None => (None, None),
        };

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET
                company = COALESCE($2, company),
                title = COALESCE($3, title),
                position = COALESCE($4, position),
                description = COALESCE($5, description),
                job_type = COALESCE($6, job_type),
                job_status = COALESCE($7, job_status),
                country = COALESCE($8, country),
                city = COALESCE($9, city),
                application_deadline = COALESCE($10, application_deadline),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(payload.company)
        .bind(payload.title)
        .bind(payload.position)
        .bind(payload.description)
        .bind(payload.job_type)
        .bind(payload.job_status)
        .bind(country)
        .bind(city)
        .bind(payload.application_deadline)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Idempotent: closing an already-closed job succeeds.
    pub async fn close(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET is_closed = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    /// Applicant view computed from `job_applications` on read.
    pub async fn applicants(&self, job_id: Uuid) -> Result<Vec<JobApplicant>> {
        let applicants = sqlx::query_as::<_, JobApplicant>(
            r#"
            SELECT
                a.talent_id,
                u.name AS talent_name,
                u.email AS talent_email,
                a.status,
                a.applied_at,
                a.cv_path AS resume
            FROM job_applications a
            JOIN users u ON u.id = a.talent_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applicants)
    }
}
