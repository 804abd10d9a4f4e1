use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Internship,
}

impl std::str::FromStr for JobType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(JobType::FullTime),
            "part-time" => Ok(JobType::PartTime),
            "internship" => Ok(JobType::Internship),
            _ => Err(()),
        }
    }
}

/// Employer-facing pipeline label, independent of per-application statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Interview,
    Declined,
}

impl std::str::FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "interview" => Ok(JobStatus::Interview),
            "declined" => Ok(JobStatus::Declined),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub company: String,
    pub title: String,
    pub position: String,
    pub description: String,
    pub job_type: JobType,
    pub job_status: JobStatus,
    pub country: String,
    pub city: String,
    pub application_deadline: Option<DateTime<Utc>>,
    pub is_closed: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Whether the posting still accepts new applications at `now`.
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        if self.is_closed {
            return false;
        }
        match self.application_deadline {
            Some(deadline) => deadline >= now,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job(is_closed: bool, deadline: Option<DateTime<Utc>>) -> Job {
        Job {
            id: Uuid::new_v4(),
            company: "Acme".into(),
            title: "Backend Engineer".into(),
            position: "Senior".into(),
            description: "desc".into(),
            job_type: JobType::FullTime,
            job_status: JobStatus::Pending,
            country: "US".into(),
            city: "NYC".into(),
            application_deadline: deadline,
            is_closed,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn closed_job_rejects_applications() {
        let now = Utc::now();
        assert!(!job(true, None).accepts_applications(now));
    }

    #[test]
    fn past_deadline_rejects_applications() {
        let now = Utc::now();
        assert!(!job(false, Some(now - Duration::hours(1))).accepts_applications(now));
        assert!(job(false, Some(now + Duration::hours(1))).accepts_applications(now));
        assert!(job(false, None).accepts_applications(now));
    }

    #[test]
    fn job_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&JobType::FullTime).unwrap(),
            "\"full-time\""
        );
        assert_eq!("internship".parse::<JobType>(), Ok(JobType::Internship));
        assert!("freelance".parse::<JobType>().is_err());
    }
}
