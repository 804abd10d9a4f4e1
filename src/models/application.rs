use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full status domain, including the terminal `withdrawn` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    #[sqlx(rename = "under review")]
    #[serde(rename = "under review")]
    UnderReview,
    Shortlisted,
    Interview,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    /// Statuses an employer may assign. `withdrawn` is reserved for the
    /// talent-initiated withdraw operation.
    pub fn employer_assignable(self) -> bool {
        !matches!(self, ApplicationStatus::Withdrawn)
    }

    /// A talent may withdraw only before a decision has been made.
    pub fn withdrawable(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Pending | ApplicationStatus::UnderReview
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under review",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl std::str::FromStr for ExperienceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "expert" => Ok(ExperienceLevel::Expert),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
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
    pub availability: Option<String>,
    pub location_preferences: Option<String>,
    pub referees: Vec<String>,
    pub applied_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pre_decision_statuses_are_withdrawable() {
        assert!(ApplicationStatus::Pending.withdrawable());
        assert!(ApplicationStatus::UnderReview.withdrawable());
        assert!(!ApplicationStatus::Shortlisted.withdrawable());
        assert!(!ApplicationStatus::Interview.withdrawable());
        assert!(!ApplicationStatus::Rejected.withdrawable());
        assert!(!ApplicationStatus::Withdrawn.withdrawable());
    }

    #[test]
    fn withdrawn_is_not_employer_assignable() {
        assert!(!ApplicationStatus::Withdrawn.employer_assignable());
        assert!(ApplicationStatus::Rejected.employer_assignable());
        assert!(ApplicationStatus::Pending.employer_assignable());
    }

    #[test]
    fn under_review_uses_spaced_label() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::UnderReview).unwrap(),
            "\"under review\""
        );
        let parsed: ApplicationStatus = serde_json::from_str("\"under review\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::UnderReview);
        assert_eq!(ApplicationStatus::UnderReview.to_string(), "under review");
    }
}
