use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Talent,
    Employer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Talent => write!(f, "talent"),
            Role::Employer => write!(f, "employer"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub is_verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub verification_token_expires: Option<DateTime<Utc>>,
    pub company_name: Option<String>,
    pub company_size: Option<String>,
    pub company_industry: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_json() {
        let role: Role = serde_json::from_str("\"employer\"").unwrap();
        assert_eq!(role, Role::Employer);
        assert_eq!(serde_json::to_string(&Role::Talent).unwrap(), "\"talent\"");
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }
}
