use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "company_size")]
pub enum CompanySize {
    #[sqlx(rename = "1-10")]
    #[serde(rename = "1-10")]
    Micro,
    #[sqlx(rename = "11-50")]
    #[serde(rename = "11-50")]
    Small,
    #[sqlx(rename = "51-200")]
    #[serde(rename = "51-200")]
    Medium,
    #[sqlx(rename = "201-500")]
    #[serde(rename = "201-500")]
    Large,
    #[sqlx(rename = "501-1000")]
    #[serde(rename = "501-1000")]
    VeryLarge,
    #[sqlx(rename = "1000+")]
    #[serde(rename = "1000+")]
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "organization_type")]
pub enum OrganizationType {
    Private,
    Public,
    #[sqlx(rename = "Non-Profit")]
    #[serde(rename = "Non-Profit")]
    NonProfit,
    Startup,
    Government,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub email_domain: String,
    pub phone: Option<String>,
    pub description: String,
    pub mission: Option<String>,
    pub culture: Option<String>,
    pub founded_year: Option<i32>,
    pub industry: String,
    pub company_size: CompanySize,
    pub hq_location: String,
    pub locations: Vec<String>,
    pub organization_type: Option<OrganizationType>,
    pub hiring_contact_email: String,
    pub careers_page: Option<String>,
    pub social_links: Option<JsonValue>,
    pub office_photos: Vec<String>,
    pub cover_image: Option<String>,
    pub intro_video: Option<String>,
    pub awards: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_size_uses_bucket_labels() {
        assert_eq!(
            serde_json::to_string(&CompanySize::Medium).unwrap(),
            "\"51-200\""
        );
        let parsed: CompanySize = serde_json::from_str("\"1000+\"").unwrap();
        assert_eq!(parsed, CompanySize::Enterprise);
    }

    #[test]
    fn non_profit_keeps_hyphenated_label() {
        assert_eq!(
            serde_json::to_string(&OrganizationType::NonProfit).unwrap(),
            "\"Non-Profit\""
        );
    }
}
