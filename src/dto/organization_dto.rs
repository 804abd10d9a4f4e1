use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::LocationPayload;
use crate::models::organization::{CompanySize, OrganizationType};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct SocialLinksPayload {
    #[validate(url)]
    pub linkedin: Option<String>,
    #[validate(url)]
    pub twitter: Option<String>,
    #[validate(url)]
    pub facebook: Option<String>,
    #[validate(url)]
    pub glassdoor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub industry: String,
    pub company_size: CompanySize,
    #[validate(nested)]
    pub headquarters: LocationPayload,
    #[validate(email)]
    pub hiring_contact_email: String,
    #[validate(length(min = 1))]
    pub email_domain: String,
    pub logo: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub phone: Option<String>,
    pub mission: Option<String>,
    pub culture: Option<String>,
    pub founded_year: Option<i32>,
    pub locations: Option<Vec<String>>,
    pub organization_type: Option<OrganizationType>,
    #[validate(url)]
    pub careers_page: Option<String>,
    #[validate(nested)]
    pub social_links: Option<SocialLinksPayload>,
    pub office_photos: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub intro_video: Option<String>,
    pub awards: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub industry: Option<String>,
    pub company_size: Option<CompanySize>,
    #[validate(nested)]
    pub headquarters: Option<LocationPayload>,
    #[validate(email)]
    pub hiring_contact_email: Option<String>,
    #[validate(length(min = 1))]
    pub email_domain: Option<String>,
    pub logo: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub phone: Option<String>,
    pub mission: Option<String>,
    pub culture: Option<String>,
    pub founded_year: Option<i32>,
    pub locations: Option<Vec<String>>,
    pub organization_type: Option<OrganizationType>,
    #[validate(url)]
    pub careers_page: Option<String>,
    #[validate(nested)]
    pub social_links: Option<SocialLinksPayload>,
    pub office_photos: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub intro_video: Option<String>,
    pub awards: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FollowerEntry {
    pub user_id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub followed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> CreateOrganizationPayload {
        CreateOrganizationPayload {
            name: "Acme".into(),
            description: "We make anvils".into(),
            industry: "Manufacturing".into(),
            company_size: CompanySize::Medium,
            headquarters: LocationPayload {
                country: "US".into(),
                city: "Toledo".into(),
            },
            hiring_contact_email: "jobs@acme.com".into(),
            email_domain: "acme.com".into(),
            logo: None,
            website: None,
            phone: None,
            mission: None,
            culture: None,
            founded_year: None,
            locations: None,
            organization_type: None,
            careers_page: None,
            social_links: None,
            office_photos: None,
            cover_image: None,
            intro_video: None,
            awards: None,
        }
    }

    #[test]
    fn minimal_payload_is_valid() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn malformed_website_url_is_rejected() {
        let mut payload = minimal();
        payload.website = Some("not a url".into());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn malformed_social_link_is_rejected() {
        let mut payload = minimal();
        payload.social_links = Some(SocialLinksPayload {
            linkedin: Some("linkedin-com/acme".into()),
            ..Default::default()
        });
        assert!(payload.validate().is_err());
    }
}
