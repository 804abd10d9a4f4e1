use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 3, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(nested)]
    pub location: LocationPayload,
    pub role: Role,
    #[validate(length(min = 5))]
    pub phone: String,
    pub company_name: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailQuery {
    pub verification_token: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendVerificationPayload {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserPayload {
    #[validate(length(min = 3, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordPayload {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_validates_field_lengths() {
        let payload = RegisterPayload {
            name: "Jo".into(), // too short
            email: "not-an-email".into(),
            password: "short".into(),
            last_name: "Doe".into(),
            location: LocationPayload {
                country: "US".into(),
                city: "NYC".into(),
            },
            role: Role::Talent,
            phone: "+1234567890".into(),
            company_name: None,
            company_size: None,
            industry: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn register_payload_accepts_valid_input() {
        let payload = RegisterPayload {
            name: "John".into(),
            email: "john@example.com".into(),
            password: "password123".into(),
            last_name: "Doe".into(),
            location: LocationPayload {
                country: "US".into(),
                city: "NYC".into(),
            },
            role: Role::Employer,
            phone: "+1234567890".into(),
            company_name: Some("Acme".into()),
            company_size: Some("51-200".into()),
            industry: Some("Tech".into()),
        };
        assert!(payload.validate().is_ok());
    }
}
