use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::auth_dto::{RegisterPayload, UpdatePasswordPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::refresh_token::RefreshToken;
use crate::models::user::{Role, User};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::jwt::TokenUser;
use crate::utils::token::{generate_token_value, tokens_match};

const USER_COLUMNS: &str = "id, name, last_name, email, password_hash, role, phone, country, \
     city, is_verified, verified_at, verification_token, verification_token_expires, \
     company_name, company_size, company_industry, profile_image, created_at, updated_at";

/// Refresh value for a new session, from the user's most recent token row:
/// a row marked invalid refuses the login outright, a valid row is reused,
/// and `None` means the caller mints a fresh row.
fn resolve_refresh_value(existing: Option<RefreshToken>) -> Result<Option<String>> {
    match existing {
        Some(row) if !row.is_valid => {
            Err(Error::Unauthorized("Invalid Credentials".to_string()))
        }
        Some(row) => Ok(Some(row.token)),
        None => Ok(None),
    }
}

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Creates an unverified user and returns it with the verification token
    /// the caller should mail out. No session is established here.
    pub async fn register(&self, payload: RegisterPayload) -> Result<(User, String)> {
        if payload.role == Role::Employer
            && (payload.company_name.is_none()
                || payload.company_size.is_none()
                || payload.industry.is_none())
        {
            return Err(Error::BadRequest(
                "Employer must provide companyName, companySize, and industry".to_string(),
            ));
        }

        let email = payload.email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict("Email already exists".to_string()));
        }

        let verification_token = generate_token_value();
        let expires =
            Utc::now() + Duration::minutes(get_config().verification_token_ttl_minutes);
        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                name, last_name, email, password_hash, role, phone, country, city,
                verification_token, verification_token_expires,
                company_name, company_size, company_industry
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(payload.name.trim())
        .bind(payload.last_name.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(payload.role)
        .bind(payload.phone.trim())
        .bind(payload.location.country.trim())
        .bind(payload.location.city.trim())
        .bind(&verification_token)
        .bind(expires)
        .bind(payload.company_name.as_deref())
        .bind(payload.company_size.as_deref())
        .bind(payload.industry.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok((user, verification_token))
    }

    /// Consumes the single-use verification token.
    pub async fn verify_email(&self, email: &str, token: &str) -> Result<()> {
        let email = email.trim().to_lowercase();
        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| Error::Unauthorized("Please provide valid email address".to_string()))?;

        let expires = user.verification_token_expires.ok_or_else(|| {
            Error::Unauthorized("Verification Failed".to_string())
        })?;
        if expires < Utc::now() {
            return Err(Error::Unauthorized(
                "Verification token expired. Please request a new one.".to_string(),
            ));
        }

        let stored = user
            .verification_token
            .as_deref()
            .ok_or_else(|| Error::Unauthorized("Verification Failed".to_string()))?;
        if !tokens_match(token, stored) {
            return Err(Error::Unauthorized("Verification Failed".to_string()));
        }

        sqlx::query(
            r#"
            UPDATE users
            SET is_verified = TRUE,
                verified_at = NOW(),
                verification_token = NULL,
                verification_token_expires = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reissues a fresh token + expiry for an unverified account.
    pub async fn resend_verification(&self, email: &str) -> Result<(User, String)> {
        let email = email.trim().to_lowercase();
        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| Error::Unauthorized("No account found with this email".to_string()))?;

        if user.is_verified {
            return Err(Error::BadRequest("Account already verified".to_string()));
        }

        let verification_token = generate_token_value();
        let expires =
            Utc::now() + Duration::minutes(get_config().verification_token_ttl_minutes);

        sqlx::query(
            r#"
            UPDATE users
            SET verification_token = $2,
                verification_token_expires = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&verification_token)
        .bind(expires)
        .execute(&self.pool)
        .await?;

        Ok((user, verification_token))
    }

    /// Authenticates credentials and resolves the refresh-token value for
    /// this session: reuse an existing valid row, reject an invalidated one,
    /// otherwise persist a fresh row bound to the client metadata.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip: Option<String>,
        user_agent: Option<String>,
    ) -> Result<(TokenUser, String)> {
        let email = email.trim().to_lowercase();
        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid Credentials".to_string()))?;

        let password_ok = verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !password_ok {
            return Err(Error::Unauthorized("Invalid Credentials".to_string()));
        }
        if !user.is_verified {
            return Err(Error::Unauthorized("Please verify your email".to_string()));
        }

        let token_user = TokenUser::from(&user);

        let existing = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT id, user_id, token, is_valid, ip, user_agent, created_at, updated_at
            FROM refresh_tokens
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await?;

        let refresh_value = match resolve_refresh_value(existing)? {
            Some(value) => value,
            None => {
                let value = generate_token_value();
                sqlx::query(
                    r#"
                    INSERT INTO refresh_tokens (user_id, token, ip, user_agent)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(user.id)
                .bind(&value)
                .bind(ip.as_deref())
                .bind(user_agent.as_deref())
                .execute(&self.pool)
                .await?;
                value
            }
        };

        Ok((token_user, refresh_value))
    }

    pub async fn update_user(&self, user_id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        let email = payload.email.trim().to_lowercase();
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(payload.name.trim())
        .bind(&email)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn update_password(
        &self,
        user_id: Uuid,
        payload: UpdatePasswordPayload,
    ) -> Result<()> {
        if payload.old_password == payload.new_password {
            return Err(Error::BadRequest(
                "New password must be different from the old password".to_string(),
            ));
        }

        let user = self.get_user(user_id).await?;
        let password_ok = verify_password(&payload.old_password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !password_ok {
            return Err(Error::Unauthorized("Invalid Credentials".to_string()));
        }

        let password_hash = hash_password(&payload.new_password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_row(is_valid: bool) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: "abc123".to_string(),
            is_valid,
            ip: None,
            user_agent: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn invalidated_refresh_row_refuses_login() {
        let err = resolve_refresh_value(Some(token_row(false))).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn valid_refresh_row_is_reused() {
        let value = resolve_refresh_value(Some(token_row(true))).unwrap();
        assert_eq!(value.as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_refresh_row_means_mint_a_new_one() {
        assert!(resolve_refresh_value(None).unwrap().is_none());
    }
}
