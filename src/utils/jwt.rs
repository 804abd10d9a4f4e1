use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::user::{Role, User};

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Minimal identity payload embedded in session tokens. Never carries the
/// password hash or any other sensitive field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUser {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
}

impl From<&User> for TokenUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub exp: usize,
}

fn sign(claims: &Claims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

fn verify(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Unauthorized("Authentication Invalid".to_string()))
}

pub fn create_session_token(user: &TokenUser, refresh_token: Option<String>) -> Result<String> {
    let config = get_config();
    let exp = (chrono::Utc::now() + chrono::Duration::hours(config.access_token_ttl_hours))
        .timestamp() as usize;
    sign(
        &Claims {
            user: user.clone(),
            refresh_token,
            exp,
        },
        &config.jwt_secret,
    )
}

pub fn verify_session_token(token: &str) -> Result<Claims> {
    verify(token, &get_config().jwt_secret)
}

fn session_cookie(name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
    let config = get_config();
    Cookie::build((name, value))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Single issuance path: both session cookies are built and attached exactly
/// once per login/refresh.
pub fn attach_auth_cookies(
    jar: CookieJar,
    user: &TokenUser,
    refresh_token: Option<&str>,
) -> Result<CookieJar> {
    let config = get_config();
    let max_age = time::Duration::hours(config.access_token_ttl_hours);
    let access = create_session_token(user, None)?;
    let refresh = create_session_token(user, refresh_token.map(str::to_string))?;
    Ok(jar
        .add(session_cookie(ACCESS_COOKIE, access, max_age))
        .add(session_cookie(REFRESH_COOKIE, refresh, max_age)))
}

/// Stateless logout: overwrite both cookies with a sentinel and an immediate
/// expiry. Refresh-token rows are not revoked server side.
pub fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    let max_age = time::Duration::seconds(1);
    jar.add(session_cookie(ACCESS_COOKIE, "logout".to_string(), max_age))
        .add(session_cookie(REFRESH_COOKIE, "logout".to_string(), max_age))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_user() -> TokenUser {
        TokenUser {
            user_id: Uuid::new_v4(),
            name: "Jane".into(),
            role: Role::Talent,
        }
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let user = token_user();
        let claims = Claims {
            user: user.clone(),
            refresh_token: Some("abc".into()),
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        };
        let token = sign(&claims, "secret").unwrap();
        let decoded = verify(&token, "secret").unwrap();
        assert_eq!(decoded.user.user_id, user.user_id);
        assert_eq!(decoded.refresh_token.as_deref(), Some("abc"));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let claims = Claims {
            user: token_user(),
            refresh_token: None,
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        };
        let token = sign(&claims, "secret").unwrap();
        assert!(verify(&token, "other-secret").is_err());

        let mut forged = token.clone();
        forged.push('x');
        assert!(verify(&forged, "secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            user: token_user(),
            refresh_token: None,
            exp: (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp() as usize,
        };
        let token = sign(&claims, "secret").unwrap();
        assert!(verify(&token, "secret").is_err());
    }

    #[test]
    fn projection_excludes_password() {
        let json = serde_json::to_value(token_user()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("userId"));
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("role"));
    }
}
