use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::Error;
use crate::models::user::Role;
use crate::utils::jwt::{self, TokenUser, ACCESS_COOKIE};

fn authenticate(req: &Request) -> Result<TokenUser, Error> {
    let jar = CookieJar::from_headers(req.headers());
    let cookie = jar
        .get(ACCESS_COOKIE)
        .ok_or_else(|| Error::Unauthorized("Authentication Invalid".to_string()))?;
    let claims = jwt::verify_session_token(cookie.value())?;
    Ok(claims.user)
}

/// Validates the access-token cookie and attaches the token-user projection
/// to the request for downstream handlers.
pub async fn require_auth(mut req: Request, next: Next) -> Response {
    match authenticate(&req) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

pub async fn require_employer(req: Request, next: Next) -> Response {
    require_role(req, next, Role::Employer).await
}

pub async fn require_talent(req: Request, next: Next) -> Response {
    require_role(req, next, Role::Talent).await
}

async fn require_role(mut req: Request, next: Next, role: Role) -> Response {
    match authenticate(&req) {
        Ok(user) if user.role == role => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(_) => Error::Unauthorized("Unauthorized to access this route".to_string())
            .into_response(),
        Err(err) => err.into_response(),
    }
}
