use std::sync::Once;

use axum_extra::extract::cookie::CookieJar;
use careersync_backend::config::init_config;
use careersync_backend::models::user::Role;
use careersync_backend::utils::jwt::{
    attach_auth_cookies, clear_auth_cookies, verify_session_token, TokenUser, ACCESS_COOKIE,
    REFRESH_COOKIE,
};
use uuid::Uuid;

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(|| {
        std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        std::env::set_var("DATABASE_URL", "postgres://localhost/careersync_test");
        std::env::set_var("JWT_SECRET", "integration-test-secret");
        init_config().unwrap();
    });
}

fn token_user() -> TokenUser {
    TokenUser {
        user_id: Uuid::new_v4(),
        name: "Jane".into(),
        role: Role::Talent,
    }
}

#[test]
fn login_attaches_both_session_cookies() {
    setup();
    let user = token_user();
    let jar = attach_auth_cookies(CookieJar::new(), &user, Some("refresh-value")).unwrap();

    let access = jar.get(ACCESS_COOKIE).unwrap();
    assert_eq!(access.http_only(), Some(true));
    assert_eq!(access.path(), Some("/"));

    let claims = verify_session_token(access.value()).unwrap();
    assert_eq!(claims.user.user_id, user.user_id);
    assert!(claims.refresh_token.is_none());

    let refresh = jar.get(REFRESH_COOKIE).unwrap();
    let claims = verify_session_token(refresh.value()).unwrap();
    assert_eq!(claims.refresh_token.as_deref(), Some("refresh-value"));
}

#[test]
fn cookies_can_be_issued_without_refresh_token() {
    setup();
    let jar = attach_auth_cookies(CookieJar::new(), &token_user(), None).unwrap();

    let refresh = jar.get(REFRESH_COOKIE).unwrap();
    let claims = verify_session_token(refresh.value()).unwrap();
    assert!(claims.refresh_token.is_none());
}

#[test]
fn logout_overwrites_cookies_with_sentinel() {
    setup();
    let jar = clear_auth_cookies(CookieJar::new());

    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        let cookie = jar.get(name).unwrap();
        assert_eq!(cookie.value(), "logout");
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(1)));
    }
}

#[test]
fn forged_cookie_value_is_rejected() {
    setup();
    let jar = attach_auth_cookies(CookieJar::new(), &token_user(), None).unwrap();
    let mut forged = jar.get(ACCESS_COOKIE).unwrap().value().to_string();
    forged.push('x');
    assert!(verify_session_token(&forged).is_err());
}
