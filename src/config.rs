use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_ttl_hours: i64,
    pub verification_token_ttl_minutes: i64,
    pub web_origin: String,
    pub mail_from: String,
    pub mail_webhook_url: Option<String>,
    pub uploads_dir: String,
    pub cookie_secure: bool,
    pub auth_rps: u32,
    pub public_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            access_token_ttl_hours: get_env_or_parse("ACCESS_TOKEN_TTL_HOURS", 24)?,
            verification_token_ttl_minutes: get_env_or_parse("VERIFICATION_TOKEN_TTL_MINUTES", 10)?,
            web_origin: env::var("WEB_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "\"CareerSync\" <no-reply@careersync.com>".to_string()),
            mail_webhook_url: env::var("MAIL_WEBHOOK_URL").ok(),
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
            cookie_secure: get_env_or_parse("COOKIE_SECURE", false)?,
            auth_rps: get_env_or_parse("AUTH_RPS", 10)?,
            public_rps: get_env_or_parse("PUBLIC_RPS", 50)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or_parse<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
