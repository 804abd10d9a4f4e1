pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, auth_service::AuthService, job_service::JobService,
    mail_service::MailService, organization_service::OrganizationService,
    talent_service::TalentService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub organization_service: OrganizationService,
    pub talent_service: TalentService,
    pub mail_service: MailService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        let auth_service = AuthService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let organization_service = OrganizationService::new(pool.clone());
        let talent_service = TalentService::new(pool.clone());
        let mail_service = MailService::new(
            http_client,
            config.mail_webhook_url.clone(),
            config.mail_from.clone(),
            config.web_origin.clone(),
        );

        Self {
            pool,
            auth_service,
            job_service,
            application_service,
            organization_service,
            talent_service,
            mail_service,
        }
    }
}
