pub mod application_service;
pub mod auth_service;
pub mod job_service;
pub mod mail_service;
pub mod organization_service;
pub mod talent_service;
