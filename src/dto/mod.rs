pub mod application_dto;
pub mod auth_dto;
pub mod job_dto;
pub mod organization_dto;
pub mod talent_dto;
