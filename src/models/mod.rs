pub mod application;
pub mod job;
pub mod organization;
pub mod refresh_token;
pub mod user;
