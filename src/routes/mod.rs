pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod organizations;
pub mod talents;
