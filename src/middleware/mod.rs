pub mod auth;
pub mod cors;
pub mod permissions;
pub mod rate_limit;
