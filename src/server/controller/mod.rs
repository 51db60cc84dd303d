//! HTTP request handlers.
//!
//! Controllers extract request data, apply access control, call the services and convert
//! domain models to DTOs.

pub mod auth;
pub mod player;
