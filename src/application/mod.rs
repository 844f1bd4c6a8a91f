//! Application services layer.

pub mod admin;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod error;
pub mod newsletter;
pub mod query;
pub mod repos;
