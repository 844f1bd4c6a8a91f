//! Kabar: a small blog backend with public reading APIs, newsletter and
//! contact intake, and a token-gated admin surface.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
