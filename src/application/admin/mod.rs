//! Application services for the administrative surface.

pub mod inbox;
pub mod posts;
