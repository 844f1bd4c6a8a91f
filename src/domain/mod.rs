//! Domain layer types and invariants.

pub mod entities;
pub mod error;
pub mod excerpt;
pub mod front_matter;
pub mod slug;
pub mod validation;
