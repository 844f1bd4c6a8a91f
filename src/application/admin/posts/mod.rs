mod commands;
mod import;
mod queries;
mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use import::MAX_IMPORT_DOCUMENTS;
pub use service::*;
pub use types::{
    AdminListPostsRequest, AdminPostError, ImportDocument, ImportOutcome, ImportedPost, PostCommand,
};
