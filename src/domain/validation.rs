//! Field-level checks shared by the write paths.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::DomainError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

const MAX_EMAIL_LEN: usize = 254;

/// Trim `value` and reject it when nothing is left.
pub fn require_text(value: &str, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Trim and lowercase an email address after a plausibility check.
pub fn normalize_email(value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("email", "must not be blank"));
    }
    if trimmed.len() > MAX_EMAIL_LEN || !EMAIL_PATTERN.is_match(trimmed) {
        return Err(DomainError::validation("email", "is not a valid address"));
    }
    Ok(trimmed.to_lowercase())
}

/// Trim each tag and drop the empty ones, keeping order and duplicates.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("  hello ", "name").unwrap(), "hello");
        assert_eq!(
            require_text("   ", "name").unwrap_err().field(),
            "name"
        );
    }

    #[test]
    fn normalize_email_accepts_plausible_addresses() {
        assert_eq!(
            normalize_email(" Reader@Example.COM ").unwrap(),
            "reader@example.com"
        );
    }

    #[test]
    fn normalize_email_rejects_garbage() {
        for candidate in ["", "plain", "a@b", "two words@example.com", "@example.com"] {
            assert!(normalize_email(candidate).is_err(), "{candidate}");
        }
    }

    #[test]
    fn normalize_tags_drops_blank_entries() {
        let tags = vec![
            " rust ".to_string(),
            String::new(),
            "Rust".to_string(),
            "  ".to_string(),
            "rust".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["rust", "Rust", "rust"]);
    }
}
