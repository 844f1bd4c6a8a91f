//! Single-account admin gate backed by configured credentials.

use metrics::counter;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::warn;

use crate::config::AdminSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminAuthError {
    #[error("admin access is not configured")]
    Disabled,
    #[error("missing bearer token")]
    Missing,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid bearer token")]
    InvalidToken,
}

#[derive(Debug, Clone)]
pub struct AdminPrincipal {
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub username: String,
}

struct Credentials {
    username: String,
    username_hash: Vec<u8>,
    password_hash: Vec<u8>,
    token: String,
    token_hash: Vec<u8>,
}

pub struct AdminAuthService {
    credentials: Option<Credentials>,
}

impl AdminAuthService {
    pub fn new(settings: &AdminSettings) -> Self {
        let credentials = match (settings.password.as_ref(), settings.token.as_ref()) {
            (Some(password), Some(token)) => Some(Credentials {
                username: settings.username.clone(),
                username_hash: digest(&settings.username),
                password_hash: digest(password),
                token: token.clone(),
                token_hash: digest(token),
            }),
            _ => None,
        };
        Self { credentials }
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Exchange username and password for the admin bearer token.
    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession, AdminAuthError> {
        let credentials = self.credentials.as_ref().ok_or(AdminAuthError::Disabled)?;

        let username_ok = credentials.username_hash.ct_eq(&digest(username.trim()));
        let password_ok = credentials.password_hash.ct_eq(&digest(password));
        if (username_ok & password_ok).unwrap_u8() == 0 {
            counter!("kabar_admin_login_failures_total").increment(1);
            warn!(
                target = "kabar::application::auth",
                username = username,
                "admin login rejected"
            );
            return Err(AdminAuthError::InvalidCredentials);
        }

        Ok(AdminSession {
            token: credentials.token.clone(),
            username: credentials.username.clone(),
        })
    }

    /// Validate the value of an `Authorization` header.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AdminPrincipal, AdminAuthError> {
        let credentials = self.credentials.as_ref().ok_or(AdminAuthError::Disabled)?;
        let header = header.ok_or(AdminAuthError::Missing)?;
        let token = parse_bearer(header).ok_or(AdminAuthError::InvalidToken)?;

        if credentials.token_hash.ct_eq(&digest(token)).unwrap_u8() == 0 {
            return Err(AdminAuthError::InvalidToken);
        }

        Ok(AdminPrincipal {
            username: credentials.username.clone(),
        })
    }
}

fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn digest(value: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().to_vec()
}
