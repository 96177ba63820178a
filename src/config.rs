//! Deployment configuration baked in at build time.
//!
//! Trunk forwards the build environment to `rustc`, so the three endpoints are
//! read with `option_env!` and validated once when the app mounts.

use thiserror::Error;

pub const API_URL_VAR: &str = "BOOK_TRACKER_API_URL";
pub const AUTH_URL_VAR: &str = "BOOK_TRACKER_AUTH_URL";
pub const AUTH_ANON_KEY_VAR: &str = "BOOK_TRACKER_AUTH_ANON_KEY";

/// Errors produced while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable was not set (or was blank) at build time.
    #[error("missing configuration: {var} not set")]
    Missing { var: String },

    /// A URL variable does not use an http(s) scheme.
    #[error("invalid URL in {var}: {value}")]
    InvalidUrl { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Books API base URL, without trailing slash.
    pub api_url: String,
    /// Auth provider base URL, without trailing slash.
    pub auth_url: String,
    /// Public (anon) key sent to the auth provider as `apikey`.
    pub auth_anon_key: String,
}

impl AppConfig {
    /// Build config from the variables captured at compile time.
    ///
    /// Required:
    /// - `BOOK_TRACKER_API_URL`
    /// - `BOOK_TRACKER_AUTH_URL`
    /// - `BOOK_TRACKER_AUTH_ANON_KEY`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or a URL is malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| {
            let value = match var {
                API_URL_VAR => option_env!("BOOK_TRACKER_API_URL"),
                AUTH_URL_VAR => option_env!("BOOK_TRACKER_AUTH_URL"),
                AUTH_ANON_KEY_VAR => option_env!("BOOK_TRACKER_AUTH_ANON_KEY"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or a URL is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = parse_base_url(API_URL_VAR, required(&lookup, API_URL_VAR)?)?;
        let auth_url = parse_base_url(AUTH_URL_VAR, required(&lookup, AUTH_URL_VAR)?)?;
        let auth_anon_key = required(&lookup, AUTH_ANON_KEY_VAR)?;
        Ok(Self { api_url, auth_url, auth_anon_key })
    }
}

fn required<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::Missing { var: var.to_owned() })
}

fn parse_base_url(var: &str, raw: String) -> Result<String, ConfigError> {
    let has_scheme = raw.starts_with("http://") || raw.starts_with("https://");
    let trimmed = raw.trim_end_matches('/');
    let has_host = trimmed.split_once("://").is_some_and(|(_, rest)| !rest.is_empty());
    if !has_scheme || !has_host {
        return Err(ConfigError::InvalidUrl { var: var.to_owned(), value: raw });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
