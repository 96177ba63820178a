//! Failure types for the auth provider and books API calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is terminal for the user action that caused it. Callers turn
//! these into one alert message: server-provided text when present, otherwise
//! a generic fallback chosen by the caller.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by books API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {status}")]
    Status { status: u16, detail: Option<String> },

    /// A 2xx response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Server-provided `detail`, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail: Some(detail), .. } => Some(detail),
            _ => None,
        }
    }

    /// Message to show the user: the server detail or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_owned()
    }

    /// Build a status error from a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Status { status, detail: parse_error_detail(body) }
    }
}

/// Errors produced by auth provider calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The provider rejected the call and said why.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// The request never produced a response.
    #[error("auth request failed: {0}")]
    Request(String),

    /// The provider response body could not be decoded.
    #[error("auth response parse failed: {0}")]
    Parse(String),
}

impl AuthError {
    /// Message to show the user. Provider text is passed through verbatim.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Build a provider error from a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = parse_auth_message(body).unwrap_or_else(|| format!("auth request failed: {status}"));
        Self::Provider { status, message }
    }
}

#[derive(Deserialize)]
struct DetailBody {
    detail: Option<serde_json::Value>,
}

/// Extract `detail` from an error body.
///
/// Accepts a plain string or a list of `{msg}` validation entries, which are
/// joined with `"; "`. Anything else yields `None`.
pub fn parse_error_detail(body: &str) -> Option<String> {
    let Ok(parsed) = serde_json::from_str::<DetailBody>(body) else {
        return None;
    };
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        serde_json::Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}

#[derive(Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Extract the human-readable message from a GoTrue error body.
pub fn parse_auth_message(body: &str) -> Option<String> {
    let Ok(parsed) = serde_json::from_str::<AuthErrorBody>(body) else {
        return None;
    };
    [parsed.error_description, parsed.msg, parsed.message, parsed.error]
        .into_iter()
        .flatten()
        .find(|message| !message.trim().is_empty())
}
