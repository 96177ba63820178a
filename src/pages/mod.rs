//! Top-level screens selected by the session view mode.

pub mod auth;
pub mod dashboard;
