//! Networking modules for the auth provider and the books REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` talks to the GoTrue endpoints, `books` to the books API, `error`
//! holds the shared failure types, and `types` defines the wire schema.

pub mod auth;
pub mod books;
pub mod error;
pub mod types;
