//! # book-tracker
//!
//! Leptos + WASM single-page client for tracking books. Users authenticate
//! against a hosted GoTrue-compatible auth provider, then list, filter, add,
//! re-status, and delete books through a bearer-authenticated REST API.
//!
//! Domain logic (wire types, HTTP clients, session manager, list controller)
//! builds natively and is unit tested; browser glue sits behind the `csr`
//! feature.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;
