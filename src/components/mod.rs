//! Reusable view pieces shared by the dashboard.

pub mod book_card;
pub mod status_options;
