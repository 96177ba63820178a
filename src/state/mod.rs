//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns identity and the provider subscription; `books` holds the
//! list, the add-book form, and the filter that drives reloads.

pub mod books;
pub mod session;
