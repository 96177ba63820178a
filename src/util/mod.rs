//! Small browser and formatting helpers shared across pages.

pub mod clock;
pub mod dates;
pub mod notify;
pub mod persistence;
