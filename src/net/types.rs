//! Wire DTOs for the books API and the auth provider.
//!
//! DESIGN
//! ======
//! Field names and enum spellings mirror the JSON on the wire so serde does
//! all of the mapping; display helpers live next to the types they format.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reading status of a book.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Reading,
    Completed,
    Wishlist,
}

impl BookStatus {
    /// Every status in display order.
    pub const ALL: [BookStatus; 3] = [BookStatus::Reading, BookStatus::Completed, BookStatus::Wishlist];

    /// Lowercase wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::Wishlist => "wishlist",
        }
    }

    /// Human-readable label used in `<option>` text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::Completed => "Completed",
            Self::Wishlist => "Wishlist",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "reading" => Ok(Self::Reading),
            "completed" => Ok(Self::Completed),
            "wishlist" => Ok(Self::Wishlist),
            other => Err(format!("unknown book status: {other}")),
        }
    }
}

/// Optional narrowing of the book list to one status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookStatus),
}

impl StatusFilter {
    /// Value for the `status_filter` query parameter, if any.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status.as_str()),
        }
    }

    /// `<select>` value; the empty string stands for "All Books".
    pub fn option_value(self) -> &'static str {
        self.query_value().unwrap_or("")
    }

    /// Parse a `<select>` value. Unknown values fall back to `All`.
    pub fn from_option_value(raw: &str) -> Self {
        raw.parse::<BookStatus>().map_or(Self::All, Self::Only)
    }
}

/// Server-assigned book identifier. Accepts numeric and string ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A book as returned by `GET /books`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
    /// Creation timestamp exactly as the server sent it.
    pub created_at: String,
}

/// Body of `POST /books`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub status: BookStatus,
}

/// Body of `PATCH /books/{id}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: BookStatus,
}

/// Identity attached to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Provider-issued credential bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access-token expiry in Unix seconds, when known.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    /// Whether the access token has expired at `now` (Unix seconds).
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
