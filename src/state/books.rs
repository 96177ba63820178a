#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use super::session::SessionState;
use crate::net::types::{Book, BookStatus, NewBook, StatusFilter};

/// Add-book form buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub status: BookStatus,
}

impl BookForm {
    /// Trimmed request body, or `None` when title or author is blank.
    pub fn to_new_book(&self) -> Option<NewBook> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return None;
        }
        Some(NewBook { title: title.to_owned(), author: author.to_owned(), status: self.status })
    }
}

/// Book list, form buffer, and active filter for the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BooksState {
    /// Last fetched list, replaced wholesale.
    pub items: Vec<Book>,
    pub form: BookForm,
    pub filter: StatusFilter,
}

impl BooksState {
    /// Drop the list and form after sign-out. The filter is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.form = BookForm::default();
    }
}

/// Inputs that determine which list the dashboard should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchKey {
    pub access_token: String,
    pub filter: StatusFilter,
}

impl FetchKey {
    /// `None` while loading or signed out.
    pub fn derive(session: &SessionState, filter: StatusFilter) -> Option<Self> {
        let access_token = session.access_token()?.to_owned();
        Some(Self { access_token, filter })
    }
}

/// Decides when a list reload is due.
///
/// Fires once for every change to a present [`FetchKey`]; repeated
/// observations of the same key and signed-out states never fire.
#[derive(Clone, Debug, Default)]
pub struct FetchTrigger {
    last: Option<FetchKey>,
}

impl FetchTrigger {
    pub fn observe(&mut self, key: Option<FetchKey>) -> Option<FetchKey> {
        if key == self.last {
            return None;
        }
        self.last.clone_from(&key);
        key
    }
}
