//! Book list controller: fetch and the three mutations.
//!
//! DESIGN
//! ======
//! Every successful mutation is followed by a full reload of the list with the
//! current filter. Nothing is merged or updated optimistically, so the local
//! list is only ever a wholesale copy of the last successful read.
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged and surfaced through the [`Notifier`] with the
//! server's `detail` or a per-action fallback. A failed read is logged only
//! and leaves the previous list in place.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::net::books::BooksApi;
use crate::net::error::ApiError;
use crate::net::types::{Book, BookId, BookStatus, StatusFilter};
use crate::state::books::{BookForm, BooksState};
use crate::util::notify::Notifier;

pub const ADD_FAILED: &str = "Failed to add book";
pub const UPDATE_FAILED: &str = "Failed to update book";
pub const DELETE_FAILED: &str = "Failed to delete book";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this book?";

/// Result of a create/update/delete action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the change and the list was reloaded.
    Applied,
    /// Local validation failed; nothing was sent.
    Rejected,
    /// The user declined the confirmation prompt; nothing was sent.
    Cancelled,
    /// The request failed and the user was told why.
    Failed,
}

/// Where the controller reads the filter and writes list/form updates.
pub trait BookListStore {
    fn filter(&self) -> StatusFilter;
    fn replace_books(&self, books: Vec<Book>);
    fn reset_form(&self);
    /// Drop the list and form after sign-out, keeping the filter.
    fn clear(&self);
}

impl BookListStore for RwSignal<BooksState> {
    fn filter(&self) -> StatusFilter {
        self.try_with_untracked(|s| s.filter).unwrap_or_default()
    }

    fn replace_books(&self, books: Vec<Book>) {
        if self.try_update(|s| s.items = books).is_none() {
            log::debug!("book list disposed before fetch completed");
        }
    }

    fn reset_form(&self) {
        if self.try_update(|s| s.form = BookForm::default()).is_none() {
            log::debug!("book form disposed before create completed");
        }
    }

    fn clear(&self) {
        if self.try_update(BooksState::clear).is_none() {
            log::debug!("book list disposed before sign out completed");
        }
    }
}

impl BookListStore for Rc<RefCell<BooksState>> {
    fn filter(&self) -> StatusFilter {
        self.borrow().filter
    }

    fn replace_books(&self, books: Vec<Book>) {
        self.borrow_mut().items = books;
    }

    fn reset_form(&self) {
        self.borrow_mut().form = BookForm::default();
    }

    fn clear(&self) {
        self.borrow_mut().clear();
    }
}

#[derive(Clone)]
pub struct BookListController<A, S, N> {
    api: A,
    store: S,
    notifier: N,
}

impl<A, S, N> BookListController<A, S, N>
where
    A: BooksApi,
    S: BookListStore,
    N: Notifier,
{
    pub fn new(api: A, store: S, notifier: N) -> Self {
        Self { api, store, notifier }
    }

    /// Replace the local list with the server's. Returns whether it succeeded.
    pub async fn fetch(&self, token: &str, filter: StatusFilter) -> bool {
        match self.api.list(token, filter).await {
            Ok(books) => {
                log::debug!("fetched {} books (filter {filter:?})", books.len());
                self.store.replace_books(books);
                true
            }
            Err(err) => {
                log::error!("failed to fetch books: {err}");
                false
            }
        }
    }

    pub async fn create(&self, token: &str, form: &BookForm) -> MutationOutcome {
        let Some(book) = form.to_new_book() else {
            return MutationOutcome::Rejected;
        };
        match self.api.create(token, &book).await {
            Ok(()) => {
                self.store.reset_form();
                self.reload(token).await;
                MutationOutcome::Applied
            }
            Err(err) => self.report("add book", &err, ADD_FAILED),
        }
    }

    pub async fn update_status(&self, token: &str, id: &BookId, status: BookStatus) -> MutationOutcome {
        match self.api.update_status(token, id, status).await {
            Ok(()) => {
                self.reload(token).await;
                MutationOutcome::Applied
            }
            Err(err) => self.report("update book", &err, UPDATE_FAILED),
        }
    }

    pub async fn delete(&self, token: &str, id: &BookId) -> MutationOutcome {
        if !self.notifier.confirm(DELETE_CONFIRM) {
            return MutationOutcome::Cancelled;
        }
        match self.api.delete(token, id).await {
            Ok(()) => {
                self.reload(token).await;
                MutationOutcome::Applied
            }
            Err(err) => self.report("delete book", &err, DELETE_FAILED),
        }
    }

    async fn reload(&self, token: &str) {
        self.fetch(token, self.store.filter()).await;
    }

    fn report(&self, action: &str, err: &ApiError, fallback: &str) -> MutationOutcome {
        log::error!("{action} failed: {err}");
        self.notifier.alert(&err.user_message(fallback));
        MutationOutcome::Failed
    }
}
