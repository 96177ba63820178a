//! Scripted fakes for the provider, the books API, and user prompts.

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::net::auth::{AuthProvider, SignUpOutcome};
use crate::net::books::BooksApi;
use crate::net::error::{ApiError, AuthError};
use crate::net::types::{Book, BookId, BookStatus, NewBook, Session, StatusFilter, User};
use crate::util::notify::Notifier;

pub fn session(token: &str) -> Session {
    Session {
        access_token: token.to_owned(),
        refresh_token: Some(format!("refresh-{token}")),
        expires_at: Some(10_000),
        user: User { id: Uuid::nil(), email: Some("reader@example.com".to_owned()) },
    }
}

pub fn book(id: i64, title: &str, author: &str, status: BookStatus) -> Book {
    Book {
        id: BookId::Number(id),
        title: title.to_owned(),
        author: author.to_owned(),
        status,
        created_at: "2024-01-01".to_owned(),
    }
}

// =============================================================
// Auth provider
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthCall {
    SignUp(String),
    SignIn(String),
    Refresh(String),
    SignOut(String),
}

pub struct FakeAuthState {
    pub sign_up: Result<SignUpOutcome, AuthError>,
    pub sign_in: Result<Session, AuthError>,
    pub refresh: Result<Session, AuthError>,
    pub sign_out: Result<(), AuthError>,
    pub calls: Vec<AuthCall>,
}

#[derive(Clone)]
pub struct FakeAuth {
    pub state: Rc<RefCell<FakeAuthState>>,
}

impl FakeAuth {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeAuthState {
                sign_up: Ok(SignUpOutcome::ConfirmationRequired),
                sign_in: Ok(session("tok-1")),
                refresh: Ok(session("tok-refreshed")),
                sign_out: Ok(()),
                calls: Vec::new(),
            })),
        }
    }

    pub fn calls(&self) -> Vec<AuthCall> {
        self.state.borrow().calls.clone()
    }
}

impl AuthProvider for FakeAuth {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<SignUpOutcome, AuthError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(AuthCall::SignUp(email.to_owned()));
        state.sign_up.clone()
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(AuthCall::SignIn(email.to_owned()));
        state.sign_in.clone()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(AuthCall::Refresh(refresh_token.to_owned()));
        state.refresh.clone()
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(AuthCall::SignOut(access_token.to_owned()));
        state.sign_out.clone()
    }
}

// =============================================================
// Books API
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BooksCall {
    List(StatusFilter),
    Create(NewBook),
    UpdateStatus(BookId, BookStatus),
    Delete(BookId),
}

#[derive(Default)]
pub struct FakeBooksState {
    pub books: Vec<Book>,
    pub list_error: Option<ApiError>,
    pub mutation_error: Option<ApiError>,
    pub calls: Vec<BooksCall>,
    pub tokens: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeBooks {
    pub state: Rc<RefCell<FakeBooksState>>,
}

impl FakeBooks {
    pub fn with_books(books: Vec<Book>) -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().books = books;
        fake
    }

    pub fn calls(&self) -> Vec<BooksCall> {
        self.state.borrow().calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, BooksCall::List(_))).count()
    }

    fn record(&self, token: &str, call: BooksCall) {
        let mut state = self.state.borrow_mut();
        state.tokens.push(token.to_owned());
        state.calls.push(call);
    }

    fn mutation_result(&self) -> Result<(), ApiError> {
        self.state.borrow().mutation_error.clone().map_or(Ok(()), Err)
    }
}

impl BooksApi for FakeBooks {
    async fn list(&self, token: &str, filter: StatusFilter) -> Result<Vec<Book>, ApiError> {
        self.record(token, BooksCall::List(filter));
        let state = self.state.borrow();
        if let Some(err) = &state.list_error {
            return Err(err.clone());
        }
        Ok(state
            .books
            .iter()
            .filter(|b| filter.query_value().is_none_or(|status| b.status.as_str() == status))
            .cloned()
            .collect())
    }

    async fn create(&self, token: &str, book: &NewBook) -> Result<(), ApiError> {
        self.record(token, BooksCall::Create(book.clone()));
        self.mutation_result()
    }

    async fn update_status(&self, token: &str, id: &BookId, status: BookStatus) -> Result<(), ApiError> {
        self.record(token, BooksCall::UpdateStatus(id.clone(), status));
        self.mutation_result()
    }

    async fn delete(&self, token: &str, id: &BookId) -> Result<(), ApiError> {
        self.record(token, BooksCall::Delete(id.clone()));
        self.mutation_result()
    }
}

// =============================================================
// Prompts
// =============================================================

#[derive(Clone, Default)]
pub struct ScriptedNotifier {
    pub confirm_answer: bool,
    pub alerts: Rc<RefCell<Vec<String>>>,
    pub confirms: Rc<RefCell<Vec<String>>>,
}

impl ScriptedNotifier {
    pub fn answering(confirm_answer: bool) -> Self {
        Self { confirm_answer, ..Self::default() }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Notifier for ScriptedNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_owned());
        self.confirm_answer
    }
}
