//! Session manager and session-derived view state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The manager wraps an [`AuthProvider`], keeps the current session, persists
//! it through a [`SessionStore`], and announces every change to subscribers.
//! The root component subscribes once and mirrors announcements into a
//! `SessionState` signal, which in turn selects the view mode.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::net::auth::{AuthProvider, SignUpOutcome};
use crate::net::error::AuthError;
use crate::net::types::{Session, User};
use crate::util::{clock, persistence};

/// localStorage key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "book-tracker.session";

// =============================================================================
// VIEW STATE
// =============================================================================

/// Which top-level screen to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Loading,
    SignedOut,
    SignedIn,
}

/// Session snapshot mirrored into the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// True until the initial session lookup completes.
    pub loading: bool,
    pub session: Option<Session>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { loading: true, session: None }
    }
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    /// Overwrite with the latest announced session.
    pub fn apply(&mut self, session: Option<&Session>) {
        self.loading = false;
        self.session = session.cloned();
    }

    pub fn view_mode(&self) -> ViewMode {
        if self.loading {
            ViewMode::Loading
        } else if self.session.is_some() {
            ViewMode::SignedIn
        } else {
            ViewMode::SignedOut
        }
    }
}

/// Reason a session announcement was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// Result of the startup lookup (possibly no session).
    InitialSession,
    SignedIn,
    /// An expired access token was exchanged for a new one.
    TokenRefreshed,
    SignedOut,
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Where the current session survives page reloads.
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: Option<&Session>);
}

/// Persists the session as JSON in `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<Session> {
        persistence::load_json(SESSION_STORAGE_KEY)
    }

    fn save(&self, session: Option<&Session>) {
        match session {
            Some(session) => persistence::save_json(SESSION_STORAGE_KEY, session),
            None => persistence::remove(SESSION_STORAGE_KEY),
        }
    }
}

/// In-memory store; clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    slot: Rc<RefCell<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(session))) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    fn save(&self, session: Option<&Session>) {
        *self.slot.borrow_mut() = session.cloned();
    }
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

type Listener = Rc<dyn Fn(AuthEvent, Option<&Session>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle for a session-change listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    listeners: Weak<RefCell<Listeners>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

// =============================================================================
// MANAGER
// =============================================================================

struct Inner<P> {
    provider: P,
    store: Box<dyn SessionStore>,
    current: RefCell<Option<Session>>,
    listeners: Rc<RefCell<Listeners>>,
    clock: fn() -> i64,
}

/// Session lifecycle on top of an auth provider. Clones share state.
pub struct SessionManager<P> {
    inner: Rc<Inner<P>>,
}

impl<P> Clone for SessionManager<P> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<P: AuthProvider> SessionManager<P> {
    pub fn new(provider: P, store: impl SessionStore + 'static) -> Self {
        Self::with_clock(provider, store, clock::now_secs)
    }

    pub fn with_clock(provider: P, store: impl SessionStore + 'static, clock: fn() -> i64) -> Self {
        Self {
            inner: Rc::new(Inner {
                provider,
                store: Box::new(store),
                current: RefCell::new(None),
                listeners: Rc::new(RefCell::new(Listeners::default())),
                clock,
            }),
        }
    }

    /// The cached session, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    /// Register a listener for every session announcement.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(AuthEvent, Option<&Session>) + 'static,
    {
        let mut listeners = self.inner.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(callback)));
        Subscription { listeners: Rc::downgrade(&self.inner.listeners), id }
    }

    /// Load the persisted session, refreshing it if the access token expired.
    ///
    /// Always announces [`AuthEvent::InitialSession`].
    pub async fn restore(&self) -> Option<Session> {
        let session = match self.inner.store.load() {
            Some(stored) if stored.is_expired((self.inner.clock)()) => {
                let refreshed = self.refresh_expired(&stored).await;
                self.inner.store.save(refreshed.as_ref());
                refreshed
            }
            other => other,
        };
        self.inner.current.replace(session.clone());
        self.notify(AuthEvent::InitialSession, session.as_ref());
        session
    }

    /// Bearer token for an API call, refreshed first if it has expired.
    ///
    /// `None` when signed out. A rejected refresh ends the session and
    /// announces [`AuthEvent::SignedOut`].
    pub async fn access_token(&self) -> Option<String> {
        let session = self.current()?;
        if !session.is_expired((self.inner.clock)()) {
            return Some(session.access_token);
        }
        let refreshed = self.refresh_expired(&session).await;

        // Another caller may have refreshed or signed out while this one waited.
        let current = self.current();
        if current.as_ref().map(|c| c.access_token.as_str()) != Some(session.access_token.as_str()) {
            return current.map(|c| c.access_token);
        }
        match refreshed {
            Some(refreshed) => {
                self.inner.store.save(Some(&refreshed));
                self.inner.current.replace(Some(refreshed.clone()));
                self.notify(AuthEvent::TokenRefreshed, Some(&refreshed));
                Some(refreshed.access_token)
            }
            None => {
                self.clear();
                None
            }
        }
    }

    async fn refresh_expired(&self, expired: &Session) -> Option<Session> {
        let Some(refresh_token) = expired.refresh_token.as_deref() else {
            log::info!("session expired without refresh token");
            return None;
        };
        match self.inner.provider.refresh(refresh_token).await {
            Ok(session) => {
                log::debug!("refreshed expired session");
                Some(session)
            }
            Err(err) => {
                log::warn!("session refresh failed: {err}");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]; session state is unchanged.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let outcome = self.inner.provider.sign_up(email, password).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.establish(session.clone());
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]; session state is unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let session = self.inner.provider.sign_in(email, password).await?;
        self.establish(session);
        Ok(())
    }

    /// Revoke the token and drop the session.
    ///
    /// A provider answer of 401, 403, or 404 means the token is already dead
    /// server-side, so the local session is cleared anyway.
    ///
    /// # Errors
    ///
    /// Returns any other [`AuthError`]; the session is kept.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.inner.current.borrow().as_ref().map(|s| s.access_token.clone());
        if let Some(token) = token {
            match self.inner.provider.sign_out(&token).await {
                Ok(()) => {}
                Err(err @ AuthError::Provider { status: 401 | 403 | 404, .. }) => {
                    log::info!("token already invalid at sign out, clearing locally: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        self.clear();
        Ok(())
    }

    fn clear(&self) {
        self.inner.store.save(None);
        self.inner.current.replace(None);
        self.notify(AuthEvent::SignedOut, None);
    }

    fn establish(&self, session: Session) {
        self.inner.store.save(Some(&session));
        self.inner.current.replace(Some(session.clone()));
        self.notify(AuthEvent::SignedIn, Some(&session));
    }

    fn notify(&self, event: AuthEvent, session: Option<&Session>) {
        log::debug!("auth event {event:?}");
        // Snapshot so listeners may subscribe or unsubscribe re-entrantly.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event, session);
        }
    }
}
