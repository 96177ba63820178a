//! Root application component: service wiring, context providers, and the
//! view-mode switch.
//!
//! SYSTEM CONTEXT
//! ==============
//! Services hold `Rc` state and a browser HTTP client, so they live in a
//! local-only `StoredValue` and are shared through context. Session
//! announcements are mirrored into a `SessionState` signal; an effect keyed
//! on (access token, filter) reloads the book list exactly once per change.
//! Every request takes its token from `SessionManager::access_token`, which
//! refreshes an expired token first.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Title, provide_meta_context};

use crate::config::{AppConfig, ConfigError};
use crate::controller::BookListController;
use crate::net::auth::GoTrueClient;
use crate::net::books::HttpBooksApi;
use crate::pages::{auth::AuthPage, dashboard::DashboardPage};
use crate::state::books::{BooksState, FetchKey, FetchTrigger};
use crate::state::session::{BrowserSessionStore, SessionManager, SessionState, ViewMode};
use crate::util::notify::BrowserNotifier;

pub type BooksController = BookListController<HttpBooksApi, RwSignal<BooksState>, BrowserNotifier>;

/// Long-lived collaborators shared by every page.
#[derive(Clone)]
pub struct Services {
    pub sessions: SessionManager<GoTrueClient>,
    pub books: BooksController,
    pub notifier: BrowserNotifier,
}

impl Services {
    pub fn new(config: &AppConfig, books: RwSignal<BooksState>) -> Self {
        let provider = GoTrueClient::new(&config.auth_url, &config.auth_anon_key);
        Self {
            sessions: SessionManager::new(provider, BrowserSessionStore),
            books: BookListController::new(HttpBooksApi::new(&config.api_url), books, BrowserNotifier),
            notifier: BrowserNotifier,
        }
    }
}

pub type ServicesHandle = StoredValue<Services, LocalStorage>;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let body = match AppConfig::from_build_env() {
        Ok(config) => view! { <BookTracker config=config/> }.into_any(),
        Err(err) => {
            log::error!("configuration error: {err}");
            view! { <ConfigErrorPage error=err/> }.into_any()
        }
    };

    view! {
        <Title text="Book Tracker"/>
        {body}
    }
}

#[component]
fn BookTracker(config: AppConfig) -> impl IntoView {
    let session = RwSignal::new(SessionState::default());
    let books = RwSignal::new(BooksState::default());
    let services: ServicesHandle = StoredValue::new_local(Services::new(&config, books));

    let subscription = services.with_value(|s| {
        s.sessions
            .subscribe(move |_event, current| session.update(|state| state.apply(current)))
    });
    // Disposed with this component's owner, which unsubscribes.
    let _subscription = StoredValue::new_local(subscription);

    provide_context(services);
    provide_context(session);
    provide_context(books);

    let sessions = services.with_value(|s| s.sessions.clone());
    spawn_local(async move {
        sessions.restore().await;
    });

    let filter = Memo::new(move |_| books.with(|b| b.filter));
    Effect::new(move |prev: Option<FetchTrigger>| {
        let mut trigger = prev.unwrap_or_default();
        let key = session.with(|s| FetchKey::derive(s, filter.get()));
        if let Some(key) = trigger.observe(key) {
            let services = services.get_value();
            spawn_local(async move {
                if let Some(token) = services.sessions.access_token().await {
                    services.books.fetch(&token, key.filter).await;
                }
            });
        }
        trigger
    });

    let view_mode = Memo::new(move |_| session.with(SessionState::view_mode));

    move || match view_mode.get() {
        ViewMode::Loading => view! { <div class="loading">"Loading..."</div> }.into_any(),
        ViewMode::SignedOut => view! { <AuthPage/> }.into_any(),
        ViewMode::SignedIn => view! { <DashboardPage/> }.into_any(),
    }
}

#[component]
fn ConfigErrorPage(error: ConfigError) -> impl IntoView {
    view! {
        <div class="config-error">
            <h1>"📚 Book Tracker"</h1>
            <p>{error.to_string()}</p>
        </div>
    }
}
