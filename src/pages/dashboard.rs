//! Signed-in dashboard: add form, status filter, and the book grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only while a session exists. List reloads on sign-in and filter
//! changes are driven by the root component; this page issues the mutations
//! and sign-out, each with a token from `SessionManager::access_token`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::ServicesHandle;
use crate::components::book_card::BookCard;
use crate::components::status_options::status_options;
use crate::controller::BookListStore;
use crate::net::auth::AuthProvider;
use crate::net::types::{Book, BookId, BookStatus, StatusFilter, User};
use crate::state::books::BooksState;
use crate::state::session::{SessionManager, SessionState};
use crate::util::notify::Notifier;

pub const EMPTY_STATE_MESSAGE: &str = "No books found. Add your first book above!";

fn welcome_text(user: Option<&User>) -> String {
    let email = user.and_then(|u| u.email.as_deref()).unwrap_or_default();
    format!("Welcome, {email}")
}

fn books_heading(count: usize) -> String {
    format!("My Books ({count})")
}

/// The list alone. Form keystrokes also update `books`, but they leave this
/// memo unchanged, so nothing that reads it re-runs.
pub fn book_items(books: RwSignal<BooksState>) -> Memo<Vec<Book>> {
    Memo::new(move |_| books.with(|b| b.items.clone()))
}

/// Sign out and, on success, drop the local list and form. Returns the
/// message to alert, if any.
pub async fn sign_out_and_clear<P, S>(sessions: &SessionManager<P>, store: &S) -> Option<String>
where
    P: AuthProvider,
    S: BookListStore,
{
    match sessions.sign_out().await {
        Ok(()) => {
            store.clear();
            None
        }
        Err(err) => {
            log::error!("sign out failed: {err}");
            Some(err.user_message())
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = expect_context::<ServicesHandle>();
    let session = expect_context::<RwSignal<SessionState>>();
    let books = expect_context::<RwSignal<BooksState>>();

    let items = book_items(books);

    let on_sign_out = move |_| {
        let services = services.get_value();
        spawn_local(async move {
            if let Some(message) = sign_out_and_clear(&services.sessions, &books).await {
                services.notifier.alert(&message);
            }
        });
    };

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = books.with_untracked(|b| b.form.clone());
        let services = services.get_value();
        spawn_local(async move {
            if let Some(token) = services.sessions.access_token().await {
                services.books.create(&token, &form).await;
            }
        });
    };

    let on_status_change = Callback::new(move |(id, status): (BookId, BookStatus)| {
        let services = services.get_value();
        spawn_local(async move {
            if let Some(token) = services.sessions.access_token().await {
                services.books.update_status(&token, &id, status).await;
            }
        });
    });

    let on_delete = Callback::new(move |id: BookId| {
        let services = services.get_value();
        spawn_local(async move {
            if let Some(token) = services.sessions.access_token().await {
                services.books.delete(&token, &id).await;
            }
        });
    });

    let form_status = move || books.with(|b| Some(b.form.status));
    let filter_status = move || books.with(|b| match b.filter {
        StatusFilter::All => None,
        StatusFilter::Only(status) => Some(status),
    });

    view! {
        <div class="app">
            <header class="header">
                <h1>"📚 Book Tracker"</h1>
                <div class="user-info">
                    <span>{move || session.with(|s| welcome_text(s.user()))}</span>
                    <button class="btn-secondary" on:click=on_sign_out>
                        "Sign Out"
                    </button>
                </div>
            </header>

            <main class="main">
                <section class="add-book-section">
                    <h2>"Add New Book"</h2>
                    <form class="book-form" on:submit=on_add>
                        <div class="form-row">
                            <input
                                type="text"
                                placeholder="Book Title"
                                required
                                prop:value=move || books.with(|b| b.form.title.clone())
                                on:input=move |ev| books.update(|b| b.form.title = event_target_value(&ev))
                            />
                            <input
                                type="text"
                                placeholder="Author"
                                required
                                prop:value=move || books.with(|b| b.form.author.clone())
                                on:input=move |ev| books.update(|b| b.form.author = event_target_value(&ev))
                            />
                            <select on:change=move |ev| {
                                match event_target_value(&ev).parse::<BookStatus>() {
                                    Ok(status) => books.update(|b| b.form.status = status),
                                    Err(err) => log::warn!("ignoring form status: {err}"),
                                }
                            }>
                                {status_options(form_status)}
                            </select>
                            <button type="submit" class="btn-primary">
                                "Add Book"
                            </button>
                        </div>
                    </form>
                </section>

                <section class="books-section">
                    <div class="books-header">
                        <h2>{move || items.with(|i| books_heading(i.len()))}</h2>
                        <div class="filter-controls">
                            <label>"Filter by status:"</label>
                            <select on:change=move |ev| {
                                let filter = StatusFilter::from_option_value(&event_target_value(&ev));
                                books.update(|b| b.filter = filter);
                            }>
                                <option
                                    value=StatusFilter::All.option_value()
                                    prop:selected=move || filter_status().is_none()
                                >
                                    "All Books"
                                </option>
                                {status_options(filter_status)}
                            </select>
                        </div>
                    </div>

                    <Show
                        when=move || items.with(|i| !i.is_empty())
                        fallback=|| view! {
                            <div class="empty-state">
                                <p>{EMPTY_STATE_MESSAGE}</p>
                            </div>
                        }
                    >
                        <div class="books-grid">
                            // Keyed on the whole book so a reloaded status re-renders its card.
                            <For
                                each=move || items.get()
                                key=|book: &Book| book.clone()
                                children=move |book| {
                                    view! {
                                        <BookCard
                                            book=book
                                            on_status_change=on_status_change
                                            on_delete=on_delete
                                        />
                                    }
                                }
                            />
                        </div>
                    </Show>
                </section>
            </main>
        </div>
    }
}
