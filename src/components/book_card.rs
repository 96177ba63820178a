//! Card for one book in the dashboard grid.
//!
//! DESIGN
//! ======
//! The card owns no book state. Status changes and deletes are reported
//! upward as callbacks so the dashboard can route them through the list
//! controller. The status select always shows `book.status`: after a pick it
//! is rebuilt from the book, and only a reloaded list carrying the new status
//! moves it. A rejected update therefore leaves the old status on screen.

#[cfg(test)]
#[path = "book_card_test.rs"]
mod book_card_test;

use leptos::prelude::*;

use super::status_options::status_options;
use crate::net::types::{Book, BookId, BookStatus};
use crate::util::dates::format_date;

#[component]
pub fn BookCard(
    book: Book,
    on_status_change: Callback<(BookId, BookStatus)>,
    on_delete: Callback<BookId>,
) -> impl IntoView {
    let Book { id, title, author, status, created_at } = book;
    let status_id = id.clone();
    let picks = RwSignal::new(0_u32);

    view! {
        <div class="book-card">
            <div class="book-info">
                <h3>{title}</h3>
                <p class="author">{author_line(&author)}</p>
                <div class="book-meta">
                    {move || {
                        picks.track();
                        let status_id = status_id.clone();
                        view! {
                            <select
                                class=status_badge_class(status)
                                on:change=move |ev| {
                                    if let Some(next) = status_pick(status, &event_target_value(&ev)) {
                                        on_status_change.run((status_id.clone(), next));
                                    }
                                    picks.update(|n| *n += 1);
                                }
                            >
                                {status_options(move || Some(status))}
                            </select>
                        }
                    }}
                    <span class="date">{added_label(&created_at)}</span>
                </div>
            </div>
            <button
                class="delete-btn"
                title="Delete book"
                aria-label="Delete book"
                on:click=move |_| on_delete.run(id.clone())
            >
                "🗑️"
            </button>
        </div>
    }
}

/// Status to request for a select value, if it names a different status.
fn status_pick(current: BookStatus, raw: &str) -> Option<BookStatus> {
    match raw.parse::<BookStatus>() {
        Ok(next) if next != current => Some(next),
        Ok(_) => None,
        Err(err) => {
            log::warn!("ignoring status change: {err}");
            None
        }
    }
}

fn author_line(author: &str) -> String {
    format!("by {author}")
}

fn added_label(created_at: &str) -> String {
    format!("Added {}", format_date(created_at))
}

fn status_badge_class(status: BookStatus) -> String {
    format!("status-badge status-{status}")
}
