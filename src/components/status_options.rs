use leptos::prelude::*;

use crate::net::types::BookStatus;

/// `<option>` elements for every status; `selected` picks the chosen one.
pub fn status_options<F>(selected: F) -> impl IntoView
where
    F: Fn() -> Option<BookStatus> + Copy + Send + Sync + 'static,
{
    BookStatus::ALL
        .into_iter()
        .map(|status| {
            view! {
                <option value=status.as_str() prop:selected=move || selected() == Some(status)>
                    {status.label()}
                </option>
            }
        })
        .collect_view()
}
