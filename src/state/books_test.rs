use super::*;
use crate::test_support::session;

fn signed_in(token: &str) -> SessionState {
    let mut state = SessionState::default();
    state.apply(Some(&session(token)));
    state
}

fn signed_out() -> SessionState {
    let mut state = SessionState::default();
    state.apply(None);
    state
}

// =============================================================
// BookForm
// =============================================================

#[test]
fn book_form_defaults_to_reading() {
    let form = BookForm::default();
    assert!(form.title.is_empty());
    assert!(form.author.is_empty());
    assert_eq!(form.status, BookStatus::Reading);
}

#[test]
fn book_form_rejects_blank_title_or_author() {
    let form = BookForm { title: String::new(), author: "Herbert".to_owned(), status: BookStatus::Reading };
    assert!(form.to_new_book().is_none());
    let form = BookForm { title: "Dune".to_owned(), author: "   ".to_owned(), status: BookStatus::Reading };
    assert!(form.to_new_book().is_none());
}

#[test]
fn book_form_trims_values() {
    let form = BookForm { title: "  Dune ".to_owned(), author: "Herbert\n".to_owned(), status: BookStatus::Wishlist };
    assert_eq!(
        form.to_new_book(),
        Some(NewBook { title: "Dune".to_owned(), author: "Herbert".to_owned(), status: BookStatus::Wishlist })
    );
}

#[test]
fn clear_keeps_filter() {
    let mut state = BooksState {
        items: vec![crate::test_support::book(1, "Dune", "Herbert", BookStatus::Reading)],
        form: BookForm { title: "x".to_owned(), author: "y".to_owned(), status: BookStatus::Completed },
        filter: StatusFilter::Only(BookStatus::Completed),
    };
    state.clear();
    assert!(state.items.is_empty());
    assert_eq!(state.form, BookForm::default());
    assert_eq!(state.filter, StatusFilter::Only(BookStatus::Completed));
}

// =============================================================
// FetchTrigger
// =============================================================

#[test]
fn no_fetch_while_loading_or_signed_out() {
    let mut trigger = FetchTrigger::default();
    assert_eq!(trigger.observe(FetchKey::derive(&SessionState::default(), StatusFilter::All)), None);
    assert_eq!(trigger.observe(FetchKey::derive(&signed_out(), StatusFilter::All)), None);
}

#[test]
fn sign_in_fires_exactly_once() {
    let mut trigger = FetchTrigger::default();
    let state = signed_in("tok-1");
    let fired: Vec<_> = (0..3)
        .filter_map(|_| trigger.observe(FetchKey::derive(&state, StatusFilter::All)))
        .collect();
    assert_eq!(fired, vec![FetchKey { access_token: "tok-1".to_owned(), filter: StatusFilter::All }]);
}

#[test]
fn filter_change_fires_once_with_new_filter() {
    let mut trigger = FetchTrigger::default();
    let state = signed_in("tok-1");
    trigger.observe(FetchKey::derive(&state, StatusFilter::All));

    let wishlist = StatusFilter::Only(BookStatus::Wishlist);
    let first = trigger.observe(FetchKey::derive(&state, wishlist));
    let second = trigger.observe(FetchKey::derive(&state, wishlist));

    assert_eq!(first.map(|k| k.filter), Some(wishlist));
    assert_eq!(second, None);
}

#[test]
fn token_refresh_fires_again() {
    let mut trigger = FetchTrigger::default();
    trigger.observe(FetchKey::derive(&signed_in("tok-1"), StatusFilter::All));
    let fired = trigger.observe(FetchKey::derive(&signed_in("tok-2"), StatusFilter::All));
    assert_eq!(fired.map(|k| k.access_token), Some("tok-2".to_owned()));
}

#[test]
fn sign_out_then_sign_in_fires_again() {
    let mut trigger = FetchTrigger::default();
    let state = signed_in("tok-1");
    assert!(trigger.observe(FetchKey::derive(&state, StatusFilter::All)).is_some());
    assert!(trigger.observe(FetchKey::derive(&signed_out(), StatusFilter::All)).is_none());
    assert!(trigger.observe(FetchKey::derive(&state, StatusFilter::All)).is_some());
}

#[test]
fn filter_change_while_signed_out_does_not_fire() {
    let mut trigger = FetchTrigger::default();
    let state = signed_out();
    assert!(trigger.observe(FetchKey::derive(&state, StatusFilter::Only(BookStatus::Reading))).is_none());
}
