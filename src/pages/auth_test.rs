use super::*;
use crate::net::error::AuthError;
use crate::state::session::MemorySessionStore;
use crate::test_support::{AuthCall, FakeAuth, session};

#[test]
fn auth_mode_labels() {
    assert_eq!(AuthMode::default(), AuthMode::SignIn);
    assert_eq!(AuthMode::SignIn.title(), "Sign In");
    assert_eq!(AuthMode::SignIn.toggle_prompt(), "Don't have an account?");
    assert_eq!(AuthMode::SignIn.toggled().title(), "Sign Up");
    assert_eq!(AuthMode::SignUp.toggle_prompt(), "Already have an account?");
    assert_eq!(AuthMode::SignUp.toggled(), AuthMode::SignIn);
}

#[test]
fn validate_credentials_trims_email_and_requires_both() {
    assert_eq!(
        validate_credentials("  a@b.com ", "pw"),
        Ok(Credentials { email: "a@b.com".to_owned(), password: "pw".to_owned() })
    );
    assert_eq!(validate_credentials("   ", "pw"), Err("Enter both email and password."));
    assert_eq!(validate_credentials("a@b.com", ""), Err("Enter both email and password."));
}

fn creds() -> Credentials {
    Credentials { email: "reader@example.com".to_owned(), password: "secret".to_owned() }
}

#[tokio::test]
async fn sign_in_success_shows_nothing() {
    let auth = FakeAuth::new();
    let sessions = SessionManager::new(auth.clone(), MemorySessionStore::default());

    assert_eq!(submit_credentials(&sessions, AuthMode::SignIn, &creds()).await, None);
    assert_eq!(auth.calls(), vec![AuthCall::SignIn("reader@example.com".to_owned())]);
}

#[tokio::test]
async fn sign_in_failure_shows_provider_message() {
    let auth = FakeAuth::new();
    auth.state.borrow_mut().sign_in =
        Err(AuthError::Provider { status: 400, message: "Invalid login credentials".to_owned() });
    let sessions = SessionManager::new(auth, MemorySessionStore::default());

    assert_eq!(
        submit_credentials(&sessions, AuthMode::SignIn, &creds()).await,
        Some("Invalid login credentials".to_owned())
    );
}

#[tokio::test]
async fn sign_up_asks_to_check_email() {
    let sessions = SessionManager::new(FakeAuth::new(), MemorySessionStore::default());
    assert_eq!(
        submit_credentials(&sessions, AuthMode::SignUp, &creds()).await,
        Some(CONFIRM_EMAIL_MESSAGE.to_owned())
    );
}

#[tokio::test]
async fn auto_confirmed_sign_up_shows_nothing() {
    let auth = FakeAuth::new();
    auth.state.borrow_mut().sign_up = Ok(SignUpOutcome::SignedIn(session("tok-new")));
    let sessions = SessionManager::new(auth, MemorySessionStore::default());

    assert_eq!(submit_credentials(&sessions, AuthMode::SignUp, &creds()).await, None);
    assert!(sessions.current().is_some());
}
