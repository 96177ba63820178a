//! Sign-in / sign-up form shown while no session exists.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::net::auth::{AuthProvider, SignUpOutcome};
use crate::state::session::SessionManager;
use crate::util::notify::Notifier;

pub const CONFIRM_EMAIL_MESSAGE: &str = "Check your email for the confirmation link!";
const MISSING_CREDENTIALS_MESSAGE: &str = "Enter both email and password.";

/// Which action the form submits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    /// Prompt shown before the mode-switch button.
    pub fn toggle_prompt(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account?",
            Self::SignUp => "Already have an account?",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Trim the email and require both fields.
///
/// # Errors
///
/// Returns the message to show when a field is blank.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS_MESSAGE);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Run the selected auth action. Returns the message to alert, if any.
pub async fn submit_credentials<P: AuthProvider>(
    sessions: &SessionManager<P>,
    mode: AuthMode,
    credentials: &Credentials,
) -> Option<String> {
    let result = match mode {
        AuthMode::SignIn => sessions
            .sign_in(&credentials.email, &credentials.password)
            .await
            .map(|()| None),
        AuthMode::SignUp => sessions
            .sign_up(&credentials.email, &credentials.password)
            .await
            .map(|outcome| match outcome {
                SignUpOutcome::ConfirmationRequired => Some(CONFIRM_EMAIL_MESSAGE.to_owned()),
                SignUpOutcome::SignedIn(_) => None,
            }),
    };
    match result {
        Ok(message) => message,
        Err(err) => {
            log::error!("{} failed: {err}", mode.title());
            Some(err.user_message())
        }
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let services = expect_context::<ServicesHandle>();
    let mode = RwSignal::new(AuthMode::default());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let services = services.get_value();
        let credentials = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                services.notifier.alert(message);
                return;
            }
        };
        let mode = mode.get_untracked();
        busy.set(true);
        leptos::task::spawn_local(async move {
            if let Some(message) = submit_credentials(&services.sessions, mode, &credentials).await {
                services.notifier.alert(&message);
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-form">
                <h1>"📚 Book Tracker"</h1>
                <h2>{move || mode.get().title()}</h2>
                <form on:submit=on_submit>
                    <input
                        type="email"
                        placeholder="Email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn-primary" disabled=move || busy.get()>
                        {move || mode.get().title()}
                    </button>
                </form>
                <p>
                    {move || mode.get().toggle_prompt()}
                    " "
                    <button
                        type="button"
                        class="link-btn"
                        on:click=move |_| mode.update(|m| *m = m.toggled())
                    >
                        {move || mode.get().toggled().title()}
                    </button>
                </p>
            </div>
        </div>
    }
}
