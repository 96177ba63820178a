//! Blocking user prompts.
//!
//! The list controller reports failures and asks for delete confirmation
//! through [`Notifier`], so tests can script the answers.

/// Alert and confirm prompts shown to the user.
pub trait Notifier {
    /// Show a blocking message.
    fn alert(&self, message: &str);

    /// Ask a yes/no question. `false` when declined or unavailable.
    fn confirm(&self, message: &str) -> bool;
}

/// `window.alert` / `window.confirm` in the browser; log-only elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                log::warn!("alert without window: {message}");
                return;
            };
            if let Err(err) = window.alert_with_message(message) {
                log::warn!("alert failed: {err:?}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::warn!("alert: {message}");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return false;
            };
            window.confirm_with_message(message).unwrap_or(false)
        }
        #[cfg(not(feature = "csr"))]
        {
            log::warn!("confirm unavailable, declining: {message}");
            false
        }
    }
}
