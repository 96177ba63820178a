//! Browser localStorage helpers for JSON values.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is the only caller. Outside the browser every helper is a
//! no-op so native builds and tests stay deterministic.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    match web_sys::window()?.local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("localStorage unavailable: {err:?}");
            None
        }
    }
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let raw = match local_storage()?.get_item(key) {
            Ok(raw) => raw?,
            Err(err) => {
                log::warn!("localStorage read of {key} failed: {err:?}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("discarding unreadable {key}: {err}");
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::trace!("no localStorage; {key} not loaded");
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("could not encode {key}: {err}");
                return;
            }
        };
        if let Err(err) = storage.set_item(key, &raw) {
            log::warn!("localStorage write of {key} failed: {err:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::trace!("no localStorage; {key} not saved");
    }
}

/// Remove `key` from `localStorage`.
pub fn remove(key: &str) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        if let Err(err) = storage.remove_item(key) {
            log::warn!("localStorage remove of {key} failed: {err:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::trace!("no localStorage; {key} not removed");
    }
}
