//! Dark mode initialization and toggle.
//!
//! Reads the stored preference through a [`KeyValueStore`] and applies a
//! `data-theme` attribute to the `<html>` element. Toggle writes the new value
//! back. With nothing stored, the system color scheme decides.
//!
//! TRADE-OFFS
//! ==========
//! Persisting the preference is best-effort: a refused write is logged and the
//! theme still flips for the current page.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use crate::util::storage::KeyValueStore;

pub const DARK_MODE_KEY: &str = "agri_assist_dark";

/// Stored preference, else the system preference.
pub fn read_preference(store: &dyn KeyValueStore) -> bool {
    match store.get(DARK_MODE_KEY) {
        Some(val) => val == "true",
        None => system_prefers_dark(),
    }
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            if el
                .set_attribute("data-theme", if enabled { "dark" } else { "light" })
                .is_err()
            {
                log::warn!("failed to set data-theme");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = enabled;
    }
}

/// Toggle dark mode and persist the new preference.
pub fn toggle(store: &dyn KeyValueStore, current: bool) -> bool {
    let next = !current;
    apply(next);
    if let Err(e) = store.set(DARK_MODE_KEY, if next { "true" } else { "false" }) {
        log::warn!("dark mode preference not saved: {e}");
    }
    next
}
