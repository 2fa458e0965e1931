//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! The layout core never prints; front ends use this to surface the
//! [`Diagnostics`](crate::Diagnostics) a conversion returned.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

use crate::Diagnostics;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("layout", "[node 1:2] missing bounding box; treated as a zero-size leaf");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Contour {component}] ⚠ {message}").yellow());
    }
}

/// Print every diagnostic of a conversion once, tagged with `component`.
pub fn warn_diagnostics(component: &str, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        warn_once(component, &diagnostic.to_string());
    }
}

/// Clear all recorded warnings (call before converting a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
