//! Common utilities for the Contour layout inference engine.
//!
//! This crate provides shared infrastructure used by all Contour components:
//! - **Diagnostics** - non-fatal per-node problems, returned as values
//! - **Warning System** - colored terminal output for surfacing diagnostics

pub mod diagnostic;
pub mod warning;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
