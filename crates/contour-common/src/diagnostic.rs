//! Non-fatal diagnostics recorded while converting a design tree.
//!
//! A malformed node never aborts a conversion. Instead the offending node is
//! degraded (usually to a zero-size leaf) and a [`Diagnostic`] naming it is
//! appended to the [`Diagnostics`] returned alongside the result. Callers
//! decide whether to log, surface, or ignore them.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// What went wrong with a single node.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The node carried no bounding box at all.
    #[error("missing bounding box; treated as a zero-size leaf")]
    MissingBounds,
    /// The bounding box had a missing field, a non-finite number, or a
    /// negative size.
    #[error("invalid bounding box ({reason}); treated as a zero-size leaf")]
    InvalidBounds {
        /// Which part of the box was rejected.
        reason: String,
    },
    /// The node sits deeper than the configured maximum depth.
    #[error("tree depth exceeds {limit}; children ignored and node treated as a leaf")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
    /// Another node earlier in the tree already uses this id.
    #[error("duplicate node id; lookups by id resolve to the first occurrence")]
    DuplicateId,
    /// Descendants that were not converted because their ancestor was
    /// degraded to a leaf.
    #[error("{count} descendant node(s) skipped")]
    DroppedChildren {
        /// Number of skipped descendants (all depths).
        count: usize,
    },
}

/// A diagnostic attached to the node it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Id of the node as given in the source tree.
    pub node_id: String,
    /// The problem.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[node {}] {}", self.node_id, self.kind)
    }
}

/// Ordered list of diagnostics scoped to one conversion call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a diagnostic for `node_id`.
    pub fn record(&mut self, node_id: impl Into<String>, kind: DiagnosticKind) {
        self.entries.push(Diagnostic {
            node_id: node_id.into(),
            kind,
        });
    }

    /// Iterate over recorded diagnostics in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics recorded for one node.
    pub fn for_node<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries.iter().filter(move |d| d.node_id == node_id)
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_node_and_problem() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record("1:2", DiagnosticKind::DepthExceeded { limit: 8 });

        let rendered = diagnostics.iter().next().unwrap().to_string();
        assert_eq!(
            rendered,
            "[node 1:2] tree depth exceeds 8; children ignored and node treated as a leaf"
        );
    }

    #[test]
    fn test_for_node_filters_by_id() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record("a", DiagnosticKind::MissingBounds);
        diagnostics.record("b", DiagnosticKind::DuplicateId);
        diagnostics.record("a", DiagnosticKind::DroppedChildren { count: 3 });

        assert_eq!(diagnostics.for_node("a").count(), 2);
        assert_eq!(diagnostics.for_node("c").count(), 0);
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_serializes_flat_with_kind_tag() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(
            "n",
            DiagnosticKind::InvalidBounds {
                reason: "negative width".to_string(),
            },
        );

        let json = serde_json::to_value(&diagnostics).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "node_id": "n", "kind": "invalid_bounds", "reason": "negative width" }
            ])
        );
    }
}
