//! Structured failures of a run build and of path replay.
//!
//! A [`RunBuildError`] aborts `RunBuilder::build` entirely.  It carries a
//! kind, a user-facing message, an optional detail list and free-form
//! context, so a UI can show a diagnostic the operator can copy verbatim
//! with [`RunBuildError::report`].
//!
//! Per-pallet problems are *not* errors: they are collected as issue
//! strings on the pallet result.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pw_core::CoreError;
use pw_spatial::SpatialError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunBuildErrorKind {
    /// Inputs are structurally unusable (no START/END, no lines).
    Validation,
    /// An input row is malformed.
    Data,
    /// The traversal graph could not be initialized.
    Routing,
    /// Anything else.
    Unexpected,
}

impl RunBuildErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RunBuildErrorKind::Validation => "validation",
            RunBuildErrorKind::Data       => "data",
            RunBuildErrorKind::Routing    => "routing",
            RunBuildErrorKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for RunBuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal run-build failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[error("{kind} error: {message}")]
pub struct RunBuildError {
    pub kind:    RunBuildErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl RunBuildError {
    pub fn new(kind: RunBuildErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), details: Vec::new(), context: BTreeMap::new() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(RunBuildErrorKind::Validation, message)
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(RunBuildErrorKind::Data, message)
    }

    pub fn routing(message: impl Into<String>) -> Self {
        Self::new(RunBuildErrorKind::Routing, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(RunBuildErrorKind::Unexpected, message)
    }

    pub fn with_details(mut self, details: impl IntoIterator<Item = String>) -> Self {
        self.details.extend(details);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Multi-section plain-text rendering for copy/paste.
    ///
    /// ```text
    /// kind: data
    ///
    /// message: …
    ///
    /// details:
    /// - …
    ///
    /// context:
    /// { … }
    /// ```
    pub fn report(&self) -> String {
        let mut sections = vec![
            format!("kind: {}", self.kind),
            format!("message: {}", self.message),
        ];
        if !self.details.is_empty() {
            sections.push(format!("details:\n- {}", self.details.join("\n- ")));
        }
        if !self.context.is_empty() {
            let json = serde_json::to_string_pretty(&self.context).unwrap_or_default();
            sections.push(format!("context:\n{json}"));
        }
        sections.join("\n\n")
    }
}

pub type RunBuildResult<T> = Result<T, RunBuildError>;

/// Failure to rebuild replay paths for a stored run.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("layout cannot be replayed: {0}")]
    Layout(#[from] CoreError),

    #[error("layout graph error: {0}")]
    Graph(#[from] SpatialError),
}
