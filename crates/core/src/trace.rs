//! The execution trace: the ordered log produced by one scripted run.
//!
//! A [`Trace`] is built up by the runner, returned by value, and handed to
//! the rendering boundary. It is request-scoped -- each run owns its trace
//! and nothing is shared between concurrent runs.

use serde::Serialize;
use serde_json::Value;

/// One executed statement, with its description and (for read queries) the
/// serialized result rows.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Human-readable description of what the statement did.
    pub label: String,
    /// The statement text as sent to the driver, bind placeholders included.
    pub sql: String,
    /// Result rows for read queries, one JSON object per row.
    pub rows: Option<Vec<Value>>,
}

/// A single ordered record in a [`Trace`].
#[derive(Debug, Clone, Serialize)]
pub enum TraceEntry {
    /// A section heading or connection banner.
    Note(String),
    /// An executed statement.
    Step(Step),
    /// A terminal failure record; nothing follows it.
    Error(String),
}

/// The ordered sequence of entries produced by one run.
///
/// Order is significant and matches execution order. A run that fails ends
/// with a single [`TraceEntry::Error`] entry and whatever steps completed
/// before the failure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trace whose only entry is an error record. Used when a run
    /// cannot even start, e.g. credential resolution failed.
    pub fn from_error(message: impl Into<String>) -> Self {
        let mut trace = Self::new();
        trace.error(message);
        trace
    }

    /// Append a section heading or banner.
    pub fn note(&mut self, text: impl Into<String>) {
        self.entries.push(TraceEntry::Note(text.into()));
    }

    /// Append a statement step with no result rows.
    pub fn step(&mut self, label: impl Into<String>, sql: impl Into<String>) {
        self.entries.push(TraceEntry::Step(Step {
            label: label.into(),
            sql: sql.into(),
            rows: None,
        }));
    }

    /// Append a read-query step together with its serialized result rows.
    pub fn step_with_rows(
        &mut self,
        label: impl Into<String>,
        sql: impl Into<String>,
        rows: Vec<Value>,
    ) {
        self.entries.push(TraceEntry::Step(Step {
            label: label.into(),
            sql: sql.into(),
            rows: Some(rows),
        }));
    }

    /// Append the terminal error record.
    pub fn error(&mut self, message: impl Into<String>) {
        self.entries.push(TraceEntry::Error(message.into()));
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Whether the trace ends in an error record.
    pub fn has_error(&self) -> bool {
        matches!(self.entries.last(), Some(TraceEntry::Error(_)))
    }

    /// The statement steps only, in execution order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.entries.iter().filter_map(|entry| match entry {
            TraceEntry::Step(step) => Some(step),
            _ => None,
        })
    }

    /// Flatten the trace into display lines, preserving order.
    ///
    /// A note is one line; a step contributes its label, its SQL text and
    /// (for read queries) its result rows; an error becomes a line prefixed
    /// with `ERROR:`.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            match entry {
                TraceEntry::Note(text) => lines.push(text.clone()),
                TraceEntry::Step(step) => {
                    lines.push(step.label.clone());
                    lines.push(format!("SQL: {}", step.sql));
                    if let Some(rows) = &step.rows {
                        let rendered =
                            serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string());
                        lines.push(format!("Result: {rendered}"));
                    }
                }
                TraceEntry::Error(message) => lines.push(format!("ERROR: {message}")),
            }
        }
        lines
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
