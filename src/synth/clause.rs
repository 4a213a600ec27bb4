//! Alter statements assembled from optional clauses.
//!
//! Each alter builder runs an ordered list of clause builders; a builder
//! returns `None` when its field did not change. A statement to which no
//! builder contributed collapses to [`NO_CHANGES`].

use log::trace;

/// Returned by alter builders when nothing differs. Callers must treat it as
/// "nothing to execute".
pub const NO_CHANGES: &str = "/* there are no changes */";

#[derive(Debug, Clone)]
pub struct AlterStatement {
    header: String,
    separator: &'static str,
    clauses: Vec<String>,
    trailers: Vec<String>,
}

impl AlterStatement {
    /// `separator` goes between the header and each clause.
    pub fn new(header: impl Into<String>, separator: &'static str) -> Self {
        Self {
            header: header.into(),
            separator,
            clauses: Vec::new(),
            trailers: Vec::new(),
        }
    }

    pub fn clause(&mut self, fragment: Option<String>) -> &mut Self {
        if let Some(fragment) = fragment {
            self.clauses.push(fragment);
        }
        self
    }

    /// A complete statement emitted after the alter itself, whether or not
    /// any clause changed.
    pub fn trailer(&mut self, statement: Option<String>) -> &mut Self {
        if let Some(statement) = statement {
            self.trailers.push(statement);
        }
        self
    }

    pub fn is_noop(&self) -> bool {
        self.clauses.is_empty() && self.trailers.is_empty()
    }

    pub fn render(&self) -> String {
        if self.is_noop() {
            trace!("{}: no changes", self.header);
            return NO_CHANGES.to_string();
        }

        let mut sql = String::new();
        if !self.clauses.is_empty() {
            sql.push_str(&self.header);
            for clause in &self.clauses {
                sql.push_str(self.separator);
                sql.push_str(clause);
            }
            sql.push_str(";\n");
        }
        for statement in &self.trailers {
            sql.push_str(statement);
        }
        sql
    }
}
