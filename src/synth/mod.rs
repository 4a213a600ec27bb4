//! Statement synthesis: descriptors in, SQL text out.
//!
//! Every builder is a method on [`Synthesizer`] and only reads its inputs.
//! Output is newline terminated and meant to be handed verbatim to a script
//! runner; PSQL bodies end with [`BLOCK_DELIMITER`].

mod clause;
mod column;
mod comment;
mod dml;
mod domain;
mod routine;
mod schema;
mod table;
mod trigger;
mod user;

use crate::dialect::Dialect;

pub use clause::{AlterStatement, NO_CHANGES};

/// Terminator of procedure, function and trigger bodies.
pub const BLOCK_DELIMITER: &str = "^";

#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("Constraint #{index} has neither a name nor a kind")]
    MalformedConstraint { index: usize },
    #[error("Invalid {object} descriptor: {reason}")]
    InvalidDescriptorState { object: String, reason: String },
}

impl SynthError {
    pub(crate) fn invalid(object: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptorState {
            object: object.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    dialect: Dialect,
}

impl Synthesizer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    fn format(&self, identifier: &str) -> String {
        self.dialect.format(identifier)
    }
}
