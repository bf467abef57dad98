use crate::tree::node::NodeKind;

/// Convenience result type used by validation and tree construction helpers.
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised while validating or assembling expression trees.
///
/// Comparison and hashing never fail; only the construction side reports errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A payload invariant that the node model cannot express in types was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// Two parallel lists that must line up have different lengths.
    #[error("arity mismatch in {what}: expected {expected}, found {found}")]
    ArityMismatch {
        /// Which pair of lists disagreed.
        what: &'static str,
        /// Length required by the reference list.
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// A child slot that accepts only one node kind received another.
    #[error("unexpected node kind: expected {expected}, found {found}")]
    UnexpectedKind {
        /// Human-readable name of the accepted kind.
        expected: &'static str,
        /// Kind of the node that was supplied.
        found: NodeKind,
    },
}

impl ExprError {
    /// Build an [`ExprError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`ExprError::ArityMismatch`] value.
    pub fn arity(what: &'static str, expected: usize, found: usize) -> Self {
        Self::ArityMismatch {
            what,
            expected,
            found,
        }
    }

    /// Build an [`ExprError::UnexpectedKind`] value.
    pub fn unexpected_kind(expected: &'static str, found: NodeKind) -> Self {
        Self::UnexpectedKind { expected, found }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
