//! Error types for unit tagging and checking
//!
//! Every failure in this crate is synchronous and immediate: there is no
//! retry or partial success. When checking is disabled (either gate), none
//! of these errors can be reached.

use miette::Diagnostic;
use thiserror::Error;

use crate::signature::UnitSig;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, UnitError>;

/// Errors raised by quantity construction and checked operations
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum UnitError {
    /// A cloning adapter returned the original instance instead of a copy.
    /// Always a programming-error-class failure in the adapter itself.
    #[error("cloning adapter for `{type_name}` returned the original instance")]
    #[diagnostic(
        code(U0001),
        help("the adapter must produce a new, value-equal instance; returning its input breaks identity tagging")
    )]
    ContractViolation { type_name: String },

    /// No cloning adapter is registered for a numeric representation
    #[error("no cloning adapter registered for numeric type `{type_name}`")]
    #[diagnostic(
        code(U0002),
        help("register one with `register_clone_adapter::<T>()` before building quantities of this type")
    )]
    UnsupportedType { type_name: String },

    /// Wrong arity or an otherwise unusable argument
    #[error("invalid argument: {what}")]
    #[diagnostic(code(U0003))]
    InvalidArgument { what: String },

    /// Operands required to share units do not
    #[error("unit mismatch in {operation}: {expected} vs {found}")]
    #[diagnostic(
        code(U0004),
        help("all operands of this operation must carry the same unit signature")
    )]
    UnitMismatch {
        /// Human-readable name of the operation that was attempted
        operation: String,
        /// Signature of the first operand
        expected: UnitSig,
        /// First signature that failed to match it
        found: UnitSig,
        /// Rendered operands, magnitude followed by signature
        operands: Vec<String>,
    },

    /// An argument expected to already be a registered quantity was not.
    /// Indicates the raw entry points were mixed into the builder protocol.
    #[error("internal assertion failed: {what}")]
    #[diagnostic(code(U0005))]
    AssertionFailure { what: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units;

    #[test]
    fn test_mismatch_message_names_signatures() {
        let err = UnitError::UnitMismatch {
            operation: "addition".to_string(),
            expected: units! { ft: 1.0 },
            found: units! { ft: 2.0 },
            operands: vec!["3 ft".to_string(), "4 ft²".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("addition"));
        assert!(msg.contains("ft"));
    }
}
