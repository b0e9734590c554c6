//! Errors surfaced by mutating tree operations.
//!
//! Type resolution never returns an error; it degrades to [`Type::Unknown`]
//! instead. Only the rename primitives report failure, since a programmer
//! invoked them expecting a mutation to happen.
//!
//! [`Type::Unknown`]: crate::types::Type::Unknown

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Rename attempted on a declarator that has no name identifier.
    #[error("declarator with no name")]
    NoDeclaratorName,

    /// Rename attempted through a node that is not an identifier.
    #[error("node is not an identifier")]
    NotAnIdentifier,

    /// Declarator-level operation attempted on a non-declarator node.
    #[error("node is not a declarator")]
    NotADeclarator,

    /// Rename target is not a lexically valid identifier.
    #[error("`{name}` is not a valid identifier")]
    InvalidName { name: String },
}
