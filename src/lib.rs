//! Declaration modeling and declarator-to-type resolution for GLSL-family
//! shader languages.
//!
//! Declarations are stored as nodes in an [`Ast`] arena; typed views
//! ([`Declaration`], [`Declarator`], [`TypeSpecifier`], [`ArraySpecifier`])
//! wrap node references and answer questions about them. The central
//! operation is [`Declarator::ty`], which combines the declaration's type
//! specifier with the declarator's own array suffixes and then sizes any
//! `[]` dimensions from the shape of a brace initializer:
//!
//! ```
//! use glsl_decl::{Ast, Declarator, Span, TypeRegistry};
//!
//! // float weights[] = {0.25, 0.75};
//! let mut ast = Ast::new();
//! let first = ast.literal_float(0.25, Span::empty());
//! let first = ast.initializer_expression(first, Span::empty());
//! let second = ast.literal_float(0.75, Span::empty());
//! let second = ast.initializer_expression(second, Span::empty());
//! let init = ast.initializer_list([first, second], Span::empty());
//!
//! let name = ast.identifier("weights", Span::empty());
//! let brackets = ast.array_specifier(None, Span::empty());
//! let weights = ast.declarator(Some(name), [brackets], Some(init), Span::empty());
//! let specifier = ast.type_specifier("float", [], Span::empty());
//! ast.declaration(None, Some(specifier), [weights], Span::empty());
//!
//! let registry = TypeRegistry::new();
//! let weights = Declarator::cast(&ast, weights).unwrap();
//! assert_eq!(weights.describe(&registry), "weights : float[2]");
//! ```
//!
//! Resolution never fails: malformed trees and unknown type names degrade
//! to [`Type::Unknown`], so callers can run over code that is still being
//! typed. The whole crate is single threaded by design; share work across
//! threads by handing each thread its own [`Ast`] and [`TypeRegistry`].

pub mod ast;
pub mod decl;
/// Error types for the fallible naming operations.
pub mod error;
/// Maps spelled type names to types.
pub mod registry;
pub mod span;
/// The type model: builtins, structs, arrays, qualifiers.
pub mod types;

pub use ast::nodes::{Initializer, NodeKind};
pub use ast::{Ast, NodeRef};
pub use decl::{ArraySpecifier, Declaration, Declarator, TypeSpecifier, ANONYMOUS};
pub use error::Error;
pub use registry::{StructDef, StructId, StructMember, TypeRegistry};
pub use span::Span;
pub use symbol_table::GlobalSymbol as NameId;
pub use types::{
    ArrayType, BuiltinType, Dimension, QualifiedType, Qualifier, QualifierSet, Type,
};

/// Serializes a [`NameId`] as its string contents.
pub(crate) fn serialize_name<S: serde::Serializer>(
    name: &NameId,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(name.as_str())
}
