//! Shared builders for the declaration trees used across integration tests.

#![allow(dead_code)]

use glsl_decl::{Ast, NodeRef, Span};

/// `[n]`
pub fn sized(ast: &mut Ast, n: i64) -> NodeRef {
    let size = ast.literal_int(n, Span::empty());
    ast.array_specifier(Some(size), Span::empty())
}

/// `[]`
pub fn unsized_suffix(ast: &mut Ast) -> NodeRef {
    ast.array_specifier(None, Span::empty())
}

/// `{v0, v1, ...}` over integer literals.
pub fn int_list(ast: &mut Ast, values: &[i64]) -> NodeRef {
    let items: Vec<NodeRef> = values
        .iter()
        .map(|&value| {
            let literal = ast.literal_int(value, Span::empty());
            ast.initializer_expression(literal, Span::empty())
        })
        .collect();
    ast.initializer_list(items, Span::empty())
}

/// Builds `type_name name[suffixes] = initializer;` with the array suffixes
/// on the declarator, and returns the declarator node.
pub fn declare(
    ast: &mut Ast,
    type_name: &str,
    name: &str,
    suffixes: Vec<NodeRef>,
    initializer: Option<NodeRef>,
) -> NodeRef {
    let identifier = ast.identifier(name, Span::empty());
    let declarator = ast.declarator(Some(identifier), suffixes, initializer, Span::empty());
    let specifier = ast.type_specifier(type_name, [], Span::empty());
    ast.declaration(None, Some(specifier), [declarator], Span::empty());
    declarator
}
