//! Flattened declaration tree.
//!
//! Nodes live in parallel tables indexed by [`NodeRef`]; the kind, the span,
//! and the parent of a node share one index. Parents are recorded when a node
//! is pushed and never reassigned afterwards, which gives declarators their
//! weak upward link to the enclosing declaration without any ownership cycle.
//!
//! The embedding parser builds trees bottom-up through the typed push
//! helpers: children first, then the node that owns them.

use std::num::NonZeroU32;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ast::nodes::{DeclarationData, DeclaratorData, Initializer, NodeKind, TypeSpecifierData};
use crate::error::Error;
use crate::span::Span;
use crate::types::Qualifier;
use crate::NameId;

pub mod nodes;

/// Handle to a node stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef(NonZeroU32);

impl NodeRef {
    // Stored with +1 so the niche keeps Option<NodeRef> at four bytes.
    fn from_index(index: usize) -> Self {
        NodeRef(NonZeroU32::new(index as u32 + 1).expect("node arena exceeds u32 range"))
    }

    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Arena of declaration-tree nodes.
#[derive(Debug, Default, Serialize)]
pub struct Ast {
    kinds: Vec<NodeKind>,
    spans: Vec<Span>,
    parents: Vec<Option<NodeRef>>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kind(&self, node: NodeRef) -> &NodeKind {
        &self.kinds[node.index()]
    }

    pub fn span(&self, node: NodeRef) -> Span {
        self.spans[node.index()]
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.parents[node.index()]
    }

    /// Push a node and record it as the parent of its direct children.
    ///
    /// Children must already be in the arena. A child can be claimed by one
    /// parent only; claiming it twice is a malformed build and debug-asserts.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeRef {
        let node = NodeRef::from_index(self.kinds.len());
        kind.for_each_child(|child| {
            let slot = &mut self.parents[child.index()];
            debug_assert!(slot.is_none(), "node {child:?} already has a parent");
            *slot = Some(node);
        });
        self.kinds.push(kind);
        self.spans.push(span);
        self.parents.push(None);
        node
    }

    /// Nodes from `node`'s parent up to the root, nearest first.
    pub fn ancestors(&self, node: NodeRef) -> impl Iterator<Item = NodeRef> + '_ {
        std::iter::successors(self.parent(node), |&n| self.parent(n))
    }

    // ------------------------------------------------------------------
    // Typed push helpers, one per node kind.
    // ------------------------------------------------------------------

    pub fn identifier(&mut self, name: &str, span: Span) -> NodeRef {
        self.push(NodeKind::Identifier(NameId::from(name)), span)
    }

    pub fn literal_int(&mut self, value: i64, span: Span) -> NodeRef {
        self.push(NodeKind::LiteralInt(value), span)
    }

    pub fn literal_float(&mut self, value: f64, span: Span) -> NodeRef {
        self.push(NodeKind::LiteralFloat(value), span)
    }

    pub fn literal_bool(&mut self, value: bool, span: Span) -> NodeRef {
        self.push(NodeKind::LiteralBool(value), span)
    }

    /// `[expr]` or, with `None`, the unsized form `[]`.
    pub fn array_specifier(&mut self, size: Option<NodeRef>, span: Span) -> NodeRef {
        self.push(NodeKind::ArraySpecifier(size), span)
    }

    pub fn initializer_expression(&mut self, expression: NodeRef, span: Span) -> NodeRef {
        self.push(NodeKind::Initializer(Initializer::Expression(expression)), span)
    }

    /// `{ ... }`; items must be initializer nodes themselves.
    pub fn initializer_list(&mut self, items: impl IntoIterator<Item = NodeRef>, span: Span) -> NodeRef {
        let items = items.into_iter().collect();
        self.push(NodeKind::Initializer(Initializer::List(items)), span)
    }

    pub fn type_specifier(
        &mut self,
        name: &str,
        array_specifiers: impl IntoIterator<Item = NodeRef>,
        span: Span,
    ) -> NodeRef {
        let data = TypeSpecifierData {
            name: NameId::from(name),
            array_specifiers: array_specifiers.into_iter().collect(),
        };
        self.push(NodeKind::TypeSpecifier(data), span)
    }

    pub fn qualifier_list(&mut self, qualifiers: impl IntoIterator<Item = Qualifier>, span: Span) -> NodeRef {
        let qualifiers = qualifiers.into_iter().collect();
        self.push(NodeKind::QualifierList(qualifiers), span)
    }

    pub fn declarator(
        &mut self,
        name: Option<NodeRef>,
        array_specifiers: impl IntoIterator<Item = NodeRef>,
        initializer: Option<NodeRef>,
        span: Span,
    ) -> NodeRef {
        let data = DeclaratorData {
            name,
            array_specifiers: array_specifiers.into_iter().collect(),
            initializer,
        };
        self.push(NodeKind::Declarator(data), span)
    }

    pub fn declaration(
        &mut self,
        qualifier_list: Option<NodeRef>,
        type_specifier: Option<NodeRef>,
        declarators: impl IntoIterator<Item = NodeRef>,
        span: Span,
    ) -> NodeRef {
        let data = DeclarationData {
            qualifier_list,
            type_specifier,
            declarators: declarators.into_iter().collect(),
        };
        self.push(NodeKind::Declaration(data), span)
    }

    pub fn translation_unit(&mut self, declarations: impl IntoIterator<Item = NodeRef>, span: Span) -> NodeRef {
        let declarations = declarations.into_iter().collect();
        self.push(NodeKind::TranslationUnit(declarations), span)
    }

    // ------------------------------------------------------------------
    // Mutating name operations.
    // ------------------------------------------------------------------

    /// Replace the text of an identifier node. The node keeps its position,
    /// span, and parent; only the name changes.
    pub fn rename_identifier(&mut self, node: NodeRef, new_name: &str) -> Result<NodeRef, Error> {
        if !is_identifier_text(new_name) {
            return Err(Error::InvalidName {
                name: new_name.to_string(),
            });
        }
        match &mut self.kinds[node.index()] {
            NodeKind::Identifier(name) => {
                debug!("renaming identifier {name} to {new_name}");
                *name = NameId::from(new_name);
                Ok(node)
            }
            _ => Err(Error::NotAnIdentifier),
        }
    }

    /// Rename the declared name of a declarator, returning the (renamed)
    /// identifier node. Fails on anonymous declarators: there is nothing to
    /// rename.
    pub fn set_declarator_name(&mut self, declarator: NodeRef, new_name: &str) -> Result<NodeRef, Error> {
        let name = match self.kind(declarator) {
            NodeKind::Declarator(data) => data.name,
            _ => return Err(Error::NotADeclarator),
        };
        match name {
            Some(identifier) => self.rename_identifier(identifier, new_name),
            None => Err(Error::NoDeclaratorName),
        }
    }
}

fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
