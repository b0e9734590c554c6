//! Node kinds and payload data for the declaration tree.

use serde::Serialize;
use thin_vec::ThinVec;

use crate::ast::NodeRef;
use crate::types::Qualifier;
use crate::NameId;

/// Kind and payload of one tree node.
///
/// The set is closed over what the declaration subsystem models: a few
/// expression leaves (enough to carry literal array sizes and initializer
/// values), initializers, specifiers, declarators, declarations, and the
/// translation-unit root. Anything richer stays in the embedding front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    /// Root container for a parsed unit.
    TranslationUnit(ThinVec<NodeRef>),
    /// Named leaf: a declared name or a plain reference to one.
    Identifier(#[serde(serialize_with = "crate::serialize_name")] NameId),
    LiteralInt(i64),
    LiteralFloat(f64),
    LiteralBool(bool),
    /// One `[size]` suffix; `None` is the unsized form `[]`.
    ArraySpecifier(Option<NodeRef>),
    Initializer(Initializer),
    TypeSpecifier(TypeSpecifierData),
    /// Qualifier keywords as written, in source order (duplicates allowed).
    QualifierList(ThinVec<Qualifier>),
    Declarator(DeclaratorData),
    Declaration(DeclarationData),
}

/// Initializer forms; lists nest through child `Initializer` nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Initializer {
    /// `= expr`
    Expression(NodeRef),
    /// `= { ... }`; items are themselves `Initializer` nodes.
    List(ThinVec<NodeRef>),
}

/// Spelled base type plus optional type-level `[size]` suffixes
/// (`float[3] a;` puts the suffix here, not on the declarator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSpecifierData {
    #[serde(serialize_with = "crate::serialize_name")]
    pub name: NameId,
    /// Outermost first.
    pub array_specifiers: ThinVec<NodeRef>,
}

/// One declared name within a declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclaratorData {
    /// Absent on malformed or anonymous input; never a crash condition.
    pub name: Option<NodeRef>,
    /// `[size]` suffixes after the name, in source order.
    pub array_specifiers: ThinVec<NodeRef>,
    pub initializer: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationData {
    pub qualifier_list: Option<NodeRef>,
    pub type_specifier: Option<NodeRef>,
    /// Source order; never empty in well-formed input.
    pub declarators: ThinVec<NodeRef>,
}

impl NodeKind {
    /// Invoke `visit` on each direct child, in source order.
    pub fn for_each_child(&self, mut visit: impl FnMut(NodeRef)) {
        match self {
            NodeKind::TranslationUnit(children) => {
                for &child in children {
                    visit(child);
                }
            }
            NodeKind::Identifier(_)
            | NodeKind::LiteralInt(_)
            | NodeKind::LiteralFloat(_)
            | NodeKind::LiteralBool(_)
            | NodeKind::QualifierList(_) => {}
            NodeKind::ArraySpecifier(size) => {
                if let Some(size) = *size {
                    visit(size);
                }
            }
            NodeKind::Initializer(Initializer::Expression(expr)) => visit(*expr),
            NodeKind::Initializer(Initializer::List(items)) => {
                for &item in items {
                    visit(item);
                }
            }
            NodeKind::TypeSpecifier(data) => {
                for &spec in &data.array_specifiers {
                    visit(spec);
                }
            }
            NodeKind::Declarator(data) => {
                if let Some(name) = data.name {
                    visit(name);
                }
                for &spec in &data.array_specifiers {
                    visit(spec);
                }
                if let Some(initializer) = data.initializer {
                    visit(initializer);
                }
            }
            NodeKind::Declaration(data) => {
                if let Some(qualifiers) = data.qualifier_list {
                    visit(qualifiers);
                }
                if let Some(specifier) = data.type_specifier {
                    visit(specifier);
                }
                for &declarator in &data.declarators {
                    visit(declarator);
                }
            }
        }
    }
}
