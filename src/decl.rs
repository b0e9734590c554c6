//! Typed views over declaration nodes and declarator-to-type resolution.
//!
//! A [`Declarator`] never fails to produce a type: every malformed-tree
//! condition (no enclosing declaration, no type specifier, unresolvable
//! specifier) degrades to [`Type::Unknown`], so tooling over incomplete code
//! keeps working while the code is being edited. Only [`Ast`]-level rename
//! operations surface errors.
//!
//! Views borrow the tree immutably and are cheap to copy; resolving the same
//! declarator twice recomputes from the tree and yields structurally equal
//! results.

use log::debug;

use crate::ast::nodes::{DeclarationData, DeclaratorData, Initializer, NodeKind, TypeSpecifierData};
use crate::ast::{Ast, NodeRef};
use crate::registry::TypeRegistry;
use crate::types::{ArrayType, Dimension, QualifiedType, QualifierSet, Type};
use crate::NameId;

/// Fallback display name for declarators without an identifier.
pub const ANONYMOUS: &str = "(anonymous)";

/// View over a declaration node: qualifiers, type specifier, declarators.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    ast: &'a Ast,
    node: NodeRef,
    data: &'a DeclarationData,
}

impl<'a> Declaration<'a> {
    /// Wrap `node` if it is a declaration.
    pub fn cast(ast: &'a Ast, node: NodeRef) -> Option<Self> {
        match ast.kind(node) {
            NodeKind::Declaration(data) => Some(Declaration { ast, node, data }),
            _ => None,
        }
    }

    pub fn node(self) -> NodeRef {
        self.node
    }

    pub fn type_specifier(self) -> Option<TypeSpecifier<'a>> {
        self.data
            .type_specifier
            .and_then(|node| TypeSpecifier::cast(self.ast, node))
    }

    /// Declarators in source order, skipping nodes of the wrong kind.
    pub fn declarators(self) -> impl Iterator<Item = Declarator<'a>> + 'a {
        let ast = self.ast;
        self.data
            .declarators
            .iter()
            .filter_map(move |&node| Declarator::cast(ast, node))
    }

    /// Qualifiers attached to this declaration; empty when no list is
    /// present or the list node is malformed.
    pub fn qualifiers(self) -> QualifierSet {
        let Some(list) = self.data.qualifier_list else {
            return QualifierSet::empty();
        };
        match self.ast.kind(list) {
            NodeKind::QualifierList(qualifiers) => qualifiers.iter().copied().collect(),
            _ => QualifierSet::empty(),
        }
    }
}

/// View over a type-specifier node.
#[derive(Debug, Clone, Copy)]
pub struct TypeSpecifier<'a> {
    ast: &'a Ast,
    node: NodeRef,
    data: &'a TypeSpecifierData,
}

impl<'a> TypeSpecifier<'a> {
    pub fn cast(ast: &'a Ast, node: NodeRef) -> Option<Self> {
        match ast.kind(node) {
            NodeKind::TypeSpecifier(data) => Some(TypeSpecifier { ast, node, data }),
            _ => None,
        }
    }

    pub fn node(self) -> NodeRef {
        self.node
    }

    /// Spelled base type name.
    pub fn name(self) -> NameId {
        self.data.name
    }

    /// Type-level `[size]` suffixes, outermost first.
    pub fn array_specifiers(self) -> impl Iterator<Item = ArraySpecifier<'a>> + 'a {
        let ast = self.ast;
        self.data
            .array_specifiers
            .iter()
            .filter_map(move |&node| ArraySpecifier::cast(ast, node))
    }

    /// Resolve against the registry. Unregistered names resolve to
    /// `Unknown`; `[size]` suffixes wrap the named type into an array.
    pub fn ty(self, registry: &TypeRegistry) -> Type {
        let Some(base) = registry.resolve(self.data.name) else {
            debug!("unknown type name {}", self.data.name);
            return Type::Unknown;
        };
        let dimensions: Vec<Dimension> = self.array_specifiers().map(|spec| spec.dimension()).collect();
        if dimensions.is_empty() {
            base.clone()
        } else {
            Type::Array(ArrayType::new(base.clone(), dimensions))
        }
    }
}

/// View over one `[size]` suffix.
#[derive(Debug, Clone, Copy)]
pub struct ArraySpecifier<'a> {
    ast: &'a Ast,
    node: NodeRef,
    size: Option<NodeRef>,
}

impl<'a> ArraySpecifier<'a> {
    pub fn cast(ast: &'a Ast, node: NodeRef) -> Option<Self> {
        match ast.kind(node) {
            NodeKind::ArraySpecifier(size) => Some(ArraySpecifier { ast, node, size: *size }),
            _ => None,
        }
    }

    pub fn node(self) -> NodeRef {
        self.node
    }

    /// The size expression between the brackets, if any.
    pub fn size_expression(self) -> Option<NodeRef> {
        self.size
    }

    /// Dimension this suffix contributes. A positive integer literal reads
    /// as a fixed size; anything else (absent, non-literal, non-positive)
    /// is unsized. Constant folding of size expressions is not attempted.
    pub fn dimension(self) -> Dimension {
        match self.size.map(|expr| self.ast.kind(expr)) {
            Some(&NodeKind::LiteralInt(value)) if value > 0 => Dimension::Sized(value as usize),
            _ => Dimension::Unsized,
        }
    }
}

/// View over a declarator node: one declared name.
#[derive(Debug, Clone, Copy)]
pub struct Declarator<'a> {
    ast: &'a Ast,
    node: NodeRef,
    data: &'a DeclaratorData,
}

impl<'a> Declarator<'a> {
    pub fn cast(ast: &'a Ast, node: NodeRef) -> Option<Self> {
        match ast.kind(node) {
            NodeKind::Declarator(data) => Some(Declarator { ast, node, data }),
            _ => None,
        }
    }

    pub fn node(self) -> NodeRef {
        self.node
    }

    /// The identifier node carrying the declared name, when present.
    pub fn name_identifier(self) -> Option<NodeRef> {
        self.data.name
    }

    /// Declared name, or `"(anonymous)"` for nameless declarators. Never
    /// empty, never fails.
    pub fn name(self) -> &'a str {
        match self.data.name.map(|node| self.ast.kind(node)) {
            Some(NodeKind::Identifier(name)) => name.as_str(),
            _ => ANONYMOUS,
        }
    }

    /// Nearest enclosing declaration, found by upward search. Absent on a
    /// malformed tree; callers treat that as "cannot resolve," not as an
    /// error.
    pub fn parent_declaration(self) -> Option<Declaration<'a>> {
        let ast = self.ast;
        ast.ancestors(self.node).find_map(|node| Declaration::cast(ast, node))
    }

    /// Own `[size]` suffixes, in source order.
    pub fn array_specifiers(self) -> impl Iterator<Item = ArraySpecifier<'a>> + 'a {
        let ast = self.ast;
        self.data
            .array_specifiers
            .iter()
            .filter_map(move |&node| ArraySpecifier::cast(ast, node))
    }

    pub fn initializer(self) -> Option<&'a Initializer> {
        let node = self.data.initializer?;
        match self.ast.kind(node) {
            NodeKind::Initializer(initializer) => Some(initializer),
            _ => None,
        }
    }

    /// The wrapped expression of a single-expression initializer.
    pub fn initializer_expression(self) -> Option<NodeRef> {
        match self.initializer() {
            Some(Initializer::Expression(expression)) => Some(*expression),
            _ => None,
        }
    }

    /// Resolved type of this declared name. Never fails; malformed input
    /// degrades to [`Type::Unknown`].
    ///
    /// Array dimensions merge from two sources with type-level suffixes
    /// staying outermost: declared `int[3]` plus own `[4]` resolves to
    /// `int[3][4]`. Unsized dimensions are then clarified against the
    /// initializer shape.
    pub fn ty(self, registry: &TypeRegistry) -> Type {
        let Some(declaration) = self.parent_declaration() else {
            debug!("declarator {} has no enclosing declaration", self.name());
            return Type::Unknown;
        };
        let Some(specifier) = declaration.type_specifier() else {
            debug!("declaration of {} has no type specifier", self.name());
            return Type::Unknown;
        };
        let declared = specifier.ty(registry);
        if !declared.is_valid() {
            return Type::Unknown;
        }

        let own: Vec<Dimension> = self.array_specifiers().map(|spec| spec.dimension()).collect();
        let ty = if own.is_empty() {
            declared
        } else {
            // ArrayType::new folds an array base into the dimension list,
            // so declared dimensions stay outermost.
            Type::Array(ArrayType::new(declared, own))
        };
        self.clarify(ty)
    }

    /// Resolved type plus the qualifiers of the enclosing declaration; the
    /// set is empty when there is no declaration or no qualifier list.
    pub fn qualified_ty(self, registry: &TypeRegistry) -> QualifiedType {
        let ty = self.ty(registry);
        match self.parent_declaration() {
            Some(declaration) => QualifiedType::new(ty, declaration.qualifiers()),
            None => QualifiedType::unqualified(ty),
        }
    }

    /// One-line rendering for logs and dumps: `name : typename`.
    pub fn describe(self, registry: &TypeRegistry) -> String {
        format!("{} : {}", self.name(), self.ty(registry))
    }

    /// Resolve unsized dimensions from the brace-initializer shape.
    ///
    /// Walks the dimension list outermost-first in lockstep with the
    /// initializer tree, filling each unsized slot with the element count at
    /// the current nesting level and descending through the first child
    /// while that child is itself a list. Jagged sibling shapes are not
    /// validated, and dimensions the walk never reaches stay as declared;
    /// both are accepted terminal states. Returns the input unchanged when
    /// it is not an array or when no list initializer is attached.
    fn clarify(self, ty: Type) -> Type {
        let Type::Array(array) = ty else { return ty };
        let Some(Initializer::List(top)) = self.initializer() else {
            return Type::Array(array);
        };

        let mut dimensions = array.dimensions().to_vec();
        let mut level = top;
        for slot in dimensions.iter_mut() {
            if *slot == Dimension::Unsized {
                debug!("clarified [] to [{}] for {}", level.len(), self.name());
                *slot = Dimension::Sized(level.len());
            }
            match level.first().map(|&item| self.ast.kind(item)) {
                Some(NodeKind::Initializer(Initializer::List(inner))) => level = inner,
                _ => break,
            }
        }
        Type::Array(ArrayType::new(array.base().clone(), dimensions))
    }
}
