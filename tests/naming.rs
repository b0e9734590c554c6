//! Declared-name access, renames, and declaration qualifiers.

mod common;

use common::declare;
use glsl_decl::{
    Ast, Declarator, Error, Qualifier, QualifierSet, Span, TypeRegistry, ANONYMOUS,
};

#[test]
fn named_declarator_reports_its_name() {
    let mut ast = Ast::new();
    let count = declare(&mut ast, "int", "count", vec![], None);
    let count = Declarator::cast(&ast, count).unwrap();
    assert_eq!(count.name(), "count");
}

#[test]
fn nameless_declarator_reads_as_anonymous() {
    let mut ast = Ast::new();
    let node = ast.declarator(None, [], None, Span::empty());
    let specifier = ast.type_specifier("float", [], Span::empty());
    ast.declaration(None, Some(specifier), [node], Span::empty());

    let registry = TypeRegistry::new();
    let declarator = Declarator::cast(&ast, node).unwrap();
    assert_eq!(declarator.name(), ANONYMOUS);
    assert_eq!(declarator.describe(&registry), "(anonymous) : float");
}

#[test]
fn renaming_a_nameless_declarator_is_rejected() {
    let mut ast = Ast::new();
    let node = ast.declarator(None, [], None, Span::empty());
    assert_eq!(
        ast.set_declarator_name(node, "late"),
        Err(Error::NoDeclaratorName)
    );
}

#[test]
fn renaming_updates_the_identifier_in_place() {
    let mut ast = Ast::new();
    let node = declare(&mut ast, "int", "old_name", vec![], None);
    let identifier = Declarator::cast(&ast, node).unwrap().name_identifier().unwrap();

    let renamed = ast.set_declarator_name(node, "new_name").unwrap();
    assert_eq!(renamed, identifier);
    assert_eq!(Declarator::cast(&ast, node).unwrap().name(), "new_name");
}

#[test]
fn rename_validates_the_new_spelling() {
    let mut ast = Ast::new();
    let node = declare(&mut ast, "int", "ok", vec![], None);
    for bad in ["", "1st", "a-b", "has space"] {
        assert_eq!(
            ast.set_declarator_name(node, bad),
            Err(Error::InvalidName {
                name: bad.to_string()
            })
        );
    }
    // Failed attempts leave the stored name untouched.
    assert_eq!(Declarator::cast(&ast, node).unwrap().name(), "ok");
}

#[test]
fn rename_rejects_nodes_of_the_wrong_kind() {
    let mut ast = Ast::new();
    let literal = ast.literal_int(7, Span::empty());
    assert_eq!(
        ast.rename_identifier(literal, "x"),
        Err(Error::NotAnIdentifier)
    );
    assert_eq!(
        ast.set_declarator_name(literal, "x"),
        Err(Error::NotADeclarator)
    );
}

#[test]
fn qualifiers_come_from_the_enclosing_declaration() {
    // const highp int level = 3; the set renders in canonical order no
    // matter how the source list was ordered.
    let mut ast = Ast::new();
    let three = ast.literal_int(3, Span::empty());
    let init = ast.initializer_expression(three, Span::empty());
    let name = ast.identifier("level", Span::empty());
    let declarator = ast.declarator(Some(name), [], Some(init), Span::empty());
    let qualifiers = ast.qualifier_list([Qualifier::Highp, Qualifier::Const], Span::empty());
    let specifier = ast.type_specifier("int", [], Span::empty());
    ast.declaration(Some(qualifiers), Some(specifier), [declarator], Span::empty());

    let registry = TypeRegistry::new();
    let level = Declarator::cast(&ast, declarator).unwrap();
    let qualified = level.qualified_ty(&registry);
    assert_eq!(
        qualified.qualifiers(),
        QualifierSet::CONST | QualifierSet::HIGHP
    );
    assert_eq!(qualified.to_string(), "const highp int");
}

#[test]
fn missing_qualifier_list_yields_the_empty_set() {
    let mut ast = Ast::new();
    let node = declare(&mut ast, "float", "plain", vec![], None);

    let registry = TypeRegistry::new();
    let plain = Declarator::cast(&ast, node).unwrap();
    let qualified = plain.qualified_ty(&registry);
    assert!(qualified.qualifiers().is_empty());
    assert_eq!(qualified.to_string(), "float");
}
