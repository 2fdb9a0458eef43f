use std::sync::Arc;

use jpsi_ir::LanguageLevel;
use pretty_assertions::assert_eq;

use super::*;
use crate::green::GreenBuilder;
use crate::test_support::WordParser;
use ElementType as T;

/// `if (a) b; else c;` shaped by hand.
fn if_tree() -> SyntaxTree {
    let mut b = GreenBuilder::new();
    b.start_node(T::IfStatement);
    b.token(T::IfKeyword, "if");
    b.token(T::LParenth, "(");
    b.start_node(T::ReferenceExpression);
    b.token(T::Identifier, "a");
    b.finish_node();
    b.token(T::RParenth, ")");
    for name in ["b", "c"] {
        if name == "c" {
            b.token(T::ElseKeyword, "else");
        }
        b.start_node(T::ExpressionStatement);
        b.start_node(T::ReferenceExpression);
        b.token(T::Identifier, name);
        b.finish_node();
        b.token(T::Semicolon, ";");
        b.finish_node();
    }
    b.finish_node();
    SyntaxTree::new(
        &b.finish(),
        LanguageLevel::default(),
        Arc::new(WordParser::default()),
        true,
    )
}

#[test]
fn if_statement_roles() {
    let tree = if_tree();
    let root = tree.root();
    let condition = tree.find_child_by_role(root, ChildRole::Condition);
    assert_eq!(condition.map(|c| tree.text(c)).as_deref(), Some("a"));
    let then_branch = tree.find_child_by_role(root, ChildRole::ThenBranch);
    assert_eq!(then_branch.map(|c| tree.text(c)).as_deref(), Some("b;"));
    let else_branch = tree.find_child_by_role(root, ChildRole::ElseBranch);
    assert_eq!(else_branch.map(|c| tree.text(c)).as_deref(), Some("c;"));
    assert_eq!(tree.find_child_by_role(root, ChildRole::LoopBody), None);
}

#[test]
fn qualified_reference_roles() {
    let mut b = GreenBuilder::new();
    b.start_node(T::ReferenceExpression);
    b.start_node(T::ReferenceExpression);
    b.token(T::Identifier, "a");
    b.finish_node();
    b.token(T::Dot, ".");
    b.token(T::Identifier, "b");
    b.finish_node();
    let tree = SyntaxTree::new(
        &b.finish(),
        LanguageLevel::default(),
        Arc::new(WordParser::default()),
        true,
    );
    let root = tree.root();
    let qualifier = tree.find_child_by_role(root, ChildRole::Qualifier);
    assert_eq!(qualifier.map(|q| tree.text(q)).as_deref(), Some("a"));
    let name = tree.find_child_by_role(root, ChildRole::ReferenceName);
    assert_eq!(name.map(|n| tree.text(n)).as_deref(), Some("b"));
    let inner = qualifier.unwrap_or(root);
    assert_eq!(tree.find_child_by_role(inner, ChildRole::Qualifier), None);
}

#[test]
fn binary_expression_roles() {
    let mut b = GreenBuilder::new();
    b.start_node(T::BinaryExpression);
    b.start_node(T::LiteralExpression);
    b.token(T::IntegerLiteral, "1");
    b.finish_node();
    b.token(T::WhiteSpace, " ");
    b.token(T::Plus, "+");
    b.token(T::WhiteSpace, " ");
    b.start_node(T::LiteralExpression);
    b.token(T::IntegerLiteral, "2");
    b.finish_node();
    b.finish_node();
    let tree = SyntaxTree::new(
        &b.finish(),
        LanguageLevel::default(),
        Arc::new(WordParser::default()),
        true,
    );
    let root = tree.root();
    let sign = tree.find_child_by_role(root, ChildRole::OperationSign);
    assert_eq!(sign.map(|s| tree.kind(s)), Some(T::Plus));
    let right = tree.find_child_by_role(root, ChildRole::ROperand);
    assert_eq!(right.map(|r| tree.text(r)).as_deref(), Some("2"));
    let left = tree.find_child_by_role(root, ChildRole::LOperand);
    assert_eq!(left.map(|l| tree.text(l)).as_deref(), Some("1"));
}

#[test]
fn method_body_role_expands_nothing() {
    let (tree, _) = crate::test_support::tree_with("{ x }");
    let class = tree.children(tree.root())[0];
    let method = tree.first_child_of_kind(class, T::Method);
    let body = method.and_then(|m| tree.find_child_by_role(m, ChildRole::MethodBody));
    assert!(body.is_some_and(|b| tree.is_collapsed(b)));
    let name = method.and_then(|m| tree.find_child_by_role(m, ChildRole::Name));
    assert_eq!(name.map(|n| tree.text(n)).as_deref(), Some("m"));
}
