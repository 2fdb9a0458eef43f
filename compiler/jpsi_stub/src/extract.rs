//! Declaration facts read off a syntax tree.
//!
//! The stub builder stores what these functions return, and the PSI layer
//! calls the same functions when it answers from the tree instead of the
//! stub. Sharing them is what keeps stub-derived and tree-derived answers
//! equal.

use jpsi_ir::ElementType;
use jpsi_tree::{normalized_text, LighterAst};

use crate::flags::StubFlags;

use ElementType as T;

/// Simple names of the deprecation annotation.
const DEPRECATED_ANNOTATIONS: [&str; 2] = ["Deprecated", "java.lang.Deprecated"];

fn first_token_of_kind<A: LighterAst + ?Sized>(
    ast: &A,
    node: &A::Node,
    kind: ElementType,
) -> Option<String> {
    ast.first_child_of_kind(node, kind)
        .and_then(|child| ast.token_text(&child))
        .map(|text| text.to_string())
}

fn has_child_of_kind<A: LighterAst + ?Sized>(ast: &A, node: &A::Node, kind: ElementType) -> bool {
    ast.first_child_of_kind(node, kind).is_some()
}

/// Declared name: the first identifier child.
pub fn name<A: LighterAst + ?Sized>(ast: &A, node: &A::Node) -> Option<String> {
    first_token_of_kind(ast, node, T::Identifier)
}

/// `[]` pairs written as direct children after `after` (C-style dims).
fn trailing_dims<A: LighterAst + ?Sized>(ast: &A, node: &A::Node, after: ElementType) -> usize {
    ast.children(node)
        .into_iter()
        .map(|c| ast.kind(&c))
        .skip_while(|&k| k != after)
        .filter(|&k| k == T::LBracket)
        .count()
}

/// Type text of a variable-like declaration, or `None` when it has no type
/// node of its own (later fields of a multi-field declaration).
///
/// C-style dimensions after the name are folded in: `int a[]` is `int[]`.
pub fn own_type_text<A: LighterAst + ?Sized>(ast: &A, node: &A::Node) -> Option<String> {
    let type_node = ast.first_child_of_kind(node, T::TypeElement)?;
    let mut text = normalized_text(ast, &type_node);
    let dims = match ast.kind(node) {
        T::Method | T::AnnotationMethod => trailing_dims(ast, node, T::ParameterList),
        _ => trailing_dims(ast, node, T::Identifier),
    };
    push_dims(&mut text, dims);
    Some(text)
}

/// Type text of a field that shares the type node of an earlier field.
pub fn shared_type_text<A: LighterAst + ?Sized>(
    ast: &A,
    field: &A::Node,
    base_type: &str,
) -> String {
    let mut text = base_type.to_owned();
    push_dims(&mut text, trailing_dims(ast, field, T::Identifier));
    text
}

/// Base type text of a field: its type node without the name's dims.
pub fn base_type_text<A: LighterAst + ?Sized>(ast: &A, field: &A::Node) -> Option<String> {
    ast.first_child_of_kind(field, T::TypeElement)
        .map(|t| normalized_text(ast, &t))
}

fn push_dims(text: &mut String, dims: usize) {
    for _ in 0..dims {
        text.push_str("[]");
    }
}

/// Modifier bits of a `MODIFIER_LIST`.
pub fn modifier_flags<A: LighterAst + ?Sized>(ast: &A, modifier_list: &A::Node) -> StubFlags {
    ast.children(modifier_list)
        .iter()
        .map(|c| StubFlags::from_modifier_keyword(ast.kind(c)))
        .fold(StubFlags::empty(), |acc, f| acc | f)
}

/// Reference text of an annotation: `@java.lang.Deprecated` gives
/// `java.lang.Deprecated`.
pub fn annotation_reference<A: LighterAst + ?Sized>(ast: &A, annotation: &A::Node) -> String {
    ast.first_child_of_kind(annotation, T::JavaCodeReference)
        .map(|r| normalized_text(ast, &r))
        .unwrap_or_default()
}

/// Last segment of a dotted reference.
pub fn short_name(reference: &str) -> &str {
    reference.rsplit('.').next().unwrap_or(reference)
}

/// Whether a `MODIFIER_LIST` carries `@Deprecated`.
pub fn has_deprecated_annotation<A: LighterAst + ?Sized>(ast: &A, modifier_list: &A::Node) -> bool {
    ast.children_of_kind(modifier_list, T::Annotation)
        .iter()
        .any(|a| DEPRECATED_ANNOTATIONS.contains(&annotation_reference(ast, a).as_str()))
}

/// Doc-comment and deprecation bits of a declaration.
pub fn documentation_flags<A: LighterAst + ?Sized>(ast: &A, decl: &A::Node) -> StubFlags {
    let mut flags = StubFlags::empty();
    if let Some(doc) = first_token_of_kind(ast, decl, T::DocComment) {
        flags |= StubFlags::HAS_DOC_COMMENT;
        if doc.contains("@deprecated") {
            flags |= StubFlags::DOC_DEPRECATED;
        }
    }
    if let Some(modifiers) = ast.first_child_of_kind(decl, T::ModifierList) {
        if has_deprecated_annotation(ast, &modifiers) {
            flags |= StubFlags::ANNOTATION_DEPRECATED;
        }
    }
    flags
}

/// Kind bits of a class from its keyword.
pub fn class_kind_flags<A: LighterAst + ?Sized>(ast: &A, class: &A::Node) -> StubFlags {
    let mut after_at = false;
    for child in ast.children(class) {
        match ast.kind(&child) {
            T::At => after_at = true,
            T::InterfaceKeyword if after_at => {
                return StubFlags::INTERFACE | StubFlags::ANNOTATION_TYPE;
            }
            T::InterfaceKeyword => return StubFlags::INTERFACE,
            T::EnumKeyword => return StubFlags::ENUM,
            T::RecordKeyword => return StubFlags::RECORD,
            T::ClassKeyword | T::Identifier => return StubFlags::empty(),
            _ => {}
        }
    }
    StubFlags::empty()
}

/// Constructor, compact-constructor and varargs bits of a method.
pub fn method_flags<A: LighterAst + ?Sized>(ast: &A, method: &A::Node) -> StubFlags {
    let mut flags = StubFlags::empty();
    if ast.kind(method) == T::Method && !has_child_of_kind(ast, method, T::TypeElement) {
        flags |= StubFlags::CONSTRUCTOR;
        if !has_child_of_kind(ast, method, T::ParameterList) {
            flags |= StubFlags::COMPACT_CONSTRUCTOR;
        }
    }
    let last_param = ast
        .first_child_of_kind(method, T::ParameterList)
        .and_then(|list| ast.children_of_kind(&list, T::Parameter).pop());
    if last_param.is_some_and(|p| is_varargs(ast, &p)) {
        flags |= StubFlags::VARARGS;
    }
    flags
}

/// Whether a parameter or record component is declared with `...`.
pub fn is_varargs<A: LighterAst + ?Sized>(ast: &A, param: &A::Node) -> bool {
    ast.first_child_of_kind(param, T::TypeElement)
        .is_some_and(|t| has_child_of_kind(ast, &t, T::Ellipsis))
}

/// Entries of a reference list, each normalized.
pub fn reference_texts<A: LighterAst + ?Sized>(ast: &A, list: &A::Node) -> Vec<String> {
    ast.children_of_kind(list, T::JavaCodeReference)
        .iter()
        .map(|r| normalized_text(ast, r))
        .collect()
}

/// Dotted package name of a file, if it declares one.
pub fn package_name<A: LighterAst + ?Sized>(ast: &A, file: &A::Node) -> Option<String> {
    let statement = ast.first_child_of_kind(file, T::PackageStatement)?;
    let reference = ast.first_child_of_kind(&statement, T::JavaCodeReference)?;
    Some(normalized_text(ast, &reference))
}

/// Imported reference, with `.*` for on-demand imports.
pub fn import_reference<A: LighterAst + ?Sized>(ast: &A, import: &A::Node) -> (String, bool) {
    let mut text = ast
        .first_child_of_kind(import, T::JavaCodeReference)
        .map(|r| normalized_text(ast, &r))
        .unwrap_or_default();
    let on_demand = has_child_of_kind(ast, import, T::Asterisk);
    if on_demand {
        text.push_str(".*");
    }
    (text, on_demand)
}

/// Initializer expression of a field or local variable.
pub fn initializer<A: LighterAst + ?Sized>(ast: &A, variable: &A::Node) -> Option<A::Node> {
    ast.children(variable)
        .into_iter()
        .skip_while(|c| ast.kind(c) != T::Eq)
        .find(|c| ast.kind(c).is_expression())
}

/// `default` value of an annotation method.
pub fn default_value<A: LighterAst + ?Sized>(ast: &A, method: &A::Node) -> Option<A::Node> {
    ast.children(method)
        .into_iter()
        .skip_while(|c| ast.kind(c) != T::DefaultKeyword)
        .skip(1)
        .find(|c| !ast.kind(c).is_token())
}

/// Base reference of an anonymous class: `Runnable` in `new Runnable() {}`.
pub fn base_class_reference<A: LighterAst + ?Sized>(ast: &A, anonymous: &A::Node) -> String {
    ast.first_child_of_kind(anonymous, T::JavaCodeReference)
        .map(|r| normalized_text(ast, &r))
        .unwrap_or_default()
}

/// Whether the `NEW_EXPRESSION` around an anonymous class is qualified
/// (`outer.new Inner() {}`).
pub fn is_qualified_new<A: LighterAst + ?Sized>(ast: &A, new_expression: &A::Node) -> bool {
    ast.children(new_expression)
        .iter()
        .map(|c| ast.kind(c))
        .find(|k| !k.is_trivia())
        .is_some_and(|k| k != T::NewKeyword)
}
