//! End-to-end scenarios over the public PSI surface: stub skeletons, the
//! switch to the syntax tree, multi-field declarations, member interning
//! and cache invalidation after edits.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "scenario tests assert on fixed input"
)]

use std::sync::Arc;

use jpsi::{
    ChildRole, ElementType, JavaFile, LanguageLevel, ModifierOwner, Named, PsiClass, PsiConfig,
    PsiElement, PsiManager, PsiReferenceExpression, PsiVariable, StubFlags, Typed,
};
use jpsi_parse::{parse_code_block, JavaLazyParser};
use jpsi_stub::{is_stub_free_text, is_stub_free_tree};
use jpsi_tree::{GreenAst, GreenElement, LighterAst};
use pretty_assertions::assert_eq;

use ElementType as T;

fn open(text: &str) -> Arc<JavaFile> {
    PsiManager::new(PsiConfig::default()).add_file("Test.java", text)
}

fn first_class(file: &Arc<JavaFile>) -> PsiClass {
    file.classes().unwrap().remove(0)
}

/// Every element of `kind` below `start`, in pre-order.
fn descendants(start: &PsiElement, kind: ElementType) -> Vec<PsiElement> {
    let mut found = Vec::new();
    let mut pending = vec![start.clone()];
    while let Some(element) = pending.pop() {
        if element.kind() == kind {
            found.push(element.clone());
        }
        let mut children = element.children().unwrap();
        children.reverse();
        pending.extend(children);
    }
    found
}

fn classify_body(text: &str) -> (bool, bool) {
    let green = parse_code_block(text, LanguageLevel::Jdk21).into_green();
    let ast = GreenAst::new(
        GreenElement::Node(green),
        JavaLazyParser::shared(),
        LanguageLevel::Jdk21,
    );
    (is_stub_free_text(text), is_stub_free_tree(&ast, &ast.root()))
}

#[test]
fn increment_in_if_resolves_to_field() {
    let file = open("class C { int x; void m(){ if(x>0){ x++; } } }");

    let stubs = file.stub_tree().unwrap();
    let classes: Vec<_> = stubs.iter().filter(|(_, s)| s.kind() == T::Class).collect();
    assert_eq!(classes.len(), 1);
    let (class_id, class_stub) = classes[0];
    assert_eq!(class_stub.name(), Some("C"));
    let field = stubs.get(stubs.child_of_kind(class_id, T::Field).unwrap());
    assert_eq!((field.name(), field.type_text()), (Some("x"), Some("int")));
    let method = stubs.get(stubs.child_of_kind(class_id, T::Method).unwrap());
    assert_eq!(method.name(), Some("m"));
    assert_eq!(classify_body("{ if(x>0){ x++; } }"), (true, true));
    assert!(!file.is_ast_loaded());

    let class = first_class(&file);
    let m = class.find_methods_by_name("m", false).unwrap()[0]
        .as_own()
        .cloned()
        .unwrap();
    let statements = m.body().unwrap().unwrap().statements().unwrap();
    assert!(file.is_ast_loaded());
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].kind(), T::IfStatement);

    let then = statements[0]
        .find_child_by_role(ChildRole::ThenBranch)
        .unwrap()
        .unwrap();
    let increments = descendants(&then, T::PostfixExpression);
    assert_eq!(increments.len(), 1);
    assert_eq!(increments[0].text().unwrap(), "x++");
    let operand = increments[0]
        .find_child_by_role(ChildRole::Operand)
        .unwrap()
        .unwrap();
    let reference = PsiReferenceExpression::cast(operand).unwrap();
    let Some(PsiVariable::Field(target)) = reference.resolve().unwrap() else {
        panic!("x++ should resolve to a field");
    };
    let declared = class.own_fields().unwrap().remove(0);
    assert_eq!(target.as_own(), Some(&declared));
    assert_eq!(target.name().unwrap().as_deref(), Some("x"));
}

#[test]
fn lambda_bodies_are_not_stub_free() {
    let file = open("class C { void m(){ Runnable r = () -> {}; } }");
    assert_eq!(classify_body("{ Runnable r = () -> {}; }"), (false, false));
    assert_eq!(classify_body("{ Runnable r = null; }"), (true, true));

    let class = first_class(&file);
    let m = class.own_methods().unwrap().remove(0);
    let body = m.body().unwrap().unwrap();
    let text = body.element().text().unwrap();
    assert!(!is_stub_free_text(&text));
    let locals = body.local_variables().unwrap();
    assert_eq!(locals.len(), 1);
    let initializer = locals[0].initializer().unwrap().unwrap();
    assert_eq!(initializer.kind(), T::LambdaExpression);
}

#[test]
fn multi_field_declarations_share_type_and_modifiers() {
    let file = open("class C { private int a, b = 2; }");
    let fields = first_class(&file).own_fields().unwrap();
    let (a, b) = (&fields[0], &fields[1]);

    assert_eq!(a.type_text().unwrap(), b.type_text().unwrap());
    assert_eq!(b.type_text().unwrap().as_deref(), Some("int"));
    assert_eq!(a.modifier_list().unwrap(), b.modifier_list().unwrap());
    assert!(b.has_modifier_property(StubFlags::PRIVATE).unwrap());
    assert_eq!(a.initializer_text().unwrap(), None);
    assert_eq!(b.initializer_text().unwrap().as_deref(), Some("2"));
    assert_eq!(&b.declaration_owner().unwrap(), a);

    file.ensure_ast_loaded().unwrap();
    assert_eq!(a.modifier_list().unwrap(), b.modifier_list().unwrap());
    assert_eq!(a.psi_type().unwrap(), b.psi_type().unwrap());
    assert!(a.initializer().unwrap().is_none());
    assert_eq!(b.initializer().unwrap().unwrap().text().unwrap(), "2");
}

#[test]
fn light_members_are_interned_per_stamp() {
    let file = open("enum E { A; }");
    let class = first_class(&file);
    let light = |class: &PsiClass| -> Vec<_> {
        class
            .methods()
            .unwrap()
            .iter()
            .filter_map(|m| m.as_light().cloned())
            .collect()
    };

    let stamp = file.manager().modification_count();
    let first = light(&class);
    assert!(!file.is_ast_loaded());
    file.ensure_ast_loaded().unwrap();
    let second = light(&class);
    assert_eq!(file.manager().modification_count(), stamp);
    assert_eq!(first.len(), 2);
    assert!(first.iter().zip(&second).all(|(x, y)| Arc::ptr_eq(x, y)));
    let from_tree = light(&first_class(&file));
    assert!(first.iter().zip(&from_tree).all(|(x, y)| Arc::ptr_eq(x, y)));

    class.add_member("void f() {}").unwrap();
    let after = light(&class);
    assert_eq!(after, first);
    assert!(first.iter().zip(&after).all(|(x, y)| !Arc::ptr_eq(x, y)));
    assert!(after.iter().zip(light(&class)).all(|(x, y)| Arc::ptr_eq(x, &y)));
}

#[test]
fn light_members_stay_shared_across_threads_loading_the_tree() {
    let file = open("enum E { A, B; }");
    let class = first_class(&file);
    let light = |class: &PsiClass| -> Vec<_> {
        class
            .methods()
            .unwrap()
            .iter()
            .filter_map(|m| m.as_light().cloned())
            .collect()
    };
    let expected = light(&class);

    let seen: Vec<Vec<_>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (file, class) = (&file, &class);
                scope.spawn(move || {
                    if i % 2 == 0 {
                        file.ensure_ast_loaded().unwrap();
                    }
                    light(class)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for members in &seen {
        assert!(expected.iter().zip(members).all(|(x, y)| Arc::ptr_eq(x, y)));
    }
}

#[test]
fn member_lists_follow_edits() {
    let file = open("class C { int a; class In {} }");
    let class = first_class(&file);
    let names = |class: &PsiClass| -> Vec<String> {
        class
            .fields()
            .unwrap()
            .iter()
            .map(|f| f.name().unwrap().unwrap_or_default())
            .collect()
    };

    let before = class.fields().unwrap();
    assert_eq!(names(&class), vec!["a"]);
    class.add_member("int b;").unwrap();
    assert_eq!(names(&class), vec!["a", "b"]);
    assert_eq!(before.len(), 1);

    let inner = class.own_inner_classes().unwrap().remove(0);
    inner.add_member("int deep;").unwrap();
    let inner_fields: Vec<_> = inner
        .fields()
        .unwrap()
        .iter()
        .map(|f| f.name().unwrap().unwrap_or_default())
        .collect();
    assert_eq!(inner_fields, vec!["deep"]);

    class.own_fields().unwrap()[0].delete().unwrap();
    assert_eq!(names(&class), vec!["b"]);
    assert!(class.find_field_by_name("a", false).unwrap().is_none());
    assert!(class.find_field_by_name("b", false).unwrap().is_some());
}

#[test]
fn block_reparse_refreshes_the_enclosing_class() {
    let text = "class C { void m() { int a; } }";
    let file = open(text);
    let class = first_class(&file);
    assert_eq!(class.own_methods().unwrap().len(), 1);

    let at = u32::try_from(text.find("int a;").unwrap()).unwrap();
    let edit = jpsi::TextEdit::new(jpsi::Span::new(at, at + 6), "class L { int z; }");
    assert_eq!(file.apply_text_change(&edit).unwrap(), jpsi::Reparse::Block);
    assert!(class.element().is_valid());
    assert_eq!(class.own_methods().unwrap().len(), 1);

    let body = class.own_methods().unwrap()[0].body().unwrap().unwrap();
    let local_classes = descendants(body.element(), T::Class);
    assert_eq!(local_classes.len(), 1);
    let local = PsiClass::cast(local_classes[0].clone()).unwrap();
    assert_eq!(local.name().unwrap().as_deref(), Some("L"));
    assert_eq!(local.own_fields().unwrap().len(), 1);
}
