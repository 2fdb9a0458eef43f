use pretty_assertions::assert_eq;

use crate::{PsiClass, PsiConfig, PsiManager};

use super::*;

fn first_class(text: &str) -> PsiClass {
    let file = PsiManager::new(PsiConfig::default()).add_file("A.java", text);
    file.classes().unwrap().remove(0)
}

#[test]
fn method_parameters() {
    let class = first_class("class C { void m(final int a, @Nullable String... rest) {} }");
    let method = class.own_methods().unwrap().remove(0);
    let parameters = method.parameters().unwrap();
    let (a, rest) = (&parameters[0], &parameters[1]);

    assert_eq!(a.name().unwrap().as_deref(), Some("a"));
    assert_eq!(a.type_text().unwrap().as_deref(), Some("int"));
    assert!(a.has_modifier_property(StubFlags::FINAL).unwrap());
    assert!(!a.is_varargs().unwrap());

    assert!(rest.is_varargs().unwrap());
    assert_eq!(rest.type_text().unwrap().as_deref(), Some("String..."));
    let ty = rest.psi_type().unwrap().unwrap();
    assert!(matches!(&*ty, PsiType::Ellipsis(_)));
    let annotations = rest.modifier_list().unwrap().unwrap().annotations().unwrap();
    assert_eq!(annotations.len(), 1);

    let scope = a.declaration_scope().unwrap().unwrap();
    assert_eq!(scope, *method.element());
}

#[test]
fn record_components() {
    let class = first_class("record R(int x, java.util.List<String> ys) {}");
    let components = class.record_components().unwrap();
    assert!(components.iter().all(PsiParameter::is_record_component));
    let types: Vec<_> = components
        .iter()
        .map(|c| c.type_text().unwrap().unwrap_or_default())
        .collect();
    assert_eq!(types, vec!["int", "java.util.List<String>"]);
    let scope = components[0].declaration_scope().unwrap().unwrap();
    assert_eq!(scope, *class.element());
}

#[test]
fn parameters_inside_bodies() {
    let class = first_class(
        "class C { void m() { for (String s : items) {} try { } catch (Exception e) { } } }",
    );
    let body = class.own_methods().unwrap()[0].body().unwrap().unwrap();
    let mut scopes = Vec::new();
    let mut pending = body.statements().unwrap();
    while let Some(element) = pending.pop() {
        if let Some(parameter) = PsiParameter::cast(element.clone()) {
            let scope = parameter.declaration_scope().unwrap().unwrap();
            scopes.push((parameter.name().unwrap().unwrap_or_default(), scope.kind()));
        }
        pending.extend(element.children().unwrap());
    }
    scopes.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        scopes,
        vec![
            ("e".to_owned(), T::CatchSection),
            ("s".to_owned(), T::ForeachStatement),
        ]
    );
}

#[test]
fn stub_and_tree_agree() {
    let class = first_class("class C { void m(long[] a, Object o) {} }");
    let method = class.own_methods().unwrap().remove(0);
    let from_stubs: Vec<_> = method
        .parameters()
        .unwrap()
        .iter()
        .map(|p| (p.name().unwrap(), p.type_text().unwrap()))
        .collect();
    class.element().file().ensure_ast_loaded().unwrap();
    let from_tree: Vec<_> = method
        .parameters()
        .unwrap()
        .iter()
        .map(|p| (p.name().unwrap(), p.type_text().unwrap()))
        .collect();
    assert_eq!(from_stubs, from_tree);
    assert_eq!(from_tree[0].1.as_deref(), Some("long[]"));
}
