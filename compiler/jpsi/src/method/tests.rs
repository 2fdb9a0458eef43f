use pretty_assertions::assert_eq;

use super::*;
use crate::{JavaFile, PsiConfig, PsiManager};

fn methods_of(text: &str) -> (Arc<JavaFile>, Vec<PsiMethod>) {
    let file = PsiManager::new(PsiConfig::default()).add_file("A.java", text);
    let methods = file.classes().unwrap()[0].own_methods().unwrap();
    (file, methods)
}

fn parameter_names(method: &PsiMethod) -> Vec<String> {
    method
        .parameters()
        .unwrap()
        .iter()
        .map(|p| p.name().unwrap().unwrap_or_default())
        .collect()
}

#[test]
fn signature_from_stubs() {
    let (file, methods) = methods_of(
        "class C { <T extends Number> java.util.List<T> m(int a, String... rest) throws E, F { return null; } }",
    );
    let m = &methods[0];
    assert_eq!(m.name().unwrap().as_deref(), Some("m"));
    assert_eq!(m.type_text().unwrap().as_deref(), Some("java.util.List<T>"));
    assert_eq!(m.type_parameter_names().unwrap(), vec!["T"]);
    assert_eq!(parameter_names(m), vec!["a", "rest"]);
    assert!(m.is_varargs().unwrap());
    assert!(!m.is_constructor().unwrap());
    assert_eq!(m.throws_list().unwrap(), vec!["E", "F"]);
    assert!(!file.is_ast_loaded());

    let body = m.body().unwrap().unwrap();
    assert!(file.is_ast_loaded());
    assert_eq!(body.statements().unwrap().len(), 1);
}

#[test]
fn constructors() {
    let (_file, methods) = methods_of("class C { C() {} C(int x) { this(); } }");
    assert!(methods.iter().all(|m| m.is_constructor().unwrap()));
    assert_eq!(methods[0].type_text().unwrap(), None);
    assert_eq!(methods[0].psi_type().unwrap(), None);
    assert_eq!(parameter_names(&methods[1]), vec!["x"]);
}

#[test]
fn compact_constructor_takes_record_components() {
    let (file, methods) = methods_of("record R(int x, int y) { R { if (x > y) throw new E(); } }");
    let compact = &methods[0];
    assert!(compact.is_compact_constructor().unwrap());
    assert!(compact.is_constructor().unwrap());
    let parameters = compact.parameters().unwrap();
    assert!(parameters.iter().all(PsiParameter::is_record_component));
    assert_eq!(parameter_names(compact), vec!["x", "y"]);

    file.ensure_ast_loaded().unwrap();
    assert!(compact.is_compact_constructor().unwrap());
    assert_eq!(parameter_names(compact), vec!["x", "y"]);
}

#[test]
fn abstract_methods_have_no_body() {
    let (_file, methods) = methods_of("abstract class C { abstract void m(); native int n(); }");
    assert!(methods[0].body().unwrap().is_none());
    assert!(methods[1].body().unwrap().is_none());
    assert!(methods[0].has_modifier_property(StubFlags::ABSTRACT).unwrap());
}

#[test]
fn interface_methods() {
    let (_file, methods) = methods_of(
        "interface I { void a(); default void b() {} static void c() {} private void d() {} }",
    );
    let implicit: Vec<_> = methods
        .iter()
        .map(|m| m.implicit_modifiers().unwrap())
        .collect();
    assert_eq!(
        implicit,
        vec![
            StubFlags::PUBLIC | StubFlags::ABSTRACT,
            StubFlags::PUBLIC,
            StubFlags::PUBLIC,
            StubFlags::empty(),
        ]
    );
}

#[test]
fn enum_constructors_are_private() {
    let (_file, methods) = methods_of("enum E { A; E() {} void f() {} }");
    assert!(methods[0].has_modifier_property(StubFlags::PRIVATE).unwrap());
    assert!(!methods[1].has_modifier_property(StubFlags::PRIVATE).unwrap());
}

#[test]
fn annotation_methods_and_defaults() {
    let (file, methods) = methods_of("@interface A { String value() default \"x\"; int[] ids(); }");
    assert!(methods.iter().all(PsiMethod::is_annotation_method));
    assert_eq!(methods[0].default_value_text().unwrap().as_deref(), Some("\"x\""));
    assert_eq!(methods[1].default_value_text().unwrap(), None);
    file.ensure_ast_loaded().unwrap();
    assert_eq!(methods[0].default_value_text().unwrap().as_deref(), Some("\"x\""));
    assert_eq!(methods[1].type_text().unwrap().as_deref(), Some("int[]"));
}

#[test]
fn documented_methods() {
    let (file, methods) = methods_of("class C { /** Doc. @deprecated */ void a() {} void b() {} }");
    assert!(methods[0].is_deprecated().unwrap());
    assert!(methods[0].has_doc_comment().unwrap());
    assert!(!methods[1].has_doc_comment().unwrap());
    file.ensure_ast_loaded().unwrap();
    assert!(methods[0].is_deprecated().unwrap());
    let owner = methods[1].containing_class().unwrap().unwrap();
    assert_eq!(owner.name().unwrap().as_deref(), Some("C"));
}
