use pretty_assertions::assert_eq;

use super::*;
use crate::{Named, PsiConfig, PsiField};

fn java_file(text: &str) -> Arc<JavaFile> {
    PsiManager::new(PsiConfig::default()).add_file("A.java", text)
}

fn first_class(file: &Arc<JavaFile>) -> PsiClass {
    file.classes().unwrap().remove(0)
}

#[test]
fn handles_survive_the_switch_to_the_tree() {
    let file = java_file("class C { int x; void m() { x++; } }");
    let class = first_class(&file);
    assert!(class.element().is_stub_based());
    assert!(!file.is_ast_loaded());

    let method = class.own_methods().unwrap().remove(0);
    assert!(method.body().unwrap().is_some());
    assert!(file.is_ast_loaded());
    assert!(class.element().is_valid());
    assert!(!class.element().is_stub_based());
    assert_eq!(class.name().unwrap().as_deref(), Some("C"));

    let fresh = first_class(&file);
    assert_eq!(
        fresh.element().backing(),
        Backing::Tree(class.element().node().unwrap())
    );
    assert_eq!(fresh, class);
}

#[test]
fn stub_navigation_does_not_load_the_tree() {
    let file = java_file("class C { int x; }");
    let class = first_class(&file);
    let field = class.own_fields().unwrap().remove(0);
    let parent = field.element().parent().unwrap();
    assert_eq!(parent.as_ref().map(PsiElement::kind), Some(T::Class));
    let containing = field.element().containing_class().unwrap();
    assert_eq!(containing, Some(class));
    let file_element = field.element().ancestor_where(|k| k == T::File).unwrap();
    assert_eq!(file_element.map(|e| e.kind()), Some(T::File));
    assert!(!file.is_ast_loaded());
}

#[test]
fn text_and_range_come_from_the_tree() {
    let source = "class C { int x = 1; }";
    let file = java_file(source);
    let field = first_class(&file).own_fields().unwrap().remove(0);
    assert_eq!(field.element().text().unwrap(), "int x = 1;");
    let start = u32::try_from(source.find("int").unwrap()).unwrap();
    assert_eq!(field.element().text_range().unwrap(), Span::new(start, start + 10));
}

#[test]
fn reparsing_invalidates_handles() {
    let file = java_file("class C { int x; }");
    let class = first_class(&file);
    let field = class.own_fields().unwrap().remove(0);
    file.set_text("class D {}");
    assert!(!class.element().is_valid());
    assert!(matches!(
        field.name(),
        Err(PsiError::InvalidElement { kind: T::Field, .. })
    ));
    let names: Vec<_> = file
        .classes()
        .unwrap()
        .iter()
        .map(|c| c.name().unwrap())
        .collect();
    assert_eq!(names, vec![Some("D".to_owned())]);
}

#[test]
fn delete_detaches_the_element() {
    let file = java_file("class C { void a() {} void b() {} }");
    let class = first_class(&file);
    let a = class.own_methods().unwrap().remove(0);
    let stamp = file.manager().modification_count();

    a.element().delete().unwrap();
    assert_eq!(file.text(), "class C {  void b() {} }");
    assert!(!a.element().is_valid());
    assert!(file.manager().modification_count() > stamp);
    let names: Vec<_> = class
        .own_methods()
        .unwrap()
        .iter()
        .map(|m| m.name().unwrap())
        .collect();
    assert_eq!(names, vec![Some("b".to_owned())]);
}

#[test]
fn deleting_one_field_takes_the_declaration() {
    let file = java_file("class C { int a, b; int c; }");
    let class = first_class(&file);
    let b = class.own_fields().unwrap().remove(1);
    b.delete().unwrap();
    let names: Vec<_> = class
        .own_fields()
        .unwrap()
        .iter()
        .map(|f| f.name().unwrap())
        .collect();
    assert_eq!(names, vec![Some("c".to_owned())]);
}

#[test]
fn copies_are_detached() {
    let file = java_file("package p; class C { int x; void m() { x++; } }");
    let class = first_class(&file);
    let copy = class.element().copy().unwrap();
    assert!(!copy.file().is_physical());
    assert!(file.is_physical());
    assert_eq!(copy.kind(), T::Class);
    assert_eq!(copy.text().unwrap(), class.element().text().unwrap());
    assert_ne!(&copy, class.element());

    let copied = PsiClass::cast(copy).unwrap();
    let fields: Vec<_> = copied
        .own_fields()
        .unwrap()
        .into_iter()
        .map(PsiField::into_element)
        .map(|e| e.text().unwrap())
        .collect();
    assert_eq!(fields, vec!["int x;".to_owned()]);
    // The copy has no package, so only the simple name remains.
    assert_eq!(copied.qualified_name().unwrap().as_deref(), Some("C"));
}

#[test]
fn children_include_tokens() {
    let file = java_file("class C {}");
    let kinds: Vec<_> = first_class(&file)
        .element()
        .children()
        .unwrap()
        .iter()
        .map(PsiElement::kind)
        .filter(|k| !k.is_trivia())
        .collect();
    assert_eq!(
        kinds,
        vec![
            T::ModifierList,
            T::ClassKeyword,
            T::Identifier,
            T::TypeParameterList,
            T::ExtendsList,
            T::ImplementsList,
            T::LBrace,
            T::RBrace,
        ]
    );
}

#[test]
fn handles_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PsiElement>();
    assert_send_sync::<crate::PsiClass>();
    assert_send_sync::<crate::PsiManager>();
    assert_send_sync::<crate::JavaFile>();
}
