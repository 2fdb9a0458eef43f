use pretty_assertions::assert_eq;

use super::*;
use crate::{Deprecation, JavaFile, PsiConfig, PsiManager};

fn fields_of(text: &str) -> (Arc<JavaFile>, Vec<PsiField>) {
    fields_with(PsiConfig::default(), text)
}

fn fields_with(config: PsiConfig, text: &str) -> (Arc<JavaFile>, Vec<PsiField>) {
    let file = PsiManager::new(config).add_file("A.java", text);
    let fields = file.classes().unwrap()[0].own_fields().unwrap();
    (file, fields)
}

#[test]
fn followers_share_the_owner() {
    let (file, fields) = fields_of("class C { private static int a, b[] = {1, 2}; }");
    let (a, b) = (&fields[0], &fields[1]);
    assert_eq!(b.declaration_owner().unwrap(), *a);
    assert_eq!(a.declaration_owner().unwrap(), *a);
    assert_eq!(a.type_text().unwrap().as_deref(), Some("int"));
    assert_eq!(b.type_text().unwrap().as_deref(), Some("int[]"));
    assert_eq!(
        b.explicit_modifiers().unwrap(),
        StubFlags::PRIVATE | StubFlags::STATIC
    );
    assert_eq!(a.modifier_list().unwrap(), b.modifier_list().unwrap());
    assert_eq!(a.initializer_text().unwrap(), None);
    assert_eq!(b.initializer_text().unwrap().as_deref(), Some("{1,2}"));
    assert!(!file.is_ast_loaded());

    file.ensure_ast_loaded().unwrap();
    assert_eq!(b.declaration_owner().unwrap(), *a);
    assert_eq!(b.type_text().unwrap().as_deref(), Some("int[]"));
    assert_eq!(
        b.explicit_modifiers().unwrap(),
        StubFlags::PRIVATE | StubFlags::STATIC
    );
    assert_eq!(b.initializer().unwrap().map(|i| i.kind()), Some(T::ArrayInitializerExpression));
}

#[test]
fn long_initializers_are_read_from_the_tree() {
    let config = PsiConfig::default().with_initializer_text_limit(4);
    let (file, fields) = fields_with(config, "class C { String s = \"long text\"; int n = 1; }");
    assert_eq!(fields[1].initializer_text().unwrap().as_deref(), Some("1"));
    assert!(!file.is_ast_loaded());
    assert_eq!(
        fields[0].initializer_text().unwrap().as_deref(),
        Some("\"long text\"")
    );
    assert!(file.is_ast_loaded());
}

#[test]
fn enum_constants() {
    let file = PsiManager::new(PsiConfig::default())
        .add_file("E.java", "enum E { A(1), B { }; E(int x) {} E() {} }");
    let constants = file.classes().unwrap()[0].enum_constants().unwrap();
    let a = &constants[0];
    assert!(a.is_enum_constant());
    assert_eq!(a.type_text().unwrap().as_deref(), Some("E"));
    assert_eq!(a.modifier_list().unwrap(), None);
    assert_eq!(a.initializer().unwrap(), None);
    assert_eq!(a.declaration_owner().unwrap(), *a);
    assert!(a.has_modifier_property(StubFlags::PUBLIC | StubFlags::STATIC | StubFlags::FINAL).unwrap());
    assert!(a.enum_constant_body().unwrap().is_none());
    assert!(constants[1].enum_constant_body().unwrap().is_some());

    file.ensure_ast_loaded().unwrap();
    assert_eq!(a.type_text().unwrap().as_deref(), Some("E"));
}

#[test]
fn interface_fields_are_constants() {
    let (_file, fields) = fields_of("interface I { int X = 1; }");
    let x = &fields[0];
    assert_eq!(x.explicit_modifiers().unwrap(), StubFlags::empty());
    assert_eq!(
        x.implicit_modifiers().unwrap(),
        StubFlags::PUBLIC | StubFlags::STATIC | StubFlags::FINAL
    );
    assert_eq!(x.containing_class().unwrap().unwrap().name().unwrap().as_deref(), Some("I"));
}

#[test]
fn documentation_is_shared_by_followers() {
    let (file, fields) = fields_of("class C { /** @deprecated */ int a, b; @Deprecated int c; int d; }");
    let deprecations = |fields: &[PsiField]| -> Vec<Option<Deprecation>> {
        fields.iter().map(|f| f.deprecation().unwrap()).collect()
    };
    let expected = vec![
        Some(Deprecation::DocTag),
        Some(Deprecation::DocTag),
        Some(Deprecation::Annotation),
        None,
    ];
    assert_eq!(deprecations(&fields[..]), expected);
    file.ensure_ast_loaded().unwrap();
    assert_eq!(deprecations(&fields[..]), expected);
}

#[test]
fn psi_type_is_cached_per_stamp() {
    let (file, fields) = fields_of("class C { java.util.List<String>[] xs; }");
    let first = fields[0].psi_type().unwrap().unwrap();
    let second = fields[0].psi_type().unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.array_dimensions(), 1);
    assert_eq!(first.to_string(), "java.util.List<String>[]");

    file.classes().unwrap()[0].add_member("int y;").unwrap();
    let third = fields[0].psi_type().unwrap().unwrap();
    assert_eq!(third, first);
}

#[test]
fn tree_helpers_on_local_declarations() {
    let (file, _) = fields_of("class C { void m() { final int a = 1, b; } }");
    file.ensure_ast_loaded().unwrap();
    let state = file.current_state();
    let ast = state.loaded_ast().unwrap();
    let tree = &ast.tree;
    let mut locals = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if tree.kind(node) == T::LocalVariable {
            locals.push(node);
        }
        stack.extend(tree.children(node).into_iter().rev());
    }
    assert_eq!(locals.len(), 2);
    assert_eq!(tree_owner(tree, locals[1]), Some(locals[0]));
    assert_eq!(declaration_nodes(tree, locals[1]), locals);
    assert_eq!(tree_type_text(tree, locals[1]).as_deref(), Some("int"));
}
