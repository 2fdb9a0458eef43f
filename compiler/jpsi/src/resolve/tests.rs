use pretty_assertions::assert_eq;

use crate::{PsiConfig, PsiManager};

use super::*;

/// Every reference expression named `name` in the first class, in source
/// order, with all bodies parsed.
fn references(text: &str, name: &str) -> Vec<PsiReferenceExpression> {
    let file = PsiManager::new(PsiConfig::default()).add_file("A.java", text);
    let class = file.classes().unwrap().remove(0);
    let mut found = Vec::new();
    let mut pending = vec![class.into_element()];
    while let Some(element) = pending.pop() {
        if let Some(reference) = PsiReferenceExpression::cast(element.clone()) {
            if reference.reference_name().unwrap().as_deref() == Some(name) {
                found.push(reference);
            }
        }
        let mut children = element.children().unwrap();
        children.reverse();
        pending.extend(children);
    }
    found
}

fn resolved_kind(reference: &PsiReferenceExpression) -> Option<(ElementType, String)> {
    let element = match reference.resolve().unwrap()? {
        PsiVariable::Local(local) => local.element().clone(),
        PsiVariable::Parameter(parameter) => parameter.element().clone(),
        PsiVariable::Field(Member::Own(field)) => field.element().clone(),
        PsiVariable::Field(Member::Light(synthetic)) => {
            return Some((T::Field, synthetic.member.name().to_owned()));
        }
    };
    let text = element.text().unwrap();
    Some((element.kind(), text))
}

#[test]
fn field_is_found_from_a_nested_block() {
    let refs = references("class C { int x; void m() { if (x > 0) { x++; } } }", "x");
    assert_eq!(refs.len(), 2);
    for reference in &refs {
        assert_eq!(resolved_kind(reference), Some((T::Field, "int x;".to_owned())));
    }
}

#[test]
fn locals_shadow_fields_only_after_their_declaration() {
    let refs = references("class C { int x; void m() { x = 1; int x = 2; x++; } }", "x");
    assert_eq!(refs.len(), 2);
    assert_eq!(resolved_kind(&refs[0]).map(|(k, _)| k), Some(T::Field));
    assert_eq!(resolved_kind(&refs[1]).map(|(k, _)| k), Some(T::LocalVariable));
}

#[test]
fn parameters_and_lambda_parameters() {
    let refs = references(
        "class C { int a; void m(int a) { a++; java.util.function.IntUnaryOperator f = a -> a + 1; } }",
        "a",
    );
    let kinds: Vec<_> = refs.iter().map(resolved_kind).collect();
    assert_eq!(
        kinds,
        vec![
            Some((T::Parameter, "int a".to_owned())),
            Some((T::Parameter, "a".to_owned())),
        ]
    );
}

#[test]
fn statement_scopes() {
    let refs = references(
        "class C { void m() { for (int i = 0; i < 3; i++) { use(i); } \
         for (String s : items) { use(s); } \
         try (Reader r = open()) { use(r); } catch (Exception e) { use(e); } } }",
        "i",
    );
    assert!(refs
        .iter()
        .all(|r| resolved_kind(r).map(|(k, _)| k) == Some(T::LocalVariable)));

    let text = "class C { void m() { for (String s : items) { use(s); } \
                try (Reader r = open()) { use(r); } catch (Exception e) { use(e); } } }";
    let s = references(text, "s");
    assert_eq!(resolved_kind(&s[0]).map(|(k, _)| k), Some(T::Parameter));
    let r = references(text, "r");
    assert_eq!(resolved_kind(&r[0]).map(|(k, _)| k), Some(T::ResourceVariable));
    let e = references(text, "e");
    assert_eq!(resolved_kind(&e[0]).map(|(k, _)| k), Some(T::Parameter));
}

#[test]
fn earlier_declarators_are_visible() {
    let refs = references("class C { void m() { int a = 1, b = a; } }", "a");
    assert_eq!(refs.len(), 1);
    assert_eq!(
        resolved_kind(&refs[0]),
        Some((T::LocalVariable, "int a = 1,".to_owned()))
    );
}

#[test]
fn this_qualified_and_inherited_fields() {
    let refs = references(
        "class B extends A { int y; void m(int y) { this.y = y; z++; } }\nclass A { int z; }",
        "y",
    );
    assert_eq!(refs.len(), 2);
    assert_eq!(resolved_kind(&refs[0]), Some((T::Field, "int y;".to_owned())));
    assert_eq!(resolved_kind(&refs[1]).map(|(k, _)| k), Some(T::Parameter));
    let qualifier = refs[0].qualifier().unwrap().unwrap();
    assert_eq!(qualifier.kind(), T::ThisExpression);

    let z = references(
        "class B extends A { void m() { z++; } }\nclass A { int z; }",
        "z",
    );
    assert_eq!(resolved_kind(&z[0]), Some((T::Field, "int z;".to_owned())));
}

#[test]
fn other_qualifiers_and_unknown_names_do_not_resolve() {
    let refs = references("class C { int x; void m(C other) { other.x++; y++; } }", "x");
    assert_eq!(refs.len(), 1);
    assert_eq!(resolved_kind(&refs[0]), None);
    let unknown = references("class C { void m() { y++; } }", "y");
    assert_eq!(resolved_kind(&unknown[0]), None);
}

#[test]
fn compact_constructors_see_components() {
    let refs = references("record R(int lo, int hi) { R { if (lo > hi) throw new E(); } }", "lo");
    assert_eq!(refs.len(), 1);
    assert_eq!(
        resolved_kind(&refs[0]),
        Some((T::RecordComponent, "int lo".to_owned()))
    );
}

#[test]
fn record_component_fields_are_light() {
    let refs = references("record R(int lo) { int twice() { return lo * 2; } }", "lo");
    assert_eq!(refs.len(), 1);
    assert_eq!(resolved_kind(&refs[0]), Some((T::Field, "lo".to_owned())));
}
