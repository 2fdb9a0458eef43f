use pretty_assertions::assert_eq;

use super::*;

fn class(name: &str, arguments: Vec<PsiType>) -> PsiType {
    PsiType::Class {
        name: name.to_owned(),
        arguments,
    }
}

#[test]
fn primitives_and_arrays() {
    assert_eq!(PsiType::parse("int"), PsiType::Primitive(PrimitiveType::Int));
    let matrix = PsiType::parse("double[][]");
    assert_eq!(matrix.array_dimensions(), 2);
    assert_eq!(
        matrix.deep_component_type(),
        &PsiType::Primitive(PrimitiveType::Double)
    );
}

#[test]
fn generic_class_types() {
    let ty = PsiType::parse("java.util.Map<String,List<? extends Number>>");
    assert_eq!(
        ty,
        class(
            "java.util.Map",
            vec![
                class("String", vec![]),
                class(
                    "List",
                    vec![PsiType::Wildcard(Some(WildcardBound::Extends(Box::new(
                        class("Number", vec![])
                    ))))]
                ),
            ]
        )
    );
    assert_eq!(ty.class_name(), Some("Map"));
}

#[test]
fn display_gives_the_normalized_text_back() {
    for text in [
        "int",
        "String[]",
        "Map<K,V>",
        "List<? super T>",
        "Outer.Inner<?>",
        "Object...",
        "boolean[]...",
    ] {
        assert_eq!(PsiType::parse(text).to_string(), text);
    }
}

#[test]
fn varargs_count_as_a_dimension() {
    let ty = PsiType::parse("String...");
    assert!(matches!(ty, PsiType::Ellipsis(_)));
    assert_eq!(ty.array_dimensions(), 1);
}

#[test]
fn annotations_are_skipped() {
    assert_eq!(
        PsiType::parse("@NonNull String"),
        class("String", vec![])
    );
    assert_eq!(
        PsiType::parse("@a.B(x = 1) int[]").to_string(),
        "int[]"
    );
}

#[test]
fn garbage_is_kept_as_invalid() {
    let ty = PsiType::parse("int x");
    assert_eq!(ty, PsiType::Invalid("int x".to_owned()));
    assert!(!ty.is_valid());
    assert!(!PsiType::parse("").is_valid());
    assert!(!PsiType::parse("List<int").is_valid());
}
