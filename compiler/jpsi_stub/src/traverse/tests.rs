use jpsi_ir::LanguageLevel;
use jpsi_parse::{parse_file, JavaLazyParser};
use jpsi_tree::{GreenAst, GreenElement};
use pretty_assertions::assert_eq;

use super::*;

/// Records entered kinds, indented by stub depth.
#[derive(Default)]
struct Recorder {
    depth: usize,
    lines: Vec<String>,
}

impl<A: LighterAst + ?Sized> StubVisitor<A> for Recorder {
    fn enter(&mut self, _ast: &A, _node: &A::Node, kind: ElementType, _parent: Option<&A::Node>) {
        self.lines.push(format!("{}{kind:?}", "  ".repeat(self.depth)));
        self.depth += 1;
    }

    fn exit(&mut self, _ast: &A, _node: &A::Node, _kind: ElementType) {
        self.depth -= 1;
    }
}

fn record(source: &str) -> Vec<String> {
    let green = parse_file(source, LanguageLevel::Jdk21).into_green();
    let ast = GreenAst::new(
        GreenElement::Node(green),
        JavaLazyParser::shared(),
        LanguageLevel::Jdk21,
    );
    let mut recorder = Recorder::default();
    visit_stub_nodes(&ast, &mut recorder);
    assert_eq!(recorder.depth, 0);
    recorder.lines
}

const METHOD_SKELETON: [&str; 5] = [
    "    METHOD",
    "      MODIFIER_LIST",
    "      TYPE_PARAMETER_LIST",
    "      PARAMETER_LIST",
    "      THROWS_LIST",
];

fn class_with(members: &[&str]) -> Vec<String> {
    let mut lines: Vec<String> = [
        "JAVA_FILE",
        "  IMPORT_LIST",
        "  CLASS",
        "    MODIFIER_LIST",
        "    TYPE_PARAMETER_LIST",
        "    EXTENDS_LIST",
        "    IMPLEMENTS_LIST",
    ]
    .iter()
    .map(|s| (*s).to_owned())
    .collect();
    lines.extend(members.iter().map(|s| (*s).to_owned()));
    lines
}

#[test]
fn stub_free_bodies_are_skipped() {
    assert_eq!(
        record("class C { void m() { if (x > 0) { x++; } } }"),
        class_with(&METHOD_SKELETON)
    );
}

#[test]
fn lambdas_in_bodies_get_stubs_but_not_their_parameters() {
    let mut expected = METHOD_SKELETON.to_vec();
    expected.push("      LAMBDA_EXPRESSION");
    assert_eq!(
        record("class C { void m() { Runnable r = (a) -> {}; } }"),
        class_with(&expected)
    );
}

#[test]
fn local_declarations_have_no_part_stubs() {
    let mut expected = METHOD_SKELETON.to_vec();
    expected.extend([
        "      CLASS",
        "        MODIFIER_LIST",
        "        TYPE_PARAMETER_LIST",
        "        EXTENDS_LIST",
        "        IMPLEMENTS_LIST",
    ]);
    // The annotated local variable's modifier list belongs to no stub.
    assert_eq!(
        record("class C { void m() { @A int v = 0; class L {} } }"),
        class_with(&expected)
    );
}

#[test]
fn receiver_parameters_are_skipped() {
    let expected = [
        "    METHOD",
        "      MODIFIER_LIST",
        "      TYPE_PARAMETER_LIST",
        "      PARAMETER_LIST",
        "        PARAMETER",
        "          MODIFIER_LIST",
        "      THROWS_LIST",
    ];
    assert_eq!(
        record("class C { void m(C this, int a) {} }"),
        class_with(&expected)
    );
}

#[test]
fn bodies_with_errors_are_skipped() {
    assert_eq!(
        record("class C { void m() { class L {} ) } }"),
        class_with(&METHOD_SKELETON)
    );
}

#[test]
fn imports_and_annotations_keep_no_children() {
    let lines = record("import a.B;\n@Ann(@Inner) class C {}");
    assert_eq!(
        lines[..6].to_vec(),
        vec![
            "JAVA_FILE",
            "  IMPORT_LIST",
            "    IMPORT_STATEMENT",
            "  CLASS",
            "    MODIFIER_LIST",
            "      ANNOTATION",
        ]
    );
    assert_eq!(lines.len(), 9);
}

#[test]
fn part_rule() {
    assert!(creates_stub(T::Method, false));
    assert!(creates_stub(T::LambdaExpression, false));
    assert!(!creates_stub(T::ModifierList, false));
    assert!(creates_stub(T::ModifierList, true));
    assert!(!creates_stub(T::LocalVariable, true));
}
