//! Property tests for stub building: classifier agreement, tree-form
//! independence and serialization round trips.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "property tests assert on generated input"
)]

use jpsi_ir::LanguageLevel;
use jpsi_parse::{parse_code_block, parse_file, JavaLazyParser};
use jpsi_stub::{
    build_stub_tree, deserialize_stub_tree, is_stub_free_text, is_stub_free_tree,
    serialize_stub_tree, StubBuildOptions,
};
use jpsi_tree::{GreenAst, GreenElement, LighterAst, NodeId, SyntaxTree};
use proptest::prelude::*;

/// Statements that declare nothing.
fn plain_statement() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "x++;",
        "int a = 1, b[] = {2};",
        "if (a > b) { a = b; } else a--;",
        "for (int i = 0; i < n; i++) sum += i;",
        "for (String s : list) print(s);",
        "while (x >>> 1 != 0) x >>= 1;",
        "Class<?> c = String.class;",
        "Class<?> d = int[].class;",
        "Object o = new Object();",
        "int[] arr = new int[] {1, 2};",
        "switch (k) { case 1: break; default: k = 0; }",
        "try { f(); } catch (Exception e) { throw e; } finally { g(); }",
        "String s = \"@Ann -> :: class\";",
        "// class Local {}\n",
        "/* () -> {} */",
        "var record = 3;",
        "label: { break label; }",
        "return;",
    ])
}

/// Constructs that force a body into the stub tree.
fn declaring_statement() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "@SuppressWarnings(\"x\") int a = 1;",
        "Runnable r = () -> {};",
        "list.forEach(x -> print(x));",
        "list.forEach(System.out::println);",
        "Object o = new Object() { };",
        "class Local {}",
        "enum LocalEnum { A }",
        "interface LocalI {}",
        "record Point(int x, int y) {}",
        "record Box<T>(T t) {}",
    ])
}

fn body(statements: Vec<&str>) -> String {
    format!("{{ {} }}", statements.join(" "))
}

fn java_like() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "class C ", "interface I ", "enum E ", "record R(int a) ", "@A ", "public ",
        "static ", "{", "}", "(", ")", ";", ",", "int x", " = ", "1", "void m() ",
        "x -> x", "a::b", "new T() ", "if (a) ", "return ", "List<Map<K, V>> ",
        "a >> b", "/** @deprecated */", " ", "\n", ".class ", "int[]", "String ",
        "var ", "yield ", "sealed ", "non-sealed ", "permits ", "<T>", "[]", "...", ".",
    ]);
    prop::collection::vec(pieces, 0..48).prop_map(|v| v.concat())
}

fn classify_both(text: &str) -> (bool, bool) {
    let green = parse_code_block(text, LanguageLevel::Jdk21).into_green();
    let ast = GreenAst::new(
        GreenElement::Node(green),
        JavaLazyParser::shared(),
        LanguageLevel::Jdk21,
    );
    (is_stub_free_text(text), is_stub_free_tree(&ast, &ast.root()))
}

fn expand_all(tree: &SyntaxTree, node: NodeId) {
    for child in tree.children(node) {
        expand_all(tree, child);
    }
}

proptest! {
    #[test]
    fn plain_bodies_are_stub_free(statements in prop::collection::vec(plain_statement(), 0..8)) {
        let text = body(statements);
        prop_assert_eq!(classify_both(&text), (true, true), "{}", text);
    }

    #[test]
    fn declaring_bodies_are_not(
        before in prop::collection::vec(plain_statement(), 0..4),
        declaring in declaring_statement(),
        after in prop::collection::vec(plain_statement(), 0..4),
    ) {
        let mut statements = before;
        statements.push(declaring);
        statements.extend(after);
        let text = body(statements);
        prop_assert_eq!(classify_both(&text), (false, false), "{}", text);
    }

    #[test]
    fn classifiers_agree_on_arbitrary_bodies(inner in java_like()) {
        let text = format!("{{{inner}}}");
        let (by_text, by_tree) = classify_both(&text);
        prop_assert_eq!(by_text, by_tree, "{}", text);
    }

    #[test]
    fn stubs_do_not_depend_on_the_tree_form(source in java_like()) {
        let green = parse_file(&source, LanguageLevel::Jdk21).into_green();
        let from_green = build_stub_tree(
            &GreenAst::new(
                GreenElement::Node(green.clone()),
                JavaLazyParser::shared(),
                LanguageLevel::Jdk21,
            ),
            StubBuildOptions::default(),
        );
        let syntax = SyntaxTree::new(&green, LanguageLevel::Jdk21, JavaLazyParser::shared(), false);
        let collapsed = build_stub_tree(&syntax, StubBuildOptions::default());
        prop_assert_eq!(&collapsed, &from_green);
        expand_all(&syntax, syntax.root());
        let expanded = build_stub_tree(&syntax, StubBuildOptions::default());
        prop_assert_eq!(&expanded, &from_green);
    }

    #[test]
    fn serialization_round_trips(source in java_like()) {
        let green = parse_file(&source, LanguageLevel::Jdk21).into_green();
        let ast = GreenAst::new(
            GreenElement::Node(green),
            JavaLazyParser::shared(),
            LanguageLevel::Jdk21,
        );
        let tree = build_stub_tree(&ast, StubBuildOptions::default());
        let bytes = serialize_stub_tree(&tree).unwrap();
        prop_assert_eq!(deserialize_stub_tree(&bytes).unwrap(), tree);
    }
}
