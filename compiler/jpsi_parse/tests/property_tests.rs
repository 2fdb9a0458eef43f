//! Property tests for the parser: lossless output and lazy-region reparsing.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "property tests assert on generated input"
)]

use jpsi_ir::{ElementType, LanguageLevel};
use jpsi_parse::{parse_code_block, parse_file};
use jpsi_tree::{GreenElement, GreenNode};
use proptest::prelude::*;

fn java_like() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "class C ", "interface I ", "enum E ", "record R(int a) ", "@A ", "public ",
        "static ", "{", "}", "(", ")", ";", ",", "int x", " = ", "1", "void m() ",
        "x -> x", "a::b", "new T() ", "if (a) ", "else ", "return ", "List<Map<K, V>> ",
        "a >> b", "a >>>= 2", "/** doc */", "// c\n", " ", "\n", "switch (x) { case 1 -> 2; }",
        "\"s\"", "var ", "yield ", "sealed ", "permits ", "<T>", "[]", "...", "#",
    ]);
    prop::collection::vec(pieces, 0..48).prop_map(|v| v.concat())
}

fn lazy_regions(node: &GreenNode, out: &mut Vec<String>) {
    for child in node.children() {
        match child {
            GreenElement::Node(n) => lazy_regions(n, out),
            GreenElement::Lazy(lazy) => {
                assert_eq!(lazy.kind(), ElementType::CodeBlock);
                out.push(lazy.text().to_string());
            }
            GreenElement::Token(_) => {}
        }
    }
}

proptest! {
    #[test]
    fn file_parse_is_lossless(source in any::<String>()) {
        let parse = parse_file(&source, LanguageLevel::Jdk21);
        prop_assert_eq!(parse.green().kind(), ElementType::File);
        prop_assert_eq!(parse.green().text(), source);
    }

    #[test]
    fn java_like_file_parse_is_lossless(source in java_like()) {
        for level in LanguageLevel::ALL {
            let parse = parse_file(&source, level);
            prop_assert_eq!(parse.green().text(), source.clone());
        }
    }

    #[test]
    fn code_block_parse_is_lossless(source in java_like()) {
        let parse = parse_code_block(&source, LanguageLevel::Jdk21);
        prop_assert_eq!(parse.green().kind(), ElementType::CodeBlock);
        prop_assert_eq!(parse.green().text(), source);
    }

    #[test]
    fn lazy_regions_reparse_to_same_text(source in java_like()) {
        let parse = parse_file(&source, LanguageLevel::Jdk21);
        let mut regions = Vec::new();
        lazy_regions(parse.green(), &mut regions);
        for text in regions {
            let block = parse_code_block(&text, LanguageLevel::Jdk21);
            prop_assert_eq!(block.green().kind(), ElementType::CodeBlock);
            prop_assert_eq!(block.green().text(), text.clone());

            // Nested regions keep reparsing cleanly.
            let mut nested = Vec::new();
            lazy_regions(block.green(), &mut nested);
            for inner in nested {
                prop_assert_eq!(parse_code_block(&inner, LanguageLevel::Jdk21).green().text(), inner.clone());
            }
        }
    }
}
