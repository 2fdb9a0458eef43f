//! Property tests for the tokenizer: losslessness and progress on arbitrary input.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "property tests assert on generated input"
)]

use jpsi_lexer::{tokenize, Lexer};
use proptest::prelude::*;

fn java_like() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "class", " ", "\n", "Foo", "{", "}", "(", ")", "->", "::", ">", ">>=", "@",
        "\"s\"", "'c'", "/* c */", "// x\n", "/** d */", "1.5f", "0x1F", "new", ";",
        "\"\"\"\nblock\n\"\"\"", "é", "#",
    ]);
    prop::collection::vec(pieces, 0..40).prop_map(|v| v.concat())
}

proptest! {
    #[test]
    fn tokens_cover_source_exactly(source in any::<String>()) {
        let tokens = tokenize(&source);
        let rebuilt: String = tokens.iter().map(|t| t.text(&source)).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn every_token_is_non_empty(source in java_like()) {
        for token in Lexer::new(&source) {
            prop_assert!(token.span.end > token.span.start);
        }
    }

    #[test]
    fn java_like_round_trips(source in java_like()) {
        let rebuilt: String = tokenize(&source).iter().map(|t| t.text(&source)).collect();
        prop_assert_eq!(rebuilt, source);
    }
}
