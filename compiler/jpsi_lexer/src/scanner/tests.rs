use super::*;
use pretty_assertions::assert_eq;
use ElementType as T;

fn kinds(source: &str) -> Vec<ElementType> {
    Lexer::new(source).map(|t| t.kind).collect()
}

fn significant(source: &str) -> Vec<ElementType> {
    Lexer::new(source)
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

fn texts(source: &str) -> Vec<&str> {
    Lexer::new(source).map(|t| t.text(source)).collect()
}

// === Trivia ===

#[test]
fn whitespace_runs_are_one_token() {
    assert_eq!(kinds(" \t\r\n x"), vec![T::WhiteSpace, T::Identifier]);
}

#[test]
fn comment_flavors() {
    assert_eq!(
        kinds("// eol\n/* c */ /** doc */ /**/"),
        vec![
            T::EndOfLineComment,
            T::WhiteSpace,
            T::CStyleComment,
            T::WhiteSpace,
            T::DocComment,
            T::WhiteSpace,
            T::CStyleComment,
        ]
    );
}

#[test]
fn unterminated_comment_runs_to_end() {
    assert_eq!(texts("a /* open"), vec!["a", " ", "/* open"]);
}

// === Identifiers & keywords ===

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        significant("public class Foo$1 _x"),
        vec![T::PublicKeyword, T::ClassKeyword, T::Identifier, T::Identifier]
    );
}

#[test]
fn contextual_keywords_are_identifiers() {
    assert_eq!(
        significant("record var yield sealed permits"),
        vec![T::Identifier; 5]
    );
}

#[test]
fn non_sealed_is_three_tokens() {
    assert_eq!(significant("non-sealed"), vec![T::Identifier, T::Minus, T::Identifier]);
}

#[test]
fn unicode_identifier() {
    assert_eq!(texts("naïve = 1"), vec!["naïve", " ", "=", " ", "1"]);
}

// === Literals ===

#[test]
fn numeric_literals() {
    assert_eq!(
        significant("1 1L 0x1F 0b101 1.5 1e3 2f 3D .5 0x1.8p3 1_000"),
        vec![
            T::IntegerLiteral,
            T::LongLiteral,
            T::IntegerLiteral,
            T::IntegerLiteral,
            T::DoubleLiteral,
            T::DoubleLiteral,
            T::FloatLiteral,
            T::DoubleLiteral,
            T::DoubleLiteral,
            T::DoubleLiteral,
            T::IntegerLiteral,
        ]
    );
}

#[test]
fn string_and_char_literals() {
    assert_eq!(
        texts(r#""a\"b" 'c' '\''"#),
        vec![r#""a\"b""#, " ", "'c'", " ", r"'\''"]
    );
}

#[test]
fn unterminated_string_stops_at_newline() {
    assert_eq!(
        kinds("\"abc\nx"),
        vec![T::StringLiteral, T::WhiteSpace, T::Identifier]
    );
}

#[test]
fn text_block() {
    let source = "\"\"\"\n  hi \\\"\"\" there\n\"\"\";";
    assert_eq!(kinds(source), vec![T::TextBlockLiteral, T::Semicolon]);
}

// === Operators ===

#[test]
fn greater_than_is_never_fused() {
    assert_eq!(significant(">>>="), vec![T::Gt, T::Gt, T::Gt, T::Eq]);
    assert_eq!(significant(">="), vec![T::Gt, T::Eq]);
}

#[test]
fn compound_operators() {
    assert_eq!(
        significant("-> :: ... ++ -- && || == != <= << <<= += -= *= /= &= |= ^= %="),
        vec![
            T::Arrow,
            T::DoubleColon,
            T::Ellipsis,
            T::PlusPlus,
            T::MinusMinus,
            T::AndAnd,
            T::OrOr,
            T::EqEq,
            T::Ne,
            T::Le,
            T::LtLt,
            T::LtLtEq,
            T::PlusEq,
            T::MinusEq,
            T::AsteriskEq,
            T::DivEq,
            T::AndEq,
            T::OrEq,
            T::XorEq,
            T::PercEq,
        ]
    );
}

#[test]
fn bad_characters_are_single_tokens() {
    assert_eq!(kinds("#\\"), vec![T::BadCharacter, T::BadCharacter]);
    assert_eq!(texts("→"), vec!["→"]);
}

#[test]
fn spans_are_contiguous() {
    let source = "class C { int x = 1; }";
    let mut expected_start = 0;
    for token in Lexer::new(source) {
        assert_eq!(token.span.start, expected_start);
        expected_start = token.span.end;
    }
    assert_eq!(expected_start as usize, source.len());
}
