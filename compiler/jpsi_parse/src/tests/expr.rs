use jpsi_ir::{ElementType, LanguageLevel};
use pretty_assertions::assert_eq;

use super::{block, block_at, sexp, tokens};

/// Render the single expression statement of `{ <expr>; }`.
fn expr(source: &str) -> String {
    let text = format!("{{ {source}; }}");
    let parse = block(&text);
    assert!(parse.errors().is_empty(), "{source}: {:?}", parse.errors());
    let rendered = sexp(parse.green());
    rendered
        .strip_prefix("CODE_BLOCK[{ EXPRESSION_STATEMENT[")
        .and_then(|s| s.strip_suffix(" ;] }]"))
        .map(str::to_string)
        .unwrap_or(rendered)
}

#[test]
fn precedence_climbing() {
    assert_eq!(
        expr("a + b * c"),
        "BINARY_EXPRESSION[REFERENCE_EXPRESSION[a] + BINARY_EXPRESSION[REFERENCE_EXPRESSION[b] \
         * REFERENCE_EXPRESSION[c]]]"
    );
    assert_eq!(
        expr("a - b - c"),
        "BINARY_EXPRESSION[BINARY_EXPRESSION[REFERENCE_EXPRESSION[a] - REFERENCE_EXPRESSION[b]] \
         - REFERENCE_EXPRESSION[c]]"
    );
    assert_eq!(
        expr("a || b && c"),
        "BINARY_EXPRESSION[REFERENCE_EXPRESSION[a] || BINARY_EXPRESSION[REFERENCE_EXPRESSION[b] \
         && REFERENCE_EXPRESSION[c]]]"
    );
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(
        expr("a = b = 1"),
        "ASSIGNMENT_EXPRESSION[REFERENCE_EXPRESSION[a] = ASSIGNMENT_EXPRESSION[\
         REFERENCE_EXPRESSION[b] = LITERAL_EXPRESSION[1]]]"
    );
}

#[test]
fn shift_operators_are_fused() {
    assert_eq!(
        expr("a >>= b >>> 2"),
        "ASSIGNMENT_EXPRESSION[REFERENCE_EXPRESSION[a] >>= BINARY_EXPRESSION[\
         REFERENCE_EXPRESSION[b] >>> LITERAL_EXPRESSION[2]]]"
    );
    let parse = block("{ x = a >= b >> c; }");
    let kinds: Vec<ElementType> = tokens(parse.green())
        .into_iter()
        .map(|(k, _)| k)
        .filter(|k| k.is_fused_operator())
        .collect();
    assert_eq!(kinds, vec![ElementType::Ge, ElementType::GtGt]);
}

#[test]
fn separated_gt_tokens_are_not_fused() {
    let parse = block("{ x = a > > b; }");
    assert!(!parse.errors().is_empty());
    assert!(tokens(parse.green())
        .iter()
        .all(|(k, _)| !k.is_fused_operator()));
}

#[test]
fn calls_and_member_access() {
    assert_eq!(
        expr("a.b(c).d[0]"),
        "ARRAY_ACCESS_EXPRESSION[REFERENCE_EXPRESSION[METHOD_CALL_EXPRESSION[\
         REFERENCE_EXPRESSION[REFERENCE_EXPRESSION[a] . b] EXPRESSION_LIST[( \
         REFERENCE_EXPRESSION[c] )]] . d] [ LITERAL_EXPRESSION[0] ]]"
    );
    assert_eq!(
        expr("this.<T>m()"),
        "METHOD_CALL_EXPRESSION[REFERENCE_EXPRESSION[THIS_EXPRESSION[this] . \
         REFERENCE_PARAMETER_LIST[< TYPE[JAVA_CODE_REFERENCE[T REFERENCE_PARAMETER_LIST[]]] >] m] \
         EXPRESSION_LIST[( )]]"
    );
    assert_eq!(
        expr("super(x)"),
        "METHOD_CALL_EXPRESSION[REFERENCE_EXPRESSION[super] EXPRESSION_LIST[( \
         REFERENCE_EXPRESSION[x] )]]"
    );
}

#[test]
fn conditional_and_instanceof() {
    assert_eq!(
        expr("o instanceof String s ? 1 : 2"),
        "CONDITIONAL_EXPRESSION[INSTANCE_OF_EXPRESSION[REFERENCE_EXPRESSION[o] instanceof \
         TYPE[JAVA_CODE_REFERENCE[String REFERENCE_PARAMETER_LIST[]]] s] ? LITERAL_EXPRESSION[1] \
         : LITERAL_EXPRESSION[2]]"
    );
}

#[test]
fn casts_versus_parentheses() {
    assert_eq!(
        expr("(int) -x"),
        "TYPE_CAST_EXPRESSION[( TYPE[int] ) PREFIX_EXPRESSION[- REFERENCE_EXPRESSION[x]]]"
    );
    assert_eq!(
        expr("(String) o"),
        "TYPE_CAST_EXPRESSION[( TYPE[JAVA_CODE_REFERENCE[String REFERENCE_PARAMETER_LIST[]]] ) \
         REFERENCE_EXPRESSION[o]]"
    );
    assert_eq!(
        expr("(a) - b"),
        "BINARY_EXPRESSION[PARENTH_EXPRESSION[( REFERENCE_EXPRESSION[a] )] - REFERENCE_EXPRESSION[b]]"
    );
    assert_eq!(
        expr("(i < n)"),
        "PARENTH_EXPRESSION[( BINARY_EXPRESSION[REFERENCE_EXPRESSION[i] < REFERENCE_EXPRESSION[n]] )]"
    );
}

#[test]
fn lambdas_have_lazy_block_bodies() {
    let parse = block("{ Runnable r = () -> { go(); }; }");
    assert!(parse.errors().is_empty());
    assert!(sexp(parse.green())
        .contains("LAMBDA_EXPRESSION[PARAMETER_LIST[( )] -> CODE_BLOCK~{ go(); }]"));

    assert_eq!(
        expr("f(x -> x + 1)"),
        "METHOD_CALL_EXPRESSION[REFERENCE_EXPRESSION[f] EXPRESSION_LIST[( LAMBDA_EXPRESSION[\
         PARAMETER_LIST[PARAMETER[MODIFIER_LIST[] x]] -> BINARY_EXPRESSION[REFERENCE_EXPRESSION[x] \
         + LITERAL_EXPRESSION[1]]] )]]"
    );
    assert_eq!(
        expr("f((int a, b) -> a)"),
        "METHOD_CALL_EXPRESSION[REFERENCE_EXPRESSION[f] EXPRESSION_LIST[( LAMBDA_EXPRESSION[\
         PARAMETER_LIST[( PARAMETER[MODIFIER_LIST[] TYPE[int] a] , PARAMETER[MODIFIER_LIST[] b] )] \
         -> REFERENCE_EXPRESSION[a]] )]]"
    );
}

#[test]
fn cast_of_lambda() {
    assert_eq!(
        expr("(Runnable) () -> {}"),
        "TYPE_CAST_EXPRESSION[( TYPE[JAVA_CODE_REFERENCE[Runnable REFERENCE_PARAMETER_LIST[]]] ) \
         LAMBDA_EXPRESSION[PARAMETER_LIST[( )] -> CODE_BLOCK~{}]]"
    );
}

#[test]
fn method_references_and_class_literals() {
    assert_eq!(
        expr("String::valueOf"),
        "METHOD_REF_EXPRESSION[REFERENCE_EXPRESSION[String] :: valueOf]"
    );
    assert_eq!(
        expr("int[]::new"),
        "METHOD_REF_EXPRESSION[TYPE[int [ ]] :: new]"
    );
    assert_eq!(
        expr("String[]::new"),
        "METHOD_REF_EXPRESSION[TYPE[JAVA_CODE_REFERENCE[String REFERENCE_PARAMETER_LIST[]] [ ]] \
         :: new]"
    );
    assert_eq!(
        expr("Foo.class"),
        "CLASS_OBJECT_ACCESS_EXPRESSION[REFERENCE_EXPRESSION[Foo] . class]"
    );
    assert_eq!(
        expr("int.class"),
        "CLASS_OBJECT_ACCESS_EXPRESSION[TYPE[int] . class]"
    );
}

#[test]
fn new_expressions() {
    assert_eq!(
        expr("new int[3][]"),
        "NEW_EXPRESSION[new int [ LITERAL_EXPRESSION[3] ] [ ]]"
    );
    assert_eq!(
        expr("new String[] {\"a\"}"),
        "NEW_EXPRESSION[new JAVA_CODE_REFERENCE[String REFERENCE_PARAMETER_LIST[]] [ ] \
         ARRAY_INITIALIZER_EXPRESSION[{ LITERAL_EXPRESSION[\"a\"] }]]"
    );
    assert_eq!(
        expr("new ArrayList<>()"),
        "NEW_EXPRESSION[new JAVA_CODE_REFERENCE[ArrayList REFERENCE_PARAMETER_LIST[< >]] \
         EXPRESSION_LIST[( )]]"
    );
    assert_eq!(
        expr("outer.new Inner()"),
        "NEW_EXPRESSION[REFERENCE_EXPRESSION[outer] . new JAVA_CODE_REFERENCE[Inner \
         REFERENCE_PARAMETER_LIST[]] EXPRESSION_LIST[( )]]"
    );
}

#[test]
fn anonymous_class_wraps_reference_and_arguments() {
    assert_eq!(
        expr("new Object() { void f() {} }"),
        "NEW_EXPRESSION[new ANONYMOUS_CLASS[JAVA_CODE_REFERENCE[Object REFERENCE_PARAMETER_LIST[]] \
         EXPRESSION_LIST[( )] { METHOD[MODIFIER_LIST[] TYPE_PARAMETER_LIST[] TYPE[void] f \
         PARAMETER_LIST[( )] THROWS_LIST[] CODE_BLOCK~{}] }]]"
    );
}

#[test]
fn text_blocks_are_flagged_before_jdk15() {
    let source = "{ s = \"\"\"\n  hi\n  \"\"\"; }";
    assert!(block(source).errors().is_empty());
    let old = block_at(source, LanguageLevel::Jdk11);
    assert_eq!(old.errors().len(), 1);
    assert!(old.errors()[0].message.starts_with("text blocks"));
}

#[test]
fn switch_expression_with_rules() {
    assert_eq!(
        expr("x = switch (k) { case 1 -> 10; default -> 0; }"),
        "ASSIGNMENT_EXPRESSION[REFERENCE_EXPRESSION[x] = SWITCH_EXPRESSION[switch ( \
         REFERENCE_EXPRESSION[k] ) CODE_BLOCK[{ SWITCH_LABELED_RULE[case LITERAL_EXPRESSION[1] -> \
         EXPRESSION_STATEMENT[LITERAL_EXPRESSION[10] ;]] SWITCH_LABELED_RULE[default -> \
         EXPRESSION_STATEMENT[LITERAL_EXPRESSION[0] ;]] }]]]"
    );
}

#[test]
fn missing_operand_is_an_error_node() {
    let parse = block("{ a = ; }");
    assert_eq!(parse.errors().len(), 1);
    assert!(sexp(parse.green()).contains("ERROR_ELEMENT(expression expected)[]"));
}
