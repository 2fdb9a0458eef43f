use super::*;

#[test]
fn tags_round_trip() {
    for (index, kind) in ElementType::ALL.iter().enumerate() {
        assert_eq!(usize::from(kind.tag()), index);
        assert_eq!(ElementType::from_tag(kind.tag()), Some(*kind));
    }
}

#[test]
fn unknown_tag_is_none() {
    let past_end = u8::try_from(ElementType::ALL.len()).unwrap_or(u8::MAX);
    assert_eq!(ElementType::from_tag(past_end), None);
}

#[test]
fn debug_names_are_unique() {
    let mut names: Vec<_> = ElementType::ALL.iter().map(|k| k.debug_name()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(names.len(), before);
}

#[test]
fn groups_are_disjoint() {
    for kind in ElementType::ALL {
        assert_ne!(kind.is_token(), kind.is_composite(), "{kind}");
        if kind.is_trivia() {
            assert!(kind.is_token());
            assert!(!kind.is_keyword());
        }
        if kind.is_statement() {
            assert!(!kind.is_expression());
        }
        if kind.is_stub_type() || kind.is_lazy_parseable() {
            assert!(kind.is_composite(), "{kind}");
        }
    }
}

#[test]
fn category_samples() {
    assert!(ElementType::DocComment.is_comment());
    assert!(!ElementType::WhiteSpace.is_comment());
    assert!(ElementType::NullKeyword.is_literal());
    assert!(ElementType::NullKeyword.is_keyword());
    assert!(ElementType::RecordKeyword.is_contextual_keyword());
    assert!(ElementType::NonSealedKeyword.is_modifier_keyword());
    assert!(ElementType::VoidKeyword.is_primitive_type_keyword());
    assert!(ElementType::GtGtGtEq.is_assignment_operator());
    assert!(ElementType::GtGt.is_fused_operator());
    assert!(!ElementType::Gt.is_fused_operator());
    assert!(ElementType::AssertStatement.is_statement());
    assert!(!ElementType::CatchSection.is_statement());
    assert!(ElementType::SwitchExpression.is_expression());
    assert!(!ElementType::ExpressionList.is_expression());
    assert!(ElementType::CodeBlock.is_lazy_parseable());
    assert!(ElementType::LambdaExpression.is_stub_type());
}

#[test]
fn display_uses_debug_name() {
    assert_eq!(ElementType::Class.to_string(), "CLASS");
    assert_eq!(format!("{:?}", ElementType::File), "JAVA_FILE");
}
