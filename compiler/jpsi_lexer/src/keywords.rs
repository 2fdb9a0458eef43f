//! Keyword tables.

use jpsi_ir::ElementType;

/// Kind of a reserved word, literal keyword included (`true`, `null`, ...).
pub fn reserved_keyword(word: &str) -> Option<ElementType> {
    use ElementType as T;
    let kind = match word {
        "abstract" => T::AbstractKeyword,
        "assert" => T::AssertKeyword,
        "boolean" => T::BooleanKeyword,
        "break" => T::BreakKeyword,
        "byte" => T::ByteKeyword,
        "case" => T::CaseKeyword,
        "catch" => T::CatchKeyword,
        "char" => T::CharKeyword,
        "class" => T::ClassKeyword,
        "const" => T::ConstKeyword,
        "continue" => T::ContinueKeyword,
        "default" => T::DefaultKeyword,
        "do" => T::DoKeyword,
        "double" => T::DoubleKeyword,
        "else" => T::ElseKeyword,
        "enum" => T::EnumKeyword,
        "extends" => T::ExtendsKeyword,
        "false" => T::FalseKeyword,
        "final" => T::FinalKeyword,
        "finally" => T::FinallyKeyword,
        "float" => T::FloatKeyword,
        "for" => T::ForKeyword,
        "goto" => T::GotoKeyword,
        "if" => T::IfKeyword,
        "implements" => T::ImplementsKeyword,
        "import" => T::ImportKeyword,
        "instanceof" => T::InstanceofKeyword,
        "int" => T::IntKeyword,
        "interface" => T::InterfaceKeyword,
        "long" => T::LongKeyword,
        "native" => T::NativeKeyword,
        "new" => T::NewKeyword,
        "null" => T::NullKeyword,
        "package" => T::PackageKeyword,
        "private" => T::PrivateKeyword,
        "protected" => T::ProtectedKeyword,
        "public" => T::PublicKeyword,
        "return" => T::ReturnKeyword,
        "short" => T::ShortKeyword,
        "static" => T::StaticKeyword,
        "strictfp" => T::StrictfpKeyword,
        "super" => T::SuperKeyword,
        "switch" => T::SwitchKeyword,
        "synchronized" => T::SynchronizedKeyword,
        "this" => T::ThisKeyword,
        "throw" => T::ThrowKeyword,
        "throws" => T::ThrowsKeyword,
        "transient" => T::TransientKeyword,
        "true" => T::TrueKeyword,
        "try" => T::TryKeyword,
        "void" => T::VoidKeyword,
        "volatile" => T::VolatileKeyword,
        "while" => T::WhileKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Kind an identifier takes where it acts as a contextual keyword.
///
/// `non-sealed` is three lexer tokens and is handled by the parser.
pub fn contextual_keyword(word: &str) -> Option<ElementType> {
    match word {
        "record" => Some(ElementType::RecordKeyword),
        "var" => Some(ElementType::VarKeyword),
        "yield" => Some(ElementType::YieldKeyword),
        "sealed" => Some(ElementType::SealedKeyword),
        "permits" => Some(ElementType::PermitsKeyword),
        _ => None,
    }
}
