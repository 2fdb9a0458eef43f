//! Token sets for lookahead decisions and error recovery.
//!
//! Uses a bitset keyed by the element-type tag for O(1) membership. The
//! registry has more than 128 kinds, so two `u128` words back the set.

use jpsi_ir::ElementType;

/// A set of element types with constant-time membership.
///
/// ```ignore
/// const STMT_START: TokenSet = TokenSet::new()
///     .with(ElementType::IfKeyword)
///     .with(ElementType::WhileKeyword);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet([u128; 2]);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self([0, 0])
    }

    /// Add a kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: ElementType) -> Self {
        let tag = kind.tag() as usize;
        let mut words = self.0;
        words[tag / 128] |= 1u128 << (tag % 128);
        Self(words)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self([self.0[0] | other.0[0], self.0[1] | other.0[1]])
    }

    #[inline]
    pub const fn contains(self, kind: ElementType) -> bool {
        let tag = kind.tag() as usize;
        self.0[tag / 128] & (1u128 << (tag % 128)) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0[0] == 0 && self.0[1] == 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

use ElementType as T;

/// Reserved modifier keywords (contextual ones are recognized by text).
pub const MODIFIERS: TokenSet = TokenSet::new()
    .with(T::PublicKeyword)
    .with(T::ProtectedKeyword)
    .with(T::PrivateKeyword)
    .with(T::StaticKeyword)
    .with(T::AbstractKeyword)
    .with(T::FinalKeyword)
    .with(T::NativeKeyword)
    .with(T::SynchronizedKeyword)
    .with(T::StrictfpKeyword)
    .with(T::TransientKeyword)
    .with(T::VolatileKeyword)
    .with(T::DefaultKeyword);

pub const PRIMITIVES: TokenSet = TokenSet::new()
    .with(T::BooleanKeyword)
    .with(T::ByteKeyword)
    .with(T::CharKeyword)
    .with(T::ShortKeyword)
    .with(T::IntKeyword)
    .with(T::LongKeyword)
    .with(T::FloatKeyword)
    .with(T::DoubleKeyword)
    .with(T::VoidKeyword);

pub const LITERALS: TokenSet = TokenSet::new()
    .with(T::IntegerLiteral)
    .with(T::LongLiteral)
    .with(T::FloatLiteral)
    .with(T::DoubleLiteral)
    .with(T::CharacterLiteral)
    .with(T::StringLiteral)
    .with(T::TextBlockLiteral)
    .with(T::TrueKeyword)
    .with(T::FalseKeyword)
    .with(T::NullKeyword);

/// Tokens that can begin an expression.
pub const EXPR_START: TokenSet = LITERALS
    .union(PRIMITIVES)
    .with(T::Identifier)
    .with(T::ThisKeyword)
    .with(T::SuperKeyword)
    .with(T::NewKeyword)
    .with(T::SwitchKeyword)
    .with(T::LParenth)
    .with(T::Plus)
    .with(T::Minus)
    .with(T::PlusPlus)
    .with(T::MinusMinus)
    .with(T::Excl)
    .with(T::Tilde);

/// Tokens after which a parenthesized reference type is a cast operand.
pub const CAST_OPERAND_START: TokenSet = LITERALS
    .with(T::Identifier)
    .with(T::ThisKeyword)
    .with(T::SuperKeyword)
    .with(T::NewKeyword)
    .with(T::SwitchKeyword)
    .with(T::LParenth)
    .with(T::Excl)
    .with(T::Tilde);

/// Tokens that may appear between `<` and `>` of a type argument list.
pub const TYPE_ARGUMENT_TOKENS: TokenSet = PRIMITIVES
    .with(T::Identifier)
    .with(T::Dot)
    .with(T::Comma)
    .with(T::Quest)
    .with(T::ExtendsKeyword)
    .with(T::SuperKeyword)
    .with(T::LBracket)
    .with(T::RBracket)
    .with(T::And)
    .with(T::At);

/// Tokens that end a statement-level error run.
pub const STMT_RECOVERY: TokenSet = TokenSet::new()
    .with(T::Semicolon)
    .with(T::RBrace)
    .with(T::LBrace);

/// Tokens that end a member-level error run.
pub const MEMBER_RECOVERY: TokenSet = MODIFIERS
    .with(T::Semicolon)
    .with(T::RBrace)
    .with(T::At)
    .with(T::ClassKeyword)
    .with(T::InterfaceKeyword)
    .with(T::EnumKeyword);

/// Tokens that end a top-level error run.
pub const DECL_RECOVERY: TokenSet = MODIFIERS
    .with(T::At)
    .with(T::ClassKeyword)
    .with(T::InterfaceKeyword)
    .with(T::EnumKeyword);

/// Tokens that never start an expression and must not be swallowed by one.
pub const EXPR_FOLLOW: TokenSet = TokenSet::new()
    .with(T::RParenth)
    .with(T::RBracket)
    .with(T::RBrace)
    .with(T::Semicolon)
    .with(T::Comma)
    .with(T::Colon);
