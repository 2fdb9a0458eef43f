//! The closed registry of syntactic element kinds.
//!
//! One enum tags tokens, composite tree nodes and stubs alike. Variants are
//! laid out in contiguous groups so category checks are range compares:
//!
//! | Group              | First                | Last                  |
//! |--------------------|----------------------|-----------------------|
//! | Trivia             | `WhiteSpace`         | `DocComment`          |
//! | Literals           | `IntegerLiteral`     | `NullKeyword`         |
//! | Reserved keywords  | `AbstractKeyword`    | `WhileKeyword`        |
//! | Contextual keywords| `RecordKeyword`      | `PermitsKeyword`      |
//! | Punctuation        | `LParenth`           | `GtGtGtEq`            |
//! | Composite nodes    | `File`               | `ErrorElement`        |
//!
//! Discriminants are consecutive from zero, so the `u8` tag doubles as an
//! index into [`ElementType::ALL`]. Stub serialization relies on this.

macro_rules! define_element_types {
    ($( $(#[$meta:meta])* $variant:ident => $debug:literal, )*) => {
        /// Kind tag of a token, tree node or stub.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum ElementType {
            $( $(#[$meta])* $variant, )*
        }

        impl ElementType {
            /// Every element type, indexed by its tag.
            pub const ALL: &'static [ElementType] = &[ $( ElementType::$variant, )* ];

            /// Upper-case name used in tree dumps (`CLASS`, `CODE_BLOCK`, ...).
            pub const fn debug_name(self) -> &'static str {
                match self {
                    $( ElementType::$variant => $debug, )*
                }
            }
        }
    };
}

define_element_types! {
    // === Trivia ===
    WhiteSpace => "WHITE_SPACE",
    EndOfLineComment => "END_OF_LINE_COMMENT",
    CStyleComment => "C_STYLE_COMMENT",
    DocComment => "DOC_COMMENT",

    BadCharacter => "BAD_CHARACTER",
    Identifier => "IDENTIFIER",

    // === Literals ===
    IntegerLiteral => "INTEGER_LITERAL",
    LongLiteral => "LONG_LITERAL",
    FloatLiteral => "FLOAT_LITERAL",
    DoubleLiteral => "DOUBLE_LITERAL",
    CharacterLiteral => "CHARACTER_LITERAL",
    StringLiteral => "STRING_LITERAL",
    TextBlockLiteral => "TEXT_BLOCK_LITERAL",
    TrueKeyword => "TRUE_KEYWORD",
    FalseKeyword => "FALSE_KEYWORD",
    NullKeyword => "NULL_KEYWORD",

    // === Reserved keywords ===
    AbstractKeyword => "ABSTRACT_KEYWORD",
    AssertKeyword => "ASSERT_KEYWORD",
    BooleanKeyword => "BOOLEAN_KEYWORD",
    BreakKeyword => "BREAK_KEYWORD",
    ByteKeyword => "BYTE_KEYWORD",
    CaseKeyword => "CASE_KEYWORD",
    CatchKeyword => "CATCH_KEYWORD",
    CharKeyword => "CHAR_KEYWORD",
    ClassKeyword => "CLASS_KEYWORD",
    ConstKeyword => "CONST_KEYWORD",
    ContinueKeyword => "CONTINUE_KEYWORD",
    DefaultKeyword => "DEFAULT_KEYWORD",
    DoKeyword => "DO_KEYWORD",
    DoubleKeyword => "DOUBLE_KEYWORD",
    ElseKeyword => "ELSE_KEYWORD",
    EnumKeyword => "ENUM_KEYWORD",
    ExtendsKeyword => "EXTENDS_KEYWORD",
    FinalKeyword => "FINAL_KEYWORD",
    FinallyKeyword => "FINALLY_KEYWORD",
    FloatKeyword => "FLOAT_KEYWORD",
    ForKeyword => "FOR_KEYWORD",
    GotoKeyword => "GOTO_KEYWORD",
    IfKeyword => "IF_KEYWORD",
    ImplementsKeyword => "IMPLEMENTS_KEYWORD",
    ImportKeyword => "IMPORT_KEYWORD",
    InstanceofKeyword => "INSTANCEOF_KEYWORD",
    IntKeyword => "INT_KEYWORD",
    InterfaceKeyword => "INTERFACE_KEYWORD",
    LongKeyword => "LONG_KEYWORD",
    NativeKeyword => "NATIVE_KEYWORD",
    NewKeyword => "NEW_KEYWORD",
    PackageKeyword => "PACKAGE_KEYWORD",
    PrivateKeyword => "PRIVATE_KEYWORD",
    ProtectedKeyword => "PROTECTED_KEYWORD",
    PublicKeyword => "PUBLIC_KEYWORD",
    ReturnKeyword => "RETURN_KEYWORD",
    ShortKeyword => "SHORT_KEYWORD",
    StaticKeyword => "STATIC_KEYWORD",
    StrictfpKeyword => "STRICTFP_KEYWORD",
    SuperKeyword => "SUPER_KEYWORD",
    SwitchKeyword => "SWITCH_KEYWORD",
    SynchronizedKeyword => "SYNCHRONIZED_KEYWORD",
    ThisKeyword => "THIS_KEYWORD",
    ThrowKeyword => "THROW_KEYWORD",
    ThrowsKeyword => "THROWS_KEYWORD",
    TransientKeyword => "TRANSIENT_KEYWORD",
    TryKeyword => "TRY_KEYWORD",
    VoidKeyword => "VOID_KEYWORD",
    VolatileKeyword => "VOLATILE_KEYWORD",
    WhileKeyword => "WHILE_KEYWORD",

    // === Contextual keywords ===
    // The lexer never produces these; the parser remaps identifiers.
    RecordKeyword => "RECORD_KEYWORD",
    VarKeyword => "VAR_KEYWORD",
    YieldKeyword => "YIELD_KEYWORD",
    SealedKeyword => "SEALED_KEYWORD",
    NonSealedKeyword => "NON_SEALED_KEYWORD",
    PermitsKeyword => "PERMITS_KEYWORD",

    // === Punctuation and operators ===
    LParenth => "LPARENTH",
    RParenth => "RPARENTH",
    LBrace => "LBRACE",
    RBrace => "RBRACE",
    LBracket => "LBRACKET",
    RBracket => "RBRACKET",
    Semicolon => "SEMICOLON",
    Comma => "COMMA",
    Dot => "DOT",
    Ellipsis => "ELLIPSIS",
    At => "AT",
    DoubleColon => "DOUBLE_COLON",
    Eq => "EQ",
    Gt => "GT",
    Lt => "LT",
    Excl => "EXCL",
    Tilde => "TILDE",
    Quest => "QUEST",
    Colon => "COLON",
    Arrow => "ARROW",
    EqEq => "EQEQ",
    Le => "LE",
    Ne => "NE",
    AndAnd => "ANDAND",
    OrOr => "OROR",
    PlusPlus => "PLUSPLUS",
    MinusMinus => "MINUSMINUS",
    Plus => "PLUS",
    Minus => "MINUS",
    Asterisk => "ASTERISK",
    Div => "DIV",
    And => "AND",
    Or => "OR",
    Xor => "XOR",
    Perc => "PERC",
    LtLt => "LTLT",
    PlusEq => "PLUSEQ",
    MinusEq => "MINUSEQ",
    AsteriskEq => "ASTERISKEQ",
    DivEq => "DIVEQ",
    AndEq => "ANDEQ",
    OrEq => "OREQ",
    XorEq => "XOREQ",
    PercEq => "PERCEQ",
    LtLtEq => "LTLTEQ",
    // Fused by the parser from adjacent `>` (and `=`) tokens.
    Ge => "GE",
    GtGt => "GTGT",
    GtGtGt => "GTGTGT",
    GtGtEq => "GTGTEQ",
    GtGtGtEq => "GTGTGTEQ",

    // === Composite nodes: file structure ===
    File => "JAVA_FILE",
    PackageStatement => "PACKAGE_STATEMENT",
    ImportList => "IMPORT_LIST",
    ImportStatement => "IMPORT_STATEMENT",
    ImportStaticStatement => "IMPORT_STATIC_STATEMENT",

    // === Composite nodes: declarations ===
    Class => "CLASS",
    AnonymousClass => "ANONYMOUS_CLASS",
    EnumConstant => "ENUM_CONSTANT",
    EnumConstantInitializer => "ENUM_CONSTANT_INITIALIZER",
    ClassInitializer => "CLASS_INITIALIZER",
    Method => "METHOD",
    AnnotationMethod => "ANNOTATION_METHOD",
    Field => "FIELD",
    LocalVariable => "LOCAL_VARIABLE",
    Parameter => "PARAMETER",
    ReceiverParameter => "RECEIVER_PARAMETER",
    ParameterList => "PARAMETER_LIST",
    RecordHeader => "RECORD_HEADER",
    RecordComponent => "RECORD_COMPONENT",
    ModifierList => "MODIFIER_LIST",
    Annotation => "ANNOTATION",
    AnnotationParameterList => "ANNOTATION_PARAMETER_LIST",
    NameValuePair => "NAME_VALUE_PAIR",
    AnnotationArrayInitializer => "ANNOTATION_ARRAY_INITIALIZER",
    TypeElement => "TYPE",
    JavaCodeReference => "JAVA_CODE_REFERENCE",
    ReferenceParameterList => "REFERENCE_PARAMETER_LIST",
    TypeParameterList => "TYPE_PARAMETER_LIST",
    TypeParameter => "TYPE_PARAMETER",
    ExtendsBoundList => "EXTENDS_BOUND_LIST",
    ExtendsList => "EXTENDS_LIST",
    ImplementsList => "IMPLEMENTS_LIST",
    ThrowsList => "THROWS_LIST",
    PermitsList => "PERMITS_LIST",
    CodeBlock => "CODE_BLOCK",

    // === Composite nodes: statements ===
    DeclarationStatement => "DECLARATION_STATEMENT",
    ExpressionStatement => "EXPRESSION_STATEMENT",
    EmptyStatement => "EMPTY_STATEMENT",
    BlockStatement => "BLOCK_STATEMENT",
    IfStatement => "IF_STATEMENT",
    WhileStatement => "WHILE_STATEMENT",
    DoWhileStatement => "DO_WHILE_STATEMENT",
    ForStatement => "FOR_STATEMENT",
    ForeachStatement => "FOREACH_STATEMENT",
    ReturnStatement => "RETURN_STATEMENT",
    ThrowStatement => "THROW_STATEMENT",
    BreakStatement => "BREAK_STATEMENT",
    ContinueStatement => "CONTINUE_STATEMENT",
    YieldStatement => "YIELD_STATEMENT",
    SwitchStatement => "SWITCH_STATEMENT",
    SwitchLabelStatement => "SWITCH_LABEL_STATEMENT",
    SwitchLabeledRule => "SWITCH_LABELED_RULE",
    SynchronizedStatement => "SYNCHRONIZED_STATEMENT",
    TryStatement => "TRY_STATEMENT",
    ResourceList => "RESOURCE_LIST",
    ResourceVariable => "RESOURCE_VARIABLE",
    CatchSection => "CATCH_SECTION",
    LabeledStatement => "LABELED_STATEMENT",
    AssertStatement => "ASSERT_STATEMENT",

    // === Composite nodes: expressions ===
    ReferenceExpression => "REFERENCE_EXPRESSION",
    LiteralExpression => "LITERAL_EXPRESSION",
    MethodCallExpression => "METHOD_CALL_EXPRESSION",
    ExpressionList => "EXPRESSION_LIST",
    NewExpression => "NEW_EXPRESSION",
    ArrayInitializerExpression => "ARRAY_INITIALIZER_EXPRESSION",
    ParenthesizedExpression => "PARENTH_EXPRESSION",
    BinaryExpression => "BINARY_EXPRESSION",
    PrefixExpression => "PREFIX_EXPRESSION",
    PostfixExpression => "POSTFIX_EXPRESSION",
    AssignmentExpression => "ASSIGNMENT_EXPRESSION",
    ConditionalExpression => "CONDITIONAL_EXPRESSION",
    InstanceofExpression => "INSTANCE_OF_EXPRESSION",
    TypeCastExpression => "TYPE_CAST_EXPRESSION",
    ArrayAccessExpression => "ARRAY_ACCESS_EXPRESSION",
    ThisExpression => "THIS_EXPRESSION",
    SuperExpression => "SUPER_EXPRESSION",
    ClassObjectAccessExpression => "CLASS_OBJECT_ACCESS_EXPRESSION",
    LambdaExpression => "LAMBDA_EXPRESSION",
    MethodRefExpression => "METHOD_REF_EXPRESSION",
    SwitchExpression => "SWITCH_EXPRESSION",

    ErrorElement => "ERROR_ELEMENT",
}

impl ElementType {
    /// Stable one-byte tag (used by stub serialization).
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`tag`](Self::tag).
    #[inline]
    pub fn from_tag(tag: u8) -> Option<ElementType> {
        Self::ALL.get(usize::from(tag)).copied()
    }

    #[inline]
    const fn in_range(self, first: ElementType, last: ElementType) -> bool {
        let t = self as u8;
        t >= first as u8 && t <= last as u8
    }

    /// Whitespace or any comment.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        self.in_range(ElementType::WhiteSpace, ElementType::DocComment)
    }

    /// Any comment, including doc comments.
    #[inline]
    pub const fn is_comment(self) -> bool {
        self.in_range(ElementType::EndOfLineComment, ElementType::DocComment)
    }

    /// Tokens produced by the lexer or fused by the parser.
    #[inline]
    pub const fn is_token(self) -> bool {
        (self as u8) < ElementType::File as u8
    }

    /// Composite tree nodes.
    #[inline]
    pub const fn is_composite(self) -> bool {
        !self.is_token()
    }

    /// Literal tokens, including `true`, `false` and `null`.
    #[inline]
    pub const fn is_literal(self) -> bool {
        self.in_range(ElementType::IntegerLiteral, ElementType::NullKeyword)
    }

    /// Reserved and contextual keywords.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        self.in_range(ElementType::TrueKeyword, ElementType::PermitsKeyword)
    }

    /// Keywords that only act as keywords in particular positions.
    #[inline]
    pub const fn is_contextual_keyword(self) -> bool {
        self.in_range(ElementType::RecordKeyword, ElementType::PermitsKeyword)
    }

    /// Keywords that may appear in a modifier list.
    #[inline]
    pub const fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            ElementType::PublicKeyword
                | ElementType::ProtectedKeyword
                | ElementType::PrivateKeyword
                | ElementType::StaticKeyword
                | ElementType::AbstractKeyword
                | ElementType::FinalKeyword
                | ElementType::NativeKeyword
                | ElementType::SynchronizedKeyword
                | ElementType::StrictfpKeyword
                | ElementType::TransientKeyword
                | ElementType::VolatileKeyword
                | ElementType::DefaultKeyword
                | ElementType::SealedKeyword
                | ElementType::NonSealedKeyword
        )
    }

    /// `boolean`, `byte`, `char`, `short`, `int`, `long`, `float`, `double`, `void`.
    #[inline]
    pub const fn is_primitive_type_keyword(self) -> bool {
        matches!(
            self,
            ElementType::BooleanKeyword
                | ElementType::ByteKeyword
                | ElementType::CharKeyword
                | ElementType::ShortKeyword
                | ElementType::IntKeyword
                | ElementType::LongKeyword
                | ElementType::FloatKeyword
                | ElementType::DoubleKeyword
                | ElementType::VoidKeyword
        )
    }

    /// Compound and simple assignment operators.
    #[inline]
    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            ElementType::Eq
                | ElementType::PlusEq
                | ElementType::MinusEq
                | ElementType::AsteriskEq
                | ElementType::DivEq
                | ElementType::AndEq
                | ElementType::OrEq
                | ElementType::XorEq
                | ElementType::PercEq
                | ElementType::LtLtEq
                | ElementType::GtGtEq
                | ElementType::GtGtGtEq
        )
    }

    /// Operator tokens the parser fuses from several lexer `>`/`=` tokens.
    #[inline]
    pub const fn is_fused_operator(self) -> bool {
        self.in_range(ElementType::Ge, ElementType::GtGtGtEq)
    }

    /// Statement nodes.
    #[inline]
    pub const fn is_statement(self) -> bool {
        self.in_range(
            ElementType::DeclarationStatement,
            ElementType::AssertStatement,
        ) && !matches!(
            self,
            ElementType::ResourceList | ElementType::ResourceVariable | ElementType::CatchSection
        )
    }

    /// Expression nodes.
    #[inline]
    pub const fn is_expression(self) -> bool {
        self.in_range(
            ElementType::ReferenceExpression,
            ElementType::SwitchExpression,
        ) && !matches!(self, ElementType::ExpressionList)
    }

    /// Declarations of a type (named or anonymous).
    #[inline]
    pub const fn is_class(self) -> bool {
        matches!(
            self,
            ElementType::Class | ElementType::AnonymousClass | ElementType::EnumConstantInitializer
        )
    }

    /// Import statements of either flavor.
    #[inline]
    pub const fn is_import_statement(self) -> bool {
        matches!(
            self,
            ElementType::ImportStatement | ElementType::ImportStaticStatement
        )
    }

    /// Node kinds that may be backed by a stub.
    ///
    /// Whether a particular node of one of these kinds actually gets a stub
    /// also depends on its parents (see the stub builder).
    #[inline]
    pub const fn is_stub_type(self) -> bool {
        matches!(
            self,
            ElementType::File
                | ElementType::ImportList
                | ElementType::ImportStatement
                | ElementType::ImportStaticStatement
                | ElementType::Class
                | ElementType::AnonymousClass
                | ElementType::EnumConstant
                | ElementType::EnumConstantInitializer
                | ElementType::ClassInitializer
                | ElementType::Method
                | ElementType::AnnotationMethod
                | ElementType::Field
                | ElementType::Parameter
                | ElementType::ParameterList
                | ElementType::RecordHeader
                | ElementType::RecordComponent
                | ElementType::ModifierList
                | ElementType::Annotation
                | ElementType::TypeParameterList
                | ElementType::TypeParameter
                | ElementType::ExtendsBoundList
                | ElementType::ExtendsList
                | ElementType::ImplementsList
                | ElementType::ThrowsList
                | ElementType::PermitsList
                | ElementType::LambdaExpression
                | ElementType::MethodRefExpression
        )
    }

    /// Node kinds whose content may stay unparsed until first access.
    #[inline]
    pub const fn is_lazy_parseable(self) -> bool {
        matches!(self, ElementType::CodeBlock)
    }

    /// Reference-list kinds (`extends`, `implements`, `throws`, `permits`, bounds).
    #[inline]
    pub const fn is_reference_list(self) -> bool {
        matches!(
            self,
            ElementType::ExtendsList
                | ElementType::ImplementsList
                | ElementType::ThrowsList
                | ElementType::PermitsList
                | ElementType::ExtendsBoundList
        )
    }
}

impl std::fmt::Debug for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.debug_name())
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.debug_name())
    }
}

mod size_asserts {
    use super::ElementType;
    crate::static_assert_size!(ElementType, 1);
}

#[cfg(test)]
mod tests;
