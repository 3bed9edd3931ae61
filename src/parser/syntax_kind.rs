//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It covers the declaration-level subset of C# that dependency property
//! code is written in.

/// All syntax kinds (tokens and nodes) of the C# subset
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    DOC_COMMENT,        // /// <summary>...</summary>
    BLOCK_COMMENT,
    PREPROCESSOR,       // #region, #nullable ...

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier (also contextual keywords: get, set, var, nameof)
    INT_NUMBER,         // 42
    REAL_NUMBER,        // 1.0, 2d, 3.5f
    STRING,             // "hello", @"verbatim"
    CHAR,               // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    SEMICOLON,          // ;
    COLON,              // :
    COMMA,              // ,
    DOT,                // .
    EQ,                 // =
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    FAT_ARROW,          // =>
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    PERCENT,            // %
    BANG,               // !
    TILDE,              // ~
    AMP,                // &
    AMP_AMP,            // &&
    PIPE,               // |
    PIPE_PIPE,          // ||
    CARET,              // ^
    QUESTION,           // ?
    QUESTION_QUESTION,  // ??
    PLUS_EQ,            // +=
    MINUS_EQ,           // -=
    PLUS_PLUS,          // ++
    MINUS_MINUS,        // --

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ENUM_KW,
    DELEGATE_KW,

    // Modifiers
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    STATIC_KW,
    READONLY_KW,
    CONST_KW,
    SEALED_KW,
    ABSTRACT_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    PARTIAL_KW,
    EXTERN_KW,

    // Statements and expressions
    NEW_KW,
    RETURN_KW,
    IF_KW,
    ELSE_KW,
    THIS_KW,
    BASE_KW,
    NULL_KW,
    TRUE_KW,
    FALSE_KW,
    TYPEOF_KW,
    DEFAULT_KW,
    IS_KW,
    AS_KW,
    THROW_KW,

    /// `int`, `double`, `string`, `object`, `bool`, `void`, ...
    PREDEFINED_TYPE,

    // =========================================================================
    // NODES - Declarations
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    ENUM_MEMBER,
    DELEGATE_DECL,
    BASE_LIST,
    MEMBER_LIST,
    FIELD_DECL,
    VARIABLE_DECLARATOR,
    EQUALS_VALUE,
    PROPERTY_DECL,
    ACCESSOR_LIST,
    ACCESSOR_DECL,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    PARAM_LIST,
    PARAM,
    ARROW_BODY,
    ATTRIBUTE_LIST,
    ATTRIBUTE,
    NAME,               // declared name (wraps the IDENT)
    TYPE,               // a type reference (tokens only)
    QUALIFIED_NAME,     // namespace or using target

    // =========================================================================
    // NODES - Statements
    // =========================================================================
    BLOCK,
    RETURN_STMT,
    EXPR_STMT,
    LOCAL_DECL_STMT,
    IF_STMT,
    ELSE_CLAUSE,
    THROW_STMT,
    EMPTY_STMT,
    /// Loops, `switch`, `try` and other statements kept opaque
    OTHER_STMT,

    // =========================================================================
    // NODES - Expressions
    // =========================================================================
    LITERAL,
    NAME_REF,
    THIS_EXPR,
    BASE_EXPR,
    MEMBER_ACCESS,
    INVOCATION,
    ARG_LIST,
    ARGUMENT,
    OBJECT_CREATION,
    CAST_EXPR,
    PAREN_EXPR,
    LAMBDA_EXPR,
    TYPEOF_EXPR,
    DEFAULT_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    BINARY_EXPR,
    ASSIGN_EXPR,
    CONDITIONAL_EXPR,
    IS_EXPR,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE
                | Self::LINE_COMMENT
                | Self::DOC_COMMENT
                | Self::BLOCK_COMMENT
                | Self::PREPROCESSOR
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::USING_KW as u16) && (self as u16) <= (Self::PREDEFINED_TYPE as u16)
    }

    /// Check if this is a declaration modifier
    pub fn is_modifier(self) -> bool {
        ((self as u16) >= (Self::PUBLIC_KW as u16) && (self as u16) <= (Self::EXTERN_KW as u16))
            || self == Self::NEW_KW
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER
                | Self::REAL_NUMBER
                | Self::STRING
                | Self::CHAR
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl rowan::Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<CSharpLanguage>;
