//! Logos-based lexer for the C# subset
//!
//! Fast tokenization using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\u{FEFF}]+")]
    Whitespace,

    #[regex(r"///[^\n]*")]
    DocComment,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"#[a-z]+[^\n]*")]
    Preprocessor,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+([uU]|[lL]|[uU][lL])?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9]+[fFdDmM]")]
    Real,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    String,

    #[regex(r"'(\\.|[^'\\\n])*'")]
    Char,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("=>")]
    FatArrow,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("??")]
    QuestionQuestion,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("?")]
    Question,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("using")]
    UsingKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("class")]
    ClassKw,
    #[token("struct")]
    StructKw,
    #[token("interface")]
    InterfaceKw,
    #[token("enum")]
    EnumKw,
    #[token("delegate")]
    DelegateKw,
    #[token("public")]
    PublicKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("internal")]
    InternalKw,
    #[token("static")]
    StaticKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("const")]
    ConstKw,
    #[token("sealed")]
    SealedKw,
    #[token("abstract")]
    AbstractKw,
    #[token("virtual")]
    VirtualKw,
    #[token("override")]
    OverrideKw,
    #[token("partial")]
    PartialKw,
    #[token("extern")]
    ExternKw,
    #[token("new")]
    NewKw,
    #[token("return")]
    ReturnKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("this")]
    ThisKw,
    #[token("base")]
    BaseKw,
    #[token("null")]
    NullKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("typeof")]
    TypeofKw,
    #[token("default")]
    DefaultKw,
    #[token("is")]
    IsKw,
    #[token("as")]
    AsKw,
    #[token("throw")]
    ThrowKw,

    #[token("bool")]
    #[token("byte")]
    #[token("char")]
    #[token("decimal")]
    #[token("double")]
    #[token("float")]
    #[token("int")]
    #[token("long")]
    #[token("object")]
    #[token("short")]
    #[token("string")]
    #[token("uint")]
    #[token("ulong")]
    #[token("void")]
    PredefinedType,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::DocComment => SyntaxKind::DOC_COMMENT,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Preprocessor => SyntaxKind::PREPROCESSOR,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INT_NUMBER,
            LogosToken::Real => SyntaxKind::REAL_NUMBER,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::Char => SyntaxKind::CHAR,
            LogosToken::FatArrow => SyntaxKind::FAT_ARROW,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            LogosToken::PlusEq => SyntaxKind::PLUS_EQ,
            LogosToken::MinusEq => SyntaxKind::MINUS_EQ,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::UsingKw => SyntaxKind::USING_KW,
            LogosToken::NamespaceKw => SyntaxKind::NAMESPACE_KW,
            LogosToken::ClassKw => SyntaxKind::CLASS_KW,
            LogosToken::StructKw => SyntaxKind::STRUCT_KW,
            LogosToken::InterfaceKw => SyntaxKind::INTERFACE_KW,
            LogosToken::EnumKw => SyntaxKind::ENUM_KW,
            LogosToken::DelegateKw => SyntaxKind::DELEGATE_KW,
            LogosToken::PublicKw => SyntaxKind::PUBLIC_KW,
            LogosToken::PrivateKw => SyntaxKind::PRIVATE_KW,
            LogosToken::ProtectedKw => SyntaxKind::PROTECTED_KW,
            LogosToken::InternalKw => SyntaxKind::INTERNAL_KW,
            LogosToken::StaticKw => SyntaxKind::STATIC_KW,
            LogosToken::ReadonlyKw => SyntaxKind::READONLY_KW,
            LogosToken::ConstKw => SyntaxKind::CONST_KW,
            LogosToken::SealedKw => SyntaxKind::SEALED_KW,
            LogosToken::AbstractKw => SyntaxKind::ABSTRACT_KW,
            LogosToken::VirtualKw => SyntaxKind::VIRTUAL_KW,
            LogosToken::OverrideKw => SyntaxKind::OVERRIDE_KW,
            LogosToken::PartialKw => SyntaxKind::PARTIAL_KW,
            LogosToken::ExternKw => SyntaxKind::EXTERN_KW,
            LogosToken::NewKw => SyntaxKind::NEW_KW,
            LogosToken::ReturnKw => SyntaxKind::RETURN_KW,
            LogosToken::IfKw => SyntaxKind::IF_KW,
            LogosToken::ElseKw => SyntaxKind::ELSE_KW,
            LogosToken::ThisKw => SyntaxKind::THIS_KW,
            LogosToken::BaseKw => SyntaxKind::BASE_KW,
            LogosToken::NullKw => SyntaxKind::NULL_KW,
            LogosToken::TrueKw => SyntaxKind::TRUE_KW,
            LogosToken::FalseKw => SyntaxKind::FALSE_KW,
            LogosToken::TypeofKw => SyntaxKind::TYPEOF_KW,
            LogosToken::DefaultKw => SyntaxKind::DEFAULT_KW,
            LogosToken::IsKw => SyntaxKind::IS_KW,
            LogosToken::AsKw => SyntaxKind::AS_KW,
            LogosToken::ThrowKw => SyntaxKind::THROW_KW,
            LogosToken::PredefinedType => SyntaxKind::PREDEFINED_TYPE,
        }
    }
}
