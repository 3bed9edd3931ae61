//! Recursive descent parser for the C# subset
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Trivia handling: every node start flushes pending trivia into the parent
//! first, so documentation comments end up as preceding siblings of the
//! declaration they document.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize, Checkpoint};

/// Sentinel returned by lookahead past the last token.
const EOF: SyntaxKind = SyntaxKind::__LAST;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse C# source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Statement keywords that are lexed as identifiers and parsed opaquely.
const OPAQUE_STATEMENTS: &[&str] = &[
    "while", "for", "foreach", "switch", "lock", "do", "try", "fixed", "unchecked", "checked",
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (all lookahead skips trivia)
    // =========================================================================

    fn nth_token(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map(|t| t.kind).unwrap_or(EOF)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.nth_token(n).map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.nth(0) == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.nth(0))
    }

    fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.nth_text(0) == text
    }

    fn at_eof(&self) -> bool {
        self.nth_token(0).is_none()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .nth_token(0)
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_balanced();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    /// Bump one token, or a whole bracketed group if it opens one.
    fn bump_balanced(&mut self) {
        let (open, close) = match self.nth(0) {
            SyntaxKind::L_PAREN => (SyntaxKind::L_PAREN, SyntaxKind::R_PAREN),
            SyntaxKind::L_BRACE => (SyntaxKind::L_BRACE, SyntaxKind::R_BRACE),
            SyntaxKind::L_BRACKET => (SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET),
            _ => {
                self.bump();
                return;
            }
        };
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.nth(0);
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Lookahead scanners
    // =========================================================================

    /// If a type starts at lookahead index `i`, return the index after it.
    fn scan_type(&self, mut i: usize) -> Option<usize> {
        match self.nth(i) {
            SyntaxKind::IDENT | SyntaxKind::PREDEFINED_TYPE => i += 1,
            _ => return None,
        }
        while self.nth(i) == SyntaxKind::DOT && self.nth(i + 1) == SyntaxKind::IDENT {
            i += 2;
        }
        if self.nth(i) == SyntaxKind::LT {
            i = self.scan_type(i + 1)?;
            while self.nth(i) == SyntaxKind::COMMA {
                i = self.scan_type(i + 1)?;
            }
            if self.nth(i) != SyntaxKind::GT {
                return None;
            }
            i += 1;
        }
        if self.nth(i) == SyntaxKind::QUESTION {
            i += 1;
        }
        while self.nth(i) == SyntaxKind::L_BRACKET {
            i += 1;
            while self.nth(i) == SyntaxKind::COMMA {
                i += 1;
            }
            if self.nth(i) != SyntaxKind::R_BRACKET {
                return None;
            }
            i += 1;
        }
        Some(i)
    }

    /// Index of the token closing the group opened at lookahead index `i`.
    fn matching_close(&self, i: usize) -> Option<usize> {
        let open = self.nth(i);
        let close = match open {
            SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
            SyntaxKind::L_BRACE => SyntaxKind::R_BRACE,
            SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
            _ => return None,
        };
        let mut depth = 0usize;
        let mut j = i;
        loop {
            let kind = self.nth(j);
            if kind == EOF {
                return None;
            }
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            j += 1;
        }
    }

    fn at_paren_lambda(&self) -> bool {
        self.at(SyntaxKind::L_PAREN)
            && self
                .matching_close(0)
                .is_some_and(|close| self.nth(close + 1) == SyntaxKind::FAT_ARROW)
    }

    fn at_simple_lambda(&self) -> bool {
        self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::FAT_ARROW
    }

    fn at_cast(&self) -> bool {
        if !self.at(SyntaxKind::L_PAREN) {
            return false;
        }
        let Some(end) = self.scan_type(1) else {
            return false;
        };
        if self.nth(end) != SyntaxKind::R_PAREN {
            return false;
        }
        let next = self.nth(end + 1);
        let predefined = self.nth(1) == SyntaxKind::PREDEFINED_TYPE;
        match next {
            SyntaxKind::IDENT
            | SyntaxKind::PREDEFINED_TYPE
            | SyntaxKind::THIS_KW
            | SyntaxKind::BASE_KW
            | SyntaxKind::L_PAREN
            | SyntaxKind::NEW_KW
            | SyntaxKind::TYPEOF_KW
            | SyntaxKind::DEFAULT_KW
            | SyntaxKind::BANG
            | SyntaxKind::TILDE => true,
            SyntaxKind::MINUS | SyntaxKind::PLUS => predefined,
            kind => kind.is_literal(),
        }
    }

    fn at_local_declaration(&self) -> bool {
        if !self.at_any(&[SyntaxKind::IDENT, SyntaxKind::PREDEFINED_TYPE]) {
            return false;
        }
        match self.scan_type(0) {
            Some(end) => {
                self.nth(end) == SyntaxKind::IDENT
                    && matches!(
                        self.nth(end + 1),
                        SyntaxKind::EQ | SyntaxKind::SEMICOLON | SyntaxKind::COMMA
                    )
            }
            None => false,
        }
    }

    // =========================================================================
    // Grammar rules - declarations
    // =========================================================================

    /// SourceFile = (Using | Namespace | TypeDecl)*
    fn parse_source_file(&mut self) {
        // leading trivia belongs to the root
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());

        while !self.at_eof() {
            let pos_before = self.pos;
            self.parse_namespace_member();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.nth(0)));
                self.bump();
            }
        }

        self.skip_trivia();
        self.finish_node();
    }

    fn parse_namespace_member(&mut self) {
        match self.nth(0) {
            SyntaxKind::USING_KW => self.parse_using(),
            SyntaxKind::NAMESPACE_KW => self.parse_namespace(),
            // Global attributes: [assembly: ...]
            SyntaxKind::L_BRACKET if self.nth(2) == SyntaxKind::COLON => {
                self.parse_attribute_list()
            }
            _ => self.parse_member(),
        }
    }

    /// Using = 'using' 'static'? (Ident '=')? QualifiedName ';'
    fn parse_using(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);
        self.expect(SyntaxKind::USING_KW);
        self.eat(SyntaxKind::STATIC_KW);
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::EQ {
            self.parse_name();
            self.bump();
        }
        self.parse_qualified_name();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// QualifiedName = Ident ('.' Ident)*
    fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.expect(SyntaxKind::IDENT);
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            self.bump();
        }
        self.finish_node();
    }

    /// Namespace = 'namespace' QualifiedName (';' Member* | '{' Member* '}')
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECL);
        self.expect(SyntaxKind::NAMESPACE_KW);
        self.parse_qualified_name();

        if self.eat(SyntaxKind::SEMICOLON) {
            // File-scoped namespace: everything that follows belongs to it.
            self.parse_members_until(EOF);
        } else if self.expect(SyntaxKind::L_BRACE) {
            self.parse_members_until(SyntaxKind::R_BRACE);
            self.expect(SyntaxKind::R_BRACE);
        }

        self.finish_node();
    }

    fn parse_members_until(&mut self, end: SyntaxKind) {
        while !self.at_eof() && !self.at(end) {
            let pos_before = self.pos;
            self.parse_namespace_member();
            if self.pos == pos_before && !self.at_eof() && !self.at(end) {
                self.error(format!("stuck on token: {:?}", self.nth(0)));
                self.bump();
            }
        }
    }

    /// Name = Ident
    fn parse_name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// AttributeList = '[' (Ident ':')? Attribute (',' Attribute)* ']'
    fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_LIST);
        self.expect(SyntaxKind::L_BRACKET);
        if self.nth(1) == SyntaxKind::COLON {
            // attribute target, e.g. [assembly: ...]
            self.bump();
            self.bump();
        }
        loop {
            self.start_node(SyntaxKind::ATTRIBUTE);
            self.parse_type();
            if self.at(SyntaxKind::L_PAREN) {
                self.parse_arg_list();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACKET);
        self.finish_node();
    }

    fn parse_attributes_and_modifiers(&mut self) {
        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_attribute_list();
        }
        while self.nth(0).is_modifier() {
            self.bump();
        }
    }

    /// Member = Attributes Modifiers (TypeDecl | Constructor | Method | Property | Field)
    fn parse_member(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_attributes_and_modifiers();

        match self.nth(0) {
            SyntaxKind::CLASS_KW => self.parse_type_decl(checkpoint, SyntaxKind::CLASS_DECL),
            SyntaxKind::STRUCT_KW => self.parse_type_decl(checkpoint, SyntaxKind::STRUCT_DECL),
            SyntaxKind::INTERFACE_KW => {
                self.parse_type_decl(checkpoint, SyntaxKind::INTERFACE_DECL)
            }
            SyntaxKind::ENUM_KW => self.parse_enum(checkpoint),
            SyntaxKind::DELEGATE_KW => self.parse_delegate(checkpoint),
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::L_PAREN => {
                self.parse_constructor(checkpoint)
            }
            SyntaxKind::IDENT | SyntaxKind::PREDEFINED_TYPE => {
                self.parse_typed_member(checkpoint)
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::ERROR);
                self.error(format!("expected member declaration, found {:?}", self.nth(0)));
                if !self.at_any(&[SyntaxKind::R_BRACE]) && !self.at_eof() {
                    self.bump_balanced();
                }
                self.finish_node();
            }
        }
    }

    /// Skip a generic parameter list `<T, U>` into the current node.
    fn skip_type_parameters(&mut self) {
        if self.at(SyntaxKind::LT) {
            while !self.at_eof() && !self.at(SyntaxKind::GT) {
                self.bump();
            }
            self.expect(SyntaxKind::GT);
        }
    }

    /// Skip `where T : ...` clauses up to the body.
    fn skip_constraints(&mut self) {
        while self.at_contextual("where") {
            while !self.at_eof()
                && !self.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON, SyntaxKind::FAT_ARROW])
            {
                self.bump();
            }
        }
    }

    /// TypeDecl = ('class' | 'struct' | 'interface') Name TypeParams? BaseList? '{' Member* '}' ';'?
    fn parse_type_decl(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.start_node_at(checkpoint, kind);
        self.bump(); // class / struct / interface
        self.parse_name();
        self.skip_type_parameters();

        if self.at(SyntaxKind::COLON) {
            self.start_node(SyntaxKind::BASE_LIST);
            self.bump();
            self.parse_type();
            while self.eat(SyntaxKind::COMMA) {
                self.parse_type();
            }
            self.finish_node();
        }
        self.skip_constraints();

        self.start_node(SyntaxKind::MEMBER_LIST);
        if self.expect(SyntaxKind::L_BRACE) {
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                let pos_before = self.pos;
                self.parse_member();
                if self.pos == pos_before && !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                    self.error(format!("stuck on token: {:?}", self.nth(0)));
                    self.bump();
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Enum = 'enum' Name (':' Type)? '{' (EnumMember (',' EnumMember)* ','?)? '}'
    fn parse_enum(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::ENUM_DECL);
        self.expect(SyntaxKind::ENUM_KW);
        self.parse_name();
        if self.at(SyntaxKind::COLON) {
            self.start_node(SyntaxKind::BASE_LIST);
            self.bump();
            self.parse_type();
            self.finish_node();
        }
        self.start_node(SyntaxKind::MEMBER_LIST);
        if self.expect(SyntaxKind::L_BRACE) {
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                self.start_node(SyntaxKind::ENUM_MEMBER);
                while self.at(SyntaxKind::L_BRACKET) {
                    self.parse_attribute_list();
                }
                self.parse_name();
                if self.at(SyntaxKind::EQ) {
                    self.parse_equals_value();
                }
                self.finish_node();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Delegate = 'delegate' Type Name TypeParams? ParamList ';'
    fn parse_delegate(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::DELEGATE_DECL);
        self.expect(SyntaxKind::DELEGATE_KW);
        self.parse_type();
        self.parse_name();
        self.skip_type_parameters();
        self.parse_param_list();
        self.skip_constraints();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Constructor = Name ParamList (':' ('base' | 'this') ArgList)? Body
    fn parse_constructor(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::CONSTRUCTOR_DECL);
        self.parse_name();
        self.parse_param_list();
        if self.eat(SyntaxKind::COLON) {
            if !self.eat(SyntaxKind::BASE_KW) {
                self.expect(SyntaxKind::THIS_KW);
            }
            self.parse_arg_list();
        }
        self.parse_method_body();
        self.finish_node();
    }

    /// Member that starts with a type: method, property or field.
    fn parse_typed_member(&mut self, checkpoint: Checkpoint) {
        if self.at_contextual("event") {
            self.bump();
        }
        self.parse_type();

        // Explicit interface implementations: `IFoo.Bar`
        while self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::DOT {
            self.bump();
            self.bump();
        }

        if !self.at(SyntaxKind::IDENT) {
            self.start_node_at(checkpoint, SyntaxKind::ERROR);
            self.error(format!("expected member name, found {:?}", self.nth(0)));
            while !self.at_eof()
                && !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE])
            {
                self.bump_balanced();
            }
            self.eat(SyntaxKind::SEMICOLON);
            self.finish_node();
            return;
        }

        match self.nth(1) {
            SyntaxKind::L_PAREN | SyntaxKind::LT => {
                self.start_node_at(checkpoint, SyntaxKind::METHOD_DECL);
                self.parse_name();
                self.skip_type_parameters();
                self.parse_param_list();
                self.skip_constraints();
                self.parse_method_body();
                self.finish_node();
            }
            SyntaxKind::L_BRACE | SyntaxKind::FAT_ARROW => {
                self.start_node_at(checkpoint, SyntaxKind::PROPERTY_DECL);
                self.parse_name();
                self.parse_property_body();
                self.finish_node();
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::FIELD_DECL);
                self.parse_variable_declarator();
                while self.eat(SyntaxKind::COMMA) {
                    self.parse_variable_declarator();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
        }
    }

    /// VariableDeclarator = Name EqualsValue?
    fn parse_variable_declarator(&mut self) {
        self.start_node(SyntaxKind::VARIABLE_DECLARATOR);
        self.parse_name();
        if self.at(SyntaxKind::EQ) {
            self.parse_equals_value();
        }
        self.finish_node();
    }

    /// EqualsValue = '=' Expr
    fn parse_equals_value(&mut self) {
        self.start_node(SyntaxKind::EQUALS_VALUE);
        self.expect(SyntaxKind::EQ);
        self.parse_expr();
        self.finish_node();
    }

    /// PropertyBody = AccessorList EqualsValue? ';'? | ArrowBody ';'
    fn parse_property_body(&mut self) {
        if self.at(SyntaxKind::FAT_ARROW) {
            self.parse_arrow_body();
            self.expect(SyntaxKind::SEMICOLON);
            return;
        }

        self.start_node(SyntaxKind::ACCESSOR_LIST);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.parse_accessor();
            if self.pos == pos_before {
                self.error_recover("expected accessor", &[SyntaxKind::R_BRACE]);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();

        if self.at(SyntaxKind::EQ) {
            self.parse_equals_value();
            self.expect(SyntaxKind::SEMICOLON);
        }
    }

    /// Accessor = Attributes Modifiers ('get' | 'set' | 'init' | 'add' | 'remove') (';' | Block | ArrowBody ';')
    fn parse_accessor(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_attributes_and_modifiers();
        if !self.at(SyntaxKind::IDENT) {
            self.start_node_at(checkpoint, SyntaxKind::ERROR);
            self.error(format!("expected accessor, found {:?}", self.nth(0)));
            if !self.at(SyntaxKind::R_BRACE) {
                self.bump_balanced();
            }
            self.finish_node();
            return;
        }
        self.start_node_at(checkpoint, SyntaxKind::ACCESSOR_DECL);
        self.bump();
        self.parse_method_body();
        self.finish_node();
    }

    /// Body = Block | ArrowBody ';' | ';'
    fn parse_method_body(&mut self) {
        match self.nth(0) {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::FAT_ARROW => {
                self.parse_arrow_body();
                self.expect(SyntaxKind::SEMICOLON);
            }
            _ => {
                self.expect(SyntaxKind::SEMICOLON);
            }
        }
    }

    /// ArrowBody = '=>' Expr
    fn parse_arrow_body(&mut self) {
        self.start_node(SyntaxKind::ARROW_BODY);
        self.expect(SyntaxKind::FAT_ARROW);
        self.parse_expr();
        self.finish_node();
    }

    /// ParamList = '(' (Param (',' Param)*)? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.parse_param();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Param = Attributes ('this' | 'ref' | 'out' | 'in' | 'params')? Type Name ('=' Expr)?
    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::PARAM);
        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_attribute_list();
        }
        self.eat(SyntaxKind::THIS_KW);
        while ["ref", "out", "in", "params"].iter().any(|m| self.at_contextual(m))
            && self.nth(1) != SyntaxKind::COMMA
            && self.nth(1) != SyntaxKind::R_PAREN
        {
            self.bump();
        }
        self.parse_type();
        self.parse_name();
        if self.at(SyntaxKind::EQ) {
            self.parse_equals_value();
        }
        self.finish_node();
    }

    /// Type = (Ident | Predefined) ('.' Ident)* TypeArgs? '?'? ('[' ','* ']')*
    fn parse_type(&mut self) {
        self.start_node(SyntaxKind::TYPE);
        if !self.eat(SyntaxKind::PREDEFINED_TYPE) {
            self.expect(SyntaxKind::IDENT);
        }
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            self.bump();
        }
        if self.at(SyntaxKind::LT) {
            self.bump();
            self.parse_type();
            while self.eat(SyntaxKind::COMMA) {
                self.parse_type();
            }
            self.expect(SyntaxKind::GT);
        }
        self.eat(SyntaxKind::QUESTION);
        while self.at(SyntaxKind::L_BRACKET)
            && matches!(self.nth(1), SyntaxKind::R_BRACKET | SyntaxKind::COMMA)
        {
            self.bump();
            while self.eat(SyntaxKind::COMMA) {}
            self.expect(SyntaxKind::R_BRACKET);
        }
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules - statements
    // =========================================================================

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.parse_statement();
            if self.pos == pos_before {
                self.error_recover(
                    format!("unexpected token in block: {:?}", self.nth(0)),
                    &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
                );
                self.eat(SyntaxKind::SEMICOLON);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.nth(0) {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::SEMICOLON => {
                self.start_node(SyntaxKind::EMPTY_STMT);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::RETURN_KW => {
                self.start_node(SyntaxKind::RETURN_STMT);
                self.bump();
                if !self.at(SyntaxKind::SEMICOLON) {
                    self.parse_expr();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::THROW_KW => {
                self.start_node(SyntaxKind::THROW_STMT);
                self.bump();
                if !self.at(SyntaxKind::SEMICOLON) {
                    self.parse_expr();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::IF_KW => self.parse_if(),
            SyntaxKind::USING_KW if self.nth(1) == SyntaxKind::L_PAREN => {
                self.parse_opaque_statement()
            }
            SyntaxKind::IDENT
                if OPAQUE_STATEMENTS.contains(&self.nth_text(0))
                    && matches!(self.nth(1), SyntaxKind::L_PAREN | SyntaxKind::L_BRACE) =>
            {
                self.parse_opaque_statement()
            }
            SyntaxKind::CONST_KW => {
                self.start_node(SyntaxKind::LOCAL_DECL_STMT);
                self.bump();
                self.parse_local_declaration_rest();
                self.finish_node();
            }
            _ if self.at_local_declaration() => {
                self.start_node(SyntaxKind::LOCAL_DECL_STMT);
                self.parse_local_declaration_rest();
                self.finish_node();
            }
            _ => {
                self.start_node(SyntaxKind::EXPR_STMT);
                self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
        }
    }

    fn parse_local_declaration_rest(&mut self) {
        self.parse_type();
        self.parse_variable_declarator();
        while self.eat(SyntaxKind::COMMA) {
            self.parse_variable_declarator();
        }
        self.expect(SyntaxKind::SEMICOLON);
    }

    /// If = 'if' '(' Expr ')' Statement ('else' Statement)?
    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IF_STMT);
        self.expect(SyntaxKind::IF_KW);
        self.expect(SyntaxKind::L_PAREN);
        self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
        self.parse_statement();
        if self.at(SyntaxKind::ELSE_KW) {
            self.start_node(SyntaxKind::ELSE_CLAUSE);
            self.bump();
            self.parse_statement();
            self.finish_node();
        }
        self.finish_node();
    }

    /// Loops, `switch`, `try`, `lock`: keyword, header group and body kept opaque.
    fn parse_opaque_statement(&mut self) {
        self.start_node(SyntaxKind::OTHER_STMT);
        loop {
            let is_switch = self.at_contextual("switch");
            self.bump(); // keyword
            if self.at(SyntaxKind::L_PAREN) {
                self.bump_balanced();
            }
            if is_switch {
                // case labels are not statements; keep the section tokens as-is
                self.bump_balanced();
            } else if self.at(SyntaxKind::L_BRACE) {
                self.parse_block();
            } else {
                self.parse_statement();
            }
            let continues = ["catch", "finally", "while"]
                .iter()
                .any(|k| self.at_contextual(k));
            if !continues {
                break;
            }
        }
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules - expressions
    // =========================================================================

    fn parse_expr(&mut self) {
        self.parse_assignment();
    }

    /// Assignment = Conditional (('=' | '+=' | '-=') Assignment)?
    fn parse_assignment(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_conditional();
        if self.at_any(&[SyntaxKind::EQ, SyntaxKind::PLUS_EQ, SyntaxKind::MINUS_EQ]) {
            self.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
            self.bump();
            self.parse_assignment();
            self.finish_node();
        }
    }

    /// Conditional = Binary ('?' Expr ':' Expr)?
    fn parse_conditional(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(0);
        if self.at(SyntaxKind::QUESTION) {
            self.start_node_at(checkpoint, SyntaxKind::CONDITIONAL_EXPR);
            self.bump();
            self.parse_expr();
            self.expect(SyntaxKind::COLON);
            self.parse_expr();
            self.finish_node();
        }
    }

    fn binary_precedence(kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::QUESTION_QUESTION => 1,
            SyntaxKind::PIPE_PIPE => 2,
            SyntaxKind::AMP_AMP => 3,
            SyntaxKind::PIPE => 4,
            SyntaxKind::CARET => 5,
            SyntaxKind::AMP => 6,
            SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 7,
            SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::LT_EQ
            | SyntaxKind::GT_EQ
            | SyntaxKind::IS_KW
            | SyntaxKind::AS_KW => 8,
            SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
            SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
            _ => 0,
        }
    }

    /// Binary = Unary (Op Unary)*, precedence climbing
    fn parse_binary(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();
        loop {
            let op = self.nth(0);
            let precedence = Self::binary_precedence(op);
            if precedence == 0 || precedence <= min_precedence {
                break;
            }
            if matches!(op, SyntaxKind::IS_KW | SyntaxKind::AS_KW) {
                self.start_node_at(checkpoint, SyntaxKind::IS_EXPR);
                self.bump();
                self.parse_type();
                // `x is Foo foo` declaration pattern
                if self.at(SyntaxKind::IDENT) {
                    self.parse_name();
                }
                self.finish_node();
                continue;
            }
            self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
            self.bump();
            // `??` is right associative
            let next_min = if op == SyntaxKind::QUESTION_QUESTION {
                precedence - 1
            } else {
                precedence
            };
            self.parse_binary(next_min);
            self.finish_node();
        }
    }

    /// Unary = PrefixOp Unary | Cast | Lambda | Postfix
    fn parse_unary(&mut self) {
        if self.at_any(&[
            SyntaxKind::BANG,
            SyntaxKind::MINUS,
            SyntaxKind::PLUS,
            SyntaxKind::TILDE,
            SyntaxKind::PLUS_PLUS,
            SyntaxKind::MINUS_MINUS,
        ]) {
            self.start_node(SyntaxKind::PREFIX_EXPR);
            self.bump();
            self.parse_unary();
            self.finish_node();
        } else if self.at_paren_lambda() || self.at_simple_lambda() {
            self.parse_lambda();
        } else if self.at_cast() {
            self.start_node(SyntaxKind::CAST_EXPR);
            self.bump();
            self.parse_type();
            self.expect(SyntaxKind::R_PAREN);
            self.parse_unary();
            self.finish_node();
        } else {
            self.parse_postfix();
        }
    }

    /// Lambda = (Ident | '(' (LambdaParam (',' LambdaParam)*)? ')') '=>' (Block | Expr)
    fn parse_lambda(&mut self) {
        self.start_node(SyntaxKind::LAMBDA_EXPR);
        self.start_node(SyntaxKind::PARAM_LIST);
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::PARAM);
            self.parse_name();
            self.finish_node();
        } else {
            self.expect(SyntaxKind::L_PAREN);
            if !self.at(SyntaxKind::R_PAREN) {
                loop {
                    self.start_node(SyntaxKind::PARAM);
                    let typed = self
                        .scan_type(0)
                        .is_some_and(|end| self.nth(end) == SyntaxKind::IDENT);
                    if typed {
                        self.parse_type();
                    }
                    self.parse_name();
                    self.finish_node();
                    if !self.eat(SyntaxKind::COMMA) {
                        break;
                    }
                }
            }
            self.expect(SyntaxKind::R_PAREN);
        }
        self.finish_node();
        self.expect(SyntaxKind::FAT_ARROW);
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.parse_expr();
        }
        self.finish_node();
    }

    /// Postfix = Primary ('.' NameRef | ArgList | '++' | '--' | '!')*
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();
        loop {
            match self.nth(0) {
                SyntaxKind::DOT => {
                    self.start_node_at(checkpoint, SyntaxKind::MEMBER_ACCESS);
                    self.bump();
                    self.parse_name_ref();
                    self.finish_node();
                }
                SyntaxKind::QUESTION if self.nth(1) == SyntaxKind::DOT => {
                    self.start_node_at(checkpoint, SyntaxKind::MEMBER_ACCESS);
                    self.bump();
                    self.bump();
                    self.parse_name_ref();
                    self.finish_node();
                }
                SyntaxKind::L_PAREN => {
                    self.start_node_at(checkpoint, SyntaxKind::INVOCATION);
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                    self.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                    self.bump();
                    self.finish_node();
                }
                SyntaxKind::BANG
                    if matches!(
                        self.nth(1),
                        SyntaxKind::DOT | SyntaxKind::SEMICOLON | SyntaxKind::R_PAREN
                    ) =>
                {
                    // null-forgiving operator
                    self.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// NameRef = Ident
    fn parse_name_ref(&mut self) {
        self.start_node(SyntaxKind::NAME_REF);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    fn parse_primary(&mut self) {
        let kind = self.nth(0);
        match kind {
            _ if kind.is_literal() => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IDENT | SyntaxKind::PREDEFINED_TYPE => {
                self.start_node(SyntaxKind::NAME_REF);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::THIS_KW => {
                self.start_node(SyntaxKind::THIS_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::BASE_KW => {
                self.start_node(SyntaxKind::BASE_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::NEW_KW => self.parse_object_creation(),
            SyntaxKind::TYPEOF_KW => {
                self.start_node(SyntaxKind::TYPEOF_EXPR);
                self.bump();
                self.expect(SyntaxKind::L_PAREN);
                self.parse_type();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::DEFAULT_KW => {
                self.start_node(SyntaxKind::DEFAULT_EXPR);
                self.bump();
                if self.eat(SyntaxKind::L_PAREN) {
                    self.parse_type();
                    self.expect(SyntaxKind::R_PAREN);
                }
                self.finish_node();
            }
            _ => {
                self.error(format!("expected expression, found {:?}", kind));
                if !self.at_eof()
                    && !self.at_any(&[
                        SyntaxKind::SEMICOLON,
                        SyntaxKind::R_PAREN,
                        SyntaxKind::R_BRACE,
                        SyntaxKind::R_BRACKET,
                        SyntaxKind::COMMA,
                    ])
                {
                    self.start_node(SyntaxKind::ERROR);
                    self.bump_balanced();
                    self.finish_node();
                }
            }
        }
    }

    /// ObjectCreation = 'new' Type? ArgList? Initializer?
    fn parse_object_creation(&mut self) {
        self.start_node(SyntaxKind::OBJECT_CREATION);
        self.expect(SyntaxKind::NEW_KW);
        if self.at_any(&[SyntaxKind::IDENT, SyntaxKind::PREDEFINED_TYPE]) {
            self.parse_type();
        }
        if self.at(SyntaxKind::L_BRACKET) {
            // array size: new int[3]
            self.bump_balanced();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_arg_list();
        }
        if self.at(SyntaxKind::L_BRACE) {
            // object / collection initializer, kept as tokens
            self.bump_balanced();
        }
        self.finish_node();
    }

    /// ArgList = '(' (Argument (',' Argument)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.parse_argument();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Argument = (Name ':')? ('ref' | 'out' | 'in')? Expr
    fn parse_argument(&mut self) {
        self.start_node(SyntaxKind::ARGUMENT);
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::COLON {
            self.parse_name();
            self.bump();
        }
        if ["ref", "out", "in"].iter().any(|m| self.at_contextual(m))
            && matches!(self.nth(1), SyntaxKind::IDENT | SyntaxKind::THIS_KW)
        {
            self.bump();
        }
        self.parse_expr();
        self.finish_node();
    }
}
