use super::*;

/// Any expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    NameRef(NameRef),
    This(ThisExpr),
    Base(BaseExpr),
    MemberAccess(MemberAccess),
    Invocation(Invocation),
    ObjectCreation(ObjectCreation),
    Cast(CastExpr),
    Paren(ParenExpr),
    Lambda(LambdaExpr),
    TypeOf(TypeOfExpr),
    Default(DefaultExpr),
    Prefix(PrefixExpr),
    Postfix(PostfixExpr),
    Binary(BinaryExpr),
    Assign(AssignExpr),
    Conditional(ConditionalExpr),
    Is(IsExpr),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::LITERAL
                | SyntaxKind::NAME_REF
                | SyntaxKind::THIS_EXPR
                | SyntaxKind::BASE_EXPR
                | SyntaxKind::MEMBER_ACCESS
                | SyntaxKind::INVOCATION
                | SyntaxKind::OBJECT_CREATION
                | SyntaxKind::CAST_EXPR
                | SyntaxKind::PAREN_EXPR
                | SyntaxKind::LAMBDA_EXPR
                | SyntaxKind::TYPEOF_EXPR
                | SyntaxKind::DEFAULT_EXPR
                | SyntaxKind::PREFIX_EXPR
                | SyntaxKind::POSTFIX_EXPR
                | SyntaxKind::BINARY_EXPR
                | SyntaxKind::ASSIGN_EXPR
                | SyntaxKind::CONDITIONAL_EXPR
                | SyntaxKind::IS_EXPR
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let expr = match node.kind() {
            SyntaxKind::LITERAL => Self::Literal(Literal(node)),
            SyntaxKind::NAME_REF => Self::NameRef(NameRef(node)),
            SyntaxKind::THIS_EXPR => Self::This(ThisExpr(node)),
            SyntaxKind::BASE_EXPR => Self::Base(BaseExpr(node)),
            SyntaxKind::MEMBER_ACCESS => Self::MemberAccess(MemberAccess(node)),
            SyntaxKind::INVOCATION => Self::Invocation(Invocation(node)),
            SyntaxKind::OBJECT_CREATION => Self::ObjectCreation(ObjectCreation(node)),
            SyntaxKind::CAST_EXPR => Self::Cast(CastExpr(node)),
            SyntaxKind::PAREN_EXPR => Self::Paren(ParenExpr(node)),
            SyntaxKind::LAMBDA_EXPR => Self::Lambda(LambdaExpr(node)),
            SyntaxKind::TYPEOF_EXPR => Self::TypeOf(TypeOfExpr(node)),
            SyntaxKind::DEFAULT_EXPR => Self::Default(DefaultExpr(node)),
            SyntaxKind::PREFIX_EXPR => Self::Prefix(PrefixExpr(node)),
            SyntaxKind::POSTFIX_EXPR => Self::Postfix(PostfixExpr(node)),
            SyntaxKind::BINARY_EXPR => Self::Binary(BinaryExpr(node)),
            SyntaxKind::ASSIGN_EXPR => Self::Assign(AssignExpr(node)),
            SyntaxKind::CONDITIONAL_EXPR => Self::Conditional(ConditionalExpr(node)),
            SyntaxKind::IS_EXPR => Self::Is(IsExpr(node)),
            _ => return None,
        };
        Some(expr)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Literal(e) => e.syntax(),
            Self::NameRef(e) => e.syntax(),
            Self::This(e) => e.syntax(),
            Self::Base(e) => e.syntax(),
            Self::MemberAccess(e) => e.syntax(),
            Self::Invocation(e) => e.syntax(),
            Self::ObjectCreation(e) => e.syntax(),
            Self::Cast(e) => e.syntax(),
            Self::Paren(e) => e.syntax(),
            Self::Lambda(e) => e.syntax(),
            Self::TypeOf(e) => e.syntax(),
            Self::Default(e) => e.syntax(),
            Self::Prefix(e) => e.syntax(),
            Self::Postfix(e) => e.syntax(),
            Self::Binary(e) => e.syntax(),
            Self::Assign(e) => e.syntax(),
            Self::Conditional(e) => e.syntax(),
            Self::Is(e) => e.syntax(),
        }
    }
}

impl Expr {
    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(self) -> Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = &expr {
            match paren.expr() {
                Some(inner) => expr = inner,
                None => break,
            }
        }
        expr
    }

    /// Identifier of a simple name or the member name of an access.
    pub fn identifier(&self) -> Option<NameRef> {
        match self {
            Expr::NameRef(name) => Some(name.clone()),
            Expr::MemberAccess(access) => access.name(),
            _ => None,
        }
    }
}

// ============================================================================
// Leaves
// ============================================================================

ast_node!(Literal, LITERAL);

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    pub fn kind(&self) -> Option<SyntaxKind> {
        self.token().map(|t| t.kind())
    }

    /// Value of a string literal with escapes processed.
    pub fn string_value(&self) -> Option<String> {
        let token = self.token()?;
        if token.kind() != SyntaxKind::STRING {
            return None;
        }
        Some(unquote(token.text()))
    }
}

fn unquote(text: &str) -> String {
    if let Some(verbatim) = text.strip_prefix("@\"") {
        let inner = verbatim.strip_suffix('"').unwrap_or(verbatim);
        return inner.replace("\"\"", "\"");
    }
    let inner = text.strip_prefix('"').unwrap_or(text);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    /// The identifier (or predefined type keyword) token.
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::IDENT | SyntaxKind::PREDEFINED_TYPE))
    }

    pub fn text(&self) -> Option<String> {
        self.token().map(|t| identifier_text(&t))
    }

    /// True when this name is the member part of `receiver.Name`.
    pub fn is_member_name(&self) -> bool {
        self.0
            .parent()
            .and_then(MemberAccess::cast)
            .and_then(|access| access.name())
            .is_some_and(|name| name == *self)
    }
}

ast_node!(ThisExpr, THIS_EXPR);
ast_node!(BaseExpr, BASE_EXPR);

// ============================================================================
// Access and calls
// ============================================================================

ast_node!(MemberAccess, MEMBER_ACCESS);

impl MemberAccess {
    /// Expression before the dot.
    pub fn receiver(&self) -> Option<Expr> {
        let mut children = self.0.children();
        let first = children.next()?;
        // A lone NAME_REF is the member name of an incomplete access
        children.next()?;
        Expr::cast(first)
    }

    /// Member name after the dot.
    pub fn name(&self) -> Option<NameRef> {
        let children: Vec<_> = self.0.children().collect();
        if children.len() < 2 {
            return None;
        }
        children.last().cloned().and_then(NameRef::cast)
    }
}

ast_node!(Invocation, INVOCATION);

impl Invocation {
    /// Expression being called.
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().next().and_then(Expr::cast)
    }

    first_child_method!(arg_list, ArgList);

    pub fn args(&self) -> Vec<Argument> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }

    /// Simple name of the invoked method: `Foo` in `a.Foo(x)` or `Foo(x)`.
    pub fn method_name(&self) -> Option<String> {
        self.callee()?.identifier()?.text()
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    children_method!(args, Argument);
}

ast_node!(Argument, ARGUMENT);

impl Argument {
    // Named arguments: `propertyType: typeof(int)`
    first_child_method!(name, Name);
    first_child_method!(expr, Expr);

    /// `ref`, `out` or `in` modifier if present.
    pub fn ref_kind(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
    }
}

ast_node!(ObjectCreation, OBJECT_CREATION);

impl ObjectCreation {
    first_child_method!(ty, Type);
    first_child_method!(arg_list, ArgList);

    pub fn args(&self) -> Vec<Argument> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Compound expressions
// ============================================================================

ast_node!(CastExpr, CAST_EXPR);

impl CastExpr {
    first_child_method!(ty, Type);
    first_child_method!(expr, Expr);
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    first_child_method!(expr, Expr);
}

ast_node!(LambdaExpr, LAMBDA_EXPR);

/// Body of a lambda: a block or a single expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LambdaBody {
    Block(Block),
    Expr(Expr),
}

impl LambdaExpr {
    first_child_method!(param_list, ParamList);

    pub fn params(&self) -> Vec<Param> {
        self.param_list()
            .map(|list| list.params().collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<LambdaBody> {
        self.0
            .children()
            .filter(|n| n.kind() != SyntaxKind::PARAM_LIST)
            .find_map(|n| match Block::cast(n.clone()) {
                Some(block) => Some(LambdaBody::Block(block)),
                None => Expr::cast(n).map(LambdaBody::Expr),
            })
    }
}

ast_node!(TypeOfExpr, TYPEOF_EXPR);

impl TypeOfExpr {
    first_child_method!(ty, Type);
}

ast_node!(DefaultExpr, DEFAULT_EXPR);

impl DefaultExpr {
    first_child_method!(ty, Type);
}

/// Operator token of a unary/binary/assignment expression.
fn operator_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| !t.kind().is_trivia())
}

ast_node!(PrefixExpr, PREFIX_EXPR);

impl PrefixExpr {
    first_child_method!(expr, Expr);

    pub fn op(&self) -> Option<SyntaxKind> {
        operator_token(&self.0).map(|t| t.kind())
    }
}

ast_node!(PostfixExpr, POSTFIX_EXPR);

impl PostfixExpr {
    first_child_method!(expr, Expr);

    pub fn op(&self) -> Option<SyntaxKind> {
        operator_token(&self.0).map(|t| t.kind())
    }
}

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op(&self) -> Option<SyntaxKind> {
        operator_token(&self.0).map(|t| t.kind())
    }
}

ast_node!(AssignExpr, ASSIGN_EXPR);

impl AssignExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op(&self) -> Option<SyntaxKind> {
        operator_token(&self.0).map(|t| t.kind())
    }
}

ast_node!(ConditionalExpr, CONDITIONAL_EXPR);

impl ConditionalExpr {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn then_branch(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn else_branch(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(2)
    }
}

ast_node!(IsExpr, IS_EXPR);

impl IsExpr {
    first_child_method!(expr, Expr);
    first_child_method!(ty, Type);
    has_token_method!(is_as, AS_KW, "value as Foo");
}
