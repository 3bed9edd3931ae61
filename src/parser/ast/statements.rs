use super::*;

/// Body of a method, accessor or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Body {
    Block(Block),
    Expr(ArrowBody),
}

impl AstNode for Body {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::BLOCK | SyntaxKind::ARROW_BODY)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::BLOCK => Some(Self::Block(Block(node))),
            SyntaxKind::ARROW_BODY => Some(Self::Expr(ArrowBody(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Block(b) => b.syntax(),
            Self::Expr(e) => e.syntax(),
        }
    }
}

impl Body {
    /// Top-level statements. An expression body counts as one statement.
    pub fn statements(&self) -> Vec<SyntaxNode> {
        match self {
            Self::Block(block) => block.statements().map(|s| s.syntax().clone()).collect(),
            Self::Expr(arrow) => vec![arrow.syntax().clone()],
        }
    }
}

ast_node!(Block, BLOCK);

impl Block {
    children_method!(statements, Stmt);
}

/// A statement inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Block(Block),
    Return(ReturnStmt),
    Expr(ExprStmt),
    LocalDecl(LocalDeclStmt),
    If(IfStmt),
    Throw(ThrowStmt),
    Empty(EmptyStmt),
    Other(OtherStmt),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::BLOCK
                | SyntaxKind::RETURN_STMT
                | SyntaxKind::EXPR_STMT
                | SyntaxKind::LOCAL_DECL_STMT
                | SyntaxKind::IF_STMT
                | SyntaxKind::THROW_STMT
                | SyntaxKind::EMPTY_STMT
                | SyntaxKind::OTHER_STMT
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::BLOCK => Some(Self::Block(Block(node))),
            SyntaxKind::RETURN_STMT => Some(Self::Return(ReturnStmt(node))),
            SyntaxKind::EXPR_STMT => Some(Self::Expr(ExprStmt(node))),
            SyntaxKind::LOCAL_DECL_STMT => Some(Self::LocalDecl(LocalDeclStmt(node))),
            SyntaxKind::IF_STMT => Some(Self::If(IfStmt(node))),
            SyntaxKind::THROW_STMT => Some(Self::Throw(ThrowStmt(node))),
            SyntaxKind::EMPTY_STMT => Some(Self::Empty(EmptyStmt(node))),
            SyntaxKind::OTHER_STMT => Some(Self::Other(OtherStmt(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Block(s) => s.syntax(),
            Self::Return(s) => s.syntax(),
            Self::Expr(s) => s.syntax(),
            Self::LocalDecl(s) => s.syntax(),
            Self::If(s) => s.syntax(),
            Self::Throw(s) => s.syntax(),
            Self::Empty(s) => s.syntax(),
            Self::Other(s) => s.syntax(),
        }
    }
}

ast_node!(ReturnStmt, RETURN_STMT);

impl ReturnStmt {
    first_child_method!(expr, Expr);
}

ast_node!(ExprStmt, EXPR_STMT);

impl ExprStmt {
    first_child_method!(expr, Expr);
}

ast_node!(LocalDeclStmt, LOCAL_DECL_STMT);

impl LocalDeclStmt {
    first_child_method!(ty, Type);
    children_method!(declarators, VariableDeclarator);
    has_token_method!(is_const, CONST_KW);
}

ast_node!(IfStmt, IF_STMT);

impl IfStmt {
    first_child_method!(condition, Expr);

    pub fn then_branch(&self) -> Option<Stmt> {
        self.0.children().find_map(Stmt::cast)
    }

    pub fn else_branch(&self) -> Option<Stmt> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ELSE_CLAUSE)
            .and_then(|clause| clause.children().find_map(Stmt::cast))
    }
}

ast_node!(ThrowStmt, THROW_STMT);

impl ThrowStmt {
    first_child_method!(expr, Expr);
}

ast_node!(EmptyStmt, EMPTY_STMT);
ast_node!(OtherStmt, OTHER_STMT);
