//! Backing members: the static field or property holding a registration token.

use smol_str::SmolStr;
use thiserror::Error;

use super::catalog;
use super::matchers;
use crate::parser::{AstNode, Expr, PropertyDecl, Stmt, SyntaxKind, SyntaxNode, VariableDeclarator};
use crate::semantic::{Accessibility, NodePtr, SemanticModel, SymbolId, SymbolKind, TypeRef};

/// Raised when a symbol that can never back a dependency property is wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackingMemberError {
    #[error("`{name}` is a {kind}, expected a field or property")]
    NotFieldOrProperty { name: SmolStr, kind: &'static str },

    #[error("`{name}` is an instance member, backing members are static")]
    NotStatic { name: SmolStr },

    #[error("`{name}` has no containing type")]
    NoContainingType { name: SmolStr },
}

/// Identity and declaration site of a backing member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    pub symbol: SymbolId,
    pub name: SmolStr,
    pub containing_type: SymbolId,
    pub ty: TypeRef,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub declaration: Option<NodePtr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackingMember {
    Field(MemberInfo),
    Property(MemberInfo),
}

impl BackingMember {
    /// Wrap a field or property symbol.
    ///
    /// Anything else is a caller bug and reported as an error rather than a
    /// non-match.
    pub fn new(model: &dyn SemanticModel, id: SymbolId) -> Result<Self, BackingMemberError> {
        let symbol = model.symbol(id);
        if !matches!(symbol.kind, SymbolKind::Field | SymbolKind::Property) {
            return Err(BackingMemberError::NotFieldOrProperty {
                name: symbol.name.clone(),
                kind: symbol.kind.display_name(),
            });
        }
        if !symbol.is_static {
            return Err(BackingMemberError::NotStatic {
                name: symbol.name.clone(),
            });
        }
        let containing_type = symbol
            .containing_type
            .ok_or_else(|| BackingMemberError::NoContainingType {
                name: symbol.name.clone(),
            })?;
        let info = MemberInfo {
            symbol: id,
            name: symbol.name.clone(),
            containing_type,
            ty: symbol.ty.clone(),
            accessibility: symbol.accessibility,
            is_static: symbol.is_static,
            declaration: symbol.declaration,
        };
        Ok(match symbol.kind {
            SymbolKind::Field => BackingMember::Field(info),
            _ => BackingMember::Property(info),
        })
    }

    /// Wrap `id` if it is a static field or property of a token type.
    pub fn try_create(model: &dyn SemanticModel, id: SymbolId) -> Option<Self> {
        let member = Self::new(model, id).ok()?;
        matchers::is_token_type(model, member.ty()).then_some(member)
    }

    /// Backing member an expression like `FooProperty` or `Owner.FooProperty` refers to.
    pub fn from_expr(model: &dyn SemanticModel, expr: &Expr) -> Option<Self> {
        let id = model.resolve_symbol(&expr.clone().unparenthesized())?;
        Self::try_create(model, id)
    }

    pub fn info(&self) -> &MemberInfo {
        match self {
            BackingMember::Field(info) | BackingMember::Property(info) => info,
        }
    }

    pub fn symbol(&self) -> SymbolId {
        self.info().symbol
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.info().ty
    }

    pub fn containing_type(&self) -> SymbolId {
        self.info().containing_type
    }

    pub fn is_field(&self) -> bool {
        matches!(self, BackingMember::Field(_))
    }

    /// Declared in source (as opposed to the framework surface).
    pub fn is_source(&self) -> bool {
        self.info().declaration.is_some()
    }

    /// Typed `DependencyPropertyKey`.
    pub fn is_key(&self, model: &dyn SemanticModel) -> bool {
        matchers::is_type(model, self.ty(), &catalog::DEPENDENCY_PROPERTY_KEY)
    }

    /// Declarator or property declaration node.
    pub fn declaration(&self, model: &dyn SemanticModel) -> Option<SyntaxNode> {
        model.declaration(self.symbol())
    }

    /// The expression the member is initialized with: field initializer,
    /// property initializer, expression body or single `return` of a getter.
    pub fn value(&self, model: &dyn SemanticModel) -> Option<Expr> {
        let node = self.declaration(model)?;
        match node.kind() {
            SyntaxKind::VARIABLE_DECLARATOR => VariableDeclarator::cast(node)?.initializer(),
            SyntaxKind::PROPERTY_DECL => {
                let property = PropertyDecl::cast(node)?;
                if let Some(initializer) = property.initializer() {
                    return Some(initializer);
                }
                let body = property.getter_body()?;
                let statements = body.statements();
                let [single] = statements.as_slice() else {
                    return None;
                };
                match single.kind() {
                    SyntaxKind::ARROW_BODY => crate::parser::ArrowBody::cast(single.clone())?.expr(),
                    _ => match Stmt::cast(single.clone())? {
                        Stmt::Return(ret) => ret.expr(),
                        _ => None,
                    },
                }
            }
            _ => None,
        }
    }

    /// Name with the `Property` / `PropertyKey` suffix removed.
    pub fn base_name(&self) -> Option<&str> {
        let name = self.name();
        name.strip_suffix("PropertyKey")
            .or_else(|| name.strip_suffix("Property"))
    }
}
