//! Declaration-shape recognition.
//!
//! [`recognize`] classifies one declaration node. Shapes are tried in a fixed
//! order: registrations and read-only aliases on backing members first, then
//! CLR accessors. When a property is written through a key, the key's
//! registration wins over the public token's.

use text_size::TextRange;

use super::backing::BackingMember;
use super::clr::{self, AttachedGet, AttachedSet, ClrCorrelation};
use super::registration::{RegistrationCall, RegistrationKind, read_only_alias_key, registration_of};
use crate::parser::{
    AstNode, Expr, ExprStmt, MethodDecl, PropertyDecl, SyntaxKind, SyntaxNode, VariableDeclarator,
};
use crate::semantic::{SemanticModel, SymbolId};

/// A backing member initialized with a registration call.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredMember {
    /// Declarator or property declaration.
    pub declaration: SyntaxNode,
    pub member: BackingMember,
    pub call: RegistrationCall,
}

/// `FooProperty = FooPropertyKey.DependencyProperty`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOnlyAlias {
    pub declaration: SyntaxNode,
    pub member: BackingMember,
    pub key: BackingMember,
    /// The key's registration.
    pub registration: Option<RegistrationCall>,
}

/// A CLR property wrapping `GetValue` / `SetValue`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClrProperty {
    pub property: PropertyDecl,
    pub symbol: SymbolId,
    pub correlation: ClrCorrelation,
    /// Registration of the token the accessors use, key first.
    pub registration: Option<RegistrationCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachedGetMethod {
    pub accessor: AttachedGet,
    pub registration: Option<RegistrationCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachedSetMethod {
    pub accessor: AttachedSet,
    pub registration: Option<RegistrationCall>,
}

/// A recognized dependency property declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognized {
    Registration(RegisteredMember),
    ReadOnlyAlias(ReadOnlyAlias),
    ClrProperty(ClrProperty),
    AttachedGet(AttachedGetMethod),
    AttachedSet(AttachedSetMethod),
    /// `FooProperty.OverrideMetadata(...)` as a statement.
    OverrideMetadata(RegistrationCall),
}

impl Recognized {
    /// The declaration (or statement) this was recognized from.
    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Recognized::Registration(registered) => &registered.declaration,
            Recognized::ReadOnlyAlias(alias) => &alias.declaration,
            Recognized::ClrProperty(property) => property.property.syntax(),
            Recognized::AttachedGet(get) => get.accessor.method.syntax(),
            Recognized::AttachedSet(set) => set.accessor.method.syntax(),
            Recognized::OverrideMetadata(call) => call.invocation.syntax(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.syntax().text_range()
    }

    /// The registration this declaration belongs to, if known.
    pub fn registration(&self) -> Option<&RegistrationCall> {
        match self {
            Recognized::Registration(registered) => Some(&registered.call),
            Recognized::ReadOnlyAlias(alias) => alias.registration.as_ref(),
            Recognized::ClrProperty(property) => property.registration.as_ref(),
            Recognized::AttachedGet(get) => get.registration.as_ref(),
            Recognized::AttachedSet(set) => set.registration.as_ref(),
            Recognized::OverrideMetadata(call) => Some(call),
        }
    }
}

/// Node kinds [`recognize`] looks at.
pub fn is_candidate(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VARIABLE_DECLARATOR
            | SyntaxKind::PROPERTY_DECL
            | SyntaxKind::METHOD_DECL
            | SyntaxKind::EXPR_STMT
    )
}

/// Candidate declaration nodes under `root` in source order.
pub fn candidates(root: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> + '_ {
    root.descendants().filter(|node| is_candidate(node.kind()))
}

/// Classify one declaration. `None` for anything that is not a dependency
/// property idiom.
pub fn recognize(model: &dyn SemanticModel, node: &SyntaxNode) -> Option<Recognized> {
    match node.kind() {
        SyntaxKind::VARIABLE_DECLARATOR => {
            let declarator = VariableDeclarator::cast(node.clone())?;
            recognize_backing(model, node, declarator.initializer()?)
        }
        SyntaxKind::FIELD_DECL => node
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::VARIABLE_DECLARATOR)
            .find_map(|declarator| recognize(model, &declarator)),
        SyntaxKind::PROPERTY_DECL => {
            let property = PropertyDecl::cast(node.clone())?;
            if property.is_static() {
                let symbol = model.declared_symbol(node)?;
                let member = BackingMember::try_create(model, symbol)?;
                return recognize_backing(model, node, member.value(model)?);
            }
            recognize_clr_property(model, property)
        }
        SyntaxKind::METHOD_DECL => {
            let method = MethodDecl::cast(node.clone())?;
            recognize_attached_method(model, &method)
        }
        SyntaxKind::EXPR_STMT => {
            let Expr::Invocation(invocation) = ExprStmt::cast(node.clone())?.expr()? else {
                return None;
            };
            let call = RegistrationCall::match_invocation(model, &invocation)?;
            (call.kind == RegistrationKind::OverrideMetadata).then_some(Recognized::OverrideMetadata(call))
        }
        _ => None,
    }
}

/// Every recognized declaration in `root`, in source order.
pub fn recognize_file(model: &dyn SemanticModel, root: &SyntaxNode) -> Vec<Recognized> {
    candidates(root)
        .filter_map(|node| recognize(model, &node))
        .collect()
}

fn recognize_backing(model: &dyn SemanticModel, node: &SyntaxNode, value: Expr) -> Option<Recognized> {
    let symbol = model.declared_symbol(node)?;
    let member = BackingMember::try_create(model, symbol)?;
    match value.unparenthesized() {
        Expr::Invocation(invocation) => {
            let call = RegistrationCall::match_invocation(model, &invocation)?;
            if call.kind == RegistrationKind::OverrideMetadata {
                return None;
            }
            Some(Recognized::Registration(RegisteredMember {
                declaration: node.clone(),
                member,
                call,
            }))
        }
        Expr::MemberAccess(access) => {
            let key = read_only_alias_key(model, &access)?;
            let registration = registration_of(model, &key);
            Some(Recognized::ReadOnlyAlias(ReadOnlyAlias {
                declaration: node.clone(),
                member,
                key,
                registration,
            }))
        }
        _ => None,
    }
}

fn recognize_clr_property(model: &dyn SemanticModel, property: PropertyDecl) -> Option<Recognized> {
    let symbol = model.declared_symbol(property.syntax())?;
    let correlation = clr::correlate_property(model, &property)?;
    let registration = match &correlation {
        ClrCorrelation::Pair(pair) if pair.is_read_only(model) => {
            registration_of(model, &pair.setter.member)
        }
        _ => registration_of(model, &correlation.getter().member),
    };
    Some(Recognized::ClrProperty(ClrProperty {
        property,
        symbol,
        correlation,
        registration,
    }))
}

fn recognize_attached_method(model: &dyn SemanticModel, method: &MethodDecl) -> Option<Recognized> {
    if let Some(accessor) = clr::match_attached_get(model, method) {
        let registration = registration_of(model, &accessor.call.member);
        return Some(Recognized::AttachedGet(AttachedGetMethod {
            accessor,
            registration,
        }));
    }
    let accessor = clr::match_attached_set(model, method)?;
    let registration = registration_of(model, &accessor.call.member);
    Some(Recognized::AttachedSet(AttachedSetMethod {
        accessor,
        registration,
    }))
}
