//! Registration calls: `Register*`, `AddOwner` and `OverrideMetadata`.

use super::backing::BackingMember;
use super::callback::{CallbackBinding, CallbackRole};
use super::catalog;
use super::matchers;
use super::metadata::PropertyMetadataDescriptor;
use crate::parser::{Argument, AstNode, Expr, Invocation};
use crate::semantic::{MethodSignature, SemanticModel, SymbolKind, TypeRef, align_arguments};

/// Guard for `AddOwner` chains that point back at themselves.
const MAX_CHAIN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    Register,
    RegisterReadOnly,
    RegisterAttached,
    RegisterAttachedReadOnly,
    AddOwner,
    OverrideMetadata,
}

impl RegistrationKind {
    fn from_register_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Register" => RegistrationKind::Register,
            "RegisterReadOnly" => RegistrationKind::RegisterReadOnly,
            "RegisterAttached" => RegistrationKind::RegisterAttached,
            "RegisterAttachedReadOnly" => RegistrationKind::RegisterAttachedReadOnly,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns a `DependencyPropertyKey`.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            RegistrationKind::RegisterReadOnly | RegistrationKind::RegisterAttachedReadOnly
        )
    }

    pub fn is_attached(self) -> bool {
        matches!(
            self,
            RegistrationKind::RegisterAttached | RegistrationKind::RegisterAttachedReadOnly
        )
    }

    /// One of the four `Register*` methods.
    pub fn is_register(self) -> bool {
        !matches!(
            self,
            RegistrationKind::AddOwner | RegistrationKind::OverrideMetadata
        )
    }

    pub fn method_name(self) -> &'static str {
        match self {
            RegistrationKind::Register => "Register",
            RegistrationKind::RegisterReadOnly => "RegisterReadOnly",
            RegistrationKind::RegisterAttached => "RegisterAttached",
            RegistrationKind::RegisterAttachedReadOnly => "RegisterAttachedReadOnly",
            RegistrationKind::AddOwner => "AddOwner",
            RegistrationKind::OverrideMetadata => "OverrideMetadata",
        }
    }
}

/// A recognized registration invocation with arguments aligned to the
/// resolved overload's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationCall {
    pub kind: RegistrationKind,
    pub invocation: Invocation,
    pub signature: MethodSignature,
    /// One entry per parameter of `signature`.
    pub arguments: Vec<Option<Argument>>,
    /// Token `AddOwner` / `OverrideMetadata` is called on.
    pub target: Option<BackingMember>,
}

impl RegistrationCall {
    pub fn match_expr(model: &dyn SemanticModel, expr: &Expr) -> Option<Self> {
        match expr.clone().unparenthesized() {
            Expr::Invocation(invocation) => Self::match_invocation(model, &invocation),
            _ => None,
        }
    }

    pub fn match_invocation(model: &dyn SemanticModel, invocation: &Invocation) -> Option<Self> {
        let signature = model.resolve_invoked_method(invocation.syntax())?;
        let method = signature.method;
        let kind = if matchers::matches_family(model, method, &catalog::REGISTER_FAMILY) {
            RegistrationKind::from_register_name(&signature.name)?
        } else if matchers::is_method(model, method, &catalog::ADD_OWNER) {
            RegistrationKind::AddOwner
        } else if matchers::is_method(model, method, &catalog::OVERRIDE_METADATA)
            || matchers::is_method(model, method, &catalog::KEY_OVERRIDE_METADATA)
        {
            RegistrationKind::OverrideMetadata
        } else {
            return None;
        };

        let target = if kind.is_register() {
            None
        } else {
            match invocation.callee()? {
                Expr::MemberAccess(access) => BackingMember::from_expr(model, &access.receiver()?),
                _ => None,
            }
        };
        let arguments = align_arguments(&signature, &invocation.args());
        Some(Self {
            kind,
            invocation: invocation.clone(),
            signature,
            arguments,
            target,
        })
    }

    /// Argument passed for the parameter named `name`.
    pub fn argument(&self, name: &str) -> Option<Expr> {
        let index = self.signature.parameter_named(name)?;
        self.arguments.get(index)?.as_ref()?.expr()
    }

    /// Argument passed for the first parameter of a catalog type (or subtype).
    fn argument_of_type(&self, model: &dyn SemanticModel, ty: &catalog::QualifiedType) -> Option<Expr> {
        let index = self
            .signature
            .parameters
            .iter()
            .position(|p| matchers::derives_from(model, &p.ty, ty))?;
        self.arguments.get(index)?.as_ref()?.expr()
    }

    pub fn name_argument(&self) -> Option<Expr> {
        if self.kind.is_register() {
            self.argument("name")
        } else {
            None
        }
    }

    pub fn type_argument(&self) -> Option<Expr> {
        if self.kind.is_register() {
            self.argument("propertyType")
        } else {
            None
        }
    }

    pub fn owner_argument(&self) -> Option<Expr> {
        match self.kind {
            RegistrationKind::OverrideMetadata => self.argument("forType"),
            _ => self.argument("ownerType"),
        }
    }

    pub fn metadata_argument(&self, model: &dyn SemanticModel) -> Option<Expr> {
        self.argument_of_type(model, &catalog::PROPERTY_METADATA)
    }

    pub fn validate_argument(&self, model: &dyn SemanticModel) -> Option<Expr> {
        self.argument_of_type(model, &catalog::VALIDATE_VALUE_CALLBACK)
    }

    /// Name the property is registered under.
    pub fn registered_name(&self, model: &dyn SemanticModel) -> Option<String> {
        self.registered_name_at_depth(model, 0)
    }

    fn registered_name_at_depth(&self, model: &dyn SemanticModel, depth: usize) -> Option<String> {
        if self.kind.is_register() {
            return matchers::constant_string(model, &self.name_argument()?);
        }
        let target = self.target.as_ref()?;
        if target.is_source() && depth < MAX_CHAIN {
            if let Some(inner) = registration_of_at_depth(model, target, depth + 1) {
                return inner.registered_name_at_depth(model, depth + 1);
            }
        }
        target.base_name().map(str::to_string)
    }

    /// Value type of the property.
    pub fn registered_type(&self, model: &dyn SemanticModel) -> Option<TypeRef> {
        self.registered_type_at_depth(model, 0)
    }

    fn registered_type_at_depth(&self, model: &dyn SemanticModel, depth: usize) -> Option<TypeRef> {
        if self.kind.is_register() {
            return matchers::typeof_argument(model, &self.type_argument()?);
        }
        let target = self.target.as_ref()?;
        if target.is_source() && depth < MAX_CHAIN {
            if let Some(inner) = registration_of_at_depth(model, target, depth + 1) {
                return inner.registered_type_at_depth(model, depth + 1);
            }
        }
        framework_property_type(model, target)
    }

    /// Type passed as `ownerType` / `forType`.
    pub fn owner_type(&self, model: &dyn SemanticModel) -> Option<TypeRef> {
        matchers::typeof_argument(model, &self.owner_argument()?)
    }

    pub fn metadata(&self, model: &dyn SemanticModel) -> Option<PropertyMetadataDescriptor> {
        PropertyMetadataDescriptor::from_expr(model, &self.metadata_argument(model)?)
    }

    pub fn validate_callback(&self, model: &dyn SemanticModel) -> Option<CallbackBinding> {
        CallbackBinding::resolve(model, &self.validate_argument(model)?, CallbackRole::ValidateValue)
    }
}

/// Type of a framework-declared token: the same-named CLR property on its
/// owner, or the return type of the `Get{Name}` accessor method.
fn framework_property_type(model: &dyn SemanticModel, token: &BackingMember) -> Option<TypeRef> {
    let name = token.base_name()?;
    let owner = token.containing_type();
    let property = model
        .members(owner, name)
        .into_iter()
        .find(|m| model.symbol(*m).kind == SymbolKind::Property);
    if let Some(property) = property {
        return Some(model.symbol(property).ty.clone());
    }
    let getter = format!("Get{}", name);
    model
        .members(owner, &getter)
        .into_iter()
        .find(|m| model.symbol(*m).kind == SymbolKind::Method && model.symbol(*m).is_static)
        .map(|m| model.symbol(m).ty.clone())
}

/// The registration a backing member is initialized with.
///
/// A read-only alias (`BarProperty = BarPropertyKey.DependencyProperty`)
/// yields the key's registration.
pub fn registration_of(model: &dyn SemanticModel, member: &BackingMember) -> Option<RegistrationCall> {
    registration_of_at_depth(model, member, 0)
}

fn registration_of_at_depth(
    model: &dyn SemanticModel,
    member: &BackingMember,
    depth: usize,
) -> Option<RegistrationCall> {
    if depth > MAX_CHAIN {
        return None;
    }
    match member.value(model)?.unparenthesized() {
        Expr::Invocation(invocation) => RegistrationCall::match_invocation(model, &invocation),
        Expr::MemberAccess(access) => {
            let key = read_only_alias_key(model, &access)?;
            registration_of_at_depth(model, &key, depth + 1)
        }
        _ => None,
    }
}

/// For `SomeKey.DependencyProperty`, the key member.
pub fn read_only_alias_key(
    model: &dyn SemanticModel,
    access: &crate::parser::MemberAccess,
) -> Option<BackingMember> {
    if access.name()?.text()? != "DependencyProperty" {
        return None;
    }
    let key = BackingMember::from_expr(model, &access.receiver()?)?;
    key.is_key(model).then_some(key)
}
