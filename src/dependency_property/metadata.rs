//! Property metadata construction: default value and callbacks.

use super::callback::{CallbackBinding, CallbackRole};
use super::catalog::{self, ParameterRole};
use super::matchers;
use crate::parser::{AstNode, Expr, ObjectCreation};
use crate::semantic::{MethodSignature, SemanticModel, TypeRef, align_arguments};

/// Arguments of a `new PropertyMetadata(...)`-like construction, by role.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMetadataDescriptor {
    pub creation: ObjectCreation,
    pub metadata_type: TypeRef,
    pub constructor: MethodSignature,
    pub default_value: Option<Expr>,
    pub property_changed: Option<Expr>,
    pub coerce_value: Option<Expr>,
    pub flags: Option<Expr>,
}

impl PropertyMetadataDescriptor {
    /// Extract roles from a metadata construction. Roles come from the
    /// overload resolved for this call site, never from argument count.
    pub fn from_expr(model: &dyn SemanticModel, expr: &Expr) -> Option<Self> {
        let Expr::ObjectCreation(creation) = expr.clone().unparenthesized() else {
            return None;
        };
        let constructor = model.resolve_invoked_method(creation.syntax())?;
        let metadata_type = constructor
            .containing_type
            .map(TypeRef::Named)
            .unwrap_or(TypeRef::Unknown);
        if !matchers::derives_from(model, &metadata_type, &catalog::PROPERTY_METADATA) {
            return None;
        }

        let roles: Vec<ParameterRole> = constructor
            .parameters
            .iter()
            .enumerate()
            .map(|(position, parameter)| {
                let ty = parameter.ty.symbol().map(|id| model.qualified_name(id));
                catalog::role_for_parameter(ty.as_ref(), position)
            })
            .collect();
        // Framework metadata types must match a catalog shape exactly
        let metadata_name = metadata_type.symbol().map(|id| model.qualified_name(id));
        let is_framework_type = metadata_type
            .symbol()
            .is_some_and(|id| model.symbol(id).is_metadata());
        if is_framework_type {
            let name = metadata_name.as_ref()?;
            catalog::metadata_constructor(name, &roles)?;
        }

        let aligned = align_arguments(&constructor, &creation.args());
        let mut descriptor = Self {
            creation,
            metadata_type,
            constructor,
            default_value: None,
            property_changed: None,
            coerce_value: None,
            flags: None,
        };
        for (role, argument) in roles.iter().zip(aligned) {
            let value = argument.and_then(|a| a.expr());
            match role {
                ParameterRole::DefaultValue => descriptor.default_value = value,
                ParameterRole::PropertyChanged => descriptor.property_changed = value,
                ParameterRole::CoerceValue => descriptor.coerce_value = value,
                ParameterRole::Flags => descriptor.flags = value,
                ParameterRole::Other => {}
            }
        }
        Some(descriptor)
    }

    pub fn changed_callback(&self, model: &dyn SemanticModel) -> Option<CallbackBinding> {
        CallbackBinding::resolve(model, self.property_changed.as_ref()?, CallbackRole::PropertyChanged)
    }

    pub fn coerce_callback(&self, model: &dyn SemanticModel) -> Option<CallbackBinding> {
        CallbackBinding::resolve(model, self.coerce_value.as_ref()?, CallbackRole::CoerceValue)
    }
}
