//! Catalog of the framework types and members the recognizers look for.
//!
//! Entries are compared by qualified identity: namespace, name and arity.
//! The catalog is plain `const` data and is safe to read from any thread.

use std::fmt;

use crate::semantic::QualifiedName;

/// A framework type identified by namespace, name and generic arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedType {
    pub namespace: &'static str,
    pub name: &'static str,
    pub arity: u32,
}

impl QualifiedType {
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self {
            namespace,
            name,
            arity: 0,
        }
    }

    /// Compare against a resolved symbol name. Nested types never match.
    pub fn matches(&self, name: &QualifiedName) -> bool {
        name.containers.is_empty()
            && name.arity == self.arity
            && name.name == self.name
            && name.namespace == self.namespace
    }
}

impl fmt::Display for QualifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// A method identified by its containing type and exact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedMethod {
    pub containing_type: QualifiedType,
    pub name: &'static str,
}

impl QualifiedMethod {
    pub const fn new(containing_type: QualifiedType, name: &'static str) -> Self {
        Self {
            containing_type,
            name,
        }
    }
}

/// Methods on one type sharing a name prefix, e.g. every `Register*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodFamily {
    pub containing_type: QualifiedType,
    pub prefix: &'static str,
}

pub const OBJECT: QualifiedType = QualifiedType::new("System", "Object");
pub const STRING: QualifiedType = QualifiedType::new("System", "String");
pub const TYPE: QualifiedType = QualifiedType::new("System", "Type");

pub const DEPENDENCY_OBJECT: QualifiedType = QualifiedType::new("System.Windows", "DependencyObject");
pub const DEPENDENCY_PROPERTY: QualifiedType =
    QualifiedType::new("System.Windows", "DependencyProperty");
pub const DEPENDENCY_PROPERTY_KEY: QualifiedType =
    QualifiedType::new("System.Windows", "DependencyPropertyKey");
pub const DEPENDENCY_PROPERTY_CHANGED_EVENT_ARGS: QualifiedType =
    QualifiedType::new("System.Windows", "DependencyPropertyChangedEventArgs");
pub const PROPERTY_METADATA: QualifiedType = QualifiedType::new("System.Windows", "PropertyMetadata");
pub const UI_PROPERTY_METADATA: QualifiedType =
    QualifiedType::new("System.Windows", "UIPropertyMetadata");
pub const FRAMEWORK_PROPERTY_METADATA: QualifiedType =
    QualifiedType::new("System.Windows", "FrameworkPropertyMetadata");
pub const FRAMEWORK_PROPERTY_METADATA_OPTIONS: QualifiedType =
    QualifiedType::new("System.Windows", "FrameworkPropertyMetadataOptions");
pub const PROPERTY_CHANGED_CALLBACK: QualifiedType =
    QualifiedType::new("System.Windows", "PropertyChangedCallback");
pub const COERCE_VALUE_CALLBACK: QualifiedType =
    QualifiedType::new("System.Windows", "CoerceValueCallback");
pub const VALIDATE_VALUE_CALLBACK: QualifiedType =
    QualifiedType::new("System.Windows", "ValidateValueCallback");
pub const ATTACHED_PROPERTY_BROWSABLE_FOR_TYPE: QualifiedType =
    QualifiedType::new("System.Windows", "AttachedPropertyBrowsableForTypeAttribute");
pub const FRAMEWORK_ELEMENT: QualifiedType = QualifiedType::new("System.Windows", "FrameworkElement");
pub const FRAMEWORK_CONTENT_ELEMENT: QualifiedType =
    QualifiedType::new("System.Windows", "FrameworkContentElement");

/// `DependencyProperty.Register`, `RegisterReadOnly`, `RegisterAttached`
/// and `RegisterAttachedReadOnly`.
pub const REGISTER_FAMILY: MethodFamily = MethodFamily {
    containing_type: DEPENDENCY_PROPERTY,
    prefix: "Register",
};

pub const REGISTER: QualifiedMethod = QualifiedMethod::new(DEPENDENCY_PROPERTY, "Register");
pub const REGISTER_READ_ONLY: QualifiedMethod =
    QualifiedMethod::new(DEPENDENCY_PROPERTY, "RegisterReadOnly");
pub const REGISTER_ATTACHED: QualifiedMethod =
    QualifiedMethod::new(DEPENDENCY_PROPERTY, "RegisterAttached");
pub const REGISTER_ATTACHED_READ_ONLY: QualifiedMethod =
    QualifiedMethod::new(DEPENDENCY_PROPERTY, "RegisterAttachedReadOnly");
pub const ADD_OWNER: QualifiedMethod = QualifiedMethod::new(DEPENDENCY_PROPERTY, "AddOwner");
pub const OVERRIDE_METADATA: QualifiedMethod =
    QualifiedMethod::new(DEPENDENCY_PROPERTY, "OverrideMetadata");
pub const KEY_OVERRIDE_METADATA: QualifiedMethod =
    QualifiedMethod::new(DEPENDENCY_PROPERTY_KEY, "OverrideMetadata");

pub const GET_VALUE: QualifiedMethod = QualifiedMethod::new(DEPENDENCY_OBJECT, "GetValue");
pub const SET_VALUE: QualifiedMethod = QualifiedMethod::new(DEPENDENCY_OBJECT, "SetValue");
pub const SET_CURRENT_VALUE: QualifiedMethod =
    QualifiedMethod::new(DEPENDENCY_OBJECT, "SetCurrentValue");

/// What a metadata constructor parameter carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterRole {
    DefaultValue,
    PropertyChanged,
    CoerceValue,
    Flags,
    /// `isAnimationProhibited`, `defaultUpdateSourceTrigger`.
    Other,
}

/// One constructor overload of a metadata type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataConstructorShape {
    pub ty: QualifiedType,
    pub roles: &'static [ParameterRole],
}

use ParameterRole::{CoerceValue as Cv, DefaultValue as Dv, Flags as Fl, Other as Ot, PropertyChanged as Pc};

const fn shape(ty: QualifiedType, roles: &'static [ParameterRole]) -> MetadataConstructorShape {
    MetadataConstructorShape { ty, roles }
}

/// Every metadata constructor overload the framework declares.
pub const METADATA_CONSTRUCTORS: &[MetadataConstructorShape] = &[
    shape(PROPERTY_METADATA, &[]),
    shape(PROPERTY_METADATA, &[Dv]),
    shape(PROPERTY_METADATA, &[Pc]),
    shape(PROPERTY_METADATA, &[Dv, Pc]),
    shape(PROPERTY_METADATA, &[Dv, Pc, Cv]),
    shape(UI_PROPERTY_METADATA, &[]),
    shape(UI_PROPERTY_METADATA, &[Dv]),
    shape(UI_PROPERTY_METADATA, &[Pc]),
    shape(UI_PROPERTY_METADATA, &[Dv, Pc]),
    shape(UI_PROPERTY_METADATA, &[Dv, Pc, Cv]),
    shape(UI_PROPERTY_METADATA, &[Dv, Pc, Cv, Ot]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Pc]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Pc, Cv]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv, Fl]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv, Pc]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv, Pc, Cv]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv, Fl, Pc]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv, Fl, Pc, Cv]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv, Fl, Pc, Cv, Ot]),
    shape(FRAMEWORK_PROPERTY_METADATA, &[Dv, Fl, Pc, Cv, Ot, Ot]),
];

/// Catalog entry for a constructor of `ty` with the given parameter roles.
pub fn metadata_constructor(
    ty: &QualifiedName,
    roles: &[ParameterRole],
) -> Option<&'static MetadataConstructorShape> {
    METADATA_CONSTRUCTORS
        .iter()
        .find(|shape| shape.ty.matches(ty) && shape.roles == roles)
}

/// Role of a metadata constructor parameter, from its declared type and
/// position. A default value is only ever the first parameter.
pub fn role_for_parameter(parameter_type: Option<&QualifiedName>, position: usize) -> ParameterRole {
    match parameter_type {
        Some(ty) if position == 0 && OBJECT.matches(ty) => ParameterRole::DefaultValue,
        Some(ty) if PROPERTY_CHANGED_CALLBACK.matches(ty) => ParameterRole::PropertyChanged,
        Some(ty) if COERCE_VALUE_CALLBACK.matches(ty) => ParameterRole::CoerceValue,
        Some(ty) if FRAMEWORK_PROPERTY_METADATA_OPTIONS.matches(ty) => ParameterRole::Flags,
        _ => ParameterRole::Other,
    }
}

#[cfg(test)]
mod tests {
    use smol_str::SmolStr;

    use super::*;

    fn name(namespace: &str, name: &str) -> QualifiedName {
        QualifiedName {
            namespace: SmolStr::new(namespace),
            containers: Vec::new(),
            name: SmolStr::new(name),
            arity: 0,
        }
    }

    #[test]
    fn qualified_identity_ignores_lookalikes() {
        let real = name("System.Windows", "DependencyProperty");
        let fake = name("My.Windows", "DependencyProperty");
        let mut nested = real.clone();
        nested.containers.push(SmolStr::new("Outer"));
        assert!(DEPENDENCY_PROPERTY.matches(&real));
        assert!(!DEPENDENCY_PROPERTY.matches(&fake));
        assert!(!DEPENDENCY_PROPERTY.matches(&nested));
        assert_eq!(DEPENDENCY_PROPERTY.to_string(), "System.Windows.DependencyProperty");
    }

    #[test]
    fn each_metadata_type_has_distinct_shapes() {
        let framework = name("System.Windows", "FrameworkPropertyMetadata");
        let plain = name("System.Windows", "PropertyMetadata");
        assert!(metadata_constructor(&framework, &[Dv, Fl]).is_some());
        assert!(metadata_constructor(&plain, &[Dv, Fl]).is_none());
        assert!(metadata_constructor(&plain, &[Dv, Pc, Cv]).is_some());
    }

    #[test]
    fn default_value_only_in_first_position() {
        let object = name("System", "Object");
        let callback = name("System.Windows", "PropertyChangedCallback");
        assert_eq!(role_for_parameter(Some(&object), 0), ParameterRole::DefaultValue);
        assert_eq!(role_for_parameter(Some(&object), 1), ParameterRole::Other);
        assert_eq!(role_for_parameter(Some(&callback), 0), ParameterRole::PropertyChanged);
        assert_eq!(role_for_parameter(None, 0), ParameterRole::Other);
    }
}
