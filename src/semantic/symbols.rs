//! Symbol table entries.
//!
//! Symbols live in a flat arena owned by [`super::Compilation`] and are
//! addressed by [`SymbolId`]. Types refer to each other through [`TypeRef`].

use std::fmt;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::parser::{SyntaxKind, SyntaxNode};

/// Unique identifier for a symbol in the arena.
/// Uses u32 for compact storage (supports ~4 billion symbols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Create a new SymbolId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Field,
    Property,
    Method,
    Constructor,
    Parameter,
    Local,
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Struct
                | SymbolKind::Interface
                | SymbolKind::Enum
                | SymbolKind::Delegate
        )
    }

    /// Value types box when converted to `object`.
    pub fn is_value_type(self) -> bool {
        matches!(self, SymbolKind::Struct | SymbolKind::Enum)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Interface => "interface",
            SymbolKind::Enum => "enum",
            SymbolKind::Delegate => "delegate",
            SymbolKind::Field => "field",
            SymbolKind::Property => "property",
            SymbolKind::Method => "method",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

impl Accessibility {
    /// Derive accessibility from modifier keywords. Members default to private.
    pub fn from_modifiers(modifiers: &[SyntaxKind], default: Accessibility) -> Self {
        let has = |kind| modifiers.contains(&kind);
        match (
            has(SyntaxKind::PUBLIC_KW),
            has(SyntaxKind::PROTECTED_KW),
            has(SyntaxKind::INTERNAL_KW),
            has(SyntaxKind::PRIVATE_KW),
        ) {
            (true, _, _, _) => Accessibility::Public,
            (_, true, true, _) => Accessibility::ProtectedInternal,
            (_, true, _, true) => Accessibility::PrivateProtected,
            (_, true, _, _) => Accessibility::Protected,
            (_, _, true, _) => Accessibility::Internal,
            (_, _, _, true) => Accessibility::Private,
            _ => default,
        }
    }

    /// Visible outside the declaring assembly's private surface.
    pub fn is_public_or_internal(self) -> bool {
        matches!(self, Accessibility::Public | Accessibility::Internal)
    }
}

/// Where a symbol comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolOrigin {
    Source(FileId),
    /// Framework reference surface: no declaration syntax is available.
    Metadata,
}

/// A reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(SymbolId),
    Array(Box<TypeRef>),
    Nullable(Box<TypeRef>),
    /// A type whose name could not be resolved, kept by its source text.
    Unresolved(SmolStr),
    /// No type information (untyped lambda parameters, `var` before inference).
    Unknown,
}

impl TypeRef {
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            TypeRef::Named(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TypeRef::Unknown | TypeRef::Unresolved(_))
    }
}

/// A fully qualified name: namespace, simple name and generic arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace: SmolStr,
    /// Enclosing type names for nested types, outermost first.
    pub containers: Vec<SmolStr>,
    pub name: SmolStr,
    pub arity: u32,
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}.", self.namespace)?;
        }
        for container in &self.containers {
            write!(f, "{}.", container)?;
        }
        write!(f, "{}", self.name)?;
        if self.arity > 0 {
            write!(f, "`{}", self.arity)?;
        }
        Ok(())
    }
}

/// A stable pointer to a syntax node: file, kind and range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePtr {
    pub file: FileId,
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl NodePtr {
    pub fn new(file: FileId, node: &SyntaxNode) -> Self {
        Self {
            file,
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    /// Find the node this pointer refers to under `root`.
    pub fn to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if !root.text_range().contains_range(self.range) {
            return None;
        }
        let start = match root.covering_element(self.range) {
            rowan::NodeOrToken::Node(node) => node,
            rowan::NodeOrToken::Token(token) => token.parent()?,
        };
        start
            .ancestors()
            .find(|n| n.kind() == self.kind && n.text_range() == self.range)
    }
}

/// A declared entity: type, member, parameter or local.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Namespace of the outermost containing type (dotted, empty for global).
    pub namespace: SmolStr,
    pub containing_type: Option<SymbolId>,
    /// Generic arity for types and methods.
    pub arity: u32,
    /// Field/property/parameter/local type, method or delegate return type.
    pub ty: TypeRef,
    /// Parameters of methods, constructors and delegates.
    pub parameters: Vec<SymbolId>,
    /// Class base type.
    pub base_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    /// Members of a type, in declaration order.
    pub members: Vec<SymbolId>,
    pub is_static: bool,
    /// `readonly` or `const` fields.
    pub is_readonly: bool,
    /// `const` fields and locals, whose initializer is a compile-time constant.
    pub is_const: bool,
    /// Properties: whether a getter / setter is declared.
    pub has_getter: bool,
    pub has_setter: bool,
    /// Parameters: an optional value is declared.
    pub has_default: bool,
    pub accessibility: Accessibility,
    pub declaration: Option<NodePtr>,
    pub origin: SymbolOrigin,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, origin: SymbolOrigin) -> Self {
        Self {
            name: name.into(),
            kind,
            namespace: SmolStr::default(),
            containing_type: None,
            arity: 0,
            ty: TypeRef::Unknown,
            parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            is_static: false,
            is_readonly: false,
            is_const: false,
            has_getter: false,
            has_setter: false,
            has_default: false,
            accessibility: Accessibility::Private,
            declaration: None,
            origin,
        }
    }

    pub fn is_metadata(&self) -> bool {
        self.origin == SymbolOrigin::Metadata
    }
}

/// A parameter as seen by a resolved call.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    pub symbol: SymbolId,
    pub name: SmolStr,
    pub ty: TypeRef,
    pub has_default: bool,
}

/// The overload-resolved target of an invocation or object creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub method: SymbolId,
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub containing_type: Option<SymbolId>,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: TypeRef,
    pub is_static: bool,
}

impl MethodSignature {
    pub fn parameter_named(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }
}
