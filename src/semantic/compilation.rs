//! The symbol table for one analysis pass.
//!
//! A [`Compilation`] is built from parsed files plus the bundled framework
//! declarations in three passes:
//!
//! 1. **Types** - every class/struct/interface/enum/delegate is declared and
//!    indexed by `(namespace, name, arity)`.
//! 2. **Members** - base lists, fields, properties, methods, constructors and
//!    parameters are declared with resolved types.
//! 3. **Bodies** - locals and lambda parameters inside member bodies.
//!
//! Once built the compilation is immutable and `Send + Sync`; binders for
//! individual files borrow it.

use indexmap::IndexMap;
use rowan::GreenNode;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::debug;

use super::framework::FRAMEWORK_SOURCE;
use super::symbols::{
    Accessibility, NodePtr, QualifiedName, Symbol, SymbolId, SymbolKind, SymbolOrigin, TypeRef,
};
use crate::base::FileId;
use crate::parser::{
    AstNode, ConstructorDecl, DelegateDecl, EnumDecl, FieldDecl, LocalDeclStmt, MethodDecl,
    NamespaceDecl, Param, PropertyDecl, SyntaxKind, SyntaxNode, Type, TypeDecl, UsingDirective,
};

/// Guard against cyclic base lists in malformed code.
const MAX_BASE_DEPTH: usize = 64;

/// `(namespace, name, arity)` of a top-level type.
type TypeKey = (SmolStr, SmolStr, u32);

/// Name-lookup context at a syntax position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Dotted namespace the position is in (empty for global).
    pub namespace: String,
    /// Namespaces imported with `using`.
    pub usings: Vec<String>,
    /// `using Alias = Some.Namespace.Or.Type;`
    pub aliases: Vec<(String, Vec<String>)>,
    pub containing_type: Option<SymbolId>,
}

impl Scope {
    /// The current namespace followed by each enclosing namespace, ending with global.
    pub fn namespace_chain(&self) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = self.namespace.clone();
        loop {
            chain.push(current.clone());
            match current.rfind('.') {
                Some(dot) => current.truncate(dot),
                None if !current.is_empty() => current.clear(),
                None => break,
            }
        }
        chain
    }

    fn alias(&self, name: &str) -> Option<&Vec<String>> {
        self.aliases
            .iter()
            .find(|(alias, _)| alias == name)
            .map(|(_, target)| target)
    }
}

fn join_namespace(outer: &str, inner: &str) -> String {
    match (outer.is_empty(), inner.is_empty()) {
        (true, _) => inner.to_string(),
        (_, true) => outer.to_string(),
        _ => format!("{}.{}", outer, inner),
    }
}

/// Keyword for a predefined type mapped to its `System` type name.
fn predefined_type_name(keyword: &str) -> Option<&'static str> {
    let name = match keyword {
        "bool" => "Boolean",
        "byte" => "Byte",
        "sbyte" => "SByte",
        "char" => "Char",
        "decimal" => "Decimal",
        "double" => "Double",
        "float" => "Single",
        "int" => "Int32",
        "uint" => "UInt32",
        "long" => "Int64",
        "ulong" => "UInt64",
        "short" => "Int16",
        "ushort" => "UInt16",
        "object" => "Object",
        "string" => "String",
        "void" => "Void",
        _ => return None,
    };
    Some(name)
}

/// Keyword spelling used when displaying a `System` type.
fn keyword_for_system_type(name: &str) -> Option<&'static str> {
    let keyword = match name {
        "Boolean" => "bool",
        "Byte" => "byte",
        "SByte" => "sbyte",
        "Char" => "char",
        "Decimal" => "decimal",
        "Double" => "double",
        "Single" => "float",
        "Int32" => "int",
        "UInt32" => "uint",
        "Int64" => "long",
        "UInt64" => "ulong",
        "Int16" => "short",
        "UInt16" => "ushort",
        "Object" => "object",
        "String" => "string",
        "Void" => "void",
        _ => return None,
    };
    Some(keyword)
}

/// Implicit numeric conversions between `System` types.
fn widens_to(from: &str, to: &str) -> bool {
    let targets: &[&str] = match from {
        "SByte" => &["Int16", "Int32", "Int64", "Single", "Double", "Decimal"],
        "Byte" => &[
            "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64", "Single", "Double", "Decimal",
        ],
        "Int16" => &["Int32", "Int64", "Single", "Double", "Decimal"],
        "UInt16" => &["Int32", "UInt32", "Int64", "UInt64", "Single", "Double", "Decimal"],
        "Int32" => &["Int64", "Single", "Double", "Decimal"],
        "UInt32" => &["Int64", "UInt64", "Single", "Double", "Decimal"],
        "Int64" | "UInt64" => &["Single", "Double", "Decimal"],
        "Char" => &[
            "UInt16", "Int32", "UInt32", "Int64", "UInt64", "Single", "Double", "Decimal",
        ],
        "Single" => &["Double"],
        _ => &[],
    };
    targets.contains(&to)
}

/// Immutable symbol table over a set of parsed files.
#[derive(Debug, Clone)]
pub struct Compilation {
    symbols: Vec<Symbol>,
    files: IndexMap<FileId, GreenNode>,
    types: FxHashMap<TypeKey, SymbolId>,
    namespaces: FxHashSet<SmolStr>,
    declared: FxHashMap<NodePtr, SymbolId>,
    setter_values: FxHashMap<NodePtr, SymbolId>,
}

impl Compilation {
    /// Build a compilation from parsed files. The framework declarations are
    /// always included under [`FileId::FRAMEWORK`].
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (FileId, GreenNode)>,
    {
        let framework = crate::parser::parse(FRAMEWORK_SOURCE);
        if !framework.ok() {
            debug!(
                errors = framework.errors.len(),
                "framework declarations parsed with errors"
            );
        }

        let mut db = Compilation {
            symbols: Vec::new(),
            files: IndexMap::new(),
            types: FxHashMap::default(),
            namespaces: FxHashSet::default(),
            declared: FxHashMap::default(),
            setter_values: FxHashMap::default(),
        };
        db.files.insert(FileId::FRAMEWORK, framework.green);
        for (file, green) in sources {
            if !file.is_framework() {
                db.files.insert(file, green);
            }
        }

        let roots: Vec<(FileId, SyntaxNode)> = db
            .files
            .iter()
            .map(|(file, green)| (*file, SyntaxNode::new_root(green.clone())))
            .collect();

        for (file, root) in &roots {
            db.declare_types(*file, root, "", None);
        }
        for (file, root) in &roots {
            db.declare_members(*file, root);
        }
        db.assign_implicit_bases();
        for (file, root) in &roots {
            if !file.is_framework() {
                db.declare_locals(*file, root);
            }
        }

        debug!(
            files = db.files.len() - 1,
            symbols = db.symbols.len(),
            "built compilation"
        );
        db
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId::new(i), s))
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Files analyzed by this compilation, excluding the framework file.
    pub fn source_files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.keys().copied().filter(|f| !f.is_framework())
    }

    pub fn green(&self, file: FileId) -> Option<&GreenNode> {
        self.files.get(&file)
    }

    /// A fresh root node for a file.
    pub fn root(&self, file: FileId) -> Option<SyntaxNode> {
        self.green(file).map(|g| SyntaxNode::new_root(g.clone()))
    }

    /// Symbol declared by the node at `ptr`.
    pub fn declared_at(&self, ptr: &NodePtr) -> Option<SymbolId> {
        self.declared.get(ptr).copied()
    }

    /// The implicit `value` parameter of a setter accessor.
    pub fn setter_value(&self, accessor: &NodePtr) -> Option<SymbolId> {
        self.setter_values.get(accessor).copied()
    }

    pub fn namespace_exists(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    /// Top-level type by `(namespace, name, arity)`.
    pub fn lookup_type(&self, namespace: &str, name: &str, arity: u32) -> Option<SymbolId> {
        self.types
            .get(&(SmolStr::new(namespace), SmolStr::new(name), arity))
            .copied()
    }

    /// Type by dotted name, e.g. `System.Windows.DependencyProperty`.
    pub fn type_named(&self, qualified: &str) -> Option<SymbolId> {
        match qualified.rfind('.') {
            Some(dot) => self.lookup_type(&qualified[..dot], &qualified[dot + 1..], 0),
            None => self.lookup_type("", qualified, 0),
        }
    }

    /// `System.{name}` as a type reference.
    pub fn system_type(&self, name: &str) -> TypeRef {
        match self.lookup_type("System", name, 0) {
            Some(id) => TypeRef::Named(id),
            None => TypeRef::Unresolved(SmolStr::new(name)),
        }
    }

    pub fn predefined_type(&self, keyword: &str) -> TypeRef {
        match predefined_type_name(keyword) {
            Some(name) => self.system_type(name),
            None => TypeRef::Unresolved(SmolStr::new(keyword)),
        }
    }

    pub fn qualified_name(&self, id: SymbolId) -> QualifiedName {
        let symbol = self.symbol(id);
        let mut containers = Vec::new();
        let mut current = symbol.containing_type;
        let mut depth = 0;
        while let Some(outer) = current {
            let outer_symbol = self.symbol(outer);
            containers.push(outer_symbol.name.clone());
            current = outer_symbol.containing_type;
            depth += 1;
            if depth > MAX_BASE_DEPTH {
                break;
            }
        }
        containers.reverse();
        QualifiedName {
            namespace: symbol.namespace.clone(),
            containers,
            name: symbol.name.clone(),
            arity: symbol.arity,
        }
    }

    // =========================================================================
    // Pass 1: types
    // =========================================================================

    fn origin_for(file: FileId) -> SymbolOrigin {
        if file.is_framework() {
            SymbolOrigin::Metadata
        } else {
            SymbolOrigin::Source(file)
        }
    }

    fn push_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::new(self.symbols.len());
        self.symbols.push(symbol);
        id
    }

    fn register_namespace(&mut self, namespace: &str) {
        let mut current = namespace;
        while !current.is_empty() {
            self.namespaces.insert(SmolStr::new(current));
            current = match current.rfind('.') {
                Some(dot) => &current[..dot],
                None => "",
            };
        }
    }

    fn declare_types(
        &mut self,
        file: FileId,
        node: &SyntaxNode,
        namespace: &str,
        containing: Option<SymbolId>,
    ) {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::NAMESPACE_DECL => {
                    let inner = NamespaceDecl::cast(child.clone())
                        .and_then(|ns| ns.name())
                        .map(|name| name.to_string())
                        .unwrap_or_default();
                    let full = join_namespace(namespace, &inner);
                    self.register_namespace(&full);
                    self.declare_types(file, &child, &full, None);
                }
                SyntaxKind::CLASS_DECL
                | SyntaxKind::STRUCT_DECL
                | SyntaxKind::INTERFACE_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::DELEGATE_DECL => {
                    let Some(id) = self.declare_type(file, &child, namespace, containing) else {
                        continue;
                    };
                    for list in child
                        .children()
                        .filter(|n| n.kind() == SyntaxKind::MEMBER_LIST)
                    {
                        self.declare_types(file, &list, namespace, Some(id));
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_type(
        &mut self,
        file: FileId,
        node: &SyntaxNode,
        namespace: &str,
        containing: Option<SymbolId>,
    ) -> Option<SymbolId> {
        let (kind, name, arity, modifiers) = match node.kind() {
            SyntaxKind::CLASS_DECL | SyntaxKind::STRUCT_DECL | SyntaxKind::INTERFACE_DECL => {
                let decl = TypeDecl::cast(node.clone())?;
                let kind = match node.kind() {
                    SyntaxKind::CLASS_DECL => SymbolKind::Class,
                    SyntaxKind::STRUCT_DECL => SymbolKind::Struct,
                    _ => SymbolKind::Interface,
                };
                (kind, decl.name()?.text()?, decl.arity(), decl.modifiers())
            }
            SyntaxKind::ENUM_DECL => {
                let decl = EnumDecl::cast(node.clone())?;
                (SymbolKind::Enum, decl.name()?.text()?, 0, decl.modifiers())
            }
            SyntaxKind::DELEGATE_DECL => {
                let decl = DelegateDecl::cast(node.clone())?;
                (SymbolKind::Delegate, decl.name()?.text()?, 0, decl.modifiers())
            }
            _ => return None,
        };
        let ptr = NodePtr::new(file, node);

        // Partial declarations merge into the first part
        let existing = match containing {
            Some(outer) => self
                .symbol(outer)
                .members
                .iter()
                .copied()
                .find(|m| {
                    let s = self.symbol(*m);
                    s.kind == kind && s.name == name && s.arity == arity
                }),
            None => self.lookup_type(namespace, &name, arity),
        };
        if let Some(id) = existing {
            if self.symbol(id).kind == kind {
                self.declared.insert(ptr, id);
                return Some(id);
            }
        }

        let default_access = if containing.is_some() {
            Accessibility::Private
        } else {
            Accessibility::Internal
        };
        let mut symbol = Symbol::new(name.as_str(), kind, Self::origin_for(file));
        symbol.namespace = SmolStr::new(namespace);
        symbol.containing_type = containing;
        symbol.arity = arity;
        symbol.is_static = modifiers.contains(&SyntaxKind::STATIC_KW);
        symbol.accessibility = Accessibility::from_modifiers(&modifiers, default_access);
        if !file.is_framework() {
            symbol.declaration = Some(ptr);
        }
        let id = self.push_symbol(symbol);
        self.declared.insert(ptr, id);

        match containing {
            Some(outer) => self.symbols[outer.index()].members.push(id),
            None => {
                self.types
                    .insert((SmolStr::new(namespace), SmolStr::new(&name), arity), id);
            }
        }
        Some(id)
    }

    // =========================================================================
    // Pass 2: members
    // =========================================================================

    fn declare_members(&mut self, file: FileId, root: &SyntaxNode) {
        for node in root.descendants() {
            match node.kind() {
                SyntaxKind::CLASS_DECL | SyntaxKind::STRUCT_DECL | SyntaxKind::INTERFACE_DECL => {
                    if let Some(decl) = TypeDecl::cast(node) {
                        self.declare_type_members(file, &decl);
                    }
                }
                SyntaxKind::ENUM_DECL => {
                    if let Some(decl) = EnumDecl::cast(node) {
                        self.declare_enum_members(file, &decl);
                    }
                }
                SyntaxKind::DELEGATE_DECL => {
                    if let Some(decl) = DelegateDecl::cast(node) {
                        self.declare_delegate_signature(file, &decl);
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_type_members(&mut self, file: FileId, decl: &TypeDecl) {
        let Some(id) = self.declared_at(&NodePtr::new(file, decl.syntax())) else {
            return;
        };
        let outer_scope = match decl.syntax().parent() {
            Some(parent) => self.scope_at(file, &parent),
            None => Scope::default(),
        };
        let mut interfaces = Vec::new();
        let mut base = None;
        for base_type in decl.base_types() {
            let resolved = self.resolve_type_syntax(&outer_scope, &base_type);
            let is_class = resolved
                .symbol()
                .is_some_and(|b| self.symbol(b).kind == SymbolKind::Class);
            if is_class && base.is_none() && decl.kind() == SyntaxKind::CLASS_DECL {
                base = Some(resolved);
            } else {
                interfaces.push(resolved);
            }
        }
        {
            let symbol = &mut self.symbols[id.index()];
            if base.is_some() {
                symbol.base_type = base;
            }
            symbol.interfaces.extend(interfaces);
        }

        let scope = self.scope_at(file, decl.syntax());
        let member_default = if decl.kind() == SyntaxKind::INTERFACE_DECL {
            Accessibility::Public
        } else {
            Accessibility::Private
        };
        for member in decl
            .syntax()
            .children()
            .filter(|n| n.kind() == SyntaxKind::MEMBER_LIST)
            .flat_map(|list| list.children().collect::<Vec<_>>())
        {
            match member.kind() {
                SyntaxKind::FIELD_DECL => {
                    if let Some(field) = FieldDecl::cast(member) {
                        self.declare_field(file, id, &scope, &field, member_default);
                    }
                }
                SyntaxKind::PROPERTY_DECL => {
                    if let Some(property) = PropertyDecl::cast(member) {
                        self.declare_property(file, id, &scope, &property, member_default);
                    }
                }
                SyntaxKind::METHOD_DECL => {
                    if let Some(method) = MethodDecl::cast(member) {
                        self.declare_method(file, id, &scope, &method, member_default);
                    }
                }
                SyntaxKind::CONSTRUCTOR_DECL => {
                    if let Some(ctor) = ConstructorDecl::cast(member) {
                        self.declare_constructor(file, id, &scope, &ctor);
                    }
                }
                _ => {}
            }
        }
    }

    fn new_member(
        &self,
        file: FileId,
        owner: SymbolId,
        name: &str,
        kind: SymbolKind,
        node: &SyntaxNode,
    ) -> Symbol {
        let mut symbol = Symbol::new(name, kind, Self::origin_for(file));
        symbol.namespace = self.symbol(owner).namespace.clone();
        symbol.containing_type = Some(owner);
        if !file.is_framework() {
            symbol.declaration = Some(NodePtr::new(file, node));
        }
        symbol
    }

    fn add_member(&mut self, owner: SymbolId, ptr: NodePtr, symbol: Symbol) -> SymbolId {
        let id = self.push_symbol(symbol);
        self.declared.insert(ptr, id);
        self.symbols[owner.index()].members.push(id);
        id
    }

    fn declare_field(
        &mut self,
        file: FileId,
        owner: SymbolId,
        scope: &Scope,
        field: &FieldDecl,
        default_access: Accessibility,
    ) {
        let ty = field
            .ty()
            .map(|t| self.resolve_type_syntax(scope, &t))
            .unwrap_or(TypeRef::Unknown);
        let modifiers = field.modifiers();
        let is_const = field.is_const();
        let mut first = None;
        for declarator in field.declarators() {
            let Some(name) = declarator.name().and_then(|n| n.text()) else {
                continue;
            };
            let mut symbol =
                self.new_member(file, owner, &name, SymbolKind::Field, declarator.syntax());
            symbol.ty = ty.clone();
            symbol.is_static = field.is_static() || is_const;
            symbol.is_readonly = field.is_readonly() || is_const;
            symbol.is_const = is_const;
            symbol.accessibility = Accessibility::from_modifiers(&modifiers, default_access);
            let id = self.add_member(owner, NodePtr::new(file, declarator.syntax()), symbol);
            first.get_or_insert(id);
        }
        if let Some(id) = first {
            self.declared.insert(NodePtr::new(file, field.syntax()), id);
        }
    }

    fn declare_property(
        &mut self,
        file: FileId,
        owner: SymbolId,
        scope: &Scope,
        property: &PropertyDecl,
        default_access: Accessibility,
    ) {
        let Some(name) = property.name().and_then(|n| n.text()) else {
            return;
        };
        let ty = property
            .ty()
            .map(|t| self.resolve_type_syntax(scope, &t))
            .unwrap_or(TypeRef::Unknown);
        let mut symbol =
            self.new_member(file, owner, &name, SymbolKind::Property, property.syntax());
        symbol.ty = ty.clone();
        symbol.is_static = property.is_static();
        symbol.accessibility = Accessibility::from_modifiers(&property.modifiers(), default_access);
        symbol.has_getter = property.expression_body().is_some() || property.getter().is_some();
        symbol.has_setter = property.setter().is_some();
        self.add_member(owner, NodePtr::new(file, property.syntax()), symbol);

        if let Some(setter) = property.setter() {
            let mut value = Symbol::new("value", SymbolKind::Parameter, Self::origin_for(file));
            value.namespace = self.symbol(owner).namespace.clone();
            value.containing_type = Some(owner);
            value.ty = ty;
            let id = self.push_symbol(value);
            self.setter_values
                .insert(NodePtr::new(file, setter.syntax()), id);
        }
    }

    fn declare_params(&mut self, file: FileId, scope: &Scope, params: &[Param]) -> Vec<SymbolId> {
        let mut ids = Vec::with_capacity(params.len());
        for param in params {
            let name = param.name().and_then(|n| n.text()).unwrap_or_default();
            let mut symbol = Symbol::new(name.as_str(), SymbolKind::Parameter, Self::origin_for(file));
            symbol.ty = param
                .ty()
                .map(|t| self.resolve_type_syntax(scope, &t))
                .unwrap_or(TypeRef::Unknown);
            symbol.has_default = param.default_value().is_some();
            symbol.containing_type = scope.containing_type;
            if !file.is_framework() {
                symbol.declaration = Some(NodePtr::new(file, param.syntax()));
            }
            let id = self.push_symbol(symbol);
            self.declared.insert(NodePtr::new(file, param.syntax()), id);
            ids.push(id);
        }
        ids
    }

    fn declare_method(
        &mut self,
        file: FileId,
        owner: SymbolId,
        scope: &Scope,
        method: &MethodDecl,
        default_access: Accessibility,
    ) {
        let Some(name) = method.name().and_then(|n| n.text()) else {
            return;
        };
        let parameters = self.declare_params(file, scope, &method.params());
        let mut symbol = self.new_member(file, owner, &name, SymbolKind::Method, method.syntax());
        symbol.ty = method
            .return_type()
            .map(|t| self.resolve_type_syntax(scope, &t))
            .unwrap_or(TypeRef::Unknown);
        symbol.arity = method.arity();
        symbol.parameters = parameters;
        symbol.is_static = method.is_static();
        symbol.accessibility = Accessibility::from_modifiers(&method.modifiers(), default_access);
        self.add_member(owner, NodePtr::new(file, method.syntax()), symbol);
    }

    fn declare_constructor(
        &mut self,
        file: FileId,
        owner: SymbolId,
        scope: &Scope,
        ctor: &ConstructorDecl,
    ) {
        let parameters = self.declare_params(file, scope, &ctor.params());
        let name = self.symbol(owner).name.clone();
        let mut symbol =
            self.new_member(file, owner, &name, SymbolKind::Constructor, ctor.syntax());
        symbol.ty = TypeRef::Named(owner);
        symbol.parameters = parameters;
        symbol.is_static = ctor.is_static();
        symbol.accessibility =
            Accessibility::from_modifiers(&ctor.modifiers(), Accessibility::Private);
        self.add_member(owner, NodePtr::new(file, ctor.syntax()), symbol);
    }

    fn declare_enum_members(&mut self, file: FileId, decl: &EnumDecl) {
        let Some(id) = self.declared_at(&NodePtr::new(file, decl.syntax())) else {
            return;
        };
        for variant in decl.variants() {
            let Some(name) = variant.name().and_then(|n| n.text()) else {
                continue;
            };
            let mut symbol = self.new_member(file, id, &name, SymbolKind::Field, variant.syntax());
            symbol.ty = TypeRef::Named(id);
            symbol.is_static = true;
            symbol.is_readonly = true;
            symbol.is_const = true;
            symbol.accessibility = Accessibility::Public;
            self.add_member(id, NodePtr::new(file, variant.syntax()), symbol);
        }
    }

    fn declare_delegate_signature(&mut self, file: FileId, decl: &DelegateDecl) {
        let Some(id) = self.declared_at(&NodePtr::new(file, decl.syntax())) else {
            return;
        };
        let scope = self.scope_at(file, decl.syntax());
        let params: Vec<Param> = decl
            .param_list()
            .map(|list| list.params().collect())
            .unwrap_or_default();
        let parameters = self.declare_params(file, &scope, &params);
        let ty = decl
            .return_type()
            .map(|t| self.resolve_type_syntax(&scope, &t))
            .unwrap_or(TypeRef::Unknown);
        let symbol = &mut self.symbols[id.index()];
        symbol.parameters = parameters;
        symbol.ty = ty;
    }

    fn assign_implicit_bases(&mut self) {
        let object = self.lookup_type("System", "Object", 0);
        let value_type = self.lookup_type("System", "ValueType", 0);
        let enum_type = self.lookup_type("System", "Enum", 0);
        let multicast = self.lookup_type("System", "MulticastDelegate", 0);
        for i in 0..self.symbols.len() {
            let id = SymbolId::new(i);
            let symbol = &self.symbols[i];
            if symbol.base_type.is_some() {
                continue;
            }
            let base = match symbol.kind {
                SymbolKind::Class if Some(id) != object => object,
                SymbolKind::Struct => value_type,
                SymbolKind::Enum => enum_type,
                SymbolKind::Delegate => multicast,
                _ => None,
            };
            if let Some(base) = base {
                self.symbols[i].base_type = Some(TypeRef::Named(base));
            }
        }
    }

    // =========================================================================
    // Pass 3: locals and lambda parameters
    // =========================================================================

    fn declare_locals(&mut self, file: FileId, root: &SyntaxNode) {
        for node in root.descendants() {
            match node.kind() {
                SyntaxKind::VARIABLE_DECLARATOR => {
                    let Some(stmt) = node.parent().and_then(LocalDeclStmt::cast) else {
                        continue;
                    };
                    let Some(name) = node
                        .children()
                        .find(|n| n.kind() == SyntaxKind::NAME)
                        .and_then(crate::parser::Name::cast)
                        .and_then(|n| n.text())
                    else {
                        continue;
                    };
                    let scope = self.scope_at(file, &node);
                    let mut symbol = Symbol::new(name.as_str(), SymbolKind::Local, Self::origin_for(file));
                    symbol.ty = stmt
                        .ty()
                        .map(|t| self.resolve_type_syntax(&scope, &t))
                        .unwrap_or(TypeRef::Unknown);
                    symbol.is_readonly = stmt.is_const();
                    symbol.is_const = stmt.is_const();
                    symbol.containing_type = scope.containing_type;
                    symbol.declaration = Some(NodePtr::new(file, &node));
                    let id = self.push_symbol(symbol);
                    self.declared.insert(NodePtr::new(file, &node), id);
                }
                SyntaxKind::PARAM => {
                    let in_lambda = node
                        .parent()
                        .and_then(|list| list.parent())
                        .is_some_and(|p| p.kind() == SyntaxKind::LAMBDA_EXPR);
                    if !in_lambda {
                        continue;
                    }
                    let Some(param) = Param::cast(node) else {
                        continue;
                    };
                    let scope = self.scope_at(file, param.syntax());
                    self.declare_params(file, &scope, std::slice::from_ref(&param));
                }
                _ => {}
            }
        }
    }

    // =========================================================================
    // Scopes and type lookup
    // =========================================================================

    /// The lookup context for a node: namespace, usings and containing type.
    pub fn scope_at(&self, file: FileId, node: &SyntaxNode) -> Scope {
        let mut scope = Scope::default();
        let mut namespace_parts: Vec<String> = Vec::new();
        for ancestor in node.ancestors() {
            match ancestor.kind() {
                SyntaxKind::CLASS_DECL
                | SyntaxKind::STRUCT_DECL
                | SyntaxKind::INTERFACE_DECL
                | SyntaxKind::ENUM_DECL
                    if scope.containing_type.is_none() =>
                {
                    scope.containing_type = self.declared_at(&NodePtr::new(file, &ancestor));
                }
                SyntaxKind::NAMESPACE_DECL => {
                    if let Some(name) = NamespaceDecl::cast(ancestor.clone()).and_then(|n| n.name())
                    {
                        let mut segments = name.segments();
                        segments.extend(namespace_parts.drain(..));
                        namespace_parts = segments;
                    }
                    Self::collect_usings(&ancestor, &mut scope);
                }
                SyntaxKind::SOURCE_FILE => Self::collect_usings(&ancestor, &mut scope),
                _ => {}
            }
        }
        scope.namespace = namespace_parts.join(".");
        scope
    }

    fn collect_usings(node: &SyntaxNode, scope: &mut Scope) {
        for using in node.children().filter_map(UsingDirective::cast) {
            if using.is_static() {
                continue;
            }
            let Some(target) = using.target() else {
                continue;
            };
            match using.alias().and_then(|a| a.text()) {
                Some(alias) => scope.aliases.push((alias, target.segments())),
                None => scope.usings.push(target.to_string()),
            }
        }
    }

    /// Nested type of `container` (or one of its bases).
    pub fn nested_type(&self, container: SymbolId, name: &str, arity: u32) -> Option<SymbolId> {
        self.base_chain(container).find_map(|ty| {
            self.symbol(ty).members.iter().copied().find(|m| {
                let s = self.symbol(*m);
                s.kind.is_type() && s.name == name && s.arity == arity
            })
        })
    }

    fn resolve_simple_type(&self, scope: &Scope, name: &str, arity: u32) -> Option<SymbolId> {
        let mut current = scope.containing_type;
        let mut depth = 0;
        while let Some(ty) = current {
            if let Some(nested) = self.nested_type(ty, name, arity) {
                return Some(nested);
            }
            current = self.symbol(ty).containing_type;
            depth += 1;
            if depth > MAX_BASE_DEPTH {
                break;
            }
        }
        for namespace in scope.namespace_chain() {
            if let Some(id) = self.lookup_type(&namespace, name, arity) {
                return Some(id);
            }
        }
        if let Some(target) = scope.alias(name) {
            return self.resolve_absolute(target, arity);
        }
        scope
            .usings
            .iter()
            .find_map(|using| self.lookup_type(using, name, arity))
    }

    fn resolve_absolute(&self, segments: &[String], arity: u32) -> Option<SymbolId> {
        let (last, prefix) = segments.split_last()?;
        if let Some(id) = self.lookup_type(&prefix.join("."), last, arity) {
            return Some(id);
        }
        // Nested type below a namespace-qualified type
        let container = self.resolve_absolute(prefix, 0)?;
        self.nested_type(container, last, arity)
    }

    fn resolve_nested_path(&self, start: SymbolId, rest: &[String], arity: u32) -> Option<SymbolId> {
        let mut ty = start;
        for (i, segment) in rest.iter().enumerate() {
            let segment_arity = if i + 1 == rest.len() { arity } else { 0 };
            ty = self.nested_type(ty, segment, segment_arity)?;
        }
        Some(ty)
    }

    /// Resolve a possibly dotted type name in a scope.
    pub fn resolve_type_name(&self, scope: &Scope, segments: &[String], arity: u32) -> Option<SymbolId> {
        let (first, rest) = segments.split_first()?;
        if rest.is_empty() {
            return self.resolve_simple_type(scope, first, arity);
        }
        if let Some(target) = scope.alias(first) {
            let full: Vec<String> = target.iter().chain(rest.iter()).cloned().collect();
            if let Some(id) = self.resolve_absolute(&full, arity) {
                return Some(id);
            }
        }
        if let Some(start) = self.resolve_simple_type(scope, first, 0) {
            if let Some(id) = self.resolve_nested_path(start, rest, arity) {
                return Some(id);
            }
        }
        let (last, prefix) = segments.split_last()?;
        let relative = prefix.join(".");
        scope
            .namespace_chain()
            .iter()
            .find_map(|base| self.lookup_type(&join_namespace(base, &relative), last, arity))
    }

    /// Resolve a type reference written in source.
    pub fn resolve_type_syntax(&self, scope: &Scope, ty: &Type) -> TypeRef {
        let mut resolved = match ty.predefined() {
            Some(keyword) => self.predefined_type(keyword.text()),
            None => {
                let segments = ty.segments();
                let arity = ty.type_args().count() as u32;
                match self.resolve_type_name(scope, &segments, arity) {
                    Some(id) => TypeRef::Named(id),
                    None if arity == 0 && segments.len() == 1 && segments[0] == "var" => {
                        return TypeRef::Unknown;
                    }
                    None if arity == 0 && segments.len() == 1 && segments[0] == "dynamic" => {
                        self.system_type("Object")
                    }
                    None => TypeRef::Unresolved(SmolStr::new(ty.text())),
                }
            }
        };
        if ty.is_nullable() && self.is_value_type(&resolved) {
            resolved = TypeRef::Nullable(Box::new(resolved));
        }
        for _ in 0..ty.array_rank() {
            resolved = TypeRef::Array(Box::new(resolved));
        }
        resolved
    }

    // =========================================================================
    // Type relations
    // =========================================================================

    /// The type itself followed by its base classes.
    pub fn base_chain(&self, ty: SymbolId) -> impl Iterator<Item = SymbolId> + '_ {
        let mut next = Some(ty);
        let mut depth = 0;
        std::iter::from_fn(move || {
            let current = next?;
            depth += 1;
            next = if depth > MAX_BASE_DEPTH {
                None
            } else {
                self.symbol(current)
                    .base_type
                    .as_ref()
                    .and_then(|b| b.symbol())
            };
            Some(current)
        })
    }

    pub fn derives_from(&self, ty: SymbolId, base: SymbolId) -> bool {
        self.base_chain(ty).any(|t| t == base)
    }

    fn implements(&self, ty: SymbolId, interface: SymbolId, depth: usize) -> bool {
        if depth > MAX_BASE_DEPTH {
            return false;
        }
        self.base_chain(ty).any(|t| {
            self.symbol(t).interfaces.iter().any(|i| match i.symbol() {
                Some(id) => id == interface || self.implements(id, interface, depth + 1),
                None => false,
            })
        })
    }

    /// Members named `name` on `ty` and its base classes, most derived first.
    pub fn find_members(&self, ty: SymbolId, name: &str) -> Vec<SymbolId> {
        self.base_chain(ty)
            .flat_map(|t| {
                self.symbol(t)
                    .members
                    .iter()
                    .copied()
                    .filter(|m| self.symbol(*m).name == name)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn is_value_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named(id) => self.symbol(*id).kind.is_value_type(),
            TypeRef::Nullable(_) => true,
            _ => false,
        }
    }

    /// `null` converts to the type.
    pub fn accepts_null(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named(id) => !self.symbol(*id).kind.is_value_type(),
            _ => true,
        }
    }

    fn is_system(&self, ty: &TypeRef, name: &str) -> bool {
        match ty {
            TypeRef::Named(id) => {
                let symbol = self.symbol(*id);
                symbol.namespace == "System" && symbol.name == name && symbol.containing_type.is_none()
            }
            _ => false,
        }
    }

    pub fn is_object(&self, ty: &TypeRef) -> bool {
        self.is_system(ty, "Object")
    }

    pub fn is_void(&self, ty: &TypeRef) -> bool {
        self.is_system(ty, "Void")
    }

    /// Structural equality by qualified identity.
    pub fn types_equal(&self, a: &TypeRef, b: &TypeRef) -> bool {
        match (a, b) {
            (TypeRef::Named(x), TypeRef::Named(y)) => {
                x == y || self.qualified_name(*x) == self.qualified_name(*y)
            }
            (TypeRef::Array(x), TypeRef::Array(y)) | (TypeRef::Nullable(x), TypeRef::Nullable(y)) => {
                self.types_equal(x, y)
            }
            (TypeRef::Unresolved(x), TypeRef::Unresolved(y)) => x == y,
            _ => false,
        }
    }

    /// Identity, reference and boxing conversions. Types without information
    /// are never provably incompatible.
    pub fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        if !from.is_known() || !to.is_known() || self.types_equal(from, to) || self.is_object(to) {
            return true;
        }
        match (from, to) {
            (TypeRef::Named(a), TypeRef::Named(b)) => {
                self.derives_from(*a, *b) || self.implements(*a, *b, 0)
            }
            (inner, TypeRef::Nullable(target)) => match inner {
                TypeRef::Nullable(source) => self.types_equal(source, target),
                other => self.is_assignable(other, target),
            },
            (TypeRef::Nullable(inner), TypeRef::Named(_)) => self.is_assignable(inner, to),
            (TypeRef::Array(x), TypeRef::Array(y)) => {
                self.types_equal(x, y) || (self.accepts_null(x) && self.is_assignable(x, y))
            }
            (TypeRef::Array(_), TypeRef::Named(_)) => self.is_system(to, "Array"),
            _ => false,
        }
    }

    /// [`Self::is_assignable`] plus implicit numeric conversions.
    pub fn is_implicitly_convertible(&self, from: &TypeRef, to: &TypeRef) -> bool {
        if self.is_assignable(from, to) {
            return true;
        }
        let target = match to {
            TypeRef::Nullable(inner) => inner.as_ref(),
            other => other,
        };
        match (from, target) {
            (TypeRef::Named(a), TypeRef::Named(b)) => {
                let (a, b) = (self.symbol(*a), self.symbol(*b));
                a.namespace == "System" && b.namespace == "System" && widens_to(&a.name, &b.name)
            }
            _ => false,
        }
    }

    /// Parameter types and return type of a delegate type.
    pub fn delegate_signature(&self, ty: &TypeRef) -> Option<(Vec<TypeRef>, TypeRef)> {
        let id = ty.symbol()?;
        let symbol = self.symbol(id);
        if symbol.kind != SymbolKind::Delegate {
            return None;
        }
        let params = symbol
            .parameters
            .iter()
            .map(|p| self.symbol(*p).ty.clone())
            .collect();
        Some((params, symbol.ty.clone()))
    }

    /// Source-like display of a type: keywords for predefined types.
    pub fn type_display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named(id) => {
                let symbol = self.symbol(*id);
                if symbol.namespace == "System" && symbol.containing_type.is_none() {
                    if let Some(keyword) = keyword_for_system_type(&symbol.name) {
                        return keyword.to_string();
                    }
                }
                symbol.name.to_string()
            }
            TypeRef::Array(inner) => format!("{}[]", self.type_display(inner)),
            TypeRef::Nullable(inner) => format!("{}?", self.type_display(inner)),
            TypeRef::Unresolved(text) => text.to_string(),
            TypeRef::Unknown => "?".to_string(),
        }
    }
}
