use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(usings, UsingDirective);
    children_method!(members, Member);
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    /// The identifier token of this name.
    pub fn ident(&self) -> Option<SyntaxToken> {
        find_token(&self.0, SyntaxKind::IDENT)
    }

    /// Name text without the verbatim `@` marker.
    pub fn text(&self) -> Option<String> {
        self.ident().map(|t| identifier_text(&t))
    }
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    /// Get the dotted segments, e.g. `["System", "Windows"]`.
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| identifier_text(&t))
            .collect()
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments().join("."))
    }
}

ast_node!(Type, TYPE);

impl Type {
    /// The keyword of a predefined type like `int` or `object`.
    pub fn predefined(&self) -> Option<SyntaxToken> {
        find_token(&self.0, SyntaxKind::PREDEFINED_TYPE)
    }

    /// Dotted identifier segments, e.g. `System.Windows.Thickness`.
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .take_while(|t| t.kind() != SyntaxKind::LT)
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| identifier_text(&t))
            .collect()
    }

    children_method!(type_args, Type);
    has_token_method!(is_nullable, QUESTION, "int?");

    /// Number of `[]` suffixes.
    pub fn array_rank(&self) -> usize {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::L_BRACKET)
            .count()
    }

    /// The type as written, without trivia.
    pub fn text(&self) -> String {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .collect()
    }
}

// ============================================================================
// Namespaces and usings
// ============================================================================

ast_node!(UsingDirective, USING_DIRECTIVE);

impl UsingDirective {
    first_child_method!(target, QualifiedName);
    first_child_method!(alias, Name);
    has_token_method!(is_static, STATIC_KW, "using static System.Math;");
}

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    first_child_method!(name, QualifiedName);
    children_method!(usings, UsingDirective);
    children_method!(members, Member);
}

// ============================================================================
// Members
// ============================================================================

/// Any declaration that can appear in a namespace or type body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    Enum(EnumDecl),
    Delegate(DelegateDecl),
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::NAMESPACE_DECL
                | SyntaxKind::CLASS_DECL
                | SyntaxKind::STRUCT_DECL
                | SyntaxKind::INTERFACE_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::DELEGATE_DECL
                | SyntaxKind::FIELD_DECL
                | SyntaxKind::PROPERTY_DECL
                | SyntaxKind::METHOD_DECL
                | SyntaxKind::CONSTRUCTOR_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NAMESPACE_DECL => Some(Self::Namespace(NamespaceDecl(node))),
            SyntaxKind::CLASS_DECL | SyntaxKind::STRUCT_DECL | SyntaxKind::INTERFACE_DECL => {
                Some(Self::Type(TypeDecl(node)))
            }
            SyntaxKind::ENUM_DECL => Some(Self::Enum(EnumDecl(node))),
            SyntaxKind::DELEGATE_DECL => Some(Self::Delegate(DelegateDecl(node))),
            SyntaxKind::FIELD_DECL => Some(Self::Field(FieldDecl(node))),
            SyntaxKind::PROPERTY_DECL => Some(Self::Property(PropertyDecl(node))),
            SyntaxKind::METHOD_DECL => Some(Self::Method(MethodDecl(node))),
            SyntaxKind::CONSTRUCTOR_DECL => Some(Self::Constructor(ConstructorDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Namespace(n) => n.syntax(),
            Self::Type(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
            Self::Delegate(n) => n.syntax(),
            Self::Field(n) => n.syntax(),
            Self::Property(n) => n.syntax(),
            Self::Method(n) => n.syntax(),
            Self::Constructor(n) => n.syntax(),
        }
    }
}

/// Modifier and attribute accessors shared by all member declarations.
macro_rules! member_methods {
    () => {
        has_token_method!(is_static, STATIC_KW, "static");
        has_token_method!(is_readonly, READONLY_KW, "readonly");
        has_token_method!(is_const, CONST_KW, "const");
        has_token_method!(is_public, PUBLIC_KW);
        has_token_method!(is_private, PRIVATE_KW);
        has_token_method!(is_protected, PROTECTED_KW);
        has_token_method!(is_internal, INTERNAL_KW);

        /// Modifier keywords in source order.
        pub fn modifiers(&self) -> Vec<SyntaxKind> {
            self.0
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .map(|t| t.kind())
                .filter(|k| k.is_modifier())
                .collect()
        }

        /// All attributes across every attribute list of this declaration.
        pub fn attributes(&self) -> Vec<Attribute> {
            self.0
                .children()
                .filter_map(AttributeList::cast)
                .flat_map(|list| list.attributes().collect::<Vec<_>>())
                .collect()
        }
    };
}

/// `class`, `struct` or `interface` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDecl(pub(crate) SyntaxNode);

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS_DECL | SyntaxKind::STRUCT_DECL | SyntaxKind::INTERFACE_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl TypeDecl {
    member_methods!();
    first_child_method!(name, Name);
    has_token_method!(is_partial, PARTIAL_KW);

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Number of generic type parameters.
    pub fn arity(&self) -> u32 {
        let mut in_params = false;
        let mut count = 0;
        for token in self.0.children_with_tokens().filter_map(|e| e.into_token()) {
            match token.kind() {
                SyntaxKind::LT => in_params = true,
                SyntaxKind::GT => break,
                SyntaxKind::IDENT if in_params => count += 1,
                _ => {}
            }
        }
        count
    }

    /// Types listed after `:`.
    pub fn base_types(&self) -> Vec<Type> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::BASE_LIST)
            .map(|list| list.children().filter_map(Type::cast).collect())
            .unwrap_or_default()
    }

    /// Declarations in the type body.
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::MEMBER_LIST)
            .flat_map(|list| list.children().filter_map(Member::cast))
    }
}

ast_node!(EnumDecl, ENUM_DECL);

impl EnumDecl {
    member_methods!();
    first_child_method!(name, Name);

    pub fn variants(&self) -> impl Iterator<Item = EnumMember> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::MEMBER_LIST)
            .flat_map(|list| list.children().filter_map(EnumMember::cast))
    }
}

ast_node!(EnumMember, ENUM_MEMBER);

impl EnumMember {
    first_child_method!(name, Name);
}

ast_node!(DelegateDecl, DELEGATE_DECL);

impl DelegateDecl {
    member_methods!();
    first_child_method!(return_type, Type);
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    member_methods!();
    first_child_method!(ty, Type);
    children_method!(declarators, VariableDeclarator);
}

ast_node!(VariableDeclarator, VARIABLE_DECLARATOR);

impl VariableDeclarator {
    first_child_method!(name, Name);

    /// Expression after `=`.
    pub fn initializer(&self) -> Option<Expr> {
        self.0
            .children()
            .find_map(EqualsValue::cast)
            .and_then(|eq| eq.value())
    }
}

ast_node!(EqualsValue, EQUALS_VALUE);

impl EqualsValue {
    first_child_method!(value, Expr);
}

ast_node!(PropertyDecl, PROPERTY_DECL);

impl PropertyDecl {
    member_methods!();
    first_child_method!(ty, Type);
    first_child_method!(name, Name);
    first_child_method!(accessor_list, AccessorList);
    first_child_method!(expression_body, ArrowBody);

    /// Auto-property initializer: `{ get; } = value;`
    pub fn initializer(&self) -> Option<Expr> {
        self.0
            .children()
            .find_map(EqualsValue::cast)
            .and_then(|eq| eq.value())
    }

    pub fn accessors(&self) -> Vec<AccessorDecl> {
        self.accessor_list()
            .map(|list| list.accessors().collect())
            .unwrap_or_default()
    }

    pub fn getter(&self) -> Option<AccessorDecl> {
        self.accessors().into_iter().find(|a| a.is_get())
    }

    pub fn setter(&self) -> Option<AccessorDecl> {
        self.accessors().into_iter().find(|a| a.is_set())
    }

    /// Body of the getter, or the property's own expression body.
    pub fn getter_body(&self) -> Option<Body> {
        match self.expression_body() {
            Some(arrow) => Some(Body::Expr(arrow)),
            None => self.getter().and_then(|g| g.body()),
        }
    }
}

ast_node!(AccessorList, ACCESSOR_LIST);

impl AccessorList {
    children_method!(accessors, AccessorDecl);
}

ast_node!(AccessorDecl, ACCESSOR_DECL);

impl AccessorDecl {
    member_methods!();

    /// `get`, `set`, `init`, `add` or `remove`.
    pub fn keyword(&self) -> Option<SyntaxToken> {
        find_token(&self.0, SyntaxKind::IDENT)
    }

    pub fn is_get(&self) -> bool {
        self.keyword().is_some_and(|t| t.text() == "get")
    }

    pub fn is_set(&self) -> bool {
        self.keyword()
            .is_some_and(|t| t.text() == "set" || t.text() == "init")
    }

    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }
}

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    member_methods!();
    first_child_method!(return_type, Type);
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);

    pub fn params(&self) -> Vec<Param> {
        self.param_list()
            .map(|list| list.params().collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }

    /// Number of generic type parameters.
    pub fn arity(&self) -> u32 {
        let mut in_params = false;
        let mut count = 0;
        for token in self.0.children_with_tokens().filter_map(|e| e.into_token()) {
            match token.kind() {
                SyntaxKind::LT => in_params = true,
                SyntaxKind::GT => break,
                SyntaxKind::IDENT if in_params => count += 1,
                _ => {}
            }
        }
        count
    }
}

ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);

impl ConstructorDecl {
    member_methods!();
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);

    pub fn params(&self) -> Vec<Param> {
        self.param_list()
            .map(|list| list.params().collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    children_method!(params, Param);
}

ast_node!(Param, PARAM);

impl Param {
    first_child_method!(ty, Type);
    first_child_method!(name, Name);
    has_token_method!(is_this, THIS_KW, "this DependencyObject element");

    /// `ref`, `out`, `in` or `params` modifier if present.
    pub fn ref_kind(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
    }

    pub fn default_value(&self) -> Option<Expr> {
        self.0
            .children()
            .find_map(EqualsValue::cast)
            .and_then(|eq| eq.value())
    }
}

ast_node!(ArrowBody, ARROW_BODY);

impl ArrowBody {
    first_child_method!(expr, Expr);
}

// ============================================================================
// Attributes
// ============================================================================

ast_node!(AttributeList, ATTRIBUTE_LIST);

impl AttributeList {
    children_method!(attributes, Attribute);
}

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    first_child_method!(ty, Type);
    first_child_method!(arg_list, ArgList);

    /// Last segment of the attribute name with any `Attribute` suffix removed.
    pub fn short_name(&self) -> Option<String> {
        let name = self.ty()?.segments().pop()?;
        Some(name.strip_suffix("Attribute").map(str::to_string).unwrap_or(name))
    }

    pub fn args(&self) -> Vec<Argument> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }
}
