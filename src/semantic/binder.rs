//! Name binding, expression typing and overload resolution for one file.

use std::cmp::Ordering;

use smol_str::SmolStr;

use super::compilation::{Compilation, Scope};
use super::model::{SemanticModel, argument_index, enclosing_call, map_arguments};
use super::symbols::{
    MethodSignature, NodePtr, ParameterInfo, SymbolId, SymbolKind, TypeRef,
};
use crate::base::FileId;
use crate::parser::{
    Argument, AstNode, Expr, Invocation, LambdaExpr, Literal, LocalDeclStmt, MemberAccess,
    NameRef, ObjectCreation, Param, SyntaxKind, SyntaxNode, Type, VariableDeclarator,
};

/// What a name or member access denotes.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A field, property, event, parameter or local.
    Symbol(SymbolId),
    Type(SymbolId),
    Namespace(String),
    /// Method group with every overload in scope.
    Methods(Vec<SymbolId>),
    /// A computed value.
    Value(TypeRef),
    Unbound,
}

/// How well an argument fits a parameter. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Fit {
    Exact,
    Convertible,
    /// Nothing is known about the argument.
    Lenient,
}

struct Candidate {
    method: SymbolId,
    fits: Vec<(Fit, TypeRef)>,
    parameter_count: usize,
}

/// The [`SemanticModel`] for one file of a [`Compilation`].
#[derive(Clone, Copy)]
pub struct FileSemantics<'db> {
    db: &'db Compilation,
    file: FileId,
}

impl<'db> FileSemantics<'db> {
    pub fn new(db: &'db Compilation, file: FileId) -> Self {
        Self { db, file }
    }

    pub fn root(&self) -> Option<SyntaxNode> {
        self.db.root(self.file)
    }

    pub fn scope_at(&self, node: &SyntaxNode) -> Scope {
        self.db.scope_at(self.file, node)
    }

    // =========================================================================
    // Name binding
    // =========================================================================

    /// Bind a name, member access or parenthesized expression.
    pub fn bind(&self, expr: &Expr) -> Binding {
        match expr {
            Expr::NameRef(name) => self.bind_name_ref(name),
            Expr::MemberAccess(access) => self.bind_member_access(access),
            Expr::Paren(paren) => match paren.expr() {
                Some(inner) => self.bind(&inner),
                None => Binding::Unbound,
            },
            other => Binding::Value(self.type_of(other)),
        }
    }

    fn bind_name_ref(&self, name: &NameRef) -> Binding {
        let Some(token) = name.token() else {
            return Binding::Unbound;
        };
        if token.kind() == SyntaxKind::PREDEFINED_TYPE {
            return match self.db.predefined_type(token.text()) {
                TypeRef::Named(id) => Binding::Type(id),
                _ => Binding::Unbound,
            };
        }
        match name.text() {
            Some(text) => self.lookup_simple_name(name.syntax(), &text),
            None => Binding::Unbound,
        }
    }

    fn bind_member_access(&self, access: &MemberAccess) -> Binding {
        let (Some(receiver), Some(name)) = (access.receiver(), access.name().and_then(|n| n.text()))
        else {
            return Binding::Unbound;
        };
        match self.bind(&receiver) {
            Binding::Namespace(namespace) => {
                if let Some(ty) = self.db.lookup_type(&namespace, &name, 0) {
                    return Binding::Type(ty);
                }
                let nested = format!("{}.{}", namespace, name);
                if self.db.namespace_exists(&nested) {
                    Binding::Namespace(nested)
                } else {
                    Binding::Unbound
                }
            }
            Binding::Type(ty) => self.classify_members(self.db.find_members(ty, &name)),
            Binding::Symbol(id) => self.member_of_value(&self.db.symbol(id).ty.clone(), &name),
            Binding::Value(ty) => self.member_of_value(&ty, &name),
            Binding::Methods(_) | Binding::Unbound => Binding::Unbound,
        }
    }

    fn member_of_value(&self, ty: &TypeRef, name: &str) -> Binding {
        let ty = match ty {
            TypeRef::Nullable(inner) => inner.as_ref(),
            other => other,
        };
        match ty {
            TypeRef::Named(id) => self.classify_members(self.db.find_members(*id, name)),
            TypeRef::Array(_) => match self.db.system_type("Array") {
                TypeRef::Named(id) => self.classify_members(self.db.find_members(id, name)),
                _ => Binding::Unbound,
            },
            _ => Binding::Unbound,
        }
    }

    fn classify_members(&self, members: Vec<SymbolId>) -> Binding {
        let methods: Vec<SymbolId> = members
            .iter()
            .copied()
            .filter(|m| self.db.symbol(*m).kind == SymbolKind::Method)
            .collect();
        if !methods.is_empty() {
            return Binding::Methods(methods);
        }
        match members.first() {
            Some(id) if self.db.symbol(*id).kind.is_type() => Binding::Type(*id),
            Some(id) => Binding::Symbol(*id),
            None => Binding::Unbound,
        }
    }

    /// Locals and parameters, then members of enclosing types, then types
    /// and namespaces.
    fn lookup_simple_name(&self, node: &SyntaxNode, name: &str) -> Binding {
        if let Some(local) = self.lookup_local(node, name) {
            return Binding::Symbol(local);
        }

        let scope = self.scope_at(node);
        let mut current = scope.containing_type;
        let mut depth = 0;
        while let Some(ty) = current {
            let members = self.db.find_members(ty, name);
            if !members.is_empty() {
                return self.classify_members(members);
            }
            current = self.db.symbol(ty).containing_type;
            depth += 1;
            if depth > 32 {
                break;
            }
        }

        let segments = [name.to_string()];
        if let Some(ty) = self.db.resolve_type_name(&scope, &segments, 0) {
            return Binding::Type(ty);
        }
        for namespace in scope.namespace_chain() {
            let candidate = if namespace.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", namespace, name)
            };
            if self.db.namespace_exists(&candidate) {
                return Binding::Namespace(candidate);
            }
        }
        Binding::Unbound
    }

    fn lookup_local(&self, node: &SyntaxNode, name: &str) -> Option<SymbolId> {
        let position = node.text_range().start();
        for ancestor in node.ancestors() {
            match ancestor.kind() {
                SyntaxKind::BLOCK => {
                    let found = ancestor
                        .children()
                        .filter(|s| s.text_range().end() <= position)
                        .filter_map(LocalDeclStmt::cast)
                        .flat_map(|stmt| stmt.declarators().collect::<Vec<_>>())
                        .filter(|d| d.name().and_then(|n| n.text()).as_deref() == Some(name))
                        .last();
                    if let Some(declarator) = found {
                        return self.declared_symbol(declarator.syntax());
                    }
                }
                SyntaxKind::LAMBDA_EXPR => {
                    let lambda = LambdaExpr::cast(ancestor.clone())?;
                    if let Some(id) = self.param_named(&lambda.params(), name) {
                        return Some(id);
                    }
                }
                SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL => {
                    let params: Vec<Param> = ancestor
                        .children()
                        .find(|n| n.kind() == SyntaxKind::PARAM_LIST)
                        .map(|list| list.children().filter_map(Param::cast).collect())
                        .unwrap_or_default();
                    return self.param_named(&params, name);
                }
                SyntaxKind::ACCESSOR_DECL => {
                    if name == "value" {
                        if let Some(id) = self.db.setter_value(&NodePtr::new(self.file, &ancestor)) {
                            return Some(id);
                        }
                    }
                }
                SyntaxKind::CLASS_DECL | SyntaxKind::STRUCT_DECL | SyntaxKind::INTERFACE_DECL => {
                    return None;
                }
                _ => {}
            }
        }
        None
    }

    fn param_named(&self, params: &[Param], name: &str) -> Option<SymbolId> {
        params
            .iter()
            .find(|p| p.name().and_then(|n| n.text()).as_deref() == Some(name))
            .and_then(|p| self.declared_symbol(p.syntax()))
    }

    // =========================================================================
    // Expression types
    // =========================================================================

    fn literal_type(&self, literal: &Literal) -> TypeRef {
        let Some(token) = literal.token() else {
            return TypeRef::Unknown;
        };
        let text = token.text().to_ascii_lowercase();
        match token.kind() {
            SyntaxKind::STRING => self.db.system_type("String"),
            SyntaxKind::CHAR => self.db.system_type("Char"),
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => self.db.system_type("Boolean"),
            SyntaxKind::INT_NUMBER => {
                let name = if text.ends_with("ul") || text.ends_with("lu") {
                    "UInt64"
                } else if text.ends_with('l') {
                    "Int64"
                } else if text.ends_with('u') {
                    "UInt32"
                } else {
                    "Int32"
                };
                self.db.system_type(name)
            }
            SyntaxKind::REAL_NUMBER => {
                let name = if text.ends_with('f') {
                    "Single"
                } else if text.ends_with('m') {
                    "Decimal"
                } else {
                    "Double"
                };
                self.db.system_type(name)
            }
            _ => TypeRef::Unknown,
        }
    }

    fn binding_type(&self, binding: Binding) -> TypeRef {
        match binding {
            Binding::Symbol(id) => self.db.symbol(id).ty.clone(),
            Binding::Value(ty) => ty,
            _ => TypeRef::Unknown,
        }
    }

    fn containing_type_of(&self, node: &SyntaxNode) -> Option<SymbolId> {
        self.scope_at(node).containing_type
    }

    fn binary_type(&self, lhs: TypeRef, rhs: TypeRef, op: Option<SyntaxKind>) -> TypeRef {
        match op {
            Some(
                SyntaxKind::EQ_EQ
                | SyntaxKind::BANG_EQ
                | SyntaxKind::LT
                | SyntaxKind::GT
                | SyntaxKind::LT_EQ
                | SyntaxKind::GT_EQ
                | SyntaxKind::AMP_AMP
                | SyntaxKind::PIPE_PIPE,
            ) => self.db.system_type("Boolean"),
            Some(SyntaxKind::QUESTION_QUESTION) => match lhs {
                TypeRef::Nullable(inner) if !matches!(rhs, TypeRef::Nullable(_)) => *inner,
                TypeRef::Unknown => rhs,
                other => other,
            },
            Some(SyntaxKind::PLUS)
                if self.is_string(&lhs) || self.is_string(&rhs) =>
            {
                self.db.system_type("String")
            }
            _ => {
                if !lhs.is_known() {
                    rhs
                } else if rhs.is_known() && self.db.is_implicitly_convertible(&lhs, &rhs) {
                    rhs
                } else {
                    lhs
                }
            }
        }
    }

    fn is_string(&self, ty: &TypeRef) -> bool {
        self.db.types_equal(ty, &self.db.system_type("String"))
    }

    fn is_nameof(invocation: &Invocation) -> bool {
        matches!(invocation.callee(), Some(Expr::NameRef(name)) if name.text().as_deref() == Some("nameof"))
    }

    // =========================================================================
    // Overload resolution
    // =========================================================================

    fn argument_fit(&self, arg: &Argument, param: &TypeRef) -> Option<Fit> {
        let Some(expr) = arg.expr().map(Expr::unparenthesized) else {
            return Some(Fit::Lenient);
        };
        if !param.is_known() {
            return Some(Fit::Lenient);
        }
        match &expr {
            Expr::Literal(literal) if literal.kind() == Some(SyntaxKind::NULL_KW) => {
                self.db.accepts_null(param).then_some(Fit::Convertible)
            }
            Expr::Lambda(lambda) => {
                let (params, _) = self.db.delegate_signature(param)?;
                (params.len() == lambda.params().len()).then_some(Fit::Exact)
            }
            Expr::ObjectCreation(creation) if creation.ty().is_none() => Some(Fit::Lenient),
            Expr::Default(default_expr) if default_expr.ty().is_none() => Some(Fit::Lenient),
            _ => match self.bind(&expr) {
                Binding::Methods(group) => {
                    let (params, _) = self.db.delegate_signature(param)?;
                    group
                        .iter()
                        .any(|m| self.db.symbol(*m).parameters.len() == params.len())
                        .then_some(Fit::Exact)
                }
                Binding::Type(_) | Binding::Namespace(_) => None,
                binding => {
                    let ty = self.binding_type(binding);
                    if !ty.is_known() {
                        Some(Fit::Lenient)
                    } else if self.db.types_equal(&ty, param) {
                        Some(Fit::Exact)
                    } else if self.db.is_implicitly_convertible(&ty, param) {
                        Some(Fit::Convertible)
                    } else {
                        None
                    }
                }
            },
        }
    }

    fn candidate(&self, method: SymbolId, args: &[Argument]) -> Option<Candidate> {
        let symbol = self.db.symbol(method);
        let names: Vec<SmolStr> = symbol
            .parameters
            .iter()
            .map(|p| self.db.symbol(*p).name.clone())
            .collect();
        let mapping = map_arguments(&names, args)?;
        let mut fits = Vec::with_capacity(args.len());
        for (param, slot) in symbol.parameters.iter().zip(&mapping) {
            let param = self.db.symbol(*param);
            match slot {
                Some(index) => {
                    let fit = self.argument_fit(&args[*index], &param.ty)?;
                    fits.push((fit, param.ty.clone()));
                }
                None if param.has_default => {}
                None => return None,
            }
        }
        Some(Candidate {
            method,
            fits,
            parameter_count: names.len(),
        })
    }

    /// Compare two applicable candidates argument by argument.
    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        let mut a_better = false;
        let mut b_better = false;
        for ((fa, ta), (fb, tb)) in a.fits.iter().zip(&b.fits) {
            let ordering = fa.cmp(fb).then_with(|| {
                if !ta.is_known() || !tb.is_known() || self.db.types_equal(ta, tb) {
                    return Ordering::Equal;
                }
                // More specific parameter type wins
                match (self.db.is_assignable(ta, tb), self.db.is_assignable(tb, ta)) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Ordering::Equal,
                }
            });
            match ordering {
                Ordering::Less => a_better = true,
                Ordering::Greater => b_better = true,
                Ordering::Equal => {}
            }
        }
        match (a_better, b_better) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.parameter_count.cmp(&b.parameter_count),
        }
    }

    fn select_overload(&self, methods: &[SymbolId], args: &[Argument]) -> Option<SymbolId> {
        let candidates: Vec<Candidate> = methods
            .iter()
            .filter_map(|m| self.candidate(*m, args))
            .collect();
        let mut best: Option<&Candidate> = None;
        let mut ambiguous = false;
        for candidate in &candidates {
            match best {
                None => best = Some(candidate),
                Some(current) => match self.compare(candidate, current) {
                    Ordering::Less => {
                        best = Some(candidate);
                        ambiguous = false;
                    }
                    Ordering::Equal => ambiguous = true,
                    Ordering::Greater => {}
                },
            }
        }
        if ambiguous {
            return None;
        }
        best.map(|c| c.method)
    }

    fn signature(&self, method: SymbolId) -> MethodSignature {
        let symbol = self.db.symbol(method);
        MethodSignature {
            method,
            name: symbol.name.clone(),
            kind: symbol.kind,
            containing_type: symbol.containing_type,
            parameters: symbol
                .parameters
                .iter()
                .map(|p| {
                    let param = self.db.symbol(*p);
                    ParameterInfo {
                        symbol: *p,
                        name: param.name.clone(),
                        ty: param.ty.clone(),
                        has_default: param.has_default,
                    }
                })
                .collect(),
            return_type: symbol.ty.clone(),
            is_static: symbol.is_static,
        }
    }

    fn resolve_invocation(&self, invocation: &Invocation) -> Option<MethodSignature> {
        if Self::is_nameof(invocation) {
            return None;
        }
        let callee = invocation.callee()?;
        let Binding::Methods(methods) = self.bind(&callee) else {
            return None;
        };
        let method = self.select_overload(&methods, &invocation.args())?;
        Some(self.signature(method))
    }

    fn resolve_creation(&self, creation: &ObjectCreation) -> Option<MethodSignature> {
        let ty = match creation.ty() {
            Some(ty) => self.resolve_type(&ty),
            None => self.target_type(creation.syntax())?,
        };
        let id = ty.symbol()?;
        let constructors: Vec<SymbolId> = self
            .db
            .symbol(id)
            .members
            .iter()
            .copied()
            .filter(|m| {
                let s = self.db.symbol(*m);
                s.kind == SymbolKind::Constructor && !s.is_static
            })
            .collect();
        let method = self.select_overload(&constructors, &creation.args())?;
        Some(self.signature(method))
    }

    /// The type a target-typed expression converts to, from its context.
    fn target_type(&self, node: &SyntaxNode) -> Option<TypeRef> {
        let parent = node.parent()?;
        match parent.kind() {
            SyntaxKind::ARGUMENT => self.parameter_type_for(&parent),
            SyntaxKind::EQUALS_VALUE => {
                let declarator = parent.parent().and_then(VariableDeclarator::cast)?;
                let id = self.declared_symbol(declarator.syntax())?;
                Some(self.db.symbol(id).ty.clone())
            }
            _ => None,
        }
    }

    /// Type of the parameter an argument binds to.
    fn parameter_type_for(&self, argument: &SyntaxNode) -> Option<TypeRef> {
        let call = enclosing_call(argument)?;
        let signature = self.resolve_invoked_method(&call)?;
        let arg = Argument::cast(argument.clone())?;
        let names: Vec<SmolStr> = signature.parameters.iter().map(|p| p.name.clone()).collect();
        let args: Vec<Argument> = argument
            .parent()?
            .children()
            .filter_map(Argument::cast)
            .collect();
        let index = argument_index(arg.syntax())?;
        let mapping = map_arguments(&names, &args)?;
        let param = mapping.iter().position(|slot| *slot == Some(index))?;
        Some(signature.parameters[param].ty.clone())
    }
}

impl SemanticModel for FileSemantics<'_> {
    fn compilation(&self) -> &Compilation {
        self.db
    }

    fn file(&self) -> FileId {
        self.file
    }

    fn declared_symbol(&self, node: &SyntaxNode) -> Option<SymbolId> {
        self.db.declared_at(&NodePtr::new(self.file, node))
    }

    fn resolve_symbol(&self, expr: &Expr) -> Option<SymbolId> {
        match expr {
            Expr::Invocation(invocation) => {
                self.resolve_invocation(invocation).map(|s| s.method)
            }
            Expr::ObjectCreation(creation) => self.resolve_creation(creation).map(|s| s.method),
            _ => match self.bind(expr) {
                Binding::Symbol(id) | Binding::Type(id) => Some(id),
                Binding::Methods(methods) if methods.len() == 1 => methods.first().copied(),
                Binding::Methods(methods) => {
                    let node = expr.syntax();
                    let parent = node.parent()?;
                    match parent.kind() {
                        SyntaxKind::INVOCATION => {
                            self.resolve_invoked_method(&parent).map(|s| s.method)
                        }
                        SyntaxKind::ARGUMENT => {
                            let delegate = self.parameter_type_for(&parent)?;
                            self.resolve_method_group(expr, &delegate)
                        }
                        _ => methods.first().copied(),
                    }
                }
                _ => None,
            },
        }
    }

    fn resolve_invoked_method(&self, call: &SyntaxNode) -> Option<MethodSignature> {
        match call.kind() {
            SyntaxKind::INVOCATION => self.resolve_invocation(&Invocation::cast(call.clone())?),
            SyntaxKind::OBJECT_CREATION => {
                self.resolve_creation(&ObjectCreation::cast(call.clone())?)
            }
            _ => None,
        }
    }

    fn resolve_method_group(&self, expr: &Expr, delegate: &TypeRef) -> Option<SymbolId> {
        let Binding::Methods(methods) = self.bind(expr) else {
            return None;
        };
        let Some((params, _)) = self.db.delegate_signature(delegate) else {
            return methods.first().copied();
        };
        let matching: Vec<SymbolId> = methods
            .into_iter()
            .filter(|m| {
                let symbol = self.db.symbol(*m);
                symbol.parameters.len() == params.len()
                    && symbol.parameters.iter().zip(&params).all(|(p, expected)| {
                        self.db.is_assignable(expected, &self.db.symbol(*p).ty)
                    })
            })
            .collect();
        match matching.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    fn type_of(&self, expr: &Expr) -> TypeRef {
        match expr {
            Expr::Literal(literal) => self.literal_type(literal),
            Expr::NameRef(_) | Expr::MemberAccess(_) => self.binding_type(self.bind(expr)),
            Expr::Invocation(invocation) => {
                if Self::is_nameof(invocation) {
                    return self.db.system_type("String");
                }
                if let Some(signature) = self.resolve_invocation(invocation) {
                    return signature.return_type;
                }
                // Delegate invocation
                let callee_type = invocation
                    .callee()
                    .map(|c| self.type_of(&c))
                    .unwrap_or(TypeRef::Unknown);
                self.db
                    .delegate_signature(&callee_type)
                    .map(|(_, ret)| ret)
                    .unwrap_or(TypeRef::Unknown)
            }
            Expr::ObjectCreation(creation) => match creation.ty() {
                Some(ty) => self.resolve_type(&ty),
                None => TypeRef::Unknown,
            },
            Expr::Cast(cast) => cast
                .ty()
                .map(|t| self.resolve_type(&t))
                .unwrap_or(TypeRef::Unknown),
            Expr::Is(is) => {
                if is.is_as() {
                    is.ty().map(|t| self.resolve_type(&t)).unwrap_or(TypeRef::Unknown)
                } else {
                    self.db.system_type("Boolean")
                }
            }
            Expr::Paren(paren) => paren
                .expr()
                .map(|e| self.type_of(&e))
                .unwrap_or(TypeRef::Unknown),
            Expr::TypeOf(_) => self.db.system_type("Type"),
            Expr::Default(default_expr) => match default_expr.ty() {
                Some(ty) => self.resolve_type(&ty),
                None => self
                    .target_type(default_expr.syntax())
                    .unwrap_or(TypeRef::Unknown),
            },
            Expr::This(this) => self
                .containing_type_of(this.syntax())
                .map(TypeRef::Named)
                .unwrap_or(TypeRef::Unknown),
            Expr::Base(base) => self
                .containing_type_of(base.syntax())
                .and_then(|t| self.db.symbol(t).base_type.clone())
                .unwrap_or(TypeRef::Unknown),
            Expr::Prefix(prefix) => match prefix.op() {
                Some(SyntaxKind::BANG) => self.db.system_type("Boolean"),
                _ => prefix
                    .expr()
                    .map(|e| self.type_of(&e))
                    .unwrap_or(TypeRef::Unknown),
            },
            Expr::Postfix(postfix) => postfix
                .expr()
                .map(|e| self.type_of(&e))
                .unwrap_or(TypeRef::Unknown),
            Expr::Binary(binary) => {
                let lhs = binary.lhs().map(|e| self.type_of(&e)).unwrap_or(TypeRef::Unknown);
                let rhs = binary.rhs().map(|e| self.type_of(&e)).unwrap_or(TypeRef::Unknown);
                self.binary_type(lhs, rhs, binary.op())
            }
            Expr::Assign(assign) => assign
                .lhs()
                .map(|e| self.type_of(&e))
                .unwrap_or(TypeRef::Unknown),
            Expr::Conditional(conditional) => {
                let then_type = conditional
                    .then_branch()
                    .map(|e| self.type_of(&e))
                    .unwrap_or(TypeRef::Unknown);
                if then_type.is_known() {
                    then_type
                } else {
                    conditional
                        .else_branch()
                        .map(|e| self.type_of(&e))
                        .unwrap_or(TypeRef::Unknown)
                }
            }
            Expr::Lambda(_) => TypeRef::Unknown,
        }
    }

    fn resolve_type(&self, ty: &Type) -> TypeRef {
        let scope = self.scope_at(ty.syntax());
        self.db.resolve_type_syntax(&scope, ty)
    }

    fn declaration(&self, id: SymbolId) -> Option<SyntaxNode> {
        let ptr = self.db.symbol(id).declaration?;
        let root = self.db.root(ptr.file)?;
        ptr.to_node(&root)
    }
}
