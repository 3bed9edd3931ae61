//! The semantic model queried by recognizers.
//!
//! [`SemanticModel`] is the seam between syntax-level pattern matching and
//! symbol information. Recognition code only ever talks to this trait, so the
//! binder behind it can be swapped without touching the recognizer.

use smol_str::SmolStr;

use super::compilation::Compilation;
use super::symbols::{MethodSignature, QualifiedName, Symbol, SymbolId, TypeRef};
use crate::base::FileId;
use crate::parser::{Argument, AstNode, Attribute, Expr, SyntaxNode, Type};

/// Symbol and type queries for one file.
pub trait SemanticModel {
    fn compilation(&self) -> &Compilation;

    /// The file this model answers questions about.
    fn file(&self) -> FileId;

    fn symbol(&self, id: SymbolId) -> &Symbol {
        self.compilation().symbol(id)
    }

    /// Symbol declared by a declaration node (declarator, property, method,
    /// parameter, type).
    fn declared_symbol(&self, node: &SyntaxNode) -> Option<SymbolId>;

    /// Symbol an expression refers to. Method groups resolve to the overload
    /// selected by their use site.
    fn resolve_symbol(&self, expr: &Expr) -> Option<SymbolId>;

    /// Overload-resolved target of an invocation or object creation node.
    fn resolve_invoked_method(&self, call: &SyntaxNode) -> Option<MethodSignature>;

    /// The method a method-group expression denotes when converted to `delegate`.
    fn resolve_method_group(&self, expr: &Expr, delegate: &TypeRef) -> Option<SymbolId>;

    /// Static type of an expression. `null` and lambdas have no type.
    fn type_of(&self, expr: &Expr) -> TypeRef;

    fn resolve_type(&self, ty: &Type) -> TypeRef;

    /// Attribute class applied by `attribute`. `[Name]` binds `NameAttribute`
    /// before `Name`.
    fn resolve_attribute(&self, attribute: &Attribute) -> Option<SymbolId> {
        let segments = attribute.ty()?.segments();
        let compilation = self.compilation();
        let scope = compilation.scope_at(self.file(), attribute.syntax());
        let mut suffixed = segments.clone();
        if let Some(last) = suffixed.last_mut().filter(|l| !l.ends_with("Attribute")) {
            last.push_str("Attribute");
        }
        compilation
            .resolve_type_name(&scope, &suffixed, 0)
            .or_else(|| compilation.resolve_type_name(&scope, &segments, 0))
    }

    /// Declaration syntax of a source symbol. Metadata symbols have none.
    fn declaration(&self, id: SymbolId) -> Option<SyntaxNode>;

    fn qualified_name(&self, id: SymbolId) -> QualifiedName {
        self.compilation().qualified_name(id)
    }

    fn types_equal(&self, a: &TypeRef, b: &TypeRef) -> bool {
        self.compilation().types_equal(a, b)
    }

    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        self.compilation().is_assignable(from, to)
    }

    /// Members named `name` on `ty` and its bases.
    fn members(&self, ty: SymbolId, name: &str) -> Vec<SymbolId> {
        self.compilation().find_members(ty, name)
    }

    fn type_display(&self, ty: &TypeRef) -> String {
        self.compilation().type_display(ty)
    }
}

/// Map arguments to parameters by position and name.
///
/// Returns, for each parameter, the index of the argument bound to it. `None`
/// when an argument has no parameter or a parameter is bound twice.
pub(crate) fn map_arguments(params: &[SmolStr], args: &[Argument]) -> Option<Vec<Option<usize>>> {
    let mut mapping = vec![None; params.len()];
    let mut position = 0;
    for (index, arg) in args.iter().enumerate() {
        let target = match arg.name().and_then(|n| n.text()) {
            Some(name) => params.iter().position(|p| *p == name)?,
            None => {
                let target = position;
                position += 1;
                target
            }
        };
        let slot = mapping.get_mut(target)?;
        if slot.is_some() {
            return None;
        }
        *slot = Some(index);
    }
    Some(mapping)
}

/// For each parameter of `signature`, the argument bound to it.
///
/// Arguments that cannot be matched are dropped, so the result always has
/// one entry per parameter.
pub fn align_arguments(signature: &MethodSignature, args: &[Argument]) -> Vec<Option<Argument>> {
    let names: Vec<SmolStr> = signature.parameters.iter().map(|p| p.name.clone()).collect();
    match map_arguments(&names, args) {
        Some(mapping) => mapping
            .into_iter()
            .map(|slot| slot.map(|i| args[i].clone()))
            .collect(),
        None => (0..names.len()).map(|i| args.get(i).cloned()).collect(),
    }
}

/// The argument expression passed for parameter `name`.
pub fn argument_for(signature: &MethodSignature, args: &[Argument], name: &str) -> Option<Expr> {
    let index = signature.parameter_named(name)?;
    align_arguments(signature, args)
        .into_iter()
        .nth(index)
        .flatten()
        .and_then(|arg| arg.expr())
}

/// Node of the invocation or object creation an argument belongs to.
pub(crate) fn enclosing_call(argument: &SyntaxNode) -> Option<SyntaxNode> {
    let call = argument.parent()?.parent()?;
    matches!(
        call.kind(),
        crate::parser::SyntaxKind::INVOCATION | crate::parser::SyntaxKind::OBJECT_CREATION
    )
    .then_some(call)
}

/// Argument index of `argument` within its list.
pub(crate) fn argument_index(argument: &SyntaxNode) -> Option<usize> {
    let list = argument.parent()?;
    list.children()
        .filter_map(Argument::cast)
        .position(|a| a.syntax() == argument)
}
