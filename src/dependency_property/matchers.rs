//! Matchers comparing resolved symbols against catalog entries.

use super::catalog::{self, MethodFamily, QualifiedMethod, QualifiedType};
use crate::parser::{AstNode, Expr, Literal, SyntaxKind, VariableDeclarator};
use crate::semantic::{SemanticModel, SymbolId, SymbolKind, TypeRef};

/// The symbol is the catalog type.
pub fn symbol_is(model: &dyn SemanticModel, id: SymbolId, known: &QualifiedType) -> bool {
    model.symbol(id).kind.is_type() && known.matches(&model.qualified_name(id))
}

/// The type reference names the catalog type.
pub fn is_type(model: &dyn SemanticModel, ty: &TypeRef, known: &QualifiedType) -> bool {
    ty.symbol().is_some_and(|id| symbol_is(model, id, known))
}

/// The type is the catalog type or derives from it.
pub fn derives_from(model: &dyn SemanticModel, ty: &TypeRef, known: &QualifiedType) -> bool {
    let Some(id) = ty.symbol() else {
        return false;
    };
    model
        .compilation()
        .base_chain(id)
        .any(|t| symbol_is(model, t, known))
}

fn contained_in(model: &dyn SemanticModel, method: SymbolId, ty: &QualifiedType) -> bool {
    model
        .symbol(method)
        .containing_type
        .is_some_and(|t| symbol_is(model, t, ty))
}

/// The method is exactly the catalog method.
pub fn is_method(model: &dyn SemanticModel, method: SymbolId, known: &QualifiedMethod) -> bool {
    let symbol = model.symbol(method);
    symbol.kind == SymbolKind::Method
        && symbol.name == known.name
        && contained_in(model, method, &known.containing_type)
}

/// The method belongs to the family: right containing type, name prefix.
pub fn matches_family(model: &dyn SemanticModel, method: SymbolId, family: &MethodFamily) -> bool {
    let symbol = model.symbol(method);
    symbol.kind == SymbolKind::Method
        && symbol.name.starts_with(family.prefix)
        && contained_in(model, method, &family.containing_type)
}

/// `DependencyProperty` or `DependencyPropertyKey`.
pub fn is_token_type(model: &dyn SemanticModel, ty: &TypeRef) -> bool {
    is_type(model, ty, &catalog::DEPENDENCY_PROPERTY)
        || is_type(model, ty, &catalog::DEPENDENCY_PROPERTY_KEY)
}

/// `text` is the concatenation of `parts`.
pub fn is_parts(text: &str, parts: &[&str]) -> bool {
    let mut rest = text;
    for part in parts {
        match rest.strip_prefix(part) {
            Some(tail) => rest = tail,
            None => return false,
        }
    }
    rest.is_empty()
}

/// Text of a string constant: a literal, `nameof(...)`, or a `const` string
/// field or local initialized with one of those. `static readonly` fields
/// are not constants.
pub fn constant_string(model: &dyn SemanticModel, expr: &Expr) -> Option<String> {
    constant_string_at_depth(model, expr, 0)
}

fn constant_string_at_depth(model: &dyn SemanticModel, expr: &Expr, depth: usize) -> Option<String> {
    if depth > 8 {
        return None;
    }
    match expr.clone().unparenthesized() {
        Expr::Literal(literal) => literal_string(&literal),
        Expr::Invocation(invocation) => {
            let callee = invocation.callee()?;
            let is_nameof = matches!(&callee, Expr::NameRef(name) if name.text().as_deref() == Some("nameof"));
            if !is_nameof {
                return None;
            }
            let argument = invocation.args().first()?.expr()?;
            argument.unparenthesized().identifier()?.text()
        }
        name @ (Expr::NameRef(_) | Expr::MemberAccess(_)) => {
            let id = model.resolve_symbol(&name)?;
            let symbol = model.symbol(id);
            if !matches!(symbol.kind, SymbolKind::Field | SymbolKind::Local) || !symbol.is_const {
                return None;
            }
            let declaration = model.declaration(id).and_then(VariableDeclarator::cast)?;
            let initializer = declaration.initializer()?;
            constant_string_at_depth(model, &initializer, depth + 1)
        }
        _ => None,
    }
}

fn literal_string(literal: &Literal) -> Option<String> {
    literal.string_value()
}

/// `null` literal.
pub fn is_null(expr: &Expr) -> bool {
    matches!(expr.clone().unparenthesized(), Expr::Literal(literal) if literal.kind() == Some(SyntaxKind::NULL_KW))
}

/// `typeof(T)` argument resolved to a type.
pub fn typeof_argument(model: &dyn SemanticModel, expr: &Expr) -> Option<TypeRef> {
    match expr.clone().unparenthesized() {
        Expr::TypeOf(typeof_expr) => Some(model.resolve_type(&typeof_expr.ty()?)),
        _ => None,
    }
}

/// Method symbol a call site resolves to, matched against the catalog.
pub fn invoked(model: &dyn SemanticModel, call: &crate::parser::Invocation, known: &QualifiedMethod) -> bool {
    model
        .resolve_invoked_method(call.syntax())
        .is_some_and(|signature| is_method(model, signature.method, known))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("BarProperty", &["Bar", "Property"], true)]
    #[case("BarPropertyKey", &["Bar", "Property"], false)]
    #[case("OnBarChanged", &["On", "Bar", "Changed"], true)]
    #[case("OnBazChanged", &["On", "Bar", "Changed"], false)]
    #[case("", &[], true)]
    fn parts_concatenate_exactly(#[case] text: &str, #[case] parts: &[&str], #[case] expected: bool) {
        assert_eq!(is_parts(text, parts), expected);
    }
}
