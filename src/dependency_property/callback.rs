//! Callback arguments of registrations and metadata constructors.

use super::catalog::{self, QualifiedType};
use super::matchers;
use super::registration::RegistrationCall;
use crate::parser::{
    AstNode, Expr, Invocation, LambdaBody, LambdaExpr, MethodDecl, NameRef, Stmt,
};
use crate::semantic::{SemanticModel, SymbolId, SymbolKind, TypeRef};

/// Which framework callback an argument is passed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackRole {
    PropertyChanged,
    CoerceValue,
    ValidateValue,
}

impl CallbackRole {
    pub fn delegate_type(self) -> QualifiedType {
        match self {
            CallbackRole::PropertyChanged => catalog::PROPERTY_CHANGED_CALLBACK,
            CallbackRole::CoerceValue => catalog::COERCE_VALUE_CALLBACK,
            CallbackRole::ValidateValue => catalog::VALIDATE_VALUE_CALLBACK,
        }
    }

    /// Conventional method names for a property named `registered_name`.
    /// The first entry is the one offered as a rename.
    pub fn expected_names(self, registered_name: &str) -> Vec<String> {
        match self {
            CallbackRole::PropertyChanged => vec![format!("On{}Changed", registered_name)],
            CallbackRole::CoerceValue => vec![format!("Coerce{}", registered_name)],
            CallbackRole::ValidateValue => vec![
                format!("Validate{}", registered_name),
                format!("Is{}Valid", registered_name),
            ],
        }
    }

    pub fn matches_name(self, method_name: &str, registered_name: &str) -> bool {
        let named = |parts: &[&str]| matchers::is_parts(method_name, parts);
        match self {
            CallbackRole::PropertyChanged => named(&["On", registered_name, "Changed"]),
            CallbackRole::CoerceValue => named(&["Coerce", registered_name]),
            CallbackRole::ValidateValue => {
                named(&["Validate", registered_name]) || named(&["Is", registered_name, "Valid"])
            }
        }
    }
}

/// Syntactic form of a callback argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackForm {
    /// `OnBarChanged`
    MethodGroup,
    /// `new PropertyChangedCallback(OnBarChanged)`
    DelegateCreation,
    /// `(d, e) => OnBarChanged(d, e)`
    Lambda,
}

/// How many registrations refer to a callback method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOwnership {
    Single,
    Shared(usize),
}

/// A resolved callback argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackBinding {
    pub role: CallbackRole,
    pub form: CallbackForm,
    /// The argument as written.
    pub argument: Expr,
    /// Effective target method, if one can be named.
    pub target: Option<SymbolId>,
    /// Identifier naming the target at the call site.
    pub target_name: Option<NameRef>,
    /// The single call a forwarding lambda delegates to.
    pub forwarded_call: Option<Invocation>,
}

impl CallbackBinding {
    /// Classify a callback argument. `null` means no callback.
    pub fn resolve(model: &dyn SemanticModel, argument: &Expr, role: CallbackRole) -> Option<Self> {
        if matchers::is_null(argument) {
            return None;
        }
        let mut binding = Self {
            role,
            form: CallbackForm::MethodGroup,
            argument: argument.clone(),
            target: None,
            target_name: None,
            forwarded_call: None,
        };
        let mut expr = argument.clone().unparenthesized();

        // Unwrap one level of `new XxxCallback(inner)`
        if let Expr::ObjectCreation(creation) = &expr {
            let ty = model.resolve_type(&creation.ty()?);
            if !matchers::is_type(model, &ty, &role.delegate_type()) {
                return None;
            }
            binding.form = CallbackForm::DelegateCreation;
            expr = creation.args().first()?.expr()?.unparenthesized();
        }

        match &expr {
            Expr::Lambda(lambda) => {
                if binding.form == CallbackForm::MethodGroup {
                    binding.form = CallbackForm::Lambda;
                }
                if let Some(call) = forwarded_call(lambda) {
                    let target = model.resolve_invoked_method(call.syntax()).and_then(|signature| {
                        let symbol = model.symbol(signature.method);
                        (symbol.is_static && symbol.parameters.len() == lambda.params().len())
                            .then_some(signature.method)
                    });
                    if target.is_some() {
                        binding.target = target;
                        binding.target_name = call.callee().and_then(|c| c.identifier());
                    }
                    binding.forwarded_call = Some(call);
                }
            }
            Expr::NameRef(_) | Expr::MemberAccess(_) => {
                let delegate = model
                    .compilation()
                    .type_named(&role.delegate_type().to_string())
                    .map(TypeRef::Named)
                    .unwrap_or(TypeRef::Unknown);
                let target = model
                    .resolve_method_group(&expr, &delegate)
                    .or_else(|| model.resolve_symbol(&expr))
                    .filter(|id| model.symbol(*id).kind == SymbolKind::Method)?;
                binding.target = Some(target);
                binding.target_name = expr.identifier();
            }
            _ => return None,
        }
        Some(binding)
    }

    /// Declaration of the target method when it is in source.
    pub fn target_declaration(&self, model: &dyn SemanticModel) -> Option<MethodDecl> {
        model.declaration(self.target?).and_then(MethodDecl::cast)
    }

    /// Name of the effective target method.
    pub fn target_method_name<'m>(&self, model: &'m dyn SemanticModel) -> Option<&'m str> {
        self.target.map(|id| model.symbol(id).name.as_str())
    }

    /// Number of registrations in the target's declaring type that pass it.
    ///
    /// Without a source declaration the callback is treated as owned by the
    /// registration that found it.
    pub fn ownership(&self, model: &dyn SemanticModel) -> CallbackOwnership {
        match self.owners(model).len() {
            count if count > 1 => CallbackOwnership::Shared(count),
            _ => CallbackOwnership::Single,
        }
    }

    /// Registration calls in the target's file that pass it, in source order.
    pub fn owners(&self, model: &dyn SemanticModel) -> Vec<RegistrationCall> {
        self.target
            .map(|target| registrations_referencing(model, target))
            .unwrap_or_default()
    }
}

/// The single call a lambda body forwards to.
fn forwarded_call(lambda: &LambdaExpr) -> Option<Invocation> {
    let expr = match lambda.body()? {
        LambdaBody::Expr(expr) => expr,
        LambdaBody::Block(block) => {
            let mut statements = block.statements();
            let single = statements.next()?;
            if statements.next().is_some() {
                return None;
            }
            match single {
                Stmt::Expr(stmt) => stmt.expr()?,
                Stmt::Return(stmt) => stmt.expr()?,
                _ => return None,
            }
        }
    };
    match expr.unparenthesized() {
        Expr::Invocation(invocation) => Some(invocation),
        Expr::Cast(cast) => match cast.expr()?.unparenthesized() {
            Expr::Invocation(invocation) => Some(invocation),
            _ => None,
        },
        _ => None,
    }
}

/// Registration calls in the same file whose arguments reference `method`.
pub fn registrations_referencing(model: &dyn SemanticModel, method: SymbolId) -> Vec<RegistrationCall> {
    let symbol = model.symbol(method);
    if !symbol.declaration.is_some_and(|ptr| ptr.file == model.file()) {
        return Vec::new();
    }
    let Some(root) = model.compilation().root(model.file()) else {
        return Vec::new();
    };
    let name = symbol.name.clone();
    root.descendants()
        .filter_map(Invocation::cast)
        .filter(|invocation| {
            invocation
                .arg_list()
                .is_some_and(|args| {
                    args.syntax()
                        .descendants()
                        .filter_map(NameRef::cast)
                        .filter(|n| n.text().as_deref() == Some(name.as_str()))
                        .any(|n| {
                            model.resolve_symbol(&Expr::NameRef(n)) == Some(method)
                        })
                })
        })
        .filter_map(|invocation| RegistrationCall::match_invocation(model, &invocation))
        .collect()
}
