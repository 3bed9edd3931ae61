//! Callback names and the casts callbacks perform on their arguments.

use smol_str::SmolStr;

use super::{FixHint, RuleContext, RuleId};
use crate::base::FileId;
use crate::dependency_property::{
    CallbackBinding, CallbackForm, CallbackOwnership, CallbackRole, Recognized, RegistrationCall,
    RegistrationKind,
};
use crate::parser::{
    AstNode, CastExpr, Expr, IsExpr, LambdaExpr, Param, SyntaxKind, SyntaxNode, Type,
};
use crate::semantic::{SemanticModel, TypeRef};

/// Registrations and metadata overrides carry callbacks; everything else
/// refers back to one of them.
fn checked_call(item: &Recognized) -> Option<&RegistrationCall> {
    match item {
        Recognized::Registration(registered) => Some(&registered.call),
        Recognized::OverrideMetadata(call) => Some(call),
        _ => None,
    }
}

fn checks_callbacks(call: &RegistrationCall) -> bool {
    call.kind != RegistrationKind::AddOwner
}

fn bindings(model: &dyn SemanticModel, call: &RegistrationCall) -> Vec<CallbackBinding> {
    let mut bindings = Vec::new();
    if let Some(metadata) = call.metadata(model) {
        bindings.extend(metadata.changed_callback(model));
        bindings.extend(metadata.coerce_callback(model));
    }
    bindings.extend(call.validate_callback(model));
    bindings
}

fn name_rule(role: CallbackRole) -> RuleId {
    match role {
        CallbackRole::PropertyChanged => RuleId::Wpf0005,
        CallbackRole::CoerceValue => RuleId::Wpf0006,
        CallbackRole::ValidateValue => RuleId::Wpf0007,
    }
}

pub(super) fn check(ctx: &mut RuleContext<'_>, item: &Recognized) {
    let Some(call) = checked_call(item) else {
        return;
    };
    for binding in bindings(ctx.model, call) {
        check_name(ctx, call, &binding);
        check_casts(ctx, call, &binding);
    }
}

fn check_name(ctx: &mut RuleContext<'_>, call: &RegistrationCall, binding: &CallbackBinding) {
    let (Some(target), Some(target_name)) = (binding.target, &binding.target_name) else {
        return;
    };
    let symbol = ctx.model.symbol(target);
    if !symbol.declaration.is_some_and(|ptr| ptr.file == ctx.file()) {
        return;
    }
    let Some(registered) = call.registered_name(ctx.model) else {
        return;
    };
    let role = binding.role;
    let actual = symbol.name.clone();
    let range = target_name.syntax().text_range();

    match binding.ownership(ctx.model) {
        CallbackOwnership::Shared(count) => {
            let owners = binding.owners(ctx.model);
            // Reported once, from the first owner whose callbacks are checked
            let first = owners.iter().find(|owner| checks_callbacks(owner));
            if first.map(|owner| owner.invocation.syntax().text_range())
                != Some(call.invocation.syntax().text_range())
            {
                return;
            }
            let matches_an_owner = owners
                .iter()
                .filter_map(|owner| owner.registered_name(ctx.model))
                .any(|name| role.matches_name(&actual, &name));
            if matches_an_owner {
                return;
            }
            ctx.report(
                name_rule(role),
                range,
                format!(
                    "method '{actual}' is shared by {count} registrations and matches none of their names"
                ),
            );
        }
        CallbackOwnership::Single => {
            if role.matches_name(&actual, &registered) {
                return;
            }
            let Some(expected) = role.expected_names(&registered).into_iter().next() else {
                return;
            };
            ctx.report_with(
                name_rule(role),
                range,
                format!("method '{actual}' should be named '{expected}'"),
                Some(FixHint::Rename {
                    symbol: target,
                    new_name: SmolStr::new(&expected),
                }),
            );
        }
    }
}

/// Where a callback's code lives: a lambda argument or the target method.
struct CallbackScope {
    params: Vec<Param>,
    body: SyntaxNode,
}

impl CallbackScope {
    fn of(model: &dyn SemanticModel, file: FileId, binding: &CallbackBinding) -> Option<Self> {
        if let Some(lambda) = lambda_argument(binding) {
            return Some(Self {
                params: lambda.params(),
                body: lambda.syntax().clone(),
            });
        }
        let target = binding.target?;
        if !model.symbol(target).declaration.is_some_and(|ptr| ptr.file == file) {
            return None;
        }
        let method = binding.target_declaration(model)?;
        Some(Self {
            params: method.params(),
            body: method.syntax().clone(),
        })
    }

    fn param_name(&self, index: usize) -> Option<String> {
        self.params.get(index)?.name()?.text()
    }
}

fn lambda_argument(binding: &CallbackBinding) -> Option<LambdaExpr> {
    if !matches!(binding.form, CallbackForm::Lambda | CallbackForm::DelegateCreation) {
        return None;
    }
    let expr = match binding.argument.clone().unparenthesized() {
        Expr::ObjectCreation(creation) => creation.args().first()?.expr()?.unparenthesized(),
        other => other,
    };
    match expr {
        Expr::Lambda(lambda) => Some(lambda),
        _ => None,
    }
}

/// `(T)expr` and `expr as T` under `scope`.
fn casts(scope: &SyntaxNode) -> Vec<(Type, Expr)> {
    scope
        .descendants()
        .filter_map(|node| match node.kind() {
            SyntaxKind::CAST_EXPR => {
                let cast = CastExpr::cast(node)?;
                Some((cast.ty()?, cast.expr()?.unparenthesized()))
            }
            SyntaxKind::IS_EXPR => {
                let is = IsExpr::cast(node)?;
                is.is_as().then_some(())?;
                Some((is.ty()?, is.expr()?.unparenthesized()))
            }
            _ => None,
        })
        .collect()
}

fn is_name(expr: &Expr, name: &str) -> bool {
    matches!(expr, Expr::NameRef(n) if n.text().as_deref() == Some(name))
}

/// `e.NewValue` or `e.OldValue`.
fn is_event_value(expr: &Expr, args: &str) -> bool {
    let Expr::MemberAccess(access) = expr else {
        return false;
    };
    let member = access.name().and_then(|n| n.text());
    matches!(member.as_deref(), Some("NewValue" | "OldValue"))
        && access.receiver().is_some_and(|r| is_name(&r.unparenthesized(), args))
}

fn check_casts(ctx: &mut RuleContext<'_>, call: &RegistrationCall, binding: &CallbackBinding) {
    let Some(scope) = CallbackScope::of(ctx.model, ctx.file(), binding) else {
        return;
    };
    let role = binding.role;
    let sender = match role {
        CallbackRole::ValidateValue => None,
        _ => scope.param_name(0),
    };
    let value_param = match role {
        CallbackRole::PropertyChanged | CallbackRole::CoerceValue => scope.param_name(1),
        CallbackRole::ValidateValue => scope.param_name(0),
    };
    let owner = if call.kind.is_attached() {
        None
    } else {
        call.owner_type(ctx.model)
    };
    let registered = call.registered_type(ctx.model);

    for (ty, expr) in casts(&scope.body) {
        let cast_to = ctx.model.resolve_type(&ty);
        if !cast_to.is_known() {
            continue;
        }
        if let (Some(sender), Some(owner)) = (&sender, &owner) {
            if is_name(&expr, sender) && owner.is_known() && !ctx.model.is_assignable(owner, &cast_to) {
                let owner_text = ctx.model.type_display(owner);
                ctx.report_with(
                    RuleId::Wpf0019,
                    ty.syntax().text_range(),
                    format!("sender is a '{owner_text}', cast to '{owner_text}' or a base type"),
                    cast_fix(&ty, &owner_text),
                );
                continue;
            }
        }
        let (Some(value_param), Some(registered)) = (&value_param, &registered) else {
            continue;
        };
        let is_value = match role {
            CallbackRole::PropertyChanged => is_event_value(&expr, value_param),
            _ => is_name(&expr, value_param),
        };
        if is_value && !value_cast_ok(ctx.model, registered, &cast_to) {
            let expected = ctx.model.type_display(registered);
            ctx.report_with(
                RuleId::Wpf0020,
                ty.syntax().text_range(),
                format!("value is registered as '{expected}', cast to '{expected}'"),
                cast_fix(&ty, &expected),
            );
        }
    }
}

/// `(T)x` can be retyped in place; `x as T` can't take a value type.
fn cast_fix(ty: &Type, new_type: &str) -> Option<FixHint> {
    let parent = ty.syntax().parent()?;
    (parent.kind() == SyntaxKind::CAST_EXPR).then(|| FixHint::ReplaceCastType {
        cast_type: ty.syntax().text_range(),
        new_type: SmolStr::new(new_type),
    })
}

fn value_cast_ok(model: &dyn SemanticModel, registered: &TypeRef, cast_to: &TypeRef) -> bool {
    if !registered.is_known() {
        return true;
    }
    if model.types_equal(registered, cast_to) || model.is_assignable(registered, cast_to) {
        return true;
    }
    match (registered, cast_to) {
        (inner, TypeRef::Nullable(wrapped)) | (TypeRef::Nullable(wrapped), inner) => {
            model.types_equal(inner, wrapped)
        }
        _ => false,
    }
}
