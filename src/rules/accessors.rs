//! Accessor bodies, declaration order and `SetValue` / `SetCurrentValue` calls.

use tokio_util::sync::CancellationToken;

use super::{Cancelled, FixHint, RuleContext, RuleId, name_range};
use crate::dependency_property::clr::first_side_effect;
use crate::dependency_property::{
    BackingMember, ClrCorrelation, ReadOnlyAlias, Recognized, catalog, matchers, registration_of,
};
use crate::parser::{AstNode, Body, Invocation, SyntaxKind};

pub(super) fn check(ctx: &mut RuleContext<'_>, item: &Recognized) {
    match item {
        Recognized::ReadOnlyAlias(alias) => check_declaration_order(ctx, alias),
        Recognized::ClrProperty(property) => {
            let correlation = &property.correlation;
            if let ClrCorrelation::Mismatched { getter, setter } = correlation {
                ctx.report(
                    RuleId::Wpf0032,
                    setter.token.syntax().text_range(),
                    format!(
                        "property gets '{}' but sets '{}'",
                        getter.member.name(),
                        setter.member.name()
                    ),
                );
            }

            if let Some(body) = property.property.getter_body() {
                report_side_effect(ctx, &body, &correlation.getter().invocation);
            }
            let setter = match correlation {
                ClrCorrelation::Pair(pair) => Some(&pair.setter),
                ClrCorrelation::Mismatched { setter, .. } => Some(setter),
                _ => None,
            };
            if let (Some(setter), Some(body)) = (
                setter,
                property.property.setter().and_then(|s| s.body()),
            ) {
                report_side_effect(ctx, &body, &setter.invocation);
            }
        }
        Recognized::AttachedGet(get) => {
            if let Some(body) = get.accessor.method.body() {
                report_side_effect(ctx, &body, &get.accessor.call.invocation);
            }
        }
        Recognized::AttachedSet(set) => {
            if let Some(body) = set.accessor.method.body() {
                report_side_effect(ctx, &body, &set.accessor.call.invocation);
            }
        }
        _ => {}
    }
}

/// The key must be declared before the public member that reads it.
fn check_declaration_order(ctx: &mut RuleContext<'_>, alias: &ReadOnlyAlias) {
    let Some(key) = alias.key.info().declaration else {
        return;
    };
    if key.file != ctx.file() {
        return;
    }
    if key.range.start() > alias.declaration.text_range().start() {
        ctx.report(
            RuleId::Wpf0031,
            name_range(&alias.declaration),
            format!(
                "'{}' must be declared after '{}'",
                alias.member.name(),
                alias.key.name()
            ),
        );
    }
}

fn report_side_effect(ctx: &mut RuleContext<'_>, body: &Body, call: &Invocation) {
    if let Some(statement) = first_side_effect(body, call) {
        ctx.report(
            RuleId::Wpf0042,
            statement.text_range(),
            "accessor should only call GetValue / SetValue",
        );
    }
}

/// Check every `SetValue` / `SetCurrentValue` call in the file.
pub(super) fn check_value_calls(ctx: &mut RuleContext<'_>, cancel: &CancellationToken) -> Result<(), Cancelled> {
    let root = ctx.root.clone();
    for node in root.descendants().filter(|n| n.kind() == SyntaxKind::INVOCATION) {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        let Some(invocation) = Invocation::cast(node) else {
            continue;
        };
        let set_current = if matchers::invoked(ctx.model, &invocation, &catalog::SET_VALUE) {
            false
        } else if matchers::invoked(ctx.model, &invocation, &catalog::SET_CURRENT_VALUE) {
            true
        } else {
            continue;
        };
        let Some(token) = invocation.args().first().and_then(|arg| arg.expr()) else {
            continue;
        };
        let Some(member) = BackingMember::from_expr(ctx.model, &token) else {
            continue;
        };

        if !member.is_key(ctx.model)
            && registration_of(ctx.model, &member).is_some_and(|call| call.kind.is_read_only())
        {
            ctx.report(
                RuleId::Wpf0040,
                token.syntax().text_range(),
                format!("'{}' is read-only, set it through its DependencyPropertyKey", member.name()),
            );
        }

        if set_current && is_data_context(ctx, &member) {
            let range = invocation.syntax().text_range();
            ctx.report_with(
                RuleId::Wpf0043,
                range,
                "use SetValue to set DataContext",
                Some(FixHint::UseSetValue { invocation: range }),
            );
        }
    }
    Ok(())
}

fn is_data_context(ctx: &RuleContext<'_>, member: &BackingMember) -> bool {
    member.name() == "DataContextProperty"
        && [catalog::FRAMEWORK_ELEMENT, catalog::FRAMEWORK_CONTENT_ELEMENT]
            .iter()
            .any(|owner| matchers::symbol_is(ctx.model, member.containing_type(), owner))
}
