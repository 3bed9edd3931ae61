//! Accessor types against the registered property type.

use super::{RuleContext, RuleId};
use crate::base::TextRange;
use crate::dependency_property::{Recognized, RegistrationCall};
use crate::parser::AstNode;
use crate::semantic::TypeRef;

pub(super) fn check(ctx: &mut RuleContext<'_>, item: &Recognized) {
    match item {
        Recognized::ClrProperty(property) => {
            let (Some(call), Some(ty)) = (&property.registration, property.property.ty()) else {
                return;
            };
            let actual = ctx.model.symbol(property.symbol).ty.clone();
            compare(ctx, RuleId::Wpf0012, "Property type", call, &actual, ty.syntax().text_range());
        }
        Recognized::AttachedGet(get) => {
            let (Some(call), Some(ty)) = (&get.registration, get.accessor.method.return_type()) else {
                return;
            };
            let actual = ctx.model.resolve_type(&ty);
            compare(ctx, RuleId::Wpf0013, "Return type", call, &actual, ty.syntax().text_range());
        }
        Recognized::AttachedSet(set) => {
            let (Some(call), Some(ty)) = (&set.registration, set.accessor.value.ty()) else {
                return;
            };
            let actual = ctx.model.resolve_type(&ty);
            let range = set.accessor.value.syntax().text_range();
            compare(ctx, RuleId::Wpf0013, "Value type", call, &actual, range);
        }
        _ => {}
    }
}

fn compare(
    ctx: &mut RuleContext<'_>,
    rule: RuleId,
    what: &str,
    call: &RegistrationCall,
    actual: &TypeRef,
    range: TextRange,
) {
    let Some(registered) = call.registered_type(ctx.model) else {
        return;
    };
    if !registered.is_known() || !actual.is_known() || ctx.model.types_equal(&registered, actual) {
        return;
    }
    let expected = ctx.model.type_display(&registered);
    ctx.report(
        rule,
        range,
        format!("{what} '{}' should match registered type '{expected}'", ctx.model.type_display(actual)),
    );
}
