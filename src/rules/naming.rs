//! Naming of backing members, CLR properties and attached accessors.

use smol_str::SmolStr;

use super::{FixHint, RuleContext, RuleId, name_range};
use crate::dependency_property::{BackingMember, Recognized, RegistrationCall, matchers};
use crate::parser::{AstNode, SyntaxNode};
use crate::semantic::SymbolId;

pub(super) fn check(ctx: &mut RuleContext<'_>, item: &Recognized) {
    match item {
        Recognized::Registration(registered) => {
            check_backing_member(ctx, &registered.member, &registered.call, registered.declaration.clone());
        }
        Recognized::ReadOnlyAlias(alias) => {
            if let Some(call) = &alias.registration {
                check_public_member(ctx, &alias.member, call, alias.declaration.clone());
            }
        }
        Recognized::ClrProperty(property) => {
            let (Some(call), Some(name)) = (&property.registration, property.property.name()) else {
                return;
            };
            let Some(registered) = call.registered_name(ctx.model) else {
                return;
            };
            if name.text().as_deref() != Some(registered.as_str()) {
                let actual = name.text().unwrap_or_default();
                ctx.report_with(
                    RuleId::Wpf0003,
                    name.syntax().text_range(),
                    format!("property '{actual}' must be named '{registered}' to match the registered name"),
                    Some(rename(property.symbol, &registered)),
                );
            }
        }
        Recognized::AttachedGet(get) => {
            if let Some(call) = &get.registration {
                check_accessor_method(ctx, "Get", get.accessor.symbol, get.accessor.method.syntax(), call);
            }
        }
        Recognized::AttachedSet(set) => {
            if let Some(call) = &set.registration {
                check_accessor_method(ctx, "Set", set.accessor.symbol, set.accessor.method.syntax(), call);
            }
        }
        Recognized::OverrideMetadata(_) => {}
    }
}

fn rename(symbol: SymbolId, new_name: &str) -> FixHint {
    FixHint::Rename {
        symbol,
        new_name: SmolStr::new(new_name),
    }
}

fn check_backing_member(
    ctx: &mut RuleContext<'_>,
    member: &BackingMember,
    call: &RegistrationCall,
    declaration: SyntaxNode,
) {
    if !member.is_key(ctx.model) {
        check_public_member(ctx, member, call, declaration);
        return;
    }
    let Some(registered) = call.registered_name(ctx.model) else {
        return;
    };
    if !matchers::is_parts(member.name(), &[registered.as_str(), "PropertyKey"]) {
        let expected = format!("{registered}PropertyKey");
        ctx.report_with(
            RuleId::Wpf0002,
            name_range(&declaration),
            format!(
                "DependencyPropertyKey member '{}' registered as '{registered}' should be named '{expected}'",
                member.name()
            ),
            Some(rename(member.symbol(), &expected)),
        );
    }
}

fn check_public_member(
    ctx: &mut RuleContext<'_>,
    member: &BackingMember,
    call: &RegistrationCall,
    declaration: SyntaxNode,
) {
    let Some(registered) = call.registered_name(ctx.model) else {
        return;
    };
    if !matchers::is_parts(member.name(), &[registered.as_str(), "Property"]) {
        let expected = format!("{registered}Property");
        ctx.report_with(
            RuleId::Wpf0001,
            name_range(&declaration),
            format!(
                "DependencyProperty member '{}' registered as '{registered}' should be named '{expected}'",
                member.name()
            ),
            Some(rename(member.symbol(), &expected)),
        );
    }
}

fn check_accessor_method(
    ctx: &mut RuleContext<'_>,
    prefix: &str,
    symbol: SymbolId,
    method: &SyntaxNode,
    call: &RegistrationCall,
) {
    let Some(registered) = call.registered_name(ctx.model) else {
        return;
    };
    let actual = ctx.model.symbol(symbol).name.clone();
    if !matchers::is_parts(actual.as_str(), &[prefix, registered.as_str()]) {
        let expected = format!("{prefix}{registered}");
        ctx.report_with(
            RuleId::Wpf0004,
            name_range(method),
            format!("method '{actual}' should be named '{expected}'"),
            Some(rename(symbol, &expected)),
        );
    }
}
