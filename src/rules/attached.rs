//! Attached property accessor methods: browsable-for-type attribute and docs.

use super::{RuleContext, RuleId, name_range};
use crate::dependency_property::{Recognized, catalog, matchers};
use crate::parser::{AstNode, Attribute, MethodDecl, Param};
use crate::semantic::SymbolId;

const BROWSABLE_FOR_TYPE: &str = "AttachedPropertyBrowsableForType";

pub(super) fn check(ctx: &mut RuleContext<'_>, item: &Recognized) {
    match item {
        Recognized::AttachedGet(get) => {
            let accessor = &get.accessor;
            check_browsable(ctx, &accessor.method, &accessor.element);
            check_documented(ctx, &accessor.method, accessor.symbol);
        }
        Recognized::AttachedSet(set) => {
            check_documented(ctx, &set.accessor.method, set.accessor.symbol);
        }
        _ => {}
    }
}

fn browsable_attribute(ctx: &RuleContext<'_>, method: &MethodDecl) -> Option<Attribute> {
    method.attributes().into_iter().find(|attribute| {
        ctx.model.resolve_attribute(attribute).is_some_and(|id| {
            matchers::symbol_is(ctx.model, id, &catalog::ATTACHED_PROPERTY_BROWSABLE_FOR_TYPE)
        })
    })
}

fn check_browsable(ctx: &mut RuleContext<'_>, method: &MethodDecl, element: &Param) {
    let Some(element_ty) = element.ty() else {
        return;
    };
    let element_type = ctx.model.resolve_type(&element_ty);

    let Some(attribute) = browsable_attribute(ctx, method) else {
        ctx.report(
            RuleId::Wpf0033,
            name_range(method.syntax()),
            format!(
                "add [{BROWSABLE_FOR_TYPE}(typeof({}))]",
                ctx.model.type_display(&element_type)
            ),
        );
        return;
    };

    let args = attribute.args();
    let [argument] = args.as_slice() else {
        return;
    };
    let Some(expr) = argument.expr() else {
        return;
    };
    let Some(argument_type) = matchers::typeof_argument(ctx.model, &expr) else {
        return;
    };
    if element_type.is_known() && !ctx.model.types_equal(&argument_type, &element_type) {
        ctx.report(
            RuleId::Wpf0034,
            argument.syntax().text_range(),
            format!(
                "expected typeof({}) to match the element parameter",
                ctx.model.type_display(&element_type)
            ),
        );
    }
}

fn check_documented(ctx: &mut RuleContext<'_>, method: &MethodDecl, symbol: SymbolId) {
    if !ctx.model.symbol(symbol).accessibility.is_public_or_internal() {
        return;
    }
    if method.doc_comment().is_none() {
        ctx.report(
            RuleId::Wpf0061,
            method.syntax().text_range(),
            "attached property accessor should have a documentation comment",
        );
    }
}
