//! Rewrites offered for diagnostics.
//!
//! A [`RewritePlan`] is a list of non-overlapping text edits against one
//! file. Plans are computed from a [`FixHint`] and the semantic model, and
//! applied with [`apply_plan`].

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::TextRange;
use crate::parser::{
    AstNode, Expr, Invocation, MemberAccess, NameRef, SyntaxKind, SyntaxNode, SyntaxToken, tokenize,
};
use crate::rules::{Diagnostic, FixHint};
use crate::semantic::{SemanticModel, SymbolId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("edits at {first:?} and {second:?} overlap")]
    OverlappingEdits { first: TextRange, second: TextRange },

    #[error("edit at {0:?} is outside the document")]
    OutOfBounds(TextRange),

    #[error("`{0}` is not declared in the analyzed file")]
    NotInFile(SmolStr),

    #[error("no SetCurrentValue call at {0:?}")]
    NoCall(TextRange),

    #[error("no cast type at {0:?}")]
    NoCast(TextRange),
}

/// Replace `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePlan {
    pub title: String,
    pub edits: Vec<TextEdit>,
}

/// Apply a plan's edits to `text`, back to front.
pub fn apply_plan(text: &str, plan: &RewritePlan) -> Result<String, FixError> {
    let mut edits: Vec<&TextEdit> = plan.edits.iter().collect();
    edits.sort_by_key(|edit| (edit.range.start(), edit.range.end()));
    for pair in edits.windows(2) {
        if pair[0].range.end() > pair[1].range.start() {
            return Err(FixError::OverlappingEdits {
                first: pair[0].range,
                second: pair[1].range,
            });
        }
    }

    let mut result = text.to_string();
    for edit in edits.iter().rev() {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        if end > result.len() || !result.is_char_boundary(start) || !result.is_char_boundary(end) {
            return Err(FixError::OutOfBounds(edit.range));
        }
        result.replace_range(start..end, &edit.new_text);
    }
    Ok(result)
}

/// A C# identifier that is not a reserved keyword.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || unicode_ident::is_xid_start(first)) {
        return false;
    }
    if !chars.all(unicode_ident::is_xid_continue) {
        return false;
    }
    matches!(tokenize(name).as_slice(), [token] if token.kind == SyntaxKind::IDENT)
}

/// Rename a member declared in the model's file and every reference to it
/// in that file.
pub fn rename_symbol(
    model: &dyn SemanticModel,
    symbol: SymbolId,
    new_name: &str,
) -> Result<RewritePlan, FixError> {
    if !is_valid_identifier(new_name) {
        return Err(FixError::InvalidIdentifier(new_name.to_string()));
    }
    let old_name = model.symbol(symbol).name.clone();
    let declared_here = model
        .symbol(symbol)
        .declaration
        .is_some_and(|ptr| ptr.file == model.file());
    let declaration = model
        .declaration(symbol)
        .filter(|_| declared_here)
        .ok_or_else(|| FixError::NotInFile(old_name.clone()))?;
    let root = model
        .compilation()
        .root(model.file())
        .ok_or_else(|| FixError::NotInFile(old_name.clone()))?;

    let mut edits = Vec::new();
    if let Some(token) = declared_name(&declaration) {
        edits.push(TextEdit::replace(token.text_range(), new_name));
    }
    for name_ref in root.descendants().filter_map(NameRef::cast) {
        if name_ref.text().as_deref() != Some(old_name.as_str()) {
            continue;
        }
        if reference_target(model, &name_ref) != Some(symbol) {
            continue;
        }
        if let Some(token) = name_ref.token() {
            edits.push(TextEdit::replace(token.text_range(), new_name));
        }
    }

    Ok(RewritePlan {
        title: format!("Rename to '{new_name}'"),
        edits,
    })
}

fn declared_name(declaration: &SyntaxNode) -> Option<SyntaxToken> {
    declaration
        .children()
        .find(|child| child.kind() == SyntaxKind::NAME)?
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == SyntaxKind::IDENT)
}

/// Symbol a name refers to. Member names resolve through their access.
fn reference_target(model: &dyn SemanticModel, name_ref: &NameRef) -> Option<SymbolId> {
    if name_ref.is_member_name() {
        let access = name_ref.syntax().parent().and_then(MemberAccess::cast)?;
        return model.resolve_symbol(&Expr::MemberAccess(access));
    }
    model.resolve_symbol(&Expr::NameRef(name_ref.clone()))
}

/// Turn `SetCurrentValue(...)` at `invocation` into `SetValue(...)`.
pub fn use_set_value(model: &dyn SemanticModel, invocation: TextRange) -> Result<RewritePlan, FixError> {
    let root = model
        .compilation()
        .root(model.file())
        .ok_or(FixError::NoCall(invocation))?;
    let call = root
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::INVOCATION && node.text_range() == invocation)
        .find_map(Invocation::cast)
        .ok_or(FixError::NoCall(invocation))?;
    let name = call
        .callee()
        .and_then(|callee| callee.identifier())
        .filter(|name| name.text().as_deref() == Some("SetCurrentValue"))
        .and_then(|name| name.token())
        .ok_or(FixError::NoCall(invocation))?;

    Ok(RewritePlan {
        title: "Use SetValue".to_string(),
        edits: vec![TextEdit::replace(name.text_range(), "SetValue")],
    })
}

/// Change the target type of the cast whose type syntax spans `cast_type`.
pub fn replace_cast_type(
    model: &dyn SemanticModel,
    cast_type: TextRange,
    new_type: &str,
) -> Result<RewritePlan, FixError> {
    let root = model
        .compilation()
        .root(model.file())
        .ok_or(FixError::NoCast(cast_type))?;
    root.descendants()
        .filter(|node| node.kind() == SyntaxKind::TYPE && node.text_range() == cast_type)
        .find(|node| node.parent().is_some_and(|p| p.kind() == SyntaxKind::CAST_EXPR))
        .ok_or(FixError::NoCast(cast_type))?;

    Ok(RewritePlan {
        title: format!("Cast to '{new_type}'"),
        edits: vec![TextEdit::replace(cast_type, new_type)],
    })
}

/// Rewrites available for a diagnostic in the model's file.
pub fn plans_for(model: &dyn SemanticModel, diagnostic: &Diagnostic) -> Result<Vec<RewritePlan>, FixError> {
    if diagnostic.file != model.file() {
        return Ok(Vec::new());
    }
    let plan = match &diagnostic.fix {
        Some(FixHint::Rename { symbol, new_name }) => rename_symbol(model, *symbol, new_name)?,
        Some(FixHint::UseSetValue { invocation }) => use_set_value(model, *invocation)?,
        Some(FixHint::ReplaceCastType { cast_type, new_type }) => {
            replace_cast_type(model, *cast_type, new_type)?
        }
        None => return Ok(Vec::new()),
    };
    Ok(vec![plan])
}

#[cfg(test)]
mod tests;
