//! CLR accessors: properties and attached `Get*`/`Set*` methods that wrap
//! `GetValue` / `SetValue` / `SetCurrentValue`.

use text_size::TextRange;

use super::backing::BackingMember;
use super::catalog;
use super::matchers;
use super::pool::{Pool, Recycle};
use super::registration::read_only_alias_key;
use crate::parser::{
    AstNode, Body, Expr, Invocation, MethodDecl, Param, PropertyDecl, Stmt, SyntaxKind, SyntaxNode,
    Type,
};
use crate::semantic::{SemanticModel, SymbolId};

/// Progress of the setter scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SetterState {
    #[default]
    Start,
    SawSetValue,
    SawSetCurrentValue,
    /// More than one value-setting call.
    Error,
    /// Finished without finding a value-setting call.
    Done,
}

impl SetterState {
    pub fn is_success(self) -> bool {
        matches!(self, SetterState::SawSetValue | SetterState::SawSetCurrentValue)
    }
}

/// Scans a setter body for the value-setting call.
///
/// Holds only ranges so it can live in a shared [`Pool`].
#[derive(Debug, Default)]
pub struct ClrSetterWalker {
    state: SetterState,
    matched: Option<TextRange>,
    visited: usize,
}

impl Recycle for ClrSetterWalker {
    fn reset(&mut self) {
        self.state = SetterState::Start;
        self.matched = None;
        self.visited = 0;
    }
}

static SETTER_WALKERS: Pool<ClrSetterWalker> = Pool::new();

impl ClrSetterWalker {
    /// Visit invocations in preorder. Stops at the second value-setting call.
    pub fn walk(&mut self, model: &dyn SemanticModel, body: &SyntaxNode) {
        for node in body.descendants().filter(|n| n.kind() == SyntaxKind::INVOCATION) {
            self.visited += 1;
            let Some(invocation) = Invocation::cast(node) else {
                continue;
            };
            let next = if matchers::invoked(model, &invocation, &catalog::SET_VALUE) {
                SetterState::SawSetValue
            } else if matchers::invoked(model, &invocation, &catalog::SET_CURRENT_VALUE) {
                SetterState::SawSetCurrentValue
            } else {
                continue;
            };
            if self.state == SetterState::Start {
                self.state = next;
                self.matched = Some(invocation.syntax().text_range());
            } else {
                self.state = SetterState::Error;
                self.matched = None;
                return;
            }
        }
        if self.state == SetterState::Start {
            self.state = SetterState::Done;
        }
    }

    pub fn state(&self) -> SetterState {
        self.state
    }

    pub fn matched(&self) -> Option<TextRange> {
        self.matched
    }

    /// Invocations inspected so far.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

/// Result of scanning a setter body.
#[derive(Debug, Clone, PartialEq)]
pub struct SetterScan {
    pub state: SetterState,
    pub invocation: Option<Invocation>,
}

/// Run a pooled [`ClrSetterWalker`] over `body`.
pub fn scan_setter(model: &dyn SemanticModel, body: &SyntaxNode) -> SetterScan {
    let mut walker = SETTER_WALKERS.acquire();
    walker.walk(model, body);
    let invocation = walker.matched().and_then(|range| {
        body.descendants()
            .filter(|n| n.kind() == SyntaxKind::INVOCATION)
            .find(|n| n.text_range() == range)
            .and_then(Invocation::cast)
    });
    tracing::trace!(
        invocations = walker.visited(),
        state = ?walker.state(),
        "setter scanned"
    );
    SetterScan {
        state: walker.state(),
        invocation,
    }
}

/// `(T)GetValue(FooProperty)` in a getter or attached `Get*` method.
#[derive(Debug, Clone, PartialEq)]
pub struct GetterCall {
    pub invocation: Invocation,
    /// Type of an enclosing `(T)` cast or `as T`.
    pub cast: Option<Type>,
    pub token: Expr,
    pub member: BackingMember,
}

impl GetterCall {
    /// Find the returned `GetValue` call among the body's top-level statements.
    pub fn match_body(model: &dyn SemanticModel, body: &Body) -> Option<Self> {
        body.statements()
            .into_iter()
            .find_map(|statement| returned_expr(&statement))
            .and_then(|expr| Self::match_expr(model, &expr))
    }

    fn match_expr(model: &dyn SemanticModel, expr: &Expr) -> Option<Self> {
        let (cast, call) = match expr.clone().unparenthesized() {
            Expr::Cast(cast) => (cast.ty(), cast.expr()?.unparenthesized()),
            Expr::Is(is) if is.is_as() => (is.ty(), is.expr()?.unparenthesized()),
            other => (None, other),
        };
        let Expr::Invocation(invocation) = call else {
            return None;
        };
        if !matchers::invoked(model, &invocation, &catalog::GET_VALUE) {
            return None;
        }
        let token = invocation.args().first()?.expr()?;
        let member = BackingMember::from_expr(model, &token)?;
        Some(Self {
            invocation,
            cast,
            token,
            member,
        })
    }
}

/// The expression a statement returns: `return x;` or an expression body.
fn returned_expr(statement: &SyntaxNode) -> Option<Expr> {
    match statement.kind() {
        SyntaxKind::ARROW_BODY => crate::parser::ArrowBody::cast(statement.clone())?.expr(),
        _ => match Stmt::cast(statement.clone())? {
            Stmt::Return(ret) => ret.expr(),
            _ => None,
        },
    }
}

/// The `SetValue` / `SetCurrentValue` call in a setter or attached `Set*` method.
#[derive(Debug, Clone, PartialEq)]
pub struct SetterCall {
    pub invocation: Invocation,
    pub state: SetterState,
    pub token: Expr,
    pub value: Option<Expr>,
    pub member: BackingMember,
}

impl SetterCall {
    fn from_scan(model: &dyn SemanticModel, scan: SetterScan) -> Option<Self> {
        let invocation = scan.invocation?;
        let args = invocation.args();
        let token = args.first()?.expr()?;
        let member = BackingMember::from_expr(model, &token)?;
        Some(Self {
            value: args.get(1).and_then(|a| a.expr()),
            invocation,
            state: scan.state,
            token,
            member,
        })
    }

    pub fn is_set_current_value(&self) -> bool {
        self.state == SetterState::SawSetCurrentValue
    }
}

/// A getter and setter that wrap the same property.
#[derive(Debug, Clone, PartialEq)]
pub struct ClrAccessorPair {
    pub getter: GetterCall,
    pub setter: SetterCall,
}

impl ClrAccessorPair {
    pub fn state(&self) -> SetterState {
        self.setter.state
    }

    /// Set through a key, read through its public alias.
    pub fn is_read_only(&self, model: &dyn SemanticModel) -> bool {
        self.setter.member.is_key(model)
    }
}

/// How a property's accessors relate to dependency property tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum ClrCorrelation {
    Pair(ClrAccessorPair),
    /// The setter calls more than one of `SetValue` / `SetCurrentValue`.
    AmbiguousSetter { getter: GetterCall },
    /// Getter and setter use different properties.
    Mismatched {
        getter: GetterCall,
        setter: SetterCall,
    },
    /// No setter, or a setter that does not delegate.
    GetterOnly(GetterCall),
}

impl ClrCorrelation {
    pub fn getter(&self) -> &GetterCall {
        match self {
            ClrCorrelation::Pair(pair) => &pair.getter,
            ClrCorrelation::AmbiguousSetter { getter }
            | ClrCorrelation::Mismatched { getter, .. }
            | ClrCorrelation::GetterOnly(getter) => getter,
        }
    }

    pub fn pair(&self) -> Option<&ClrAccessorPair> {
        match self {
            ClrCorrelation::Pair(pair) => Some(pair),
            _ => None,
        }
    }
}

/// Same logical property: the same token, or a key written and its public
/// alias read.
pub fn same_property(model: &dyn SemanticModel, read: &BackingMember, write: &BackingMember) -> bool {
    if read.symbol() == write.symbol() {
        return true;
    }
    if !write.is_key(model) {
        return false;
    }
    match read.value(model).map(Expr::unparenthesized) {
        Some(Expr::MemberAccess(access)) => {
            read_only_alias_key(model, &access).is_some_and(|key| key.symbol() == write.symbol())
        }
        _ => false,
    }
}

/// Correlate a property's getter and setter. `None` when the getter does not
/// return a `GetValue` call.
///
/// Statements besides the value-setting call do not break a [`ClrCorrelation::Pair`];
/// [`first_side_effect`] finds them.
pub fn correlate_property(model: &dyn SemanticModel, property: &PropertyDecl) -> Option<ClrCorrelation> {
    let getter = GetterCall::match_body(model, &property.getter_body()?)?;
    let Some(body) = property.setter().and_then(|s| s.body()) else {
        return Some(ClrCorrelation::GetterOnly(getter));
    };
    let scan = scan_setter(model, body.syntax());
    match scan.state {
        SetterState::Error => return Some(ClrCorrelation::AmbiguousSetter { getter }),
        SetterState::Start | SetterState::Done => return Some(ClrCorrelation::GetterOnly(getter)),
        SetterState::SawSetValue | SetterState::SawSetCurrentValue => {}
    }
    let Some(setter) = SetterCall::from_scan(model, scan) else {
        return Some(ClrCorrelation::GetterOnly(getter));
    };
    if same_property(model, &getter.member, &setter.member) {
        Some(ClrCorrelation::Pair(ClrAccessorPair { getter, setter }))
    } else {
        Some(ClrCorrelation::Mismatched { getter, setter })
    }
}

/// First top-level statement of `body` that is not part of `call`.
pub fn first_side_effect(body: &Body, call: &Invocation) -> Option<SyntaxNode> {
    let range = call.syntax().text_range();
    body.statements()
        .into_iter()
        .find(|statement| !statement.text_range().contains_range(range))
}

// ============================================================================
// Attached property accessor methods
// ============================================================================

/// `static T GetFoo(DependencyObject element) => (T)element.GetValue(FooProperty);`
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedGet {
    pub method: MethodDecl,
    pub symbol: SymbolId,
    pub element: Param,
    pub call: GetterCall,
}

/// `static void SetFoo(DependencyObject element, T value) => element.SetValue(FooProperty, value);`
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedSet {
    pub method: MethodDecl,
    pub symbol: SymbolId,
    pub element: Param,
    pub value: Param,
    pub call: SetterCall,
}

/// Static method whose first parameter is a `DependencyObject`.
fn attached_shape(
    model: &dyn SemanticModel,
    method: &MethodDecl,
    prefix: &str,
    arity: usize,
) -> Option<(SymbolId, Vec<Param>)> {
    let symbol = model.declared_symbol(method.syntax())?;
    let name = method.name()?.text()?;
    if !method.is_static() || !name.starts_with(prefix) || name.len() == prefix.len() {
        return None;
    }
    let params = method.params();
    if params.len() != arity {
        return None;
    }
    let element_type = model.resolve_type(&params.first()?.ty()?);
    if !matchers::derives_from(model, &element_type, &catalog::DEPENDENCY_OBJECT) {
        return None;
    }
    Some((symbol, params))
}

/// The call's receiver is the method's element parameter.
fn called_on(model: &dyn SemanticModel, invocation: &Invocation, element: &Param) -> bool {
    let Some(Expr::MemberAccess(access)) = invocation.callee() else {
        return false;
    };
    let Some(receiver) = access.receiver() else {
        return false;
    };
    let element_symbol = model.declared_symbol(element.syntax());
    element_symbol.is_some() && model.resolve_symbol(&receiver.unparenthesized()) == element_symbol
}

pub fn match_attached_get(model: &dyn SemanticModel, method: &MethodDecl) -> Option<AttachedGet> {
    let (symbol, params) = attached_shape(model, method, "Get", 1)?;
    if model.compilation().is_void(&model.symbol(symbol).ty) {
        return None;
    }
    let element = params.into_iter().next()?;
    let call = GetterCall::match_body(model, &method.body()?)?;
    if !called_on(model, &call.invocation, &element) {
        return None;
    }
    Some(AttachedGet {
        method: method.clone(),
        symbol,
        element,
        call,
    })
}

pub fn match_attached_set(model: &dyn SemanticModel, method: &MethodDecl) -> Option<AttachedSet> {
    let (symbol, params) = attached_shape(model, method, "Set", 2)?;
    if !model.compilation().is_void(&model.symbol(symbol).ty) {
        return None;
    }
    let body = method.body()?;
    let scan = scan_setter(model, body.syntax());
    if !scan.state.is_success() {
        return None;
    }
    let call = SetterCall::from_scan(model, scan)?;
    let mut params = params.into_iter();
    let element = params.next()?;
    let value = params.next()?;
    if !called_on(model, &call.invocation, &element) {
        return None;
    }
    Some(AttachedSet {
        method: method.clone(),
        symbol,
        element,
        value,
        call,
    })
}
