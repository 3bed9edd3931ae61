//! Semantic layer: symbols, types and name binding over parsed C#.
//!
//! ## Architecture
//!
//! ```text
//! Parse (GreenNode per file) + framework declarations
//!     ↓
//! Compilation   → symbol arena, type index, scopes
//!     ↓
//! FileSemantics → name binding, expression types, overload resolution
//!     ↓
//! SemanticModel → trait consumed by the dependency-property recognizers
//! ```
//!
//! The framework reference surface (`System`, `System.Windows`, ...) is parsed
//! from [`framework::FRAMEWORK_SOURCE`] into every compilation. Its symbols
//! have [`SymbolOrigin::Metadata`] and no declaration syntax.

mod binder;
mod compilation;
pub mod framework;
mod model;
mod symbols;

pub use binder::{Binding, FileSemantics};
pub use compilation::{Compilation, Scope};
pub use model::{SemanticModel, align_arguments, argument_for};
pub use symbols::{
    Accessibility, MethodSignature, NodePtr, ParameterInfo, QualifiedName, Symbol, SymbolId,
    SymbolKind, SymbolOrigin, TypeRef,
};

#[cfg(test)]
mod tests;
