//! Dependency property declaration recognition.
//!
//! ## Architecture
//!
//! ```text
//! catalog / matchers → framework identities, compared by qualified name
//!     ↓
//! backing            → static token fields and properties
//!     ↓
//! registration       → Register* / AddOwner / OverrideMetadata calls
//!     ├─ metadata    → default value and callbacks by constructor role
//!     └─ callback    → method group, delegate creation, forwarding lambda
//!     ↓
//! clr                → CLR accessors and attached Get/Set methods
//!     ↓
//! recognizer         → one declaration → Option<Recognized>
//! ```
//!
//! Everything here is a read-only view derived on demand from a
//! [`SemanticModel`](crate::semantic::SemanticModel). Nothing logs and nothing
//! fails except constructing a [`BackingMember`] from the wrong kind of symbol.

pub mod backing;
pub mod callback;
pub mod catalog;
pub mod clr;
pub mod matchers;
pub mod metadata;
mod pool;
pub mod recognizer;
pub mod registration;

pub use backing::{BackingMember, BackingMemberError, MemberInfo};
pub use callback::{CallbackBinding, CallbackForm, CallbackOwnership, CallbackRole};
pub use catalog::{QualifiedMethod, QualifiedType};
pub use clr::{
    AttachedGet, AttachedSet, ClrAccessorPair, ClrCorrelation, ClrSetterWalker, GetterCall,
    SetterCall, SetterState,
};
pub use metadata::PropertyMetadataDescriptor;
pub use recognizer::{
    AttachedGetMethod, AttachedSetMethod, ClrProperty, ReadOnlyAlias, Recognized, RegisteredMember,
    recognize, recognize_file,
};
pub use registration::{RegistrationCall, RegistrationKind, registration_of};
