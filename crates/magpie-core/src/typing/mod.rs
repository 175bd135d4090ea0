//! Receiver type classification.
//!
//! The linter's prototype-method rules need to know what kind of value
//! a member access is performed on. This module answers that question
//! two ways: a syntactic inferencer that works from the tree and scope
//! information alone, and an optional bridge to an external type
//! checker when the host has one. Both speak the same closed [`TypeTag`]
//! vocabulary.

pub mod bridge;
pub mod classify;
pub mod globals;
pub mod infer;
pub mod tag;

pub use bridge::{
    CheckerBridge, ObjectFlags, SymbolFlags, TypeFlags, TypeHandle, TypeMatch, TypeProvider,
};
pub use classify::{MatchStrength, ReceiverClassifier};
pub use globals::WellKnownGlobal;
pub use infer::TypeInferencer;
pub use tag::{IntlFormatterKind, TypeTag, TypedArrayKind};
