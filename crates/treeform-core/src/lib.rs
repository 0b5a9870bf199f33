// crates/treeform-core/src/lib.rs
// ============================================================================
// Module: Treeform Core Library
// Description: Schema model, resolution, and layout rules for Treeform.
// Purpose: Shared foundation for the filesystem codec and instruction crates.
// Dependencies: indexmap, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Treeform lays structured values out as plain files and directories so an
//! unreliable external producer can build output one file at a time, and
//! reads such a tree back with exact type fidelity (integer vs. float, null
//! vs. empty string). This crate holds everything both directions share: the
//! schema node model and its registry of named definitions, the resolver that
//! turns raw nodes into inspectable shapes, the scalar text codec, the naming
//! rules of the directory convention, and the error taxonomy.
//!
//! ### Design Notes
//! - Raw schema nodes deliberately hide their kind tag outside this crate;
//!   consumers branch on [`ResolvedShape`] obtained from
//!   [`SchemaNode::resolve`]. Resolving before branching is what keeps a
//!   referenced object type from being mistaken for a scalar.
//! - Nullability is normalized at resolution time into a single flag on
//!   [`ResolvedSchema`] instead of surviving as a union type downstream.
//! - Everything here is pure; filesystem work lives in `treeform-codec`.
//!
//! ## Index
//! - Schema model: [`SchemaNode`], [`ScalarKind`], [`SchemaRegistry`]
//! - Resolution: [`ResolvedSchema`], [`ResolvedShape`], [`ObjectShape`], [`ArrayShape`]
//! - Scalar text codec: [`scalar`]
//! - Naming rules: [`layout`]
//! - Errors: [`TreeError`]

pub mod error;
pub mod layout;
pub mod resolve;
pub mod scalar;
pub mod schema;

pub use error::TreeError;
pub use resolve::ArrayShape;
pub use resolve::MAX_RESOLUTION_DEPTH;
pub use resolve::ObjectShape;
pub use resolve::ResolvedSchema;
pub use resolve::ResolvedShape;
pub use schema::ScalarKind;
pub use schema::SchemaNode;
pub use schema::SchemaRegistry;
