// crates/treeform-guide/src/lib.rs
// ============================================================================
// Module: Treeform Guide
// Description: Generates producer-facing instructions for a tree layout.
// Purpose: Tell an external producer exactly which files to create where.
// Dependencies: treeform-core, tracing
// ============================================================================

//! ## Overview
//! Trees are written by an external producer that has never seen the schema,
//! so the guide turns a schema into a plain-language document: which file or
//! directory to create for each entry, how each kind of value is spelled,
//! and a worked example tree. The document is generated by walking the same
//! resolved schema the codec walks, so it cannot drift from what the decoder
//! will accept.
//!
//! ## Index
//! - [`instructions::layout_instructions`]: schema + destination -> document.

pub mod instructions;

pub use instructions::layout_instructions;
