// crates/treeform-codec/src/lib.rs
// ============================================================================
// Module: Treeform Codec
// Description: Encoder and decoder between typed values and plain file trees.
// Purpose: Round-trip structured values through the filesystem byte-exactly.
// Dependencies: treeform-core, serde_json, tempfile, tracing
// ============================================================================

//! ## Overview
//! The codec carries typed values across a filesystem boundary. The encoder
//! lays a value out as a directory tree of plain text files following its
//! schema; the decoder reads such a tree back into a value of the same
//! types, or reports exactly which entry is missing or malformed and how to
//! fix it. Both sides resolve every schema node before branching on its
//! kind, so references and nullable unions behave identically to their
//! expanded forms.
//!
//! The tree side of the boundary is untrusted: trees are typically produced
//! incrementally by an external writer, so the decoder treats partial and
//! malformed layouts as expected inputs, never as panics.
//!
//! ### Design Notes
//! Scratch roots for producer sessions live in [`workdir`]; they are unique
//! per session and removed on drop, so concurrent sessions never observe
//! each other's trees.
//!
//! ## Index
//! - [`encoder::write_tree`]: value + schema -> directory tree.
//! - [`decoder::read_tree`]: schema + directory tree -> value or diagnosis.
//! - [`workdir`]: scratch-root lifecycle for producer sessions.

pub mod decoder;
pub mod encoder;
pub mod workdir;

pub use decoder::read_tree;
pub use encoder::write_tree;
pub use workdir::remove_tree_best_effort;
pub use workdir::scratch_root;
pub use workdir::scratch_root_in;
