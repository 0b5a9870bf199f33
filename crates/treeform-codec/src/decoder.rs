// crates/treeform-codec/src/decoder.rs
// ============================================================================
// Module: Tree Decoder
// Description: Reads a directory tree back into a typed value.
// Purpose: Recover exact value types from plain files, or say what to fix.
// Dependencies: treeform-core, serde_json, tracing, std
// ============================================================================

//! ## Overview
//! The decoder walks a schema against a directory tree and rebuilds the
//! value the encoder (or an external producer) laid out. Types come from the
//! schema, not from the file text: `42` under a whole-number entry decodes
//! to an integer, under a numeric entry to an integer as well, and only a
//! decimal or exponent marker in the text produces a float.
//!
//! Absence is meaningful. An absent optional entry is omitted from the
//! decoded value, an absent nullable entry decodes to `Null`, and an absent
//! required entry stops decoding with a message naming the exact missing
//! path and how to create it. Numbering gaps in lists decode to `Null`
//! items; the list length is one past the highest entry present.
//!
//! The tree is untrusted input. Stray entries the schema does not name are
//! ignored, non-UTF-8 entry names are skipped, and every malformed layout
//! maps to a diagnosis rather than a panic.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Map;
use serde_json::Value;

use treeform_core::layout;
use treeform_core::scalar;
use treeform_core::ArrayShape;
use treeform_core::ObjectShape;
use treeform_core::ResolvedSchema;
use treeform_core::ResolvedShape;
use treeform_core::ScalarKind;
use treeform_core::SchemaNode;
use treeform_core::SchemaRegistry;
use treeform_core::TreeError;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Reads the tree under `source` into a value following the resolved
/// `schema`.
///
/// # Errors
/// Returns [`TreeError::MissingRequired`] when the root or a required,
/// non-nullable entry is absent, [`TreeError::TypeMismatch`] when present
/// content or entry kinds contradict the schema (including a scalar root
/// schema), and [`TreeError::Io`] when a filesystem operation fails. Every
/// message names the offending path and a concrete fix.
pub fn read_tree(
    schema: &SchemaNode,
    source: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<Value, TreeError> {
    tracing::debug!(
        target: "treeform.codec",
        root = %source.display(),
        "reading value tree"
    );
    match probe_entry(source)? {
        Probe::Dir => {}
        Probe::File => return Err(TreeError::file_where_directory(source)),
        Probe::Absent => return Err(TreeError::missing_root(source)),
    }
    let resolved = schema.resolve(registry);
    match resolved.shape() {
        ResolvedShape::Scalar(_) => Err(TreeError::scalar_root(source)),
        ResolvedShape::Object(shape) => read_object(shape, source, registry),
        ResolvedShape::Array(shape) => read_array(shape, source, registry),
    }
}

// ============================================================================
// SECTION: Recursive Readers
// ============================================================================

/// Reads the named entries of one compound directory, in schema order.
fn read_object(
    shape: ObjectShape<'_>,
    dir: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<Value, TreeError> {
    let mut entries = Map::new();
    for (name, node) in shape.properties() {
        let resolved = node.resolve(registry);
        if let Some(value) = read_field(name, resolved, shape.is_required(name), dir, registry)? {
            entries.insert(name.to_owned(), value);
        }
    }
    Ok(Value::Object(entries))
}

/// Reads one named entry at its resolved shape.
///
/// Returns `Ok(None)` when the entry is absent and optional, so the caller
/// omits it from the decoded value entirely.
fn read_field(
    name: &str,
    resolved: ResolvedSchema<'_>,
    required: bool,
    dir: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<Option<Value>, TreeError> {
    match resolved.shape() {
        ResolvedShape::Scalar(kind) => {
            let path = dir.join(layout::scalar_file_name(name));
            match read_scalar(&path, kind)? {
                Some(value) => Ok(Some(value)),
                None => absent(required, resolved.is_nullable(), || {
                    TreeError::missing_scalar(&path, kind)
                }),
            }
        }
        ResolvedShape::Object(inner) => {
            let path = dir.join(name);
            match probe_entry(&path)? {
                Probe::Dir => read_object(inner, &path, registry).map(Some),
                Probe::File => Err(TreeError::file_where_directory(&path)),
                Probe::Absent => absent(required, resolved.is_nullable(), || {
                    TreeError::missing_object_dir(&path, inner.names())
                }),
            }
        }
        ResolvedShape::Array(inner) => {
            let path = dir.join(name);
            match probe_entry(&path)? {
                Probe::Dir => read_array(inner, &path, registry).map(Some),
                Probe::File => Err(TreeError::file_where_directory(&path)),
                Probe::Absent => {
                    let holds_objects =
                        matches!(inner.resolve_items(registry).shape(), ResolvedShape::Object(_));
                    absent(required, resolved.is_nullable(), || {
                        TreeError::missing_array_dir(&path, holds_objects)
                    })
                }
            }
        }
    }
}

/// Reads the numbered entries of one list directory.
fn read_array(
    shape: ArrayShape<'_>,
    dir: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<Value, TreeError> {
    let item_schema = shape.resolve_items(registry);
    match item_schema.shape() {
        ResolvedShape::Scalar(kind) => read_scalar_entries(dir, kind),
        ResolvedShape::Object(inner) => read_compound_entries(dir, inner, registry),
        ResolvedShape::Array(_) => Err(TreeError::nested_array(dir)),
    }
}

/// Collects `NNNN.txt` entries of a scalar list into index order.
fn read_scalar_entries(dir: &Path, kind: ScalarKind) -> Result<Value, TreeError> {
    let mut slots: BTreeMap<usize, Value> = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(|source| TreeError::io(dir, source))? {
        let entry = entry.map_err(|source| TreeError::io(dir, source))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(index) = layout::scalar_entry_index(name) {
            check_bound(dir, index)?;
            let path = entry.path();
            if path.is_dir() {
                return Err(TreeError::directory_where_file(&path));
            }
            if let Some(value) = read_scalar(&path, kind)? {
                slots.insert(index, value);
            }
        } else if let Some(index) = layout::dir_entry_index(name) {
            let path = entry.path();
            return Err(TreeError::entry_should_be_file(
                &path,
                &dir.join(layout::array_file_name(index)),
            ));
        }
    }
    Ok(Value::Array(fill_gaps(slots)))
}

/// Collects `NNNN/` entries of a compound list into index order.
fn read_compound_entries(
    dir: &Path,
    inner: ObjectShape<'_>,
    registry: SchemaRegistry<'_>,
) -> Result<Value, TreeError> {
    let mut slots: BTreeMap<usize, Value> = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(|source| TreeError::io(dir, source))? {
        let entry = entry.map_err(|source| TreeError::io(dir, source))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(index) = layout::dir_entry_index(name) {
            check_bound(dir, index)?;
            let path = entry.path();
            if !path.is_dir() {
                return Err(TreeError::file_where_directory(&path));
            }
            slots.insert(index, read_object(inner, &path, registry)?);
        } else if let Some(index) = layout::scalar_entry_index(name) {
            let path = entry.path();
            return Err(TreeError::entry_should_be_directory(
                &path,
                &dir.join(layout::array_dir_name(index)),
            ));
        }
    }
    Ok(Value::Array(fill_gaps(slots)))
}

/// Reads and parses one scalar leaf file.
///
/// Returns `Ok(None)` when the file does not exist; content is trimmed of
/// surrounding whitespace before parsing, matching how producers tend to
/// write it.
fn read_scalar(path: &Path, kind: ScalarKind) -> Result<Option<Value>, TreeError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            if path.is_dir() {
                return Err(TreeError::directory_where_file(path));
            }
            return Err(TreeError::io(path, source));
        }
    };
    let trimmed = text.trim();
    match scalar::parse(kind, trimmed) {
        Some(value) => Ok(Some(value)),
        None => Err(TreeError::invalid_scalar(path, kind, trimmed)),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// What the filesystem holds at a probed path.
enum Probe {
    /// A directory.
    Dir,
    /// A file or other non-directory entry.
    File,
    /// Nothing at all.
    Absent,
}

/// Classifies the filesystem entry at `path` without reading it.
fn probe_entry(path: &Path) -> Result<Probe, TreeError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Probe::Dir),
        Ok(_) => Ok(Probe::File),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(Probe::Absent),
        Err(source) => Err(TreeError::io(path, source)),
    }
}

/// Maps an absent entry onto its decoded meaning.
///
/// Optional entries decode to omission and nullable ones to `Null`; a
/// required, non-nullable entry is diagnosed via `missing`.
fn absent<F>(required: bool, nullable: bool, missing: F) -> Result<Option<Value>, TreeError>
where
    F: FnOnce() -> TreeError,
{
    if !required {
        return Ok(None);
    }
    if nullable {
        return Ok(Some(Value::Null));
    }
    Err(missing())
}

/// Rejects entry indexes outside the supported numbering range.
fn check_bound(dir: &Path, index: usize) -> Result<(), TreeError> {
    if index >= layout::MAX_ARRAY_ENTRIES {
        return Err(TreeError::array_bound(dir, index));
    }
    Ok(())
}

/// Expands indexed slots into a dense list, `Null` in every gap.
///
/// The list length is one past the highest index present; an empty slot map
/// yields an empty list.
fn fill_gaps(slots: BTreeMap<usize, Value>) -> Vec<Value> {
    let Some((&highest, _)) = slots.last_key_value() else {
        return Vec::new();
    };
    let mut items = vec![Value::Null; highest.saturating_add(1)];
    for (index, value) in slots {
        if let Some(slot) = items.get_mut(index) {
            *slot = value;
        }
    }
    items
}

// ============================================================================
// SECTION: Tests
// ============================================================================
