// crates/treeform-codec/src/encoder.rs
// ============================================================================
// Module: Tree Encoder
// Description: Writes a typed value into a directory tree of plain files.
// Purpose: Produce the file layout the decoder (or a person) reads back.
// Dependencies: treeform-core, serde_json, tracing, std
// ============================================================================

//! ## Overview
//! The encoder walks a value and its schema together and emits one
//! filesystem entry per schema entry: scalar leaves become `<name>.txt`
//! files, compound values become subdirectories, and lists become numbered
//! files or subdirectories. `Null` values and absent optional entries
//! produce no filesystem entry at all, which is exactly the absence the
//! decoder maps back to `Null` or omission.
//!
//! Every schema node is resolved before its kind is inspected, so a
//! reference or nullable union encodes identically to its expanded form.
//! Entries already on disk that the schema does not name are left alone.

use std::fs;
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

/// Writes `value` under `destination` following the resolved `schema`.
///
/// The destination directory is created when missing, and entries are
/// written in schema order. Filesystem entries under `destination` that the
/// schema does not name are left untouched, as are value entries the schema
/// does not name. A `Null` root leaves the destination directory empty.
///
/// # Errors
/// Returns [`TreeError::TypeMismatch`] when the value does not fit the
/// resolved shape — including a scalar root schema and a list directly
/// inside a list — and [`TreeError::Io`] when a filesystem operation fails.
pub fn write_tree(
    value: &Value,
    schema: &SchemaNode,
    destination: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<(), TreeError> {
    tracing::debug!(
        target: "treeform.codec",
        root = %destination.display(),
        "writing value tree"
    );
    fs::create_dir_all(destination).map_err(|source| TreeError::io(destination, source))?;
    let resolved = schema.resolve(registry);
    match resolved.shape() {
        ResolvedShape::Scalar(_) => Err(TreeError::scalar_root(destination)),
        _ if value.is_null() => Ok(()),
        ResolvedShape::Object(shape) => {
            let Value::Object(entries) = value else {
                return Err(TreeError::value_mismatch(
                    destination,
                    "a group of named entries",
                    value_phrase(value),
                ));
            };
            write_object(entries, shape, destination, registry)
        }
        ResolvedShape::Array(shape) => {
            let Value::Array(items) = value else {
                return Err(TreeError::value_mismatch(
                    destination,
                    "a list",
                    value_phrase(value),
                ));
            };
            write_array(items, shape, destination, registry)
        }
    }
}

// ============================================================================
// SECTION: Recursive Writers
// ============================================================================

/// Writes each schema-named entry of `entries` into `dir`.
///
/// Entries absent from the value and entries holding `Null` are skipped;
/// absence on disk is the encoding of both.
fn write_object(
    entries: &Map<String, Value>,
    shape: ObjectShape<'_>,
    dir: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<(), TreeError> {
    for (name, node) in shape.properties() {
        let Some(value) = entries.get(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        write_field(name, value, node.resolve(registry), dir, registry)?;
    }
    Ok(())
}

/// Writes one named entry at its resolved shape.
fn write_field(
    name: &str,
    value: &Value,
    resolved: ResolvedSchema<'_>,
    dir: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<(), TreeError> {
    match resolved.shape() {
        ResolvedShape::Scalar(kind) => {
            write_scalar(value, kind, &dir.join(layout::scalar_file_name(name)))
        }
        ResolvedShape::Object(shape) => {
            let child = dir.join(name);
            let Value::Object(entries) = value else {
                return Err(TreeError::value_mismatch(
                    &child,
                    "a group of named entries",
                    value_phrase(value),
                ));
            };
            fs::create_dir_all(&child).map_err(|source| TreeError::io(&child, source))?;
            write_object(entries, shape, &child, registry)
        }
        ResolvedShape::Array(shape) => {
            let child = dir.join(name);
            let Value::Array(items) = value else {
                return Err(TreeError::value_mismatch(
                    &child,
                    "a list",
                    value_phrase(value),
                ));
            };
            fs::create_dir_all(&child).map_err(|source| TreeError::io(&child, source))?;
            write_array(items, shape, &child, registry)
        }
    }
}

/// Writes list items as numbered entries inside `dir`.
///
/// `Null` items are skipped, leaving numbering gaps the decoder reads back
/// as `Null`. The entry style follows the resolved item schema, never the
/// raw item node.
fn write_array(
    items: &[Value],
    shape: ArrayShape<'_>,
    dir: &Path,
    registry: SchemaRegistry<'_>,
) -> Result<(), TreeError> {
    if items.len() > layout::MAX_ARRAY_ENTRIES {
        return Err(TreeError::array_bound(dir, items.len().saturating_sub(1)));
    }
    let item_schema = shape.resolve_items(registry);
    match item_schema.shape() {
        ResolvedShape::Scalar(kind) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_null() {
                    continue;
                }
                write_scalar(item, kind, &dir.join(layout::array_file_name(index)))?;
            }
            Ok(())
        }
        ResolvedShape::Object(item_shape) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_null() {
                    continue;
                }
                let entry = dir.join(layout::array_dir_name(index));
                let Value::Object(entries) = item else {
                    return Err(TreeError::value_mismatch(
                        &entry,
                        "a group of named entries",
                        value_phrase(item),
                    ));
                };
                fs::create_dir_all(&entry).map_err(|source| TreeError::io(&entry, source))?;
                write_object(entries, item_shape, &entry, registry)?;
            }
            Ok(())
        }
        ResolvedShape::Array(_) => Err(TreeError::nested_array(dir)),
    }
}

/// Renders one scalar value into a leaf file.
fn write_scalar(value: &Value, kind: ScalarKind, path: &Path) -> Result<(), TreeError> {
    let Some(text) = scalar::render(kind, value) else {
        return Err(TreeError::value_mismatch(
            path,
            kind.description(),
            value_phrase(value),
        ));
    };
    fs::write(path, text).map_err(|source| TreeError::io(path, source))
}

/// Short phrase naming what kind of value was actually supplied.
const fn value_phrase(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing (a null value)",
        Value::Bool(_) => "a true/false value",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "a group of named entries",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
