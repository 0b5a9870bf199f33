// crates/treeform-guide/src/instructions.rs
// ============================================================================
// Module: Layout Instructions
// Description: Renders a schema as a producer-facing layout document.
// Purpose: Let an external producer build a decodable tree unaided.
// Dependencies: treeform-core, tracing, std
// ============================================================================

//! ## Overview
//! One document, five parts: the working directory and how to create it, a
//! primer on how each kind of value is spelled on disk, a per-entry list in
//! schema order, a worked example tree, and the absence conventions. Every
//! part is derived from the resolved schema — the same resolution the codec
//! performs — so a list of referenced compound items is always described as
//! numbered subdirectories, never as numbered files.
//!
//! The reader writes files, not structured text, so the document sticks to
//! files, directories, values, and entries; no serialization vocabulary.

use std::path::Path;

use treeform_core::layout;
use treeform_core::ArrayShape;
use treeform_core::ObjectShape;
use treeform_core::ResolvedSchema;
use treeform_core::ResolvedShape;
use treeform_core::SchemaNode;
use treeform_core::SchemaRegistry;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Expansion cap for nested entries in the description list and the example
/// tree. Self-referential definitions stop expanding here instead of
/// recursing forever.
const MAX_GUIDE_DEPTH: usize = 6;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Renders the full layout document for `schema` rooted at `destination`.
///
/// Pure with respect to the filesystem: the destination path is only quoted
/// in the text, never touched.
#[must_use]
pub fn layout_instructions(
    schema: &SchemaNode,
    destination: &Path,
    registry: SchemaRegistry<'_>,
) -> String {
    tracing::debug!(
        target: "treeform.guide",
        root = %destination.display(),
        "generating layout instructions"
    );
    let resolved = schema.resolve(registry);
    let mut document = String::new();
    document.push_str("# Task: Organize Information into a File Structure\n\n");
    document.push_str(
        "Record each piece of information described below as its own plain file, \
         using the exact names shown. Everything goes inside the working directory; \
         create it first:\n\n",
    );
    document.push_str("```\nmkdir -p ");
    document.push_str(&destination.display().to_string());
    document.push_str("\n```\n\n");
    push_spelling_primer(&mut document);
    push_entry_descriptions(&mut document, resolved, registry);
    push_example_tree(&mut document, resolved, destination, registry);
    push_required_entries(&mut document, resolved);
    push_closing_notes(&mut document);
    document
}

// ============================================================================
// SECTION: Value Spelling Primer
// ============================================================================

/// The five ways a value lands on disk, independent of any schema.
fn push_spelling_primer(document: &mut String) {
    document.push_str("## How to Record Each Kind of Value\n\n");
    document.push_str(
        "- Plain text or numbers: write the value into its `<name>.txt` file \
         with nothing else around it.\n",
    );
    document.push_str("- True/false values: write exactly `true` or `false`.\n");
    document.push_str(&format!(
        "- Lists of simple values: create the list's directory and write one \
         numbered file per item: `{}`, `{}`, and so on.\n",
        layout::array_file_name(0),
        layout::array_file_name(1),
    ));
    document.push_str(&format!(
        "- Lists of compound items: create the list's directory and one numbered \
         subdirectory per item: `{}/`, `{}/`, and so on, each holding the \
         item's own files.\n",
        layout::array_dir_name(0),
        layout::array_dir_name(1),
    ));
    document.push_str(
        "- Grouped values: create a directory and record each named entry \
         inside it.\n\n",
    );
}

// ============================================================================
// SECTION: Entry Descriptions
// ============================================================================

/// Section listing every entry the producer must consider, in schema order.
fn push_entry_descriptions(
    document: &mut String,
    resolved: ResolvedSchema<'_>,
    registry: SchemaRegistry<'_>,
) {
    document.push_str("## Information to Record\n\n");
    match resolved.shape() {
        ResolvedShape::Object(shape) => {
            for (name, node) in shape.properties() {
                push_entry_line(document, name, node, registry, 0);
            }
        }
        ResolvedShape::Array(shape) => match shape.resolve_items(registry).shape() {
            ResolvedShape::Object(inner) => {
                document.push_str(&format!(
                    "- The working directory holds numbered subdirectories {}/, {}/, \
                     etc., each containing: {}\n",
                    layout::array_dir_name(0),
                    layout::array_dir_name(1),
                    contained_names(inner, registry),
                ));
                for (name, node) in inner.properties() {
                    push_entry_line(document, name, node, registry, 1);
                }
            }
            ResolvedShape::Scalar(_) | ResolvedShape::Array(_) => {
                document.push_str(&format!(
                    "- The working directory holds numbered files {}, {}, etc.\n",
                    layout::array_file_name(0),
                    layout::array_file_name(1),
                ));
            }
        },
        ResolvedShape::Scalar(_) => {
            document.push_str(
                "- This layout describes a single value; the top level must be a \
                 group of named entries or a list.\n",
            );
        }
    }
    document.push('\n');
}

/// One bullet for one named entry, recursing into compound entries.
fn push_entry_line(
    document: &mut String,
    name: &str,
    node: &SchemaNode,
    registry: SchemaRegistry<'_>,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    let resolved = node.resolve(registry);
    let note = resolved.description().map(normalize_text).unwrap_or_default();
    match resolved.shape() {
        ResolvedShape::Scalar(kind) => {
            if note.is_empty() {
                document.push_str(&format!(
                    "{indent}- {}: {}\n",
                    layout::scalar_file_name(name),
                    kind.description(),
                ));
            } else {
                document.push_str(&format!(
                    "{indent}- {}: {note} ({})\n",
                    layout::scalar_file_name(name),
                    kind.description(),
                ));
            }
        }
        ResolvedShape::Object(shape) => {
            let phrase = format!("(directory containing: {})", contained_names(shape, registry));
            if note.is_empty() {
                document.push_str(&format!("{indent}- {name}/: {phrase}\n"));
            } else {
                document.push_str(&format!("{indent}- {name}/: {note} {phrase}\n"));
            }
            if depth < MAX_GUIDE_DEPTH {
                for (child, child_node) in shape.properties() {
                    push_entry_line(document, child, child_node, registry, depth + 1);
                }
            }
        }
        ResolvedShape::Array(shape) => match shape.resolve_items(registry).shape() {
            ResolvedShape::Object(inner) => {
                let phrase = format!(
                    "(directory with numbered subdirectories {}/, {}/, etc., each \
                     containing: {})",
                    layout::array_dir_name(0),
                    layout::array_dir_name(1),
                    contained_names(inner, registry),
                );
                if note.is_empty() {
                    document.push_str(&format!("{indent}- {name}/: {phrase}\n"));
                } else {
                    document.push_str(&format!("{indent}- {name}/: {note} {phrase}\n"));
                }
                if depth < MAX_GUIDE_DEPTH {
                    for (child, child_node) in inner.properties() {
                        push_entry_line(document, child, child_node, registry, depth + 1);
                    }
                }
            }
            ResolvedShape::Scalar(_) | ResolvedShape::Array(_) => {
                let phrase = format!(
                    "(directory with numbered files {}, {}, etc.)",
                    layout::array_file_name(0),
                    layout::array_file_name(1),
                );
                if note.is_empty() {
                    document.push_str(&format!("{indent}- {name}/: {phrase}\n"));
                } else {
                    document.push_str(&format!("{indent}- {name}/: {note} {phrase}\n"));
                }
            }
        },
    }
}

// ============================================================================
// SECTION: Example Tree
// ============================================================================

/// Section drawing a worked example of the finished tree.
fn push_example_tree(
    document: &mut String,
    resolved: ResolvedSchema<'_>,
    destination: &Path,
    registry: SchemaRegistry<'_>,
) {
    document.push_str("## Example Structure\n\n```\n");
    let root_name = destination
        .file_name()
        .and_then(|name| name.to_str())
        .map_or_else(|| destination.display().to_string(), str::to_owned);
    document.push_str(&root_name);
    document.push_str("/\n");
    let mut lines = Vec::new();
    match resolved.shape() {
        ResolvedShape::Object(shape) => {
            append_object_branches(&mut lines, "", shape, registry, 0);
        }
        ResolvedShape::Array(shape) => {
            append_list_branches(&mut lines, "", shape, registry, 0);
        }
        ResolvedShape::Scalar(_) => {}
    }
    for line in lines {
        document.push_str(&line);
        document.push('\n');
    }
    document.push_str("```\n\n");
}

/// Draws one branch per object entry, recursing into compound ones.
fn append_object_branches(
    lines: &mut Vec<String>,
    prefix: &str,
    shape: ObjectShape<'_>,
    registry: SchemaRegistry<'_>,
    depth: usize,
) {
    let count = shape.len();
    for (position, (name, node)) in shape.properties().enumerate() {
        let last = position + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        let deeper = if last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        match node.resolve(registry).shape() {
            ResolvedShape::Scalar(_) => {
                lines.push(format!("{prefix}{connector}{}", layout::scalar_file_name(name)));
            }
            ResolvedShape::Object(inner) => {
                lines.push(format!("{prefix}{connector}{name}/"));
                if depth < MAX_GUIDE_DEPTH {
                    append_object_branches(lines, &deeper, inner, registry, depth + 1);
                }
            }
            ResolvedShape::Array(inner) => {
                lines.push(format!("{prefix}{connector}{name}/"));
                if depth < MAX_GUIDE_DEPTH {
                    append_list_branches(lines, &deeper, inner, registry, depth + 1);
                }
            }
        }
    }
}

/// Draws two example items for a list: expanded first item, bare second.
fn append_list_branches(
    lines: &mut Vec<String>,
    prefix: &str,
    shape: ArrayShape<'_>,
    registry: SchemaRegistry<'_>,
    depth: usize,
) {
    match shape.resolve_items(registry).shape() {
        ResolvedShape::Object(inner) => {
            lines.push(format!("{prefix}├── {}/", layout::array_dir_name(0)));
            if depth < MAX_GUIDE_DEPTH {
                let deeper = format!("{prefix}│   ");
                append_object_branches(lines, &deeper, inner, registry, depth + 1);
            }
            lines.push(format!("{prefix}└── {}/", layout::array_dir_name(1)));
        }
        ResolvedShape::Scalar(_) | ResolvedShape::Array(_) => {
            lines.push(format!("{prefix}├── {}", layout::array_file_name(0)));
            lines.push(format!("{prefix}└── {}", layout::array_file_name(1)));
        }
    }
}

// ============================================================================
// SECTION: Closing Sections
// ============================================================================

/// Section naming the entries that must exist for decoding to succeed.
fn push_required_entries(document: &mut String, resolved: ResolvedSchema<'_>) {
    let ResolvedShape::Object(shape) = resolved.shape() else {
        return;
    };
    let mut names = shape.required_names().peekable();
    if names.peek().is_none() {
        return;
    }
    document.push_str("## Required Entries\n\n");
    document.push_str("These entries must exist before the result is read:\n\n");
    for name in names {
        document.push_str("- ");
        document.push_str(name);
        document.push('\n');
    }
    document.push('\n');
}

/// Absence conventions and exact-spelling rules the producer must follow.
fn push_closing_notes(document: &mut String) {
    document.push_str("**Important:**\n");
    document.push_str("- Use the exact file and directory names shown above.\n");
    document.push_str(
        "- When a value is unknown or not applicable, do not create its file at all.\n",
    );
    document.push_str(
        "- Empty text is different from no value: create the file and leave it empty.\n",
    );
    document.push_str("- A list with no items still needs its directory, left empty.\n");
    document.push_str(
        "- Whole numbers are plain digits; fractional values use a decimal point.\n",
    );
    document.push_str("- True/false values are spelled exactly true or false.\n");
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// The on-disk name of one entry: `<name>.txt` for scalars, `<name>/`
/// otherwise.
fn entry_display_name(name: &str, node: &SchemaNode, registry: SchemaRegistry<'_>) -> String {
    match node.resolve(registry).shape() {
        ResolvedShape::Scalar(_) => layout::scalar_file_name(name),
        ResolvedShape::Object(_) | ResolvedShape::Array(_) => format!("{name}/"),
    }
}

/// Comma-joined on-disk names of an object's entries.
fn contained_names(shape: ObjectShape<'_>, registry: SchemaRegistry<'_>) -> String {
    shape
        .properties()
        .map(|(name, node)| entry_display_name(name, node, registry))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collapses a description's whitespace so it sits on one bullet line.
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
