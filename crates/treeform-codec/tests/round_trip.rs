// crates/treeform-codec/tests/round_trip.rs
// ============================================================================
// Module: Round-Trip Integration Tests
// Description: Encode-then-decode fidelity across full documents.
// Purpose: Pin exact type recovery and byte-stable re-encoding.
// ============================================================================

//! Whole-document round trips through a real filesystem.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde_json::json;
use serde_json::Value;

use treeform_codec::read_tree;
use treeform_codec::write_tree;
use treeform_core::SchemaNode;

/// Document schema exercising every entry kind at once: four scalar kinds,
/// a nullable entry, an optional entry, a nested compound entry, a scalar
/// list, and a referenced compound list.
fn library_schema() -> SchemaNode {
    SchemaNode::object([
        ("title", SchemaNode::string()),
        ("year", SchemaNode::integer()),
        ("rating", SchemaNode::number()),
        ("in_print", SchemaNode::boolean()),
        ("subtitle", SchemaNode::string().nullable()),
        ("notes", SchemaNode::string()),
        (
            "author",
            SchemaNode::object([
                ("name", SchemaNode::string()),
                ("email", SchemaNode::string()),
            ])
            .with_required(["name", "email"]),
        ),
        ("tags", SchemaNode::array(SchemaNode::string())),
        ("chapters", SchemaNode::array(SchemaNode::reference("Chapter"))),
    ])
    .with_required([
        "title", "year", "rating", "in_print", "subtitle", "author", "tags", "chapters",
    ])
    .with_definition(
        "Chapter",
        SchemaNode::object([
            ("heading", SchemaNode::string()),
            ("pages", SchemaNode::integer()),
        ])
        .with_required(["heading", "pages"]),
    )
}

/// A document that exercises the whole schema, with `notes` deliberately
/// absent and a gap in the middle of `tags`.
fn library_document() -> Value {
    json!({
        "title": "Treeform",
        "year": 2026,
        "rating": 4.5,
        "in_print": true,
        "subtitle": null,
        "author": { "name": "Ada", "email": "ada@example.org" },
        "tags": ["draft", null, "reviewed"],
        "chapters": [
            { "heading": "Layout", "pages": 12 },
            { "heading": "Diagnosis", "pages": 9 },
        ],
    })
}

/// Collects every entry under `root` keyed by relative path: file bytes as
/// `Some`, directories as `None`, so tree shape and content compare at once.
fn collect_tree(root: &Path) -> Result<BTreeMap<PathBuf, Option<Vec<u8>>>, Box<dyn std::error::Error>> {
    let mut entries = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let relative = path.strip_prefix(root)?.to_path_buf();
            if entry.file_type()?.is_dir() {
                entries.insert(relative, None);
                pending.push(path);
            } else {
                entries.insert(relative, Some(std::fs::read(&path)?));
            }
        }
    }
    Ok(entries)
}

#[test]
fn full_document_round_trips_identically() -> Result<(), Box<dyn std::error::Error>> {
    let schema = library_schema();
    let document = library_document();
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    assert!(decoded["year"].is_i64());
    assert!(decoded["rating"].is_f64());
    let Value::Object(entries) = &decoded else {
        return Err("decoded root should be a group of named entries".into());
    };
    assert!(!entries.contains_key("notes"));
    let names: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        ["title", "year", "rating", "in_print", "subtitle", "author", "tags", "chapters"]
    );
    Ok(())
}

#[test]
fn re_encoding_a_decoded_document_is_byte_identical()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = library_schema();
    let document = library_document();
    let first = tempfile::tempdir()?;
    write_tree(&document, &schema, first.path(), schema.registry())?;
    let decoded = read_tree(&schema, first.path(), schema.registry())?;
    let second = tempfile::tempdir()?;
    write_tree(&decoded, &schema, second.path(), schema.registry())?;
    assert_eq!(collect_tree(first.path())?, collect_tree(second.path())?);
    Ok(())
}

#[test]
fn integer_and_float_kinds_stay_distinct_across_the_trip()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaNode::object([
        ("count", SchemaNode::number()),
        ("ratio", SchemaNode::number()),
        ("low", SchemaNode::integer()),
        ("high", SchemaNode::integer()),
    ])
    .with_required(["count", "ratio", "low", "high"]);
    let document = json!({
        "count": 42,
        "ratio": 42.0,
        "low": i64::MIN,
        "high": u64::MAX,
    });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    assert!(decoded["count"].is_i64());
    assert!(decoded["ratio"].is_f64());
    assert_eq!(decoded["low"].as_i64(), Some(i64::MIN));
    assert_eq!(decoded["high"].as_u64(), Some(u64::MAX));
    Ok(())
}

#[test]
fn list_gaps_round_trip_as_nulls() -> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaNode::object([("tags", SchemaNode::array(SchemaNode::string()))])
        .with_required(["tags"]);
    let document = json!({ "tags": ["a", null, null, "d"] });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    Ok(())
}

#[test]
fn empty_containers_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaNode::object([
        ("tags", SchemaNode::array(SchemaNode::string())),
        ("summary", SchemaNode::string()),
    ])
    .with_required(["tags", "summary"]);
    let document = json!({ "tags": [], "summary": "" });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    Ok(())
}
