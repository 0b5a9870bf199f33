// crates/treeform-guide/tests/agreement.rs
// ============================================================================
// Module: Instruction/Codec Agreement Tests
// Description: The generated document and the codec name the same entries.
// Purpose: Catch drift between what is described and what is decoded.
// ============================================================================

//! Cross-checks the instruction document against real encoded trees.

use std::path::Path;

use serde_json::json;

use treeform_codec::read_tree;
use treeform_codec::write_tree;
use treeform_core::SchemaNode;
use treeform_guide::layout_instructions;

/// Schema shared by the agreement checks: scalars, a nested compound entry,
/// a scalar list, and a referenced compound list.
fn report_schema() -> SchemaNode {
    SchemaNode::object([
        ("title", SchemaNode::string()),
        ("year", SchemaNode::integer()),
        (
            "author",
            SchemaNode::object([
                ("name", SchemaNode::string()),
                ("email", SchemaNode::string()),
            ])
            .with_required(["name", "email"]),
        ),
        ("tags", SchemaNode::array(SchemaNode::string())),
        ("findings", SchemaNode::array(SchemaNode::reference("Finding"))),
    ])
    .with_required(["title", "year", "author", "tags", "findings"])
    .with_definition(
        "Finding",
        SchemaNode::object([
            ("summary", SchemaNode::string()),
            ("severity", SchemaNode::integer()),
        ])
        .with_required(["summary", "severity"]),
    )
}

/// Collects the name of every entry under `root`, recursively.
fn collect_entry_names(
    root: &Path,
    names: &mut Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_owned());
        }
        if entry.file_type()?.is_dir() {
            collect_entry_names(&entry.path(), names)?;
        }
    }
    Ok(())
}

#[test]
fn every_encoded_entry_is_named_in_the_instructions()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = report_schema();
    let document = json!({
        "title": "Quarterly review",
        "year": 2026,
        "author": { "name": "Ada", "email": "ada@example.org" },
        "tags": ["infra", "storage"],
        "findings": [
            { "summary": "cache misses", "severity": 2 },
            { "summary": "stale index", "severity": 1 },
        ],
    });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    let instructions = layout_instructions(&schema, dir.path(), schema.registry());
    let mut names = Vec::new();
    collect_entry_names(dir.path(), &mut names)?;
    assert!(!names.is_empty());
    for name in names {
        assert!(
            instructions.contains(&name),
            "encoded entry {name} is never mentioned in the instructions"
        );
    }
    Ok(())
}

#[test]
fn required_listing_matches_what_decoding_enforces()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = report_schema();
    let document = json!({
        "title": "Quarterly review",
        "year": 2026,
        "author": { "name": "Ada", "email": "ada@example.org" },
        "tags": [],
        "findings": [],
    });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    let instructions = layout_instructions(&schema, dir.path(), schema.registry());
    assert!(instructions.contains("\n- year\n"));

    // Removing a listed-required entry must produce a diagnosis naming it.
    std::fs::remove_file(dir.path().join("year.txt"))?;
    let Err(error) = read_tree(&schema, dir.path(), schema.registry()) else {
        return Err("a tree missing a required entry should not decode".into());
    };
    assert!(error.to_string().contains("year.txt"));
    Ok(())
}

#[test]
fn instructions_never_touch_the_destination() -> Result<(), Box<dyn std::error::Error>> {
    let schema = report_schema();
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("never-created");
    let instructions = layout_instructions(&schema, &root, schema.registry());
    assert!(instructions.contains("never-created"));
    assert!(!root.exists());
    Ok(())
}
