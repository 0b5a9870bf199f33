// crates/treeform-codec/tests/reference_resolution.rs
// ============================================================================
// Module: Reference Resolution Integration Tests
// Description: Codec behavior across referenced and nullable-union schemas.
// Purpose: Pin that indirection encodes and decodes like its expanded form.
// ============================================================================

//! Referenced definitions and nullable unions through the full codec.

use serde_json::json;

use treeform_codec::read_tree;
use treeform_codec::write_tree;
use treeform_core::SchemaNode;

#[test]
fn referenced_compound_list_items_use_directories()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaNode::object([(
        "tasks",
        SchemaNode::array(SchemaNode::reference("Task")),
    )])
    .with_required(["tasks"])
    .with_definition(
        "Task",
        SchemaNode::object([
            ("title", SchemaNode::string()),
            ("done", SchemaNode::boolean()),
        ])
        .with_required(["title", "done"]),
    );
    let document = json!({
        "tasks": [
            { "title": "draft", "done": true },
            { "title": "polish", "done": false },
        ]
    });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;

    // Items land as numbered subdirectories, never as flat numbered files.
    let tasks = dir.path().join("tasks");
    assert!(tasks.join("0000").is_dir());
    assert!(tasks.join("0001").is_dir());
    assert!(!tasks.join("0000.txt").exists());

    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    Ok(())
}

#[test]
fn expanded_and_referenced_schemas_read_the_same_tree()
-> Result<(), Box<dyn std::error::Error>> {
    let referenced = SchemaNode::object([("home", SchemaNode::reference("Address"))])
        .with_required(["home"])
        .with_definition(
            "Address",
            SchemaNode::object([("city", SchemaNode::string())]).with_required(["city"]),
        );
    let expanded = SchemaNode::object([(
        "home",
        SchemaNode::object([("city", SchemaNode::string())]).with_required(["city"]),
    )])
    .with_required(["home"]);
    let document = json!({ "home": { "city": "London" } });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &referenced, dir.path(), referenced.registry())?;
    let via_reference = read_tree(&referenced, dir.path(), referenced.registry())?;
    let via_expansion = read_tree(&expanded, dir.path(), expanded.registry())?;
    assert_eq!(via_reference, via_expansion);
    Ok(())
}

#[test]
fn nullable_unions_round_trip_for_scalar_and_compound_arms()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaNode::object([
        ("first", SchemaNode::string().nullable()),
        (
            "second",
            SchemaNode::object([("value", SchemaNode::string())]).nullable(),
        ),
    ])
    .with_required(["first", "second"]);
    let document = json!({ "first": null, "second": { "value": "x" } });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    assert!(!dir.path().join("first.txt").exists());
    assert!(dir.path().join("second").is_dir());
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    Ok(())
}

#[test]
fn nullability_carries_through_a_reference_chain()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaNode::object([("status", SchemaNode::reference("MaybeStatus"))])
        .with_required(["status"])
        .with_definition("MaybeStatus", SchemaNode::reference("Status").nullable())
        .with_definition(
            "Status",
            SchemaNode::object([("state", SchemaNode::string())]).with_required(["state"]),
        );
    let dir = tempfile::tempdir()?;

    // Absent entry: the chain ends in a nullable compound, so Null comes back.
    write_tree(&json!({ "status": null }), &schema, dir.path(), schema.registry())?;
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, json!({ "status": null }));

    // Present entry: the same chain decodes the compound value.
    let document = json!({ "status": { "state": "active" } });
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    Ok(())
}

#[test]
fn unknown_reference_degrades_to_text_and_still_round_trips()
-> Result<(), Box<dyn std::error::Error>> {
    let schema = SchemaNode::object([("payload", SchemaNode::reference("Missing"))])
        .with_required(["payload"]);
    let document = json!({ "payload": "opaque text" });
    let dir = tempfile::tempdir()?;
    write_tree(&document, &schema, dir.path(), schema.registry())?;
    assert!(dir.path().join("payload.txt").is_file());
    let decoded = read_tree(&schema, dir.path(), schema.registry())?;
    assert_eq!(decoded, document);
    Ok(())
}
