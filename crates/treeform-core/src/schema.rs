// crates/treeform-core/src/schema.rs
// ============================================================================
// Module: Schema Model
// Description: Raw schema nodes, scalar kinds, and the definitions registry.
// Purpose: Parse and construct the schema shapes the codec understands.
// Dependencies: indexmap, serde, std
// ============================================================================

//! ## Overview
//! A [`SchemaNode`] is the raw, wire-faithful description of one field: a
//! scalar kind, an object with ordered properties, an array with an item
//! node, a `$ref` pointer into the definitions table, or a two-way union
//! marking a nullable value. Nodes deserialize from the JSON object form
//! emitted by common type-description exporters and can be built
//! programmatically through the constructors here.
//!
//! The kind tag of a raw node is intentionally not readable outside this
//! crate. Every consumer goes through [`SchemaNode::resolve`] first, which is
//! what prevents an unresolved reference from being treated as a scalar.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Wire Vocabulary
// ============================================================================

/// Pointer prefix a `$ref` must carry to resolve against the registry.
pub const DEFS_POINTER_PREFIX: &str = "#/$defs/";

/// Kind tag for explicit null nodes in the wire format.
const NULL_TAG: &str = "null";

// ============================================================================
// SECTION: Scalar Kinds
// ============================================================================

/// The four scalar kinds the directory convention can hold in a leaf file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Free text, stored raw (trimmed on read).
    String,
    /// Base-10 integer, stored as plain digits.
    Integer,
    /// Integer or float; float text carries a `.` or an exponent marker.
    Number,
    /// Boolean, stored as exactly `true` or `false`.
    Boolean,
}

impl ScalarKind {
    /// Maps a wire kind tag onto a scalar kind, if it names one.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Human-readable description used in diagnostics and instructions.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::String => "Text value",
            Self::Integer => "Whole number",
            Self::Number => "Numeric value",
            Self::Boolean => "True/false value",
        }
    }
}

// ============================================================================
// SECTION: Schema Nodes
// ============================================================================

/// Raw description of one field's type, mirroring the wire format.
///
/// Unknown wire keys are ignored on deserialization; serialization emits the
/// same shape back. The kind-bearing fields are crate-private: callers obtain
/// a [`crate::ResolvedSchema`] via [`SchemaNode::resolve`] before branching
/// on what a node is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Wire kind tag (`"string"`, `"object"`, ...); absent means untyped.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub(crate) kind: Option<String>,
    /// `$ref` pointer into the definitions table.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub(crate) reference: Option<String>,
    /// Union alternatives; the two-way form with a null arm marks nullable.
    #[serde(rename = "anyOf", default, skip_serializing_if = "Option::is_none")]
    pub(crate) any_of: Option<Vec<SchemaNode>>,
    /// Ordered property map of an object node.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) properties: IndexMap<String, SchemaNode>,
    /// Names of properties that must be represented in a decoded object.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) required: Vec<String>,
    /// Item node of an array node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) items: Option<Box<SchemaNode>>,
    /// Human-readable description, surfaced only through instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    /// Named definitions table; meaningful on a root node.
    #[serde(rename = "$defs", default, skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) definitions: IndexMap<String, SchemaNode>,
}

impl SchemaNode {
    /// Node carrying only a kind tag.
    fn kinded(tag: &str) -> Self {
        Self {
            kind: Some(tag.to_owned()),
            ..Self::default()
        }
    }

    /// Text scalar node.
    #[must_use]
    pub fn string() -> Self {
        Self::kinded("string")
    }

    /// Integer scalar node.
    #[must_use]
    pub fn integer() -> Self {
        Self::kinded("integer")
    }

    /// Numeric scalar node (integer or float values).
    #[must_use]
    pub fn number() -> Self {
        Self::kinded("number")
    }

    /// Boolean scalar node.
    #[must_use]
    pub fn boolean() -> Self {
        Self::kinded("boolean")
    }

    /// Explicit null node, as it appears inside nullable unions.
    #[must_use]
    pub fn null() -> Self {
        Self::kinded(NULL_TAG)
    }

    /// Object node with the given ordered properties and no required names.
    #[must_use]
    pub fn object<N, P>(properties: P) -> Self
    where
        N: Into<String>,
        P: IntoIterator<Item = (N, SchemaNode)>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
            ..Self::kinded("object")
        }
    }

    /// Array node holding items of the given shape.
    #[must_use]
    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::kinded("array")
        }
    }

    /// Reference node pointing at a named definition.
    #[must_use]
    pub fn reference(definition: &str) -> Self {
        Self {
            reference: Some(format!("{DEFS_POINTER_PREFIX}{definition}")),
            ..Self::default()
        }
    }

    /// Wraps this node in the two-way nullable union form.
    #[must_use]
    pub fn nullable(self) -> Self {
        Self {
            any_of: Some(vec![self, Self::null()]),
            ..Self::default()
        }
    }

    /// Replaces the required-name list of an object node.
    #[must_use]
    pub fn with_required<N, I>(mut self, names: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = N>,
    {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn with_description<T: Into<String>>(mut self, text: T) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Adds one named definition to this node's definitions table.
    #[must_use]
    pub fn with_definition<N: Into<String>>(mut self, name: N, node: SchemaNode) -> Self {
        self.definitions.insert(name.into(), node);
        self
    }

    /// The node's own description, if any.
    ///
    /// Prefer [`crate::ResolvedSchema::description`], which also sees through
    /// references and nullable wrapping.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Registry view over this node's definitions table.
    #[must_use]
    pub fn registry(&self) -> SchemaRegistry<'_> {
        SchemaRegistry {
            definitions: Some(&self.definitions),
        }
    }

    /// True for an explicit null node (the null arm of a nullable union).
    pub(crate) fn is_null_kind(&self) -> bool {
        self.kind.as_deref() == Some(NULL_TAG)
            && self.reference.is_none()
            && self.any_of.is_none()
    }
}

// ============================================================================
// SECTION: Definitions Registry
// ============================================================================

/// Borrowed view over a schema's named-definitions table.
///
/// Copyable and cheap; consulted by the resolver whenever a reference node is
/// encountered. [`SchemaRegistry::empty`] serves schemas without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRegistry<'a> {
    /// Definitions table of the root node, if the schema carries one.
    definitions: Option<&'a IndexMap<String, SchemaNode>>,
}

impl<'a> SchemaRegistry<'a> {
    /// Registry with no definitions; every lookup misses.
    #[must_use]
    pub const fn empty() -> Self {
        Self { definitions: None }
    }

    /// Looks up a definition by bare name.
    #[must_use]
    pub fn lookup(self, name: &str) -> Option<&'a SchemaNode> {
        self.definitions?.get(name)
    }

    /// Resolves a `$ref` pointer of the `#/$defs/Name` form.
    ///
    /// Anything else, including nested pointer segments, misses; the
    /// resolver then degrades per its soft-failure rule.
    pub(crate) fn lookup_pointer(self, pointer: &str) -> Option<&'a SchemaNode> {
        let name = pointer.strip_prefix(DEFS_POINTER_PREFIX)?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        self.lookup(name)
    }

    /// Number of named definitions visible through this view.
    #[must_use]
    pub fn len(self) -> usize {
        self.definitions.map_or(0, IndexMap::len)
    }

    /// True when no definitions are visible.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
