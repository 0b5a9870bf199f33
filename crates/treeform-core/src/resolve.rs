// crates/treeform-core/src/resolve.rs
// ============================================================================
// Module: Schema Resolution
// Description: Turns raw schema nodes into concrete, inspectable shapes.
// Purpose: Normalize references and nullable unions before any kind branch.
// Dependencies: indexmap, std
// ============================================================================

//! ## Overview
//! Resolution is the only way to learn what a [`SchemaNode`] is. It follows
//! `$ref` pointers through the registry, unwraps the two-way nullable union
//! into a concrete shape plus an `is_nullable` flag, and hands back a
//! [`ResolvedSchema`] borrowing the underlying nodes. The array view exposes
//! its item node raw, so item kinds can only be learned by resolving again —
//! the historical failure mode (treating an unresolved reference's array
//! items as scalars) cannot be expressed.
//!
//! Resolution is pure and total: a reference that misses the registry, an
//! unknown kind tag, or a union outside the two-way form degrades to the
//! text-scalar view of the node as it stands instead of failing.

use indexmap::IndexMap;

use crate::schema::ScalarKind;
use crate::schema::SchemaNode;
use crate::schema::SchemaRegistry;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Hard cap on reference/union hops during one resolution.
///
/// The wire format promises definitions one hop deep; the cap keeps a
/// malformed cyclic definitions table from hanging resolution.
pub const MAX_RESOLUTION_DEPTH: usize = 16;

// ============================================================================
// SECTION: Resolved Views
// ============================================================================

/// Concrete view of one schema node after reference and union normalization.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSchema<'a> {
    /// What the node concretely is.
    shape: ResolvedShape<'a>,
    /// Whether absence of the encoded entry means `Null` rather than an error.
    nullable: bool,
    /// Effective description: outermost node first, inner nodes as fallback.
    description: Option<&'a str>,
}

impl<'a> ResolvedSchema<'a> {
    /// The concrete shape to encode or decode.
    #[must_use]
    pub const fn shape(self) -> ResolvedShape<'a> {
        self.shape
    }

    /// True when the value may be `Null` (encoded as absence).
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        self.nullable
    }

    /// Effective human-readable description, if any node in the chain had one.
    #[must_use]
    pub const fn description(self) -> Option<&'a str> {
        self.description
    }

    /// Degraded view for schemas that say nothing about a node: plain text.
    ///
    /// Applied where an array omits its item node entirely.
    #[must_use]
    pub const fn untyped() -> Self {
        Self {
            shape: ResolvedShape::Scalar(ScalarKind::String),
            nullable: false,
            description: None,
        }
    }
}

/// The three concrete shapes the directory convention can represent.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedShape<'a> {
    /// A leaf file holding one scalar value.
    Scalar(ScalarKind),
    /// A subdirectory holding named entries.
    Object(ObjectShape<'a>),
    /// A subdirectory holding numbered entries.
    Array(ArrayShape<'a>),
}

/// Borrowed view of an object node's properties and required names.
#[derive(Debug, Clone, Copy)]
pub struct ObjectShape<'a> {
    /// Ordered property map.
    properties: &'a IndexMap<String, SchemaNode>,
    /// Names that must be represented in a decoded object.
    required: &'a [String],
}

impl<'a> ObjectShape<'a> {
    /// Iterates properties in schema order as `(name, raw node)` pairs.
    pub fn properties(self) -> impl Iterator<Item = (&'a str, &'a SchemaNode)> {
        self.properties.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Property names in schema order.
    pub fn names(self) -> impl Iterator<Item = &'a str> {
        self.properties.keys().map(String::as_str)
    }

    /// Required property names in schema order.
    pub fn required_names(self) -> impl Iterator<Item = &'a str> {
        self.required.iter().map(String::as_str)
    }

    /// Whether the named property must be represented when decoding.
    #[must_use]
    pub fn is_required(self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(self) -> usize {
        self.properties.len()
    }

    /// True for an object with no properties.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.properties.is_empty()
    }
}

/// Borrowed view of an array node's item schema.
#[derive(Debug, Clone, Copy)]
pub struct ArrayShape<'a> {
    /// Raw item node; resolve it before inspecting the item kind.
    items: Option<&'a SchemaNode>,
}

impl<'a> ArrayShape<'a> {
    /// The raw item node, when the schema names one.
    #[must_use]
    pub const fn items(self) -> Option<&'a SchemaNode> {
        self.items
    }

    /// Resolves the item schema, degrading to the untyped text view when the
    /// schema names no item node at all.
    #[must_use]
    pub fn resolve_items(self, registry: SchemaRegistry<'a>) -> ResolvedSchema<'a> {
        self.items
            .map_or_else(ResolvedSchema::untyped, |node| node.resolve(registry))
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

impl SchemaNode {
    /// Resolves this node into a concrete, inspectable shape.
    ///
    /// Follows `$ref` pointers through `registry` and unwraps the two-way
    /// nullable union, iterating up to [`MAX_RESOLUTION_DEPTH`] hops so the
    /// two forms may interleave. An explicit null node sets the nullable
    /// flag on its own.
    ///
    /// # Invariants
    /// - Never fails: a reference missing from the registry, an unknown kind
    ///   tag, or a union with two-plus concrete alternatives degrades to the
    ///   text-scalar view of the node left in hand.
    /// - Neither the node nor the registry is mutated; the result borrows
    ///   both.
    /// - The outermost description wins; inner nodes fill in only where
    ///   outer nodes carry none.
    #[must_use]
    pub fn resolve<'a>(&'a self, registry: SchemaRegistry<'a>) -> ResolvedSchema<'a> {
        let mut current = self;
        let mut nullable = false;
        let mut description = self.description.as_deref();
        for _ in 0..MAX_RESOLUTION_DEPTH {
            if let Some(pointer) = current.reference.as_deref() {
                let Some(target) = registry.lookup_pointer(pointer) else {
                    break;
                };
                if description.is_none() {
                    description = target.description.as_deref();
                }
                current = target;
                continue;
            }
            let Some((arm, saw_null)) = union_arm(current) else {
                break;
            };
            if saw_null {
                nullable = true;
            }
            if description.is_none() {
                description = arm.description.as_deref();
            }
            current = arm;
        }
        if current.is_null_kind() {
            nullable = true;
        }
        ResolvedSchema {
            shape: classify(current),
            nullable,
            description,
        }
    }
}

/// Splits a union node into its single concrete alternative.
///
/// Returns the alternative plus whether a null arm was present. A union with
/// two-plus concrete alternatives (outside the supported schema shape) or
/// with no concrete alternative yields `None`.
fn union_arm(node: &SchemaNode) -> Option<(&SchemaNode, bool)> {
    let variants = node.any_of.as_deref()?;
    let mut concrete = variants.iter().filter(|arm| !arm.is_null_kind());
    let first = concrete.next()?;
    if concrete.next().is_some() {
        return None;
    }
    let saw_null = variants.iter().any(SchemaNode::is_null_kind);
    Some((first, saw_null))
}

/// Maps a fully-resolved node onto its concrete shape.
///
/// Anything without a recognized kind tag — including explicit null nodes
/// and references that never resolved — lands on the text scalar, matching
/// the degraded treatment such nodes historically received.
fn classify(node: &SchemaNode) -> ResolvedShape<'_> {
    match node.kind.as_deref() {
        Some("object") => ResolvedShape::Object(ObjectShape {
            properties: &node.properties,
            required: &node.required,
        }),
        Some("array") => ResolvedShape::Array(ArrayShape {
            items: node.items.as_deref(),
        }),
        Some(tag) => {
            ResolvedShape::Scalar(ScalarKind::from_tag(tag).unwrap_or(ScalarKind::String))
        }
        None => ResolvedShape::Scalar(ScalarKind::String),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
