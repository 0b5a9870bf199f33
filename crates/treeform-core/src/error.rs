// crates/treeform-core/src/error.rs
// ============================================================================
// Module: Error Taxonomy
// Description: The three codec error kinds and their message templates.
// Purpose: Give a retry loop diagnostics precise enough to self-correct.
// Dependencies: thiserror, std
// ============================================================================

//! ## Overview
//! Everything the codec can report falls into three kinds: a required entry
//! is missing, present content contradicts the schema, or the filesystem
//! itself failed. The first two carry a pre-rendered, human-actionable
//! message — the exact expected path, what belongs there, and where a shell
//! command can fix it, that command verbatim — because the consumer is a
//! retry loop feeding the text back to whatever produced the tree.
//! Filesystem failures are carried unmodified next to the path that was
//! being touched.
//!
//! The message templates live here as documented constructors so the
//! encoder, the decoder, and the tests all share identical wording.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::layout;
use crate::schema::ScalarKind;

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// Errors shared by the encoder and the decoder.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A required, non-nullable file or directory is absent.
    #[error("{0}")]
    MissingRequired(String),
    /// Present content or entry kind contradicts the schema.
    #[error("{0}")]
    TypeMismatch(String),
    /// An underlying filesystem operation failed; carried unmodified.
    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        /// Path the failing operation touched.
        path: PathBuf,
        /// The original filesystem error.
        source: io::Error,
    },
}

// ============================================================================
// SECTION: Message Templates
// ============================================================================

impl TreeError {
    /// Decode root directory does not exist.
    #[must_use]
    pub fn missing_root(path: &Path) -> Self {
        let base = path.display();
        Self::MissingRequired(format!(
            "Working directory not found.\nExpected: {base}\nPlease create it with: mkdir -p {base}"
        ))
    }

    /// Required scalar leaf file is absent.
    #[must_use]
    pub fn missing_scalar(path: &Path, kind: ScalarKind) -> Self {
        Self::MissingRequired(format!(
            "Missing file: {file}\nExpected content: {desc}\nCreate the file with the appropriate content.",
            file = path.display(),
            desc = kind.description()
        ))
    }

    /// Required object directory is absent; names the entries it must hold.
    #[must_use]
    pub fn missing_object_dir<'a, I>(path: &Path, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let listed = entries.into_iter().collect::<Vec<_>>().join(", ");
        let dir = path.display();
        Self::MissingRequired(format!(
            "Missing directory: {dir}\nThis should contain: {listed}\nCreate it with: mkdir -p {dir}"
        ))
    }

    /// Required array directory is absent; the entries phrase matches the
    /// resolved item kind.
    #[must_use]
    pub fn missing_array_dir(path: &Path, holds_objects: bool) -> Self {
        let dir = path.display();
        let entries = if holds_objects {
            format!(
                "numbered subdirectories ({}/, {}/, etc.)",
                layout::array_dir_name(0),
                layout::array_dir_name(1)
            )
        } else {
            format!(
                "numbered files ({}, {}, etc.)",
                layout::array_file_name(0),
                layout::array_file_name(1)
            )
        };
        Self::MissingRequired(format!(
            "Missing directory: {dir}\nThis should contain {entries}\nCreate it with: mkdir -p {dir}"
        ))
    }

    /// Scalar leaf content does not parse as the expected kind.
    #[must_use]
    pub fn invalid_scalar(path: &Path, kind: ScalarKind, found: &str) -> Self {
        Self::TypeMismatch(format!(
            "Invalid content in file: {file}\nExpected: {desc}\nFound: '{found}'\nFix the file content to match the expected format.",
            file = path.display(),
            desc = kind.description()
        ))
    }

    /// A file sits where the schema expects a directory.
    #[must_use]
    pub fn file_where_directory(path: &Path) -> Self {
        let here = path.display();
        Self::TypeMismatch(format!(
            "Expected directory but found file: {here}\nRemove the file and create a directory instead:\nrm {here} && mkdir -p {here}"
        ))
    }

    /// A directory sits where the schema expects a scalar leaf file.
    #[must_use]
    pub fn directory_where_file(path: &Path) -> Self {
        let here = path.display();
        Self::TypeMismatch(format!(
            "Expected file but found directory: {here}\nRemove the directory and write the value into a file instead:\nrm -r {here}"
        ))
    }

    /// Scalar-style entry inside a list of compound items.
    #[must_use]
    pub fn entry_should_be_directory(found: &Path, expected: &Path) -> Self {
        Self::TypeMismatch(format!(
            "This list holds numbered subdirectories ({d0}/, {d1}/, etc.), but found: {found}\nReplace it with: rm -r {found} && mkdir -p {expected}",
            d0 = layout::array_dir_name(0),
            d1 = layout::array_dir_name(1),
            found = found.display(),
            expected = expected.display()
        ))
    }

    /// Directory-style entry inside a list of scalar items.
    #[must_use]
    pub fn entry_should_be_file(found: &Path, expected: &Path) -> Self {
        Self::TypeMismatch(format!(
            "This list holds numbered files ({f0}, {f1}, etc.), but found: {found}\nRemove it with: rm -r {found}\nThen write the item's value into {expected}",
            f0 = layout::array_file_name(0),
            f1 = layout::array_file_name(1),
            found = found.display(),
            expected = expected.display()
        ))
    }

    /// Encode-side mismatch between a value and its resolved schema.
    #[must_use]
    pub fn value_mismatch(path: &Path, expected: &str, found: &str) -> Self {
        Self::TypeMismatch(format!(
            "Value does not fit the expected layout at: {here}\nExpected: {expected}\nFound: {found}",
            here = path.display()
        ))
    }

    /// Directly nested lists are outside the directory convention.
    #[must_use]
    pub fn nested_array(path: &Path) -> Self {
        Self::TypeMismatch(format!(
            "Lists directly inside lists are not supported at: {here}\nWrap the inner list in a compound item with its own named entry.",
            here = path.display()
        ))
    }

    /// Root schemas must describe a directory, not a single leaf value.
    #[must_use]
    pub fn scalar_root(path: &Path) -> Self {
        Self::TypeMismatch(format!(
            "Cannot use this layout at: {here}\nThe top level must be a group of named entries or a list, not a single value.",
            here = path.display()
        ))
    }

    /// Array entry index outside the supported numbering range.
    #[must_use]
    pub fn array_bound(path: &Path, index: usize) -> Self {
        Self::TypeMismatch(format!(
            "List entry index {index} at: {here}\nexceeds the supported maximum of {max} entries.\nReduce the list to fewer entries.",
            here = path.display(),
            max = layout::MAX_ARRAY_ENTRIES
        ))
    }

    /// Wraps a filesystem error together with the path being touched.
    #[must_use]
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
