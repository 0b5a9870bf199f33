// crates/treeform-core/src/layout.rs
// ============================================================================
// Module: Directory Layout Rules
// Description: File and entry naming for the directory convention.
// Purpose: Single source of truth for names both codec directions agree on.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The directory convention is fixed: a scalar field `f` lives in `f.txt`,
//! an object or array field `f` lives in the subdirectory `f/`, and array
//! entries are numbered with 4-digit zero-padded names (`0000.txt` for
//! scalar items, `0000/` for object items). Helpers here build those names
//! for the writer and recognize them for the reader; recognition is lenient
//! about zero padding but strict about digits.

// ============================================================================
// SECTION: Convention Constants
// ============================================================================

/// Suffix carried by every scalar leaf file.
pub const SCALAR_SUFFIX: &str = ".txt";

/// Digits in a zero-padded array entry name.
pub const ARRAY_INDEX_WIDTH: usize = 4;

/// Upper bound on entries in one array directory.
///
/// This is the namespace the zero-padded width provides; it also bounds
/// decode-side memory when a stray huge index shows up on disk.
pub const MAX_ARRAY_ENTRIES: usize = 10_000;

// ============================================================================
// SECTION: Name Construction
// ============================================================================

/// Leaf file name for a scalar field.
#[must_use]
pub fn scalar_file_name(field: &str) -> String {
    format!("{field}{SCALAR_SUFFIX}")
}

/// Numbered file name for a scalar array entry.
#[must_use]
pub fn array_file_name(index: usize) -> String {
    format!("{index:0width$}{SCALAR_SUFFIX}", width = ARRAY_INDEX_WIDTH)
}

/// Numbered directory name for an object array entry.
#[must_use]
pub fn array_dir_name(index: usize) -> String {
    format!("{index:0width$}", width = ARRAY_INDEX_WIDTH)
}

// ============================================================================
// SECTION: Name Recognition
// ============================================================================

/// Index carried by a scalar array entry name (`0003.txt` → 3).
///
/// Zero padding is not required on read; anything that is not all digits
/// plus the scalar suffix is not an entry.
#[must_use]
pub fn scalar_entry_index(name: &str) -> Option<usize> {
    entry_index(name.strip_suffix(SCALAR_SUFFIX)?)
}

/// Index carried by an object array entry name (`0003` → 3).
#[must_use]
pub fn dir_entry_index(name: &str) -> Option<usize> {
    entry_index(name)
}

/// Parses an all-digit entry stem; junk and overlong stems are rejected.
fn entry_index(stem: &str) -> Option<usize> {
    if stem.is_empty() || !stem.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
