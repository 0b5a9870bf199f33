// crates/treeform-codec/src/workdir.rs
// ============================================================================
// Module: Scratch Roots
// Description: Lifecycle of per-session working directories.
// Purpose: Give each producer session a private, disposable tree root.
// Dependencies: tempfile, tracing, std
// ============================================================================

//! ## Overview
//! A producer session writes its tree under a scratch root: a uniquely named
//! directory that exists only for the session. Unique names keep concurrent
//! sessions from observing each other's partial trees, and the returned
//! handle removes the directory when dropped, so abandoned sessions do not
//! accumulate on disk.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use tempfile::TempDir;

use treeform_core::TreeError;

// ============================================================================
// SECTION: Scratch Root Lifecycle
// ============================================================================

/// Name prefix of every scratch root, for attribution in directory listings.
pub const SCRATCH_PREFIX: &str = "treeform-";

/// Creates a scratch root under the system temporary directory.
///
/// # Errors
/// Returns [`TreeError::Io`] when the directory cannot be created.
pub fn scratch_root() -> Result<TempDir, TreeError> {
    scratch_root_in(&env::temp_dir())
}

/// Creates a scratch root under `parent`, creating `parent` itself first
/// when missing.
///
/// The returned handle removes the whole tree on drop; hold it for the
/// length of the session.
///
/// # Errors
/// Returns [`TreeError::Io`] when either directory cannot be created.
pub fn scratch_root_in(parent: &Path) -> Result<TempDir, TreeError> {
    fs::create_dir_all(parent).map_err(|source| TreeError::io(parent, source))?;
    let root = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(parent)
        .map_err(|source| TreeError::io(parent, source))?;
    tracing::debug!(
        target: "treeform.workdir",
        root = %root.path().display(),
        "created scratch root"
    );
    Ok(root)
}

/// Removes a tree that outlived its session, logging instead of failing.
///
/// An already-absent tree is not an error; any other removal failure is
/// logged and swallowed, since cleanup runs on paths nobody will read again.
pub fn remove_tree_best_effort(path: &Path) {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(source) if source.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            tracing::warn!(
                target: "treeform.workdir",
                path = %path.display(),
                error = %source,
                "scratch root removal failed"
            );
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
