// crates/tf-acceptance-terraform/src/workspace.rs
// ============================================================================
// Module: Module Workspaces
// Description: Copies terraform modules into private directories.
// Purpose: Keep concurrent scenarios from sharing working-directory state.
// Dependencies: walkdir
// ============================================================================

//! ## Overview
//! A module copy excludes `.terraform/` and any `*.tfstate*` file so each
//! scenario starts from an uninitialized module with no local state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use walkdir::DirEntry;
use walkdir::WalkDir;

// ============================================================================
// SECTION: Copy
// ============================================================================

/// Copies the module at `source` into `target`, creating `target` if needed.
///
/// # Errors
///
/// Returns an error when `source` cannot be walked or a file cannot be copied.
pub fn copy_module_into(source: &Path, target: &Path) -> io::Result<()> {
    fs::create_dir_all(target)?;
    let walker =
        WalkDir::new(source).min_depth(1).into_iter().filter_entry(|entry| !is_excluded(entry));
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry.path().strip_prefix(source).map_err(io::Error::other)?;
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &destination)?;
        }
    }
    Ok(())
}

/// Returns whether `entry` is left out of module copies.
fn is_excluded(entry: &DirEntry) -> bool {
    let name = entry.file_name();
    if entry.file_type().is_dir() {
        return name == OsStr::new(".terraform");
    }
    name.to_str().is_some_and(|name| name.contains(".tfstate"))
}
