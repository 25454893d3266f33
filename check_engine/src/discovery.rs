//! File selection for directory-scan mode.
//!
//! Lists the regular files directly inside the base directory (no recursion,
//! symlinks to files included)
//! and keeps those whose name ends with the required extension, does not
//! start with an excluded prefix, and does not match an exclusion glob.
//!
//! Names are returned sorted so that reports do not depend on the order the
//! filesystem happens to list entries in.

use std::fs;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use crate::error::CheckError;

/// Select candidate files in `dir`.
///
/// # Arguments
///
/// * `dir` — Base directory to list.
/// * `extension` — Required file-name suffix (e.g., `".rs"`).
/// * `excluded_prefixes` — File-name prefixes to skip (e.g., `"test_"`).
/// * `exclude_globs` — Extra glob patterns matched against the file name.
///
/// # Errors
///
/// Returns [`CheckError::ListDir`] if the directory cannot be read.
pub fn select_files(
    dir: &Path,
    extension: &str,
    excluded_prefixes: &[String],
    exclude_globs: &[String],
) -> Result<Vec<String>, CheckError> {
    let globs = build_glob_set(exclude_globs);
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| CheckError::ListDir {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;

        if !is_file_or_link_to_file(&entry) {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            log::warn!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };

        if is_selected(name, extension, excluded_prefixes, &globs) {
            names.push(name.to_owned());
        } else {
            log::debug!("Not selected: {name}");
        }
    }

    names.sort();
    Ok(names)
}

/// Symlinks are followed. A dangling link is kept so that reading it later
/// reports the failure for that file alone.
fn is_file_or_link_to_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        fs::metadata(entry.path()).map_or(true, |meta| meta.is_file())
    } else {
        entry.file_type().is_file()
    }
}

/// Apply the extension, prefix, and glob filters to one file name.
fn is_selected(name: &str, extension: &str, excluded_prefixes: &[String], globs: &GlobSet) -> bool {
    name.ends_with(extension)
        && !excluded_prefixes.iter().any(|p| name.starts_with(p.as_str()))
        && !globs.is_match(name)
}

/// Compile the exclusion globs, skipping invalid ones.
fn build_glob_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => log::warn!("Ignoring invalid exclude pattern '{pattern}': {e}"),
        }
    }
    builder.build().unwrap_or_else(|e| {
        log::warn!("Ignoring exclude patterns: {e}");
        GlobSet::empty()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
