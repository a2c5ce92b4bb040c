//! One-shot sweep of the files already present in a watch directory

use crate::cache::ExtensionCache;
use crate::error::Result;
use crate::filter::should_ignore_file;
use crate::mover::move_file;
use crate::rules::RuleSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Move every eligible direct entry of `dir` to its destination.
///
/// Entries are processed in directory-listing order. The sweep stops at the
/// first failed move and returns that error; files moved before it stay moved.
/// Returns the number of entries moved.
pub fn clean_dir(dir: &Path, cache: &ExtensionCache, fallback: &Path) -> Result<usize> {
	let mut moved = 0;

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();
		let is_dir = entry.file_type()?.is_dir();

		if !is_sweepable(&path, is_dir) {
			debug!("Skipping {}", path.display());
			continue;
		}

		let destination = cache.resolve(&path, fallback);
		move_file(&path, destination)?;
		moved += 1;
	}

	Ok(moved)
}

/// Regular files are swept unless they are partial downloads. Directories are
/// left alone unless they match the partial-download pattern, in which case the
/// whole directory is moved like a file.
fn is_sweepable(path: &Path, is_dir: bool) -> bool {
	is_dir == should_ignore_file(path)
}

/// Sweep every watch directory in order, stopping at the first failure.
pub fn auto_clean(rules: &RuleSet, cache: &ExtensionCache) -> Result<usize> {
	let fallback = rules.unknown_dir()?;
	let mut total = 0;

	for dir in rules.watch_dirs()? {
		let moved = clean_dir(&dir, cache, &fallback)?;
		info!("Cleaned {} directory ({} moved)", dir.display(), moved);
		total += moved;
	}

	Ok(total)
}
