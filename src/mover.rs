//! Relocation of a single file into a destination directory
//!
//! The destination directory is created on demand. When the target name is
//! already taken, a numeric suffix is appended to the file stem (`a.txt` becomes
//! `a-1.txt`, then `a-2.txt`, ...) until a free name is found.

use crate::error::{Result, WatcherError};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Highest suffix tried before giving up on finding a free file name
pub const MAX_COLLISION_SUFFIX: u32 = 10_000;

/// Move `source` into `destination_dir`, returning the final path.
pub fn move_file(source: &Path, destination_dir: &Path) -> Result<PathBuf> {
	let file_name = source
		.file_name()
		.ok_or_else(|| WatcherError::InvalidPath { path: source.display().to_string() })?;

	ensure_directory(destination_dir)?;

	let candidate = destination_dir.join(file_name);
	let target = if exists(&candidate) {
		let unique = unique_file_path(&candidate)?;
		debug!("{} already exists, using {}", candidate.display(), unique.display());
		unique
	} else {
		candidate
	};

	fs::rename(source, &target).map_err(|e| WatcherError::move_failed(source, &target, e))?;

	info!("Moved file from {} to {}", source.display(), target.display());
	Ok(target)
}

/// Create `dir` and its parents if it does not exist yet
fn ensure_directory(dir: &Path) -> Result<()> {
	match fs::metadata(dir) {
		Ok(metadata) if metadata.is_dir() => Ok(()),
		Ok(_) => Err(WatcherError::destination_create(dir, "path exists and is not a directory")),
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			fs::create_dir_all(dir).map_err(|e| WatcherError::destination_create(dir, e))?;
			debug!("Created destination directory {}", dir.display());
			Ok(())
		}
		Err(e) => Err(WatcherError::destination_create(dir, e)),
	}
}

/// Next free sibling of `path` of the form `<stem>-<n>[.<ext>]`.
///
/// The counter starts at 1 and increases on every attempt, bounded by
/// [`MAX_COLLISION_SUFFIX`].
pub fn unique_file_path(path: &Path) -> Result<PathBuf> {
	let stem = path.file_stem().unwrap_or_default();
	let ext = path.extension();

	for counter in 1..=MAX_COLLISION_SUFFIX {
		let mut name = OsString::from(stem);
		name.push(format!("-{counter}"));
		if let Some(ext) = ext {
			name.push(".");
			name.push(ext);
		}

		let candidate = path.with_file_name(name);
		if !exists(&candidate) {
			return Ok(candidate);
		}
	}

	Err(WatcherError::CollisionLimit {
		path: path.display().to_string(),
		attempts: MAX_COLLISION_SUFFIX,
	})
}

/// Whether something occupies `path`. Anything other than a clean "not found"
/// counts as occupied so an unreadable entry is never overwritten.
fn exists(path: &Path) -> bool {
	match fs::symlink_metadata(path) {
		Ok(_) => true,
		Err(e) => e.kind() != io::ErrorKind::NotFound,
	}
}
