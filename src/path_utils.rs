//! Home-relative path expansion
//!
//! Rule files may use `~` as shorthand for the user's home directory. Paths are
//! kept in their raw form and only expanded at the point of use.
//!
//! # Limitations
//! - Only a leading `~` is expanded; `~user` forms are not supported and are
//!   treated as `$HOME` followed by `user`.
//! - An unset `HOME` is reported as a configuration error rather than silently
//!   producing a relative path.

use crate::error::{Result, WatcherError};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

const HOME_VAR: &str = "HOME";

/// Expand a leading `~` using the `HOME` environment variable.
pub fn expand(path: &str) -> Result<PathBuf> {
	let home = std::env::var_os(HOME_VAR);
	expand_with_home(path, home.as_deref())
}

/// Expand a leading `~` using the given home directory.
///
/// The remainder after `~` is appended verbatim, so `~/x` becomes `<home>/x`.
/// Paths not starting with `~` are returned unchanged and never consult `home`.
pub fn expand_with_home(path: &str, home: Option<&OsStr>) -> Result<PathBuf> {
	let Some(rest) = path.strip_prefix('~') else {
		return Ok(PathBuf::from(path));
	};

	let home = home.ok_or_else(|| {
		WatcherError::configuration_error(HOME_VAR, "home directory is not set", "a directory", path)
	})?;

	let mut expanded = OsString::from(home);
	expanded.push(rest);
	Ok(PathBuf::from(expanded))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;
	use std::path::Path;

	#[test]
	fn test_expand_home_prefix() {
		let home = OsStr::new("/home/alice");
		assert_eq!(
			expand_with_home("~/Downloads", Some(home)).unwrap(),
			PathBuf::from("/home/alice/Downloads")
		);
		assert_eq!(expand_with_home("~", Some(home)).unwrap(), PathBuf::from("/home/alice"));
	}

	#[test]
	fn test_absolute_path_unchanged() {
		assert_eq!(expand_with_home("/abs/x", None).unwrap(), PathBuf::from("/abs/x"));
		// A tilde anywhere but the start is not special
		assert_eq!(
			expand_with_home("/abs/~x", Some(OsStr::new("/home/alice"))).unwrap(),
			PathBuf::from("/abs/~x")
		);
	}

	#[test]
	fn test_expansion_is_idempotent() {
		let home = OsStr::new("/home/alice");
		let once = expand_with_home("~/x", Some(home)).unwrap();
		let twice = expand_with_home(once.to_str().unwrap(), Some(home)).unwrap();
		assert_eq!(once, twice);
	}

	#[test]
	fn test_missing_home_is_configuration_error() {
		let err = expand_with_home("~/x", None).unwrap_err();
		assert!(err.is_configuration_error());
		assert!(err.to_string().contains("HOME"));
	}

	#[test]
	#[serial]
	fn test_expand_reads_home_from_environment() {
		let previous = std::env::var_os(HOME_VAR);
		std::env::set_var(HOME_VAR, "/tmp/dir-watcher-home");

		let expanded = expand("~/x").unwrap();

		match previous {
			Some(value) => std::env::set_var(HOME_VAR, value),
			None => std::env::remove_var(HOME_VAR),
		}
		assert_eq!(expanded, Path::new("/tmp/dir-watcher-home/x"));
	}
}
