//! Browser partial-download detection

use std::path::Path;

/// Prefix Chrome gives to temporary files while a download is starting
const PARTIAL_DOWNLOAD_PREFIX: &str = ".com.google.Chrome";
/// Suffix of an in-progress Chrome download
const PARTIAL_DOWNLOAD_SUFFIX: &str = ".crdownload";

/// Whether a path names an in-progress download that must not be moved yet
pub fn should_ignore_file(path: &Path) -> bool {
	let Some(name) = path.file_name() else {
		return false;
	};
	let name = name.to_string_lossy();

	name.starts_with(PARTIAL_DOWNLOAD_PREFIX) || name.ends_with(PARTIAL_DOWNLOAD_SUFFIX)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_downloads_are_ignored() {
		assert!(should_ignore_file(Path::new("partial.crdownload")));
		assert!(should_ignore_file(Path::new("/in/movie.mp4.crdownload")));
		assert!(should_ignore_file(Path::new("/in/.com.google.Chrome.aBc123")));
	}

	#[test]
	fn test_regular_files_are_not_ignored() {
		assert!(!should_ignore_file(Path::new("/in/photo.png")));
		assert!(!should_ignore_file(Path::new("/in/crdownload")));
		assert!(!should_ignore_file(Path::new("/in/notes.com.google.Chrome")));
		assert!(!should_ignore_file(Path::new("/")));
	}
}
