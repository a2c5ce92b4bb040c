//! Common test utilities for the dir-watcher library

#![allow(dead_code)]

use dir_watcher::{MoveRule, RawPath, RuleSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Scratch layout: one watch directory plus picture and fallback destinations
pub struct Layout {
	pub temp_dir: TempDir,
	pub input: PathBuf,
	pub pics: PathBuf,
	pub misc: PathBuf,
}

impl Layout {
	pub fn new() -> Self {
		let temp_dir = setup_temp_dir();
		let input = temp_dir.path().join("in");
		std::fs::create_dir(&input).expect("Failed to create watch directory");
		Self {
			input,
			pics: temp_dir.path().join("pics"),
			misc: temp_dir.path().join("misc"),
			temp_dir,
		}
	}

	/// `watch=[in], move=[{pics: png, jpg}], unknown=misc`
	pub fn rules(&self) -> RuleSet {
		RuleSet {
			watch: vec![raw(&self.input)],
			move_rules: vec![MoveRule::new(self.pics.to_str().unwrap(), &["png", "jpg"])],
			unknown: raw(&self.misc),
		}
	}
}

pub fn raw(path: &Path) -> RawPath {
	RawPath::new(path.to_str().expect("temp paths are UTF-8"))
}

/// Create a temporary directory for testing
pub fn setup_temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temp directory")
}

/// Create a test file with content
pub fn create_test_file(path: &Path, content: &str) -> std::io::Result<()> {
	std::fs::write(path, content)
}

/// Wait for a short duration to allow file system events to propagate
pub async fn wait_for_events() {
	tokio::time::sleep(Duration::from_millis(100)).await;
}

/// Poll until `path` exists or the timeout elapses
pub async fn wait_for_path(path: &Path, timeout: Duration) -> bool {
	let start = std::time::Instant::now();
	while start.elapsed() < timeout {
		if path.exists() {
			return true;
		}
		tokio::time::sleep(Duration::from_millis(25)).await;
	}
	path.exists()
}
