// Integration tests for `~` paths in the rules
// Tests that rule paths are expanded against HOME wherever they are used

use dir_watcher::{auto_clean, start, ExtensionCache, MoveRule, RawPath, RuleSet};
use serial_test::serial;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

mod common;

/// Points HOME at a directory for the lifetime of the guard
struct HomeGuard {
	previous: Option<OsString>,
}

impl HomeGuard {
	fn set(home: &Path) -> Self {
		let previous = std::env::var_os("HOME");
		std::env::set_var("HOME", home);
		Self { previous }
	}
}

impl Drop for HomeGuard {
	fn drop(&mut self) {
		match self.previous.take() {
			Some(value) => std::env::set_var("HOME", value),
			None => std::env::remove_var("HOME"),
		}
	}
}

fn home_rules() -> RuleSet {
	RuleSet {
		watch: vec![RawPath::from("~/in")],
		move_rules: vec![MoveRule::new("~/pics", &["png"])],
		unknown: RawPath::from("~/misc"),
	}
}

#[tokio::test]
#[serial]
async fn test_home_paths_are_expanded_everywhere() {
	let home = common::setup_temp_dir();
	let _guard = HomeGuard::set(home.path());
	let input = home.path().join("in");
	fs::create_dir(&input).unwrap();
	common::create_test_file(&input.join("x.png"), "pixels").unwrap();
	common::create_test_file(&input.join("doc.pdf"), "text").unwrap();

	let rules = home_rules();
	let cache = ExtensionCache::build(&rules.move_rules).unwrap();
	assert_eq!(cache.destination_for("png"), Some(home.path().join("pics").as_path()));

	assert_eq!(auto_clean(&rules, &cache).unwrap(), 2);
	assert!(home.path().join("pics/x.png").is_file());
	assert!(home.path().join("misc/doc.pdf").is_file());
	assert!(!Path::new("~").exists(), "raw ~ must never be used as a relative path");

	let handle = start(&rules, cache).unwrap();
	assert_eq!(handle.watched_dirs(), &[input.clone()]);
	handle.stop().await.unwrap();
}
