//! Rule model loaded from the rules file
//!
//! ```json
//! {
//!   "watch": ["~/Downloads"],
//!   "move": [{ "path": "~/Pictures", "ext": ["png", "jpg"] }],
//!   "unknown": "~/Downloads/misc"
//! }
//! ```

use crate::error::{Result, WatcherError};
use crate::path_utils;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Conventional rules file name, looked up in the working directory
pub const DEFAULT_RULES_FILE: &str = "rules.json";

/// A path as written in the rules file, possibly starting with `~`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPath(String);

impl RawPath {
	pub fn new(path: impl Into<String>) -> Self {
		Self(path.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Resolve to an absolute path, expanding a leading `~`
	pub fn expand(&self) -> Result<PathBuf> {
		path_utils::expand(&self.0)
	}
}

impl fmt::Display for RawPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for RawPath {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

/// Destination directory for a set of file extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRule {
	pub path: RawPath,
	/// Case-insensitive extensions without the leading dot
	pub ext: Vec<String>,
}

impl MoveRule {
	pub fn new(path: impl Into<String>, ext: &[&str]) -> Self {
		Self {
			path: RawPath::new(path),
			ext: ext.iter().map(|e| e.to_string()).collect(),
		}
	}
}

/// Watch directories, move rules and the fallback destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
	#[serde(default)]
	pub watch: Vec<RawPath>,
	#[serde(rename = "move", default)]
	pub move_rules: Vec<MoveRule>,
	pub unknown: RawPath,
}

impl RuleSet {
	/// Read, parse and validate a rules file
	pub fn load(path: &Path) -> Result<Self> {
		let contents =
			std::fs::read_to_string(path).map_err(|e| WatcherError::config_load(path, e))?;
		let rules = Self::from_json(&contents).map_err(|e| match e {
			WatcherError::Json(json) => WatcherError::config_load(path, json),
			other => other,
		})?;
		debug!(
			"Loaded {} watch directories and {} move rules from {}",
			rules.watch.len(),
			rules.move_rules.len(),
			path.display()
		);
		Ok(rules)
	}

	/// Parse and validate rules from a JSON document
	pub fn from_json(contents: &str) -> Result<Self> {
		let rules: RuleSet = serde_json::from_str(contents)?;
		rules.validate()?;
		Ok(rules)
	}

	/// Validate the rule set and return errors if invalid
	pub fn validate(&self) -> Result<()> {
		if self.unknown.is_empty() {
			return Err(WatcherError::configuration_error(
				"unknown",
				"fallback directory must be set",
				"a directory path",
				"\"\"",
			));
		}

		if let Some(dir) = self.watch.iter().find(|dir| dir.is_empty()) {
			return Err(WatcherError::InvalidPath { path: dir.to_string() });
		}

		for rule in &self.move_rules {
			if rule.path.is_empty() {
				return Err(WatcherError::configuration_error(
					"move.path",
					"destination must be set",
					"a directory path",
					"\"\"",
				));
			}
			if rule.ext.iter().any(|ext| ext.trim_start_matches('.').is_empty()) {
				return Err(WatcherError::configuration_error(
					"move.ext",
					"extensions must not be empty",
					"an extension such as \"png\"",
					&format!("{:?}", rule.ext),
				));
			}
		}

		if self.watch.is_empty() {
			warn!("No watch directories configured, nothing will be moved");
		}

		Ok(())
	}

	/// Watch directories with `~` expanded
	pub fn watch_dirs(&self) -> Result<Vec<PathBuf>> {
		self.watch.iter().map(RawPath::expand).collect()
	}

	/// Fallback destination with `~` expanded
	pub fn unknown_dir(&self) -> Result<PathBuf> {
		self.unknown.expand()
	}
}
