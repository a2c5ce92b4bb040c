//! Extension to destination lookup built once from the move rules

use crate::error::Result;
use crate::rules::MoveRule;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only map from lowercase extension (no dot) to an expanded destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionCache {
	destinations: HashMap<String, PathBuf>,
}

impl ExtensionCache {
	/// Flatten the rules in order; a later rule overwrites an earlier one for
	/// the same extension.
	pub fn build(rules: &[MoveRule]) -> Result<Self> {
		let mut destinations = HashMap::new();

		for rule in rules {
			let destination = rule.path.expand()?;
			for ext in &rule.ext {
				let key = normalize_extension(ext);
				if let Some(previous) = destinations.insert(key.clone(), destination.clone()) {
					if previous != destination {
						debug!(
							"Extension '{}' remapped from {} to {}",
							key,
							previous.display(),
							destination.display()
						);
					}
				}
			}
		}

		Ok(Self { destinations })
	}

	/// Destination for an extension, if a rule maps it
	pub fn destination_for(&self, ext: &str) -> Option<&Path> {
		self.destinations.get(&normalize_extension(ext)).map(PathBuf::as_path)
	}

	/// Destination for a file, falling back when its extension is unmapped
	pub fn resolve<'a>(&'a self, path: &Path, fallback: &'a Path) -> &'a Path {
		self.destination_for(&extension_of(path)).unwrap_or(fallback)
	}

	pub fn len(&self) -> usize {
		self.destinations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.destinations.is_empty()
	}
}

fn normalize_extension(ext: &str) -> String {
	ext.trim_start_matches('.').to_lowercase()
}

/// Lowercase extension of a file name without the dot, empty if there is none.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(path: &Path) -> String {
	path.extension()
		.map(|ext| ext.to_string_lossy().to_lowercase())
		.unwrap_or_default()
}
