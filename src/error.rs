use std::path::Path;
use thiserror::Error;

/// Error types for rule loading, watching and moving files
///
/// Setup-phase errors (`ConfigLoad`, `ConfigurationError`, `WatchRegistration`)
/// abort startup. Per-file errors (`DestinationCreate`, `MoveFailed`,
/// `CollisionLimit`) stop a sweep but are only logged by the live dispatcher.
#[derive(Error, Debug)]
pub enum WatcherError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Notify error: {0}")]
	Notify(#[from] notify::Error),

	#[error("JSON serialization error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Failed to load rules from {path}: {cause}")]
	ConfigLoad { path: String, cause: String },

	#[error(
		"Configuration error: {parameter} - {reason} (expected: {expected}, actual: {actual})"
	)]
	ConfigurationError {
		parameter: String,
		reason: String,
		expected: String,
		actual: String,
	},

	#[error("Invalid path: {path}")]
	InvalidPath { path: String },

	#[error("Failed to watch directory {path}: {cause}")]
	WatchRegistration { path: String, cause: String },

	#[error("Failed to create destination directory {path}: {cause}")]
	DestinationCreate { path: String, cause: String },

	#[error("Failed to move {source_path} to {destination}: {cause}")]
	MoveFailed {
		source_path: String,
		destination: String,
		cause: String,
	},

	#[error("No free file name for {path} after {attempts} attempts")]
	CollisionLimit { path: String, attempts: u32 },

	#[error("Notification source error: {details}")]
	NotificationSource { details: String },

	#[error("Failed to send stop signal to watcher")]
	StopSignal,
}

impl WatcherError {
	/// Errors that must terminate the process when they happen during startup
	pub fn is_fatal(&self) -> bool {
		matches!(
			self,
			WatcherError::ConfigLoad { .. }
				| WatcherError::ConfigurationError { .. }
				| WatcherError::WatchRegistration { .. }
				| WatcherError::Notify(_)
				| WatcherError::Json(_)
		)
	}

	/// Check if this error is related to configuration issues
	pub fn is_configuration_error(&self) -> bool {
		matches!(
			self,
			WatcherError::ConfigLoad { .. }
				| WatcherError::ConfigurationError { .. }
				| WatcherError::InvalidPath { .. }
		)
	}

	/// Get error category for logging
	pub fn category(&self) -> &'static str {
		match self {
			WatcherError::Io(_) => "io",
			WatcherError::Notify(_) => "notify",
			WatcherError::Json(_) => "serialization",
			WatcherError::ConfigLoad { .. } => "config_load",
			WatcherError::ConfigurationError { .. } => "configuration",
			WatcherError::InvalidPath { .. } => "configuration",
			WatcherError::WatchRegistration { .. } => "watch_registration",
			WatcherError::DestinationCreate { .. } => "destination_create",
			WatcherError::MoveFailed { .. } => "move",
			WatcherError::CollisionLimit { .. } => "collision",
			WatcherError::NotificationSource { .. } => "notification_source",
			WatcherError::StopSignal => "shutdown",
		}
	}

	pub fn config_load(path: &Path, cause: impl ToString) -> Self {
		WatcherError::ConfigLoad {
			path: path.display().to_string(),
			cause: cause.to_string(),
		}
	}

	/// Create a configuration error
	pub fn configuration_error(
		parameter: &str, reason: &str, expected: &str, actual: &str,
	) -> Self {
		WatcherError::ConfigurationError {
			parameter: parameter.to_string(),
			reason: reason.to_string(),
			expected: expected.to_string(),
			actual: actual.to_string(),
		}
	}

	pub fn watch_registration(path: &Path, cause: impl ToString) -> Self {
		WatcherError::WatchRegistration {
			path: path.display().to_string(),
			cause: cause.to_string(),
		}
	}

	pub fn destination_create(path: &Path, cause: impl ToString) -> Self {
		WatcherError::DestinationCreate {
			path: path.display().to_string(),
			cause: cause.to_string(),
		}
	}

	pub fn move_failed(source: &Path, destination: &Path, cause: impl ToString) -> Self {
		WatcherError::MoveFailed {
			source_path: source.display().to_string(),
			destination: destination.display().to_string(),
			cause: cause.to_string(),
		}
	}
}

pub type Result<T> = std::result::Result<T, WatcherError>;
