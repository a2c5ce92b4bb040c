use chrono::{DateTime, Utc};
use notify::event::ModifyKind;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum FileEventKind {
	Created,
	Modified,
	Removed,
	Renamed,
	/// Metadata change; treated as the signal that a write has completed
	AttributesChanged,
	Other(String),
}

impl From<notify::EventKind> for FileEventKind {
	fn from(kind: notify::EventKind) -> Self {
		match kind {
			notify::EventKind::Create(_) => FileEventKind::Created,
			notify::EventKind::Modify(modify_kind) => match modify_kind {
				ModifyKind::Metadata(_) => FileEventKind::AttributesChanged,
				ModifyKind::Name(_) => FileEventKind::Renamed,
				_ => FileEventKind::Modified,
			},
			notify::EventKind::Remove(_) => FileEventKind::Removed,
			notify::EventKind::Access(_) => FileEventKind::Other("Access".to_string()),
			notify::EventKind::Other => FileEventKind::Other("Unknown".to_string()),
			_ => FileEventKind::Other(format!("{kind:?}")),
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEvent {
	pub id: Uuid,
	pub kind: FileEventKind,
	pub path: PathBuf,
	pub timestamp: DateTime<Utc>,
}

impl FileEvent {
	pub fn new(kind: FileEventKind, path: PathBuf) -> Self {
		Self { id: Uuid::new_v4(), kind, path, timestamp: Utc::now() }
	}

	/// One event per path carried by a notify event
	pub fn from_notify(event: notify::Event) -> Vec<Self> {
		let kind = FileEventKind::from(event.kind);
		event.paths.into_iter().map(|path| Self::new(kind.clone(), path)).collect()
	}

	/// Whether this event signals that the file is ready to be moved
	pub fn is_settled(&self) -> bool {
		self.kind == FileEventKind::AttributesChanged
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

/// Everything the notification source can deliver, in arrival order
#[derive(Debug)]
pub enum SourceMessage {
	Event(FileEvent),
	Error(String),
}

impl SourceMessage {
	/// Split a notify callback result into messages
	pub fn from_notify(result: notify::Result<notify::Event>) -> Vec<Self> {
		match result {
			Ok(event) => FileEvent::from_notify(event).into_iter().map(SourceMessage::Event).collect(),
			Err(e) => vec![SourceMessage::Error(e.to_string())],
		}
	}
}
