mod cache;
mod error;
mod events;
mod filter;
mod mover;
mod path_utils;
mod rules;
mod sweeper;
mod watcher;

pub use cache::{extension_of, ExtensionCache};
pub use error::{Result, WatcherError};
pub use events::{FileEvent, FileEventKind, SourceMessage};
pub use filter::should_ignore_file;
pub use mover::{move_file, unique_file_path, MAX_COLLISION_SUFFIX};
pub use path_utils::{expand, expand_with_home};
pub use rules::{MoveRule, RawPath, RuleSet, DEFAULT_RULES_FILE};
pub use sweeper::{auto_clean, clean_dir};
pub use watcher::{start, DispatchStats, Dispatcher, DispatcherState, WatcherHandle};
