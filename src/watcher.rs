use crate::cache::ExtensionCache;
use crate::error::{Result, WatcherError};
use crate::events::{FileEvent, SourceMessage};
use crate::filter::should_ignore_file;
use crate::mover::move_file;
use crate::rules::RuleSet;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
	Idle,
	Watching,
	Stopped,
}

/// Counters reported when the dispatch loop ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
	pub moved: usize,
	pub failed: usize,
	/// Settled events not moved: partial downloads, directories, watch roots, vanished paths
	pub skipped: usize,
	pub source_errors: usize,
}

/// Routes settled files to their destination as notifications arrive.
///
/// Owns the extension cache outright, so nothing else can mutate it once the
/// dispatch loop is running.
pub struct Dispatcher {
	cache: ExtensionCache,
	fallback: PathBuf,
	roots: Vec<PathBuf>,
	stats: DispatchStats,
}

impl Dispatcher {
	pub fn new(cache: ExtensionCache, fallback: PathBuf, roots: Vec<PathBuf>) -> Self {
		Self { cache, fallback, roots, stats: DispatchStats::default() }
	}

	pub fn stats(&self) -> &DispatchStats {
		&self.stats
	}

	/// Consume messages until the source closes or `stop` fires.
	pub async fn run(
		mut self, mut messages: mpsc::UnboundedReceiver<SourceMessage>,
		mut stop: oneshot::Receiver<()>, state: watch::Sender<DispatcherState>,
	) -> DispatchStats {
		state.send_replace(DispatcherState::Watching);
		info!("Event processing loop started");

		loop {
			tokio::select! {
				message = messages.recv() => match message {
					Some(message) => self.handle_message(message),
					None => {
						warn!("Notification stream closed");
						break;
					}
				},
				_ = &mut stop => {
					info!("Stop signal received");
					break;
				}
			}
		}

		state.send_replace(DispatcherState::Stopped);
		info!(
			"Event processing loop ended: {} moved, {} failed, {} skipped, {} source errors",
			self.stats.moved, self.stats.failed, self.stats.skipped, self.stats.source_errors
		);
		self.stats
	}

	pub fn handle_message(&mut self, message: SourceMessage) {
		match message {
			SourceMessage::Event(event) => self.handle_event(event),
			SourceMessage::Error(details) => {
				self.stats.source_errors += 1;
				let err = WatcherError::NotificationSource { details };
				warn!(category = err.category(), "{}", err);
			}
		}
	}

	fn handle_event(&mut self, event: FileEvent) {
		if let Ok(json) = event.to_json() {
			debug!("Event JSON: {}", json);
		}

		if !event.is_settled() {
			debug!("{:?}: {}", event.kind, event.path.display());
			return;
		}

		if !self.is_movable(&event) {
			self.stats.skipped += 1;
			return;
		}

		let destination = self.cache.resolve(&event.path, &self.fallback);
		match move_file(&event.path, destination) {
			Ok(_) => self.stats.moved += 1,
			Err(e) => {
				self.stats.failed += 1;
				error!(category = e.category(), "Failed to move file {}: {}", event.path.display(), e);
			}
		}
	}

	/// Partial downloads, the watch roots themselves, directories and paths
	/// that are already gone are never moved from a live event.
	fn is_movable(&self, event: &FileEvent) -> bool {
		let path = &event.path;

		if should_ignore_file(path) {
			debug!("Ignoring partial download {}", path.display());
			return false;
		}
		if self.roots.iter().any(|root| root == path) {
			debug!("Ignoring event on watch root {}", path.display());
			return false;
		}

		match fs::symlink_metadata(path) {
			Ok(metadata) if metadata.is_dir() => {
				debug!("Ignoring directory {}", path.display());
				false
			}
			Ok(_) => true,
			Err(_) => {
				debug!("{} no longer exists", path.display());
				false
			}
		}
	}
}

/// Running watcher: the notify subscription plus the dispatch task.
pub struct WatcherHandle {
	watcher: RecommendedWatcher,
	stop_tx: oneshot::Sender<()>,
	task: JoinHandle<DispatchStats>,
	state: watch::Receiver<DispatcherState>,
	watched: Vec<PathBuf>,
}

impl WatcherHandle {
	pub fn state(&self) -> DispatcherState {
		*self.state.borrow()
	}

	/// Expanded directories this handle is subscribed to
	pub fn watched_dirs(&self) -> &[PathBuf] {
		&self.watched
	}

	/// Resolves once the dispatch loop has ended on its own
	pub async fn stopped(&mut self) {
		let _ = self.state.wait_for(|state| *state == DispatcherState::Stopped).await;
	}

	/// Release the subscription and wait for the dispatch loop to finish
	pub async fn stop(self) -> Result<DispatchStats> {
		let WatcherHandle { watcher, stop_tx, task, .. } = self;
		drop(watcher);
		// The loop may already have ended because the source closed
		let _ = stop_tx.send(());
		task.await.map_err(|e| {
			error!("Dispatch task failed: {}", e);
			WatcherError::StopSignal
		})
	}
}

/// Subscribe to every watch directory and spawn the dispatch loop.
///
/// Registration is all-or-nothing: if any directory cannot be watched, the
/// subscriptions made so far are released and no loop is started. Must be
/// called from within a tokio runtime.
pub fn start(rules: &RuleSet, cache: ExtensionCache) -> Result<WatcherHandle> {
	let fallback = rules.unknown_dir()?;
	let roots = rules.watch_dirs()?;

	let (message_tx, message_rx) = mpsc::unbounded_channel();
	let mut watcher = RecommendedWatcher::new(
		move |result: notify::Result<notify::Event>| {
			for message in SourceMessage::from_notify(result) {
				if message_tx.send(message).is_err() {
					return;
				}
			}
		},
		Config::default(),
	)?;

	for dir in &roots {
		watcher
			.watch(dir, RecursiveMode::NonRecursive)
			.map_err(|e| WatcherError::watch_registration(dir, e))?;
		info!("Watching {} directory", dir.display());
	}

	let (stop_tx, stop_rx) = oneshot::channel();
	let (state_tx, state_rx) = watch::channel(DispatcherState::Idle);
	state_tx.send_replace(DispatcherState::Watching);

	let dispatcher = Dispatcher::new(cache, fallback, roots.clone());
	let task = tokio::spawn(dispatcher.run(message_rx, stop_rx, state_tx));

	Ok(WatcherHandle { watcher, stop_tx, task, state: state_rx, watched: roots })
}
