use clap::Parser;
use dir_watcher::{auto_clean, start, ExtensionCache, RuleSet, WatcherHandle, DEFAULT_RULES_FILE};
use std::path::PathBuf;
use tracing::{error, info, warn, Level};

#[derive(Parser)]
#[command(name = "dir-watcher")]
#[command(about = "Watches directories and moves new files into folders chosen by extension")]
struct Cli {
	/// Rules file describing watch directories and destinations
	#[arg(short, long, default_value = DEFAULT_RULES_FILE)]
	rules: PathBuf,

	/// Enable verbose logging
	#[arg(short, long)]
	verbose: bool,

	/// Do not move files already present in the watch directories at startup
	#[arg(long)]
	skip_sweep: bool,
}

/// Load rules, sweep and subscribe. Any error here aborts startup.
fn setup(cli: &Cli) -> dir_watcher::Result<WatcherHandle> {
	let rules = RuleSet::load(&cli.rules)?;
	let cache = ExtensionCache::build(&rules.move_rules)?;
	info!(
		"Loaded {} extension mappings from {}",
		cache.len(),
		cli.rules.display()
	);

	if cli.skip_sweep {
		info!("Skipping initial sweep");
	} else {
		let moved = auto_clean(&rules, &cache)?;
		info!("Initial sweep moved {} entries", moved);
	}

	start(&rules, cache)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	// Initialize tracing
	let level = if cli.verbose {
		Level::DEBUG
	} else {
		Level::INFO
	};
	tracing_subscriber::fmt().with_max_level(level).init();

	let mut handle = match setup(&cli) {
		Ok(handle) => handle,
		Err(e) => {
			error!(category = e.category(), fatal = e.is_fatal(), "Startup failed: {}", e);
			return Err(e.into());
		}
	};

	tokio::select! {
		result = tokio::signal::ctrl_c() => {
			result?;
			info!("Shutting down watcher...");
		}
		_ = handle.stopped() => {
			warn!("Dispatcher stopped before shutdown was requested");
		}
	}

	let stats = handle.stop().await?;
	info!(
		"Watcher stopped: {} moved, {} failed",
		stats.moved, stats.failed
	);

	Ok(())
}
