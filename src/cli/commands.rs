use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use crate::index_storage::IndexStore;
use crate::indexer::{SkippedSegment, migrate_history, rebuild_index};
use crate::log_store::LogStore;
use crate::recorder::{RecordOutcome, Recorder};
use crate::search::SearchEngine;
use crate::tui::run_interactive;
use crate::utils::{StorageLayout, get_scribe_dir, init_logging};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(version)]
#[command(about = "Record shell history and search it incrementally", long_about = None)]
pub struct Cli {
    /// Storage root [default: $SCRIBE_DIR, then ~/.scribe]
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the storage layout and print the shell integration script
    Init {
        /// Shell to integrate with [default: from $SHELL]
        #[arg(long, value_enum)]
        shell: Option<Shell>,
    },
    /// Record an executed command
    Record {
        #[arg(allow_hyphen_values = true)]
        command: String,
        /// Seconds since the epoch [default: now]
        #[arg(long)]
        timestamp: Option<i64>,
    },
    /// Search recorded history
    Search {
        /// Step through matches on the terminal and print the chosen command
        #[arg(long, short)]
        interactive: bool,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Rebuild the index from the history log
    ResetIndex,
    /// Upgrade history log segments to the current format
    MigrateHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Zsh,
    Bash,
    Fish,
}

impl Shell {
    /// Detect the shell from the basename of `$SHELL`
    pub fn detect() -> Result<Self> {
        let shell = env::var("SHELL").unwrap_or_default();
        let name = Path::new(&shell).file_name().and_then(|n| n.to_str()).unwrap_or_default();
        match name {
            "zsh" => Ok(Shell::Zsh),
            "bash" => Ok(Shell::Bash),
            "fish" => Ok(Shell::Fish),
            "" => bail!("SHELL is not set; pass --shell explicitly"),
            other => bail!("'{}' is not a supported shell (zsh, bash, fish)", other),
        }
    }

    pub fn script(self) -> &'static str {
        match self {
            Shell::Zsh => include_str!("shell/init.zsh"),
            Shell::Bash => include_str!("shell/init.bash"),
            Shell::Fish => include_str!("shell/init.fish"),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let root = match cli.root {
        Some(root) => root,
        None => get_scribe_dir()?,
    };
    let layout = StorageLayout::new(root);
    if let Err(e) = init_logging(&layout) {
        eprintln!("Warning: {:#}", e);
    }

    match command {
        Commands::Init { shell } => init(&layout, shell),
        Commands::Record { command, timestamp } => record(&layout, &command, timestamp),
        Commands::Search { interactive, query } => search(&layout, interactive, &query.join(" ")),
        Commands::ResetIndex => reset_index(&layout),
        Commands::MigrateHistory => migrate(&layout),
    }
}

fn init(layout: &StorageLayout, shell: Option<Shell>) -> Result<()> {
    let shell = match shell {
        Some(shell) => shell,
        None => Shell::detect()?,
    };

    let existed = layout.ensure()?;
    init_logging(layout)?;

    IndexStore::open(&layout.index_path())?.provision()?;
    let created = LogStore::new(layout).ensure_latest()?;
    info!(root = %layout.root().display(), existed, created, ?shell, "initialized storage");

    print!("{}", shell.script());
    Ok(())
}

fn record(layout: &StorageLayout, command: &str, timestamp: Option<i64>) -> Result<()> {
    let timestamp = timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp());

    let log = LogStore::new(layout);

    match Recorder::with_index_path(&log, layout.index_path()).record(command, timestamp)? {
        RecordOutcome::Recorded { rowid } => debug!(rowid, "recorded command"),
        RecordOutcome::Skipped => debug!("own invocation not recorded"),
    }
    Ok(())
}

fn search(layout: &StorageLayout, interactive: bool, query: &str) -> Result<()> {
    let index = IndexStore::open(&layout.index_path())?;
    let mut engine = SearchEngine::new(&index);

    if interactive {
        let chosen = run_interactive(&mut engine)?;
        println!("{}", chosen);
        return Ok(());
    }

    // Oldest first, so the newest match ends up next to the prompt
    for row in engine.list_recent(query)?.iter().rev() {
        println!("{}", row.label());
    }
    Ok(())
}

fn reset_index(layout: &StorageLayout) -> Result<()> {
    let index = IndexStore::open(&layout.index_path())?;
    let report = rebuild_index(&LogStore::new(layout), &index)?;

    println!(
        "Rebuilt index: {} entries from {} segments ({} stale rows removed)",
        report.entries, report.segments, report.removed
    );
    warn_skipped(&report.skipped);
    Ok(())
}

fn migrate(layout: &StorageLayout) -> Result<()> {
    let report = migrate_history(&LogStore::new(layout))?;

    println!("Migrated history: {} of {} segments upgraded", report.upgraded, report.scanned);
    warn_skipped(&report.skipped);
    Ok(())
}

fn warn_skipped(skipped: &[SkippedSegment]) {
    for segment in skipped {
        eprintln!("Warning: skipped {}: {}", segment.path.display(), segment.reason);
    }
}
