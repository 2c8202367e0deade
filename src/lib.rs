// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{default_config_path, load_and_validate, RuleSet};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent};
use crate::errors::DirwatchError;
use crate::exec::RealExecutorBackend;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::SourceKind;
use crate::watch::{ChangeSource, NotifySource, PollingSource, WatchRegistry};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - rule file loading (or usage help when it is missing)
/// - the change source (polling or notify)
/// - registry / core runtime
/// - executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let home = dirs::home_dir().ok_or(DirwatchError::NoHomeDirectory)?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&home));

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let Some(rules) = load_and_validate(fs.as_ref(), &config_path, &home)? else {
        let to_log_file = logging::resolve_log_file(args.log_file.as_deref()).is_some();
        print_usage(&config_path, to_log_file);
        return Ok(());
    };

    if args.dry_run {
        print_dry_run(&config_path, &rules);
        return Ok(());
    }

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // Kept alive until the runtime returns; dropping it stops all watches.
    let mut source: Box<dyn ChangeSource> = match args.source {
        SourceKind::Poll => Box::new(PollingSource::new(
            Arc::clone(&fs),
            Duration::from_millis(args.poll_interval_ms),
            rt_tx.clone(),
        )),
        SourceKind::Notify => Box::new(NotifySource::new(Arc::clone(&fs), rt_tx.clone())?),
    };

    let mut registry = WatchRegistry::new();
    registry.register_all(rules.into_rules(), fs.as_ref(), source.as_mut())?;
    info!(
        directories = registry.len(),
        source = ?args.source,
        "all rules registered"
    );

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }
    drop(rt_tx);

    let core = CoreRuntime::new(registry);
    let runtime = Runtime::new(core, rt_rx, RealExecutorBackend::new());
    runtime.run().await?;

    drop(source);
    Ok(())
}

/// Help text shown when there is no rule file yet.
pub const USAGE: &str = r#"dirwatch is cron for filesystem changes.

Each line in your watch file specifies a directory to watch and a
command to run when changes occur in that directory. You may
optionally specify the kind of changes that will trigger the
command.

Lines that begin with # are comments. No trailing comments.

The watch file looks like this:

    # triggers when files are created or removed in /etc
    /etc notify-the-admin.sh

    # triggers when pictures are saved to ~/Pictures
    + Pictures post-to-gallery.sh

    # triggers when files are removed from the ~/todo directory
    - todo update-remote-todo-list.sh

So each line has an optional trigger followed by a directory and
then a command. The directory can be quoted if it contains spaces.
Relative directories are taken from your home directory.

The triggers are:

    +  files are created
    -  files are removed

You can use one or both of these, if you omit the trigger then
both creations and removals are monitored.

Commands see WATCH_DIR, WATCH_CREATED and WATCH_REMOVED in their
environment; the latter two are JSON arrays of file names."#;

/// Usage help followed by where the rule file is expected.
pub fn usage_text(config_path: &Path) -> String {
    format!(
        "{USAGE}\n\nCreate a watch file at {} and then run dirwatch again.",
        config_path.display()
    )
}

/// Help goes to the log file when there is one, so a daemonised dirwatch
/// still explains why it stopped. Otherwise it is printed plainly.
fn print_usage(config_path: &Path, to_log_file: bool) {
    let text = usage_text(config_path);
    if to_log_file {
        for line in text.lines() {
            info!("{line}");
        }
    } else {
        println!("{text}");
    }
}

/// Simple dry-run output: print rules as resolved.
fn print_dry_run(config_path: &Path, rules: &RuleSet) {
    println!("dirwatch dry-run");
    println!("  rules file = {}", config_path.display());
    println!();

    println!("rules ({}):", rules.len());
    for rule in rules.rules() {
        let trigger = rule.triggers.to_string();
        println!("  - {}", rule.directory.display());
        println!("      trigger: {trigger}");
        println!("      cmd: {}", rule.command);
    }

    debug!("dry-run complete (nothing watched)");
}
