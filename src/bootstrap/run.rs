//! Process lifecycle: runtime, scheduler tasks, console loop, shutdown.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info, warn};

use cs_app::lock_store;
use cs_app::usecases::{CaptureOutcome, SyncMode, SyncScheduler};
use cs_app::App;
use cs_core::clip::ClipItem;
use cs_core::config::AppConfig;
use cs_infra::backup::{read_backup_file, write_backup_file};
use cs_infra::fs::logs_dir;

use super::tracing::init_tracing_subscriber;
use super::wiring::{resolve_data_dir, wire_dependencies};
use crate::console::{parse_line, Command, HELP};

/// Builds the runtime and blocks until stdin closes, `:quit` or Ctrl-C.
///
/// Tracing is initialized here, before wiring, so wiring failures are
/// logged to `<data_dir>/logs` as well.
///
/// # Errors
///
/// Data directory resolution, subscriber registration, runtime creation
/// and wiring failures. Command errors are printed and do not end the
/// loop.
pub fn run_app(config: AppConfig) -> Result<()> {
    let data_dir = resolve_data_dir(&config)?;
    init_tracing_subscriber(&logs_dir(&data_dir))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("clipsync-worker")
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run_async(config))
}

async fn run_async(config: AppConfig) -> Result<()> {
    let wired = wire_dependencies(&config).await?;
    let app = wired.app;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = SyncScheduler::new(app.run_sync_cycle(), wired.sync_interval);
    let scheduler_task = tokio::spawn(scheduler.run(shutdown_rx.clone()));
    let backup_task = tokio::spawn(app.auto_backup_scheduler().run(shutdown_rx));

    info!(data_dir = %wired.data_dir.display(), "clipsync started, type :help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        match parse_line(&line) {
                            Ok(Command::Quit) => break,
                            Ok(command) => {
                                if let Err(err) = dispatch(&app, command).await {
                                    println!("error: {err:#}");
                                }
                            }
                            Err(err) => println!("{err}"),
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        error!(error = %err, "Failed to read stdin");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(true);
    if let Err(err) = scheduler_task.await {
        warn!(error = %err, "Sync scheduler task ended abnormally");
    }
    if let Err(err) = backup_task.await {
        warn!(error = %err, "Auto backup task ended abnormally");
    }
    info!("clipsync stopped");
    Ok(())
}

fn print_items<'a>(items: impl IntoIterator<Item = &'a ClipItem>) {
    for item in items {
        let star = if item.is_favorite { "*" } else { " " };
        let preview: String = item.content.chars().take(60).collect();
        println!(
            "{star} {}  [{}] x{}  {}",
            item.id,
            item.clip_type,
            item.frequency,
            preview.replace('\n', " ")
        );
    }
}

async fn dispatch(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Capture(content) => {
            match app.capture_clipboard().execute(&content, None, vec![]).await? {
                CaptureOutcome::Stored(item) => println!("stored {} [{}]", item.id, item.clip_type),
                CaptureOutcome::Ignored(reason) => println!("ignored ({reason:?})"),
            }
        }
        Command::List(order) => {
            let store = lock_store(app.store())?;
            match order {
                Some(order) => print_items(&store.sorted(order)),
                None => print_items(store.all()),
            }
        }
        Command::Search(query) => print_items(&lock_store(app.store())?.search(&query)),
        Command::Favorites => print_items(&lock_store(app.store())?.favorites()),
        Command::Filter(clip_type) => print_items(&lock_store(app.store())?.filter_by_type(clip_type)),
        Command::ToggleFavorite(id) => match lock_store(app.store())?.toggle_favorite(&id)? {
            Some(item) => println!("{} favorite: {}", item.id, item.is_favorite),
            None => println!("no item {id}"),
        },
        Command::Tag(id, tags) => match lock_store(app.store())?.update_tags(&id, tags)? {
            Some(item) => println!("{} tags: {}", item.id, item.tags.join(", ")),
            None => println!("no item {id}"),
        },
        Command::Delete(id) => {
            let deleted = lock_store(app.store())?.delete(&id)?;
            println!("{}", if deleted { "deleted" } else { "no such item" });
        }
        Command::Clear => {
            lock_store(app.store())?.clear()?;
            println!("history cleared");
        }
        Command::Sync => {
            let report = app.run_sync_cycle().execute(SyncMode::Forced).await?;
            println!("{report:?}");
        }
        Command::Pull => {
            let conflicts = app.pull_remote_items().execute().await?;
            println!("pulled, {conflicts} conflict(s) pending");
        }
        Command::Push => {
            let pushed = app.push_local_items().execute().await?;
            println!("pushed {pushed} item(s)");
        }
        Command::Conflicts => {
            for pair in app.sync_status()?.pending_conflicts {
                println!("{}  local: {:?}  remote: {:?}", pair.id(), pair.local.content, pair.remote.content);
            }
        }
        Command::Resolve(id, resolution) => {
            let resolved = app.resolve_conflict().execute(&id, resolution).await?;
            println!("{}", if resolved { "resolved" } else { "no pending conflict" });
        }
        Command::Stats(range) => {
            let stats = app.compute_statistics().execute(range)?;
            println!(
                "copies: {}  unique: {}  top word: {}",
                stats.total_copies,
                stats.unique_items,
                stats.top_word.as_deref().unwrap_or("-")
            );
            for (clip_type, count) in stats.type_distribution {
                println!("  {clip_type}: {count}");
            }
            if let Some(phrase) = stats.phrases.first() {
                println!("top phrase: {} ({})", phrase.phrase, phrase.count);
            }
            println!("patterns: {:?}", stats.patterns);
        }
        Command::Recommend(limit) => {
            for rec in app.get_recommendations().execute(limit)? {
                print!("{:>8.3}", rec.score);
                print_items([&rec.item]);
            }
        }
        Command::Export(path) => {
            let document = app.export_backup().execute(true).await?;
            write_backup_file(&path, &document).await?;
            println!("exported {} item(s) to {}", document.items.len(), path.display());
        }
        Command::Import(path) => {
            let document = read_backup_file(&path).await?;
            let report = app.import_backup().execute(document).await?;
            println!("imported {} item(s)", report.items);
        }
        Command::Backup => {
            let record = app.run_backup().execute().await?;
            println!("backed up {} item(s) to {}", record.item_count, record.location);
        }
        Command::Backups => {
            for record in app.backup_history().execute()?.records() {
                println!("{}  {} item(s)  {}", record.timestamp, record.item_count, record.location);
            }
        }
        Command::Status => println!("{:?}", app.sync_status()?),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
