use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use tracing::info;

use loot_logger::logging::init_logging;
use loot_logger::models::sorted_by_value;
use loot_logger::utils::{get_settings_file_path, load_store_settings};
use loot_logger::{consolidate, ItemEntry, KillRecord, LootRecordStore, UNKNOWN};

#[derive(Debug, Parser)]
#[command(name = "loot_logger", version, about = "Inspect and edit per-boss loot logs")]
struct Args {
    /// Storage root, overrides settings and LOOT_LOGGER_ROOT
    #[arg(long)]
    root: Option<PathBuf>,

    /// Player directory to use, shared directory when omitted
    #[arg(long)]
    player: Option<String>,

    /// Settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List entities that have a log
    Entities,
    /// Print every record for an entity
    Show { entity: String },
    /// Sum drops by item, for one entity or all of them
    Consolidate { entity: Option<String> },
    /// Record count, best kill count and value for an entity
    Summary { entity: String },
    /// Append a new record
    Record {
        entity: String,
        #[arg(long, default_value_t = UNKNOWN, allow_hyphen_values = true)]
        id: i32,
        #[arg(long, default_value_t = UNKNOWN, allow_hyphen_values = true)]
        level: i32,
        #[arg(long, default_value_t = UNKNOWN, allow_hyphen_values = true)]
        kill_count: i32,
        /// id:quantity:price:name
        #[arg(long = "drop", value_parser = parse_drop)]
        drops: Vec<ItemEntry>,
    },
    /// Add drops to the most recent record
    Amend {
        entity: String,
        #[arg(long = "drop", value_parser = parse_drop, required = true)]
        drops: Vec<ItemEntry>,
    },
    /// Delete an entity's log
    Delete { entity: String },
    /// Rewrite an entity's log in the current format
    Migrate { entity: String },
}

fn parse_drop(value: &str) -> Result<ItemEntry, String> {
    let mut parts = value.splitn(4, ':');
    let id = parts.next().unwrap_or_default();
    let quantity = parts.next().ok_or("expected id:quantity:price:name")?;
    let price = parts.next().ok_or("expected id:quantity:price:name")?;
    let name = parts.next().unwrap_or_default();

    Ok(ItemEntry::new(
        id.parse().map_err(|e| format!("bad item id {:?}: {}", id, e))?,
        name,
        quantity.parse().map_err(|e| format!("bad quantity {:?}: {}", quantity, e))?,
        price.parse().map_err(|e| format!("bad price {:?}: {}", price, e))?,
    ))
}

fn print_items(items: &[ItemEntry]) {
    for item in items {
        println!("  {:>6} x {:<30} @ {:>10} = {}", item.quantity, format!("{} ({})", item.name, item.id), item.price, item.total_value());
    }
}

fn status(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Before settings load so their diagnostics are visible
    let logging = init_logging("info");

    let settings_path = args.settings.clone().unwrap_or_else(get_settings_file_path);
    let mut settings = load_store_settings(&settings_path);
    settings.apply_env_overrides();
    if let Some(root) = args.root {
        settings.set_storage_root(root);
    }
    if args.player.is_some() {
        settings.set_player(args.player);
    }

    if let Some(logging) = &logging {
        logging.set_level(&settings.log_level);
    }
    info!(storage_root = %settings.storage_root.display(), "Starting loot logger");

    let store = LootRecordStore::open(&settings.storage_root, settings.player.as_deref());

    match args.command {
        Command::Entities => {
            for entity in store.list_known_entities() {
                println!("{}", entity);
            }
            ExitCode::SUCCESS
        }
        Command::Show { entity } => {
            for record in store.load(&entity) {
                println!(
                    "{} (id {}, level {}, kc {}): {} items, value {}",
                    record.name, record.id, record.level, record.kill_count, record.drops.len(), record.total_value()
                );
                print_items(&record.drops);
            }
            ExitCode::SUCCESS
        }
        Command::Consolidate { entity } => {
            let records = match entity {
                Some(entity) => store.load(&entity),
                None => store.load_all(),
            };
            print_items(&sorted_by_value(&consolidate(&records)));
            ExitCode::SUCCESS
        }
        Command::Summary { entity } => {
            let summary = store.summary(&entity);
            let kill_count = summary
                .highest_kill_count
                .map_or_else(|| "unknown".to_string(), |kc| kc.to_string());
            println!(
                "{}: {} records, highest kc {}, total value {}",
                summary.entity, summary.record_count, kill_count, summary.total_value
            );
            print_items(&summary.items);
            ExitCode::SUCCESS
        }
        Command::Record { entity, id, level, kill_count, drops } => {
            status(store.append(&KillRecord::new(id, entity, level, kill_count, drops)))
        }
        Command::Amend { entity, drops } => status(store.amend_last(&entity, drops)),
        Command::Delete { entity } => status(store.delete(&entity)),
        Command::Migrate { entity } => status(store.migrate(&entity)),
    }
}
