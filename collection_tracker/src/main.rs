//! Collection Tracker - MTGO collection enrichment and price history
//!
//! Loads a collection snapshot, enriches it with Goatbots and Scryfall
//! reference data, archives the enriched JSON and folds the snapshot into
//! the collection-history table.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use collection_tracker::{
    compression, goatbots, scryfall, util, CardHistory, Collection, CollectionHistory, Result,
};

/// MTGO collection tracker - enriches collection snapshots and keeps a
/// price/quantity history
#[derive(Parser, Debug)]
#[command(name = "collection_tracker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the collection JSON (array of card records)
    #[arg(short, long)]
    collection: PathBuf,

    /// Path to the Goatbots card-definitions JSON
    #[arg(long)]
    card_definitions: PathBuf,

    /// Path to the Goatbots price-history JSON
    #[arg(long)]
    price_history: PathBuf,

    /// Path to a downloaded Scryfall default-cards dump
    #[arg(long)]
    scryfall_cards: Option<PathBuf>,

    /// Fetch the Scryfall default-cards dump instead of reading a file
    #[arg(long, default_value_t = false)]
    fetch_scryfall: bool,

    /// Directory for archived snapshots and the history table
    #[arg(long, default_value_t = default_data_dir())]
    data_dir: String,

    /// Pretty-print the archived JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Gzip the archived JSON
    #[arg(long, default_value_t = false)]
    gzip: bool,
}

/// Returns the default data directory: ~/.local/share/collection_tracker
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("collection_tracker")
        .to_string_lossy()
        .to_string()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let data_dir = PathBuf::from(&args.data_dir);
    fs::create_dir_all(&data_dir)?;

    let json = fs::read_to_string(&args.collection)?;
    let mut collection = Collection::from_json(&json)?;
    log::info!(
        "Loaded {} card records from {}",
        collection.size(),
        args.collection.display()
    );

    let card_definitions = goatbots::read_card_definitions(&args.card_definitions)?;
    let price_history = goatbots::read_price_history(&args.price_history)?;
    let misses = collection.extract_goatbots_info(&card_definitions, &price_history);
    if !misses.is_empty() {
        log::warn!("{} reference lookups missed during enrichment", misses.len());
    }

    if args.fetch_scryfall {
        collection.extract_scryfall_info(scryfall::fetch_bulk_cards()?);
    } else if let Some(path) = &args.scryfall_cards {
        collection.extract_scryfall_info(scryfall::read_bulk_cards(path)?);
    } else {
        log::info!("No Scryfall source given, skipping price join");
    }

    log::info!("Collection holds {} cards total", collection.total_cards());

    let label = util::timestamp_label(chrono::Utc::now());
    archive_snapshot(args, &data_dir, &collection, &label)?;
    update_history(&data_dir, &mut collection, label)
}

/// Writes the enriched collection to a timestamped archive file.
fn archive_snapshot(
    args: &Args,
    data_dir: &Path,
    collection: &Collection,
    label: &str,
) -> Result<()> {
    let json = if args.pretty {
        collection.to_json_pretty()?
    } else {
        collection.to_json()?
    };
    let (bytes, extension) = if args.gzip {
        (compression::gzip_compress(json.as_bytes())?, "json.gz")
    } else {
        (json.into_bytes(), "json")
    };
    let path = data_dir.join(format!("mtgo-cards_{label}.{extension}"));
    fs::write(&path, bytes)?;
    log::info!("Archived enriched collection to {}", path.display());
    Ok(())
}

/// Folds the snapshot into the on-disk history table, creating it on first
/// run. A corrupt existing table aborts the run rather than being
/// overwritten.
fn update_history(data_dir: &Path, collection: &mut Collection, label: String) -> Result<()> {
    let history_path = data_dir.join("collection-history.csv");
    let cards = collection.take_cards();
    let snapshot: Vec<CardHistory> = cards.iter().filter_map(CardHistory::from_card).collect();

    let mut history = if history_path.exists() {
        let mut history = CollectionHistory::from_csv_string(&fs::read_to_string(&history_path)?)?;
        history.add_snapshot(label, snapshot);
        history
    } else {
        CollectionHistory::from_card_histories(vec![label], snapshot)
    };

    fs::write(&history_path, history.to_csv_string())?;
    log::info!(
        "History now spans {} snapshots of {} cards",
        history.timestamps.len(),
        history.size()
    );
    Ok(())
}
