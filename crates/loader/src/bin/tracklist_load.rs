//! Bulk track importer.
//!
//! ```bash
//! tracklist-load --csv "data/spotify_data clean.csv" [--batch-size 500] [--sample 20]
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracklist_db::repositories::TrackRepo;
use tracklist_loader::{import_file, DEFAULT_BATCH_SIZE};

/// Replace the track table with the contents of a CSV export.
#[derive(Parser, Debug)]
#[command(name = "tracklist-load")]
struct Args {
    /// CSV file to import
    #[arg(long, env = "TRACKS_CSV", value_name = "FILE")]
    csv: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Rows per INSERT statement (clamped to 4369)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Print this many stored tracks as JSON after loading
    #[arg(long, default_value_t = 0)]
    sample: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracklist_loader=info,tracklist_load=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let pool = tracklist_db::create_pool(&args.database_url, 2)
        .await
        .context("Failed to connect to database")?;
    tracklist_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let summary = import_file(&pool, &args.csv, args.batch_size)
        .await
        .with_context(|| format!("Import of {} failed", args.csv.display()))?;

    tracing::info!(
        rows_read = summary.rows_read,
        inserted = summary.inserted,
        skipped_duplicates = summary.skipped_duplicates,
        replaced = summary.replaced,
        "Import complete"
    );
    println!(
        "Loaded {} tracks successfully ({} rows read, {} duplicates skipped).",
        summary.inserted, summary.rows_read, summary.skipped_duplicates
    );

    if args.sample > 0 {
        let tracks = TrackRepo::sample(&pool, args.sample)
            .await
            .context("Failed to read sample")?;
        println!("{}", serde_json::to_string_pretty(&tracks)?);
    }

    pool.close().await;
    Ok(())
}
