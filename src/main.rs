mod run;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        run::print_usage();
        return Ok(());
    }

    let db_path = get_db_path()?;
    let store = bankfeed::store::SqliteStore::open(&db_path)?;
    bankfeed::ledger::register_entities(&store)?;

    run::as_cli(&args, &store)
}

fn get_db_path() -> Result<std::path::PathBuf> {
    if let Ok(path) = std::env::var("BANKFEED_DB") {
        return Ok(std::path::PathBuf::from(path));
    }
    let proj_dirs = directories::ProjectDirs::from("com", "bankfeed", "bankfeed")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("bankfeed.db"))
}
