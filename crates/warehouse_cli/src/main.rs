//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `warehouse_core` linkage with deterministic output.
//! - With a config path argument, open the configured database and print
//!   its schema version and per-table row counts.

use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use warehouse_core::db::{migrations::current_user_version, table_row_counts};
use warehouse_core::{init_logging, open_db_with_busy_timeout, CoreConfig};

/// warehouse_core smoke probe and database inspector
#[derive(Parser)]
#[command(name = "warehouse_cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON config naming the database to inspect
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("warehouse_core ping={}", warehouse_core::ping());
    println!("warehouse_core version={}", warehouse_core::core_version());

    let Some(config_path) = cli.config else {
        return ExitCode::SUCCESS;
    };

    match inspect(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn inspect(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::load(Some(config_path))?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = open_db_with_busy_timeout(&config.db_path, config.busy_timeout())?;
    info!(
        "event=cli_inspect module=cli status=start db_path={}",
        config.db_path.display()
    );

    println!("schema_version={}", current_user_version(&conn)?);
    for (table, count) in table_row_counts(&conn)? {
        println!("{table}={count}");
    }
    Ok(())
}
