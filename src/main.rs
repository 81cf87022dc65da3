// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use budgetbook::config::Config;
use budgetbook::ledger::Ledger;
use budgetbook::storage::SqliteStore;
use budgetbook::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::from_env()?;
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("Open DB at {}", config.db_path.display()))?;
    let mut ledger = Ledger::with_key(store, &config.storage_key);
    ledger.load();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        Some(("reset", sub)) => {
            if !sub.get_flag("yes") {
                bail!("Refusing to reset without --yes");
            }
            ledger.reset_data()?;
            println!("Ledger reset: transactions cleared, default categories restored");
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
