// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::storage::KeyValueStore;
use crate::utils::required;
use anyhow::{Context, Result, bail};
use serde_json::json;

pub fn handle<S: KeyValueStore>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: KeyValueStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;

    // Oldest first, the order they happened in.
    let mut txs = ledger.transactions_by_date_desc();
    txs.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out))?;
            wtr.write_record(["id", "date", "type", "amount", "category", "note"])?;
            for t in &txs {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_rfc3339(),
                    t.r#type.to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.note.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date.to_rfc3339(), "type": t.r#type,
                        "amount": t.amount.to_string(), "category": t.category, "note": t.note
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
