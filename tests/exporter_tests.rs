// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::ledger::Ledger;
use budgetbook::models::{NewTransaction, TransactionType};
use budgetbook::storage::MemoryStore;
use budgetbook::{cli, commands::exporter};
use chrono::DateTime;
use serde_json::json;
use tempfile::tempdir;

fn base_ledger() -> Ledger<MemoryStore> {
    Ledger::open(MemoryStore::new())
}

fn export(ledger: &Ledger<MemoryStore>, format: &str, out: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "budgetbook",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(ledger, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_streams_pretty_json() {
    let mut ledger = base_ledger();
    let tx = ledger
        .add_transaction(NewTransaction {
            date: DateTime::parse_from_rfc3339("2025-01-02T08:30:00+00:00").unwrap(),
            amount: "12.34".parse().unwrap(),
            r#type: TransactionType::Expense,
            category: "Food".into(),
            note: "Weekly run".into(),
        })
        .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    export(&ledger, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": tx.id,
                "date": "2025-01-02T08:30:00+00:00",
                "type": "expense",
                "amount": "12.34",
                "category": "Food",
                "note": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_csv_is_oldest_first() {
    let mut ledger = base_ledger();
    for (date, note) in [("2025-01-05T00:00:00Z", "later"), ("2025-01-01T00:00:00Z", "earlier")] {
        ledger
            .add_transaction(NewTransaction {
                date: DateTime::parse_from_rfc3339(date).unwrap(),
                amount: "1".parse().unwrap(),
                r#type: TransactionType::Income,
                category: "Gift".into(),
                note: note.into(),
            })
            .unwrap();
    }

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    export(&ledger, "CSV", &out_path.to_string_lossy()).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let notes: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(5).unwrap().to_string())
        .collect();
    assert_eq!(notes, vec!["earlier", "later"]);
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let ledger = base_ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    assert!(export(&ledger, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
