// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::commands::{categories, doctor, summary};
use budgetbook::ledger::Ledger;
use budgetbook::models::{NewTransaction, TransactionType};
use budgetbook::storage::MemoryStore;
use budgetbook::cli;
use chrono::DateTime;
use rust_decimal::Decimal;

fn run(ledger: &mut Ledger<MemoryStore>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["budgetbook", "category"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("category", sub)) => categories::handle(ledger, sub),
        _ => panic!("no category subcommand"),
    }
}

fn spend(ledger: &mut Ledger<MemoryStore>, category: &str, amount: i64) {
    ledger
        .add_transaction(NewTransaction {
            date: DateTime::parse_from_rfc3339("2025-05-05T12:00:00Z").unwrap(),
            amount: Decimal::from(amount),
            r#type: TransactionType::Expense,
            category: category.into(),
            note: String::new(),
        })
        .unwrap();
}

#[test]
fn add_then_edit_limit() {
    let mut ledger = Ledger::open(MemoryStore::new());
    run(
        &mut ledger,
        &["add", "--name", "Pets", "--limit", "500", "--color", "#000", "--icon", "Heart"],
    )
    .unwrap();
    run(&mut ledger, &["edit", "Pets", "--limit", "700"]).unwrap();

    let pets = ledger.find_category("Pets").unwrap();
    assert_eq!(pets.budget_limit, Decimal::from(700));
    assert_eq!(pets.color, "#000");
    assert_eq!(pets.icon.as_deref(), Some("Heart"));
}

#[test]
fn add_without_limit_means_no_limit() {
    let mut ledger = Ledger::open(MemoryStore::new());
    run(&mut ledger, &["add", "--name", "Gifts"]).unwrap();
    let gifts = ledger.find_category("Gifts").unwrap();
    assert!(!gifts.has_limit());
    assert!(gifts.color.starts_with('#'));
}

#[test]
fn add_rejects_bad_color_and_limit() {
    let mut ledger = Ledger::open(MemoryStore::new());
    assert!(run(&mut ledger, &["add", "--name", "X", "--color", "red"]).is_err());
    assert!(run(&mut ledger, &["add", "--name", "X", "--limit", "lots"]).is_err());
    assert!(run(&mut ledger, &["add", "--name", "X", "--limit=-1"]).is_err());
    assert_eq!(ledger.categories().len(), 5);
}

#[test]
fn edit_needs_a_change_and_a_known_category() {
    let mut ledger = Ledger::open(MemoryStore::new());
    assert!(run(&mut ledger, &["edit", "Food"]).is_err());
    assert!(run(&mut ledger, &["edit", "Travel", "--limit", "10"]).is_err());
}

#[test]
fn rm_is_refused_while_transactions_use_it() {
    let mut ledger = Ledger::open(MemoryStore::new());
    spend(&mut ledger, "Food", 30);

    assert!(run(&mut ledger, &["rm", "Food"]).is_err());
    assert!(ledger.find_category("Food").is_some());

    run(&mut ledger, &["rm", "5"]).unwrap();
    assert!(ledger.category("5").is_none());
}

#[test]
fn summary_reports_totals() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger
        .add_transaction(NewTransaction {
            date: DateTime::parse_from_rfc3339("2025-05-01T09:00:00Z").unwrap(),
            amount: Decimal::from(1000),
            r#type: TransactionType::Income,
            category: "Income Source".into(),
            note: "Salary".into(),
        })
        .unwrap();
    spend(&mut ledger, "Food", 200);

    let s = summary::summarize(&ledger);
    assert_eq!(s.income, Decimal::from(1000));
    assert_eq!(s.expenses, Decimal::from(200));
    assert_eq!(s.balance, Decimal::from(800));
    assert_eq!(s.transactions, 2);
}

#[test]
fn doctor_flags_orphans_and_duplicates() {
    let mut ledger = Ledger::open(MemoryStore::new());
    assert!(doctor::diagnose(&ledger).is_empty());

    spend(&mut ledger, "Pets", 5);
    spend(&mut ledger, "Pets", 7);
    run(&mut ledger, &["add", "--name", "Bills"]).unwrap();

    let issues = doctor::diagnose(&ledger);
    assert_eq!(
        issues,
        vec![
            vec![
                "expense_unknown_category".to_string(),
                "'Pets' (2 transactions)".to_string()
            ],
            vec!["duplicate_category_name".to_string(), "'Bills' x2".to_string()],
        ]
    );
}
