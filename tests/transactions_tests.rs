// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::commands::transactions::{self, INCOME_CATEGORY, INCOME_NOTE};
use budgetbook::ledger::Ledger;
use budgetbook::models::{NewTransaction, TransactionType};
use budgetbook::storage::MemoryStore;
use budgetbook::cli;
use chrono::DateTime;
use rust_decimal::Decimal;

fn setup() -> Ledger<MemoryStore> {
    let mut ledger = Ledger::open(MemoryStore::new());
    for i in 1..=3 {
        ledger
            .add_transaction(NewTransaction {
                date: DateTime::parse_from_rfc3339(&format!("2025-01-0{}T10:00:00Z", i)).unwrap(),
                amount: Decimal::from(10),
                r#type: TransactionType::Expense,
                category: "Food".into(),
                note: String::new(),
            })
            .unwrap();
    }
    ledger
        .add_transaction(NewTransaction {
            date: DateTime::parse_from_rfc3339("2025-02-01T10:00:00Z").unwrap(),
            amount: Decimal::from(900),
            r#type: TransactionType::Income,
            category: INCOME_CATEGORY.into(),
            note: INCOME_NOTE.into(),
        })
        .unwrap();
    ledger
}

fn tx_sub(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["budgetbook", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => tx_m.clone(),
        _ => panic!("no tx subcommand"),
    }
}

fn leaf(m: &clap::ArgMatches) -> &clap::ArgMatches {
    m.subcommand().map(|(_, sub)| sub).expect("leaf subcommand")
}

#[test]
fn list_limit_respected() {
    let ledger = setup();
    let m = tx_sub(&["list", "--limit", "2"]);
    let rows = transactions::query_rows(&ledger, leaf(&m)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01 10:00");
    assert_eq!(rows[1].date, "2025-01-03 10:00");
}

#[test]
fn list_filters_by_month_and_type() {
    let ledger = setup();
    let m = tx_sub(&["list", "--month", "2025-01"]);
    let rows = transactions::query_rows(&ledger, leaf(&m)).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.r#type == "expense"));

    let m = tx_sub(&["list", "--type", "income"]);
    let rows = transactions::query_rows(&ledger, leaf(&m)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "900.00");
    assert_eq!(rows[0].category, INCOME_CATEGORY);

    let m = tx_sub(&["list", "--category", "Bills"]);
    assert!(transactions::query_rows(&ledger, leaf(&m)).unwrap().is_empty());
}

#[test]
fn add_fills_income_defaults() {
    let mut ledger = Ledger::open(MemoryStore::new());
    let m = tx_sub(&[
        "add",
        "--type",
        "income",
        "--amount",
        "1000",
        "--date",
        "2025-03-01T09:00:00+08:00",
    ]);
    transactions::handle(&mut ledger, &m).unwrap();

    let tx = &ledger.transactions()[0];
    assert_eq!(tx.category, INCOME_CATEGORY);
    assert_eq!(tx.note, INCOME_NOTE);
    assert_eq!(ledger.total_income(), Decimal::from(1000));
}

#[test]
fn expense_defaults_to_first_category() {
    let ledger = Ledger::open(MemoryStore::new());
    let m = tx_sub(&["add", "--type", "expense", "--amount", "12.5"]);
    let new = transactions::build_new(&ledger, leaf(&m)).unwrap();
    assert_eq!(new.category, "Food");
    assert_eq!(new.note, "");
    assert_eq!(new.amount, "12.5".parse::<Decimal>().unwrap());
}

#[test]
fn add_rejects_bad_amounts() {
    let mut ledger = Ledger::open(MemoryStore::new());
    for bad in ["abc", "NaN", "-5", "12x"] {
        let amount = format!("--amount={bad}");
        let m = tx_sub(&["add", "--type", "expense", amount.as_str()]);
        assert!(transactions::handle(&mut ledger, &m).is_err(), "{bad}");
    }
    assert!(ledger.transactions().is_empty());
}

#[test]
fn rm_removes_by_id() {
    let mut ledger = setup();
    let id = ledger.transactions()[0].id.clone();
    let m = tx_sub(&["rm", id.as_str()]);
    transactions::handle(&mut ledger, &m).unwrap();
    assert_eq!(ledger.transactions().len(), 3);
    assert!(ledger.transaction(&id).is_none());

    let m = tx_sub(&["rm", "unknown"]);
    transactions::handle(&mut ledger, &m).unwrap();
    assert_eq!(ledger.transactions().len(), 3);
}

#[test]
fn create_category_flag_adds_unknown_expense_category() {
    let mut ledger = Ledger::open(MemoryStore::new());
    let m = tx_sub(&["add", "--type", "expense", "--amount", "40", "--category", "Pets"]);
    transactions::handle(&mut ledger, &m).unwrap();
    assert!(ledger.find_category("Pets").is_none());

    let m = tx_sub(&[
        "add",
        "--type",
        "expense",
        "--amount",
        "60",
        "--category",
        "Pets",
        "--create-category",
    ]);
    transactions::handle(&mut ledger, &m).unwrap();
    let pets = ledger.find_category("Pets").unwrap();
    assert!(!pets.has_limit());
    assert_eq!(pets.color, transactions::NEW_CATEGORY_COLOR);
    assert_eq!(ledger.categories().len(), 6);
    assert_eq!(ledger.category_spent("Pets"), Decimal::from(100));

    // an existing category is never duplicated
    transactions::handle(&mut ledger, &m).unwrap();
    assert_eq!(ledger.categories().len(), 6);
}
