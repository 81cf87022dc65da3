// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{NewCategory, NewTransaction, Transaction, TransactionType};
use crate::storage::KeyValueStore;
use crate::utils::{
    fmt_money, maybe_print_json, now, parse_amount, parse_datetime, parse_month, pretty_table,
    required,
};
use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

pub const INCOME_CATEGORY: &str = "Income Source";
pub const INCOME_NOTE: &str = "Salary/Deposit";
pub const FALLBACK_EXPENSE_CATEGORY: &str = "Food";
pub const NEW_CATEGORY_COLOR: &str = "#a855f7";

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

/// Fill in the defaults a bare `tx add` gets.
pub fn build_new<S: KeyValueStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<NewTransaction> {
    let r#type: TransactionType = required(sub, "type")?.parse()?;
    let amount = parse_amount(required(sub, "amount")?)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_datetime(d)?,
        None => now(),
    };
    let category = match (r#type, sub.get_one::<String>("category")) {
        (_, Some(c)) if !c.trim().is_empty() => c.trim().to_string(),
        (TransactionType::Income, _) => INCOME_CATEGORY.to_string(),
        (TransactionType::Expense, _) => ledger
            .categories()
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| FALLBACK_EXPENSE_CATEGORY.to_string()),
    };
    let note = match (r#type, sub.get_one::<String>("note")) {
        (_, Some(n)) if !n.is_empty() => n.clone(),
        (TransactionType::Income, _) => INCOME_NOTE.to_string(),
        (TransactionType::Expense, _) => String::new(),
    };
    Ok(NewTransaction {
        date,
        amount,
        r#type,
        category,
        note,
    })
}

fn add<S: KeyValueStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = build_new(ledger, sub)?;
    if data.r#type == TransactionType::Expense && ledger.find_category(&data.category).is_none() {
        if sub.get_flag("create-category") {
            let cat = ledger.add_category(NewCategory {
                name: data.category.clone(),
                budget_limit: Decimal::ZERO,
                color: NEW_CATEGORY_COLOR.to_string(),
                icon: None,
            })?;
            println!("Created category '{}' (id: {})", cat.name, cat.id);
        } else {
            tracing::warn!(
                "category '{}' does not exist; the expense will not count toward any budget",
                data.category
            );
        }
    }
    let tx = ledger.add_transaction(data)?;
    println!(
        "Recorded {} {} on {} in '{}' (id: {})",
        tx.r#type,
        fmt_money(&tx.amount),
        tx.date.format("%Y-%m-%d %H:%M"),
        tx.category,
        tx.id
    );
    Ok(())
}

fn rm<S: KeyValueStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    if ledger.remove_transaction(id)? {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Category", "Note", "Id"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub note: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.format("%Y-%m-%d %H:%M").to_string(),
            r#type: t.r#type.to_string(),
            amount: fmt_money(&t.amount),
            category: t.category.clone(),
            note: t.note.clone(),
        }
    }
}

pub fn query_rows<S: KeyValueStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let r#type = sub
        .get_one::<String>("type")
        .map(|t| t.parse::<TransactionType>())
        .transpose()?;
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied();

    let data = ledger
        .transactions_by_date_desc()
        .into_iter()
        .filter(|t| month.is_none_or(|(y, m)| t.date.year() == y && t.date.month() == m))
        .filter(|t| r#type.is_none_or(|ty| t.r#type == ty))
        .filter(|t| category.is_none_or(|c| &t.category == c))
        .take(limit.unwrap_or(usize::MAX))
        .map(TransactionRow::from)
        .collect();
    Ok(data)
}
