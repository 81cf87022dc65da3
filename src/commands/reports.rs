// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::reports::{
    budget_progress, calendar_month, category_breakdown, day_totals, monthly_stats,
    spending_trend, transactions_on, year_summary,
};
use crate::storage::KeyValueStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table, required};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};

use super::transactions::TransactionRow;

pub fn handle<S: KeyValueStore>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("calendar", sub)) => calendar(ledger, sub)?,
        Some(("day", sub)) => day(ledger, sub)?,
        Some(("trend", sub)) => trend(ledger, sub)?,
        Some(("monthly", sub)) => monthly(ledger, sub)?,
        Some(("breakdown", sub)) => breakdown(ledger, sub)?,
        Some(("budget", sub)) => budget(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn flags(sub: &clap::ArgMatches) -> (bool, bool) {
    (sub.get_flag("json"), sub.get_flag("jsonl"))
}

fn calendar<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };
    let cal = calendar_month(ledger.transactions(), year, month)
        .with_context(|| format!("Invalid month {}-{:02}", year, month))?;
    let (json_flag, jsonl_flag) = flags(sub);
    if maybe_print_json(json_flag, jsonl_flag, &cal)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = cal
        .weeks()
        .map(|week| {
            week.iter()
                .map(|d| {
                    if !d.in_month {
                        String::new()
                    } else if d.income.is_zero() && d.expense.is_zero() {
                        d.date.day().to_string()
                    } else {
                        let mut cell = d.date.day().to_string();
                        if !d.income.is_zero() {
                            cell.push_str(&format!("\n+{}", fmt_money(&d.income)));
                        }
                        if !d.expense.is_zero() {
                            cell.push_str(&format!("\n-{}", fmt_money(&d.expense)));
                        }
                        cell
                    }
                })
                .collect::<Vec<String>>()
        })
        .collect();
    println!("{}-{:02}", year, month);
    println!(
        "{}",
        pretty_table(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"], rows)
    );
    Ok(())
}

fn day<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let rows: Vec<TransactionRow> = transactions_on(ledger.transactions(), date)
        .into_iter()
        .map(TransactionRow::from)
        .collect();
    let (json_flag, jsonl_flag) = flags(sub);
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let totals = day_totals(ledger.transactions(), date);
        let data = rows
            .into_iter()
            .map(|r| vec![r.date, r.r#type, r.amount, r.category, r.note])
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Category", "Note"], data)
        );
        println!(
            "Income +{}  Expense -{}",
            fmt_money(&totals.income),
            fmt_money(&totals.expense)
        );
    }
    Ok(())
}

fn trend<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let today = match sub.get_one::<String>("today") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let points = spending_trend(ledger.transactions(), today);
    let (json_flag, jsonl_flag) = flags(sub);
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let data = points
            .iter()
            .map(|p| vec![p.label.clone(), p.date.to_string(), fmt_money(&p.amount)])
            .collect();
        println!("{}", pretty_table(&["Day", "Date", "Spent"], data));
    }
    Ok(())
}

fn monthly<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| Local::now().year());
    let stats = monthly_stats(ledger.transactions(), year);
    let (json_flag, jsonl_flag) = flags(sub);
    if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
        let mut data: Vec<Vec<String>> = stats
            .iter()
            .map(|s| {
                vec![
                    s.label.clone(),
                    fmt_money(&s.income),
                    fmt_money(&s.expense),
                    fmt_money(&s.net),
                ]
            })
            .collect();
        let total = year_summary(ledger.transactions(), year);
        data.push(vec![
            year.to_string(),
            fmt_money(&total.income),
            fmt_money(&total.expense),
            fmt_money(&total.net),
        ]);
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}

fn breakdown<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let slices = category_breakdown(ledger.transactions(), ledger.categories());
    let (json_flag, jsonl_flag) = flags(sub);
    if maybe_print_json(json_flag, jsonl_flag, &slices)? {
        return Ok(());
    }
    if slices.is_empty() {
        println!("Add expenses to see the breakdown.");
        return Ok(());
    }
    let data = slices
        .iter()
        .map(|s| vec![s.name.clone(), fmt_money(&s.amount), s.color.clone()])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Color"], data));
    Ok(())
}

fn budget<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let progress = budget_progress(ledger.transactions(), ledger.categories());
    let (json_flag, jsonl_flag) = flags(sub);
    if !maybe_print_json(json_flag, jsonl_flag, &progress)? {
        let data = progress
            .iter()
            .map(|p| {
                let limit = if p.limit.is_zero() {
                    "no limit".to_string()
                } else {
                    fmt_money(&p.limit)
                };
                let status = if p.over_budget {
                    format!("over by {}", fmt_money(&p.over_by))
                } else {
                    format!("{}% used", p.percent.round())
                };
                vec![p.name.clone(), fmt_money(&p.spent), limit, status]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Limit", "Status"], data)
        );
    }
    Ok(())
}
