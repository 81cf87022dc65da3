// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregates over the ledger, recomputed on every call.

use crate::models::{Category, Transaction, TransactionType};
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

// Sums saturate at Decimal::MAX instead of panicking.
impl Totals {
    fn add(&mut self, tx: &Transaction) {
        match tx.r#type {
            TransactionType::Income => self.income = self.income.saturating_add(tx.amount),
            TransactionType::Expense => self.expense = self.expense.saturating_add(tx.amount),
        }
        self.net = self.income.saturating_sub(self.expense);
    }
}

fn totals<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let mut t = Totals::default();
    for tx in txs {
        t.add(tx);
    }
    t
}

pub fn transactions_on(txs: &[Transaction], day: NaiveDate) -> Vec<&Transaction> {
    txs.iter().filter(|t| t.day() == day).collect()
}

pub fn day_totals(txs: &[Transaction], day: NaiveDate) -> Totals {
    totals(txs.iter().filter(|t| t.day() == day))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }
}

/// First and last day of a month, `None` if the month is out of range.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Whole weeks (Sunday to Saturday) covering the month, with per-day totals.
pub fn calendar_month(txs: &[Transaction], year: i32, month: u32) -> Option<CalendarMonth> {
    let (first, last) = month_bounds(year, month)?;
    let start = first - Days::new(u64::from(first.weekday().num_days_from_sunday()));
    let end = last + Days::new(u64::from(6 - last.weekday().num_days_from_sunday()));

    let mut by_day: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for tx in txs {
        let day = tx.day();
        if day >= start && day <= end {
            by_day.entry(day).or_default().add(tx);
        }
    }

    let days = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| {
            let t = by_day.get(&date).copied().unwrap_or_default();
            CalendarDay {
                date,
                in_month: date.month() == month,
                income: t.income,
                expense: t.expense,
            }
        })
        .collect();
    Some(CalendarMonth { year, month, days })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub label: String,
    pub amount: Decimal,
}

/// Expense per day for the seven days ending at `today`, oldest first.
pub fn spending_trend(txs: &[Transaction], today: NaiveDate) -> Vec<TrendPoint> {
    (0..7u64)
        .rev()
        .map(|back| {
            let date = today - Days::new(back);
            let amount = txs
                .iter()
                .filter(|t| t.is_expense() && t.day() == date)
                .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount));
            TrendPoint {
                date,
                label: date.format("%a").to_string(),
                amount,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStats {
    pub month: u32,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Twelve entries, January first, zero-filled.
pub fn monthly_stats(txs: &[Transaction], year: i32) -> Vec<MonthStats> {
    let mut buckets = [Totals::default(); 12];
    for tx in txs.iter().filter(|t| t.date.year() == year) {
        buckets[tx.date.month0() as usize].add(tx);
    }
    buckets
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let month = i as u32 + 1;
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b").to_string())
                .unwrap_or_default();
            MonthStats {
                month,
                label,
                income: t.income,
                expense: t.expense,
                net: t.net,
            }
        })
        .collect()
}

pub fn year_summary(txs: &[Transaction], year: i32) -> Totals {
    totals(txs.iter().filter(|t| t.date.year() == year))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub color: String,
    pub amount: Decimal,
}

fn spent_by_name(txs: &[Transaction]) -> BTreeMap<&str, Decimal> {
    let mut spent: BTreeMap<&str, Decimal> = BTreeMap::new();
    for tx in txs.iter().filter(|t| t.is_expense()) {
        let sum = spent.entry(tx.category.as_str()).or_default();
        *sum = sum.saturating_add(tx.amount);
    }
    spent
}

/// Expense share per category, in category order; categories without spend are left out.
pub fn category_breakdown(txs: &[Transaction], cats: &[Category]) -> Vec<CategorySlice> {
    let spent = spent_by_name(txs);
    cats.iter()
        .filter_map(|c| {
            let amount = spent.get(c.name.as_str()).copied().unwrap_or_default();
            (amount > Decimal::ZERO).then(|| CategorySlice {
                name: c.name.clone(),
                color: c.color.clone(),
                amount,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub id: String,
    pub name: String,
    pub color: String,
    pub spent: Decimal,
    pub limit: Decimal,
    pub percent: Decimal,
    pub over_budget: bool,
    pub over_by: Decimal,
}

pub fn budget_progress(txs: &[Transaction], cats: &[Category]) -> Vec<BudgetProgress> {
    let spent_map = spent_by_name(txs);
    let hundred = Decimal::ONE_HUNDRED;
    cats.iter()
        .map(|c| {
            let spent = spent_map.get(c.name.as_str()).copied().unwrap_or_default();
            let limit = c.budget_limit;
            let percent = if c.has_limit() {
                // a ratio too large to represent is over the limit anyway
                spent
                    .checked_div(limit)
                    .and_then(|r| r.checked_mul(hundred))
                    .map_or(hundred, |p| p.min(hundred))
            } else {
                Decimal::ZERO
            };
            let over_budget = c.has_limit() && spent > limit;
            BudgetProgress {
                id: c.id.clone(),
                name: c.name.clone(),
                color: c.color.clone(),
                spent,
                limit,
                percent,
                over_budget,
                over_by: if over_budget {
                    spent.saturating_sub(limit)
                } else {
                    Decimal::ZERO
                },
            }
        })
        .collect()
}

/// Expenses whose category label names no existing category.
pub fn orphaned_expenses<'a>(txs: &'a [Transaction], cats: &[Category]) -> Vec<&'a Transaction> {
    let names: HashSet<&str> = cats.iter().map(|c| c.name.as_str()).collect();
    txs.iter()
        .filter(|t| t.is_expense() && !names.contains(t.category.as_str()))
        .collect()
}
