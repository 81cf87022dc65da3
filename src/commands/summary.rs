// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::storage::KeyValueStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub transactions: usize,
}

pub fn summarize<S: KeyValueStore>(ledger: &Ledger<S>) -> Summary {
    Summary {
        balance: ledger.current_balance(),
        income: ledger.total_income(),
        expenses: ledger.total_expenses(),
        transactions: ledger.transactions().len(),
    }
}

pub fn handle<S: KeyValueStore>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let s = summarize(ledger);
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Total Balance".to_string(), fmt_money(&s.balance)],
            vec!["Total Income".to_string(), format!("+{}", fmt_money(&s.income))],
            vec![
                "Total Expenses".to_string(),
                format!("-{}", fmt_money(&s.expenses)),
            ],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}
