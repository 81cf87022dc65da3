// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::reports::orphaned_expenses;
use crate::storage::KeyValueStore;
use crate::utils::pretty_table;
use anyhow::Result;
use std::collections::BTreeMap;

/// Issue/detail pairs; empty when the ledger is consistent.
pub fn diagnose<S: KeyValueStore>(ledger: &Ledger<S>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Expenses labelled with a category that no longer exists
    let mut orphans: BTreeMap<&str, usize> = BTreeMap::new();
    for t in orphaned_expenses(ledger.transactions(), ledger.categories()) {
        *orphans.entry(t.category.as_str()).or_default() += 1;
    }
    for (label, count) in orphans {
        rows.push(vec![
            "expense_unknown_category".into(),
            format!("'{}' ({} transactions)", label, count),
        ]);
    }

    // 2) Names shared by several categories make spend lookups ambiguous
    let mut names: BTreeMap<&str, usize> = BTreeMap::new();
    for c in ledger.categories() {
        *names.entry(c.name.as_str()).or_default() += 1;
    }
    for (name, count) in names.into_iter().filter(|(_, n)| *n > 1) {
        rows.push(vec![
            "duplicate_category_name".into(),
            format!("'{}' x{}", name, count),
        ]);
    }
    rows
}

pub fn handle<S: KeyValueStore>(ledger: &Ledger<S>) -> Result<()> {
    let rows = diagnose(ledger);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
