// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{CategoryUpdate, NewCategory};
use crate::storage::KeyValueStore;
use crate::utils::{
    PRESET_COLORS, fmt_money, maybe_print_json, parse_amount, parse_color, pretty_table, required,
};
use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?.trim().to_string();
            if name.is_empty() {
                bail!("Category name must not be empty");
            }
            let budget_limit = match sub.get_one::<String>("limit") {
                Some(l) => parse_amount(l)?,
                None => Decimal::ZERO,
            };
            let color = match sub.get_one::<String>("color") {
                Some(c) => parse_color(c)?,
                None => PRESET_COLORS[ledger.categories().len() % PRESET_COLORS.len()].to_string(),
            };
            let icon = sub.get_one::<String>("icon").cloned();
            let cat = ledger.add_category(NewCategory {
                name,
                budget_limit,
                color,
                icon,
            })?;
            println!("Added category '{}' (id: {})", cat.name, cat.id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            if !maybe_print_json(json_flag, jsonl_flag, &ledger.categories())? {
                let data = ledger
                    .categories()
                    .iter()
                    .map(|c| {
                        let limit = if c.has_limit() {
                            fmt_money(&c.budget_limit)
                        } else {
                            "no limit".to_string()
                        };
                        vec![
                            c.name.clone(),
                            limit,
                            fmt_money(&ledger.category_spent(&c.name)),
                            c.color.clone(),
                            c.icon.clone().unwrap_or_default(),
                            c.id.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Limit", "Spent", "Color", "Icon", "Id"], data)
                );
            }
        }
        Some(("edit", sub)) => {
            let key = required(sub, "category")?;
            let id = ledger
                .find_category(key)
                .map(|c| c.id.clone())
                .with_context(|| format!("Category '{}' not found", key))?;
            let updates = CategoryUpdate {
                name: sub
                    .get_one::<String>("name")
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
                budget_limit: sub
                    .get_one::<String>("limit")
                    .map(|l| parse_amount(l))
                    .transpose()?,
                color: sub
                    .get_one::<String>("color")
                    .map(|c| parse_color(c))
                    .transpose()?,
                icon: sub.get_one::<String>("icon").cloned(),
            };
            if updates.is_empty() {
                bail!("Nothing to change; pass --name, --limit, --color or --icon");
            }
            if let (Some(new_name), Some(cat)) = (&updates.name, ledger.category(&id)) {
                if new_name != &cat.name && ledger.category_in_use(&id) {
                    tracing::warn!(
                        "renaming '{}' to '{}' leaves its existing transactions under the old label",
                        cat.name,
                        new_name
                    );
                }
            }
            ledger.update_category(&id, updates)?;
            println!("Updated category {}", id);
        }
        Some(("rm", sub)) => {
            let key = required(sub, "category")?;
            let (id, name) = ledger
                .find_category(key)
                .map(|c| (c.id.clone(), c.name.clone()))
                .with_context(|| format!("Category '{}' not found", key))?;
            if ledger.category_in_use(&id) {
                bail!(
                    "Cannot delete category '{}' because it has existing transactions; delete them first",
                    name
                );
            }
            ledger.remove_category(&id)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
