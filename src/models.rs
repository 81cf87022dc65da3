// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Error;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Key the whole ledger blob is stored under.
pub const STORAGE_KEY: &str = "budgetbook-v2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => f.write_str("income"),
            TransactionType::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::Invalid(format!(
                "Unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    pub category: String, // expense: a Category.name; income: free label
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Calendar date in the offset the transaction was recorded with.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }
}

/// Transaction fields minus the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: DateTime<FixedOffset>,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: String,
    pub note: String,
}

impl NewTransaction {
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            date: self.date,
            amount: self.amount,
            r#type: self.r#type,
            category: self.category,
            note: self.note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub budget_limit: Decimal, // 0 = no limit
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn has_limit(&self) -> bool {
        self.budget_limit > Decimal::ZERO
    }
}

/// Category fields minus the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub budget_limit: Decimal,
    pub color: String,
    pub icon: Option<String>,
}

impl NewCategory {
    pub fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            budget_limit: self.budget_limit,
            color: self.color,
            icon: self.icon,
        }
    }
}

/// Partial merge into an existing category. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub budget_limit: Option<Decimal>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.budget_limit.is_none()
            && self.color.is_none()
            && self.icon.is_none()
    }

    pub fn apply(self, cat: &mut Category) {
        if let Some(name) = self.name {
            cat.name = name;
        }
        if let Some(limit) = self.budget_limit {
            cat.budget_limit = limit;
        }
        if let Some(color) = self.color {
            cat.color = color;
        }
        if let Some(icon) = self.icon {
            cat.icon = Some(icon);
        }
    }
}

/// Everything that gets persisted, as one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerState {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
        }
    }
}

// Missing and null fields both fall back, so the wire shape goes through Options.
#[derive(Deserialize)]
struct StoredState {
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

impl<'de> Deserialize<'de> for LedgerState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stored = StoredState::deserialize(deserializer)?;
        Ok(LedgerState {
            transactions: stored.transactions.unwrap_or_default(),
            categories: stored.categories.unwrap_or_else(default_categories),
        })
    }
}

/// Reads an amount as written by any version of the app: a decimal string,
/// a JSON number (`12.5`, `1e-7`), or `null` where a NaN was serialized.
/// Anything unreadable loads as zero so one bad record cannot sink the blob.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match &raw {
        Some(serde_json::Value::Number(n)) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .ok()
        }
        Some(serde_json::Value::String(s)) => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!(value = ?raw, "unreadable amount in saved ledger, using 0");
        Decimal::ZERO
    }))
}

pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Food", 5000, "#ef4444", "Utensils"),
        ("2", "Transportation", 3000, "#f97316", "Car"),
        ("3", "Allowance", 2000, "#eab308", "GraduationCap"),
        ("4", "Bills", 10000, "#3b82f6", "Zap"),
        ("5", "Shopping", 2000, "#a855f7", "ShoppingBag"),
    ]
    .into_iter()
    .map(|(id, name, limit, color, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        budget_limit: Decimal::from(limit),
        color: color.to_string(),
        icon: Some(icon.to_string()),
    })
    .collect()
}
