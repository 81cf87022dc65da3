// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory ledger of transactions and categories, synchronized with a
//! [`KeyValueStore`] as one serialized blob.

use crate::errors::Result;
use crate::models::{
    Category, CategoryUpdate, LedgerState, NewCategory, NewTransaction, STORAGE_KEY, Transaction,
    TransactionType, default_categories,
};
use crate::storage::KeyValueStore;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// What [`Ledger::load`] found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A saved blob was parsed.
    Restored,
    /// Nothing saved under the key yet.
    Fresh,
    /// The blob (or the store) was unreadable; defaults were used.
    Recovered,
}

pub struct Ledger<S: KeyValueStore> {
    store: S,
    key: String,
    state: LedgerState,
    loaded: bool,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Defaults in memory; nothing is persisted until [`Ledger::load`] runs.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            state: LedgerState::default(),
            loaded: false,
        }
    }

    pub fn open(store: S) -> Self {
        let mut ledger = Self::new(store);
        ledger.load();
        ledger
    }

    /// Read the saved blob once. Failures are logged and replaced by defaults.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.store.read(&self.key) {
            Ok(Some(blob)) => match serde_json::from_str::<LedgerState>(&blob) {
                Ok(state) => {
                    info!(
                        transactions = state.transactions.len(),
                        categories = state.categories.len(),
                        "restored ledger from '{}'",
                        self.key
                    );
                    self.state = state;
                    LoadOutcome::Restored
                }
                Err(e) => {
                    error!("failed to parse saved ledger '{}': {}", self.key, e);
                    self.state = LedgerState::default();
                    LoadOutcome::Recovered
                }
            },
            Ok(None) => {
                info!("no saved ledger under '{}', starting fresh", self.key);
                self.state = LedgerState::default();
                LoadOutcome::Fresh
            }
            Err(e) => {
                error!("failed to read saved ledger '{}': {}", self.key, e);
                self.state = LedgerState::default();
                LoadOutcome::Recovered
            }
        };
        self.loaded = true;
        outcome
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.state.transactions.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.state.categories.iter().find(|c| c.id == id)
    }

    /// Match by id first, then by exact name.
    pub fn find_category(&self, id_or_name: &str) -> Option<&Category> {
        self.category(id_or_name).or_else(|| {
            self.state
                .categories
                .iter()
                .find(|c| c.name == id_or_name)
        })
    }

    /// Whether any transaction carries this category's name.
    pub fn category_in_use(&self, id: &str) -> bool {
        match self.category(id) {
            Some(cat) => self
                .state
                .transactions
                .iter()
                .any(|t| t.category == cat.name),
            None => false,
        }
    }

    /// Newest first; equal timestamps keep insertion order.
    pub fn transactions_by_date_desc(&self) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self.state.transactions.iter().collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    pub fn add_transaction(&mut self, data: NewTransaction) -> Result<Transaction> {
        let tx = data.into_transaction(new_id());
        self.state.transactions.push(tx.clone());
        self.persist()?;
        Ok(tx)
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<bool> {
        let before = self.state.transactions.len();
        self.state.transactions.retain(|t| t.id != id);
        let removed = self.state.transactions.len() != before;
        self.persist()?;
        Ok(removed)
    }

    pub fn add_category(&mut self, data: NewCategory) -> Result<Category> {
        let cat = data.into_category(new_id());
        self.state.categories.push(cat.clone());
        self.persist()?;
        Ok(cat)
    }

    /// Merge `updates` into the category. Transactions are not relabelled.
    pub fn update_category(&mut self, id: &str, updates: CategoryUpdate) -> Result<bool> {
        let found = match self.state.categories.iter_mut().find(|c| c.id == id) {
            Some(cat) => {
                updates.apply(cat);
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(found)
    }

    /// Referencing transactions are left as they are.
    pub fn remove_category(&mut self, id: &str) -> Result<bool> {
        let before = self.state.categories.len();
        self.state.categories.retain(|c| c.id != id);
        let removed = self.state.categories.len() != before;
        self.persist()?;
        Ok(removed)
    }

    pub fn reset_data(&mut self) -> Result<()> {
        self.state.transactions.clear();
        self.state.categories = default_categories();
        warn!("ledger reset to defaults");
        self.persist()
    }

    pub fn total_income(&self) -> Decimal {
        self.sum_where(|t| t.r#type == TransactionType::Income)
    }

    pub fn total_expenses(&self) -> Decimal {
        self.sum_where(|t| t.r#type == TransactionType::Expense)
    }

    pub fn current_balance(&self) -> Decimal {
        self.total_income().saturating_sub(self.total_expenses())
    }

    pub fn category_spent(&self, name: &str) -> Decimal {
        self.sum_where(|t| t.is_expense() && t.category == name)
    }

    // Saturates at Decimal::MAX; a plain Sum would panic on overflow.
    fn sum_where(&self, pred: impl Fn(&Transaction) -> bool) -> Decimal {
        self.state
            .transactions
            .iter()
            .filter(|t| pred(t))
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    fn persist(&mut self) -> Result<()> {
        if !self.loaded {
            debug!("ledger not loaded yet, skipping save");
            return Ok(());
        }
        let blob = serde_json::to_string(&self.state)?;
        self.store.write(&self.key, &blob)?;
        debug!(
            bytes = blob.len(),
            transactions = self.state.transactions.len(),
            categories = self.state.categories.len(),
            "saved ledger to '{}'",
            self.key
        );
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
