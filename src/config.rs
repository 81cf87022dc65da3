// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::errors::{Error, Result};
use crate::models::STORAGE_KEY;
use std::path::PathBuf;

pub const DB_ENV: &str = "BUDGETBOOK_DB";
pub const KEY_ENV: &str = "BUDGETBOOK_STORAGE_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub storage_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_ENV).filter(|v| !v.trim().is_empty()) {
            Some(p) => PathBuf::from(p.trim()),
            None => db::default_db_path()?,
        };
        let storage_key = match lookup(KEY_ENV) {
            Some(k) if k.trim().is_empty() => {
                return Err(Error::Config(format!("{} must not be blank", KEY_ENV)));
            }
            Some(k) => k.trim().to_string(),
            None => STORAGE_KEY.to_string(),
        };
        tracing::debug!(db = %db_path.display(), key = %storage_key, "resolved configuration");
        Ok(Self {
            db_path,
            storage_key,
        })
    }
}
