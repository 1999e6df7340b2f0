// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error type shared by the store, the engines and the rollover.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Bad user input: empty names, out-of-range days, bad dates.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store is closed")]
    StoreClosed,

    #[error("Rollover failed: {0}")]
    Rollover(String),

    #[error("Invalid period '{0}'")]
    InvalidPeriod(String),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors caused by input that the front end should report and move on from.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidAmount(_) | Self::InvalidPeriod(_)
        )
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
