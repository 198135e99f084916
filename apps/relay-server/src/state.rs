// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{blockchain::LendingLedger, config::InitLoanStrategy};

/// Shared, read-only handler state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LendingLedger>,
    pub init_loan: InitLoanStrategy,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn LendingLedger>, init_loan: InitLoanStrategy) -> Self {
        Self {
            ledger,
            init_loan,
            started_at: Utc::now(),
        }
    }
}
