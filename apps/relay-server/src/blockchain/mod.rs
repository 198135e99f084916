// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration for the Loanad lending market.
//!
//! This module provides:
//! - The [`LendingLedger`] seam the HTTP layer is written against
//! - ABI bindings and an alloy client for the deployed contract
//! - Operator key loading and base-unit formatting

pub mod client;
pub mod ledger;
pub mod market;
pub mod signing;
pub mod types;

pub use client::{ClientError, LendingMarketClient};
pub use ledger::{LedgerError, LendingLedger};
pub use types::*;
