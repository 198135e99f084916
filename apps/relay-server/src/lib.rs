// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Loanad Relay - HTTP relay for the Loanad lending market
//!
//! This crate exposes the lending market contract's operations as a JSON API.
//! Every state-changing call is signed by a single operator key, submitted to
//! the contract and awaited until it is confirmed on chain.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Contract bindings, operator signer and ledger client
//! - `config` - Environment configuration
//! - `validation` - Request field validation

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod validation;

#[cfg(test)]
mod testing;
