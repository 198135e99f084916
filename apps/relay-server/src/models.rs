// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request bodies accepted by the relay. Every field is optional at the
//! serde level so that a missing or malformed value reaches the handler
//! and is rejected with the operation's own validation message instead of
//! a generic deserialization error.
//!
//! ## Field Conventions
//!
//! - Addresses are `0x`-prefixed hex strings (`userAddress`, alias
//!   `accountAddress`).
//! - Loan ids and amounts are base-unit integers, sent either as JSON
//!   numbers or as decimal strings. Strings are required for values above
//!   `u64::MAX`, which covers most amounts in wei.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::TxReceipt;

/// Integer-valued request field as received on the wire.
///
/// Held as raw JSON until validation; see
/// [`parse_uint`](crate::validation::parse_uint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UintField(serde_json::Value);

impl UintField {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for UintField {
    fn from(value: serde_json::Value) -> Self {
        UintField(value)
    }
}

impl From<u64> for UintField {
    fn from(value: u64) -> Self {
        UintField(value.into())
    }
}

impl From<&str> for UintField {
    fn from(value: &str) -> Self {
        UintField(value.into())
    }
}

/// Request naming a single account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    /// Account address (0x + 40 hex chars)
    #[serde(alias = "accountAddress")]
    #[schema(example = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")]
    pub user_address: Option<String>,
}

/// Request naming a loan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Loan id assigned by the contract
    #[schema(value_type = Option<String>, example = "3")]
    pub loan_id: Option<UintField>,
}

/// Request moving collateral in or out of a loan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollateralRequest {
    /// Loan id assigned by the contract
    #[schema(value_type = Option<String>, example = "3")]
    pub loan_id: Option<UintField>,
    /// Amount in base units (wei)
    #[schema(value_type = Option<String>, example = "500000000000000000")]
    pub amount: Option<UintField>,
}

/// Request to borrow from the market.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    /// Amount in base units (wei)
    #[schema(value_type = Option<String>, example = "1000000000000000000")]
    pub amount: Option<UintField>,
}

/// Request to repay debt.
///
/// The payment is sent from the relay's operator account; `userAddress` is
/// validated and logged but not passed to the contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepayRequest {
    /// Account the repayment is made for
    #[serde(alias = "accountAddress")]
    pub user_address: Option<String>,
    /// Amount in base units (wei), attached as the call value
    #[schema(value_type = Option<String>, example = "1000000000000000000")]
    pub amount: Option<UintField>,
}

/// Success body of every state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub success: bool,
    /// Hash of the confirmed transaction
    pub tx_hash: String,
    /// Block in which the transaction was confirmed
    pub block_number: u64,
    /// Human-readable outcome
    pub message: String,
}

impl TransactionResponse {
    pub fn confirmed(receipt: TxReceipt, message: impl Into<String>) -> Self {
        Self {
            success: true,
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            message: message.into(),
        }
    }
}
