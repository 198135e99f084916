// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The lending market as seen by the relay.
//!
//! Handlers only ever talk to [`LendingLedger`]. The production
//! implementation is [`LendingMarketClient`](super::LendingMarketClient);
//! tests substitute an in-process stub.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use super::types::TxReceipt;

/// Operations exposed by the deployed lending market contract.
///
/// Read methods issue a single `eth_call`. State-changing methods submit one
/// transaction signed by the operator key and resolve only once it has been
/// confirmed. Implementations must not retry submissions.
#[async_trait]
pub trait LendingLedger: Send + Sync {
    /// Address of the lending market contract.
    fn contract_address(&self) -> Address;

    /// Address the relay signs transactions with.
    fn operator_address(&self) -> Address;

    /// Latest block known to the endpoint. Used for readiness checks.
    async fn block_number(&self) -> Result<u64, LedgerError>;

    async fn is_verified(&self, account: Address) -> Result<bool, LedgerError>;

    async fn max_loan_amount(&self, account: Address) -> Result<U256, LedgerError>;

    async fn total_loans(&self) -> Result<U256, LedgerError>;

    async fn active_loan_ids(&self) -> Result<Vec<U256>, LedgerError>;

    async fn loan_borrower(&self, loan_id: U256) -> Result<Address, LedgerError>;

    async fn loan_collateral(&self, loan_id: U256) -> Result<U256, LedgerError>;

    async fn debt_of(&self, account: Address) -> Result<U256, LedgerError>;

    /// Grant `account` its borrowing limit. On the deployed contract this
    /// also marks the account verified.
    async fn assign_loan_limit(&self, account: Address) -> Result<TxReceipt, LedgerError>;

    /// Mark `account` verified.
    async fn verify_account(&self, account: Address) -> Result<TxReceipt, LedgerError>;

    /// Attach `amount` base units as collateral to `loan_id`.
    async fn add_collateral(&self, loan_id: U256, amount: U256)
        -> Result<TxReceipt, LedgerError>;

    /// Withdraw `amount` base units from `loan_id`.
    ///
    /// The contract takes the amount first and the loan id second.
    async fn withdraw_collateral(
        &self,
        amount: U256,
        loan_id: U256,
    ) -> Result<TxReceipt, LedgerError>;

    async fn borrow(&self, amount: U256) -> Result<TxReceipt, LedgerError>;

    /// Repay `amount` base units of the operator's debt.
    async fn repay(&self, amount: U256) -> Result<TxReceipt, LedgerError>;
}

/// Failures reported by the ledger or the path to it.
///
/// The `Display` output of every variant is the raw message surfaced to
/// clients as `details`.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The node answered with an error, usually a revert during
    /// `eth_call` or gas estimation.
    #[error("{0}")]
    Rejected(String),

    /// The endpoint could not be reached or the response was unusable.
    #[error("{0}")]
    Network(String),

    /// The transaction was submitted but waiting for its receipt failed.
    #[error("{0}")]
    Confirmation(String),

    /// The transaction was mined with a failed status.
    #[error("transaction {tx_hash} reverted in block {block_number}")]
    Reverted { tx_hash: String, block_number: u64 },
}

impl LedgerError {
    /// Short classification for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Rejected(_) => "rejected",
            LedgerError::Network(_) => "network",
            LedgerError::Confirmation(_) => "confirmation",
            LedgerError::Reverted { .. } => "reverted",
        }
    }
}

impl From<alloy::contract::Error> for LedgerError {
    fn from(err: alloy::contract::Error) -> Self {
        match &err {
            alloy::contract::Error::TransportError(rpc) if !rpc.is_error_resp() => {
                LedgerError::Network(err.to_string())
            }
            _ => LedgerError::Rejected(err.to_string()),
        }
    }
}

impl From<alloy::providers::PendingTransactionError> for LedgerError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        LedgerError::Confirmation(err.to_string())
    }
}
