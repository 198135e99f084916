// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process ledger stub for handler tests.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::{
    blockchain::{LedgerError, LendingLedger, TxReceipt},
    config::InitLoanStrategy,
    state::AppState,
};

/// A call received by [`StubLedger`], with its arguments in the order the
/// contract receives them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    BlockNumber,
    IsVerified(Address),
    MaxLoanAmount(Address),
    TotalLoans,
    ActiveLoanIds,
    LoanBorrower(U256),
    LoanCollateral(U256),
    DebtOf(Address),
    AssignLoanLimit(Address),
    VerifyAccount(Address),
    AddCollateral { loan_id: U256, amount: U256 },
    WithdrawCollateral { amount: U256, loan_id: U256 },
    Borrow(U256),
    Repay(U256),
}

impl LedgerCall {
    fn operation(&self) -> &'static str {
        match self {
            LedgerCall::BlockNumber => "block_number",
            LedgerCall::IsVerified(_) => "is_verified",
            LedgerCall::MaxLoanAmount(_) => "max_loan_amount",
            LedgerCall::TotalLoans => "total_loans",
            LedgerCall::ActiveLoanIds => "active_loan_ids",
            LedgerCall::LoanBorrower(_) => "loan_borrower",
            LedgerCall::LoanCollateral(_) => "loan_collateral",
            LedgerCall::DebtOf(_) => "debt_of",
            LedgerCall::AssignLoanLimit(_) => "assign_loan_limit",
            LedgerCall::VerifyAccount(_) => "verify_account",
            LedgerCall::AddCollateral { .. } => "add_collateral",
            LedgerCall::WithdrawCollateral { .. } => "withdraw_collateral",
            LedgerCall::Borrow(_) => "borrow",
            LedgerCall::Repay(_) => "repay",
        }
    }
}

/// Recording ledger with canned answers.
pub struct StubLedger {
    calls: Mutex<Vec<LedgerCall>>,
    rejecting: Vec<&'static str>,
    unreachable: bool,
    next_block: AtomicU64,
    pub verified: bool,
    pub max_amount: U256,
    pub total_loans: U256,
    pub active_loan_ids: Vec<U256>,
    pub borrower: Address,
    pub collateral: U256,
    pub debt: U256,
}

impl Default for StubLedger {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            rejecting: Vec::new(),
            unreachable: false,
            next_block: AtomicU64::new(100),
            verified: false,
            max_amount: U256::ZERO,
            total_loans: U256::ZERO,
            active_loan_ids: Vec::new(),
            borrower: Address::ZERO,
            collateral: U256::ZERO,
            debt: U256::ZERO,
        }
    }
}

impl StubLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `operation` (see [`LedgerCall`]) fail with a revert message.
    pub fn rejecting(mut self, operation: &'static str) -> Self {
        self.rejecting.push(operation);
        self
    }

    /// Make every call fail as if the endpoint were down.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn into_state(self: Arc<Self>, init_loan: InitLoanStrategy) -> AppState {
        AppState::new(self, init_loan)
    }

    fn record(&self, call: LedgerCall) -> Result<(), LedgerError> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);

        if self.unreachable {
            return Err(LedgerError::Network(
                "error sending request for url (http://127.0.0.1:8545/)".into(),
            ));
        }
        if self.rejecting.contains(&operation) {
            return Err(LedgerError::Rejected(format!(
                "execution reverted: {operation} rejected"
            )));
        }
        Ok(())
    }

    fn receipt(&self) -> TxReceipt {
        let block_number = self.next_block.fetch_add(1, Ordering::SeqCst);
        TxReceipt {
            tx_hash: format!("0x{:064x}", block_number),
            block_number,
        }
    }
}

#[async_trait]
impl LendingLedger for StubLedger {
    fn contract_address(&self) -> Address {
        Address::repeat_byte(0xc0)
    }

    fn operator_address(&self) -> Address {
        Address::repeat_byte(0x0e)
    }

    async fn block_number(&self) -> Result<u64, LedgerError> {
        self.record(LedgerCall::BlockNumber)?;
        Ok(self.next_block.load(Ordering::SeqCst))
    }

    async fn is_verified(&self, account: Address) -> Result<bool, LedgerError> {
        self.record(LedgerCall::IsVerified(account))?;
        Ok(self.verified)
    }

    async fn max_loan_amount(&self, account: Address) -> Result<U256, LedgerError> {
        self.record(LedgerCall::MaxLoanAmount(account))?;
        Ok(self.max_amount)
    }

    async fn total_loans(&self) -> Result<U256, LedgerError> {
        self.record(LedgerCall::TotalLoans)?;
        Ok(self.total_loans)
    }

    async fn active_loan_ids(&self) -> Result<Vec<U256>, LedgerError> {
        self.record(LedgerCall::ActiveLoanIds)?;
        Ok(self.active_loan_ids.clone())
    }

    async fn loan_borrower(&self, loan_id: U256) -> Result<Address, LedgerError> {
        self.record(LedgerCall::LoanBorrower(loan_id))?;
        Ok(self.borrower)
    }

    async fn loan_collateral(&self, loan_id: U256) -> Result<U256, LedgerError> {
        self.record(LedgerCall::LoanCollateral(loan_id))?;
        Ok(self.collateral)
    }

    async fn debt_of(&self, account: Address) -> Result<U256, LedgerError> {
        self.record(LedgerCall::DebtOf(account))?;
        Ok(self.debt)
    }

    async fn assign_loan_limit(&self, account: Address) -> Result<TxReceipt, LedgerError> {
        self.record(LedgerCall::AssignLoanLimit(account))?;
        Ok(self.receipt())
    }

    async fn verify_account(&self, account: Address) -> Result<TxReceipt, LedgerError> {
        self.record(LedgerCall::VerifyAccount(account))?;
        Ok(self.receipt())
    }

    async fn add_collateral(
        &self,
        loan_id: U256,
        amount: U256,
    ) -> Result<TxReceipt, LedgerError> {
        self.record(LedgerCall::AddCollateral { loan_id, amount })?;
        Ok(self.receipt())
    }

    async fn withdraw_collateral(
        &self,
        amount: U256,
        loan_id: U256,
    ) -> Result<TxReceipt, LedgerError> {
        self.record(LedgerCall::WithdrawCollateral { amount, loan_id })?;
        Ok(self.receipt())
    }

    async fn borrow(&self, amount: U256) -> Result<TxReceipt, LedgerError> {
        self.record(LedgerCall::Borrow(amount))?;
        Ok(self.receipt())
    }

    async fn repay(&self, amount: U256) -> Result<TxReceipt, LedgerError> {
        self.record(LedgerCall::Repay(amount))?;
        Ok(self.receipt())
    }
}
