// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! alloy-backed client for the lending market contract.

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
};
use async_trait::async_trait;
use tracing::info;

use super::ledger::{LedgerError, LendingLedger};
use super::market::ILoanadLendingMarket::{self, ILoanadLendingMarketInstance};
use super::signing::load_signer;
use super::types::TxReceipt;
use crate::config::RelayConfig;

/// Lending market client signing with the operator key.
pub struct LendingMarketClient {
    provider: DynProvider,
    market: ILoanadLendingMarketInstance<DynProvider>,
    operator: Address,
}

impl LendingMarketClient {
    /// Build the signing provider and contract binding from configuration.
    ///
    /// No network round-trip happens here; the endpoint is first contacted
    /// by the first request (or the readiness probe).
    pub fn new(config: &RelayConfig) -> Result<Self, ClientError> {
        let signer = load_signer(&config.signing_key)?;
        let operator = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(config.rpc_url.clone())
            .erased();

        let market = ILoanadLendingMarket::new(config.contract_address, provider.clone());

        Ok(Self {
            provider,
            market,
            operator,
        })
    }

    /// Wait for a submitted transaction to be mined and check its status.
    async fn confirm(
        &self,
        operation: &'static str,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<TxReceipt, LedgerError> {
        info!(operation, tx_hash = ?pending.tx_hash(), "Transaction sent");

        let receipt = pending.get_receipt().await?;
        let tx_hash = format!("{:?}", receipt.transaction_hash);
        let block_number = receipt.block_number.unwrap_or(0);

        if !receipt.status() {
            return Err(LedgerError::Reverted {
                tx_hash,
                block_number,
            });
        }

        info!(operation, %tx_hash, block_number, "Transaction confirmed");
        Ok(TxReceipt {
            tx_hash,
            block_number,
        })
    }
}

#[async_trait]
impl LendingLedger for LendingMarketClient {
    fn contract_address(&self) -> Address {
        *self.market.address()
    }

    fn operator_address(&self) -> Address {
        self.operator
    }

    async fn block_number(&self) -> Result<u64, LedgerError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))
    }

    async fn is_verified(&self, account: Address) -> Result<bool, LedgerError> {
        Ok(self.market.getVerifiedUser(account).call().await?)
    }

    async fn max_loan_amount(&self, account: Address) -> Result<U256, LedgerError> {
        Ok(self.market.getMaximumAmountForLoan(account).call().await?)
    }

    async fn total_loans(&self) -> Result<U256, LedgerError> {
        Ok(self.market.getTotalLoans().call().await?)
    }

    async fn active_loan_ids(&self) -> Result<Vec<U256>, LedgerError> {
        Ok(self.market.getActiveLoanIds().call().await?)
    }

    async fn loan_borrower(&self, loan_id: U256) -> Result<Address, LedgerError> {
        Ok(self.market.getLoanBorrower(loan_id).call().await?)
    }

    async fn loan_collateral(&self, loan_id: U256) -> Result<U256, LedgerError> {
        Ok(self.market.getLoanCollateral(loan_id).call().await?)
    }

    async fn debt_of(&self, account: Address) -> Result<U256, LedgerError> {
        Ok(self.market.s_debtorBorrowed(account).call().await?)
    }

    async fn assign_loan_limit(&self, account: Address) -> Result<TxReceipt, LedgerError> {
        let pending = self
            .market
            .assignMaximumAmountForLoan(account)
            .send()
            .await?;
        self.confirm("assignMaximumAmountForLoan", pending).await
    }

    async fn verify_account(&self, account: Address) -> Result<TxReceipt, LedgerError> {
        let pending = self.market.verifyUser(account).send().await?;
        self.confirm("verifyUser", pending).await
    }

    async fn add_collateral(
        &self,
        loan_id: U256,
        amount: U256,
    ) -> Result<TxReceipt, LedgerError> {
        let pending = self
            .market
            .addCollateralForCrowfundedLoan(loan_id)
            .value(amount)
            .send()
            .await?;
        self.confirm("addCollateralForCrowfundedLoan", pending).await
    }

    async fn withdraw_collateral(
        &self,
        amount: U256,
        loan_id: U256,
    ) -> Result<TxReceipt, LedgerError> {
        let pending = self
            .market
            .withdrawForCrowfundedLoan(amount, loan_id)
            .send()
            .await?;
        self.confirm("withdrawForCrowfundedLoan", pending).await
    }

    async fn borrow(&self, amount: U256) -> Result<TxReceipt, LedgerError> {
        let pending = self.market.borrowMON(amount).send().await?;
        self.confirm("borrowMON", pending).await
    }

    async fn repay(&self, amount: U256) -> Result<TxReceipt, LedgerError> {
        let pending = self.market.repayMON().value(amount).send().await?;
        self.confirm("repayMON", pending).await
    }
}

/// Errors that can occur while setting up the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Failed to read key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
