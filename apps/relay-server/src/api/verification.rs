// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account verification and loan limit endpoints.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use super::extract::ApiJson;
use crate::{
    config::InitLoanStrategy,
    error::{ApiError, ErrorBody},
    models::AccountRequest,
    state::AppState,
    validation::{require_address, INVALID_ADDRESS},
};

/// Verification status of an account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub success: bool,
    pub is_verified: bool,
}

/// Outcome of loan initialization.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitLoanResponse {
    pub success: bool,
    /// Hash of the limit assignment transaction
    pub tx_hash: String,
    /// Block of the last confirmed transaction
    pub block_number: u64,
    /// Hash of the separate verification transaction, when one was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_tx_hash: Option<String>,
    pub message: String,
    pub details: String,
}

/// Maximum loan amount granted to an account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaxAmountResponse {
    pub success: bool,
    /// Limit in base units (wei)
    pub max_amount: String,
}

/// Check whether an account has been verified by the market.
#[utoipa::path(
    post,
    path = "/api/check-verification",
    tag = "Verification",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Verification status", body = VerificationResponse),
        (status = 400, description = "Invalid address", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn check_verification(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AccountRequest>,
) -> Result<Json<VerificationResponse>, ApiError> {
    let account = require_address(request.user_address.as_deref(), INVALID_ADDRESS)?;

    info!(user = %account, "Checking verification");

    let is_verified = state.ledger.is_verified(account).await.map_err(|e| {
        error!(user = %account, kind = e.kind(), error = %e, "Verification check failed");
        ApiError::ledger("Error al verificar usuario", &e)
    })?;

    info!(user = %account, is_verified, "Verification status");

    Ok(Json(VerificationResponse {
        success: true,
        is_verified,
    }))
}

/// Grant an account its borrowing limit and mark it verified.
///
/// Sends one transaction (`combined` mode) or two (`assign-then-verify`
/// mode) from the operator account and waits for each to confirm. In
/// two-step mode a failed verification leaves the limit assigned and the
/// request fails; nothing is retried or rolled back.
#[utoipa::path(
    post,
    path = "/api/init-loan",
    tag = "Verification",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Limit assigned and account verified", body = InitLoanResponse),
        (status = 400, description = "Invalid address", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn init_loan(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AccountRequest>,
) -> Result<Json<InitLoanResponse>, ApiError> {
    let account = require_address(request.user_address.as_deref(), INVALID_ADDRESS)?;

    info!(
        user = %account,
        operator = %state.ledger.operator_address(),
        contract = %state.ledger.contract_address(),
        mode = %state.init_loan,
        "Initializing loan"
    );

    let assigned = state.ledger.assign_loan_limit(account).await.map_err(|e| {
        error!(user = %account, kind = e.kind(), error = %e, "Loan limit assignment failed");
        ApiError::ledger("Error al inicializar préstamo", &e)
    })?;

    match state.init_loan {
        InitLoanStrategy::Combined => {
            info!(user = %account, tx_hash = %assigned.tx_hash, "Loan initialized");
            Ok(Json(InitLoanResponse {
                success: true,
                tx_hash: assigned.tx_hash,
                block_number: assigned.block_number,
                verify_tx_hash: None,
                message: "10 ETH asignados y usuario verificado exitosamente".to_string(),
                details: "assignMaximumAmountForLoan asignó el monto máximo y verificó al usuario"
                    .to_string(),
            }))
        }
        InitLoanStrategy::AssignThenVerify => {
            let verified = state.ledger.verify_account(account).await.map_err(|e| {
                error!(
                    user = %account,
                    assign_tx_hash = %assigned.tx_hash,
                    kind = e.kind(),
                    error = %e,
                    "Verification failed after limit was assigned; account left unverified"
                );
                ApiError::ledger("Error al verificar usuario tras asignar el monto", &e)
            })?;

            info!(
                user = %account,
                tx_hash = %assigned.tx_hash,
                verify_tx_hash = %verified.tx_hash,
                "Loan initialized"
            );
            Ok(Json(InitLoanResponse {
                success: true,
                tx_hash: assigned.tx_hash,
                block_number: verified.block_number,
                verify_tx_hash: Some(verified.tx_hash),
                message: "Monto asignado y usuario verificado exitosamente".to_string(),
                details: "assignMaximumAmountForLoan y verifyUser confirmados".to_string(),
            }))
        }
    }
}

/// Get the maximum loan amount assigned to an account.
#[utoipa::path(
    post,
    path = "/api/get-max-amount",
    tag = "Verification",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Maximum loan amount", body = MaxAmountResponse),
        (status = 400, description = "Invalid address", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn get_max_amount(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AccountRequest>,
) -> Result<Json<MaxAmountResponse>, ApiError> {
    let account = require_address(request.user_address.as_deref(), INVALID_ADDRESS)?;

    info!(user = %account, "Getting max loan amount");

    let max_amount = state.ledger.max_loan_amount(account).await.map_err(|e| {
        error!(user = %account, kind = e.kind(), error = %e, "Max amount query failed");
        ApiError::ledger("Error al obtener monto máximo", &e)
    })?;

    Ok(Json(MaxAmountResponse {
        success: true,
        max_amount: max_amount.to_string(),
    }))
}
