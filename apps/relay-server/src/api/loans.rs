// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Loan queries and collateral management.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use super::extract::ApiJson;
use crate::{
    error::{ApiError, ErrorBody},
    models::{CollateralRequest, LoanRequest, TransactionResponse},
    state::AppState,
    validation::{require_uint, INVALID_AMOUNT, INVALID_LOAN_ID},
};

/// Number of loans ever created.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalLoansResponse {
    pub success: bool,
    pub total_loans: String,
}

/// Ids of the currently active loans.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveLoanIdsResponse {
    pub success: bool,
    pub active_loan_ids: Vec<String>,
}

/// Borrower of a loan.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanBorrowerResponse {
    pub success: bool,
    /// Checksummed borrower address
    pub borrower: String,
}

/// Collateral locked in a loan.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanCollateralResponse {
    pub success: bool,
    /// Collateral in base units (wei)
    pub collateral: String,
}

#[utoipa::path(
    get,
    path = "/api/get-total-loans",
    tag = "Loans",
    responses(
        (status = 200, description = "Total number of loans", body = TotalLoansResponse),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn get_total_loans(
    State(state): State<AppState>,
) -> Result<Json<TotalLoansResponse>, ApiError> {
    info!("Getting total loans");

    let total = state.ledger.total_loans().await.map_err(|e| {
        error!(kind = e.kind(), error = %e, "Total loans query failed");
        ApiError::ledger("Error al obtener total de préstamos", &e)
    })?;

    Ok(Json(TotalLoansResponse {
        success: true,
        total_loans: total.to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/get-active-loan-ids",
    tag = "Loans",
    responses(
        (status = 200, description = "Active loan ids", body = ActiveLoanIdsResponse),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn get_active_loan_ids(
    State(state): State<AppState>,
) -> Result<Json<ActiveLoanIdsResponse>, ApiError> {
    info!("Getting active loan ids");

    let ids = state.ledger.active_loan_ids().await.map_err(|e| {
        error!(kind = e.kind(), error = %e, "Active loan ids query failed");
        ApiError::ledger("Error al obtener IDs de préstamos activos", &e)
    })?;

    Ok(Json(ActiveLoanIdsResponse {
        success: true,
        active_loan_ids: ids.iter().map(ToString::to_string).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/get-loan-borrower",
    tag = "Loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Borrower of the loan", body = LoanBorrowerResponse),
        (status = 400, description = "Invalid loan id", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn get_loan_borrower(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoanRequest>,
) -> Result<Json<LoanBorrowerResponse>, ApiError> {
    let loan_id = require_uint(request.loan_id.as_ref(), INVALID_LOAN_ID)?;

    info!(%loan_id, "Getting loan borrower");

    let borrower = state.ledger.loan_borrower(loan_id).await.map_err(|e| {
        error!(%loan_id, kind = e.kind(), error = %e, "Loan borrower query failed");
        ApiError::ledger("Error al obtener prestatario del préstamo", &e)
    })?;

    Ok(Json(LoanBorrowerResponse {
        success: true,
        borrower: borrower.to_checksum(None),
    }))
}

#[utoipa::path(
    post,
    path = "/api/get-loan-collateral",
    tag = "Loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Collateral of the loan", body = LoanCollateralResponse),
        (status = 400, description = "Invalid loan id", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn get_loan_collateral(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoanRequest>,
) -> Result<Json<LoanCollateralResponse>, ApiError> {
    let loan_id = require_uint(request.loan_id.as_ref(), INVALID_LOAN_ID)?;

    info!(%loan_id, "Getting loan collateral");

    let collateral = state.ledger.loan_collateral(loan_id).await.map_err(|e| {
        error!(%loan_id, kind = e.kind(), error = %e, "Loan collateral query failed");
        ApiError::ledger("Error al obtener colateral del préstamo", &e)
    })?;

    Ok(Json(LoanCollateralResponse {
        success: true,
        collateral: collateral.to_string(),
    }))
}

/// Add collateral to a loan.
///
/// `amount` is attached as the value of the call, paid by the operator.
#[utoipa::path(
    post,
    path = "/api/add-collateral",
    tag = "Loans",
    request_body = CollateralRequest,
    responses(
        (status = 200, description = "Collateral added", body = TransactionResponse),
        (status = 400, description = "Invalid loan id or amount", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn add_collateral(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CollateralRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let loan_id = require_uint(request.loan_id.as_ref(), INVALID_LOAN_ID)?;
    let amount = require_uint(request.amount.as_ref(), INVALID_AMOUNT)?;

    info!(%loan_id, %amount, "Adding collateral");

    let receipt = state
        .ledger
        .add_collateral(loan_id, amount)
        .await
        .map_err(|e| {
            error!(%loan_id, %amount, kind = e.kind(), error = %e, "Add collateral failed");
            ApiError::ledger("Error al agregar colateral", &e)
        })?;

    Ok(Json(TransactionResponse::confirmed(
        receipt,
        "Colateral agregado exitosamente",
    )))
}

/// Withdraw collateral from a loan.
#[utoipa::path(
    post,
    path = "/api/withdraw-collateral",
    tag = "Loans",
    request_body = CollateralRequest,
    responses(
        (status = 200, description = "Collateral withdrawn", body = TransactionResponse),
        (status = 400, description = "Invalid loan id or amount", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn withdraw_collateral(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CollateralRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let amount = require_uint(request.amount.as_ref(), INVALID_AMOUNT)?;
    let loan_id = require_uint(request.loan_id.as_ref(), INVALID_LOAN_ID)?;

    info!(%loan_id, %amount, "Withdrawing collateral");

    let receipt = state
        .ledger
        .withdraw_collateral(amount, loan_id)
        .await
        .map_err(|e| {
            error!(%loan_id, %amount, kind = e.kind(), error = %e, "Withdraw collateral failed");
            ApiError::ledger("Error al retirar colateral", &e)
        })?;

    Ok(Json(TransactionResponse::confirmed(
        receipt,
        "Colateral retirado exitosamente",
    )))
}
