// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Borrowing, debt queries and repayment.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use super::extract::ApiJson;
use crate::{
    blockchain::{format_units_fixed, DISPLAY_PLACES, NATIVE_DECIMALS},
    error::{ApiError, ErrorBody},
    models::{BorrowRequest, RepayRequest, TransactionResponse},
    state::AppState,
    validation::{require_address, require_uint, INVALID_AMOUNT, INVALID_USER_ADDRESS},
};

/// Outstanding debt of an account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDebtResponse {
    pub success: bool,
    /// Debt in base units (wei)
    pub user_debt: String,
    /// Debt in whole units, four decimal places
    pub user_debt_decimal: String,
    /// Same as `userDebtDecimal`; kept for older clients
    pub user_debt_eth: String,
}

/// Borrow from the market on behalf of the operator account.
#[utoipa::path(
    post,
    path = "/api/borrow-mon",
    tag = "Debt",
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Loan disbursed", body = TransactionResponse),
        (status = 400, description = "Invalid amount", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn borrow(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BorrowRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let amount = require_uint(request.amount.as_ref(), INVALID_AMOUNT)?;

    info!(%amount, "Borrowing MON");

    let receipt = state.ledger.borrow(amount).await.map_err(|e| {
        error!(%amount, kind = e.kind(), error = %e, "Borrow failed");
        ApiError::ledger("Error al pedir prestado", &e)
    })?;

    Ok(Json(TransactionResponse::confirmed(
        receipt,
        "MON pedido prestado exitosamente",
    )))
}

/// Get the outstanding debt of an account.
#[utoipa::path(
    get,
    path = "/api/get-user-debt/{user_address}",
    tag = "Debt",
    params(
        ("user_address" = String, Path, description = "Account address (0x + 40 hex chars)")
    ),
    responses(
        (status = 200, description = "Outstanding debt", body = UserDebtResponse),
        (status = 400, description = "Invalid address", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn get_user_debt(
    State(state): State<AppState>,
    Path(user_address): Path<String>,
) -> Result<Json<UserDebtResponse>, ApiError> {
    let account = require_address(Some(&user_address), INVALID_USER_ADDRESS)?;

    info!(user = %account, "Getting user debt");

    let debt = state.ledger.debt_of(account).await.map_err(|e| {
        error!(user = %account, kind = e.kind(), error = %e, "Debt query failed");
        ApiError::ledger("Error al obtener deuda del usuario", &e)
    })?;

    let decimal = format_units_fixed(debt, NATIVE_DECIMALS, DISPLAY_PLACES);
    info!(user = %account, debt = %debt, "User debt");

    Ok(Json(UserDebtResponse {
        success: true,
        user_debt: debt.to_string(),
        user_debt_decimal: decimal.clone(),
        user_debt_eth: decimal,
    }))
}

/// Repay debt. `amount` is attached as the call value.
#[utoipa::path(
    post,
    path = "/api/repay-mon",
    tag = "Debt",
    request_body = RepayRequest,
    responses(
        (status = 200, description = "Repayment confirmed", body = TransactionResponse),
        (status = 400, description = "Invalid address or amount", body = ErrorBody),
        (status = 500, description = "Ledger call failed", body = ErrorBody)
    )
)]
pub async fn repay(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RepayRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let account = require_address(request.user_address.as_deref(), INVALID_USER_ADDRESS)?;
    let amount = require_uint(request.amount.as_ref(), INVALID_AMOUNT)?;

    info!(
        user = %account,
        %amount,
        operator = %state.ledger.operator_address(),
        "Repaying MON"
    );

    let receipt = state.ledger.repay(amount).await.map_err(|e| {
        error!(user = %account, %amount, kind = e.kind(), error = %e, "Repay failed");
        ApiError::ledger("Error al pagar MON", &e)
    })?;

    Ok(Json(TransactionResponse::confirmed(
        receipt,
        "MON pagado exitosamente",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        blockchain::parse_base_units,
        config::InitLoanStrategy,
        testing::{LedgerCall, StubLedger},
    };
    use alloy::primitives::{address, U256};
    use axum::http::StatusCode;
    use std::sync::Arc;

    const USER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[tokio::test]
    async fn user_debt_formats_decimal() {
        let mut stub = StubLedger::new();
        stub.debt = parse_base_units("1234500000000000000").unwrap();
        let ledger = Arc::new(stub);
        let state = ledger.clone().into_state(InitLoanStrategy::Combined);

        let Json(response) = get_user_debt(State(state), Path(USER.to_string()))
            .await
            .expect("debt query succeeds");

        assert!(response.success);
        assert_eq!(response.user_debt, "1234500000000000000");
        assert_eq!(response.user_debt_decimal, "1.2345");
        assert_eq!(response.user_debt_eth, "1.2345");
        assert_eq!(
            ledger.calls(),
            vec![LedgerCall::DebtOf(address!(
                "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
            ))]
        );
    }

    #[tokio::test]
    async fn user_debt_rejects_bad_path() {
        let ledger = Arc::new(StubLedger::new());
        let state = ledger.clone().into_state(InitLoanStrategy::Combined);

        let err = get_user_debt(State(state), Path("0xnope".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, INVALID_USER_ADDRESS);
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn borrow_submits_amount() {
        let ledger = Arc::new(StubLedger::new());
        let state = ledger.clone().into_state(InitLoanStrategy::Combined);

        let Json(response) = borrow(
            State(state),
            ApiJson(BorrowRequest {
                amount: Some("1000000000000000000".into()),
            }),
        )
        .await
        .expect("borrow succeeds");

        assert!(response.success);
        assert_eq!(response.message, "MON pedido prestado exitosamente");
        assert_eq!(
            ledger.calls(),
            vec![LedgerCall::Borrow(U256::from(1_000_000_000_000_000_000u64))]
        );
    }

    #[tokio::test]
    async fn borrow_rejection_is_server_error() {
        let ledger = Arc::new(StubLedger::new().rejecting("borrow"));
        let state = ledger.clone().into_state(InitLoanStrategy::Combined);

        let err = borrow(
            State(state),
            ApiJson(BorrowRequest {
                amount: Some(5u64.into()),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Error al pedir prestado");
        assert_eq!(err.details.as_deref(), Some("execution reverted: borrow rejected"));
        // Exactly one submission, never retried.
        assert_eq!(ledger.calls().len(), 1);
    }

    #[tokio::test]
    async fn repay_validates_address_then_amount() {
        let ledger = Arc::new(StubLedger::new());
        let state = ledger.clone().into_state(InitLoanStrategy::Combined);

        let err = repay(
            State(state.clone()),
            ApiJson(RepayRequest {
                user_address: Some("bad".into()),
                amount: Some("bad".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, INVALID_USER_ADDRESS);

        let err = repay(
            State(state),
            ApiJson(RepayRequest {
                user_address: Some(USER.into()),
                amount: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, INVALID_AMOUNT);

        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn repay_attaches_amount() {
        let ledger = Arc::new(StubLedger::new());
        let state = ledger.clone().into_state(InitLoanStrategy::Combined);

        let Json(response) = repay(
            State(state),
            ApiJson(RepayRequest {
                user_address: Some(USER.into()),
                amount: Some("250".into()),
            }),
        )
        .await
        .expect("repay succeeds");

        assert!(response.success);
        assert_eq!(ledger.calls(), vec![LedgerCall::Repay(U256::from(250u64))]);
    }

    #[tokio::test]
    async fn repay_rejection_is_server_error() {
        let ledger = Arc::new(StubLedger::new().rejecting("repay"));
        let state = ledger.clone().into_state(InitLoanStrategy::Combined);

        let err = repay(
            State(state),
            ApiJson(RepayRequest {
                user_address: Some(USER.into()),
                amount: Some("250".into()),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Error al pagar MON");
        assert_eq!(err.details.as_deref(), Some("execution reverted: repay rejected"));
    }
}
