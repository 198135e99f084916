// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::TxReceipt,
    error::ErrorBody,
    models::{
        AccountRequest, BorrowRequest, CollateralRequest, LoanRequest, RepayRequest,
        TransactionResponse,
    },
    state::AppState,
};

pub mod debt;
pub mod extract;
pub mod health;
pub mod loans;
pub mod verification;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/check-verification",
            post(verification::check_verification),
        )
        .route("/init-loan", post(verification::init_loan))
        .route("/get-max-amount", post(verification::get_max_amount))
        .route("/get-total-loans", get(loans::get_total_loans))
        .route("/get-active-loan-ids", get(loans::get_active_loan_ids))
        .route("/get-loan-borrower", post(loans::get_loan_borrower))
        .route("/get-loan-collateral", post(loans::get_loan_collateral))
        .route("/add-collateral", post(loans::add_collateral))
        .route("/withdraw-collateral", post(loans::withdraw_collateral))
        .route("/borrow-mon", post(debt::borrow))
        .route("/get-user-debt/{user_address}", get(debt::get_user_debt))
        .route("/repay-mon", post(debt::repay));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/health/live", get(health::liveness));

    let http_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CorsLayer::permissive());

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(http_layers)
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Loanad Relay",
        description = "Relays lending market operations to the deployed contract."
    ),
    paths(
        verification::check_verification,
        verification::init_loan,
        verification::get_max_amount,
        loans::get_total_loans,
        loans::get_active_loan_ids,
        loans::get_loan_borrower,
        loans::get_loan_collateral,
        loans::add_collateral,
        loans::withdraw_collateral,
        debt::borrow,
        debt::get_user_debt,
        debt::repay,
        health::health,
        health::readiness,
        health::liveness
    ),
    components(
        schemas(
            AccountRequest,
            LoanRequest,
            CollateralRequest,
            BorrowRequest,
            RepayRequest,
            TransactionResponse,
            TxReceipt,
            ErrorBody,
            verification::VerificationResponse,
            verification::InitLoanResponse,
            verification::MaxAmountResponse,
            loans::TotalLoansResponse,
            loans::ActiveLoanIdsResponse,
            loans::LoanBorrowerResponse,
            loans::LoanCollateralResponse,
            debt::UserDebtResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Verification", description = "Account verification and loan limits"),
        (name = "Loans", description = "Loan queries and collateral management"),
        (name = "Debt", description = "Borrowing and repayment"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
