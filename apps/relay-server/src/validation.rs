// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request field validation.
//!
//! Every check here runs before the ledger is touched.

use std::str::FromStr;

use alloy::primitives::{Address, U256};

use crate::{blockchain::parse_base_units, error::ApiError, models::UintField};

pub const INVALID_ADDRESS: &str = "Dirección inválida";
pub const INVALID_USER_ADDRESS: &str = "Dirección de usuario inválida";
pub const INVALID_LOAN_ID: &str = "ID de préstamo inválido";
pub const INVALID_AMOUNT: &str = "Monto inválido";

/// Parse an account identifier: `0x` followed by 40 hex digits.
///
/// Single-case digits are accepted as-is. Mixed case must be a valid
/// EIP-55 checksum.
pub fn parse_account_address(raw: &str) -> Option<Address> {
    let hex = raw.strip_prefix("0x")?;
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(raw, None).ok()
    } else {
        Address::from_str(raw).ok()
    }
}

/// Parse a non-negative integer given as a JSON number or decimal string.
pub fn parse_uint(field: &UintField) -> Option<U256> {
    match field.as_value() {
        serde_json::Value::Number(n) => n.as_u64().map(U256::from),
        serde_json::Value::String(s) => parse_base_units(s),
        _ => None,
    }
}

/// Validate a required address field, failing with `message`.
pub fn require_address(raw: Option<&str>, message: &'static str) -> Result<Address, ApiError> {
    raw.and_then(parse_account_address)
        .ok_or_else(|| ApiError::bad_request(message))
}

/// Validate a required integer field, failing with `message`.
pub fn require_uint(field: Option<&UintField>, message: &'static str) -> Result<U256, ApiError> {
    field
        .and_then(parse_uint)
        .ok_or_else(|| ApiError::bad_request(message))
}
