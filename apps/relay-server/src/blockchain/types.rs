// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger-facing types and unit formatting.

use alloy::primitives::U256;
use serde::Serialize;
use utoipa::ToSchema;

/// Decimals of the chain's native unit (MON, like ETH, uses 18).
pub const NATIVE_DECIMALS: u8 = 18;

/// Fractional digits used when presenting debt to the client.
pub const DISPLAY_PLACES: u8 = 4;

/// Proof that a state-changing call was mined successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    /// Transaction hash (0x-prefixed)
    pub tx_hash: String,
    /// Block in which the transaction was confirmed
    pub block_number: u64,
}

/// Format a base-unit amount as a decimal string with exactly `places`
/// fractional digits, rounding half up.
///
/// `format_units_fixed(1_234_500_000_000_000_000, 18, 4)` is `"1.2345"`.
pub fn format_units_fixed(amount: U256, decimals: u8, places: u8) -> String {
    let places = places.min(decimals);
    let drop = U256::from(10u64).pow(U256::from(decimals - places));
    let half = drop / U256::from(2u64);

    let scaled = if drop == U256::from(1u64) {
        amount
    } else {
        amount.saturating_add(half) / drop
    };

    if places == 0 {
        return scaled.to_string();
    }

    let unit = U256::from(10u64).pow(U256::from(places));
    let whole = scaled / unit;
    let fraction = scaled % unit;
    format!("{}.{:0>width$}", whole, fraction.to_string(), width = places as usize)
}

/// Parse a base-unit integer written in decimal digits.
///
/// Signs, whitespace, separators and values above `U256::MAX` are rejected.
pub fn parse_base_units(raw: &str) -> Option<U256> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(raw, 10).ok()
}
