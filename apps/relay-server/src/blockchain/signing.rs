// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Operator key loading.
//!
//! The relay signs every state-changing call with one operator key, given
//! either as a hex string or as a PEM file (PKCS#8 or SEC1).

use alloy::signers::local::PrivateKeySigner;
use k256::SecretKey;

use super::client::ClientError;
use crate::config::SigningKeySource;

/// Create a signer from a hex private key (64 characters, optional 0x prefix).
pub fn signer_from_hex(private_key_hex: &str) -> Result<PrivateKeySigner, ClientError> {
    let trimmed = private_key_hex.trim();
    let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let key_bytes =
        alloy::hex::decode(hex).map_err(|e| ClientError::InvalidPrivateKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| ClientError::InvalidPrivateKey(e.to_string()))
}

/// Parse a private key from PEM format to hex string.
///
/// # Returns
/// * `Ok(String)` - Hex-encoded private key (64 characters, no 0x prefix)
/// * `Err(ClientError)` - If PEM parsing fails
pub fn pem_to_hex(pem_bytes: &[u8]) -> Result<String, ClientError> {
    let pem_str = std::str::from_utf8(pem_bytes)
        .map_err(|e| ClientError::InvalidPrivateKey(format!("Invalid UTF-8: {}", e)))?;

    let pem = pem::parse(pem_str)
        .map_err(|e| ClientError::InvalidPrivateKey(format!("Invalid PEM: {}", e)))?;

    let secret_key = SecretKey::from_sec1_der(pem.contents())
        .or_else(|_| parse_pkcs8_to_secret_key(pem.contents()))
        .map_err(|e| ClientError::InvalidPrivateKey(format!("Invalid key format: {}", e)))?;

    Ok(alloy::hex::encode(secret_key.to_bytes()))
}

fn parse_pkcs8_to_secret_key(der: &[u8]) -> Result<SecretKey, String> {
    use k256::pkcs8::DecodePrivateKey;
    SecretKey::from_pkcs8_der(der).map_err(|e| e.to_string())
}

/// Create a signer from PEM-encoded private key bytes.
pub fn signer_from_pem(pem_bytes: &[u8]) -> Result<PrivateKeySigner, ClientError> {
    let hex_key = pem_to_hex(pem_bytes)?;
    signer_from_hex(&hex_key)
}

/// Resolve the configured key source into a signer.
pub fn load_signer(source: &SigningKeySource) -> Result<PrivateKeySigner, ClientError> {
    match source {
        SigningKeySource::Hex(hex) => signer_from_hex(hex),
        SigningKeySource::PemFile(path) => {
            let bytes = std::fs::read(path).map_err(|source| ClientError::KeyFile {
                path: path.display().to_string(),
                source,
            })?;
            signer_from_pem(&bytes)
        }
    }
}
