// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`RelayConfig`] loaded once at startup. Nothing here is re-read or
//! mutated after the server starts.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RPC_URL` | JSON-RPC endpoint of the network hosting the contract | Required |
//! | `PRIVATE_KEY` | Operator key as hex | One key source required |
//! | `PRIVATE_KEY_PEM_FILE` | Path to the operator key as PEM | One key source required |
//! | `CONTRACT_ADDRESS` | Lending market contract address | `0x2072…B314` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `4000` |
//! | `INIT_LOAN_MODE` | `combined` or `assign-then-verify` | `combined` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, net::SocketAddr, path::PathBuf, str::FromStr};

use alloy::primitives::Address;
use url::Url;

use crate::validation::parse_account_address;

pub const RPC_URL_ENV: &str = "RPC_URL";

/// Hex-encoded operator key. Takes precedence over [`PRIVATE_KEY_PEM_FILE_ENV`].
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

pub const PRIVATE_KEY_PEM_FILE_ENV: &str = "PRIVATE_KEY_PEM_FILE";

pub const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";

pub const HOST_ENV: &str = "HOST";

pub const PORT_ENV: &str = "PORT";

pub const INIT_LOAN_MODE_ENV: &str = "INIT_LOAN_MODE";

/// `json` switches the log output to one JSON object per line.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Deployed `LoanadLendingMarket` contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x2072d7D9E54cea8998eA6D5C39CB07766e48B314";

pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 4000;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// How `/api/init-loan` reaches the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitLoanStrategy {
    /// One `assignMaximumAmountForLoan` call; the contract verifies the
    /// account as part of it.
    #[default]
    Combined,
    /// `assignMaximumAmountForLoan` followed by `verifyUser`. A failure in
    /// the second call leaves the limit assigned; nothing is rolled back.
    AssignThenVerify,
}

impl FromStr for InitLoanStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "assign-then-verify" | "two-step" => Ok(Self::AssignThenVerify),
            other => Err(format!(
                "unknown init loan mode `{other}` (expected `combined` or `assign-then-verify`)"
            )),
        }
    }
}

impl fmt::Display for InitLoanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined => f.write_str("combined"),
            Self::AssignThenVerify => f.write_str("assign-then-verify"),
        }
    }
}

/// Where the operator key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SigningKeySource {
    Hex(String),
    PemFile(PathBuf),
}

impl fmt::Debug for SigningKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(_) => f.write_str("Hex(<redacted>)"),
            Self::PemFile(path) => f.debug_tuple("PemFile").field(path).finish(),
        }
    }
}

/// Process-wide relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub rpc_url: Url,
    pub signing_key: SigningKeySource,
    pub contract_address: Address,
    pub host: String,
    pub port: u16,
    pub init_loan: InitLoanStrategy,
}

impl RelayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let rpc_url = get(RPC_URL_ENV)
            .ok_or(ConfigError::Missing(RPC_URL_ENV))?
            .parse::<Url>()
            .map_err(|e| ConfigError::invalid(RPC_URL_ENV, e))?;

        let signing_key = match (get(PRIVATE_KEY_ENV), get(PRIVATE_KEY_PEM_FILE_ENV)) {
            (Some(hex), _) => SigningKeySource::Hex(hex),
            (None, Some(path)) => SigningKeySource::PemFile(PathBuf::from(path)),
            (None, None) => return Err(ConfigError::Missing(PRIVATE_KEY_ENV)),
        };

        let contract_raw =
            get(CONTRACT_ADDRESS_ENV).unwrap_or_else(|| DEFAULT_CONTRACT_ADDRESS.to_string());
        let contract_address = parse_account_address(&contract_raw)
            .ok_or_else(|| ConfigError::invalid(CONTRACT_ADDRESS_ENV, "not a valid address"))?;

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid(PORT_ENV, e))?,
            None => DEFAULT_PORT,
        };

        let init_loan = match get(INIT_LOAN_MODE_ENV) {
            Some(raw) => raw
                .parse::<InitLoanStrategy>()
                .map_err(|e| ConfigError::invalid(INIT_LOAN_MODE_ENV, e))?,
            None => InitLoanStrategy::default(),
        };

        Ok(Self {
            rpc_url,
            signing_key,
            contract_address,
            host,
            port,
            init_loan,
        })
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::invalid(HOST_ENV, e))
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            var,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<RelayConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RelayConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const BASE: [(&str, &str); 2] = [
        (RPC_URL_ENV, "https://testnet-rpc.monad.xyz"),
        (PRIVATE_KEY_ENV, "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"),
    ];

    #[test]
    fn defaults_apply() {
        let config = load(&BASE).expect("config loads");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.init_loan, InitLoanStrategy::Combined);
        assert_eq!(
            config.contract_address,
            parse_account_address(DEFAULT_CONTRACT_ADDRESS).unwrap()
        );
        assert_eq!(config.bind_addr().unwrap().port(), 4000);
    }

    #[test]
    fn overrides_apply() {
        let mut vars = BASE.to_vec();
        vars.push((PORT_ENV, "8081"));
        vars.push((HOST_ENV, "127.0.0.1"));
        vars.push((INIT_LOAN_MODE_ENV, "assign-then-verify"));
        vars.push((CONTRACT_ADDRESS_ENV, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));

        let config = load(&vars).expect("config loads");
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8081");
        assert_eq!(config.init_loan, InitLoanStrategy::AssignThenVerify);
        assert_eq!(
            config.contract_address.to_checksum(None),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }

    #[test]
    fn missing_rpc_url_is_reported() {
        let err = load(&[(PRIVATE_KEY_ENV, "00")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(RPC_URL_ENV)));
    }

    #[test]
    fn missing_key_is_reported() {
        let err = load(&[(RPC_URL_ENV, "http://localhost:8545")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(PRIVATE_KEY_ENV)));
    }

    #[test]
    fn pem_file_used_when_no_hex_key() {
        let config = load(&[
            (RPC_URL_ENV, "http://localhost:8545"),
            (PRIVATE_KEY_PEM_FILE_ENV, "/secrets/operator.pem"),
        ])
        .expect("config loads");
        assert_eq!(
            config.signing_key,
            SigningKeySource::PemFile("/secrets/operator.pem".into())
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut vars = BASE.to_vec();
        vars.push((PORT_ENV, "eighty"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { var: PORT_ENV, .. }
        ));

        let mut vars = BASE.to_vec();
        vars.push((INIT_LOAN_MODE_ENV, "atomic"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { var: INIT_LOAN_MODE_ENV, .. }
        ));

        let mut vars = BASE.to_vec();
        vars.push((CONTRACT_ADDRESS_ENV, "0x1234"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { var: CONTRACT_ADDRESS_ENV, .. }
        ));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = load(&BASE).unwrap();
        let printed = format!("{config:?}");
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
    }

    #[test]
    fn init_loan_strategy_parses() {
        assert_eq!("Combined".parse::<InitLoanStrategy>(), Ok(InitLoanStrategy::Combined));
        assert_eq!("two-step".parse::<InitLoanStrategy>(), Ok(InitLoanStrategy::AssignThenVerify));
        assert_eq!(InitLoanStrategy::AssignThenVerify.to_string(), "assign-then-verify");
    }
}
