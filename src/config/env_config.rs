use crate::config::{
    validate_provider, DEFAULT_BIND, DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_RPC_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::Validate;
use std::env;
use std::time::Duration;

pub const ENV_BIND: &str = "DAO_GATEWAY_BIND";
pub const ENV_RPC_URL: &str = "DAO_GATEWAY_RPC_URL";
pub const ENV_RPC_TIMEOUT: &str = "DAO_GATEWAY_RPC_TIMEOUT_SECONDS";
pub const ENV_CONTRACT_ADDRESS: &str = "DAO_GATEWAY_CONTRACT_ADDRESS";
pub const ENV_CONTRACT_ARTIFACT: &str = "DAO_GATEWAY_CONTRACT_ARTIFACT";
pub const ENV_OPERATOR_ADDRESS: &str = "DAO_GATEWAY_OPERATOR_ADDRESS";
pub const ENV_POLL_INTERVAL: &str = "DAO_GATEWAY_POLL_INTERVAL_MS";
pub const ENV_CONFIRMATION_TIMEOUT: &str = "DAO_GATEWAY_CONFIRMATION_TIMEOUT_SECONDS";

/// 由 `DAO_GATEWAY_*` 環境變數組成的配置
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub bind: String,
    pub rpc_url: String,
    pub rpc_timeout_seconds: u64,
    pub contract_address: String,
    pub contract_artifact: Option<String>,
    pub operator_address: String,
    pub poll_interval_ms: u64,
    pub confirmation_timeout_seconds: u64,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind: env::var(ENV_BIND).unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            rpc_url: required(ENV_RPC_URL)?,
            rpc_timeout_seconds: number(ENV_RPC_TIMEOUT, DEFAULT_RPC_TIMEOUT_SECS)?,
            contract_address: required(ENV_CONTRACT_ADDRESS)?,
            contract_artifact: env::var(ENV_CONTRACT_ARTIFACT).ok(),
            operator_address: required(ENV_OPERATOR_ADDRESS)?,
            poll_interval_ms: number(ENV_POLL_INTERVAL, DEFAULT_POLL_INTERVAL_MS)?,
            confirmation_timeout_seconds: number(
                ENV_CONFIRMATION_TIMEOUT,
                DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            )?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| GatewayError::MissingConfigError {
        field: name.to_string(),
    })
}

fn number(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| GatewayError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "expected a non-negative integer".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

impl ConfigProvider for EnvConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }

    fn contract_address(&self) -> &str {
        &self.contract_address
    }

    fn contract_artifact(&self) -> Option<&str> {
        self.contract_artifact.as_deref()
    }

    fn operator_address(&self) -> &str {
        &self.operator_address
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_seconds)
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
