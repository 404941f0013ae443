#[cfg(feature = "cli")]
pub mod cli;
pub mod env_config;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{
    validate_address, validate_bind_address, validate_non_empty_string, validate_positive_number,
    validate_range, validate_url,
};

#[cfg(feature = "cli")]
pub use cli::CliArgs;
pub use env_config::EnvConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

/// 所有配置來源共用的檢查
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_bind_address("server.bind", config.bind_address())?;
    validate_url("ledger.rpc_url", config.rpc_url())?;
    validate_positive_number("ledger.request_timeout_seconds", config.rpc_timeout().as_secs(), 1)?;
    validate_address("contract.address", config.contract_address())?;
    validate_address("operator.address", config.operator_address())?;

    if let Some(path) = config.contract_artifact() {
        validate_non_empty_string("contract.artifact_path", path)?;
    }

    let poll_ms = config.poll_interval().as_millis() as u64;
    let timeout_secs = config.confirmation_timeout().as_secs();
    validate_positive_number("confirmation.poll_interval_ms", poll_ms, 1)?;
    validate_range("confirmation.timeout_seconds", timeout_secs, 1, 3600)?;
    if config.poll_interval() >= config.confirmation_timeout() {
        return Err(GatewayError::ConfigValidationError {
            field: "confirmation.poll_interval_ms".to_string(),
            message: format!(
                "poll interval ({}ms) must be shorter than the confirmation timeout ({}s)",
                poll_ms, timeout_secs
            ),
        });
    }

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}
