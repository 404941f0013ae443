use crate::config::{
    validate_provider, DEFAULT_BIND, DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_RPC_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
    pub contract: ContractConfig,
    pub operator: OperatorConfig,
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub rpc_url: String,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    pub address: String,
    pub artifact_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmationConfig {
    pub poll_interval_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GatewayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPERATOR_ADDRESS})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> &str {
        self.server.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    fn rpc_url(&self) -> &str {
        &self.ledger.rpc_url
    }

    fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(
            self.ledger
                .request_timeout_seconds
                .unwrap_or(DEFAULT_RPC_TIMEOUT_SECS),
        )
    }

    fn contract_address(&self) -> &str {
        &self.contract.address
    }

    fn contract_artifact(&self) -> Option<&str> {
        self.contract.artifact_path.as_deref()
    }

    fn operator_address(&self) -> &str {
        &self.operator.address
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.confirmation
                .poll_interval_ms
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        )
    }

    fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(
            self.confirmation
                .timeout_seconds
                .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
