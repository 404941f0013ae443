use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {message}")]
    ValidationError { field: String, message: String },

    #[error("Ledger node unreachable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    #[error("Ledger node returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Invalid RPC response for {method}: {message}")]
    InvalidRpcResponse { method: String, message: String },

    #[error("Receipt for transaction {tx_hash} unavailable: {source}")]
    ReceiptUnavailable {
        tx_hash: String,
        #[source]
        source: Box<GatewayError>,
    },

    #[error("Transaction {tx_hash} reverted")]
    TransactionReverted { tx_hash: String },

    #[error("Transaction {tx_hash} not confirmed after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: String, waited_secs: u64 },

    #[error("ABI error: {message}")]
    AbiError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

/// 錯誤分類，決定 HTTP 狀態碼與日誌等級
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Upstream,
    Ledger,
    Internal,
}

impl GatewayError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Client,
            Self::UpstreamUnavailable(_)
            | Self::UpstreamStatus { .. }
            | Self::RpcError { .. }
            | Self::InvalidRpcResponse { .. }
            | Self::ReceiptUnavailable { .. } => ErrorCategory::Upstream,
            Self::TransactionReverted { .. } | Self::ConfirmationTimeout { .. } => {
                ErrorCategory::Ledger
            }
            _ => ErrorCategory::Internal,
        }
    }

    /// 對外回應中使用的錯誤種類名稱
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "validation_error",
            Self::UpstreamUnavailable(_) | Self::UpstreamStatus { .. } => "upstream_unavailable",
            Self::RpcError { .. } => "rpc_error",
            Self::InvalidRpcResponse { .. } => "invalid_rpc_response",
            Self::ReceiptUnavailable { .. } => "receipt_unavailable",
            Self::TransactionReverted { .. } => "transaction_reverted",
            Self::ConfirmationTimeout { .. } => "confirmation_timeout",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => "config_error",
            _ => "internal_error",
        }
    }

    /// 若錯誤已關聯到某筆交易，回傳其 hash
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Self::TransactionReverted { tx_hash }
            | Self::ConfirmationTimeout { tx_hash, .. }
            | Self::ReceiptUnavailable { tx_hash, .. } => Some(tx_hash),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Check the request body fields and their types",
            Self::UpstreamUnavailable(_) | Self::UpstreamStatus { .. } => {
                "Check that the ledger node is running and ledger.rpc_url is correct"
            }
            Self::RpcError { .. } => {
                "Check the sender account is unlocked on the node and has enough funds"
            }
            Self::InvalidRpcResponse { .. } => "Check that ledger.rpc_url points at an Ethereum JSON-RPC node",
            Self::ReceiptUnavailable { .. } => {
                "The transaction was accepted by the node; look it up by hash before retrying"
            }
            Self::TransactionReverted { .. } => "Inspect the transaction on the ledger for the revert reason",
            Self::ConfirmationTimeout { .. } => {
                "The transaction may still be mined; raise confirmation.timeout_seconds if this persists"
            }
            Self::AbiError { .. } => "Check the contract artifact matches the deployed contract",
            Self::IoError(_) => "Check file paths and permissions",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => {
                "Check the configuration file or DAO_GATEWAY_* environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
