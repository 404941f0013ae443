use crate::core::units::parse_hex_quantity;
use crate::domain::model::TxHash;
use crate::utils::error::{GatewayError, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// `eth_sendTransaction` 的參數；由節點以其已解鎖帳戶簽章
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// 以 HTTP POST 傳送 JSON-RPC 2.0 請求
pub struct JsonRpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// 回傳 `result` 欄位（可能為 `null`）；`error` 物件轉為 `RpcError`
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        tracing::debug!(method, id, "Sending JSON-RPC request");
        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(method, status = status.as_u16(), "Ledger node returned HTTP error");
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let mut body: Value =
            serde_json::from_slice(&bytes).map_err(|e| GatewayError::InvalidRpcResponse {
                method: method.to_string(),
                message: format!("body is not JSON: {}", e),
            })?;

        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            tracing::debug!(method, code, %message, "JSON-RPC error");
            return Err(GatewayError::RpcError { code, message });
        }

        body.as_object_mut()
            .and_then(|obj| obj.remove("result"))
            .ok_or_else(|| GatewayError::InvalidRpcResponse {
                method: method.to_string(),
                message: "response has neither result nor error".to_string(),
            })
    }

    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash> {
        let result = self
            .call("eth_sendTransaction", json!([tx]))
            .await?;
        match result.as_str() {
            Some(hash) if hash.starts_with("0x") => Ok(TxHash::new(hash)),
            _ => Err(GatewayError::InvalidRpcResponse {
                method: "eth_sendTransaction".to_string(),
                message: format!("expected a transaction hash, got {}", result),
            }),
        }
    }

    /// 尚未上鏈時回傳 `None`
    pub async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<Value>> {
        let result = self
            .call("eth_getTransactionReceipt", json!([hash.as_str()]))
            .await?;
        Ok((!result.is_null()).then_some(result))
    }

    pub async fn chain_id(&self) -> Result<u64> {
        self.quantity("eth_chainId").await
    }

    pub async fn block_number(&self) -> Result<u64> {
        self.quantity("eth_blockNumber").await
    }

    async fn quantity(&self, method: &str) -> Result<u64> {
        let result = self.call(method, json!([])).await?;
        result
            .as_str()
            .and_then(parse_hex_quantity)
            .ok_or_else(|| GatewayError::InvalidRpcResponse {
                method: method.to_string(),
                message: format!("expected a hex quantity, got {}", result),
            })
    }
}
