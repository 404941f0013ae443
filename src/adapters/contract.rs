use crate::adapters::rpc::{JsonRpcClient, TransactionRequest};
use crate::core::abi::ContractInterface;
use crate::core::units::{parse_hex_quantity, to_hex_quantity};
use crate::domain::model::{Address, ContractCall, NetworkStatus, TxHash, U256};
use crate::domain::ports::{ConfigProvider, GovernanceContract};
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::validate_address;
use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};

/// 透過 JSON-RPC 節點呼叫已部署的治理合約。
///
/// 交易送出後以固定間隔輪詢 `eth_getTransactionReceipt`，直到取得收據或超過
/// `confirmation_timeout`。呼叫端的 future 被丟棄時輪詢隨之停止。
pub struct RpcGovernanceContract {
    rpc: JsonRpcClient,
    address: Address,
    interface: ContractInterface,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

impl RpcGovernanceContract {
    pub fn new(
        rpc: JsonRpcClient,
        address: Address,
        interface: ContractInterface,
        poll_interval: Duration,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            rpc,
            address,
            interface,
            poll_interval,
            confirmation_timeout,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let address = validate_address("contract.address", config.contract_address())?;
        let interface = match config.contract_artifact() {
            Some(path) => {
                tracing::info!("📄 Loading contract artifact from {}", path);
                ContractInterface::from_artifact_file(path)?
            }
            None => ContractInterface::standard(),
        };
        let rpc = JsonRpcClient::new(config.rpc_url(), config.rpc_timeout())?;

        Ok(Self::new(
            rpc,
            address,
            interface,
            config.poll_interval(),
            config.confirmation_timeout(),
        ))
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    async fn submit(&self, sender: &Address, call: ContractCall, value: Option<U256>) -> Result<TxHash> {
        let data = self.interface.encode_call(&call)?;
        let tx = TransactionRequest {
            from: sender.to_checksum(),
            to: self.address.to_checksum(),
            data: format!("0x{}", hex::encode(data)),
            value: value.map(to_hex_quantity),
        };

        let hash = self.rpc.send_transaction(&tx).await?;
        tracing::info!(
            function = call.function_name(),
            from = %sender,
            tx = %hash,
            "📤 Transaction submitted, waiting for receipt"
        );

        self.wait_for_receipt(&hash).await?;
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: &TxHash) -> Result<()> {
        let started = Instant::now();
        let receipt = tokio::time::timeout(self.confirmation_timeout, self.poll_receipt(hash))
            .await
            .map_err(|_| {
                tracing::warn!(tx = %hash, "⏱️ Confirmation timed out");
                GatewayError::ConfirmationTimeout {
                    tx_hash: hash.to_string(),
                    waited_secs: self.confirmation_timeout.as_secs(),
                }
            })??;

        // 舊節點（Byzantium 之前）沒有 status 欄位，視為成功
        let status = receipt
            .get("status")
            .and_then(Value::as_str)
            .and_then(parse_hex_quantity);
        if status == Some(0) {
            tracing::warn!(tx = %hash, "❌ Transaction reverted");
            return Err(GatewayError::TransactionReverted {
                tx_hash: hash.to_string(),
            });
        }

        let block = receipt
            .get("blockNumber")
            .and_then(Value::as_str)
            .and_then(parse_hex_quantity);
        tracing::info!(
            tx = %hash,
            block = ?block,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✅ Transaction confirmed"
        );
        Ok(())
    }

    /// 交易已被節點接受，輪詢期間的錯誤一律附上 hash
    async fn poll_receipt(&self, hash: &TxHash) -> Result<Value> {
        loop {
            match self.rpc.transaction_receipt(hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => tokio::time::sleep(self.poll_interval).await,
                Err(e) => {
                    tracing::warn!(tx = %hash, "⚠️ Receipt lookup failed: {}", e);
                    return Err(GatewayError::ReceiptUnavailable {
                        tx_hash: hash.to_string(),
                        source: Box::new(e),
                    });
                }
            }
        }
    }
}

#[async_trait]
impl GovernanceContract for RpcGovernanceContract {
    async fn create_group(&self, sender: &Address, name: &str) -> Result<TxHash> {
        let call = ContractCall::CreateGroup {
            name: name.to_string(),
        };
        self.submit(sender, call, None).await
    }

    async fn contribute(&self, sender: &Address, group_id: U256, value_wei: U256) -> Result<TxHash> {
        // payable：即使為 0 也帶上 value
        self.submit(sender, ContractCall::Contribute { group_id }, Some(value_wei))
            .await
    }

    async fn propose_investment(
        &self,
        sender: &Address,
        group_id: U256,
        description: &str,
        amount_wei: U256,
    ) -> Result<TxHash> {
        let call = ContractCall::ProposeInvestment {
            group_id,
            description: description.to_string(),
            amount: amount_wei,
        };
        self.submit(sender, call, None).await
    }

    async fn vote(&self, sender: &Address, proposal_id: U256, support: bool) -> Result<TxHash> {
        self.submit(sender, ContractCall::Vote { proposal_id, support }, None)
            .await
    }

    async fn execute_proposal(&self, sender: &Address, proposal_id: U256) -> Result<TxHash> {
        self.submit(sender, ContractCall::ExecuteProposal { proposal_id }, None)
            .await
    }

    async fn network_status(&self) -> Result<NetworkStatus> {
        let (chain_id, block_number) =
            tokio::try_join!(self.rpc.chain_id(), self.rpc.block_number())?;
        Ok(NetworkStatus {
            chain_id,
            block_number,
        })
    }
}
