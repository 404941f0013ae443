use crate::domain::model::{Address, NetworkStatus, TxHash, U256};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 外部部署的治理合約。每個狀態變更方法在交易確認後才回傳 hash。
#[async_trait]
pub trait GovernanceContract: Send + Sync {
    async fn create_group(&self, sender: &Address, name: &str) -> Result<TxHash>;

    async fn contribute(&self, sender: &Address, group_id: U256, value_wei: U256)
        -> Result<TxHash>;

    async fn propose_investment(
        &self,
        sender: &Address,
        group_id: U256,
        description: &str,
        amount_wei: U256,
    ) -> Result<TxHash>;

    async fn vote(&self, sender: &Address, proposal_id: U256, support: bool) -> Result<TxHash>;

    async fn execute_proposal(&self, sender: &Address, proposal_id: U256) -> Result<TxHash>;

    async fn network_status(&self) -> Result<NetworkStatus>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn rpc_url(&self) -> &str;
    fn rpc_timeout(&self) -> Duration;
    fn contract_address(&self) -> &str;
    fn contract_artifact(&self) -> Option<&str>;
    fn operator_address(&self) -> &str;
    fn poll_interval(&self) -> Duration;
    fn confirmation_timeout(&self) -> Duration;
}
