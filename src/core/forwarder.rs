use crate::core::units::to_wei;
use crate::domain::model::{
    Address, ContributeRequest, CreateGroupRequest, ExecuteRequest, NetworkStatus,
    ProposeRequest, TxAck, VoteRequest,
};
use crate::domain::ports::GovernanceContract;
use crate::utils::error::Result;
use std::sync::Arc;

pub const STATUS_GROUP_CREATED: &str = "Group created";
pub const STATUS_CONTRIBUTED: &str = "Contribution successful";
pub const STATUS_PROPOSED: &str = "Proposal created";
pub const STATUS_VOTED: &str = "Vote submitted";
pub const STATUS_EXECUTED: &str = "Proposal executed";

/// 將每個路由的請求轉成一次合約呼叫。
///
/// 建立群組與執行提案由 operator 地址送出，其餘操作使用請求中的 `from`。
/// 本身不保存任何狀態，可在多個請求之間共用。
#[derive(Clone)]
pub struct RequestForwarder {
    contract: Arc<dyn GovernanceContract>,
    operator: Address,
}

impl RequestForwarder {
    pub fn new(contract: Arc<dyn GovernanceContract>, operator: Address) -> Self {
        Self { contract, operator }
    }

    pub async fn create_group(&self, req: CreateGroupRequest) -> Result<TxAck> {
        tracing::info!(name = %req.name, "Forwarding createGroup");
        let tx = self.contract.create_group(&self.operator, &req.name).await?;
        Ok(TxAck::new(STATUS_GROUP_CREATED, &tx))
    }

    pub async fn contribute(&self, req: ContributeRequest) -> Result<TxAck> {
        let value = to_wei("amount", req.amount)?;
        tracing::info!(
            group_id = %req.group_id,
            amount = %req.amount,
            from = %req.from,
            "Forwarding contribute"
        );
        let tx = self.contract.contribute(&req.from, req.group_id, value).await?;
        Ok(TxAck::new(STATUS_CONTRIBUTED, &tx))
    }

    pub async fn propose(&self, req: ProposeRequest) -> Result<TxAck> {
        let amount = to_wei("amount", req.amount)?;
        tracing::info!(
            group_id = %req.group_id,
            amount = %req.amount,
            from = %req.from,
            "Forwarding proposeInvestment"
        );
        let tx = self
            .contract
            .propose_investment(&req.from, req.group_id, &req.description, amount)
            .await?;
        Ok(TxAck::new(STATUS_PROPOSED, &tx))
    }

    pub async fn vote(&self, req: VoteRequest) -> Result<TxAck> {
        tracing::info!(
            proposal_id = %req.proposal_id,
            support = req.support,
            from = %req.from,
            "Forwarding vote"
        );
        let tx = self
            .contract
            .vote(&req.from, req.proposal_id, req.support)
            .await?;
        Ok(TxAck::new(STATUS_VOTED, &tx))
    }

    pub async fn execute(&self, req: ExecuteRequest) -> Result<TxAck> {
        tracing::info!(proposal_id = %req.proposal_id, "Forwarding executeProposal");
        let tx = self
            .contract
            .execute_proposal(&self.operator, req.proposal_id)
            .await?;
        Ok(TxAck::new(STATUS_EXECUTED, &tx))
    }

    pub async fn network_status(&self) -> Result<NetworkStatus> {
        self.contract.network_status().await
    }
}
