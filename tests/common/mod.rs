#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use dao_gateway::core::{Address, ContractCall, GovernanceContract, TxHash, U256};
use dao_gateway::domain::model::NetworkStatus;
use dao_gateway::utils::error::Result;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const OPERATOR: &str = "0x0000000000000000000000000000000000000001";
pub const MEMBER: &str = "0x0000000000000000000000000000000000000002";
pub const FIXED_TX: &str = "0x2222222222222222222222222222222222222222222222222222222222222222";

/// 一筆被轉送的合約呼叫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub sender: Address,
    pub call: ContractCall,
    pub value: U256,
}

/// 固定回傳 FIXED_TX 並記錄所有呼叫的假合約
#[derive(Default)]
pub struct RecordingContract {
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingContract {
    async fn record(&self, sender: &Address, call: ContractCall, value: U256) -> Result<TxHash> {
        self.calls.lock().await.push(RecordedCall {
            sender: *sender,
            call,
            value,
        });
        Ok(TxHash::new(FIXED_TX))
    }

    pub async fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl GovernanceContract for RecordingContract {
    async fn create_group(&self, sender: &Address, name: &str) -> Result<TxHash> {
        let call = ContractCall::CreateGroup {
            name: name.to_string(),
        };
        self.record(sender, call, U256::zero()).await
    }

    async fn contribute(&self, sender: &Address, group_id: U256, value_wei: U256) -> Result<TxHash> {
        self.record(sender, ContractCall::Contribute { group_id }, value_wei)
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
        self.record(sender, call, U256::zero()).await
    }

    async fn vote(&self, sender: &Address, proposal_id: U256, support: bool) -> Result<TxHash> {
        self.record(sender, ContractCall::Vote { proposal_id, support }, U256::zero())
            .await
    }

    async fn execute_proposal(&self, sender: &Address, proposal_id: U256) -> Result<TxHash> {
        self.record(sender, ContractCall::ExecuteProposal { proposal_id }, U256::zero())
            .await
    }

    async fn network_status(&self) -> Result<NetworkStatus> {
        Ok(NetworkStatus {
            chain_id: 1337,
            block_number: 7,
        })
    }
}

pub fn address(raw: &str) -> Address {
    Address::parse(raw).unwrap()
}

/// 以 oneshot 送出 JSON POST，回傳狀態碼與解析後的回應
pub async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    send(app, path, "application/json", body.to_string()).await
}

pub async fn send(app: &Router, path: &str, content_type: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
