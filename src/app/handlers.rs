use crate::app::server::AppState;
use crate::domain::model::{
    ContributeRequest, CreateGroupRequest, ExecuteRequest, ProposeRequest, TxAck, VoteRequest,
};
use crate::utils::error::{ErrorCategory, GatewayError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

type ApiResult = Result<Json<TxAck>, GatewayError>;

pub fn status_code(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::ValidationError { .. } => StatusCode::BAD_REQUEST,
        GatewayError::TransactionReverted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        GatewayError::ConfirmationTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        GatewayError::UpstreamUnavailable(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        err if err.category() == ErrorCategory::Upstream => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"error": {"kind": ..., "message": ..., "tx"?: ...}}`
pub fn error_body(err: &GatewayError) -> Value {
    let mut body = json!({
        "error": {
            "kind": err.kind(),
            "message": err.to_string(),
        }
    });
    if let Some(tx) = err.tx_hash() {
        body["error"]["tx"] = json!(tx);
    }
    body
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        match self.category() {
            ErrorCategory::Client => tracing::warn!(kind = self.kind(), "⚠️ Request rejected: {}", self),
            _ => tracing::error!(
                kind = self.kind(),
                status = status.as_u16(),
                "❌ Request failed: {}",
                self
            ),
        }
        (status, Json(error_body(&self))).into_response()
    }
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, GatewayError> {
    body.map(|Json(req)| req)
        .map_err(|rejection| GatewayError::validation("body", rejection.body_text()))
}

pub async fn create_group(
    State(state): State<AppState>,
    body: Result<Json<CreateGroupRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    state.forwarder.create_group(req).await.map(Json)
}

pub async fn contribute(
    State(state): State<AppState>,
    body: Result<Json<ContributeRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    state.forwarder.contribute(req).await.map(Json)
}

pub async fn propose(
    State(state): State<AppState>,
    body: Result<Json<ProposeRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    state.forwarder.propose(req).await.map(Json)
}

pub async fn vote(
    State(state): State<AppState>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    state.forwarder.vote(req).await.map(Json)
}

pub async fn execute(
    State(state): State<AppState>,
    body: Result<Json<ExecuteRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    state.forwarder.execute(req).await.map(Json)
}

/// 節點連線檢查；無法取得鏈狀態時回傳 503
pub async fn health(State(state): State<AppState>) -> Response {
    match state.forwarder.network_status().await {
        Ok(status) => Json(json!({
            "status": "ok",
            "chain_id": status.chain_id,
            "block_number": status.block_number,
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(error_body(&e))).into_response()
        }
    }
}
