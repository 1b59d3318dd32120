use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use bridge::BridgeError;

pub(crate) fn router(state: crate::AppState) -> Router {
    Router::new()
        .route("/chains", get(get_chains))
        .route("/bridge", post(post_bridge))
        .with_state(state)
}

async fn get_chains(
    State(crate::AppState { bridge_service }): State<crate::AppState>,
) -> impl IntoResponse {
    let chain_data = bridge_service.get_supported_chains();

    (StatusCode::OK, Json(json!({ "chains": chain_data })))
}

async fn post_bridge(
    State(crate::AppState { bridge_service }): State<crate::AppState>,
    payload: Result<Json<bridge::BridgeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(BridgeError::InvalidRequest(rejection.body_text()));
        }
    };

    match bridge_service.bridge(&request).await {
        Ok(result) => (StatusCode::OK, Json(json!({ "result": result }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: BridgeError) -> Response {
    let status = match err {
        BridgeError::InvalidRequest(_)
        | BridgeError::UnsupportedDirection { .. }
        | BridgeError::InvalidAmount(_)
        | BridgeError::MissingDestinationToken(_)
        | BridgeError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
        BridgeError::AllowanceApprovalFailed(_)
        | BridgeError::SimulationReverted(_)
        | BridgeError::InsufficientFunds
        | BridgeError::UserRejected
        | BridgeError::ExecutionReverted(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BridgeError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
