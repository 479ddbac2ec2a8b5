//! REST API server for the wealth advisor
//!
//! Exposes the chat service, calculators and knowledge library via HTTP
//! endpoints. Integrates with the browser UI.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::calculators::{
    compute_emi, compute_fd, compute_sip, compute_tax, parse_field, parse_field_or,
};
use crate::chat::AdvisorService;
use crate::models::UserDocument;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct QuickActionRequest {
    pub session_id: Option<String>,
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub session_id: Option<String>,
}

/// Calculator requests carry the raw text field values from the UI;
/// the engine's coercion handles anything malformed.
#[derive(Debug, Deserialize)]
pub struct TaxRequest {
    #[serde(default)]
    pub income: String,
    #[serde(default)]
    pub deductions: String,
}

#[derive(Debug, Deserialize)]
pub struct SipRequest {
    #[serde(default)]
    pub monthly_amount: String,
    #[serde(default)]
    pub years: String,
    #[serde(default)]
    pub expected_return: String,
}

#[derive(Debug, Deserialize)]
pub struct EmiRequest {
    #[serde(default)]
    pub loan_amount: String,
    #[serde(default)]
    pub interest_rate: String,
    #[serde(default)]
    pub tenure: String,
}

#[derive(Debug, Deserialize)]
pub struct FdRequest {
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub documents: Vec<UserDocument>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub advisor: Arc<AdvisorService>,
}

/// =============================
/// Helpers — Session Ids
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

/// Clients may send a UUID, an arbitrary string, or nothing at all; all three
/// resolve to a stable session id.
fn resolve_session_id(value: Option<&str>) -> uuid::Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            uuid::Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => stable_uuid_from_string("anonymous-session"),
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoints
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());
    info!(%session_id, "Received chat request");

    match state.advisor.handle_message(session_id, &req.message).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "session_id": session_id.to_string(),
                "answer": reply.answer,
                "context_used": reply.context_used,
            }))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Chat handler failed: {}", e))),
        ),
    }
}

async fn quick_action_handler(
    State(state): State<ApiState>,
    Json(req): Json<QuickActionRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());
    info!(%session_id, action = %req.action, "Received quick action");

    match state.advisor.quick_action(session_id, &req.action).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "session_id": session_id.to_string(),
                "answer": reply.answer,
            }))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Quick action failed: {}", e))),
        ),
    }
}

async fn reset_handler(
    State(state): State<ApiState>,
    Json(req): Json<ResetRequest>,
) -> Json<ApiResponse> {
    let session_id = resolve_session_id(req.session_id.as_deref());
    state.advisor.reset_history(session_id).await;
    Json(ApiResponse::success(serde_json::json!({
        "session_id": session_id.to_string(),
    })))
}

/// =============================
/// Calculator Endpoints
/// =============================

async fn tax_handler(Json(req): Json<TaxRequest>) -> Json<ApiResponse> {
    let tax = compute_tax(parse_field(&req.income), parse_field(&req.deductions));
    Json(ApiResponse::success(serde_json::json!({ "tax": tax })))
}

async fn sip_handler(Json(req): Json<SipRequest>) -> Json<ApiResponse> {
    let result = compute_sip(
        parse_field(&req.monthly_amount),
        parse_field_or(&req.years, 1.0),
        parse_field_or(&req.expected_return, 12.0),
    );
    Json(ApiResponse::success(result))
}

async fn emi_handler(Json(req): Json<EmiRequest>) -> Json<ApiResponse> {
    let result = compute_emi(
        parse_field(&req.loan_amount),
        parse_field(&req.interest_rate),
        parse_field_or(&req.tenure, 1.0),
    );
    Json(ApiResponse::success(result))
}

async fn fd_handler(Json(req): Json<FdRequest>) -> Json<ApiResponse> {
    let result = compute_fd(
        parse_field(&req.principal),
        parse_field(&req.rate),
        parse_field_or(&req.time, 1.0),
    );
    Json(ApiResponse::success(result))
}

/// =============================
/// Knowledge Endpoints
/// =============================

async fn list_knowledge(State(state): State<ApiState>) -> Json<ApiResponse> {
    let items = state.advisor.all_knowledge().await;
    Json(ApiResponse::success(items))
}

async fn get_knowledge(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.advisor.knowledge_by_id(&id).await {
        Some(item) => (StatusCode::OK, Json(ApiResponse::success(item))),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("No knowledge item: {}", id))),
        ),
    }
}

async fn search_knowledge(
    State(state): State<ApiState>,
    Json(req): Json<SearchRequest>,
) -> Json<ApiResponse> {
    let items = state.advisor.search_knowledge(&req.query).await;
    Json(ApiResponse::success(items))
}

/// =============================
/// Document Endpoints
/// =============================

async fn ingest_documents(
    State(state): State<ApiState>,
    Json(req): Json<IngestRequest>,
) -> Json<ApiResponse> {
    info!(count = req.documents.len(), "Ingesting documents");
    let analyses = state.advisor.ingest_documents(req.documents).await;
    Json(ApiResponse::success(analyses))
}

async fn remove_document(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Json<ApiResponse> {
    state.advisor.remove_document(&id).await;
    Json(ApiResponse::success(serde_json::json!({ "removed": id })))
}

async fn search_documents(
    State(state): State<ApiState>,
    Json(req): Json<SearchRequest>,
) -> Json<ApiResponse> {
    let docs = state.advisor.search_documents(&req.query).await;
    Json(ApiResponse::success(docs))
}

/// =============================
/// Router
/// =============================

pub fn create_router(advisor: Arc<AdvisorService>) -> Router {
    let state = ApiState { advisor };

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/quick-action", post(quick_action_handler))
        .route("/api/chat/reset", post(reset_handler))
        .route("/api/calculators/tax", post(tax_handler))
        .route("/api/calculators/sip", post(sip_handler))
        .route("/api/calculators/emi", post(emi_handler))
        .route("/api/calculators/fd", post(fd_handler))
        .route("/api/knowledge", get(list_knowledge))
        .route("/api/knowledge/search", post(search_knowledge))
        .route("/api/knowledge/:id", get(get_knowledge))
        .route("/api/documents", post(ingest_documents))
        .route("/api/documents/search", post(search_documents))
        .route("/api/documents/:id", delete(remove_document))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    advisor: Arc<AdvisorService>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(advisor);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_uuid_is_deterministic() {
        let a = stable_uuid_from_string("browser-session-1");
        let b = stable_uuid_from_string("browser-session-1");
        let c = stable_uuid_from_string("browser-session-2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn test_resolve_session_id() {
        let uuid = uuid::Uuid::new_v4();
        assert_eq!(resolve_session_id(Some(&uuid.to_string())), uuid);

        // Non-UUID strings hash to a stable id
        assert_eq!(
            resolve_session_id(Some("my-tab")),
            resolve_session_id(Some("my-tab"))
        );

        // Missing and blank ids share the anonymous session
        assert_eq!(resolve_session_id(None), resolve_session_id(Some("  ")));
    }

    #[test]
    fn test_api_response_envelope() {
        let ok = ApiResponse::success(serde_json::json!({"tax": 0.0}));
        assert!(ok.success);
        assert!(ok.error.is_none());

        let err = ApiResponse::error("boom".to_string());
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("boom"));
    }
}
