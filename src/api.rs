use anyhow::{Context, Result};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::db::Database;
use crate::environment::Settings;
use crate::recipient::{MatchDebugInfo, MatchError, MatchResult, Recipient, RecipientMatcher, Suggestion};
use crate::TARGET_WEB_REQUEST;

const DEFAULT_SUGGEST_LIMIT: usize = 10;
const MAX_SUGGEST_LIMIT: usize = 50;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub matcher: Arc<RecipientMatcher>,
    /// Attach match diagnostics to responses (never in production).
    pub expose_debug: bool,
}

/// Errors surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::InvalidInput(message) => ApiError::BadRequest(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Storage(err) => {
                error!(target: TARGET_WEB_REQUEST, "Storage error while handling request: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Request payload for `/match`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchRequest {
    #[serde(default)]
    search_name: String,
    user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchResponse {
    #[serde(flatten)]
    result: MatchResult,
    should_confirm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmation_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<MatchDebugInfo>,
}

/// Query string for `/suggest`.
#[derive(Debug, Deserialize)]
struct SuggestParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Serialize)]
struct SuggestResponse {
    suggestions: Vec<Suggestion>,
    total: usize,
}

/// Request payload for `/recipients`: replaces or adds a user's recipients.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportRequest {
    user_id: String,
    recipients: Vec<Recipient>,
}

/// Owner of the recipient addressed by a `/recipients/{id}` request.
#[derive(Debug, Deserialize)]
struct OwnerParams {
    #[serde(rename = "userId")]
    user_id: String,
}

/// Routes served by the API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status_check))
        .route("/match", post(match_recipient))
        .route("/suggest", get(suggest_recipients))
        .route("/recipients", post(import_recipients))
        .route("/recipients/{id}", delete(delete_recipient))
        .with_state(state)
}

/// Main application loop, setting up and running the Axum-based API server.
pub async fn app_api_loop(settings: &Settings) -> Result<()> {
    let db = Database::new(&settings.database_path)
        .await
        .context("Failed to open recipient database")?;

    let state = AppState {
        db,
        matcher: Arc::new(RecipientMatcher::with_config(settings.matcher)),
        expose_debug: !settings.is_production(),
    };

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, router(state).into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}

/// Liveness check, with the number of stored recipients.
async fn status_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let recipients = state.db.count_recipients().await?;
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "build": env!("GIT_HASH"),
        "recipients": recipients,
    })))
}

/// Resolves a search name against the user's recipients.
async fn match_recipient(
    State(state): State<AppState>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    if payload.search_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Search name is required".to_string()));
    }

    let recipients = state.db.recipients_for_user(&payload.user_id).await?;
    let result = state
        .matcher
        .match_recipient(&payload.search_name, &recipients)?;

    info!(
        target: TARGET_WEB_REQUEST,
        "Match for user {}: '{}' -> {}",
        payload.user_id,
        payload.search_name,
        match &result {
            MatchResult::Matched { recipient, .. } => recipient.name.as_str(),
            MatchResult::Ambiguous { .. } => "<ambiguous>",
            MatchResult::None => "<none>",
        }
    );

    let debug = state
        .expose_debug
        .then(|| state.matcher.explain(&payload.search_name, &recipients));

    Ok(Json(MatchResponse {
        should_confirm: result.needs_confirmation(),
        confirmation_message: result.confirmation_prompt(),
        result,
        debug,
    }))
}

/// Typeahead suggestions. An empty query yields an empty list.
async fn suggest_recipients(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SUGGEST_LIMIT)
        .clamp(1, MAX_SUGGEST_LIMIT);

    let suggestions = if params.q.trim().is_empty() {
        Vec::new()
    } else {
        let recipients = state.db.recipients_for_user(&params.user_id).await?;
        state.matcher.suggest(&params.q, &recipients, limit)
    };

    Ok(Json(SuggestResponse {
        total: suggestions.len(),
        suggestions,
    }))
}

/// Stores recipients for a user.
async fn import_recipients(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if payload.user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("userId is required".to_string()));
    }
    if let Some(bad) = payload
        .recipients
        .iter()
        .find(|r| r.id.trim().is_empty() || r.name.trim().is_empty())
    {
        return Err(ApiError::BadRequest(format!(
            "Recipient '{}' needs both an id and a name",
            bad.id
        )));
    }

    let imported = state
        .db
        .add_recipients(&payload.user_id, &payload.recipients)
        .await?;
    info!(
        target: TARGET_WEB_REQUEST,
        "Imported {} recipients for user {}", imported, payload.user_id
    );

    Ok(Json(json!({ "imported": imported })))
}

/// Removes one of a user's recipients.
async fn delete_recipient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.db.delete_recipient(&params.user_id, &id).await? {
        return Err(ApiError::NotFound(format!("No recipient '{}' for this user", id)));
    }
    info!(
        target: TARGET_WEB_REQUEST,
        "Deleted recipient {} for user {}", id, params.user_id
    );

    Ok(Json(json!({ "deleted": true })))
}
