//! HTTP action server for the Neero transfer assistant.
//!
//! The dialogue engine posts one request per action it wants to run:
//!
//! ```text
//! POST /webhook   {"next_action": "...", "sender_id": "...", "tracker": {...}}
//!   200 -> {"events": [...], "responses": [...]}
//!   404 -> {"error": "...", "action_name": "..."}   unknown action
//!   400 -> {"error": "...", "action_name": "..."}   rejected or invalid
//! GET  /actions   [{"name": "..."}]
//! GET  /health    {"status": "ok"}
//! ```

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use action_core::{ActionError, Tracker};
use agent_actions::{default_registry, ActionRegistry, ActionResponse, ActionsConfig, LookupError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use transfer_form::ConfigError;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5055";

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid ACTION_SERVER_ADDR '{0}'")]
    InvalidAddr(String),

    #[error("failed to build user lookup client: {0}")]
    Lookup(#[from] LookupError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Bearer token required on `/webhook`, if set.
    pub api_token: Option<String>,
    /// Action settings.
    pub actions: ActionsConfig,
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ACTION_SERVER_ADDR` - Listen address (default: 127.0.0.1:5055)
    /// - `ACTION_SERVER_TOKEN` - Bearer token for `/webhook` (default: none)
    ///
    /// plus those read by [`ActionsConfig::from_env`].
    pub fn from_env() -> Result<Self, ServerError> {
        let raw_addr = env::var("ACTION_SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .parse()
            .map_err(|_| ServerError::InvalidAddr(raw_addr.clone()))?;

        let api_token = env::var("ACTION_SERVER_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Ok(Self {
            addr,
            api_token,
            actions: ActionsConfig::from_env()?,
        })
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ActionRegistry>,
    pub api_token: Option<String>,
}

impl AppState {
    /// Build the state with the default action registry.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        Ok(Self {
            registry: Arc::new(default_registry(&config.actions)?),
            api_token: config.api_token.clone(),
        })
    }

    /// Build the state around an existing registry.
    pub fn new(registry: ActionRegistry, api_token: Option<String>) -> Self {
        Self {
            registry: Arc::new(registry),
            api_token,
        }
    }
}

/// Build the HTTP router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/actions", get(list_actions))
        .route("/webhook", post(webhook))
        .with_state(state)
}

/// One action call from the dialogue engine.
#[derive(Debug, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    pub domain: serde_json::Value,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: String,
}

#[derive(Debug, Serialize)]
struct ActionInfo {
    name: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

async fn list_actions(State(state): State<AppState>) -> Json<Vec<ActionInfo>> {
    Json(
        state
            .registry
            .list_actions()
            .into_iter()
            .map(|name| ActionInfo {
                name: name.to_string(),
            })
            .collect(),
    )
}

async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ActionCall>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    authorize(&state, &headers)?;

    let Json(call) = body.map_err(|rejection| ApiError::Action {
        action: String::new(),
        error: ActionError::InvalidRequest(rejection.body_text()),
    })?;

    let ActionCall {
        next_action,
        sender_id,
        mut tracker,
        version,
        ..
    } = call;

    if tracker.sender_id.is_empty() {
        tracker.sender_id = sender_id.unwrap_or_default();
    }

    info!(
        action = %next_action,
        sender = %tracker.sender_id,
        engine_version = ?version,
        "Received action call"
    );

    let response = state
        .registry
        .run(&next_action, &tracker)
        .await
        .map_err(|error| ApiError::Action {
            action: next_action.clone(),
            error,
        })?;

    Ok(Json(response))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.api_token.as_deref() else {
        return Ok(());
    };

    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(ApiError::Unauthorized);
    };

    let Ok(value) = value.to_str() else {
        return Err(ApiError::Unauthorized);
    };

    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token != expected {
        return Err(ApiError::Unauthorized);
    }

    Ok(())
}

#[derive(Debug)]
enum ApiError {
    Unauthorized,
    Action { action: String, error: ActionError },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                warn!("Unauthorized request");
                let body = serde_json::json!({
                    "error": "Unauthorized",
                });
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            }
            ApiError::Action { action, error } => {
                let status = match error {
                    ActionError::NotFound(_) => StatusCode::NOT_FOUND,
                    ActionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                };
                warn!(action = %action, %status, error = %error, "Action call failed");
                let body = serde_json::json!({
                    "error": error.to_string(),
                    "action_name": action,
                });
                (status, Json(body)).into_response()
            }
        }
    }
}
