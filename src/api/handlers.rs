// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! API request and response handlers

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;

use super::state::AppState;
use crate::config::APP_NAME;
use crate::error::OmbeeError;
use crate::models::{ChatRequest, MessageHistory};

/// Default page size for message history
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

// =============================================================================
// Errors
// =============================================================================

fn detail(status: actix_web::http::StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "detail": message.into() }))
}

fn error_response(context: &str, err: &OmbeeError) -> HttpResponse {
    use actix_web::http::StatusCode;

    match err {
        OmbeeError::SessionNotFound(_) => detail(StatusCode::NOT_FOUND, "Session not found"),
        _ => {
            log::error!("{}: {}", context, err);
            detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}: {}", context, err),
            )
        }
    }
}

fn blocking_failed(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    log::error!("{}: {}", context, err);
    detail(
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        format!("{}: {}", context, err),
    )
}

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SessionCreate {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub message: String,
}

// =============================================================================
// Health Check
// =============================================================================

pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": APP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let configured = |present: bool| if present { "connected" } else { "not configured" };

    let worker = state.clone();
    let statistics = match web::block(move || worker.assistant.store_statistics()).await {
        Ok(Ok(stats)) => Some(stats),
        Ok(Err(e)) => {
            log::warn!("Store health check failed: {}", e);
            None
        }
        Err(e) => {
            log::warn!("Store health check failed: {}", e);
            None
        }
    };
    let database = if statistics.is_some() { "connected" } else { "error" };
    let tracing = if state.assistant.tracer().path().is_some() {
        "file"
    } else {
        "log"
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "components": {
            "database": database,
            "pinecone": configured(state.components.pinecone),
            "cohere": configured(state.components.cohere),
            "groq": configured(state.components.groq),
            "tracing": tracing,
        },
        "statistics": statistics,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// =============================================================================
// Session Handlers
// =============================================================================

pub async fn create_session(
    state: web::Data<AppState>,
    body: Option<web::Json<SessionCreate>>,
) -> impl Responder {
    let user_id = body.and_then(|b| b.into_inner().user_id);
    let worker = state.clone();

    match web::block(move || worker.assistant.create_session(user_id.as_deref())).await {
        Ok(Ok(session)) => HttpResponse::Ok().json(session.info()),
        Ok(Err(e)) => error_response("Failed to create session", &e),
        Err(e) => blocking_failed("Failed to create session", e),
    }
}

pub async fn get_messages(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let session_id = path.into_inner();
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let worker = state.clone();

    match web::block(move || worker.assistant.session_messages(&session_id, limit)).await {
        Ok(Ok(messages)) => {
            let history: Vec<MessageHistory> = messages.iter().map(|m| m.to_history()).collect();
            HttpResponse::Ok().json(history)
        }
        Ok(Err(e)) => error_response("Failed to fetch messages", &e),
        Err(e) => blocking_failed("Failed to fetch messages", e),
    }
}

pub async fn delete_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    let worker = state.clone();

    match web::block(move || worker.assistant.delete_session(&session_id)).await {
        Ok(Ok(())) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "message": "Session deleted",
        })),
        Ok(Err(e)) => error_response("Failed to delete session", &e),
        Err(e) => blocking_failed("Failed to delete session", e),
    }
}

// =============================================================================
// Chat Handlers
// =============================================================================

pub async fn chat(state: web::Data<AppState>, body: web::Json<ChatRequest>) -> impl Responder {
    let request = body.into_inner();
    let worker = state.clone();

    match web::block(move || worker.assistant.chat(&request)).await {
        Ok(Ok(reply)) => HttpResponse::Ok().json(reply),
        Ok(Err(e)) => error_response("Chat processing failed", &e),
        Err(e) => blocking_failed("Chat processing failed", e),
    }
}

/// Routing decision and its explanation, without answering
pub async fn route(state: web::Data<AppState>, body: web::Json<RouteRequest>) -> impl Responder {
    HttpResponse::Ok().json(state.assistant.router().explain(&body.message))
}
