// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! HTTP API Server for the Ombee assistant
//!
//! Provides a REST API for the web frontend to chat with the assistant and
//! manage sessions. Uses Actix-web for the HTTP server.

mod handlers;
mod state;

pub use state::{AppState, ComponentStatus};

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(), // Bind to all interfaces
            port: 8000,
        }
    }
}

/// Configure API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::*;

    cfg.route("/", web::get().to(root)).service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .route("/sessions/create", web::post().to(create_session))
            .route("/sessions/{id}/messages", web::get().to(get_messages))
            .route("/sessions/{id}", web::delete().to(delete_session))
            .route("/chat", web::post().to(chat))
            .route("/route", web::post().to(route)),
    );
}

/// Start the API server
pub async fn start_server(config: ServerConfig, state: AppState) -> Result<()> {
    let state = web::Data::new(state);

    log::info!("Ombee API server listening on http://{}:{}", config.host, config.port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    });

    let server = server.bind((config.host.as_str(), config.port))?;
    server.run().await?;

    log::info!("Ombee API server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::Assistant;
    use crate::database::ChatDatabase;
    use crate::error::{OmbeeError, Result};
    use crate::providers::{Generation, GenerationRequest, Generator, RetrievedContext, Retriever};
    use actix_web::{http::StatusCode, test};
    use std::time::Duration;

    struct EmptyRetriever;

    impl Retriever for EmptyRetriever {
        fn retrieve(&self, _query: &str, _top_k: usize) -> Result<RetrievedContext> {
            Ok(RetrievedContext::default())
        }
    }

    struct EchoGenerator;

    impl Generator for EchoGenerator {
        fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
            if request.query.contains("explode") {
                return Err(OmbeeError::provider("groq", "HTTP 500: boom"));
            }
            Ok(Generation {
                text: format!("You asked: {}", request.query),
                elapsed: Duration::ZERO,
                usage: None,
            })
        }
    }

    fn state() -> web::Data<AppState> {
        let assistant = Assistant::new(
            ChatDatabase::open_in_memory().unwrap(),
            Box::new(EmptyRetriever),
            Box::new(EchoGenerator),
        );
        web::Data::new(AppState::new(
            assistant,
            ComponentStatus {
                pinecone: true,
                cohere: false,
                groq: true,
            },
        ))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state).configure(configure_routes)).await
        };
    }

    #[actix_web::test]
    async fn test_root_and_health() {
        let app = app!(state());

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "Ombee AI");

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["components"]["database"], "connected");
        assert_eq!(body["components"]["pinecone"], "connected");
        assert_eq!(body["components"]["cohere"], "not configured");
        assert_eq!(body["components"]["tracing"], "log");
        assert_eq!(body["statistics"]["session_count"], 0);
        assert_eq!(body["statistics"]["message_count"], 0);
    }

    #[actix_web::test]
    async fn test_unregistered_user_id() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/sessions/create")
            .set_json(serde_json::json!({"user_id": "auth0|external-42"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({
                "message": "tips for sleep",
                "user_id": "auth0|external-42",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let reply: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(reply["status"], "live");

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["statistics"]["session_count"], 2);
        assert_eq!(body["statistics"]["message_count"], 2);
    }

    #[actix_web::test]
    async fn test_chat_flow() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/sessions/create")
            .set_json(serde_json::json!({}))
            .to_request();
        let session: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let session_id = session["session_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({
                "message": "Any tips for better sleep?",
                "session_id": session_id,
            }))
            .to_request();
        let reply: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reply["domain"], "holistic");
        assert_eq!(reply["status"], "live");
        assert_eq!(reply["response"], "You asked: Any tips for better sleep?");
        assert_eq!(reply["content_hash"].as_str().unwrap().len(), 64);

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}/messages?limit=1", session_id))
            .to_request();
        let history: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["role"], "assistant");
        assert_eq!(history[0]["domain"], "holistic");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/sessions/{}", session_id))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Session deleted");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/sessions/{}", session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_chat_unknown_session() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({"message": "hi", "session_id": "nope"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Session not found");

        let req = test::TestRequest::get()
            .uri("/api/sessions/nope/messages")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_generation_failure_is_error_reply() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({"message": "will this diet explode my energy?"}))
            .to_request();
        let reply: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reply["status"], "error");
        assert!(reply["response"]
            .as_str()
            .unwrap()
            .starts_with("I encountered an error processing your request:"));
    }

    #[actix_web::test]
    async fn test_route_endpoint() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/route")
            .set_json(serde_json::json!({"message": "What's my current phone plan?"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["domain"], "telecom");
        assert!(body["confidence"].as_f64().unwrap() >= 0.70);
    }
}
