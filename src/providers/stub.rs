// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Local HTTP responder for exercising the hosted service clients

use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};

/// A request received by a [`StubServer`]
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

/// Answers every request with one canned status and JSON body
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub fn start(status: u16, body: serde_json::Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();
        let body = body.to_string();
        let (tx, rx) = mpsc::channel::<SocketAddr>();

        thread::spawn(move || {
            let system = actix_web::rt::System::new();
            let _ = system.block_on(async move {
                let server = HttpServer::new(move || {
                    let seen = seen.clone();
                    let body = body.clone();
                    App::new().default_service(web::to(
                        move |req: HttpRequest, payload: web::Bytes| {
                            let seen = seen.clone();
                            let body = body.clone();
                            async move {
                                let header = |name: &str| {
                                    req.headers()
                                        .get(name)
                                        .and_then(|v| v.to_str().ok())
                                        .map(String::from)
                                };
                                seen.lock().unwrap().push(Recorded {
                                    method: req.method().to_string(),
                                    path: req.path().to_string(),
                                    authorization: header("authorization"),
                                    api_key: header("api-key"),
                                    body: serde_json::from_slice(&payload)
                                        .unwrap_or(serde_json::Value::Null),
                                });
                                HttpResponse::build(StatusCode::from_u16(status).unwrap())
                                    .content_type("application/json")
                                    .body(body)
                            }
                        },
                    ))
                })
                .workers(1)
                .disable_signals()
                .bind(("127.0.0.1", 0))
                .unwrap();

                tx.send(server.addrs()[0]).unwrap();
                server.run().await
            });
        });

        let addr = rx.recv().unwrap();
        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}
