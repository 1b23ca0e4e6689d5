// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Chat pipeline
//!
//! One turn: store the question, route it, answer it (demo text, retrieval
//! plus generation, or a coming-soon notice), store the answer and record a
//! query trace.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::database::{ChatDatabase, DatabaseStats, Message, MessageMetadata, NewMessage, Session};
use crate::demo::{coming_soon_message, demo_response};
use crate::error::{OmbeeError, Result};
use crate::models::{ChatReply, ChatRequest, ResponseStatus, UserProfile};
use crate::providers::common::truncate_chars;
use crate::providers::{
    GenerationRequest, Generator, GroqGenerator, Retriever, VectorRetriever,
};
use crate::routing::{DomainRouter, RoutingResult};
use crate::telemetry::{QueryTrace, QueryTracer};

/// Prior messages included as conversation context
pub const CONTEXT_MESSAGES: usize = 5;

/// Characters kept from each prior message
pub const CONTEXT_MESSAGE_CHARS: usize = 200;

/// How an answer was produced, before it is stored
#[derive(Debug, Default)]
struct Outcome {
    text: String,
    sources: Vec<String>,
    status: Option<ResponseStatus>,
    context: String,
    retrieval: Option<Duration>,
    generation: Option<Duration>,
    total_tokens: Option<u32>,
    error: Option<String>,
}

impl Outcome {
    fn status(&self) -> ResponseStatus {
        self.status.unwrap_or(ResponseStatus::Error)
    }
}

/// The multi-domain assistant
pub struct Assistant {
    store: Mutex<ChatDatabase>,
    retriever: Box<dyn Retriever>,
    generator: Box<dyn Generator>,
    router: DomainRouter<'static>,
    tracer: QueryTracer,
    top_k: usize,
}

impl Assistant {
    pub fn new(
        store: ChatDatabase,
        retriever: Box<dyn Retriever>,
        generator: Box<dyn Generator>,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            retriever,
            generator,
            router: DomainRouter::standard(),
            tracer: QueryTracer::new(),
            top_k: crate::config::DEFAULT_TOP_K,
        }
    }

    /// Wire up the hosted collaborators and the store from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.require_live()?;

        let store = ChatDatabase::open(&config.database_path()?)?;
        let retriever = VectorRetriever::from_config(config)?;
        let generator = GroqGenerator::from_config(config)?;

        Ok(Self::new(store, Box::new(retriever), Box::new(generator))
            .with_tracer(QueryTracer::from_path(config.trace_file.clone()))
            .with_top_k(config.retrieval_top_k))
    }

    pub fn with_tracer(mut self, tracer: QueryTracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn router(&self) -> &DomainRouter<'static> {
        &self.router
    }

    pub fn tracer(&self) -> &QueryTracer {
        &self.tracer
    }

    fn store(&self) -> MutexGuard<'_, ChatDatabase> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    pub fn create_session(&self, user_id: Option<&str>) -> Result<Session> {
        let session = self.store().create_session(user_id)?;
        log::info!("Created session {}", session.session_id);
        Ok(session)
    }

    /// Latest `limit` messages of a session, oldest first
    pub fn session_messages(&self, session_id: &str, limit: usize) -> Result<Vec<Message>> {
        let store = self.store();
        if store.get_session(session_id)?.is_none() {
            return Err(OmbeeError::SessionNotFound(session_id.to_string()));
        }
        store.recent_messages(session_id, limit)
    }

    pub fn delete_session(&self, session_id: &str) -> Result<()> {
        if self.store().delete_session(session_id)? {
            log::info!("Deleted session {}", session_id);
            Ok(())
        } else {
            Err(OmbeeError::SessionNotFound(session_id.to_string()))
        }
    }

    /// Row counts; also confirms the store answers queries
    pub fn store_statistics(&self) -> Result<DatabaseStats> {
        self.store().get_statistics()
    }

    // -------------------------------------------------------------------------
    // Chat
    // -------------------------------------------------------------------------

    /// Run one chat turn
    pub fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let started = Instant::now();
        let query = request.message.as_str();

        let (session, conversation, profile) = {
            let store = self.store();

            let session = match &request.session_id {
                Some(id) => store
                    .get_session(id)?
                    .ok_or_else(|| OmbeeError::SessionNotFound(id.clone()))?,
                None => store.create_session(request.user_id.as_deref())?,
            };

            let question = store.insert_message(NewMessage::user(&session.session_id, query))?;
            let history = store.recent_messages(&session.session_id, CONTEXT_MESSAGES + 1)?;
            let conversation = conversation_context(
                history.iter().filter(|m| m.message_id != question.message_id),
            );

            let user_id = request.user_id.as_deref().or(session.user_id.as_deref());
            let profile = match user_id {
                Some(id) => store.get_user(id)?.map(|u| u.profile()),
                None => None,
            };

            (session, conversation, profile)
        };

        let routed = self.router.classify(query);
        log::debug!(
            "Routed to {} ({:.2}) in session {}",
            routed.domain,
            routed.confidence,
            session.session_id
        );

        let outcome = self.answer(query, routed, &conversation, profile);
        let status = outcome.status();

        let metadata = MessageMetadata {
            domain: Some(routed.domain),
            confidence: Some(routed.confidence),
            sources: Some(outcome.sources.clone()),
            status: Some(status),
        };
        let answer = self.store().insert_message(
            NewMessage::assistant(&session.session_id, &outcome.text, metadata).with_timings(
                outcome.retrieval.map(|d| d.as_secs_f64()),
                outcome.generation.map(|d| d.as_secs_f64()),
            ),
        )?;

        self.tracer.record(
            &QueryTrace::new(
                query,
                routed.domain,
                routed.confidence,
                status,
                &outcome.text,
                &outcome.sources,
                started.elapsed(),
            )
            .with_context(&outcome.context)
            .with_timings(outcome.retrieval, outcome.generation)
            .with_tokens(outcome.total_tokens)
            .with_user(request.user_id.as_deref())
            .with_error(outcome.error.clone()),
        );

        Ok(ChatReply {
            session_id: session.session_id,
            message_id: answer.message_id.clone(),
            response: outcome.text,
            domain: routed.domain,
            confidence: routed.confidence,
            sources: outcome.sources,
            status,
            timestamp: answer.timestamp(),
            content_hash: Some(answer.content_hash),
            source_document_uids: answer.source_document_uids.unwrap_or_default(),
        })
    }

    fn answer(
        &self,
        query: &str,
        routed: RoutingResult,
        conversation: &str,
        profile: Option<UserProfile>,
    ) -> Outcome {
        if let Some(demo) = demo_response(query, routed.domain) {
            return Outcome {
                text: demo.response,
                sources: demo.sources,
                status: Some(demo.status),
                ..Outcome::default()
            };
        }

        if routed.domain.is_live() {
            return self.answer_live(query, conversation, profile);
        }

        Outcome {
            text: coming_soon_message(routed.domain),
            status: Some(ResponseStatus::ComingSoon),
            ..Outcome::default()
        }
    }

    fn answer_live(&self, query: &str, conversation: &str, profile: Option<UserProfile>) -> Outcome {
        let mut outcome = Outcome::default();

        match self.retrieve_and_generate(query, conversation, profile, &mut outcome) {
            Ok(()) => outcome.status = Some(ResponseStatus::Live),
            Err(e) => {
                log::warn!("Live answer failed: {}", e);
                outcome.text = format!("I encountered an error processing your request: {}", e);
                outcome.sources.clear();
                outcome.status = Some(ResponseStatus::Error);
                outcome.error = Some(e.to_string());
            }
        }

        outcome
    }

    fn retrieve_and_generate(
        &self,
        query: &str,
        conversation: &str,
        profile: Option<UserProfile>,
        outcome: &mut Outcome,
    ) -> Result<()> {
        let started = Instant::now();
        let retrieved = self.retriever.retrieve(query, self.top_k)?;
        outcome.retrieval = Some(started.elapsed());
        outcome.sources = retrieved.source_labels();

        let documents = retrieved.context_text();
        outcome.context = if conversation.is_empty() {
            documents
        } else {
            format!(
                "Previous conversation:\n{}\n\n---\n\nRelevant documents:\n{}",
                conversation, documents
            )
        };

        let started = Instant::now();
        let generation = self.generator.generate(&GenerationRequest {
            query: query.to_string(),
            context: outcome.context.clone(),
            profile,
        })?;
        outcome.generation = Some(started.elapsed());
        outcome.total_tokens = generation.usage.map(|u| u.total_tokens);
        outcome.text = generation.text;

        Ok(())
    }
}

/// `User: …` / `Assistant: …` lines for the last few prior messages
pub fn conversation_context<'a, I>(messages: I) -> String
where
    I: IntoIterator<Item = &'a Message>,
{
    let messages: Vec<&Message> = messages.into_iter().collect();
    let skip = messages.len().saturating_sub(CONTEXT_MESSAGES);

    messages[skip..]
        .iter()
        .map(|m| {
            format!(
                "{}: {}",
                m.role.speaker(),
                truncate_chars(&m.content, CONTEXT_MESSAGE_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
