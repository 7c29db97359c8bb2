//! Shared test fixtures: an in-process Gemini stub and scripted ranking clients.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::sync::Notify;

use crate::screening::models::CandidateRanking;
use crate::screening::ranking_client::{RankingClient, RankingError};

type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// Body the stub answers with.
#[derive(Clone)]
pub enum StubReply {
    Json(Value),
    /// Sent verbatim with a JSON content type.
    Raw(&'static str),
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: StubReply,
    delay: Duration,
    captured: Captured,
}

/// A `generateContent` stub bound to an ephemeral localhost port.
pub struct GeminiStub {
    pub base_url: String,
    captured: Captured,
}

impl GeminiStub {
    /// Every request received so far as `(x-goog-api-key, json body)`.
    pub fn requests(&self) -> Vec<(Option<String>, Value)> {
        self.captured.lock().unwrap().clone()
    }
}

async fn stub_generate(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.captured.lock().unwrap().push((api_key, body));

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    match state.reply {
        StubReply::Json(reply) => (state.status, Json(reply)).into_response(),
        StubReply::Raw(text) => (
            state.status,
            [(header::CONTENT_TYPE, "application/json")],
            text,
        )
            .into_response(),
    }
}

/// Serves `reply` with `status` for every `POST /v1beta/models/{model}:generateContent`.
pub async fn spawn_gemini_stub(status: StatusCode, reply: Value) -> GeminiStub {
    spawn_gemini_stub_with(status, StubReply::Json(reply), Duration::ZERO).await
}

/// Like `spawn_gemini_stub`, but each answer is held back by `delay`.
pub async fn spawn_gemini_stub_with(
    status: StatusCode,
    reply: StubReply,
    delay: Duration,
) -> GeminiStub {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route("/v1beta/models/:model_action", post(stub_generate))
        .with_state(StubState {
            status,
            reply,
            delay,
            captured: captured.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    GeminiStub {
        base_url: format!("http://{addr}"),
        captured,
    }
}

pub fn ranking(name: &str, rank: u32, score: u32) -> CandidateRanking {
    CandidateRanking {
        candidate_name: name.to_string(),
        rank,
        score,
        rationale: format!("{name} matches the core requirements"),
        strengths: vec!["Rust".to_string()],
        gaps: vec![],
    }
}

/// What a scripted client does on one call.
pub enum Scripted {
    Rankings(Vec<CandidateRanking>),
    Fail(RankingError),
    Panic,
    /// Never resolves.
    Hang,
    /// Waits for the notify, then returns the rankings.
    Gated(Arc<Notify>, Vec<CandidateRanking>),
}

/// Ranking client that replays a script, one entry per call, and records inputs.
pub struct ScriptedRankingClient {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedRankingClient {
    pub fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::default(),
        })
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RankingClient for ScriptedRankingClient {
    async fn rank(
        &self,
        job_description: &str,
        resumes_text: &str,
    ) -> Result<Vec<CandidateRanking>, RankingError> {
        self.calls
            .lock()
            .unwrap()
            .push((job_description.to_string(), resumes_text.to_string()));
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("ranking client called more times than scripted");

        match next {
            Scripted::Rankings(rankings) => Ok(rankings),
            Scripted::Fail(err) => Err(err),
            Scripted::Panic => panic!("scripted ranking client fault"),
            Scripted::Hang => std::future::pending().await,
            Scripted::Gated(gate, rankings) => {
                gate.notified().await;
                Ok(rankings)
            }
        }
    }
}
