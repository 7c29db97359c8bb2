//! Ranking client: one outbound ranking call per invocation.
//!
//! `RankingClient` is the seam the controller depends on; `GeminiRankingClient`
//! is the production backend and the only one that talks to `LlmClient`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};
use crate::screening::models::{CandidateRanking, ScreeningRequest};
use crate::screening::prompts::{build_ranking_prompt, ranking_response_schema, ranking_system};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// Transport, status, quota or auth failure. Message is human-readable.
    #[error("{0}")]
    Service(String),

    /// A response arrived but is not a usable ranking list.
    #[error("{0}")]
    Parse(String),
}

impl From<LlmError> for RankingError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) if e.is_timeout() => RankingError::Service(
                "Request timeout: the ranking service did not answer in time".to_string(),
            ),
            LlmError::Http(e) if e.is_decode() => {
                RankingError::Parse(format!("Undecodable ranking response: {e}"))
            }
            LlmError::Http(e) => {
                RankingError::Service(format!("Could not reach the ranking service: {e}"))
            }
            LlmError::Api { status, message } => {
                RankingError::Service(format!("{message} (status {status})"))
            }
            LlmError::Blocked(reason) => {
                RankingError::Service(format!("The ranking request was blocked ({reason})"))
            }
            LlmError::Parse(e) => RankingError::Parse(format!("Malformed ranking JSON: {e}")),
            LlmError::EmptyContent => {
                RankingError::Parse("Ranking service returned no content".to_string())
            }
        }
    }
}

/// Maps a job description and a block of resumes to an ordered candidate list.
#[async_trait]
pub trait RankingClient: Send + Sync {
    async fn rank(
        &self,
        job_description: &str,
        resumes_text: &str,
    ) -> Result<Vec<CandidateRanking>, RankingError>;
}

/// Accepts both `{"rankings": [...]}` and a bare top-level array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RankingPayload {
    Wrapped { rankings: Vec<CandidateRanking> },
    Bare(Vec<CandidateRanking>),
}

impl RankingPayload {
    fn into_rankings(self) -> Vec<CandidateRanking> {
        match self {
            RankingPayload::Wrapped { rankings } | RankingPayload::Bare(rankings) => rankings,
        }
    }
}

/// Gemini-backed ranking client.
pub struct GeminiRankingClient(pub LlmClient);

#[async_trait]
impl RankingClient for GeminiRankingClient {
    async fn rank(
        &self,
        job_description: &str,
        resumes_text: &str,
    ) -> Result<Vec<CandidateRanking>, RankingError> {
        let resume_count = ScreeningRequest::new(job_description, resumes_text)
            .map(|r| r.resume_count())
            .unwrap_or(0);
        let prompt = build_ranking_prompt(job_description, resumes_text, resume_count);

        debug!(
            "Requesting rankings from {} for {resume_count} resume(s)",
            self.0.model()
        );

        let payload: RankingPayload = self
            .0
            .call_json(&prompt, &ranking_system(), &ranking_response_schema())
            .await?;

        check_rankings(payload.into_rankings())
    }
}

/// Rejects lists containing records that violate the response schema.
/// Order is returned untouched.
fn check_rankings(rankings: Vec<CandidateRanking>) -> Result<Vec<CandidateRanking>, RankingError> {
    for (position, ranking) in rankings.iter().enumerate() {
        ranking
            .validate()
            .map_err(|e| RankingError::Parse(format!("ranking #{}: {e}", position + 1)))?;
    }
    Ok(rankings)
}
