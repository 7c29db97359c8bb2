//! Screening data model: validated requests, ranking records and the status machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when either form field is blank. Mentions both required inputs.
pub const VALIDATION_MESSAGE: &str =
    "Please provide both a job description and at least one resume.";

/// Raised when a submit is attempted with a blank job description or resume block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", VALIDATION_MESSAGE)]
pub struct ValidationError;

/// A single ranking call's input. Built fresh from form state on every submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningRequest {
    job_description: String,
    resumes_text: String,
}

impl ScreeningRequest {
    /// Both fields must contain something other than whitespace.
    pub fn new(job_description: &str, resumes_text: &str) -> Result<Self, ValidationError> {
        if job_description.trim().is_empty() || resumes_text.trim().is_empty() {
            return Err(ValidationError);
        }
        Ok(Self {
            job_description: job_description.to_string(),
            resumes_text: resumes_text.to_string(),
        })
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn resumes_text(&self) -> &str {
        &self.resumes_text
    }

    /// Number of non-blank resumes in the block. Resumes are separated by a line
    /// made only of three or more dashes.
    pub fn resume_count(&self) -> usize {
        let mut count = 0;
        let mut segment_has_text = false;
        for line in self.resumes_text.lines() {
            if is_resume_delimiter(line) {
                if segment_has_text {
                    count += 1;
                }
                segment_has_text = false;
            } else if !line.trim().is_empty() {
                segment_has_text = true;
            }
        }
        if segment_has_text {
            count += 1;
        }
        count
    }
}

fn is_resume_delimiter(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

/// One evaluated resume. The list order coming back from the ranking service is
/// the display order; nothing downstream re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRanking {
    pub candidate_name: String,
    /// 1-based position assigned by the ranking service.
    pub rank: u32,
    /// Match score, 0 to 100.
    pub score: u32,
    pub rationale: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
}

impl CandidateRanking {
    /// Checks the record against the ranking response schema.
    pub fn validate(&self) -> Result<(), String> {
        if self.candidate_name.trim().is_empty() {
            return Err("candidate_name is empty".to_string());
        }
        if self.rank == 0 {
            return Err(format!("rank for '{}' must start at 1", self.candidate_name));
        }
        if self.score > 100 {
            return Err(format!(
                "score {} for '{}' is outside 0-100",
                self.score, self.candidate_name
            ));
        }
        Ok(())
    }
}

/// What went wrong, so outer surfaces can choose how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Service,
    Parse,
    Interrupted,
}

/// User-facing failure carried by `ScreeningStatus::Failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ScreeningFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// What the screening workflow is doing right now. Only the controller moves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScreeningStatus {
    #[default]
    Idle,
    Loading,
    Success(Vec<CandidateRanking>),
    Failure(ScreeningFailure),
}

impl ScreeningStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreeningStatus::Loading)
    }

    pub fn rankings(&self) -> Option<&[CandidateRanking]> {
        match self {
            ScreeningStatus::Success(rankings) => Some(rankings),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ScreeningFailure> {
        match self {
            ScreeningStatus::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}
