//! Screening controller. Owns the form state and drives one ranking call per submit.
//!
//! Status transitions are published on a `watch` channel so any surface can
//! observe them. Only this module moves the status.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::screening::models::{
    FailureKind, ScreeningFailure, ScreeningRequest, ScreeningStatus, ValidationError,
};
use crate::screening::ranking_client::{RankingClient, RankingError};

pub const PARSE_FAILURE_MESSAGE: &str =
    "The ranking service returned a response that could not be read. Please try again.";

pub const UNKNOWN_FAILURE_MESSAGE: &str =
    "An unknown error occurred. Please check the server logs.";

pub struct ScreeningController {
    client: Arc<dyn RankingClient>,
    job_description: String,
    resumes: String,
    status: watch::Sender<ScreeningStatus>,
    screening_id: Option<Uuid>,
}

impl ScreeningController {
    pub fn new(client: Arc<dyn RankingClient>) -> Self {
        let (status, _) = watch::channel(ScreeningStatus::Idle);
        Self {
            client,
            job_description: String::new(),
            resumes: String::new(),
            status,
            screening_id: None,
        }
    }

    pub fn update_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn update_resumes(&mut self, text: impl Into<String>) {
        self.resumes = text.into();
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn resumes(&self) -> &str {
        &self.resumes
    }

    pub fn status(&self) -> ScreeningStatus {
        self.status.borrow().clone()
    }

    /// Observes every status transition from now on.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn subscribe(&self) -> watch::Receiver<ScreeningStatus> {
        self.status.subscribe()
    }

    /// Id of the most recent submission that reached the ranking call.
    pub fn screening_id(&self) -> Option<Uuid> {
        self.screening_id
    }

    /// Whether a submit trigger should be enabled right now.
    pub fn can_submit(&self) -> bool {
        !self.status.borrow().is_loading()
            && ScreeningRequest::new(&self.job_description, &self.resumes).is_ok()
    }

    /// Validates the form, runs the ranking call and settles into Success or Failure.
    ///
    /// Blank inputs settle straight into a validation Failure without calling the
    /// ranking client. Taking `&mut self` keeps a controller to one call in flight.
    pub async fn submit(&mut self) -> ScreeningStatus {
        let request = match ScreeningRequest::new(&self.job_description, &self.resumes) {
            Ok(request) => request,
            Err(ValidationError) => {
                warn!("Screening submit rejected: missing job description or resumes");
                self.status.send_replace(ScreeningStatus::Failure(ScreeningFailure::new(
                    FailureKind::Validation,
                    ValidationError.to_string(),
                )));
                return self.status();
            }
        };

        let screening_id = Uuid::new_v4();
        self.screening_id = Some(screening_id);

        let span = info_span!("screening", %screening_id);
        run_ranking(Arc::clone(&self.client), &self.status, request)
            .instrument(span)
            .await;

        self.status()
    }
}

async fn run_ranking(
    client: Arc<dyn RankingClient>,
    status: &watch::Sender<ScreeningStatus>,
    request: ScreeningRequest,
) {
    let guard = LoadingGuard::begin(status);
    info!(resume_count = request.resume_count(), "Starting ranking call");

    // Spawned so a fault inside the client surfaces as a JoinError, not a crash.
    let call = tokio::spawn(
        async move {
            client
                .rank(request.job_description(), request.resumes_text())
                .await
        }
        .in_current_span(),
    );

    let next = match call.await {
        Ok(Ok(rankings)) => {
            info!(candidates = rankings.len(), "Ranking call succeeded");
            ScreeningStatus::Success(rankings)
        }
        Ok(Err(RankingError::Service(message))) => {
            error!("Ranking service error: {message}");
            ScreeningStatus::Failure(ScreeningFailure::new(
                FailureKind::Service,
                format!("An error occurred: {message}"),
            ))
        }
        Ok(Err(RankingError::Parse(raw))) => {
            error!("Ranking response could not be parsed: {raw}");
            ScreeningStatus::Failure(ScreeningFailure::new(
                FailureKind::Parse,
                PARSE_FAILURE_MESSAGE,
            ))
        }
        Err(join_error) => {
            error!("Ranking call aborted: {join_error}");
            ScreeningStatus::Failure(ScreeningFailure::new(
                FailureKind::Interrupted,
                UNKNOWN_FAILURE_MESSAGE,
            ))
        }
    };

    guard.settle(next);
}

/// Publishes Loading on creation and guarantees Loading never outlives it.
/// Dropped without `settle` (the submit future was dropped mid-call), it
/// records an interrupted Failure.
struct LoadingGuard<'a> {
    status: &'a watch::Sender<ScreeningStatus>,
    settled: bool,
}

impl<'a> LoadingGuard<'a> {
    fn begin(status: &'a watch::Sender<ScreeningStatus>) -> Self {
        // Replaces any previous rankings or error.
        status.send_replace(ScreeningStatus::Loading);
        Self {
            status,
            settled: false,
        }
    }

    fn settle(mut self, next: ScreeningStatus) {
        self.status.send_replace(next);
        self.settled = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Screening dropped before the ranking call settled");
            self.status
                .send_replace(ScreeningStatus::Failure(ScreeningFailure::new(
                    FailureKind::Interrupted,
                    UNKNOWN_FAILURE_MESSAGE,
                )));
        }
    }
}
