//! Axum route handlers for the screening page and the Screening API.
//!
//! Every request gets its own controller, so form state lives only as long as
//! the request that carries it.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::controller::ScreeningController;
use crate::screening::models::{CandidateRanking, ScreeningRequest, ScreeningStatus};
use crate::screening::view::{render_page, ScreeningView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of both the HTML form post and the JSON API.
#[derive(Debug, Deserialize)]
pub struct ScreeningInput {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resumes: String,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub screening_id: Uuid,
    pub resume_count: usize,
    pub rankings: Vec<CandidateRanking>,
}

fn controller_for(state: &AppState, input: ScreeningInput) -> ScreeningController {
    let mut controller = ScreeningController::new(state.ranking_client.clone());
    controller.update_job_description(input.job_description);
    controller.update_resumes(input.resumes);
    controller
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
///
/// Empty form, idle.
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    let controller = ScreeningController::new(state.ranking_client.clone());
    Html(render_page(&ScreeningView::from_controller(&controller)))
}

/// POST /screen
///
/// Runs one screening from the form and renders the settled page. Failures are
/// shown in the error banner, so this always answers 200.
pub async fn handle_screen_form(
    State(state): State<AppState>,
    Form(input): Form<ScreeningInput>,
) -> Html<String> {
    let mut controller = controller_for(&state, input);
    controller.submit().await;
    Html(render_page(&ScreeningView::from_controller(&controller)))
}

/// POST /api/v1/screenings
///
/// Runs one screening and returns the ordered rankings, or the failure mapped
/// onto an HTTP error.
pub async fn handle_create_screening(
    State(state): State<AppState>,
    payload: Result<Json<ScreeningInput>, JsonRejection>,
) -> Result<Json<ScreeningResponse>, AppError> {
    let Json(input) = payload?;
    let mut controller = controller_for(&state, input);

    match controller.submit().await {
        ScreeningStatus::Success(rankings) => {
            let resume_count =
                ScreeningRequest::new(controller.job_description(), controller.resumes())
                    .map(|r| r.resume_count())
                    .unwrap_or(0);
            let screening_id = controller.screening_id().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("screening finished without an id"))
            })?;
            Ok(Json(ScreeningResponse {
                screening_id,
                resume_count,
                rankings,
            }))
        }
        ScreeningStatus::Failure(failure) => Err(failure.into()),
        other => Err(AppError::Internal(anyhow::anyhow!(
            "screening did not settle: {other:?}"
        ))),
    }
}
