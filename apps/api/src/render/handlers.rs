use anyhow::Context;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::{Resume, Section};
use crate::render::{latex, pdf, preview};
use crate::state::AppState;

/// Sections payload accepted by POST /latex and POST /pdf: either the
/// `{"sections_json": [...]}` wrapper or a bare sections array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SectionsPayload {
    Wrapped { sections_json: Vec<Section> },
    Bare(Vec<Section>),
}

impl SectionsPayload {
    fn into_resume(self) -> Resume {
        let sections = match self {
            SectionsPayload::Wrapped { sections_json } => sections_json,
            SectionsPayload::Bare(sections) => sections,
        };
        Resume { sections }
    }
}

/// GET /preview
pub async fn handle_preview(
    State(state): State<AppState>,
) -> Json<preview::ResumePreview> {
    let document = state.document.read().await;
    Json(preview::preview(&document))
}

/// POST /latex
pub async fn handle_latex(Json(payload): Json<SectionsPayload>) -> Response {
    let source = latex::document(&payload.into_resume());
    ([(header::CONTENT_TYPE, "text/x-tex")], source).into_response()
}

/// POST /pdf
pub async fn handle_pdf(
    State(state): State<AppState>,
    Json(payload): Json<SectionsPayload>,
) -> Result<Response, AppError> {
    let source = latex::document(&payload.into_resume());

    let _permit = state
        .compile_permits
        .acquire()
        .await
        .context("compile semaphore closed")?;
    let bytes = pdf::compile(&source, &state.config).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=resume.pdf"),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}
