use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::ops::{self, ItemPatch};
use crate::errors::AppError;
use crate::models::resume::{BulletPoint, Item, Resume, Section};
use crate::models::rich_text::RichText;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct SectionEnvelope {
    pub section: Section,
}

#[derive(Debug, Serialize)]
pub struct ItemEnvelope {
    pub item: Item,
}

#[derive(Debug, Serialize)]
pub struct BulletEnvelope {
    pub bullet: BulletPoint,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct TitleBody {
    pub title: RichText,
}

#[derive(Deserialize)]
pub struct LatexBody {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ContentBody {
    pub content: RichText,
}

#[derive(Deserialize)]
pub struct ReorderBody {
    pub from: usize,
    pub to: usize,
}

/// GET /sections
pub async fn handle_get_sections(State(state): State<AppState>) -> Json<SectionsResponse> {
    let document = state.document.read().await;
    Json(SectionsResponse {
        sections: document.sections.clone(),
    })
}

/// POST /sections/add-section
pub async fn handle_add_section(
    State(state): State<AppState>,
) -> Result<Json<SectionEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let section = ops::add_section(&mut document);
    state.persist(&document).await;
    Ok(Json(SectionEnvelope { section }))
}

/// POST /sections/add-latex
pub async fn handle_add_latex_section(
    State(state): State<AppState>,
) -> Result<Json<SectionEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let section = ops::add_latex_section(&mut document);
    state.persist(&document).await;
    Ok(Json(SectionEnvelope { section }))
}

/// DELETE /sections/:id
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut document = state.document.write().await;
    ops::remove_section(&mut document, section_id)?;
    state.persist(&document).await;
    Ok(Json(MessageResponse {
        message: "Section deleted successfully".to_string(),
    }))
}

/// PATCH /sections/:id/title
pub async fn handle_update_section_title(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(body): Json<TitleBody>,
) -> Result<Json<SectionEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let section = ops::update_section_title(&mut document, section_id, body.title)?;
    state.persist(&document).await;
    Ok(Json(SectionEnvelope { section }))
}

/// PATCH /sections/:id/status
pub async fn handle_toggle_section_status(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<SectionEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let section = ops::toggle_section_visibility(&mut document, section_id)?;
    state.persist(&document).await;
    Ok(Json(SectionEnvelope { section }))
}

/// PATCH /sections/:id/collapse
pub async fn handle_toggle_section_collapse(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<SectionEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let section = ops::toggle_section_collapse(&mut document, section_id)?;
    state.persist(&document).await;
    Ok(Json(SectionEnvelope { section }))
}

/// POST /sections/:id/update-latex
pub async fn handle_update_latex(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(body): Json<LatexBody>,
) -> Result<Json<SectionEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let section = ops::update_latex_source(&mut document, section_id, body.text)?;
    state.persist(&document).await;
    Ok(Json(SectionEnvelope { section }))
}

/// PATCH /sections/reorder
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<SectionsResponse>, AppError> {
    let mut document = state.document.write().await;
    ops::move_section(&mut document, body.from, body.to)?;
    state.persist(&document).await;
    Ok(Json(SectionsResponse {
        sections: document.sections.clone(),
    }))
}

/// POST /sections/:id/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<ItemEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let item = ops::add_item(&mut document, section_id)?;
    state.persist(&document).await;
    Ok(Json(ItemEnvelope { item }))
}

/// PATCH /sections/:id/items/:item_id
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<ItemEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let item = ops::update_item(&mut document, section_id, item_id, patch)?;
    state.persist(&document).await;
    Ok(Json(ItemEnvelope { item }))
}

/// PATCH /sections/:id/items/:item_id/status
pub async fn handle_toggle_item_status(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ItemEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let item = ops::toggle_item_visibility(&mut document, section_id, item_id)?;
    state.persist(&document).await;
    Ok(Json(ItemEnvelope { item }))
}

/// PATCH /sections/:id/items/:item_id/collapse
pub async fn handle_toggle_item_collapse(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ItemEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let item = ops::toggle_item_collapse(&mut document, section_id, item_id)?;
    state.persist(&document).await;
    Ok(Json(ItemEnvelope { item }))
}

/// DELETE /sections/:id/items/:item_id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut document = state.document.write().await;
    ops::remove_item(&mut document, section_id, item_id)?;
    state.persist(&document).await;
    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}

/// PATCH /sections/:id/items/reorder
pub async fn handle_reorder_items(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<SectionEnvelope>, AppError> {
    let mut document = state.document.write().await;
    ops::move_item(&mut document, section_id, body.from, body.to)?;
    let section = document
        .section(section_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Section {section_id} not found")))?;
    state.persist(&document).await;
    Ok(Json(SectionEnvelope { section }))
}

/// POST /sections/:id/items/:item_id/bullets
pub async fn handle_add_bullet(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BulletEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let bullet = ops::add_bullet(&mut document, section_id, item_id)?;
    state.persist(&document).await;
    Ok(Json(BulletEnvelope { bullet }))
}

/// PATCH /sections/:id/items/:item_id/bullets/:bullet_id/text
pub async fn handle_update_bullet_text(
    State(state): State<AppState>,
    Path((section_id, item_id, bullet_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(body): Json<ContentBody>,
) -> Result<Json<BulletEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let bullet =
        ops::update_bullet_content(&mut document, section_id, item_id, bullet_id, body.content)?;
    state.persist(&document).await;
    Ok(Json(BulletEnvelope { bullet }))
}

/// PATCH /sections/:id/items/:item_id/bullets/:bullet_id/status
pub async fn handle_toggle_bullet_status(
    State(state): State<AppState>,
    Path((section_id, item_id, bullet_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<BulletEnvelope>, AppError> {
    let mut document = state.document.write().await;
    let bullet = ops::toggle_bullet_visibility(&mut document, section_id, item_id, bullet_id)?;
    state.persist(&document).await;
    Ok(Json(BulletEnvelope { bullet }))
}

/// DELETE /sections/:id/items/:item_id/bullets/:bullet_id
pub async fn handle_remove_bullet(
    State(state): State<AppState>,
    Path((section_id, item_id, bullet_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut document = state.document.write().await;
    ops::remove_bullet(&mut document, section_id, item_id, bullet_id)?;
    state.persist(&document).await;
    Ok(Json(MessageResponse {
        message: "Bullet point deleted successfully".to_string(),
    }))
}

/// PATCH /sections/:id/items/:item_id/bullets/reorder
pub async fn handle_reorder_bullets(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<ItemEnvelope>, AppError> {
    let mut document = state.document.write().await;
    ops::move_bullet(&mut document, section_id, item_id, body.from, body.to)?;
    let item = ops::update_item(&mut document, section_id, item_id, ItemPatch::default())?;
    state.persist(&document).await;
    Ok(Json(ItemEnvelope { item }))
}

/// GET /export
/// The serialized document, equal to the store file's content.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let document = state.document.read().await;
    let body = serde_json::to_vec_pretty(&*document).context("serializing resume for export")?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=resume.json",
            ),
        ],
        body,
    )
        .into_response())
}

/// POST /import
/// Replaces the document with the posted tree. A malformed or invalid tree
/// is rejected without touching the existing state.
pub async fn handle_import(
    State(state): State<AppState>,
    Json(incoming): Json<Resume>,
) -> Result<Json<SectionsResponse>, AppError> {
    let mut document = state.document.write().await;
    ops::replace(&mut document, incoming)?;
    state.persist(&document).await;
    Ok(Json(SectionsResponse {
        sections: document.sections.clone(),
    }))
}
