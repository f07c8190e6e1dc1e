pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::editor::handlers as editor;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sections
        .route("/sections", get(editor::handle_get_sections))
        .route("/sections/add-section", post(editor::handle_add_section))
        .route("/sections/add-latex", post(editor::handle_add_latex_section))
        .route("/sections/reorder", patch(editor::handle_reorder_sections))
        .route("/sections/:id", delete(editor::handle_remove_section))
        .route("/sections/:id/title", patch(editor::handle_update_section_title))
        .route("/sections/:id/status", patch(editor::handle_toggle_section_status))
        .route(
            "/sections/:id/collapse",
            patch(editor::handle_toggle_section_collapse),
        )
        .route("/sections/:id/update-latex", post(editor::handle_update_latex))
        // Items
        .route("/sections/:id/items", post(editor::handle_add_item))
        .route(
            "/sections/:id/items/reorder",
            patch(editor::handle_reorder_items),
        )
        .route(
            "/sections/:id/items/:item_id",
            patch(editor::handle_update_item).delete(editor::handle_remove_item),
        )
        .route(
            "/sections/:id/items/:item_id/status",
            patch(editor::handle_toggle_item_status),
        )
        .route(
            "/sections/:id/items/:item_id/collapse",
            patch(editor::handle_toggle_item_collapse),
        )
        // Bullet points
        .route(
            "/sections/:id/items/:item_id/bullets",
            post(editor::handle_add_bullet),
        )
        .route(
            "/sections/:id/items/:item_id/bullets/reorder",
            patch(editor::handle_reorder_bullets),
        )
        .route(
            "/sections/:id/items/:item_id/bullets/:bullet_id/text",
            patch(editor::handle_update_bullet_text),
        )
        .route(
            "/sections/:id/items/:item_id/bullets/:bullet_id/status",
            patch(editor::handle_toggle_bullet_status),
        )
        .route(
            "/sections/:id/items/:item_id/bullets/:bullet_id",
            delete(editor::handle_remove_bullet),
        )
        // Rendering
        .route("/preview", get(render::handle_preview))
        .route("/latex", post(render::handle_latex))
        .route("/pdf", post(render::handle_pdf))
        // Import / export
        .route("/export", get(editor::handle_export))
        .route("/import", post(editor::handle_import))
        .with_state(state)
}
