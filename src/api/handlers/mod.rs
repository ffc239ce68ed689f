use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use catalog_core::{Catalog, Query as CatalogQuery, TemplateEntry};

use crate::render;

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Template not found".to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(catalog): State<Catalog>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "templates": catalog.len() }))
}

// ============================================================
// Templates
// ============================================================

/// `?owner=` picks one owner (default owner when absent); `?q=` narrows by text.
pub async fn list_templates(
    State(catalog): State<Catalog>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<TemplateEntry>> {
    let entries = catalog.query(&query);
    tracing::debug!(
        owner = query.owner.as_deref().unwrap_or(catalog.default_owner()),
        search = query.search.as_deref().unwrap_or(""),
        results = entries.len(),
        "Template query"
    );
    Json(entries.into_iter().cloned().collect())
}

pub async fn get_template(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<TemplateEntry>, (StatusCode, String)> {
    catalog.get(&id).cloned().map(Json).ok_or_else(not_found)
}

/// Raw content as plain text, suitable for piping into a clipboard.
pub async fn get_template_raw(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entry = catalog.get(&id).ok_or_else(not_found)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        entry.content.clone(),
    ))
}

// ============================================================
// Owners
// ============================================================

pub async fn list_owners(State(catalog): State<Catalog>) -> Json<Vec<String>> {
    Json(catalog.owners().into_iter().map(str::to_string).collect())
}

// ============================================================
// Browsing page
// ============================================================

pub async fn index(
    State(catalog): State<Catalog>,
    Query(query): Query<CatalogQuery>,
) -> Html<String> {
    let entries = catalog.query(&query);
    let owners = catalog.owners();
    let active_owner = query.owner.as_deref().unwrap_or(catalog.default_owner());
    let search = query.search.as_deref().unwrap_or("");
    Html(render::render_page(&entries, &owners, active_owner, search))
}
