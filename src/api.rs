// 🌐 Web Server Routes
// HTML dashboards plus a read-only JSON API over the same render output.

use crate::dashboard::{Registry, Selection, ViewInfo};
use crate::error::DashboardError;
use crate::html;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
pub type AppState = Arc<Registry>;

type Pairs = Query<Vec<(String, String)>>;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub views: Vec<ViewInfo>,
    pub tables: Vec<&'static str>,
}

// ============================================================================
// Errors
// ============================================================================

pub fn status_for(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::InvalidFilter { .. } => StatusCode::BAD_REQUEST,
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error response in the ApiResponse envelope
pub struct ApiError(pub DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        tracing::warn!(status = status.as_u16(), error = %self.0, "api request failed");
        (status, Json(ApiResponse::err(self.0.to_string()))).into_response()
    }
}

/// Error page for the HTML routes
pub struct PageError(pub DashboardError);

impl From<DashboardError> for PageError {
    fn from(err: DashboardError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        tracing::warn!(status = status.as_u16(), error = %self.0, "page request failed");
        let body = format!(
            r#"<!DOCTYPE html><html lang="es"><head><meta charset="UTF-8"><title>Error</title></head><body><h1>❌ Error {}</h1><p>{}</p><p><a href="/">Volver</a></p></body></html>"#,
            status.as_u16(),
            html::html_escape(&self.0.to_string()),
        );
        (status, Html(body)).into_response()
    }
}

// ============================================================================
// HTML Handlers
// ============================================================================

/// GET / - Dashboard index
async fn serve_index(State(registry): State<AppState>) -> Html<String> {
    Html(html::render_index(&registry))
}

/// GET /d/:dashboard - Rendered dashboard; the query string is the selection
async fn serve_dashboard(
    State(registry): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Pairs,
) -> Result<Html<String>, PageError> {
    let dashboard = registry.get(&id)?;
    let selection = Selection::from_pairs(pairs);
    Ok(Html(html::render_dashboard(&registry, dashboard, &selection)?))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/dashboards - Every dashboard with its views and tables
async fn list_dashboards(State(registry): State<AppState>) -> Json<ApiResponse<Vec<DashboardSummary>>> {
    let summaries = registry
        .dashboards()
        .iter()
        .map(|d| DashboardSummary {
            id: d.id(),
            title: d.title(),
            views: d.views(),
            tables: d.tables(),
        })
        .collect();
    Json(ApiResponse::ok(summaries))
}

/// GET /api/dashboards/:id/sidebar - Sidebar state for a selection
async fn get_sidebar(
    State(registry): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Pairs,
) -> Result<impl IntoResponse, ApiError> {
    let sidebar = registry.get(&id)?.sidebar(&Selection::from_pairs(pairs))?;
    Ok(Json(ApiResponse::ok(sidebar)))
}

/// GET /api/dashboards/:id/views/:view - Page model of one render pass
async fn get_view(
    State(registry): State<AppState>,
    Path((id, view)): Path<(String, String)>,
    Query(pairs): Pairs,
) -> Result<impl IntoResponse, ApiError> {
    let mut selection = Selection::from_pairs(pairs);
    selection.view = Some(view);
    let page = registry.get(&id)?.render(&selection)?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/dashboards/:id/tables - Exportable table names
async fn list_tables(
    State(registry): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(ApiResponse::ok(registry.get(&id)?.tables())))
}

/// GET /api/dashboards/:id/tables/:table - Table download as CSV
async fn export_table(
    State(registry): State<AppState>,
    Path((id, table)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let mut body = Vec::new();
    registry.get(&id)?.export_csv(&table, &mut body)?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}.csv\"", table)),
    ];
    Ok((headers, body))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(registry: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/dashboards", get(list_dashboards))
        .route("/dashboards/:id/sidebar", get(get_sidebar))
        .route("/dashboards/:id/views/:view", get(get_view))
        .route("/dashboards/:id/tables", get(list_tables))
        .route("/dashboards/:id/tables/:table", get(export_table));

    Router::new()
        .route("/", get(serve_index))
        .route("/d/:dashboard", get(serve_dashboard))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}
