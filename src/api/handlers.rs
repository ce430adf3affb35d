use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;

use crate::core::PeekError;
use crate::registry::Registry;
use crate::table::{ROW_CEILING, RowFilter, Table, TableMetadata};

use super::error::ApiError;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn list_tables(State(registry): State<Arc<Registry>>) -> impl IntoResponse {
    Json(registry.describe().await)
}

pub async fn metadata(
    State(registry): State<Arc<Registry>>,
    Path(label): Path<String>,
) -> Result<Json<TableMetadata>, ApiError> {
    let mut table = lookup(&registry, &label).await?;
    let meta = run_blocking(move || {
        table.load_metadata()?;
        table.read_header()?;
        Ok(table.metadata())
    })
    .await?;
    Ok(Json(meta))
}

pub async fn head_rows(
    State(registry): State<Arc<Registry>>,
    Path(label): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let mut table = lookup(&registry, &label).await?;
    let count = parse_count(&params)?;
    let body = run_blocking(move || {
        let mut params = params;
        params.remove("count");
        let filter = RowFilter::from_params(&params, table.columns());
        table.query_head(count, &filter)
    })
    .await?;
    Ok(body)
}

pub async fn tail_rows(
    State(registry): State<Arc<Registry>>,
    Path(label): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let mut table = lookup(&registry, &label).await?;
    let count = parse_count(&params)?;
    let body = run_blocking(move || table.query_tail(count)).await?;
    Ok(body)
}

async fn lookup(registry: &Registry, label: &str) -> Result<Table, ApiError> {
    registry
        .lookup(label)
        .await
        .ok_or_else(|| ApiError(PeekError::LabelUnknown(label.to_string())))
}

/// The engine is synchronous blocking I/O; keep it off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PeekError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError(PeekError::IoFailure(format!("query task: {e}"))))?
        .map_err(ApiError)
}

/// `count` defaults to the row ceiling when absent. `count` is a reserved
/// query key; a column of that name cannot be filtered on.
fn parse_count(params: &HashMap<String, String>) -> Result<i64, PeekError> {
    match params.get("count") {
        None => Ok(ROW_CEILING as i64),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|e| PeekError::MalformedQuery(format!("count '{raw}': {e}"))),
    }
}
