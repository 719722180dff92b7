use axum::{extract::State, Json};
use sea_orm::EntityTrait;
use serde_json::Value;

use crate::entities::document;
use crate::error::AppResult;
use crate::AppState;

/// Liveness probe
pub async fn health() -> &'static str {
    "API Running!"
}

/// Every document in the collection, unvalidated
pub async fn list_documents(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let documents = document::Entity::find().all(&state.db).await?;

    tracing::debug!(count = documents.len(), "Serving documents");

    Ok(Json(
        documents.into_iter().map(document::Model::into_json).collect(),
    ))
}
