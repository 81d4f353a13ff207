//! Item handlers.
//!
//! Each handler performs at most one repository call. Failures are returned
//! as [`ApiError`] and rendered by the dispatcher.

use serde_json::json;

use itemstore_core::envelope::Response;
use itemstore_core::item::{items_to_value, parse_item};

use crate::{handlers::ApiError, state::AppState};

// ============================================================================
// List Items
// ============================================================================

/// List every item in the table (GET).
pub async fn list_items(state: &AppState) -> Result<Response, ApiError> {
    let items = state.item_repo.scan().await?;

    tracing::info!(count = items.len(), "Listed items");

    Ok(Response::ok(&items_to_value(items)))
}

// ============================================================================
// Create Item
// ============================================================================

/// Create or overwrite a single item from the request body (POST).
pub async fn create_item(state: &AppState, body: Option<&str>) -> Result<Response, ApiError> {
    let item = parse_item(body)?;

    tracing::debug!(attributes = item.len(), "Received create item request");

    state.item_repo.put(&item).await?;

    tracing::info!(attributes = item.len(), "Created item");

    Ok(Response::ok(&json!({ "message": "Item created" })))
}
