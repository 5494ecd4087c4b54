//! Item management handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, DbError, Item, ItemRepository, NewItem, Session};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Item response DTO — the external shape of a stored item.
///
/// Serializes as a mapping with keys `id`, `name`, `description`. The `id`
/// is assigned by the persistence layer and never supplied by a caller; an
/// absent description serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ItemResponse {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Item name
    #[schema(example = "Widget")]
    pub name: String,
    /// Optional description
    #[schema(example = "A very useful widget")]
    pub description: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}

impl ItemResponse {
    /// Build a response from a raw JSON mapping with keys `id`, `name` and
    /// `description`.
    ///
    /// The counterpart to `From<Item>`: callers pick the constructor that
    /// matches their source (a persisted entity or an untyped mapping), and
    /// both yield equivalent records for the same attribute values.
    pub fn from_mapping(map: &serde_json::Map<String, Value>) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let id = map.get("id").and_then(Value::as_i64);
        if id.is_none() {
            errors.push(FieldError::new("id", "required integer field"));
        }

        let name = map.get("name").and_then(Value::as_str);
        if name.is_none() {
            errors.push(FieldError::new("name", "required string field"));
        }

        let description = match map.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new("description", "must be a string or null"));
                None
            }
        };

        match (id, name) {
            (Some(id), Some(name)) if errors.is_empty() => Ok(Self {
                id,
                name: name.to_string(),
                description,
            }),
            _ => Err(errors),
        }
    }
}

/// A validation failure tied to a single field.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field
    #[schema(example = "name")]
    pub field: String,
    /// What was wrong with it
    #[schema(example = "required string field")]
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Create item request DTO.
///
/// `name` is optional at the JSON layer so that a missing value surfaces as
/// a field-level validation error rather than a generic decode failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// Item name (required)
    #[schema(example = "Widget")]
    pub name: Option<String>,
    /// Optional description
    #[schema(example = "A very useful widget")]
    pub description: Option<String>,
}

impl CreateItemRequest {
    fn validate(self) -> Result<NewItem, Vec<FieldError>> {
        validate_payload(self.name, self.description)
    }
}

/// Update item request DTO.
///
/// Same field set as [`CreateItemRequest`]; kept as a distinct named type so
/// the boundary distinguishes "accepted for creation" from "accepted for
/// replacement".
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    /// Item name (required)
    #[schema(example = "Updated Widget")]
    pub name: Option<String>,
    /// Optional description (null clears it)
    #[schema(example = "Updated description")]
    pub description: Option<String>,
}

impl UpdateItemRequest {
    fn validate(self) -> Result<NewItem, Vec<FieldError>> {
        validate_payload(self.name, self.description)
    }
}

fn validate_payload(
    name: Option<String>,
    description: Option<String>,
) -> Result<NewItem, Vec<FieldError>> {
    match name {
        Some(name) => Ok(NewItem { name, description }),
        None => Err(vec![FieldError::new("name", "required field is missing")]),
    }
}

/// Error response DTO
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Item not found")]
    pub error: String,
    /// Per-field validation failures, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub(crate) fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }
}

// =============================================================================
// Error mapping
// =============================================================================

fn internal_error(e: DbError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::message(e.to_string())),
    )
}

fn not_found_or_internal(e: DbError, id: i64) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        DbError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::message(format!("Item '{}' not found", id))),
        ),
        _ => internal_error(e),
    }
}

fn validation_error(fields: Vec<FieldError>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: "Validation failed".to_string(),
            fields: Some(fields),
        }),
    )
}

// =============================================================================
// Handlers
// =============================================================================
//
// Each handler opens exactly one session, scoped to the request. Writes are
// committed explicitly; on any error path the session is dropped and its
// transaction rolls back.

/// List all items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "List of items", body = Vec<ItemResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_items<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<ItemResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let mut session = state.db().session().await.map_err(internal_error)?;
    let items = state
        .db()
        .items()
        .list(&mut session)
        .await
        .map_err(internal_error)?;

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut session = state.db().session().await.map_err(internal_error)?;
    let item = state
        .db()
        .items()
        .get(&mut session, id)
        .await
        .map_err(|e| not_found_or_internal(e, id))?;

    Ok(Json(ItemResponse::from(item)))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_item<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), (StatusCode, Json<ErrorResponse>)> {
    let new_item = req.validate().map_err(validation_error)?;

    let mut session = state.db().session().await.map_err(internal_error)?;
    let item = state
        .db()
        .items()
        .insert(&mut session, &new_item)
        .await
        .map_err(internal_error)?;
    session.commit().await.map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Replace an existing item
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, (StatusCode, Json<ErrorResponse>)> {
    let new_item = req.validate().map_err(validation_error)?;

    let mut session = state.db().session().await.map_err(internal_error)?;
    let item = state
        .db()
        .items()
        .update(&mut session, id, &new_item)
        .await
        .map_err(|e| not_found_or_internal(e, id))?;
    session.commit().await.map_err(internal_error)?;

    Ok(Json(ItemResponse::from(item)))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let mut session = state.db().session().await.map_err(internal_error)?;
    state
        .db()
        .items()
        .delete(&mut session, id)
        .await
        .map_err(|e| not_found_or_internal(e, id))?;
    session.commit().await.map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}
