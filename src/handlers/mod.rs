//! Request orchestration: validate the shape, pre-check existence where the
//! operation targets an existing row, call the store, wrap the result.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Response;

use crate::models::{
    CancelRequest, CreateRequest, DeleteRequest, GetParams, ListParams, ListRequest,
    RescheduleRequest, UpdateRequest,
};
use crate::store::EventStore;
use crate::utils::{response, ApiError};
use crate::validation;

/// Shared handler state; the store is behind a trait object so any backend
/// can be wired in.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }
}

pub async fn get_event(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
) -> Result<Response, ApiError> {
    validation::require_id(&params.id)?;

    let event = state.store.get(&params.id).await?;

    Ok(response::event(event))
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let limit = validation::parse_limit(params.limit.as_deref())?;

    let request = ListRequest {
        limit,
        after: params.after.unwrap_or_default(),
        name: params.name.unwrap_or_default(),
    };

    let events = state.store.list(&request).await?;

    Ok(response::events(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: CreateRequest = validation::decode_body(&body)?;

    let event = request.event.as_ref().ok_or(ApiError::MissingEvent)?;
    validation::require_slot(event.slot.as_ref())?;

    let created = state.store.create(request).await?;

    Ok(response::event(created))
}

pub async fn update_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: UpdateRequest = validation::decode_body(&body)?;
    validation::require_id(&request.id)?;

    // The store silently no-ops on a missing id, so existence is checked
    // here to report NotFound.
    state.store.get(&request.id).await?;
    state.store.update(&request).await?;

    Ok(response::empty())
}

pub async fn cancel_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: CancelRequest = validation::decode_body(&body)?;
    validation::require_id(&request.id)?;

    state.store.get(&request.id).await?;
    state.store.cancel(&request.id).await?;

    Ok(response::empty())
}

pub async fn reschedule_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: RescheduleRequest = validation::decode_body(&body)?;
    validation::require_id(&request.id)?;
    let slot = validation::require_slot(request.new_time_slot.as_ref())?;

    state.store.get(&request.id).await?;
    state.store.reschedule(&request.id, slot).await?;

    Ok(response::empty())
}

pub async fn delete_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: DeleteRequest = validation::decode_body(&body)?;
    validation::require_id(&request.id)?;

    state.store.get(&request.id).await?;
    state.store.delete(&request.id).await?;

    Ok(response::empty())
}
