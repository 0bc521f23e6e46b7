//! Route handlers.
//!
//! Each handler moves its work onto the blocking pool. Reads take the
//! service's read lock, mutations the write lock, so two mutations never run
//! at once.

use crate::error::ApiError;
use crate::extract::FamilyContext;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hb_account_ordering::api::handler;
use hb_account_ordering::api::{CreateFamilyRequest, ReorderRequest};
use hb_account_ordering::{AccountOrderingApi, ErrorKind, NewAccount, SyncDispatch};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState<S> {
    pub service: Arc<RwLock<S>>,
    pub max_reorder_batch: usize,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            max_reorder_batch: self.max_reorder_batch,
        }
    }
}

async fn read<S, T, F>(state: &AppState<S>, op: F) -> Result<T, ApiError>
where
    S: Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&S) -> Result<T, ErrorKind> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || op(&*service.read()))
        .await
        .map_err(join_failed)?
        .map_err(ApiError)
}

async fn write<S, T, F>(state: &AppState<S>, op: F) -> Result<T, ApiError>
where
    S: Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&mut S) -> Result<T, ErrorKind> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || op(&mut *service.write()))
        .await
        .map_err(join_failed)?
        .map_err(ApiError)
}

fn join_failed(e: tokio::task::JoinError) -> ApiError {
    tracing::error!(error = ?e, "[gateway] Blocking task failed");
    ApiError(ErrorKind::Internal)
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "[gateway] Unreadable request body");
        ApiError(ErrorKind::BadInput)
    })
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hb-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn create_family<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let request: CreateFamilyRequest = parse_body(&body)?;
    let family = write(&state, move |service| handler::create_family(service, &request)).await?;
    Ok((StatusCode::CREATED, Json(family)))
}

pub async fn list_accounts<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let accounts = read(&state, move |service| handler::list_accounts(service, &family_id)).await?;
    Ok(Json(accounts))
}

pub async fn list_grouped<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let groups = read(&state, move |service| handler::list_grouped(service, &family_id)).await?;
    Ok(Json(groups))
}

pub async fn create_account<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let request: NewAccount = parse_body(&body)?;
    let account = write(&state, move |service| {
        handler::create_account(service, &family_id, request)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn find_account<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let account = read(&state, move |service| {
        handler::find_account(service, &family_id, &account_id)
    })
    .await?;
    Ok(Json(account))
}

pub async fn destroy_account<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
    Path(account_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    write(&state, move |service| {
        handler::destroy_account(service, &family_id, &account_id)
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /accounts/update_order`. Success and failure both carry no body.
pub async fn update_order<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
    body: Bytes,
) -> Result<StatusCode, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let request: ReorderRequest = parse_body(&body)?;
    let max = state.max_reorder_batch;
    write(&state, move |service| {
        handler::update_order(service, &family_id, &request, max)
    })
    .await?;
    Ok(StatusCode::OK)
}

fn dispatch_body(dispatch: SyncDispatch) -> Json<serde_json::Value> {
    let status = match dispatch {
        SyncDispatch::Enqueued => "enqueued",
        SyncDispatch::AlreadySyncing => "already_syncing",
    };
    Json(serde_json::json!({ "status": status }))
}

pub async fn sync_account<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let dispatch = read(&state, move |service| {
        handler::sync_account(service, &family_id, &account_id)
    })
    .await?;
    Ok((StatusCode::ACCEPTED, dispatch_body(dispatch)))
}

pub async fn sync_all<S>(
    State(state): State<AppState<S>>,
    FamilyContext(family_id): FamilyContext,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    let dispatch = read(&state, move |service| handler::sync_all(service, &family_id)).await?;
    Ok((StatusCode::ACCEPTED, dispatch_body(dispatch)))
}
