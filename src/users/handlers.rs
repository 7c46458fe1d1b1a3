//! HTTP handlers for the user resource.
//!
//! Each handler runs one pipeline: parse the path id and/or body, make exactly
//! one store call, map the outcome to a response. The body runs inside the
//! operation span and logs exactly one line per exit path.
//!
//! Bodies are decoded as JSON whatever the `Content-Type` header says.

use std::future::Future;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::Instrument;

use crate::http::response::{ApiError, MessageBody};
use crate::http::server::AppState;
use crate::observability::{operation_span, record_user_id};
use crate::users::model::{NewUser, User, UserId, UserPayload};
use crate::users::store::StoreError;
use crate::users::Operation;

type ApiResult<T> = Result<T, ApiError>;

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    async move {
        let user = NewUser::from(decode(body)?);

        let id = with_deadline(&state, state.store.insert(&user)).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert user");
            ApiError::Store(Operation::Create)
        })?;
        record_user_id(&id);

        tracing::info!(user.id = %id, "User created");
        Ok((StatusCode::CREATED, Json(user.with_id(id))))
    }
    .instrument(operation_span(Operation::Create, &headers))
    .await
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<User>> {
    async move {
        let id = parse_id(&raw_id)?;

        match with_deadline(&state, state.store.find_by_id(&id)).await {
            Ok(user) => {
                tracing::info!(user.id = %id, "User retrieved");
                Ok(Json(user))
            }
            Err(StoreError::NotFound) => Err(not_found(&id)),
            Err(e) => {
                tracing::error!(user.id = %id, error = %e, "Failed to get user");
                Err(ApiError::Store(Operation::Get))
            }
        }
    }
    .instrument(operation_span(Operation::Get, &headers))
    .await
}

/// `PUT /users/{id}`
///
/// Replaces both name and email; there is no partial update.
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<MessageBody>> {
    async move {
        let id = parse_id(&raw_id)?;
        let payload = decode(body)?;

        let replace = state.store.replace_fields(&id, &payload.name, &payload.email);
        let matched = with_deadline(&state, replace)
            .await
            .map_err(|e| {
                tracing::error!(user.id = %id, error = %e, "Failed to update user");
                ApiError::Store(Operation::Update)
            })?;
        if matched == 0 {
            return Err(not_found(&id));
        }

        tracing::info!(user.id = %id, "User updated");
        Ok(Json(MessageBody::new("User updated successfully")))
    }
    .instrument(operation_span(Operation::Update, &headers))
    .await
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    async move {
        let id = parse_id(&raw_id)?;

        let deleted = with_deadline(&state, state.store.delete(&id)).await.map_err(|e| {
            tracing::error!(user.id = %id, error = %e, "Failed to delete user");
            ApiError::Store(Operation::Delete)
        })?;
        if deleted == 0 {
            return Err(not_found(&id));
        }

        tracing::info!(user.id = %id, "User deleted");
        Ok(Json(MessageBody::new("User deleted successfully")))
    }
    .instrument(operation_span(Operation::Delete, &headers))
    .await
}

/// Parse the path id and attach it to the current span.
fn parse_id(raw: &str) -> ApiResult<UserId> {
    let id = UserId::parse(raw).map_err(|e| {
        tracing::error!(error = %e, "Invalid user ID");
        ApiError::InvalidId
    })?;
    record_user_id(&id);
    Ok(id)
}

fn decode(body: Result<Bytes, BytesRejection>) -> ApiResult<UserPayload> {
    let bytes = body.map_err(|rejection| {
        tracing::error!(error = %rejection.body_text(), "Failed to read user payload");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::InvalidInput(rejection.body_text())
        }
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(error = %e, "Failed to decode user payload");
        ApiError::InvalidInput(e.to_string())
    })
}

/// Bound one store call by the request deadline. Elapsing drops the call.
async fn with_deadline<T>(
    state: &AppState,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    tokio::time::timeout(state.store_timeout, call)
        .await
        .map_err(|_| {
            StoreError::Unavailable(format!("no reply within {}s", state.store_timeout.as_secs()))
        })?
}

fn not_found(id: &UserId) -> ApiError {
    tracing::warn!(user.id = %id, "User not found");
    ApiError::NotFound
}
