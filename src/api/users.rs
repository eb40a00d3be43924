//! User endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, BirthdayQuery, Json, NameQuery, Path, Query, UserPayload};
use crate::domain::user::{User, UserId};

/// Routes mounted under `/users`
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/all", get(list_users))
        .route("/name", get(find_by_name))
        .route("/withAddresses", get(find_with_addresses))
        .route("/olderThan", get(find_older_than))
        .route("/messaging", post(send_messages))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// GET /users/all
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    debug!("Listing all users");

    let users = state.user_service.find_all().await?;

    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = id, "Getting user");

    let user = state
        .user_service
        .find_by_id(UserId::new(id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", id)))?;

    Ok(Json(user))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    debug!(login = %payload.login, "Creating user");
    payload.validate()?;

    let user = state.user_service.create(payload.into()).await?;

    Ok(Json(user))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = id, "Updating user");
    payload.validate()?;

    let user = state
        .user_service
        .update(UserId::new(id), payload.into())
        .await?;

    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = id, "Deleting user");

    let user = state.user_service.delete(UserId::new(id)).await?;

    Ok(Json(user))
}

/// GET /users/name?firstName=&lastName=
pub async fn find_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    debug!(first_name = %query.first_name, last_name = %query.last_name, "Finding users by name");

    let users = state
        .user_service
        .find_by_first_name_and_last_name(&query.first_name, &query.last_name)
        .await?;

    Ok(Json(users))
}

/// GET /users/withAddresses
pub async fn find_with_addresses(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.user_service.find_with_addresses().await?;

    Ok(Json(users))
}

/// GET /users/olderThan?date=YYYY-MM-DD
pub async fn find_older_than(
    State(state): State<AppState>,
    Query(query): Query<BirthdayQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    debug!(date = %query.date, "Finding users born before date");

    let users = state.user_service.find_born_before(query.date).await?;

    Ok(Json(users))
}

/// POST /users/messaging
pub async fn send_messages(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let recipients = state.user_service.send_message_to_gmail_users().await?;
    debug!(recipients, "Gmail users notified");

    Ok(StatusCode::OK)
}
