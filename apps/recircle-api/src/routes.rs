use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recircle_service::{
	CancelPickupResponse, CreatePickupRequest, CreatePickupResponse, Error as ServiceError,
	ListPickupsResponse, PickupView, UpdateStatusRequest, UpdateStatusResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/pickups", post(create_pickup))
		.route("/v1/pickups/user/{user_id}", get(list_pickups))
		.route("/v1/pickups/{pickup_id}", get(fetch_pickup))
		.route("/v1/pickups/{pickup_id}/cancel", post(cancel_pickup))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/pickups/{pickup_id}/status", post(update_status))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn create_pickup(
	State(state): State<AppState>,
	Json(payload): Json<CreatePickupRequest>,
) -> Result<(StatusCode, Json<CreatePickupResponse>), ApiError> {
	let response = state.service.create_pickup(payload).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

async fn list_pickups(
	State(state): State<AppState>,
	Path(user_id): Path<i64>,
) -> Result<Json<ListPickupsResponse>, ApiError> {
	let response = state.service.list_pickups(user_id).await?;

	Ok(Json(response))
}

async fn fetch_pickup(
	State(state): State<AppState>,
	Path(pickup_id): Path<Uuid>,
) -> Result<Json<PickupView>, ApiError> {
	let response = state.service.fetch_pickup(pickup_id).await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct CancelPickupBody {
	user_id: i64,
}

async fn cancel_pickup(
	State(state): State<AppState>,
	Path(pickup_id): Path<Uuid>,
	Json(payload): Json<CancelPickupBody>,
) -> Result<Json<CancelPickupResponse>, ApiError> {
	let response = state.service.cancel_pickup(pickup_id, payload.user_id).await?;

	Ok(Json(response))
}

async fn update_status(
	State(state): State<AppState>,
	Path(pickup_id): Path<Uuid>,
	Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
	let response = state.service.update_pickup_status(pickup_id, payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::AccessDenied { message } =>
				Self::new(StatusCode::FORBIDDEN, "access_denied", message),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "not_found", message),
			ServiceError::Storage { message } => {
				tracing::error!(%message, "Storage failure while handling request.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message)
			},
			ServiceError::LookaheadExhausted { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "scheduling_exhausted", err.to_string()),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
