use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use discovery_domain::{filters::SearchFilters, provider::ProviderRecord};
use discovery_service::{Error as ServiceError, ModerateRequest, ModerateResponse, SearchPage};

#[derive(Debug, Deserialize)]
pub struct SlugRequest {
	pub first_name: String,
	pub last_name: String,
	#[serde(default)]
	pub specialty: Option<String>,
	#[serde(default)]
	pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlugResponse {
	pub slug: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "not_found", message, None),
			ServiceError::Provider { message } => {
				tracing::error!(error = %message, "Provider error surfaced to caller.");

				json_error(StatusCode::BAD_GATEWAY, "provider_error", message, None)
			},
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage error.");

				json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message, None)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/providers/search", post(search))
		.route("/v1/providers/slug", post(slug))
		.route("/v1/providers/{token}", get(resolve))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/moderate", post(moderate)).with_state(state)
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(filters): Json<SearchFilters>,
) -> Result<Json<SearchPage>, ApiError> {
	let page = state.service.search(filters).await?;

	Ok(Json(page))
}

async fn resolve(
	State(state): State<AppState>,
	Path(token): Path<String>,
) -> Result<Json<ProviderRecord>, ApiError> {
	match state.service.resolve_provider(&token).await? {
		Some(record) => Ok(Json(record)),
		None => Err(json_error(
			StatusCode::NOT_FOUND,
			"not_found",
			format!("No provider matches {token}."),
			None,
		)),
	}
}

async fn slug(
	State(state): State<AppState>,
	Json(payload): Json<SlugRequest>,
) -> Result<Json<SlugResponse>, ApiError> {
	let mut missing = Vec::new();

	if payload.first_name.trim().is_empty() {
		missing.push("$.first_name".to_string());
	}
	if payload.last_name.trim().is_empty() {
		missing.push("$.last_name".to_string());
	}
	if !missing.is_empty() {
		return Err(json_error(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			"first_name and last_name must be non-empty.",
			Some(missing),
		));
	}

	let slug = state.service.generate_slug(
		&payload.first_name,
		&payload.last_name,
		payload.specialty.as_deref(),
		payload.city.as_deref(),
	);

	Ok(Json(SlugResponse { slug }))
}

async fn moderate(
	State(state): State<AppState>,
	Json(payload): Json<ModerateRequest>,
) -> Result<Json<ModerateResponse>, ApiError> {
	let provider = state.service.moderate(&payload.provider_id, payload.status).await?;

	Ok(Json(ModerateResponse { provider }))
}
