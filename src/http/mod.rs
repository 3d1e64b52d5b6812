use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Extension, FromRequest, Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    admin_password::verify_admin_password,
    config::Config,
    domain::{Application, DomainError, NewApplication},
    notify,
    store::ApplicationStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Mutex<ApplicationStore>>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::MissingApplication { .. } => ApiError::not_found(value.to_string()),
            DomainError::MissingField { .. }
            | DomainError::InvalidTimeRange { .. }
            | DomainError::InvalidParticipants { .. }
            | DomainError::InvalidStatus { .. } => ApiError::invalid_request(value.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S>,
    <axum::Json<T> as FromRequest<S>>::Rejection: std::fmt::Display,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;
        Ok(Self(value))
    }
}

#[derive(Deserialize)]
struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitApplicationResponse {
    success: bool,
    message: String,
    application_id: u64,
}

#[derive(Serialize)]
struct ListApplicationsResponse {
    success: bool,
    applications: Vec<Application>,
}

#[derive(Deserialize)]
struct UpdateStatusRequest {
    status: String,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Serialize)]
struct UpdateStatusResponse {
    success: bool,
    message: String,
    application: Application,
}

pub fn build_router(config: Config, store: Arc<Mutex<ApplicationStore>>) -> Router {
    let auth_state = AdminAuthState {
        admin_password: config.admin_password().map(str::to_string),
    };
    let app_state = AppState {
        config: Arc::new(config),
        store,
    };

    // `/login` is added after the auth layer so it stays public; everything
    // registered before the layer requires the bearer credential.
    let admin = Router::new()
        .route("/applications", get(admin_list_applications))
        .route(
            "/applications/:id/status",
            put(admin_update_application_status),
        )
        .layer(middleware::from_fn_with_state(auth_state, admin_auth))
        .route("/login", post(admin_login));

    let api = Router::new()
        .route("/health", get(health))
        .route("/application", post(submit_application))
        .nest("/admin", admin)
        .fallback(fallback_not_found);

    Router::new().nest("/api", api).layer(Extension(app_state))
}

#[derive(Clone)]
struct AdminAuthState {
    admin_password: Option<String>,
}

async fn admin_auth(
    State(auth): State<AdminAuthState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(credential) = extract_bearer_token(req.headers()) else {
        return ApiError::unauthorized("missing or invalid admin credential").into_response();
    };
    if verify_admin_password(&credential, auth.admin_password.as_deref()) {
        return next.run(req).await;
    }
    ApiError::unauthorized("missing or invalid admin credential").into_response()
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?;
    let raw = raw.to_str().ok()?;
    let raw = raw.strip_prefix("Bearer ")?;
    Some(raw.to_string())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit_application(
    Extension(state): Extension<AppState>,
    ApiJson(new): ApiJson<NewApplication>,
) -> Result<Json<SubmitApplicationResponse>, ApiError> {
    let application = {
        let mut store = state.store.lock().await;
        store.submit(new)?
    };
    notify::send_confirmation(&state.config, &application);
    Ok(Json(SubmitApplicationResponse {
        success: true,
        message: "application received; a confirmation email has been sent".to_string(),
        application_id: application.id,
    }))
}

async fn admin_login(
    Extension(state): Extension<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // No session is minted; the password itself stays the bearer credential.
    if !verify_admin_password(&req.password, state.config.admin_password()) {
        return Err(ApiError::unauthorized("invalid admin password"));
    }
    Ok(Json(LoginResponse {
        success: true,
        message: "login successful".to_string(),
    }))
}

async fn admin_list_applications(
    Extension(state): Extension<AppState>,
) -> Result<Json<ListApplicationsResponse>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(ListApplicationsResponse {
        success: true,
        applications: store.list(),
    }))
}

async fn admin_update_application_status(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    let application = {
        let mut store = state.store.lock().await;
        store.update_status(id, &req.status, req.notes)?
    };
    info!(
        application_id = application.id,
        status = application.status.as_str(),
        "application status updated"
    );
    Ok(Json(UpdateStatusResponse {
        success: true,
        message: format!(
            "application status updated to {}",
            application.status.as_str()
        ),
        application,
    }))
}

async fn fallback_not_found() -> ApiError {
    ApiError::not_found("not found")
}
