use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::service_controller::ServiceController;
use crate::dto::common::ApiResponse;
use crate::dto::invoice_dto::PaymentResponse;
use crate::dto::service_dto::{
    CompleteServiceRequest, CompletionResponse, ServiceHistoryResponse, ServiceRequestResponse,
    SubmitServiceRequest, UpdateStatusRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/request", post(submit_request))
        .route("/request", get(list_requests))
        .route("/request/:id", get(get_request))
        .route("/request/:id/status", put(update_request_status))
        .route("/request/:id/complete", post(complete_request))
        .route("/request/:id/mark-paid", post(mark_request_paid))
        .route("/history/:vehicle_id", get(service_history))
}

async fn submit_request(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SubmitServiceRequest>,
) -> Result<Json<ApiResponse<ServiceRequestResponse>>, AppError> {
    let controller = ServiceController::new(state.pool.clone(), state.config.clone());
    let response = controller.submit(&user, request).await?;
    Ok(Json(response))
}

async fn list_requests(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<ServiceRequestResponse>>, AppError> {
    let controller = ServiceController::new(state.pool.clone(), state.config.clone());
    let response = controller.list(&user).await?;
    Ok(Json(response))
}

async fn get_request(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceRequestResponse>, AppError> {
    let controller = ServiceController::new(state.pool.clone(), state.config.clone());
    let response = controller.get_by_id(id, &user).await?;
    Ok(Json(response))
}

async fn update_request_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ServiceRequestResponse>, AppError> {
    let controller = ServiceController::new(state.pool.clone(), state.config.clone());
    let response = controller.update_status(id, &user, request).await?;
    Ok(Json(response))
}

async fn complete_request(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteServiceRequest>,
) -> Result<Json<ApiResponse<CompletionResponse>>, AppError> {
    let controller = ServiceController::new(state.pool.clone(), state.config.clone());
    let response = controller.complete(id, &user, request).await?;
    Ok(Json(response))
}

async fn mark_request_paid(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, AppError> {
    let controller = ServiceController::new(state.pool.clone(), state.config.clone());
    let response = controller.mark_paid(id, &user).await?;
    Ok(Json(response))
}

async fn service_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<ServiceHistoryResponse>, AppError> {
    let controller = ServiceController::new(state.pool.clone(), state.config.clone());
    let response = controller.history(vehicle_id, &user).await?;
    Ok(Json(response))
}
