use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::document_controller::DocumentController;
use crate::dto::common::ApiResponse;
use crate::dto::document_dto::{CreateDocumentRequest, DocumentResponse, ExpiringDocumentsQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_document_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_document))
        .route("/expiring", get(expiring_documents))
        .route("/vehicle/:vehicle_id", get(list_vehicle_documents))
        .route("/:id", delete(delete_document))
}

async fn create_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let controller = DocumentController::new(state.pool.clone(), state.config.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_vehicle_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let controller = DocumentController::new(state.pool.clone(), state.config.clone());
    let response = controller.list_by_vehicle(vehicle_id, &user).await?;
    Ok(Json(response))
}

async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DocumentController::new(state.pool.clone(), state.config.clone());
    controller.delete(id, &user).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Document deleted successfully"
    })))
}

async fn expiring_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ExpiringDocumentsQuery>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let controller = DocumentController::new(state.pool.clone(), state.config.clone());
    let response = controller.expiring(&user, query).await?;
    Ok(Json(response))
}
