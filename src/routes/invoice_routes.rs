use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::InvoiceController;
use crate::dto::invoice_dto::{InvoiceResponse, PaymentResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_invoice))
        .route("/:id/pay", post(pay_invoice))
}

async fn get_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.get_by_id(id, &user).await?;
    Ok(Json(response))
}

async fn pay_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.pay(id, &user).await?;
    Ok(Json(response))
}
