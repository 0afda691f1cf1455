use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::reminder_controller::ReminderController;
use crate::dto::reminder_dto::{DueReminderEntry, DueReminderQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reminder_router() -> Router<AppState> {
    Router::new().route("/due", get(list_due_reminders))
}

async fn list_due_reminders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DueReminderQuery>,
) -> Result<Json<Vec<DueReminderEntry>>, AppError> {
    let controller = ReminderController::new(state.pool.clone(), state.config.clone());
    let response = controller.list_due(&user, query).await?;
    Ok(Json(response))
}
