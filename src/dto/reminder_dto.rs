//! DTOs de recordatorios de servicio

use chrono::{NaiveDate, Utc, DateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::reminder::ServiceReminder;

/// Filtros para el listado de vencimientos
#[derive(Debug, Deserialize)]
pub struct DueReminderQuery {
    // Sin vehicle_id se listan todos los vehículos
    pub vehicle_id: Option<Uuid>,
    pub window_days: Option<i64>,
}

/// Response de un recordatorio
#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub last_service_date: Option<NaiveDate>,
    pub last_service_odometer: Option<i32>,
    pub next_service_date: Option<NaiveDate>,
    pub next_service_odometer: Option<i32>,
    pub reminder_type: String,
    pub is_notified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceReminder> for ReminderResponse {
    fn from(reminder: ServiceReminder) -> Self {
        Self {
            id: reminder.id,
            vehicle_id: reminder.vehicle_id,
            last_service_date: reminder.last_service_date,
            last_service_odometer: reminder.last_service_odometer,
            next_service_date: reminder.next_service_date,
            next_service_odometer: reminder.next_service_odometer,
            reminder_type: reminder.reminder_type,
            is_notified: reminder.is_notified,
            created_at: reminder.created_at,
        }
    }
}

/// Resumen de vehículo embebido en el listado de vencimientos
#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub registration_number: String,
    pub brand: String,
    pub model: String,
    pub current_odometer: i32,
}

/// Entrada del listado de vencimientos
#[derive(Debug, Serialize)]
pub struct DueReminderEntry {
    pub vehicle: VehicleSummary,
    pub reminder: ReminderResponse,
    pub is_due: bool,
    pub is_due_soon: bool,
}
