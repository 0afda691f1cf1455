//! Repositorio de recordatorios de servicio
//!
//! El upsert transaccional vive en `services::reminder_service`; aquí están
//! las lecturas para los listados de vencimientos.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::reminder::ServiceReminder;
use crate::utils::errors::AppError;

pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Recordatorio vigente (el más reciente no borrado) del vehículo
    pub async fn find_current_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<ServiceReminder>, AppError> {
        let reminder = sqlx::query_as::<_, ServiceReminder>(
            r#"
            SELECT * FROM service_reminders
            WHERE vehicle_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    /// Todos los recordatorios no borrados, para el listado global de vencimientos
    pub async fn find_all_current(&self) -> Result<Vec<ServiceReminder>, AppError> {
        let reminders = sqlx::query_as::<_, ServiceReminder>(
            r#"
            SELECT DISTINCT ON (vehicle_id) *
            FROM service_reminders
            WHERE is_deleted = FALSE
            ORDER BY vehicle_id, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }
}
