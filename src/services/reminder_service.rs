//! Programación de recordatorios de servicio
//!
//! Este módulo calcula el próximo vencimiento (por fecha y/o kilometraje) y
//! mantiene el invariante de un solo recordatorio vigente por vehículo:
//! el upsert corre dentro de la transacción de finalización, con la fila del
//! vehículo ya bloqueada, y sobrescribe el recordatorio existente en lugar
//! de acumular duplicados.

use chrono::{Duration, NaiveDate, Utc};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::models::reminder::{ReminderType, ServiceReminder};
use crate::utils::errors::AppError;

/// Próxima fecha de servicio a partir de la última
pub fn next_service_date(last_service_date: NaiveDate, interval_days: i64) -> NaiveDate {
    last_service_date + Duration::days(interval_days)
}

/// Próxima lectura de odómetro a partir de la última, si se conoce
pub fn next_service_odometer(last_odometer: Option<i32>, interval_km: i32) -> Option<i32> {
    last_odometer.map(|o| o + interval_km)
}

/// Crear o actualizar el recordatorio vigente del vehículo.
///
/// Si existe un recordatorio no borrado se sobrescriben sus campos last/next
/// y se resetea `is_notified`; si no existe se crea uno de tipo `both`.
/// Debe llamarse con la fila del vehículo bloqueada en la transacción para
/// serializar el find-then-upsert por vehículo.
pub async fn upsert_reminder(
    tx: &mut Transaction<'_, Postgres>,
    vehicle_id: Uuid,
    service_date: NaiveDate,
    odometer_reading: Option<i32>,
    interval_days: i64,
    interval_km: i32,
) -> Result<Uuid, AppError> {
    let next_date = next_service_date(service_date, interval_days);
    let next_odometer = next_service_odometer(odometer_reading, interval_km);

    let existing = sqlx::query_as::<_, ServiceReminder>(
        r#"
        SELECT * FROM service_reminders
        WHERE vehicle_id = $1 AND is_deleted = FALSE
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(vehicle_id)
    .fetch_optional(&mut **tx)
    .await?;

    match existing {
        Some(reminder) => {
            sqlx::query(
                r#"
                UPDATE service_reminders
                SET last_service_date = $2,
                    last_service_odometer = $3,
                    next_service_date = $4,
                    next_service_odometer = $5,
                    is_notified = FALSE
                WHERE id = $1
                "#,
            )
            .bind(reminder.id)
            .bind(service_date)
            .bind(odometer_reading)
            .bind(next_date)
            .bind(next_odometer)
            .execute(&mut **tx)
            .await?;

            Ok(reminder.id)
        }
        None => {
            let id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO service_reminders
                    (id, vehicle_id, last_service_date, last_service_odometer,
                     next_service_date, next_service_odometer, reminder_type,
                     is_notified, created_at, is_deleted)
                VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, FALSE)
                "#,
            )
            .bind(id)
            .bind(vehicle_id)
            .bind(service_date)
            .bind(odometer_reading)
            .bind(next_date)
            .bind(next_odometer)
            .bind(ReminderType::Both.as_str())
            .bind(Utc::now())
            .execute(&mut **tx)
            .await?;

            Ok(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_service_date_default_interval() {
        let last = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            next_service_date(last, 180),
            NaiveDate::from_ymd_opt(2024, 8, 28).unwrap()
        );
    }

    #[test]
    fn test_next_service_odometer() {
        assert_eq!(next_service_odometer(Some(50_000), 10_000), Some(60_000));
        assert_eq!(next_service_odometer(None, 10_000), None);
    }
}
