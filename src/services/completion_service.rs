//! Orquestador de finalización de servicio
//!
//! Este módulo es el corazón transaccional del sistema: al completar una
//! solicitud se crea el service record, se pasa la solicitud a `completed`,
//! se actualiza el odómetro, se emite la factura y se actualiza el
//! recordatorio del vehículo, todo como una sola unidad atómica. Si algún
//! paso falla no persiste nada.
//!
//! La doble finalización se previene con la fila de la solicitud bloqueada
//! (`FOR UPDATE`) más la constraint UNIQUE sobre `service_request_id`: una
//! carrera perdida contra la constraint se reporta como `AlreadyCompleted`,
//! nunca como error crudo de storage.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::models::service_record::ServiceRecord;
use crate::models::service_request::{RequestStatus, ServiceRequest};
use crate::models::vehicle::Vehicle;
use crate::services::{invoice_service, reminder_service};
use crate::utils::errors::{AppError, AppResult};

/// Datos de entrada para completar un servicio
#[derive(Debug, Clone)]
pub struct CompletionInput {
    pub service_type: String,
    pub labor_charge: Decimal,
    pub additional_cost: Decimal,
    pub parts_replaced: Option<String>,
    pub service_notes: Option<String>,
    pub odometer_reading: Option<i32>,
}

/// Resultado de una finalización exitosa
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub record_id: Uuid,
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub total_amount: Decimal,
}

/// Servicio de finalización: record + factura + recordatorio en una transacción
pub struct CompletionService {
    pool: PgPool,
    config: EnvironmentConfig,
}

impl CompletionService {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }

    /// Completar una solicitud de servicio.
    ///
    /// Precondiciones: la solicitud existe, no está borrada y no tiene ya un
    /// service record. Los cargos negativos se rechazan antes de escribir.
    pub async fn complete(
        &self,
        request_id: Uuid,
        input: CompletionInput,
        today: NaiveDate,
    ) -> AppResult<CompletionOutcome> {
        // Validación previa a cualquier escritura
        if input.labor_charge < Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "labor_charge cannot be negative".to_string(),
            ));
        }
        if input.additional_cost < Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "additional_cost cannot be negative".to_string(),
            ));
        }

        let total_amount = input.labor_charge + input.additional_cost;

        let mut tx = self.pool.begin().await?;

        // Bloquear la solicitud serializa las finalizaciones por request id
        let service_request = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Service request with id '{}' not found", request_id))
        })?;

        // Guard de idempotencia: un record por solicitud, para siempre
        let already_completed: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM service_records WHERE service_request_id = $1 AND is_deleted = FALSE)",
        )
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_completed.0 {
            return Err(AppError::AlreadyCompleted(format!(
                "Service request '{}' already has a service record",
                request_id
            )));
        }

        // Bloquear el vehículo serializa el upsert del recordatorio por vehículo
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(service_request.vehicle_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Vehicle with id '{}' not found",
                service_request.vehicle_id
            ))
        })?;

        // Crear el service record con la fecha de hoy
        let record_id = Uuid::new_v4();
        let insert_result = sqlx::query_as::<_, ServiceRecord>(
            r#"
            INSERT INTO service_records
                (id, service_request_id, vehicle_id, service_date, service_type,
                 parts_replaced, labor_charge, additional_cost, total_amount,
                 service_notes, odometer_reading, created_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, FALSE)
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(service_request.id)
        .bind(service_request.vehicle_id)
        .bind(today)
        .bind(&input.service_type)
        .bind(&input.parts_replaced)
        .bind(input.labor_charge)
        .bind(input.additional_cost)
        .bind(total_amount)
        .bind(&input.service_notes)
        .bind(input.odometer_reading)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await;

        let record = insert_result.map_err(|e| classify_record_insert_error(e, request_id))?;

        // Pasar la solicitud a completed
        sqlx::query(
            "UPDATE service_requests SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(service_request.id)
        .bind(RequestStatus::Completed.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        // Actualizar odómetro si llegó lectura. Se acepta incluso una lectura
        // menor a la actual (brecha conocida de integridad de datos).
        if let Some(odometer) = input.odometer_reading {
            if odometer < vehicle.current_odometer {
                warn!(
                    "Odómetro del vehículo {} retrocede: {} -> {}",
                    vehicle.id, vehicle.current_odometer, odometer
                );
            }
            sqlx::query("UPDATE vehicles SET current_odometer = $2 WHERE id = $1")
                .bind(vehicle.id)
                .bind(odometer)
                .execute(&mut *tx)
                .await?;
        }

        // Emitir la factura con el total del record
        let invoice = invoice_service::issue_invoice(
            &mut tx,
            record.id,
            record.record_seq,
            record.total_amount,
            record.service_date,
        )
        .await?;

        // Crear o refrescar el recordatorio del vehículo
        reminder_service::upsert_reminder(
            &mut tx,
            vehicle.id,
            record.service_date,
            input.odometer_reading,
            self.config.service_interval_days,
            self.config.service_interval_km,
        )
        .await?;

        tx.commit().await?;

        info!(
            "Servicio completado: request {} -> record {} / factura {} por {}",
            request_id, record.id, invoice.invoice_number, invoice.amount
        );

        Ok(CompletionOutcome {
            record_id: record.id,
            invoice_id: invoice.id,
            invoice_number: invoice.invoice_number,
            total_amount: record.total_amount,
        })
    }
}

/// Clasificar el error del INSERT del record: una violación de la UNIQUE de
/// `service_request_id` es una carrera de finalización perdida, no un error
/// crudo de storage.
fn classify_record_insert_error(err: sqlx::Error, request_id: Uuid) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::AlreadyCompleted(format!(
                "Service request '{}' already has a service record",
                request_id
            ))
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::str::FromStr;

    #[derive(Debug)]
    struct StubDbError(&'static str);

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for StubDbError {}

    impl DatabaseError for StubDbError {
        fn message(&self) -> &str {
            self.0
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                "unique" => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn completion_input() -> CompletionInput {
        CompletionInput {
            service_type: "General Service".to_string(),
            labor_charge: Decimal::from_str("1200.00").unwrap(),
            additional_cost: Decimal::from_str("300.00").unwrap(),
            parts_replaced: Some("Oil filter".to_string()),
            service_notes: None,
            odometer_reading: Some(51_000),
        }
    }

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.expect("connect");
        crate::database::init_schema(&pool).await.expect("schema");
        pool
    }

    async fn seed_in_progress_request(pool: &PgPool) -> Uuid {
        let user_id = Uuid::new_v4();
        let vehicle_id = Uuid::new_v4();
        let request_id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO users (id, username, full_name, role) VALUES ($1, $2, $3, 'customer')",
        )
        .bind(user_id)
        .bind(format!("cliente-{}", user_id))
        .bind("Cliente de prueba")
        .execute(pool)
        .await
        .expect("seed user");

        sqlx::query(
            r#"
            INSERT INTO vehicles
                (id, user_id, registration_number, brand, model, fuel_type,
                 manufacturing_year, current_odometer)
            VALUES ($1, $2, $3, 'Toyota', 'Corolla', 'petrol', 2020, 50000)
            "#,
        )
        .bind(vehicle_id)
        .bind(user_id)
        .bind(format!(
            "TST-{}",
            &vehicle_id.simple().to_string()[..8].to_uppercase()
        ))
        .execute(pool)
        .await
        .expect("seed vehicle");

        sqlx::query(
            r#"
            INSERT INTO service_requests
                (id, vehicle_id, user_id, service_type, preferred_date, status)
            VALUES ($1, $2, $3, 'General Service', $4, 'in_progress')
            "#,
        )
        .bind(request_id)
        .bind(vehicle_id)
        .bind(user_id)
        .bind(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        .execute(pool)
        .await
        .expect("seed request");

        request_id
    }

    #[test]
    fn test_unique_violation_maps_to_already_completed() {
        let err = sqlx::Error::Database(Box::new(StubDbError("unique")));
        let mapped = classify_record_insert_error(err, Uuid::nil());
        assert!(matches!(mapped, AppError::AlreadyCompleted(_)));
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        let err = sqlx::Error::Database(Box::new(StubDbError("deadlock detected")));
        assert!(matches!(
            classify_record_insert_error(err, Uuid::nil()),
            AppError::Database(_)
        ));
        assert!(matches!(
            classify_record_insert_error(sqlx::Error::RowNotFound, Uuid::nil()),
            AppError::Database(_)
        ));
    }

    #[tokio::test]
    async fn test_negative_charge_rejected_before_touching_storage() {
        // Pool perezoso sin servidor detrás: si la validación no cortara
        // antes de abrir la transacción, el error sería de conexión
        let pool = PgPool::connect_lazy("postgres://localhost:1/nada").unwrap();
        let service = CompletionService::new(pool, EnvironmentConfig::default());

        let mut input = completion_input();
        input.labor_charge = Decimal::from_str("-0.01").unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = service
            .complete(Uuid::new_v4(), input, today)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));
    }

    #[tokio::test]
    #[ignore = "requiere un Postgres accesible vía DATABASE_URL"]
    async fn test_double_completion_is_rejected() {
        let pool = test_pool().await;
        let request_id = seed_in_progress_request(&pool).await;
        let service = CompletionService::new(pool, EnvironmentConfig::default());
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let first = service.complete(request_id, completion_input(), today).await;
        assert!(first.is_ok());

        let second = service.complete(request_id, completion_input(), today).await;
        assert!(matches!(second.unwrap_err(), AppError::AlreadyCompleted(_)));
    }

    #[tokio::test]
    #[ignore = "requiere un Postgres accesible vía DATABASE_URL"]
    async fn test_concurrent_completions_exactly_one_succeeds() {
        let pool = test_pool().await;
        let request_id = seed_in_progress_request(&pool).await;
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let service_a = CompletionService::new(pool.clone(), EnvironmentConfig::default());
        let service_b = CompletionService::new(pool, EnvironmentConfig::default());

        let (a, b) = tokio::join!(
            service_a.complete(request_id, completion_input(), today),
            service_b.complete(request_id, completion_input(), today),
        );

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        for result in [a, b] {
            if let Err(err) = result {
                assert!(matches!(err, AppError::AlreadyCompleted(_)));
            }
        }
    }

    #[test]
    fn test_total_is_exact_decimal_sum() {
        let labor = Decimal::from_str("1200.00").unwrap();
        let additional = Decimal::from_str("300.00").unwrap();
        let total = labor + additional;
        assert_eq!(total, Decimal::from_str("1500.00").unwrap());
        assert_eq!(total.to_string(), "1500.00");
    }

    #[test]
    fn test_negative_amount_detection() {
        let labor = Decimal::from_str("-0.01").unwrap();
        assert!(labor < Decimal::ZERO);
        assert!(Decimal::from_str("0.00").unwrap() >= Decimal::ZERO);
    }
}
