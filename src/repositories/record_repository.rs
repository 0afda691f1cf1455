//! Repositorio de service records
//!
//! Los records son inmutables post-creación (la creación vive en el
//! orquestador de finalización); aquí solo hay lecturas.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::service_record::ServiceRecord;
use crate::utils::errors::AppError;

pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceRecord>, AppError> {
        let record = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM service_records WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_request(
        &self,
        service_request_id: Uuid,
    ) -> Result<Option<ServiceRecord>, AppError> {
        let record = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM service_records WHERE service_request_id = $1 AND is_deleted = FALSE",
        )
        .bind(service_request_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Historial de servicios del vehículo, el más reciente primero
    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<ServiceRecord>, AppError> {
        let records = sqlx::query_as::<_, ServiceRecord>(
            r#"
            SELECT * FROM service_records
            WHERE vehicle_id = $1 AND is_deleted = FALSE
            ORDER BY service_date DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
