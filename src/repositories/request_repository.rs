//! Repositorio de solicitudes de servicio

use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::service_request::{RequestStatus, ServiceRequest};
use crate::utils::errors::AppError;

pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
        service_type: String,
        custom_service_description: Option<String>,
        preferred_date: NaiveDate,
        preferred_time: Option<NaiveTime>,
    ) -> Result<ServiceRequest, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let request = sqlx::query_as::<_, ServiceRequest>(
            r#"
            INSERT INTO service_requests
                (id, vehicle_id, user_id, service_type, custom_service_description,
                 preferred_date, preferred_time, status, admin_notes,
                 created_at, updated_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, $9, $9, FALSE)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(user_id)
        .bind(service_type)
        .bind(custom_service_description)
        .bind(preferred_date)
        .bind(preferred_time)
        .bind(RequestStatus::Pending.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceRequest>, AppError> {
        let request = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<ServiceRequest>, AppError> {
        let requests = sqlx::query_as::<_, ServiceRequest>(
            r#"
            SELECT * FROM service_requests
            WHERE user_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find_all(&self) -> Result<Vec<ServiceRequest>, AppError> {
        let requests = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE is_deleted = FALSE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Persistir un cambio de estado ya validado por la máquina de estados
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
        admin_notes: Option<String>,
    ) -> Result<ServiceRequest, AppError> {
        let request = sqlx::query_as::<_, ServiceRequest>(
            r#"
            UPDATE service_requests
            SET status = $2, admin_notes = COALESCE($3, admin_notes), updated_at = $4
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(admin_notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service request with id '{}' not found", id)))?;

        Ok(request)
    }
}
