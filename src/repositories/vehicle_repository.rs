//! Repositorio de vehículos
//!
//! El soft-delete de un vehículo cascadea explícitamente sobre sus
//! solicitudes, records, documentos y recordatorios, en una sola transacción.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        registration_number: String,
        brand: String,
        model: String,
        fuel_type: String,
        manufacturing_year: i32,
        current_odometer: i32,
    ) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles
                (id, user_id, registration_number, brand, model, fuel_type,
                 manufacturing_year, current_odometer, created_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(registration_number)
        .bind(brand)
        .bind(model)
        .bind(fuel_type)
        .bind(manufacturing_year)
        .bind(current_odometer)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = ANY($1) AND is_deleted = FALSE",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE user_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE is_deleted = FALSE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn registration_number_exists(
        &self,
        registration_number: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE registration_number = $1
                AND is_deleted = FALSE
                AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(registration_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        registration_number: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        fuel_type: Option<String>,
        manufacturing_year: Option<i32>,
        current_odometer: Option<i32>,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET registration_number = $2, brand = $3, model = $4,
                fuel_type = $5, manufacturing_year = $6, current_odometer = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(registration_number.unwrap_or(current.registration_number))
        .bind(brand.unwrap_or(current.brand))
        .bind(model.unwrap_or(current.model))
        .bind(fuel_type.unwrap_or(current.fuel_type))
        .bind(manufacturing_year.unwrap_or(current.manufacturing_year))
        .bind(current_odometer.unwrap_or(current.current_odometer))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Soft-delete del vehículo con cascada explícita sobre sus entidades
    /// dependientes. Todo o nada.
    pub async fn soft_delete_cascade(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(
            "UPDATE vehicles SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Vehicle with id '{}' not found",
                id
            )));
        }

        sqlx::query("UPDATE service_requests SET is_deleted = TRUE WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE service_records SET is_deleted = TRUE WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE documents SET is_deleted = TRUE WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE service_reminders SET is_deleted = TRUE WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
