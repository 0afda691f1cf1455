//! Controller de vehículos

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    RegisterVehicleRequest, UpdateVehicleRequest, VehicleHealthResponse, VehicleResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::Vehicle;
use crate::repositories::record_repository::RecordRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::health_service;
use crate::utils::errors::{conflict_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
    records: RecordRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            records: RecordRepository::new(pool),
        }
    }

    /// El propietario o cualquier staff pueden operar sobre el vehículo
    fn check_access(vehicle: &Vehicle, user: &AuthenticatedUser) -> Result<(), AppError> {
        if vehicle.is_owned_by(user.user_id) || user.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have access to this vehicle".to_string(),
            ))
        }
    }

    pub async fn register(
        &self,
        user: &AuthenticatedUser,
        request: RegisterVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let registration_number = request.registration_number.trim().to_uppercase();

        if self
            .repository
            .registration_number_exists(&registration_number, None)
            .await?
        {
            return Err(conflict_error(
                "Vehicle",
                "registration number",
                &registration_number,
            ));
        }

        let vehicle = self
            .repository
            .create(
                user.user_id,
                registration_number,
                request.brand,
                request.model,
                request.fuel_type,
                request.manufacturing_year,
                request.current_odometer,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle registered successfully".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        Self::check_access(&vehicle, user)?;

        Ok(vehicle.into())
    }

    /// Listado: el staff ve todos los vehículos, el cliente solo los suyos
    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = if user.is_staff() {
            self.repository.find_all().await?
        } else {
            self.repository.find_by_owner(user.user_id).await?
        };

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        Self::check_access(&vehicle, user)?;

        let registration_number = request
            .registration_number
            .map(|r| r.trim().to_uppercase());

        // Verificar unicidad si cambia la matrícula
        if let Some(ref new_registration) = registration_number {
            if *new_registration != vehicle.registration_number
                && self
                    .repository
                    .registration_number_exists(new_registration, Some(id))
                    .await?
            {
                return Err(conflict_error(
                    "Vehicle",
                    "registration number",
                    new_registration,
                ));
            }
        }

        let updated = self
            .repository
            .update(
                id,
                registration_number,
                request.brand,
                request.model,
                request.fuel_type,
                request.manufacturing_year,
                request.current_odometer,
            )
            .await?;

        Ok(updated.into())
    }

    /// Soft-delete con cascada explícita sobre solicitudes, records,
    /// documentos y recordatorios del vehículo
    pub async fn delete(&self, id: Uuid, user: &AuthenticatedUser) -> Result<(), AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        Self::check_access(&vehicle, user)?;

        self.repository.soft_delete_cascade(id).await
    }

    /// Puntaje de salud calculado sobre el historial materializado
    pub async fn health(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<VehicleHealthResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        Self::check_access(&vehicle, user)?;

        let records = self.records.find_by_vehicle(id).await?;
        let today = Utc::now().date_naive();
        let health_score = health_service::calculate_vehicle_health_score(&records, today);

        Ok(VehicleHealthResponse {
            vehicle_id: id,
            health_score,
        })
    }
}
