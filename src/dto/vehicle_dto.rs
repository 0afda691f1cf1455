//! DTOs de vehículos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;
use crate::utils::validation::validate_registration_number;

/// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterVehicleRequest {
    #[validate(custom = "validate_registration_number")]
    pub registration_number: String,

    #[validate(length(min = 1, max = 50))]
    pub brand: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: String,

    #[validate(range(min = 1900, max = 2100))]
    pub manufacturing_year: i32,

    #[validate(range(min = 0))]
    pub current_odometer: i32,
}

/// Request para editar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_registration_number")]
    pub registration_number: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub manufacturing_year: Option<i32>,

    #[validate(range(min = 0))]
    pub current_odometer: Option<i32>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub registration_number: String,
    pub brand: String,
    pub model: String,
    pub fuel_type: String,
    pub manufacturing_year: i32,
    pub current_odometer: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            user_id: vehicle.user_id,
            registration_number: vehicle.registration_number,
            brand: vehicle.brand,
            model: vehicle.model,
            fuel_type: vehicle.fuel_type,
            manufacturing_year: vehicle.manufacturing_year,
            current_odometer: vehicle.current_odometer,
            created_at: vehicle.created_at,
        }
    }
}

/// Response del puntaje de salud
#[derive(Debug, Serialize)]
pub struct VehicleHealthResponse {
    pub vehicle_id: Uuid,
    pub health_score: i32,
}
