//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea a la tabla vehicles.
//! El odómetro solo se muta a través de un servicio completado o una
//! edición directa del propietario.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub registration_number: String,
    pub brand: String,
    pub model: String,
    pub fuel_type: String,
    pub manufacturing_year: i32,
    pub current_odometer: i32,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Vehicle {
    /// Verificar si el principal puede operar sobre este vehículo
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
