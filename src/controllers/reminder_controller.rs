//! Controller de recordatorios
//!
//! El listado de vencimientos evalúa `is_due` contra el odómetro vivo de
//! cada vehículo y `is_due_soon` contra la ventana configurada.

use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::dto::reminder_dto::{DueReminderEntry, DueReminderQuery, VehicleSummary};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::reminder::ServiceReminder;
use crate::models::vehicle::Vehicle;
use crate::repositories::reminder_repository::ReminderRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct ReminderController {
    reminders: ReminderRepository,
    vehicles: VehicleRepository,
    config: EnvironmentConfig,
}

impl ReminderController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            reminders: ReminderRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            config,
        }
    }

    /// Listar recordatorios con su evaluación de vencimiento.
    ///
    /// Con `vehicle_id` el alcance es ese vehículo (propietario o staff);
    /// sin él se listan todos los vehículos (solo staff).
    pub async fn list_due(
        &self,
        user: &AuthenticatedUser,
        query: DueReminderQuery,
    ) -> Result<Vec<DueReminderEntry>, AppError> {
        let window_days = query.window_days.unwrap_or(self.config.reminder_window_days);
        let today = Utc::now().date_naive();

        let (reminders, vehicles): (Vec<ServiceReminder>, Vec<Vehicle>) = match query.vehicle_id {
            Some(vehicle_id) => {
                let vehicle = self
                    .vehicles
                    .find_by_id(vehicle_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Vehicle with id '{}' not found", vehicle_id))
                    })?;

                if !vehicle.is_owned_by(user.user_id) && !user.is_staff() {
                    return Err(AppError::Forbidden(
                        "You do not have access to this vehicle".to_string(),
                    ));
                }

                let reminder = self.reminders.find_current_by_vehicle(vehicle_id).await?;
                (reminder.into_iter().collect(), vec![vehicle])
            }
            None => {
                user.require_staff()?;
                let reminders = self.reminders.find_all_current().await?;
                let vehicle_ids: Vec<Uuid> =
                    reminders.iter().map(|r| r.vehicle_id).collect();
                let vehicles = self.vehicles.find_by_ids(&vehicle_ids).await?;
                (reminders, vehicles)
            }
        };

        let vehicles_by_id: HashMap<Uuid, Vehicle> =
            vehicles.into_iter().map(|v| (v.id, v)).collect();

        let mut entries = Vec::with_capacity(reminders.len());
        for reminder in reminders {
            // Recordatorios de vehículos ya borrados no entran al listado
            let Some(vehicle) = vehicles_by_id.get(&reminder.vehicle_id) else {
                continue;
            };

            let is_due = reminder.is_due(today, vehicle.current_odometer);
            let is_due_soon = reminder.is_due_soon(today, window_days);

            entries.push(DueReminderEntry {
                vehicle: VehicleSummary {
                    id: vehicle.id,
                    registration_number: vehicle.registration_number.clone(),
                    brand: vehicle.brand.clone(),
                    model: vehicle.model.clone(),
                    current_odometer: vehicle.current_odometer,
                },
                reminder: reminder.into(),
                is_due,
                is_due_soon,
            });
        }

        Ok(entries)
    }
}
