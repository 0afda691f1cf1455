//! Modelo de ServiceReminder
//!
//! Como máximo existe un recordatorio vigente (no borrado) por vehículo:
//! la finalización de un servicio actualiza el existente en lugar de crear
//! duplicados. La evaluación de vencimiento recibe la fecha actual y el
//! odómetro vivo del vehículo como parámetros, nunca los consulta sola.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de recordatorio: por fecha, por kilometraje o ambos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Date,
    Km,
    Both,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::Date => "date",
            ReminderType::Km => "km",
            ReminderType::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date" => Some(ReminderType::Date),
            "km" => Some(ReminderType::Km),
            "both" => Some(ReminderType::Both),
            _ => None,
        }
    }

    pub fn includes_date(&self) -> bool {
        matches!(self, ReminderType::Date | ReminderType::Both)
    }

    pub fn includes_km(&self) -> bool {
        matches!(self, ReminderType::Km | ReminderType::Both)
    }
}

/// ServiceReminder - mapea exactamente a la tabla service_reminders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceReminder {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub last_service_date: Option<NaiveDate>,
    pub last_service_odometer: Option<i32>,
    pub next_service_date: Option<NaiveDate>,
    pub next_service_odometer: Option<i32>,
    pub reminder_type: String,
    pub is_notified: bool,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl ServiceReminder {
    fn kind(&self) -> ReminderType {
        ReminderType::parse(&self.reminder_type).unwrap_or(ReminderType::Date)
    }

    /// El recordatorio venció: por fecha (hoy >= próxima fecha) o por
    /// kilometraje (odómetro actual del vehículo >= próximo odómetro).
    /// El odómetro se compara contra la lectura viva, no la del último
    /// servicio; divergen si el vehículo rodó entre servicios.
    pub fn is_due(&self, today: NaiveDate, current_odometer: i32) -> bool {
        let kind = self.kind();
        if kind.includes_date() {
            if let Some(next_date) = self.next_service_date {
                if today >= next_date {
                    return true;
                }
            }
        }
        if kind.includes_km() {
            if let Some(next_odometer) = self.next_service_odometer {
                if current_odometer >= next_odometer {
                    return true;
                }
            }
        }
        false
    }

    /// Próximo a vencer dentro de la ventana (solo componente de fecha,
    /// incluso para recordatorios solo-km; comportamiento heredado).
    pub fn is_due_soon(&self, today: NaiveDate, window_days: i64) -> bool {
        if !self.kind().includes_date() {
            return false;
        }
        match self.next_service_date {
            Some(next_date) => {
                let days_until = (next_date - today).num_days();
                0 <= days_until && days_until <= window_days
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(kind: ReminderType) -> ServiceReminder {
        ServiceReminder {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            last_service_date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            last_service_odometer: Some(50_000),
            next_service_date: Some(NaiveDate::from_ymd_opt(2024, 8, 28).unwrap()),
            next_service_odometer: Some(60_000),
            reminder_type: kind.as_str().to_string(),
            is_notified: false,
            created_at: Utc::now(),
            is_deleted: false,
        }
    }

    #[test]
    fn test_due_by_date() {
        let r = reminder(ReminderType::Date);
        let before = NaiveDate::from_ymd_opt(2024, 8, 27).unwrap();
        let on = NaiveDate::from_ymd_opt(2024, 8, 28).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 9, 10).unwrap();

        assert!(!r.is_due(before, 0));
        assert!(r.is_due(on, 0));
        assert!(r.is_due(after, 0));
    }

    #[test]
    fn test_due_by_odometer_uses_live_reading() {
        let r = reminder(ReminderType::Km);
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        // La lectura viva manda, aunque el último servicio fuera a 50.000
        assert!(!r.is_due(today, 59_999));
        assert!(r.is_due(today, 60_000));
        assert!(r.is_due(today, 75_000));
    }

    #[test]
    fn test_due_both_either_condition() {
        let r = reminder(ReminderType::Both);
        let early = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();

        assert!(!r.is_due(early, 55_000));
        assert!(r.is_due(early, 60_000)); // solo km
        assert!(r.is_due(late, 55_000)); // solo fecha
    }

    #[test]
    fn test_due_soon_window() {
        let r = reminder(ReminderType::Both);
        assert!(r.is_due_soon(NaiveDate::from_ymd_opt(2024, 8, 28).unwrap(), 30)); // 0 días
        assert!(r.is_due_soon(NaiveDate::from_ymd_opt(2024, 7, 29).unwrap(), 30)); // 30 días
        assert!(!r.is_due_soon(NaiveDate::from_ymd_opt(2024, 7, 28).unwrap(), 30)); // 31 días
        assert!(!r.is_due_soon(NaiveDate::from_ymd_opt(2024, 8, 29).unwrap(), 30)); // ya vencido
    }

    #[test]
    fn test_due_soon_km_only_checks_date_window() {
        // Comportamiento heredado: los recordatorios solo-km nunca
        // reportan due-soon, aunque el odómetro esté al límite.
        let r = reminder(ReminderType::Km);
        let today = NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();
        assert!(!r.is_due_soon(today, 30));
    }
}
