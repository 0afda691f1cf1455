//! Modelo de Document
//!
//! Metadatos de documentos del vehículo (seguro, registro, etc.). El
//! almacenamiento del archivo en sí vive fuera de este servicio; aquí solo
//! se guarda la referencia y la fecha de vencimiento.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Document - mapea exactamente a la tabla documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub document_type: String,
    pub file_path: String,
    pub expiry_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Document {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        match self.expiry_date {
            Some(expiry) => today > expiry,
            None => false,
        }
    }

    pub fn is_expiring_soon(&self, today: NaiveDate, window_days: i64) -> bool {
        match self.expiry_date {
            Some(expiry) => {
                let days_until = (expiry - today).num_days();
                0 <= days_until && days_until <= window_days
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(expiry: Option<NaiveDate>) -> Document {
        Document {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            document_type: "Insurance".to_string(),
            file_path: "insurance_2024.pdf".to_string(),
            expiry_date: expiry,
            description: None,
            created_at: Utc::now(),
            is_deleted: false,
        }
    }

    #[test]
    fn test_expiry() {
        let d = document(NaiveDate::from_ymd_opt(2024, 6, 15));
        assert!(!d.is_expired(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
        assert!(d.is_expired(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()));
    }

    #[test]
    fn test_expiring_soon_window() {
        let d = document(NaiveDate::from_ymd_opt(2024, 6, 15));
        assert!(d.is_expiring_soon(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 30));
        assert!(d.is_expiring_soon(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), 30));
        assert!(!d.is_expiring_soon(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 30));
        assert!(!d.is_expiring_soon(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(), 30));
    }

    #[test]
    fn test_no_expiry_date() {
        let d = document(None);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(!d.is_expired(today));
        assert!(!d.is_expiring_soon(today, 30));
    }
}
