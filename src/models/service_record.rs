//! Modelo de ServiceRecord
//!
//! El record es el hecho inmutable de un servicio completado. Una vez
//! creado solo admite soft-delete; el monto de la factura se copia de
//! `total_amount` en el momento de la emisión y nunca se recalcula.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// ServiceRecord - mapea exactamente a la tabla service_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRecord {
    pub id: Uuid,
    // Secuencia monótona usada para el sufijo del número de factura
    pub record_seq: i64,
    pub service_request_id: Uuid,
    pub vehicle_id: Uuid,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub parts_replaced: Option<String>,
    pub labor_charge: Decimal,
    pub additional_cost: Decimal,
    pub total_amount: Decimal,
    pub service_notes: Option<String>,
    pub odometer_reading: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}
