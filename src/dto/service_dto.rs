//! DTOs del flujo de servicio: solicitudes, transición de estado,
//! finalización e historial.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::service_record::ServiceRecord;
use crate::models::service_request::ServiceRequest;

/// Request para solicitar un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitServiceRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 100))]
    pub service_type: String,

    // Solo relevante cuando service_type es "Custom"
    pub custom_service_description: Option<String>,

    pub preferred_date: NaiveDate,
    pub preferred_time: Option<NaiveTime>,
}

/// Request para transicionar el estado de una solicitud
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, max = 20))]
    pub status: String,

    pub admin_notes: Option<String>,
}

/// Request para completar un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteServiceRequest {
    #[validate(length(min = 1, max = 100))]
    pub service_type: String,

    pub labor_charge: Decimal,
    pub additional_cost: Decimal,
    pub parts_replaced: Option<String>,
    pub service_notes: Option<String>,

    #[validate(range(min = 0))]
    pub odometer_reading: Option<i32>,
}

/// Response de una solicitud de servicio
#[derive(Debug, Serialize)]
pub struct ServiceRequestResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub service_type: String,
    pub custom_service_description: Option<String>,
    pub preferred_date: NaiveDate,
    pub preferred_time: Option<NaiveTime>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceRequest> for ServiceRequestResponse {
    fn from(request: ServiceRequest) -> Self {
        Self {
            id: request.id,
            vehicle_id: request.vehicle_id,
            user_id: request.user_id,
            service_type: request.service_type,
            custom_service_description: request.custom_service_description,
            preferred_date: request.preferred_date,
            preferred_time: request.preferred_time,
            status: request.status,
            admin_notes: request.admin_notes,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// Response de un service record
#[derive(Debug, Serialize)]
pub struct ServiceRecordResponse {
    pub id: Uuid,
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
}

impl From<ServiceRecord> for ServiceRecordResponse {
    fn from(record: ServiceRecord) -> Self {
        Self {
            id: record.id,
            service_request_id: record.service_request_id,
            vehicle_id: record.vehicle_id,
            service_date: record.service_date,
            service_type: record.service_type,
            parts_replaced: record.parts_replaced,
            labor_charge: record.labor_charge,
            additional_cost: record.additional_cost,
            total_amount: record.total_amount,
            service_notes: record.service_notes,
            odometer_reading: record.odometer_reading,
        }
    }
}

/// Response del historial de servicios de un vehículo
#[derive(Debug, Serialize)]
pub struct ServiceHistoryResponse {
    pub vehicle_id: Uuid,
    pub records: Vec<ServiceRecordResponse>,
    pub total_expenses: Decimal,
}

/// Response de una finalización exitosa
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub record_id: Uuid,
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub total_amount: Decimal,
}
