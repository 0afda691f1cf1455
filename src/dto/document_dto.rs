//! DTOs de documentos del vehículo

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::document::Document;

/// Request para registrar metadatos de un documento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 50))]
    pub document_type: String,

    #[validate(length(min = 1, max = 255))]
    pub file_path: String,

    pub expiry_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Filtros para documentos próximos a vencer
#[derive(Debug, Deserialize)]
pub struct ExpiringDocumentsQuery {
    pub days: Option<i64>,
}

/// Response de documento
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub document_type: String,
    pub file_path: String,
    pub expiry_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
}

impl DocumentResponse {
    pub fn from_document(document: Document, today: NaiveDate, window_days: i64) -> Self {
        let is_expired = document.is_expired(today);
        let is_expiring_soon = document.is_expiring_soon(today, window_days);
        Self {
            id: document.id,
            vehicle_id: document.vehicle_id,
            document_type: document.document_type,
            file_path: document.file_path,
            expiry_date: document.expiry_date,
            description: document.description,
            created_at: document.created_at,
            is_expired,
            is_expiring_soon,
        }
    }
}
