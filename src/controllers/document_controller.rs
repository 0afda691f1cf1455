//! Controller de documentos del vehículo
//!
//! Solo metadatos: el archivo en sí lo gestiona un colaborador externo.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::common::ApiResponse;
use crate::dto::document_dto::{CreateDocumentRequest, DocumentResponse, ExpiringDocumentsQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct DocumentController {
    documents: DocumentRepository,
    vehicles: VehicleRepository,
    config: EnvironmentConfig,
}

impl DocumentController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            documents: DocumentRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            config,
        }
    }

    async fn check_vehicle_access(
        &self,
        vehicle_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<(), AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Vehicle with id '{}' not found", vehicle_id))
            })?;

        if vehicle.is_owned_by(user.user_id) || user.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have access to this vehicle".to_string(),
            ))
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        request.validate()?;
        self.check_vehicle_access(request.vehicle_id, user).await?;

        let document = self
            .documents
            .create(
                request.vehicle_id,
                request.document_type,
                request.file_path,
                request.expiry_date,
                request.description,
            )
            .await?;

        let today = Utc::now().date_naive();
        Ok(ApiResponse::success_with_message(
            DocumentResponse::from_document(document, today, self.config.reminder_window_days),
            "Document registered successfully".to_string(),
        ))
    }

    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        self.check_vehicle_access(vehicle_id, user).await?;

        let documents = self.documents.find_by_vehicle(vehicle_id).await?;
        let today = Utc::now().date_naive();
        let window = self.config.reminder_window_days;

        Ok(documents
            .into_iter()
            .map(|d| DocumentResponse::from_document(d, today, window))
            .collect())
    }

    pub async fn delete(&self, id: Uuid, user: &AuthenticatedUser) -> Result<(), AppError> {
        let document = self
            .documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document with id '{}' not found", id)))?;

        self.check_vehicle_access(document.vehicle_id, user).await?;

        self.documents.soft_delete(id).await
    }

    /// Documentos vencidos o por vencer dentro de la ventana. El cliente ve
    /// los de sus vehículos; el staff ve todos.
    pub async fn expiring(
        &self,
        user: &AuthenticatedUser,
        query: ExpiringDocumentsQuery,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let window = query.days.unwrap_or(self.config.reminder_window_days);
        let today = Utc::now().date_naive();

        let documents = self.documents.find_with_expiry().await?;

        let owned: std::collections::HashSet<Uuid> = if user.is_staff() {
            documents.iter().map(|d| d.vehicle_id).collect()
        } else {
            self.vehicles
                .find_by_owner(user.user_id)
                .await?
                .into_iter()
                .map(|v| v.id)
                .collect()
        };

        Ok(documents
            .into_iter()
            .filter(|d| owned.contains(&d.vehicle_id))
            .filter(|d| d.is_expired(today) || d.is_expiring_soon(today, window))
            .map(|d| DocumentResponse::from_document(d, today, window))
            .collect())
    }
}
