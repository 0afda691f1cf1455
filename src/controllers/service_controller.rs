//! Controller del flujo de servicio
//!
//! Envíos de solicitudes, transiciones de estado y finalización. La
//! finalización SIEMPRE pasa por el orquestador (`CompletionService`);
//! un flip directo del estado a `completed` por la ruta de transición
//! genérica se rechaza acá para forzar esa vía.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::common::ApiResponse;
use crate::dto::invoice_dto::PaymentResponse;
use crate::dto::service_dto::{
    CompleteServiceRequest, CompletionResponse, ServiceHistoryResponse, ServiceRecordResponse,
    ServiceRequestResponse, SubmitServiceRequest, UpdateStatusRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::service_request::RequestStatus;
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::record_repository::RecordRepository;
use crate::repositories::request_repository::RequestRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::completion_service::{CompletionInput, CompletionService};
use crate::services::invoice_service::PaymentService;
use crate::utils::errors::AppError;

pub struct ServiceController {
    requests: RequestRepository,
    records: RecordRepository,
    invoices: InvoiceRepository,
    vehicles: VehicleRepository,
    completion: CompletionService,
    payments: PaymentService,
}

impl ServiceController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            requests: RequestRepository::new(pool.clone()),
            records: RecordRepository::new(pool.clone()),
            invoices: InvoiceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            completion: CompletionService::new(pool.clone(), config),
            payments: PaymentService::new(pool),
        }
    }

    /// Enviar una solicitud de servicio para un vehículo propio
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        request: SubmitServiceRequest,
    ) -> Result<ApiResponse<ServiceRequestResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Vehicle with id '{}' not found",
                    request.vehicle_id
                ))
            })?;

        if !vehicle.is_owned_by(user.user_id) && !user.is_staff() {
            return Err(AppError::Forbidden(
                "You are not the owner of this vehicle".to_string(),
            ));
        }

        // La descripción libre solo aplica a servicios "Custom"
        let custom_description = if request.service_type == "Custom" {
            request.custom_service_description
        } else {
            None
        };

        let created = self
            .requests
            .create(
                vehicle.id,
                user.user_id,
                request.service_type,
                custom_description,
                request.preferred_date,
                request.preferred_time,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            created.into(),
            "Service request submitted successfully".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<ServiceRequestResponse, AppError> {
        let request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Service request with id '{}' not found", id))
            })?;

        if request.user_id != user.user_id && !user.is_staff() {
            return Err(AppError::Forbidden(
                "You do not have access to this service request".to_string(),
            ));
        }

        Ok(request.into())
    }

    /// Listado: el staff ve todas las solicitudes, el cliente solo las suyas
    pub async fn list(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<ServiceRequestResponse>, AppError> {
        let requests = if user.is_staff() {
            self.requests.find_all().await?
        } else {
            self.requests.find_by_user(user.user_id).await?
        };

        Ok(requests
            .into_iter()
            .map(ServiceRequestResponse::from)
            .collect())
    }

    /// Transicionar el estado de una solicitud (solo staff).
    ///
    /// Repetir el estado actual es un no-op. La transición a `completed`
    /// por esta vía se rechaza: los efectos de la finalización viven en
    /// el orquestador.
    pub async fn update_status(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        request: UpdateStatusRequest,
    ) -> Result<ServiceRequestResponse, AppError> {
        user.require_staff()?;
        request.validate()?;

        let target = RequestStatus::parse(&request.status).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown status '{}'", request.status))
        })?;

        let service_request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Service request with id '{}' not found", id))
            })?;

        let current = service_request.current_status().ok_or_else(|| {
            AppError::Internal(format!(
                "Service request '{}' has a corrupt status '{}'",
                id, service_request.status
            ))
        })?;

        if current == target {
            // No-op: ya está en el estado pedido
            return Ok(service_request.into());
        }

        if target == RequestStatus::Completed {
            return Err(AppError::InvalidTransition(
                "Completion must go through the completion endpoint".to_string(),
            ));
        }

        if !current.can_transition_to(target) {
            return Err(AppError::InvalidTransition(format!(
                "Cannot transition from '{}' to '{}'",
                current.as_str(),
                target.as_str()
            )));
        }

        let updated = self
            .requests
            .update_status(id, target, request.admin_notes)
            .await?;

        Ok(updated.into())
    }

    /// Completar un servicio (solo staff): delega en el orquestador transaccional
    pub async fn complete(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        request: CompleteServiceRequest,
    ) -> Result<ApiResponse<CompletionResponse>, AppError> {
        user.require_staff()?;
        request.validate()?;

        let input = CompletionInput {
            service_type: request.service_type,
            labor_charge: request.labor_charge,
            additional_cost: request.additional_cost,
            parts_replaced: request.parts_replaced,
            service_notes: request.service_notes,
            odometer_reading: request.odometer_reading,
        };

        let today = Utc::now().date_naive();
        let outcome = self.completion.complete(id, input, today).await?;

        Ok(ApiResponse::success_with_message(
            CompletionResponse {
                record_id: outcome.record_id,
                invoice_id: outcome.invoice_id,
                invoice_number: outcome.invoice_number,
                total_amount: outcome.total_amount,
            },
            "Service completed and invoice generated".to_string(),
        ))
    }

    /// Historial de servicios de un vehículo con el gasto acumulado
    pub async fn history(
        &self,
        vehicle_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<ServiceHistoryResponse, AppError> {
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

        let records = self.records.find_by_vehicle(vehicle_id).await?;
        let total_expenses: Decimal = records.iter().map(|r| r.total_amount).sum();

        Ok(ServiceHistoryResponse {
            vehicle_id,
            records: records
                .into_iter()
                .map(ServiceRecordResponse::from)
                .collect(),
            total_expenses,
        })
    }

    /// Registrar un pago en caja sobre la factura de una solicitud (solo staff)
    pub async fn mark_paid(
        &self,
        request_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<PaymentResponse, AppError> {
        user.require_staff()?;

        let invoice = self
            .invoices
            .find_by_request(request_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No invoice found for service request '{}'",
                    request_id
                ))
            })?;

        let (paid, outcome) = self.payments.pay(invoice.id).await?;

        Ok(PaymentResponse {
            invoice_id: paid.id,
            invoice_number: paid.invoice_number,
            amount: paid.amount,
            status: outcome.as_str().to_string(),
            payment_date: paid.payment_date,
        })
    }
}
