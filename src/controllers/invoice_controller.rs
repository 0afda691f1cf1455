//! Controller de facturas y pagos

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::invoice_dto::{InvoiceResponse, PaymentResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::invoice::Invoice;
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::record_repository::RecordRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::invoice_service::PaymentService;
use crate::utils::errors::AppError;

pub struct InvoiceController {
    invoices: InvoiceRepository,
    records: RecordRepository,
    vehicles: VehicleRepository,
    payments: PaymentService,
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            invoices: InvoiceRepository::new(pool.clone()),
            records: RecordRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            payments: PaymentService::new(pool),
        }
    }

    /// El acceso a una factura lo tiene el staff o el dueño del vehículo
    /// del service record facturado
    async fn check_access(
        &self,
        invoice: &Invoice,
        user: &AuthenticatedUser,
    ) -> Result<(), AppError> {
        if user.is_staff() {
            return Ok(());
        }

        let record = self
            .records
            .find_by_id(invoice.service_record_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Service record for invoice '{}' not found",
                    invoice.id
                ))
            })?;

        let vehicle = self
            .vehicles
            .find_by_id(record.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Vehicle with id '{}' not found", record.vehicle_id))
            })?;

        if vehicle.is_owned_by(user.user_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have access to this invoice".to_string(),
            ))
        }
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<InvoiceResponse, AppError> {
        let invoice = self
            .invoices
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invoice with id '{}' not found", id)))?;

        self.check_access(&invoice, user).await?;

        Ok(invoice.into())
    }

    /// Pago simulado e idempotente: una factura ya pagada reporta
    /// `already_paid` sin tocar el timestamp original
    pub async fn pay(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<PaymentResponse, AppError> {
        let invoice = self
            .invoices
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invoice with id '{}' not found", id)))?;

        self.check_access(&invoice, user).await?;

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
