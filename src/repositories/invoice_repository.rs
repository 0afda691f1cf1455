//! Repositorio de facturas
//!
//! La creación de facturas vive en el orquestador de finalización; el cambio
//! de estado de pago vive en el procesador de pagos. Aquí solo lecturas.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::invoice::Invoice;
use crate::utils::errors::AppError;

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn find_by_record(
        &self,
        service_record_id: Uuid,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE service_record_id = $1 AND is_deleted = FALSE",
        )
        .bind(service_record_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Factura de una solicitud, a través de su service record
    pub async fn find_by_request(
        &self,
        service_request_id: Uuid,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT i.* FROM invoices i
            JOIN service_records r ON r.id = i.service_record_id
            WHERE r.service_request_id = $1
            AND i.is_deleted = FALSE
            AND r.is_deleted = FALSE
            "#,
        )
        .bind(service_request_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }
}
