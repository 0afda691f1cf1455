//! Emisión de facturas y procesamiento de pagos
//!
//! El número de factura es determinista a partir de la fecha de emisión y la
//! secuencia del service record: `INV-YYYYMMDD-NNNNNN`. Es único mientras las
//! secuencias de records lo sean, y ordenable por fecha a simple vista.
//!
//! El pago es un settlement instantáneo simulado: `pending -> paid` con
//! timestamp. Pagar una factura ya pagada es un no-op que reporta
//! "already paid", nunca un error; el timestamp original no se toca.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::invoice::{Invoice, PaymentStatus};
use crate::utils::errors::{AppError, AppResult};

/// Generar el número único de factura
pub fn generate_invoice_number(issue_date: NaiveDate, record_seq: i64) -> String {
    format!("INV-{}-{:06}", issue_date.format("%Y%m%d"), record_seq)
}

/// Emitir la factura de un service record dentro de la transacción de
/// finalización. El monto se copia tal cual del total del record y no se
/// recalcula nunca después.
pub async fn issue_invoice(
    tx: &mut Transaction<'_, Postgres>,
    service_record_id: Uuid,
    record_seq: i64,
    amount: Decimal,
    issue_date: NaiveDate,
) -> Result<Invoice, AppError> {
    let id = Uuid::new_v4();
    let invoice_number = generate_invoice_number(issue_date, record_seq);

    let invoice = sqlx::query_as::<_, Invoice>(
        r#"
        INSERT INTO invoices
            (id, service_record_id, invoice_number, amount, payment_status,
             payment_date, created_at, is_deleted)
        VALUES ($1, $2, $3, $4, $5, NULL, $6, FALSE)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(service_record_id)
    .bind(&invoice_number)
    .bind(amount)
    .bind(PaymentStatus::Pending.as_str())
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    Ok(invoice)
}

/// Resultado de un intento de pago
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Paid,
    AlreadyPaid,
}

impl PaymentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOutcome::Paid => "paid",
            PaymentOutcome::AlreadyPaid => "already_paid",
        }
    }
}

/// Procesador de pagos (settlement simulado)
pub struct PaymentService {
    pool: PgPool,
}

impl PaymentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Transicionar la factura `pending -> paid`, idempotente.
    ///
    /// El check-then-set corre con la fila bloqueada para no re-estampar
    /// `payment_date` ante pagos concurrentes.
    pub async fn pay(&self, invoice_id: Uuid) -> AppResult<(Invoice, PaymentOutcome)> {
        let mut tx = self.pool.begin().await?;

        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(invoice_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Invoice with id '{}' not found", invoice_id)))?;

        if invoice.is_paid() {
            tx.rollback().await?;
            tracing::info!("Invoice {} ya estaba pagada", invoice.invoice_number);
            return Ok((invoice, PaymentOutcome::AlreadyPaid));
        }

        let paid = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET payment_status = $2, payment_date = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(invoice.id)
        .bind(PaymentStatus::Paid.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Pago registrado: factura {} por {}",
            paid.invoice_number,
            paid.amount
        );
        Ok((paid, PaymentOutcome::Paid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(generate_invoice_number(date, 42), "INV-20240301-000042");
    }

    #[test]
    fn test_invoice_number_unique_per_record() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let a = generate_invoice_number(date, 1);
        let b = generate_invoice_number(date, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_invoice_number_sorts_by_date() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        // Con el mismo ancho de sufijo, el orden lexicográfico sigue la fecha
        assert!(generate_invoice_number(march, 999_999) < generate_invoice_number(april, 1));
    }

    #[test]
    fn test_payment_outcome_labels() {
        assert_eq!(PaymentOutcome::Paid.as_str(), "paid");
        assert_eq!(PaymentOutcome::AlreadyPaid.as_str(), "already_paid");
    }
}
