//! DTOs de facturas y pagos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::invoice::Invoice;

/// Response de factura
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub service_record_id: Uuid,
    pub invoice_number: String,
    pub amount: Decimal,
    pub payment_status: String,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            service_record_id: invoice.service_record_id,
            invoice_number: invoice.invoice_number,
            amount: invoice.amount,
            payment_status: invoice.payment_status,
            payment_date: invoice.payment_date,
            created_at: invoice.created_at,
        }
    }
}

/// Response de un intento de pago: `paid` o `already_paid`
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub amount: Decimal,
    pub status: String,
    pub payment_date: Option<DateTime<Utc>>,
}
