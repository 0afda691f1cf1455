//! DTOs de la API
//!
//! Requests y responses serializables, separados de los modelos de
//! persistencia.

pub mod common;
pub mod document_dto;
pub mod invoice_dto;
pub mod reminder_dto;
pub mod service_dto;
pub mod vehicle_dto;
