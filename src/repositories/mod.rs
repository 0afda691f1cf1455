//! Repositorios de acceso a datos
//!
//! Un repositorio por agregado. Todas las consultas de negocio filtran
//! `is_deleted = FALSE`; los borrados son siempre lógicos.

pub mod document_repository;
pub mod invoice_repository;
pub mod record_repository;
pub mod reminder_repository;
pub mod request_repository;
pub mod vehicle_repository;
