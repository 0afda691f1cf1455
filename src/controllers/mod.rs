//! Controllers de la API
//!
//! Cada controller valida DTOs, aplica los checks de capacidad
//! (propietario/staff) de forma explícita y coordina repositorios y
//! servicios. La política de permisos vive acá, nunca dentro de la
//! máquina de estados ni del orquestador.

pub mod document_controller;
pub mod invoice_controller;
pub mod reminder_controller;
pub mod service_controller;
pub mod vehicle_controller;
