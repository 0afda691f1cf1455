//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los servicios
//! encapsulan operaciones que involucran múltiples modelos, en particular la
//! orquestación transaccional de la finalización de un servicio.

pub mod completion_service;
pub mod health_service;
pub mod invoice_service;
pub mod reminder_service;
