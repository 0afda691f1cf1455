//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, junto con la lógica de dominio pura que les
//! pertenece (máquina de estados, vencimientos de recordatorios, etc.).

pub mod document;
pub mod invoice;
pub mod reminder;
pub mod service_record;
pub mod service_request;
pub mod user;
pub mod vehicle;
