pub mod document_routes;
pub mod invoice_routes;
pub mod reminder_routes;
pub mod service_routes;
pub mod vehicle_routes;
