//! Bootstrap del schema PostgreSQL
//!
//! Este módulo crea las tablas del sistema de forma idempotente al arrancar.
//! Todas las entidades llevan soft-delete (`is_deleted`); las constraints
//! UNIQUE sostienen los invariantes de cardinalidad del negocio:
//! una matrícula por vehículo, un record por solicitud, una factura por record.

use sqlx::PgPool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username VARCHAR(80) NOT NULL UNIQUE,
        full_name VARCHAR(100) NOT NULL,
        role VARCHAR(20) NOT NULL DEFAULT 'customer',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        registration_number VARCHAR(20) NOT NULL UNIQUE,
        brand VARCHAR(50) NOT NULL,
        model VARCHAR(50) NOT NULL,
        fuel_type VARCHAR(20) NOT NULL,
        manufacturing_year INT NOT NULL,
        current_odometer INT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_vehicles_user_id ON vehicles (user_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS service_requests (
        id UUID PRIMARY KEY,
        vehicle_id UUID NOT NULL REFERENCES vehicles (id),
        user_id UUID NOT NULL,
        service_type VARCHAR(100) NOT NULL,
        custom_service_description TEXT,
        preferred_date DATE NOT NULL,
        preferred_time TIME,
        status VARCHAR(20) NOT NULL DEFAULT 'pending',
        admin_notes TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_service_requests_vehicle_id ON service_requests (vehicle_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS service_records (
        id UUID PRIMARY KEY,
        record_seq BIGSERIAL,
        service_request_id UUID NOT NULL UNIQUE REFERENCES service_requests (id),
        vehicle_id UUID NOT NULL REFERENCES vehicles (id),
        service_date DATE NOT NULL,
        service_type VARCHAR(100) NOT NULL,
        parts_replaced TEXT,
        labor_charge NUMERIC(10, 2) NOT NULL DEFAULT 0.00,
        additional_cost NUMERIC(10, 2) NOT NULL DEFAULT 0.00,
        total_amount NUMERIC(10, 2) NOT NULL,
        service_notes TEXT,
        odometer_reading INT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_service_records_vehicle_id ON service_records (vehicle_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id UUID PRIMARY KEY,
        service_record_id UUID NOT NULL UNIQUE REFERENCES service_records (id),
        invoice_number VARCHAR(50) NOT NULL UNIQUE,
        amount NUMERIC(10, 2) NOT NULL,
        payment_status VARCHAR(20) NOT NULL DEFAULT 'pending',
        payment_date TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS service_reminders (
        id UUID PRIMARY KEY,
        vehicle_id UUID NOT NULL REFERENCES vehicles (id),
        last_service_date DATE,
        last_service_odometer INT,
        next_service_date DATE,
        next_service_odometer INT,
        reminder_type VARCHAR(20) NOT NULL DEFAULT 'date',
        is_notified BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_service_reminders_vehicle_id ON service_reminders (vehicle_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        id UUID PRIMARY KEY,
        vehicle_id UUID NOT NULL REFERENCES vehicles (id),
        document_type VARCHAR(50) NOT NULL,
        file_path VARCHAR(255) NOT NULL,
        expiry_date DATE,
        description TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_documents_vehicle_id ON documents (vehicle_id)
    "#,
];

/// Ejecutar el bootstrap del schema (idempotente)
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
