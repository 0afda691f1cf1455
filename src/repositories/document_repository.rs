//! Repositorio de documentos del vehículo

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::Document;
use crate::utils::errors::AppError;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        document_type: String,
        file_path: String,
        expiry_date: Option<NaiveDate>,
        description: Option<String>,
    ) -> Result<Document, AppError> {
        let id = Uuid::new_v4();

        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents
                (id, vehicle_id, document_type, file_path, expiry_date,
                 description, created_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(document_type)
        .bind(file_path)
        .bind(expiry_date)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT * FROM documents
            WHERE vehicle_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    /// Documentos con fecha de vencimiento, para el listado de próximos a vencer
    pub async fn find_with_expiry(&self) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT * FROM documents
            WHERE expiry_date IS NOT NULL AND is_deleted = FALSE
            ORDER BY expiry_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE documents SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Document with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
