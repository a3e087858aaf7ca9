//! Postgres-backed product repository.
//!
//! Products are stored as JSONB documents alongside the columns the
//! service queries directly (catalog scope, SKU code). One row per main
//! product; variations live inside the document.

use anyhow::Context;
use async_trait::async_trait;
use merx_catalog::CatalogProduct;
use merx_core::{CatalogError, CatalogId, CatalogResult, ProductId};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::ProductRepository;

/// sqlx `PgPool` adapter for `ProductRepository`.
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the `products` table exists.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .with_context(|| "failed to create Postgres pool for product repository")?;
        let repo = Self::new(pool);
        repo.ensure_schema()
            .await
            .context("failed to ensure products schema")?;
        Ok(repo)
    }

    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id         UUID PRIMARY KEY,
                catalog_id UUID NOT NULL,
                code       TEXT NOT NULL,
                doc        JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (catalog_id, code)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create products table")?;
        Ok(())
    }
}

fn storage_err(context: &str, err: impl core::fmt::Display) -> CatalogError {
    CatalogError::storage(format!("{context}: {err}"))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn get_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<CatalogProduct>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query("SELECT doc FROM products WHERE id = ANY($1)")
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_err("failed to load products", e))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: serde_json::Value = row
                .try_get("doc")
                .map_err(|e| storage_err("missing doc column", e))?;
            let product: CatalogProduct = serde_json::from_value(doc)
                .map_err(|e| storage_err("failed to deserialize product document", e))?;
            products.push(product);
        }
        Ok(products)
    }

    async fn upsert(&self, products: &[CatalogProduct]) -> CatalogResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_err("failed to begin transaction", e))?;

        for product in products {
            let doc = serde_json::to_value(product)
                .map_err(|e| storage_err("failed to serialize product document", e))?;
            sqlx::query(
                r#"
                INSERT INTO products (id, catalog_id, code, doc, updated_at)
                VALUES ($1, $2, $3, $4, NOW())
                ON CONFLICT (id)
                DO UPDATE SET
                    catalog_id = EXCLUDED.catalog_id,
                    code = EXCLUDED.code,
                    doc = EXCLUDED.doc,
                    updated_at = NOW()
                "#,
            )
            .bind(product.id.as_uuid())
            .bind(product.catalog_id.as_uuid())
            .bind(&product.code)
            .bind(&doc)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_err("failed to upsert product", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| storage_err("failed to commit upsert", e))?;
        Ok(())
    }

    async fn delete(&self, ids: &[ProductId]) -> CatalogResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(&uuids)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_err("failed to delete products", e))?;
        Ok(())
    }

    async fn exists_code(
        &self,
        catalog_id: CatalogId,
        code: &str,
        except: Option<ProductId>,
    ) -> CatalogResult<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM products
                WHERE catalog_id = $1 AND code = $2 AND ($3::uuid IS NULL OR id <> $3)
            ) AS present
            "#,
        )
        .bind(catalog_id.as_uuid())
        .bind(code)
        .bind(except.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_err("failed to check code uniqueness", e))?;

        row.try_get("present")
            .map_err(|e| storage_err("missing present column", e))
    }
}
