//! # Material Repository
//!
//! The price board: categories (picker tabs) and the materials under them.
//!
//! ```text
//!   Copper │ Alum │ Wire │ Others │ Metal        ← list_categories()
//!   ───────┴──────┴──────┴────────┴──────
//!   1001 Bare Bright   $4.700/LB             ← list_by_category(id)
//!   1002 Cu#1          $4.450/LB
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use yard_core::{Material, MaterialCategory};

const MATERIAL_COLUMNS: &str = "id, category_id, item_code, name, unit, unit_price, \
     min_unit_price, max_unit_price, deleted";

/// Repository for the material catalog.
#[derive(Debug, Clone)]
pub struct MaterialRepository {
    pool: SqlitePool,
}

impl MaterialRepository {
    /// Creates a new MaterialRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MaterialRepository { pool }
    }

    /// Lists categories in tab order.
    pub async fn list_categories(&self) -> DbResult<Vec<MaterialCategory>> {
        let categories = sqlx::query_as::<_, MaterialCategory>(
            "SELECT id, name, sort_order FROM material_categories ORDER BY sort_order, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Lists active materials of one category by item code.
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<Material>> {
        let sql = format!(
            "SELECT {} FROM materials WHERE category_id = ?1 AND deleted = 0 ORDER BY item_code, id",
            MATERIAL_COLUMNS
        );
        let materials = sqlx::query_as::<_, Material>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(category_id, count = materials.len(), "Listed materials");
        Ok(materials)
    }

    /// Gets an active material by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Material>> {
        let sql = format!(
            "SELECT {} FROM materials WHERE id = ?1 AND deleted = 0",
            MATERIAL_COLUMNS
        );
        let material = sqlx::query_as::<_, Material>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(material)
    }
}
