//! `items` table.

use sqlx::SqliteConnection;

use super::{RepositoryError, Table};
use crate::schemas::Item;

pub const CREATE: &str = r"
CREATE TABLE IF NOT EXISTS items (
    id                   TEXT PRIMARY KEY NOT NULL,
    handle               TEXT NOT NULL,
    reference_id         TEXT,
    item_name            TEXT NOT NULL,
    description          TEXT,
    track_stock          BOOLEAN NOT NULL,
    sold_by_weight       BOOLEAN NOT NULL,
    is_composite         BOOLEAN NOT NULL,
    use_production       BOOLEAN NOT NULL,
    category_id          TEXT,
    primary_supplier_id  TEXT,
    tax_ids              TEXT,
    modifier_ids         TEXT,
    form                 TEXT,
    color                TEXT,
    image_url            TEXT,
    option1_name         TEXT,
    option2_name         TEXT,
    option3_name         TEXT,
    components           TEXT,
    variants             TEXT,
    created_at           TIMESTAMP NOT NULL,
    updated_at           TIMESTAMP NOT NULL,
    deleted_at           TIMESTAMP
)";

impl Table for Item {
    const NAME: &'static str = "items";
    const CREATE: &'static str = CREATE;

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO items
                (id, handle, reference_id, item_name, description,
                 track_stock, sold_by_weight, is_composite, use_production,
                 category_id, primary_supplier_id, tax_ids, modifier_ids,
                 form, color, image_url, option1_name, option2_name, option3_name,
                 components, variants, created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(self.id.to_string())
        .bind(self.handle.as_str())
        .bind(self.reference_id.as_deref())
        .bind(self.item_name.as_str())
        .bind(self.description.as_deref())
        .bind(self.track_stock)
        .bind(self.sold_by_weight)
        .bind(self.is_composite)
        .bind(self.use_production)
        .bind(self.category_id.map(|id| id.to_string()))
        .bind(self.primary_supplier_id.map(|id| id.to_string()))
        .bind(self.tax_ids.as_deref())
        .bind(self.modifier_ids.as_deref())
        .bind(self.form.as_deref())
        .bind(self.color.as_deref())
        .bind(self.image_url.as_deref())
        .bind(self.option1_name.as_deref())
        .bind(self.option2_name.as_deref())
        .bind(self.option3_name.as_deref())
        .bind(self.components.as_deref())
        .bind(self.variants.as_deref())
        .bind(self.created_at)
        .bind(self.updated_at)
        .bind(self.deleted_at)
        .execute(conn)
        .await?;
        Ok(())
    }
}
