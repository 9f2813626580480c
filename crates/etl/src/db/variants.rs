//! `variants` table.

use loyverse_core::Amount;
use sqlx::SqliteConnection;

use super::{RepositoryError, Table};
use crate::schemas::Variant;

pub const CREATE: &str = r"
CREATE TABLE IF NOT EXISTS variants (
    variant_id            TEXT PRIMARY KEY NOT NULL,
    item_id               TEXT,
    sku                   TEXT,
    reference_variant_id  TEXT,
    option1_value         TEXT,
    option2_value         TEXT,
    option3_value         TEXT,
    barcode               TEXT,
    cost                  REAL,
    purchase_cost         REAL,
    default_pricing_type  TEXT NOT NULL,
    default_price         REAL,
    created_at            TIMESTAMP NOT NULL,
    updated_at            TIMESTAMP NOT NULL,
    deleted_at            TIMESTAMP
)";

impl Table for Variant {
    const NAME: &'static str = "variants";
    const CREATE: &'static str = CREATE;

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO variants
                (variant_id, item_id, sku, reference_variant_id,
                 option1_value, option2_value, option3_value, barcode,
                 cost, purchase_cost, default_pricing_type, default_price,
                 created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(self.variant_id.to_string())
        .bind(self.item_id.map(|id| id.to_string()))
        .bind(self.sku.as_deref())
        .bind(self.reference_variant_id.as_deref())
        .bind(self.option1_value.as_deref())
        .bind(self.option2_value.as_deref())
        .bind(self.option3_value.as_deref())
        .bind(self.barcode.as_deref())
        .bind(self.cost.map(Amount::value))
        .bind(self.purchase_cost.map(Amount::value))
        .bind(self.default_pricing_type.as_str())
        .bind(self.default_price.map(Amount::value))
        .bind(self.created_at)
        .bind(self.updated_at)
        .bind(self.deleted_at)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{DatabaseTarget, create_pool, create_tables, replace_all, row_count};
    use crate::schemas::{RawVariant, validate};
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_insert_variant() {
        let pool = create_pool(&DatabaseTarget::Memory).await.unwrap();
        create_tables(&pool).await.unwrap();
        let variant = validate::<RawVariant>(fixtures::variant(), &fixtures::ctx()).unwrap();

        replace_all(&pool, &[variant]).await.unwrap();

        let (pricing, price): (String, Option<f64>) =
            sqlx::query_as("SELECT default_pricing_type, default_price FROM variants")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(pricing, "FIXED");
        assert_eq!(price, Some(85.0));
        assert_eq!(row_count::<Variant>(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_key_rolls_back() {
        let pool = create_pool(&DatabaseTarget::Memory).await.unwrap();
        create_tables(&pool).await.unwrap();
        let variant = validate::<RawVariant>(fixtures::variant(), &fixtures::ctx()).unwrap();
        replace_all(&pool, &[variant.clone()]).await.unwrap();

        let result = replace_all(&pool, &[variant.clone(), variant]).await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
        assert_eq!(row_count::<Variant>(&pool).await.unwrap(), 1);
    }
}
