//! `receipts` table.

use loyverse_core::Amount;
use sqlx::SqliteConnection;

use super::{RepositoryError, Table};
use crate::schemas::Receipt;

pub const CREATE: &str = r#"
CREATE TABLE IF NOT EXISTS receipts (
    receipt_number   TEXT PRIMARY KEY NOT NULL,
    note             TEXT,
    receipt_type     TEXT NOT NULL,
    refund_for       TEXT,
    "order"          TEXT,
    created_at       TIMESTAMP NOT NULL,
    updated_at       TIMESTAMP NOT NULL,
    cancelled_at     TIMESTAMP,
    source           TEXT,
    total_money      REAL NOT NULL,
    total_tax        REAL,
    total_discount   REAL NOT NULL DEFAULT 0,
    points_earned    REAL,
    points_deducted  REAL NOT NULL DEFAULT 0,
    points_balance   REAL,
    customer_id      TEXT,
    employee_id      TEXT,
    store_id         TEXT,
    pos_device_id    TEXT,
    tip              REAL NOT NULL DEFAULT 0,
    surcharge        REAL,
    line_items       TEXT NOT NULL DEFAULT '[]',
    payments         TEXT
)"#;

impl Table for Receipt {
    const NAME: &'static str = "receipts";
    const CREATE: &'static str = CREATE;

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), RepositoryError> {
        let line_items = self.line_items_json().map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "line items of receipt {}: {e}",
                self.receipt_number
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO receipts
                (receipt_number, note, receipt_type, refund_for, "order",
                 created_at, updated_at, cancelled_at, source,
                 total_money, total_tax, total_discount,
                 points_earned, points_deducted, points_balance,
                 customer_id, employee_id, store_id, pos_device_id,
                 tip, surcharge, line_items, payments)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(self.receipt_number.as_str())
        .bind(self.note.as_deref())
        .bind(self.receipt_type.as_str())
        .bind(self.refund_for.as_deref())
        .bind(self.order.as_deref())
        .bind(self.created_at)
        .bind(self.updated_at)
        .bind(self.cancelled_at)
        .bind(self.source.as_deref())
        .bind(self.total_money.value())
        .bind(self.total_tax.map(Amount::value))
        .bind(self.total_discount.value())
        .bind(self.points_earned.map(Amount::value))
        .bind(self.points_deducted.value())
        .bind(self.points_balance.map(Amount::value))
        .bind(self.customer_id.map(|id| id.to_string()))
        .bind(self.employee_id.map(|id| id.to_string()))
        .bind(self.store_id.map(|id| id.to_string()))
        .bind(self.pos_device_id.map(|id| id.to_string()))
        .bind(self.tip.value())
        .bind(self.surcharge.map(Amount::value))
        .bind(line_items)
        .bind(self.payments.as_deref())
        .execute(conn)
        .await?;
        Ok(())
    }
}
