//! `customers` table.

use loyverse_core::Email;
use sqlx::SqliteConnection;

use super::{RepositoryError, Table};
use crate::schemas::Customer;

pub const CREATE: &str = r"
CREATE TABLE IF NOT EXISTS customers (
    id                     TEXT PRIMARY KEY NOT NULL,
    name                   TEXT,
    email                  TEXT,
    phone_number           TEXT,
    address                TEXT,
    city                   TEXT,
    region                 TEXT,
    postal_code            TEXT,
    country_code           TEXT,
    note                   TEXT,
    customer_code          TEXT,
    first_visit            TIMESTAMP NOT NULL,
    last_visit             TIMESTAMP NOT NULL,
    total_visits           INTEGER NOT NULL DEFAULT 0,
    total_spent            REAL NOT NULL DEFAULT 0,
    total_points           REAL NOT NULL DEFAULT 0,
    permanent_deletion_at  TIMESTAMP,
    created_at             TIMESTAMP,
    updated_at             TIMESTAMP,
    deleted_at             TIMESTAMP
)";

impl Table for Customer {
    const NAME: &'static str = "customers";
    const CREATE: &'static str = CREATE;

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customers
                (id, name, email, phone_number, address, city, region, postal_code,
                 country_code, note, customer_code, first_visit, last_visit,
                 total_visits, total_spent, total_points, permanent_deletion_at,
                 created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(self.id.to_string())
        .bind(self.name.as_deref())
        .bind(self.email.as_ref().map(Email::as_str))
        .bind(self.phone_number.as_deref())
        .bind(self.address.as_deref())
        .bind(self.city.as_deref())
        .bind(self.region.as_deref())
        .bind(self.postal_code.as_deref())
        .bind(self.country_code.as_deref())
        .bind(self.note.as_deref())
        .bind(self.customer_code.as_deref())
        .bind(self.first_visit)
        .bind(self.last_visit)
        .bind(self.total_visits)
        .bind(self.total_spent.value())
        .bind(self.total_points.value())
        .bind(self.permanent_deletion_at)
        .bind(self.created_at)
        .bind(self.updated_at)
        .bind(self.deleted_at)
        .execute(conn)
        .await?;
        Ok(())
    }
}
