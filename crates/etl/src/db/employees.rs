//! `employees` table.

use loyverse_core::Email;
use sqlx::SqliteConnection;

use super::{RepositoryError, Table};
use crate::schemas::Employee;

pub const CREATE: &str = r"
CREATE TABLE IF NOT EXISTS employees (
    id            TEXT PRIMARY KEY NOT NULL,
    name          TEXT NOT NULL,
    email         TEXT,
    phone_number  TEXT,
    stores        TEXT NOT NULL,
    is_owner      BOOLEAN NOT NULL,
    created_at    TIMESTAMP NOT NULL,
    updated_at    TIMESTAMP NOT NULL,
    deleted_at    TIMESTAMP
)";

impl Table for Employee {
    const NAME: &'static str = "employees";
    const CREATE: &'static str = CREATE;

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO employees
                (id, name, email, phone_number, stores, is_owner,
                 created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(self.id.to_string())
        .bind(self.name.as_str())
        .bind(self.email.as_ref().map(Email::as_str))
        .bind(self.phone_number.as_deref())
        .bind(self.stores.as_str())
        .bind(self.is_owner)
        .bind(self.created_at)
        .bind(self.updated_at)
        .bind(self.deleted_at)
        .execute(conn)
        .await?;
        Ok(())
    }
}
