//! Loads the stored resources from the API into the local database.
//!
//! Resources are seeded one after another in a fixed order:
//! employees, customers, variants, items, receipts. For each resource the
//! whole collection is fetched and validated before anything is written,
//! so an invalid record leaves that table untouched.

use std::fmt;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, instrument};

use crate::api::{
    ApiError, Customers, Employees, Endpoint, HttpTransport, Items, Loyverse, Receipts, Resource,
    Transport, Variants,
};
use crate::db::{self, RepositoryError, Table};
use crate::schemas::{
    NormalizeContext, RawCustomer, RawEmployee, RawItem, RawReceipt, RawVariant, Schema,
    ValidationError, validate,
};

/// Errors that abort a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Fetching a collection failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A fetched record failed validation.
    #[error("{resource}[{index}]: {source}")]
    Validation {
        resource: &'static str,
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Writing to the database failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A resource whose records are stored in a table.
pub trait Seedable: Resource {
    /// Raw shape of one record.
    type Schema: Schema<Record: Table>;
}

impl Seedable for Employees {
    type Schema = RawEmployee;
}

impl Seedable for Customers {
    type Schema = RawCustomer;
}

impl Seedable for Variants {
    type Schema = RawVariant;
}

impl Seedable for Items {
    type Schema = RawItem;
}

impl Seedable for Receipts {
    type Schema = RawReceipt;
}

/// Rows written per resource by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub employees: usize,
    pub customers: usize,
    pub variants: usize,
    pub items: usize,
    pub receipts: usize,
}

impl SeedSummary {
    /// Rows written across all resources.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.employees + self.customers + self.variants + self.items + self.receipts
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} employees, {} customers, {} variants, {} items, {} receipts",
            self.employees, self.customers, self.variants, self.items, self.receipts
        )
    }
}

/// Drives fetch, validate, and replace for each stored resource.
pub struct Seeder<'a, T: Transport = HttpTransport> {
    api: &'a mut Loyverse<T>,
    pool: &'a SqlitePool,
    ctx: Option<NormalizeContext>,
}

impl<'a, T: Transport> Seeder<'a, T> {
    /// Seeder validating each resource against the time its fetch finished.
    #[must_use]
    pub const fn new(api: &'a mut Loyverse<T>, pool: &'a SqlitePool) -> Self {
        Self {
            api,
            pool,
            ctx: None,
        }
    }

    /// Validate against a fixed clock instead of the current time.
    #[must_use]
    pub fn with_context(mut self, ctx: NormalizeContext) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Seed every stored resource in order.
    ///
    /// Stops at the first failing resource; resources seeded before it keep
    /// their new contents.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` from the first resource that fails.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<SeedSummary, SeedError> {
        db::create_tables(self.pool).await?;

        let summary = SeedSummary {
            employees: self.employees().await?,
            customers: self.customers().await?,
            variants: self.variants().await?,
            items: self.items().await?,
            receipts: self.receipts().await?,
        };

        info!(total = summary.total(), "Seeding complete: {summary}");
        Ok(summary)
    }

    /// Replace the `employees` table.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if fetching, validation, or the write fails.
    pub async fn employees(&mut self) -> Result<usize, SeedError> {
        seed(&mut self.api.employees, self.pool, self.ctx.as_ref()).await
    }

    /// Replace the `customers` table.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if fetching, validation, or the write fails.
    pub async fn customers(&mut self) -> Result<usize, SeedError> {
        seed(&mut self.api.customers, self.pool, self.ctx.as_ref()).await
    }

    /// Replace the `variants` table.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if fetching, validation, or the write fails.
    pub async fn variants(&mut self) -> Result<usize, SeedError> {
        seed(&mut self.api.variants, self.pool, self.ctx.as_ref()).await
    }

    /// Replace the `items` table.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if fetching, validation, or the write fails.
    pub async fn items(&mut self) -> Result<usize, SeedError> {
        seed(&mut self.api.items, self.pool, self.ctx.as_ref()).await
    }

    /// Replace the `receipts` table.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if fetching, validation, or the write fails.
    pub async fn receipts(&mut self) -> Result<usize, SeedError> {
        seed(&mut self.api.receipts, self.pool, self.ctx.as_ref()).await
    }
}

impl<T: Transport> fmt::Debug for Seeder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seeder").field("ctx", &self.ctx).finish_non_exhaustive()
    }
}

/// Fetch, validate, and store one resource.
#[instrument(skip_all, fields(resource = R::NAME))]
async fn seed<R, T>(
    endpoint: &mut Endpoint<R, T>,
    pool: &SqlitePool,
    ctx: Option<&NormalizeContext>,
) -> Result<usize, SeedError>
where
    R: Seedable,
    T: Transport,
{
    let raw = endpoint.get().await?;
    info!(count = raw.len(), "Fetched records");

    let ctx = ctx.copied().unwrap_or_else(NormalizeContext::now);

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            validate::<R::Schema>(value, &ctx).map_err(|source| SeedError::Validation {
                resource: R::NAME,
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    db::ensure_table::<<R::Schema as Schema>::Record>(pool).await?;
    let count = db::replace_all(pool, &records).await?;
    info!(count, "Stored records");

    Ok(count)
}
