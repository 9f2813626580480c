//! Seed a local database from the Loyverse API.

use tracing::info;

use loyverse_etl::db::{self, DatabaseTarget};
use loyverse_etl::{Loyverse, LoyverseConfig, Seeder};

use crate::SeedResource;

/// Seed `database` (in-memory when `None`), optionally a single resource.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database cannot be
/// opened, or any fetch, validation, or write fails.
pub async fn run(
    database: Option<&str>,
    only: Option<SeedResource>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = LoyverseConfig::from_env()?;
    let target = DatabaseTarget::from_arg(database);

    info!(database = %target, base_url = %config.base_url, "Starting seed");

    let pool = db::create_pool(&target).await?;
    let mut api = Loyverse::new(&config)?;
    let mut seeder = Seeder::new(&mut api, &pool);

    match only {
        None => {
            let summary = seeder.run().await?;
            info!(total = summary.total(), "Seeded {summary}");
        }
        Some(resource) => {
            let count = match resource {
                SeedResource::Employees => seeder.employees().await?,
                SeedResource::Customers => seeder.customers().await?,
                SeedResource::Variants => seeder.variants().await?,
                SeedResource::Items => seeder.items().await?,
                SeedResource::Receipts => seeder.receipts().await?,
            };
            info!(resource = ?resource, count, "Seeded single resource");
        }
    }

    pool.close().await;
    Ok(())
}
