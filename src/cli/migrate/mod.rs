//! Migrate command - applies or reverts the users schema migrations

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{connect_pool, Migrator, PostgresMigrator};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead
    #[arg(long)]
    pub revert: bool,
}

/// Run migrations against the configured database
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let pg_config = config.database.to_postgres_config();
    let pool = connect_pool(&pg_config).await?;
    let migrator = PostgresMigrator::new(pool, pg_config.schema.clone())?;

    if args.revert {
        match migrator.revert().await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        let applied = migrator.run().await?;
        info!(applied, schema = %pg_config.schema, "Migrations applied");
    }

    let version = migrator.version().await?;
    info!(version = ?version, "Current schema version");

    Ok(())
}
