use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::db::{Store, migrator::Migrator};

/// Opening the store applies pending migrations; this reports what is now applied.
pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let applied = Migrator::get_applied_migrations(&store.conn).await?;
    println!("✓ Database is up to date ({} migrations applied)", applied.len());
    for migration in applied {
        println!("  {}", migration.name());
    }

    Ok(())
}
