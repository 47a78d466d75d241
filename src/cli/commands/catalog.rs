//! Genre/actor creation command handlers

use crate::config::Config;
use crate::db::Store;
use crate::models::movie::NamedEntry;

pub async fn cmd_add_genre(config: &Config, name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        println!("Genre name cannot be empty.");
        return Ok(());
    }

    let store = Store::new(&config.general.database_path).await?;

    match store.create_genre(name).await? {
        NamedEntry::Created(genre) => println!("✓ Added genre '{}' (ID: {})", genre.name, genre.id),
        NamedEntry::Existing(rows) => {
            println!("Genre '{name}' already in table:");
            for genre in rows {
                println!("  ID: {} | {}", genre.id, genre.name);
            }
        }
    }

    Ok(())
}

pub async fn cmd_add_actor(config: &Config, name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        println!("Actor name cannot be empty.");
        return Ok(());
    }

    let store = Store::new(&config.general.database_path).await?;

    match store.create_actor(name).await? {
        NamedEntry::Created(actor) => println!("✓ Added actor '{}' (ID: {})", actor.name, actor.id),
        NamedEntry::Existing(rows) => {
            println!("Actor '{name}' already in table:");
            for actor in rows {
                println!("  ID: {} | {}", actor.id, actor.name);
            }
        }
    }

    Ok(())
}
