//! Schema bootstrap for the resolver's tables.
//!
//! Idempotent: every statement is `CREATE ... IF NOT EXISTS`.

use anyhow::Result;
use spott_storage::PgStorage;

use crate::get_database_url;

pub(crate) async fn run() -> Result<()> {
    let url = get_database_url()?;
    let pg = PgStorage::new(&url).await?;
    pg.migrate().await?;
    println!("Schema is up to date");
    Ok(())
}
