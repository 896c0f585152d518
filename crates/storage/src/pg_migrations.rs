//! PostgreSQL schema migrations for the resolver.
//!
//! Production databases already carry these tables; every statement is
//! idempotent so running against them only adds missing indexes.

use anyhow::Result;
use spott_core::{LOCATIONS_TABLE, all_dependent_tables};
use sqlx::PgPool;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {LOCATIONS_TABLE} (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            address TEXT,
            city TEXT,
            latitude DOUBLE PRECISION,
            longitude DOUBLE PRECISION,
            google_place_id TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_locations_created_id ON {LOCATIONS_TABLE} (created_at, id)"
    ))
    .execute(pool)
    .await?;

    // Dependents reference locations without ON DELETE CASCADE, so deleting a
    // location that still has content fails instead of silently dropping rows.
    for dep in all_dependent_tables() {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id UUID,
                {col} UUID REFERENCES {LOCATIONS_TABLE} (id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            table = dep.table,
            col = dep.column,
        ))
        .execute(pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table} ({col})",
            table = dep.table,
            col = dep.column,
        ))
        .execute(pool)
        .await?;
    }

    tracing::info!("PostgreSQL schema migrations complete");
    Ok(())
}
