//! LocationStore implementation for PgStorage.

use async_trait::async_trait;
use spott_core::{
    DISCARDED_TABLES, DuplicateGroup, GroupOutcome, LOCATIONS_TABLE, MergeMode, REPOINTED_TABLES,
    TableCount, TableFailure,
};
use sqlx::{Connection as _, PgConnection, Postgres, Transaction};

use super::*;
use crate::traits::{LocationCursor, LocationStore};

#[async_trait]
impl LocationStore for PgStorage {
    async fn list_locations_page(
        &self,
        after: Option<LocationCursor>,
        limit: usize,
    ) -> Result<Vec<Location>, StorageError> {
        let limit = usize_to_i64(limit);
        let rows = match after {
            Some(cursor) => {
                let sql = format!(
                    "SELECT {LOCATION_COLUMNS} FROM {LOCATIONS_TABLE}
                     WHERE (created_at, id) > ($1, $2)
                     ORDER BY created_at, id LIMIT $3"
                );
                sqlx::query(&sql)
                    .bind(cursor.created_at)
                    .bind(cursor.id)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            },
            None => {
                let sql = format!(
                    "SELECT {LOCATION_COLUMNS} FROM {LOCATIONS_TABLE}
                     ORDER BY created_at, id LIMIT $1"
                );
                sqlx::query(&sql).bind(limit).fetch_all(&self.pool).await?
            },
        };
        rows.iter().map(row_to_location).collect()
    }

    async fn merge_group(
        &self,
        group: &DuplicateGroup,
        mode: MergeMode,
    ) -> Result<GroupOutcome, StorageError> {
        let mut tx = self.pool.begin().await?;
        lock_group_rows(&mut tx, group).await?;

        let ids = group.redundant_ids.as_slice();
        let mut outcome = GroupOutcome::default();

        for dep in REPOINTED_TABLES {
            let sql = format!(
                "UPDATE {table} SET {col} = $1 WHERE {col} = ANY($2)",
                table = dep.table,
                col = dep.column
            );
            match run_step(&mut tx, mode, dep.table, &sql, Some(group.kept_id), ids).await? {
                Ok(rows) => outcome.repointed.push(TableCount { table: dep.table, rows }),
                Err(failure) => outcome.failures.push(failure),
            }
        }

        for dep in DISCARDED_TABLES {
            let sql = format!(
                "DELETE FROM {table} WHERE {col} = ANY($1)",
                table = dep.table,
                col = dep.column
            );
            match run_step(&mut tx, mode, dep.table, &sql, None, ids).await? {
                Ok(rows) => outcome.discarded.push(TableCount { table: dep.table, rows }),
                Err(failure) => outcome.failures.push(failure),
            }
        }

        let sql = format!("DELETE FROM {LOCATIONS_TABLE} WHERE id = ANY($1)");
        match run_step(&mut tx, mode, LOCATIONS_TABLE, &sql, None, ids).await? {
            Ok(rows) => outcome.locations_deleted = rows,
            Err(failure) => outcome.failures.push(failure),
        }

        tx.commit().await?;
        tracing::debug!(
            kept = %group.kept_id,
            deleted = outcome.locations_deleted,
            failures = outcome.failures.len(),
            "group merge committed"
        );
        Ok(outcome)
    }
}

/// Lock the group's rows for the rest of the transaction and check the kept
/// row still exists.
async fn lock_group_rows(
    tx: &mut Transaction<'_, Postgres>,
    group: &DuplicateGroup,
) -> Result<(), StorageError> {
    let sql = format!("SELECT id FROM {LOCATIONS_TABLE} WHERE id = $1 OR id = ANY($2) FOR UPDATE");
    let locked: Vec<Uuid> = sqlx::query_scalar(&sql)
        .bind(group.kept_id)
        .bind(&group.redundant_ids)
        .fetch_all(&mut **tx)
        .await?;
    if !locked.contains(&group.kept_id) {
        return Err(StorageError::NotFound { entity: "location", id: group.kept_id.to_string() });
    }
    Ok(())
}

/// Run one merge statement.
///
/// Outer `Err` aborts the group (atomic failure, or savepoint bookkeeping
/// failed). Inner `Err` is a best-effort failure already rolled back to its
/// savepoint.
async fn run_step(
    tx: &mut Transaction<'_, Postgres>,
    mode: MergeMode,
    table: &'static str,
    sql: &str,
    kept: Option<Uuid>,
    ids: &[Uuid],
) -> Result<Result<u64, TableFailure>, StorageError> {
    match mode {
        MergeMode::Atomic => match execute(&mut **tx, sql, kept, ids).await {
            Ok(rows) => Ok(Ok(rows)),
            Err(e) => Err(StorageError::MergeAborted { table, source: Box::new(e.into()) }),
        },
        MergeMode::BestEffort => {
            let mut savepoint = tx.begin().await?;
            match execute(&mut *savepoint, sql, kept, ids).await {
                Ok(rows) => {
                    savepoint.commit().await?;
                    Ok(Ok(rows))
                },
                Err(e) => {
                    savepoint.rollback().await?;
                    let err = StorageError::from(e);
                    tracing::warn!(table, error = %err, "statement rolled back to savepoint");
                    Ok(Err(TableFailure { table, error: err.to_string() }))
                },
            }
        },
    }
}

/// Repoint statements bind `kept` as `$1` and the redundant ids as `$2`;
/// delete statements bind only the ids as `$1`.
async fn execute(
    conn: &mut PgConnection,
    sql: &str,
    kept: Option<Uuid>,
    ids: &[Uuid],
) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(sql);
    if let Some(kept) = kept {
        query = query.bind(kept);
    }
    Ok(query.bind(ids).execute(conn).await?.rows_affected())
}
