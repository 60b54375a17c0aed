// src/common/db_utils.rs

use sqlx::{error::DatabaseError, Executor, Sqlite};

use crate::common::error::{AppError, Entity};

// ---
// Constraint mapping
// ---

// SQLITE_CONSTRAINT_FOREIGNKEY and SQLITE_CONSTRAINT_TRIGGER. `ON DELETE
// RESTRICT` fires as the latter, which sqlx does not classify as a foreign
// key violation.
const FOREIGN_KEY_CODES: [&str; 2] = ["787", "1811"];

fn is_foreign_key_failure(db_err: &(dyn DatabaseError + 'static)) -> bool {
    db_err.is_foreign_key_violation()
        || db_err
            .code()
            .is_some_and(|code| FOREIGN_KEY_CODES.iter().any(|known| code == *known))
        || db_err.message().contains("FOREIGN KEY constraint failed")
}

/// Maps an INSERT/UPDATE failure: a foreign key violation means the payload
/// pointed at a record that does not exist.
pub(crate) fn reference_error(err: sqlx::Error) -> AppError {
    let dangling = err.as_database_error().is_some_and(is_foreign_key_failure);

    if dangling {
        AppError::ReferenceNotFound
    } else {
        err.into()
    }
}

/// Same as [`reference_error`], plus a domain error for unique violations.
pub(crate) fn unique_or_reference_error(err: sqlx::Error, on_unique: AppError) -> AppError {
    let duplicate = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if duplicate {
        on_unique
    } else {
        reference_error(err)
    }
}

// ---
// Deletes
// ---

/// Deletes one row by id.
///
/// Parent rows are declared `ON DELETE RESTRICT` unless the schema says
/// otherwise, so a row that is still referenced comes back as
/// [`AppError::HasDependents`] and stays in place.
pub(crate) async fn delete_row<'e, E>(
    executor: E,
    table: &'static str,
    id: i64,
    entity: Entity,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("DELETE FROM {table} WHERE id = ?");

    let result = sqlx::query(&sql)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            let restricted = e.as_database_error().is_some_and(is_foreign_key_failure);
            if restricted {
                AppError::HasDependents(entity)
            } else {
                e.into()
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(entity));
    }

    tracing::info!(table, id, "row deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn pool() -> sqlx::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await.unwrap();
        sqlx::query("CREATE TABLE parents (id INTEGER PRIMARY KEY)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE children (id INTEGER PRIMARY KEY, \
             parent INTEGER NOT NULL REFERENCES parents(id) ON DELETE RESTRICT)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO parents (id) VALUES (1), (2)").execute(&pool).await.unwrap();
        sqlx::query("INSERT INTO children (id, parent) VALUES (1, 1)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn restricted_parent_is_a_conflict_and_stays() {
        let pool = pool().await;

        let err = delete_row(&pool, "parents", 1, Entity::City).await.unwrap_err();
        assert!(matches!(err, AppError::HasDependents(Entity::City)), "{err:?}");

        let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parents WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(left, 1);
    }

    #[tokio::test]
    async fn unreferenced_and_missing_rows() {
        let pool = pool().await;

        delete_row(&pool, "parents", 2, Entity::City).await.unwrap();
        let err = delete_row(&pool, "parents", 2, Entity::City).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(Entity::City)));
    }

    #[tokio::test]
    async fn dangling_insert_is_a_reference_error() {
        let pool = pool().await;

        let err = sqlx::query("INSERT INTO children (id, parent) VALUES (2, 99)")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(matches!(reference_error(err), AppError::ReferenceNotFound));
    }
}
