//! Table and column name lookup across the student -> user rename.
//!
//! Reservations used to be owned by `students` rows through `student_*`
//! columns; the current schema uses `users` and `user_*`. A database may be
//! on either side of the rename, or halfway through it, so names are resolved
//! from `information_schema` on every call. Nothing is cached.

use std::future::Future;

use sqlx::MySqlConnection;
use tracing::{debug, warn};

use super::Database;
use crate::constants::{RESERVATIONS_TABLE, STUDENTS_TABLE, USERS_TABLE};

/// Source of table and column existence facts for the current schema
pub trait SchemaCatalog {
    /// Whether `table` exists in the current database
    fn table_exists(
        &mut self,
        table: &str,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Whether `table` has a column named `column` in the current database
    fn column_exists(
        &mut self,
        table: &str,
        column: &str,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

impl SchemaCatalog for MySqlConnection {
    async fn table_exists(&mut self, table: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM information_schema.tables
            WHERE table_schema = DATABASE()
              AND table_name = ?
            "#,
        )
        .bind(table)
        .fetch_one(&mut *self)
        .await?;

        Ok(count > 0)
    }

    async fn column_exists(&mut self, table: &str, column: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM information_schema.columns
            WHERE table_schema = DATABASE()
              AND table_name = ?
              AND column_name = ?
            "#,
        )
        .bind(table)
        .bind(column)
        .fetch_one(&mut *self)
        .await?;

        Ok(count > 0)
    }
}

impl SchemaCatalog for Database {
    async fn table_exists(&mut self, table: &str) -> Result<bool, sqlx::Error> {
        self.connection().table_exists(table).await
    }

    async fn column_exists(&mut self, table: &str, column: &str) -> Result<bool, sqlx::Error> {
        self.connection().column_exists(table, column).await
    }
}

/// Check whether a table exists in the handle's current schema
pub async fn table_exists<C: SchemaCatalog>(handle: &mut C, table: &str) -> Result<bool, sqlx::Error> {
    handle.table_exists(table).await
}

/// Check whether a column exists on a table in the handle's current schema
pub async fn column_exists<C: SchemaCatalog>(
    handle: &mut C,
    table: &str,
    column: &str,
) -> Result<bool, sqlx::Error> {
    handle.column_exists(table, column).await
}

/// Name of the table holding reservation owners
///
/// Returns `users` when it exists and `students` otherwise. The legacy table
/// is not checked; if it is missing too, the caller's query fails instead.
pub async fn users_table_name<C: SchemaCatalog>(handle: &mut C) -> Result<&'static str, sqlx::Error> {
    if handle.table_exists(USERS_TABLE).await? {
        Ok(USERS_TABLE)
    } else {
        Ok(STUDENTS_TABLE)
    }
}

/// Which naming convention a resolved mapping follows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamingConvention {
    /// Every slot uses `user_*`
    Current,
    /// Every slot uses `student_*`
    Legacy,
    /// Some slots were renamed, some were not
    Mixed,
}

/// Column names on `reservations` identifying the reservation owner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReservationUserFields {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
}

impl ReservationUserFields {
    pub fn convention(&self) -> NamingConvention {
        let renamed = [
            self.id == ID_SLOT.current,
            self.name == NAME_SLOT.current,
            self.email == EMAIL_SLOT.current,
        ];

        if renamed.iter().all(|&r| r) {
            NamingConvention::Current
        } else if renamed.iter().any(|&r| r) {
            NamingConvention::Mixed
        } else {
            NamingConvention::Legacy
        }
    }
}

/// Current and legacy column name for one owner field
struct Slot {
    current: &'static str,
    legacy: &'static str,
}

const ID_SLOT: Slot = Slot {
    current: "user_id",
    legacy: "student_id",
};

const NAME_SLOT: Slot = Slot {
    current: "user_name",
    legacy: "student_name",
};

const EMAIL_SLOT: Slot = Slot {
    current: "user_email",
    legacy: "student_email",
};

async fn resolve_slot<C: SchemaCatalog>(handle: &mut C, slot: &Slot) -> Result<&'static str, sqlx::Error> {
    if handle.column_exists(RESERVATIONS_TABLE, slot.current).await? {
        Ok(slot.current)
    } else {
        Ok(slot.legacy)
    }
}

/// Resolve the reservation owner columns
///
/// Each field falls back to its `student_*` name on its own, so a partially
/// migrated table yields a mixed mapping.
pub async fn reservation_user_fields<C: SchemaCatalog>(
    handle: &mut C,
) -> Result<ReservationUserFields, sqlx::Error> {
    let fields = ReservationUserFields {
        id: resolve_slot(handle, &ID_SLOT).await?,
        name: resolve_slot(handle, &NAME_SLOT).await?,
        email: resolve_slot(handle, &EMAIL_SLOT).await?,
    };

    match fields.convention() {
        NamingConvention::Mixed => warn!(
            "Reservation owner columns are partially renamed: id={}, name={}, email={}",
            fields.id, fields.name, fields.email
        ),
        convention => debug!("Reservation owner columns use {:?} naming", convention),
    }

    Ok(fields)
}
