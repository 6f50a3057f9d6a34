//! SQLite driver for the record store contract.
//!
//! # Responsibility
//! - Map the `IdeaStore` contract onto the `ideas` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `try_new` rejects connections whose schema is not migration-ready.
//! - Primary-key constraint violations on insert surface as `Conflict`.

use crate::db::migrations::latest_version;
use crate::model::idea::{Idea, IdeaId};
use crate::store::{IdeaStore, StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

const IDEA_SELECT_SQL: &str = "SELECT id, content, created_at, updated_at FROM ideas";

/// SQLite-backed record store.
pub struct SqliteIdeaStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIdeaStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration known to this binary.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema is
    ///   incomplete despite a matching version.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl IdeaStore for SqliteIdeaStore<'_> {
    fn insert(&mut self, idea: &Idea) -> StoreResult<()> {
        let result = self.conn.execute(
            "INSERT INTO ideas (id, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![idea.id, idea.content.as_str(), idea.created_at, idea.updated_at],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_constraint_violation(&err) => Err(StoreError::Conflict(idea.id)),
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_id(&self, id: IdeaId) -> StoreResult<Option<Idea>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{IDEA_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_idea_row(row)?));
        }
        Ok(None)
    }

    fn list_all(&self) -> StoreResult<Vec<Idea>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{IDEA_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut ideas = Vec::new();
        while let Some(row) = rows.next()? {
            ideas.push(parse_idea_row(row)?);
        }
        Ok(ideas)
    }

    fn update(&mut self, idea: &Idea) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE ideas
             SET content = ?1, created_at = ?2, updated_at = ?3
             WHERE id = ?4;",
            params![idea.content.as_str(), idea.created_at, idea.updated_at, idea.id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(idea.id));
        }
        Ok(())
    }

    fn delete(&mut self, id: IdeaId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM ideas WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_all(&mut self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM ideas;", [])?;
        Ok(())
    }
}

fn parse_idea_row(row: &Row<'_>) -> StoreResult<Idea> {
    Ok(Idea {
        id: row.get("id")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "ideas")? {
        return Err(StoreError::MissingRequiredTable("ideas"));
    }

    for column in ["id", "content", "created_at", "updated_at"] {
        if !table_has_column(conn, "ideas", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "ideas",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
