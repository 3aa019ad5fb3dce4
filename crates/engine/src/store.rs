//! SQLite corpus writer for file metrics.
//!
//! `files` rows are replaced by path on every write. Attribute, value and
//! definition rows are insert-or-ignore and shared across the whole corpus,
//! and join rows are insert-or-ignore on their natural key pair.

use crate::error::{EngineError, Result};
use crate::options::SchemaMode;
use crate::stats::FileMetrics;
use rusqlite::{Connection, Transaction, params};
use std::path::Path;
use tracing::debug;

const FILES_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS files (
    path TEXT PRIMARY KEY,
    filename TEXT,
    created TIMESTAMP,
    modified TIMESTAMP,
    size INTEGER,
    total_lines INTEGER,
    alnum_start INTEGER,
    special_start INTEGER,
    comment_lines INTEGER,
    definition_lines INTEGER
);";

const DEFINITIONS_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS definitions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS file_definitions (
    file_path TEXT NOT NULL REFERENCES files(path),
    definition_id INTEGER NOT NULL REFERENCES definitions(id),
    PRIMARY KEY (file_path, definition_id)
);";

const ATTRIBUTES_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS attributes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS file_attributes (
    file_path TEXT NOT NULL REFERENCES files(path),
    attribute_id INTEGER NOT NULL REFERENCES attributes(id),
    PRIMARY KEY (file_path, attribute_id)
);";

const VALUES_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS attr_values (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS file_values (
    file_path TEXT NOT NULL REFERENCES files(path),
    value_id INTEGER NOT NULL REFERENCES attr_values(id),
    PRIMARY KEY (file_path, value_id)
);
CREATE TABLE IF NOT EXISTS attribute_values (
    attribute_id INTEGER NOT NULL REFERENCES attributes(id),
    value_id INTEGER NOT NULL REFERENCES attr_values(id),
    PRIMARY KEY (attribute_id, value_id)
);";

/// Tables a caller may inspect with [`CorpusStore::count_rows`].
pub const KNOWN_TABLES: &[&str] = &[
    "files",
    "definitions",
    "file_definitions",
    "attributes",
    "file_attributes",
    "attr_values",
    "file_values",
    "attribute_values",
];

pub struct CorpusStore {
    conn: Connection,
    mode: SchemaMode,
}

impl CorpusStore {
    /// Open (or create) the corpus database at `db_path`.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open(db_path: &Path, mode: SchemaMode) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::DatabaseDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(db_path)?;
        Self::with_connection(conn, mode)
    }

    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory(mode: SchemaMode) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, mode)
    }

    fn with_connection(conn: Connection, mode: SchemaMode) -> Result<Self> {
        let store = Self { conn, mode };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(FILES_SCHEMA)?;
        if self.mode.stores_definitions() {
            self.conn.execute_batch(DEFINITIONS_SCHEMA)?;
        }
        if self.mode.stores_attributes() {
            self.conn.execute_batch(ATTRIBUTES_SCHEMA)?;
        }
        if self.mode.stores_values() {
            self.conn.execute_batch(VALUES_SCHEMA)?;
        }
        Ok(())
    }

    pub const fn mode(&self) -> SchemaMode {
        self.mode
    }

    /// Upsert every record in a single transaction and return how many
    /// file rows were written.
    ///
    /// # Errors
    /// Any storage error rolls the transaction back and is returned.
    pub fn write_batch(&mut self, records: &[FileMetrics]) -> Result<usize> {
        let mode = self.mode;
        let tx = self.conn.transaction()?;
        for record in records {
            upsert_file(&tx, record)?;
            if mode.stores_definitions() {
                link_definitions(&tx, record)?;
            }
            if mode.stores_attributes() {
                link_attributes(&tx, record, mode.stores_values())?;
            }
        }
        tx.commit()?;
        debug!("Committed {} file rows", records.len());
        Ok(records.len())
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn file_count(&self) -> Result<usize> {
        self.count_rows("files")
    }

    /// Row count of one of the [`KNOWN_TABLES`].
    ///
    /// # Errors
    /// Returns `Config` for an unknown table, or the query error.
    pub fn count_rows(&self, table: &str) -> Result<usize> {
        if !KNOWN_TABLES.contains(&table) {
            return Err(EngineError::Config(format!("Unknown table: {table}")));
        }
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn upsert_file(tx: &Transaction<'_>, r: &FileMetrics) -> Result<()> {
    tx.execute(
        "INSERT OR REPLACE INTO files
         (path, filename, created, modified, size, total_lines, alnum_start,
          special_start, comment_lines, definition_lines)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            r.path,
            r.filename,
            r.created_str(),
            r.modified_str(),
            to_sql_int(r.size)?,
            to_sql_int(r.counts.total_lines)?,
            to_sql_int(r.counts.alnum_start)?,
            to_sql_int(r.counts.special_start)?,
            to_sql_int(r.counts.comment_lines)?,
            to_sql_int(r.counts.definition_lines)?,
        ],
    )?;
    Ok(())
}

fn link_definitions(tx: &Transaction<'_>, r: &FileMetrics) -> Result<()> {
    for text in &r.definition_texts {
        let id = insert_ignore_id(tx, "definitions", "text", text)?;
        tx.execute(
            "INSERT OR IGNORE INTO file_definitions (file_path, definition_id) VALUES (?1, ?2)",
            params![r.path, id],
        )?;
    }
    Ok(())
}

fn link_attributes(tx: &Transaction<'_>, r: &FileMetrics, with_values: bool) -> Result<()> {
    for def in &r.definitions {
        let attribute_id = insert_ignore_id(tx, "attributes", "name", &def.attribute)?;
        tx.execute(
            "INSERT OR IGNORE INTO file_attributes (file_path, attribute_id) VALUES (?1, ?2)",
            params![r.path, attribute_id],
        )?;

        if with_values {
            let value_id = insert_ignore_id(tx, "attr_values", "value", &def.value)?;
            tx.execute(
                "INSERT OR IGNORE INTO file_values (file_path, value_id) VALUES (?1, ?2)",
                params![r.path, value_id],
            )?;
            tx.execute(
                "INSERT OR IGNORE INTO attribute_values (attribute_id, value_id) VALUES (?1, ?2)",
                params![attribute_id, value_id],
            )?;
        }
    }
    Ok(())
}

/// Insert `value` into a single-column entity table unless present, then
/// return its id. First write wins.
fn insert_ignore_id(tx: &Transaction<'_>, table: &str, column: &str, value: &str) -> Result<i64> {
    tx.execute(
        &format!("INSERT OR IGNORE INTO {table} ({column}) VALUES (?1)"),
        params![value],
    )?;
    let id = tx.query_row(
        &format!("SELECT id FROM {table} WHERE {column} = ?1"),
        params![value],
        |row| row.get(0),
    )?;
    Ok(id)
}

fn to_sql_int<T: TryInto<i64>>(n: T) -> Result<i64> {
    n.try_into()
        .map_err(|_| EngineError::Config("count does not fit in an SQLite integer".to_string()))
}
