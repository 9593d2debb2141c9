// src/store.rs
//! Review table persistence.
//!
//! `ReviewStore` is the contract the sampler and the scrape loop depend on;
//! `SqliteStore` is the on-disk implementation (one connection, one table).
//!
//! Ordering is part of the contract: `retrieve_by_label` returns rows by
//! ascending id, so two calls with the same arguments see the same rows.

use std::path::Path;
use std::time::Duration;

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::config::consts::DB_BUSY_TIMEOUT_SECS;
use crate::error::Result;
use crate::review::{NewReview, Provenance, Recommendation, Review};

pub trait ReviewStore {
    /// Up to `limit` rows with this label and status flag, ascending by id.
    fn retrieve_by_label(
        &self,
        label: Recommendation,
        classified: i64,
        limit: usize,
    ) -> Result<Vec<Review>>;

    /// Most recently inserted row, if any.
    fn retrieve_last(&self) -> Result<Option<Review>>;

    /// Persist one review; returns the assigned id.
    fn insert(&mut self, review: &NewReview, from: &Provenance) -> Result<i64>;

    /// Delete all but the lowest-id row of every (author, label, text) group.
    fn remove_exact_duplicates(&mut self) -> Result<usize>;
}

const COLUMNS: &str = "id, url, item_number, scraped_at, classified, label, text, author";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        debug!("store: opened {}", path.display());
        Ok(Self { conn })
    }

    /// Fresh in-memory table, already created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.busy_timeout(Duration::from_secs(DB_BUSY_TIMEOUT_SECS))?;
        let store = Self { conn };
        store.create_table()?;
        Ok(store)
    }

    pub fn create_table(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                url         TEXT NOT NULL,
                item_number INTEGER NOT NULL,
                scraped_at  TEXT NOT NULL,
                classified  INTEGER NOT NULL DEFAULT 0,
                label       TEXT NOT NULL,
                text        TEXT NOT NULL,
                author      TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_reviews_label
                ON reviews(label, classified, id);
            "#,
        )?;
        Ok(())
    }

    pub fn drop_table(&self) -> Result<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        info!("store: dropped reviews table");
        Ok(())
    }

    pub fn count_by_label(&self, label: Recommendation) -> Result<usize> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM reviews WHERE label = ?1",
            params![label.as_str()],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }

    /// Flag rows as used in a training/testing pass.
    pub fn mark_classified(&mut self, ids: &[i64]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut changed = 0;
        {
            let mut stmt = tx.prepare("UPDATE reviews SET classified = 1 WHERE id = ?1")?;
            for id in ids {
                changed += stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        Ok(changed)
    }
}

impl ReviewStore for SqliteStore {
    fn retrieve_by_label(
        &self,
        label: Recommendation,
        classified: i64,
        limit: usize,
    ) -> Result<Vec<Review>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE label = ?1 AND classified = ?2
             ORDER BY id ASC LIMIT ?3"
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map(params![label.as_str(), classified, limit as i64], review_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn retrieve_last(&self) -> Result<Option<Review>> {
        let sql = format!("SELECT {COLUMNS} FROM reviews ORDER BY id DESC LIMIT 1");
        let last = self.conn.query_row(&sql, [], review_from_row).optional()?;
        Ok(last)
    }

    fn insert(&mut self, review: &NewReview, from: &Provenance) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO reviews (url, item_number, scraped_at, classified, label, text, author)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                from.url,
                from.item_number,
                from.scraped_at,
                from.classified,
                review.label.as_str(),
                review.text,
                review.author,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn remove_exact_duplicates(&mut self) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM reviews WHERE id NOT IN (
                 SELECT MIN(id) FROM reviews GROUP BY author, label, text
             )",
            [],
        )?;
        info!("store: removed {removed} duplicate rows");
        Ok(removed)
    }
}

fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    let label: String = row.get(5)?;
    let label = label
        .parse::<Recommendation>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    Ok(Review {
        id: row.get(0)?,
        url: row.get(1)?,
        item_number: row.get(2)?,
        scraped_at: row.get(3)?,
        classified: row.get(4)?,
        label,
        text: row.get(6)?,
        author: row.get(7)?,
    })
}
