//! FAQ store — SQLite persistence for question/answer records.
//!
//! One `faqs` table keyed by an autoincrement id, with a unique slug derived
//! from the question. Timestamps are stored as RFC 3339 text (UTC).

use chrono::{DateTime, Utc};
use faqdesk_core::error::{FaqDeskError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::slug::make_slug;

/// FAQ store.
pub struct FaqDb {
    conn: Mutex<Connection>,
}

/// FAQ record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    /// Text the search index sees for this record.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.question, self.answer)
    }
}

/// Shared SELECT column list for faq queries.
const FAQ_SELECT: &str = "SELECT id, question, answer, slug, created_at, updated_at FROM faqs";

fn parse_ts(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_faq(row: &rusqlite::Row) -> rusqlite::Result<Faq> {
    Ok(Faq {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        slug: row.get(3)?,
        created_at: parse_ts(4, row.get(4)?)?,
        updated_at: parse_ts(5, row.get(5)?)?,
    })
}

fn validate_entry(question: &str, answer: &str) -> Result<String> {
    if question.trim().is_empty() {
        return Err(FaqDeskError::Validation("question must not be empty".into()));
    }
    if answer.trim().is_empty() {
        return Err(FaqDeskError::Validation("answer must not be empty".into()));
    }
    let slug = make_slug(question);
    if slug.is_empty() {
        return Err(FaqDeskError::Validation(
            "question must contain at least one slug character".into(),
        ));
    }
    Ok(slug)
}

impl FaqDb {
    /// Open or create the FAQ database. `:memory:` gives a throwaway store.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| FaqDeskError::Database(format!("DB open error: {e}")))?;

        // WAL lets readers run alongside the writer
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

        let db = Self { conn: Mutex::new(conn) };
        db.migrate()?;
        Ok(db)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| FaqDeskError::Database(format!("Lock: {e}")))
    }

    /// Run schema migrations.
    fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS faqs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                slug TEXT UNIQUE NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_faqs_slug ON faqs(slug);
        ",
        )
        .map_err(|e| FaqDeskError::Database(format!("Migration error: {e}")))?;
        Ok(())
    }

    // ── FAQ CRUD ──────────────────────────────────────

    /// Create a FAQ. The slug comes from the question and must be unique.
    pub fn create_faq(&self, question: &str, answer: &str) -> Result<Faq> {
        let slug = validate_entry(question, answer)?;
        let conn = self.lock()?;
        if slug_taken(&conn, &slug)? {
            return Err(FaqDeskError::Conflict("FAQ with this slug already exists".into()));
        }

        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO faqs (question, answer, slug, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            params![question, answer, slug, now],
        )
        .map_err(|e| FaqDeskError::Database(format!("Insert faq: {e}")))?;

        let id = conn.last_insert_rowid();
        get_by_id(&conn, id)?
            .ok_or_else(|| FaqDeskError::Database(format!("Inserted faq {id} vanished")))
    }

    /// Insert a record with explicit slug and timestamps.
    /// Returns `false` (and changes nothing) when the slug already exists.
    pub fn insert_with_timestamps(
        &self,
        question: &str,
        answer: &str,
        slug: &str,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "INSERT OR IGNORE INTO faqs (question, answer, slug, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    question,
                    answer,
                    slug,
                    created_at.to_rfc3339(),
                    updated_at.to_rfc3339()
                ],
            )
            .map_err(|e| FaqDeskError::Database(format!("Insert faq: {e}")))?;
        Ok(changed > 0)
    }

    /// Get a FAQ by id.
    pub fn get_faq(&self, id: i64) -> Result<Option<Faq>> {
        let conn = self.lock()?;
        get_by_id(&conn, id)
    }

    /// Get a FAQ by slug.
    pub fn get_faq_by_slug(&self, slug: &str) -> Result<Option<Faq>> {
        let conn = self.lock()?;
        conn.query_row(&format!("{FAQ_SELECT} WHERE slug=?1"), params![slug], row_to_faq)
            .optional()
            .map_err(|e| FaqDeskError::Database(format!("Get faq by slug: {e}")))
    }

    /// All FAQs ordered by id. This is the snapshot a search runs against.
    pub fn list_faqs(&self) -> Result<Vec<Faq>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("{FAQ_SELECT} ORDER BY id ASC"))
            .map_err(|e| FaqDeskError::Database(format!("Prepare: {e}")))?;
        let faqs = stmt
            .query_map([], row_to_faq)
            .map_err(|e| FaqDeskError::Database(format!("Query: {e}")))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| FaqDeskError::Database(format!("Read faq row: {e}")))?;
        Ok(faqs)
    }

    /// Update question and answer. The slug follows the new question.
    pub fn update_faq(&self, id: i64, question: &str, answer: &str) -> Result<Faq> {
        let slug = validate_entry(question, answer)?;
        let conn = self.lock()?;
        let existing = get_by_id(&conn, id)?
            .ok_or_else(|| FaqDeskError::NotFound(format!("FAQ {id} not found")))?;
        if slug != existing.slug && slug_taken(&conn, &slug)? {
            return Err(FaqDeskError::Conflict("FAQ with this slug already exists".into()));
        }

        conn.execute(
            "UPDATE faqs SET question=?1, answer=?2, slug=?3, updated_at=?4 WHERE id=?5",
            params![question, answer, slug, Utc::now().to_rfc3339(), id],
        )
        .map_err(|e| FaqDeskError::Database(format!("Update faq: {e}")))?;

        get_by_id(&conn, id)?.ok_or_else(|| FaqDeskError::NotFound(format!("FAQ {id} not found")))
    }

    /// Delete a FAQ. Returns `false` if it did not exist.
    pub fn delete_faq(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn
            .execute("DELETE FROM faqs WHERE id=?1", params![id])
            .map_err(|e| FaqDeskError::Database(format!("Delete faq: {e}")))?;
        Ok(changed > 0)
    }

    /// Nearest lower and higher ids around an existing FAQ.
    pub fn neighbors(&self, id: i64) -> Result<(Option<Faq>, Option<Faq>)> {
        let conn = self.lock()?;
        if get_by_id(&conn, id)?.is_none() {
            return Err(FaqDeskError::NotFound(format!("FAQ {id} not found")));
        }
        let prev = conn
            .query_row(
                &format!("{FAQ_SELECT} WHERE id < ?1 ORDER BY id DESC LIMIT 1"),
                params![id],
                row_to_faq,
            )
            .optional()
            .map_err(|e| FaqDeskError::Database(format!("Prev faq: {e}")))?;
        let next = conn
            .query_row(
                &format!("{FAQ_SELECT} WHERE id > ?1 ORDER BY id ASC LIMIT 1"),
                params![id],
                row_to_faq,
            )
            .optional()
            .map_err(|e| FaqDeskError::Database(format!("Next faq: {e}")))?;
        Ok((prev, next))
    }

    /// Number of stored FAQs.
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM faqs", [], |r| r.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(|e| FaqDeskError::Database(format!("Count faqs: {e}")))
    }
}

fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Faq>> {
    conn.query_row(&format!("{FAQ_SELECT} WHERE id=?1"), params![id], row_to_faq)
        .optional()
        .map_err(|e| FaqDeskError::Database(format!("Get faq: {e}")))
}

fn slug_taken(conn: &Connection, slug: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM faqs WHERE slug=?1", params![slug], |r| r.get(0))
        .map_err(|e| FaqDeskError::Database(format!("Check slug: {e}")))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_db() -> FaqDb {
        FaqDb::open(&PathBuf::from(":memory:")).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let db = temp_db();
        let faq = db.create_faq("How do refunds work?", "Within 30 days.").unwrap();
        assert_eq!(faq.slug, "how-do-refunds-work");
        assert_eq!(faq.created_at, faq.updated_at);

        let by_id = db.get_faq(faq.id).unwrap().unwrap();
        assert_eq!(by_id, faq);
        let by_slug = db.get_faq_by_slug("how-do-refunds-work").unwrap().unwrap();
        assert_eq!(by_slug.id, faq.id);
        assert!(db.get_faq(9999).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let db = temp_db();
        db.create_faq("Is there a trial?", "Yes.").unwrap();
        let err = db.create_faq("is there a trial", "Still yes.").unwrap_err();
        assert!(matches!(err, FaqDeskError::Conflict(_)));
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let db = temp_db();
        assert!(matches!(
            db.create_faq("  ", "answer").unwrap_err(),
            FaqDeskError::Validation(_)
        ));
        assert!(matches!(
            db.create_faq("question", "").unwrap_err(),
            FaqDeskError::Validation(_)
        ));
        assert!(matches!(
            db.create_faq("?", "answer").unwrap_err(),
            FaqDeskError::Validation(_)
        ));
    }

    #[test]
    fn test_list_ordered_by_id() {
        let db = temp_db();
        db.create_faq("First", "a").unwrap();
        db.create_faq("Second", "b").unwrap();
        db.create_faq("Third", "c").unwrap();
        let faqs = db.list_faqs().unwrap();
        let questions: Vec<_> = faqs.iter().map(|f| f.question.as_str()).collect();
        assert_eq!(questions, vec!["First", "Second", "Third"]);
        assert_eq!(faqs[0].search_text(), "First a");
    }

    #[test]
    fn test_update_faq() {
        let db = temp_db();
        let faq = db.create_faq("Old question", "Old answer").unwrap();
        let updated = db.update_faq(faq.id, "New question", "New answer").unwrap();
        assert_eq!(updated.slug, "new-question");
        assert_eq!(updated.answer, "New answer");
        assert_eq!(updated.created_at, faq.created_at);
        assert!(updated.updated_at >= faq.updated_at);

        // Same question, new answer keeps the slug
        let again = db.update_faq(faq.id, "New question", "Another").unwrap();
        assert_eq!(again.slug, "new-question");

        assert!(matches!(
            db.update_faq(404, "x", "y").unwrap_err(),
            FaqDeskError::NotFound(_)
        ));
    }

    #[test]
    fn test_update_slug_conflict() {
        let db = temp_db();
        db.create_faq("Taken", "a").unwrap();
        let other = db.create_faq("Other", "b").unwrap();
        assert!(matches!(
            db.update_faq(other.id, "taken", "b").unwrap_err(),
            FaqDeskError::Conflict(_)
        ));
    }

    #[test]
    fn test_delete_faq() {
        let db = temp_db();
        let faq = db.create_faq("Delete me", "ok").unwrap();
        assert!(db.delete_faq(faq.id).unwrap());
        assert!(!db.delete_faq(faq.id).unwrap());
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn test_neighbors() {
        let db = temp_db();
        let a = db.create_faq("A", "1").unwrap();
        let b = db.create_faq("B", "2").unwrap();
        let c = db.create_faq("C", "3").unwrap();
        db.delete_faq(b.id).unwrap();

        let (prev, next) = db.neighbors(a.id).unwrap();
        assert!(prev.is_none());
        assert_eq!(next.unwrap().id, c.id);

        let (prev, next) = db.neighbors(c.id).unwrap();
        assert_eq!(prev.unwrap().id, a.id);
        assert!(next.is_none());

        assert!(matches!(db.neighbors(b.id), Err(FaqDeskError::NotFound(_))));
    }

    #[test]
    fn test_insert_with_timestamps_skips_existing() {
        let db = temp_db();
        let ts = DateTime::parse_from_rfc3339("2025-04-01T00:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        assert!(db.insert_with_timestamps("Q", "A", "q-slug", ts, ts).unwrap());
        assert!(!db.insert_with_timestamps("Q2", "A2", "q-slug", ts, ts).unwrap());
        let faq = db.get_faq_by_slug("q-slug").unwrap().unwrap();
        assert_eq!(faq.question, "Q");
        assert_eq!(faq.created_at, ts);
    }
}
