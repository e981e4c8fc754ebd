//! Seed the FAQ store from a JSON file.
//!
//! Entries whose slug already exists are skipped, so seeding is idempotent.
//! Bad or missing timestamps fall back to the current time.

use chrono::{DateTime, NaiveDateTime, Utc};
use faqdesk_core::error::{FaqDeskError, Result};
use std::path::Path;

use crate::db::FaqDb;
use crate::slug::make_slug;

/// Seed set shipped with the binary.
const DEFAULT_SEED: &str = include_str!("../seed/faq_seed.json");

/// One seed file item.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SeedEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Outcome of a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse the built-in seed set.
pub fn default_seed() -> Result<Vec<SeedEntry>> {
    parse_seed(DEFAULT_SEED)
}

/// Load seed entries from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FaqDeskError::Seed(format!("Seed file not found at {}: {e}", path.display()))
    })?;
    parse_seed(&content)
}

fn parse_seed(content: &str) -> Result<Vec<SeedEntry>> {
    serde_json::from_str(content)
        .map_err(|e| FaqDeskError::Seed(format!("Could not decode seed JSON: {e}")))
}

/// Parse an ISO-8601 timestamp. A trailing `Z` and naive (UTC) forms are accepted.
pub fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn timestamp_or_now(value: Option<&str>, field: &str, slug: &str) -> DateTime<Utc> {
    match value {
        Some(raw) => parse_iso(raw).unwrap_or_else(|| {
            tracing::warn!("Invalid {field} '{raw}' for slug '{slug}', using now");
            Utc::now()
        }),
        None => {
            tracing::warn!("Missing {field} for slug '{slug}', using now");
            Utc::now()
        }
    }
}

/// Insert every entry whose slug is not in the store yet.
pub fn run_seed(db: &FaqDb, entries: &[SeedEntry]) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for entry in entries {
        if entry.question.trim().is_empty() || entry.answer.trim().is_empty() {
            tracing::warn!("Skipping seed entry with empty question or answer");
            report.skipped += 1;
            continue;
        }

        let slug = if entry.slug.trim().is_empty() {
            make_slug(&entry.question)
        } else {
            entry.slug.trim().to_string()
        };

        let created = timestamp_or_now(entry.created_at.as_deref(), "created_at", &slug);
        let updated = timestamp_or_now(entry.updated_at.as_deref(), "updated_at", &slug);

        if db.insert_with_timestamps(&entry.question, &entry.answer, &slug, created, updated)? {
            report.inserted += 1;
        } else {
            tracing::debug!("Seed slug '{slug}' already exists, skipping");
            report.skipped += 1;
        }
    }

    tracing::info!(
        "🌱 Seeding complete. Inserted: {}, Skipped/Existing: {}",
        report.inserted,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_db() -> FaqDb {
        FaqDb::open(&PathBuf::from(":memory:")).unwrap()
    }

    #[test]
    fn test_default_seed_parses() {
        let entries = default_seed().unwrap();
        assert_eq!(entries.len(), 15);
        assert!(entries.iter().all(|e| !e.slug.is_empty()));
    }

    #[test]
    fn test_seed_is_idempotent() {
        let db = temp_db();
        let entries = default_seed().unwrap();

        let first = run_seed(&db, &entries).unwrap();
        assert_eq!(first, SeedReport { inserted: 15, skipped: 0 });

        let second = run_seed(&db, &entries).unwrap();
        assert_eq!(second, SeedReport { inserted: 0, skipped: 15 });
        assert_eq!(db.count().unwrap(), 15);
    }

    #[test]
    fn test_seed_keeps_timestamps() {
        let db = temp_db();
        run_seed(&db, &default_seed().unwrap()).unwrap();
        let faq = db.get_faq_by_slug("metodos-de-pago").unwrap().unwrap();
        assert_eq!(faq.created_at.to_rfc3339(), "2025-04-01T00:00:00+00:00");
    }

    #[test]
    fn test_seed_bad_timestamps_fall_back() {
        let db = temp_db();
        let entries: Vec<SeedEntry> = serde_json::from_str(
            r#"[
                {"question": "No dates?", "answer": "None at all"},
                {"question": "Bad date", "answer": "x", "slug": "bad", "created_at": "yesterday"}
            ]"#,
        )
        .unwrap();
        let report = run_seed(&db, &entries).unwrap();
        assert_eq!(report.inserted, 2);
        assert!(db.get_faq_by_slug("no-dates").unwrap().is_some());
        assert!(db.get_faq_by_slug("bad").unwrap().is_some());
    }

    #[test]
    fn test_seed_skips_blank_entries() {
        let db = temp_db();
        let entries: Vec<SeedEntry> =
            serde_json::from_str(r#"[{"question": " ", "answer": "x", "slug": "blank"}]"#).unwrap();
        let report = run_seed(&db, &entries).unwrap();
        assert_eq!(report, SeedReport { inserted: 0, skipped: 1 });
    }

    #[test]
    fn test_load_seed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_seed_file(&missing), Err(FaqDeskError::Seed(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(load_seed_file(&broken), Err(FaqDeskError::Seed(_))));

        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"[{"question": "Q", "answer": "A"}]"#).unwrap();
        assert_eq!(load_seed_file(&good).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_iso() {
        assert!(parse_iso("2025-04-01T00:00:00.000Z").is_some());
        assert!(parse_iso("2025-04-01T00:00:00+02:00").is_some());
        assert!(parse_iso("2025-04-01T10:30:00").is_some());
        assert!(parse_iso("not a date").is_none());
    }
}
