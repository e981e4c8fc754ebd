//! # FaqDesk Gateway
//!
//! HTTP API and SQLite store around the similarity search core.
//!
//! ```text
//! GET /api/search?query=...&limit=5
//!   ↓ FaqDb::list_faqs()        (snapshot of every record)
//!   ↓ Candidate(faq, question + " " + answer)
//!   ↓ Ranker::rank()            (faqdesk-search)
//! [Faq, Faq, ...]               (best match first)
//! ```

pub mod db;
pub mod error;
pub mod routes;
pub mod seed;
pub mod server;
pub mod slug;

pub use db::{Faq, FaqDb};
pub use error::ApiError;
pub use seed::{SeedEntry, SeedReport};
pub use server::{AppState, build_router, start};
