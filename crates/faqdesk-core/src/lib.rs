//! # FaqDesk Core
//!
//! Shared configuration and error types for the FaqDesk workspace.

pub mod config;
pub mod error;

pub use config::FaqDeskConfig;
pub use error::{FaqDeskError, Result};
