//! # Repertoire Common Library
//!
//! Shared code for the repertoire cleaning tools including:
//! - Document model (groups, participants, repertoires)
//! - Typo correction and repertoire deduplication
//! - Group normalization and repertoire addition
//! - Document loading and saving
//! - Configuration loading
//! - Document summaries and piece queries

pub mod config;
pub mod corrections;
pub mod error;
pub mod model;
pub mod mutate;
pub mod normalize;
pub mod query;
pub mod store;
pub mod summary;

pub use corrections::CorrectionTable;
pub use error::{Error, Result};
pub use model::{Document, Participant};
pub use mutate::{add_repertoire, AddOutcome};
pub use normalize::{normalize_document, normalize_group, NormalizeReport};
pub use query::{search, unique_pieces, SearchMatch};
pub use store::{load_document, parse_document, render_document, save_document};
pub use summary::DocumentSummary;
