//! Biographer Knowledge Base
//!
//! Static cultural lookup tables consulted by the dialogue engine and the
//! compatibility scorer:
//!
//! - `models` - Table and result types (GothraEntry, SubCommunity, Region, etc.)
//! - `data` - Compiled-in tables
//! - `gothra` - Gothra → Pravara resolution (exact, then substring)
//! - `region` - Free-text location → Region classification
//! - `base` - `KnowledgeBase` facade, optionally loaded from a JSON file
//!
//! This crate has no workspace dependencies.

pub mod base;
pub mod data;
pub mod error;
pub mod gothra;
pub mod models;
pub mod region;

pub use base::KnowledgeBase;
pub use error::{KnowledgeError, KnowledgeResult};
pub use gothra::{normalize_key, same_gothra};
pub use models::{GothraEntry, GothraMatch, KnowledgeTables, MatchKind, Region, SubCommunity};
pub use region::classify_region;
