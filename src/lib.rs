//! Biographer - Conversational Profile Completion
//!
//! This library provides the dialogue engine behind the `biographer` binary.
//! It includes:
//! - The turn pipeline (extraction, sanitization, direction, response generation)
//! - Compatibility scoring between two profiles
//! - Storage layer (JSON config, profile store interface)
//! - Data models and utilities
//!
//! Profile types live in `biographer-core`, lineage tables in
//! `biographer-knowledge`, and oracle providers in `biographer-llm`.

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::settings::BiographerConfig;
pub use models::turn::{ChatMessage, ChatRole, RejectedField, RejectionReason, TurnRequest, TurnResponse};
pub use services::biographer::{BiographerService, PromptDirective, TurnOrchestrator};
pub use services::compatibility::{evaluate, score, MatchOutcome};
pub use storage::config::ConfigService;
pub use storage::profile_store::{InMemoryProfileStore, ProfileStore};
pub use utils::error::{AppError, AppResult};
