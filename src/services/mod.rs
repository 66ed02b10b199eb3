//! Services
//!
//! Business logic: the dialogue engine, persona prompts, and compatibility
//! scoring.

pub mod biographer;
pub mod compatibility;
pub mod persona;

pub use biographer::{BiographerService, Director, TurnOrchestrator};
pub use compatibility::{evaluate, score, MatchOutcome};
