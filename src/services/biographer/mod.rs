//! Biographer Dialogue Engine
//!
//! Conversational profile completion, one stateless turn at a time.
//!
//! ## Turn Pipeline
//!
//! 1. `extraction` - Latest reply to candidate fields via the oracle
//! 2. `sanitizer` - Guards, coercion and merge, then the whole-profile fix-up
//! 3. `director` - Next missing field, mapped to a `PromptDirective`
//! 4. `orchestrator` - Composes the above and generates the reply
//!
//! `service` wraps the orchestrator with a `ProfileStore`.

pub mod director;
pub mod directives;
pub mod extraction;
pub mod orchestrator;
pub mod sanitizer;
pub mod service;

pub use director::Director;
pub use directives::{DirectiveTarget, PromptDirective};
pub use extraction::ExtractionAdapter;
pub use orchestrator::TurnOrchestrator;
pub use sanitizer::{fix_up, sanitize, CandidateFields, SanitizeOutcome};
pub use service::BiographerService;
