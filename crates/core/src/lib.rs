//! Biographer Core
//!
//! Foundational error types, the profile data model, and the field schema for
//! the Biographer workspace. This crate has zero dependencies on oracle,
//! knowledge-base, or application-level code.
//!
//! ## Module Organization
//!
//! - `error` - Unknown-field and invalid-patch errors (`CoreError`, `CoreResult`)
//! - `profile` - Progressive profile snapshot (`Profile`, `FieldValue`, `ProfilePatch`)
//! - `schema` - Ordered field list and completeness predicates
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Pure data and predicates** - nothing here performs I/O
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod profile;
pub mod schema;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Profile Model ──────────────────────────────────────────────────────
pub use profile::{FieldValue, Profile, ProfilePatch};

// ── Field Schema ───────────────────────────────────────────────────────
pub use schema::{
    completion_progress, field_spec, is_complete, is_placeholder, missing_fields,
    ordered_fields, require_field, FieldKind, FieldSpec, FieldTier,
};
