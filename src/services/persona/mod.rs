//! Persona Module
//!
//! System prompts for the two oracle calls of a dialogue turn.
//!
//! | Role | Call |
//! |------|------|
//! | Interviewer | Response generation |
//! | Extractor | Fact extraction |

pub mod prompt_builder;
pub mod registry;
pub mod types;

pub use prompt_builder::{
    build_extraction_system_prompt, build_extraction_user_message, build_interviewer_system_prompt,
};
pub use registry::PersonaRegistry;
pub use types::{Persona, PersonaRole};
