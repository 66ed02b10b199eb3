//! Data Models
//!
//! Configuration and dialogue-turn data structures.

pub mod settings;
pub mod turn;

pub use settings::*;
pub use turn::*;
