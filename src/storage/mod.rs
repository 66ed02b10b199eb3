//! Storage Layer
//!
//! JSON config file and the profile store interface.

pub mod config;
pub mod profile_store;

pub use config::*;
pub use profile_store::*;
