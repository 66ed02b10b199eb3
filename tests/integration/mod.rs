//! Integration Tests Module
//!
//! Drives the public API end to end with the scripted oracle. No network
//! calls are made.

// Full turn pipeline and the store-backed service
mod turn_flow_test;

// Sanitizer properties over realistic extraction noise
mod sanitizer_test;

// Compatibility scoring invariants
mod compatibility_test;

// Knowledge base lookups and replacement tables
mod knowledge_test;
