//! Domain rules for foundry pattern tracking.
//!
//! This crate has no internal dependencies and holds no state: types, the
//! status derivation rule, validation, search, analytics, and the static seed
//! data. The stateful registry lives in `foundrytrack-registry`.

pub mod auth;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod maintenance;
pub mod pattern;
pub mod scan;
pub mod search;
pub mod seed;
pub mod status;
pub mod types;
