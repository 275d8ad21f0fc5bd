//! The in-memory pattern registry.
//!
//! [`PatternRegistry`] exclusively owns the pattern and maintenance-log
//! collections. It is constructed once at start-up and handed to the
//! presentation layer by reference; every mutation goes through its methods,
//! and each successful mutation is announced on the optional [`EventBus`].

pub mod registry;

pub use registry::PatternRegistry;

pub use foundrytrack_events::EventBus;
