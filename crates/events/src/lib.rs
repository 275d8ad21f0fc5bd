//! FoundryTrack change notification.
//!
//! The registry publishes a [`RegistryEvent`] after every successful
//! mutation; presentation code subscribes to the [`EventBus`] and re-fetches
//! its snapshots when something changed.

pub mod bus;

pub use bus::{EventBus, RegistryEvent};
