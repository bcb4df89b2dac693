//! CozySphere client core.
//!
//! Typed async access to the CozySphere home-automation hub (sensor
//! readings, averages, relay-state prediction, target/device/mode
//! submission) plus the pure cycle-tracking forecast. Presentation is
//! somebody else's job: this crate returns values and errors, it renders
//! nothing, persists nothing and authenticates nothing.
//!
//! Concurrency contract: every [`HubClient`] operation is a plain future.
//! It resolves exactly once, on whichever task awaits it, so state updates
//! driven by the results are serialized by the caller's own executor
//! context. Dropping a future cancels its request.

pub mod client;
pub mod config;
pub mod cycle;
pub mod endpoint;
pub mod error;
pub mod types;

pub use client::HubClient;
pub use config::HubConfig;
pub use cycle::{CycleError, CycleInterval, CycleLog, predict_next};
pub use error::{ClientError, Result};
pub use types::{DeviceState, ModeTable, Relay, SensorReading, TargetValues, ThresholdSettings};
