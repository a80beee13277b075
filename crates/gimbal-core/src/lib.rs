//! gimbal-core: Core types, events, and error definitions for the gimbal
//! protocol engine.
//!
//! This crate holds the protocol-agnostic vocabulary shared by the transport,
//! the protocol backend, and applications: command parameter enums, decoded
//! telemetry records, the [`GimbalEvent`] stream and the [`TelemetrySink`]
//! callback trait.
//!
//! # Key types
//!
//! - [`GimbalEvent`] -- decoded telemetry, ACKs and connection changes
//! - [`TelemetrySink`] -- synchronous per-kind event callbacks
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod events;
pub mod telemetry;
pub mod types;

pub use error::{Error, Result};
pub use events::{GimbalEvent, NullSink, TelemetrySink};
pub use telemetry::*;
pub use types::*;
