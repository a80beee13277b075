//! gimbal-test-harness: Test utilities for the gimbal protocol engine.
//!
//! [`MockGimbal`] stands in for the payload on the loopback interface: it
//! captures the datagrams a session sends and pushes scripted telemetry
//! back, so session behavior can be tested without hardware.

pub mod mock_gimbal;

pub use mock_gimbal::MockGimbal;
