//! Gimbal event types and the synchronous event sink.
//!
//! Every decoded inbound frame becomes one [`GimbalEvent`]. A session hands
//! each event to its [`TelemetrySink`] first (synchronously, on the receive
//! task) and then publishes it on a `tokio::sync::broadcast` channel for
//! any number of async subscribers.

use crate::telemetry::{
    AckCode, CameraStatus, GimbalAttitude, GimbalStatus, IrStatus, PhotoStatus, RecordStatus,
    VisibleStatus, ZoomStatus,
};

/// An event produced by a gimbal session.
///
/// Broadcast delivery is best-effort: a subscriber that falls more than the
/// channel capacity behind will observe a lag error and miss events.
#[derive(Debug, Clone, PartialEq)]
pub enum GimbalEvent {
    GimbalStatus(GimbalStatus),
    GimbalAttitude(GimbalAttitude),
    CameraStatus(CameraStatus),
    IrStatus(IrStatus),
    VisibleStatus(VisibleStatus),

    /// The device acknowledged a command.
    Ack {
        /// Message id of the acknowledged command (high byte stripped).
        message_id: u32,
        /// Result code.
        code: AckCode,
    },

    RecordStatus(RecordStatus),
    PhotoStatus(PhotoStatus),
    ZoomStatus(ZoomStatus),

    /// A laser rangefinder measurement.
    LaserRange {
        /// Distance in meters.
        meters: f32,
    },

    /// The session opened its socket and started receiving.
    Connected,

    /// The session stopped receiving and closed its socket.
    Disconnected,
}

/// Synchronous receiver of decoded gimbal events.
///
/// All methods default to no-ops; implement only the ones you care about.
/// Methods are called from the session's receive task, so they should
/// return quickly and hand heavy work off to another task.
pub trait TelemetrySink: Send + Sync {
    fn on_gimbal_status(&self, _status: &GimbalStatus) {}
    fn on_gimbal_attitude(&self, _attitude: &GimbalAttitude) {}
    fn on_camera_status(&self, _status: &CameraStatus) {}
    fn on_ir_status(&self, _status: &IrStatus) {}
    fn on_visible_status(&self, _status: &VisibleStatus) {}
    fn on_ack(&self, _message_id: u32, _code: AckCode) {}
    fn on_laser_range(&self, _meters: f32) {}
    fn on_record_status(&self, _status: &RecordStatus) {}
    fn on_photo_status(&self, _status: &PhotoStatus) {}
    fn on_zoom_status(&self, _status: &ZoomStatus) {}
    fn on_connection_changed(&self, _connected: bool) {}

    /// Route `event` to the matching `on_*` method.
    fn dispatch(&self, event: &GimbalEvent) {
        match event {
            GimbalEvent::GimbalStatus(s) => self.on_gimbal_status(s),
            GimbalEvent::GimbalAttitude(a) => self.on_gimbal_attitude(a),
            GimbalEvent::CameraStatus(s) => self.on_camera_status(s),
            GimbalEvent::IrStatus(s) => self.on_ir_status(s),
            GimbalEvent::VisibleStatus(s) => self.on_visible_status(s),
            GimbalEvent::Ack { message_id, code } => self.on_ack(*message_id, *code),
            GimbalEvent::RecordStatus(s) => self.on_record_status(s),
            GimbalEvent::PhotoStatus(s) => self.on_photo_status(s),
            GimbalEvent::ZoomStatus(s) => self.on_zoom_status(s),
            GimbalEvent::LaserRange { meters } => self.on_laser_range(*meters),
            GimbalEvent::Connected => self.on_connection_changed(true),
            GimbalEvent::Disconnected => self.on_connection_changed(false),
        }
    }
}

/// A sink that ignores everything. Used when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {}
