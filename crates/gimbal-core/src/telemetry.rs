//! Decoded telemetry records.
//!
//! Each record is a read-only snapshot built from exactly one inbound frame.
//! Fixed-point wire values are already scaled to engineering units (degrees,
//! °C, MB, meters) by the time a record exists.

use std::fmt;

/// Gimbal health report (message `0x000001`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GimbalStatus {
    /// The gimbal control board responds.
    pub gimbal_connected: bool,
    /// The camera board responds.
    pub camera_connected: bool,
    /// Firmware upgrade state as reported by the device.
    pub upgrade_status: u8,
    pub ir_ok: bool,
    pub telephoto_ok: bool,
    pub wide_ok: bool,
    pub laser_ok: bool,
    /// Raw stabilization state.
    pub stabilization: u8,
}

/// Gimbal orientation report (message `0x000002`).
///
/// Angles are in degrees, speeds in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GimbalAttitude {
    pub yaw_joint: f32,
    pub roll_joint: f32,
    pub pitch_joint: f32,
    pub yaw_attitude: f32,
    pub roll_attitude: f32,
    pub pitch_attitude: f32,
    pub yaw_speed: f32,
    pub pitch_speed: f32,
    pub roll_speed: f32,
}

/// Camera mode as reported in [`CameraStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Photo,
    Record,
}

/// Camera configuration and storage report (message `0x000003`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraStatus {
    pub mode: CameraMode,
    pub video_resolution: u8,
    pub codec: u8,
    pub stream_mode: u8,
    pub bitrate: u8,
    pub photo_mode: u8,
    pub timelapse_interval: u8,
    pub burst_count: u8,
    pub sd_status: u8,
    /// SD card capacity in MB.
    pub sd_total_mb: f32,
    pub sd_free_mb: f32,
    pub sd_used_mb: f32,
}

/// Pixel coordinate on the thermal sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelPoint {
    pub x: u16,
    pub y: u16,
}

/// Thermal sensor report (message `0x000004`). Temperatures in °C.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IrStatus {
    pub max_temp: f32,
    pub min_temp: f32,
    pub center_temp: f32,
    pub point_temp: f32,
    pub avg_temp: f32,
    pub max_pos: PixelPoint,
    pub min_pos: PixelPoint,
    /// Where `center_temp` is measured.
    pub center_pos: PixelPoint,
    /// Where `point_temp` is measured.
    pub point_pos: PixelPoint,
    pub high_temp_warning: bool,
    pub low_temp_warning: bool,
    pub temp_diff_warning: bool,
    pub threshold_warning: bool,
}

/// Visible-light camera report (message `0x000005`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisibleStatus {
    pub zoom_status: u8,
    /// Focal length in mm.
    pub focal_length: f32,
    /// Zoom factor (e.g. 2.5 for 2.5x).
    pub zoom_rate: f32,
    pub exposure_value: i8,
    pub iso: f32,
    /// Shutter time in µs.
    pub shutter: u16,
    pub ae_locked: bool,
    pub focus_status: u8,
    /// Focal length used by the last precise capture, raw device units.
    pub precise_focal: u16,
}

/// Recording progress pushed as a status frame for message `0x000303`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordStatus {
    pub recording: bool,
    pub elapsed_secs: u16,
}

/// Photo progress pushed as a status frame for message `0x000302`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhotoStatus {
    pub mode: u8,
    pub status: u8,
    pub count: u16,
}

/// Zoom progress pushed as a status frame for message `0x000304`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoomStatus {
    pub status: u8,
}

/// Result code carried in a device acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AckCode {
    Ok,
    Fail,
    UnknownError,
    CrcFail,
    Timeout,
    /// A code this engine does not recognize, kept verbatim.
    Other(u16),
}

impl AckCode {
    /// Map a raw wire code to an [`AckCode`].
    pub fn from_code(code: u16) -> AckCode {
        match code {
            0 => AckCode::Ok,
            1 => AckCode::Fail,
            2 => AckCode::UnknownError,
            3 => AckCode::CrcFail,
            4 => AckCode::Timeout,
            n => AckCode::Other(n),
        }
    }

    /// The raw wire code.
    pub fn code(self) -> u16 {
        match self {
            AckCode::Ok => 0,
            AckCode::Fail => 1,
            AckCode::UnknownError => 2,
            AckCode::CrcFail => 3,
            AckCode::Timeout => 4,
            AckCode::Other(n) => n,
        }
    }

    pub fn is_ok(self) -> bool {
        self == AckCode::Ok
    }
}

impl fmt::Display for AckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AckCode::Ok => write!(f, "ok"),
            AckCode::Fail => write!(f, "fail"),
            AckCode::UnknownError => write!(f, "unknown error"),
            AckCode::CrcFail => write!(f, "crc fail"),
            AckCode::Timeout => write!(f, "timeout"),
            AckCode::Other(n) => write!(f, "code {n}"),
        }
    }
}
