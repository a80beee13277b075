//! HeQi command builders.
//!
//! One constructor per device command. Each takes the sequence number to
//! stamp on the frame plus typed parameters, and returns a complete frame
//! ready for [`Session::send`](crate::Session::send).
//!
//! All functions are pure: the same arguments always yield the same bytes.
//! Out-of-range numeric parameters are clamped to the device range rather
//! than rejected, so building a command never fails. Multi-byte fields are
//! little-endian and reserved bytes are zero.

use gimbal_core::{
    CameraSelect, CaptureMode, Direction, GimbalMode, ImageMode, LensType, OutputResolution,
    PhotoAction, PhotoMode, RecordAction, VideoCodec, ZoomControl,
};

use crate::frame::encode_frame;

// ---------------------------------------------------------------
// Message ids
// ---------------------------------------------------------------

// Periodic telemetry pushed by the gimbal.
pub const MSG_GIMBAL_STATUS: u32 = 0x000001;
pub const MSG_GIMBAL_ATTITUDE: u32 = 0x000002;
pub const MSG_CAMERA_STATUS: u32 = 0x000003;
pub const MSG_IR_STATUS: u32 = 0x000004;
pub const MSG_VISIBLE_STATUS: u32 = 0x000005;

// Gimbal control.
pub const MSG_GIMBAL_CONTROL: u32 = 0x000010;
pub const MSG_GIMBAL_SET_ANGLE: u32 = 0x000012;
pub const MSG_GIMBAL_CALIBRATE: u32 = 0x000013;
pub const MSG_GIMBAL_SET_SPEED: u32 = 0x000017;
pub const MSG_GIMBAL_VERSION: u32 = 0x000018;
pub const MSG_GIMBAL_POINTING: u32 = 0x00002C;
pub const MSG_GIMBAL_CLOSE_SERVO: u32 = 0x00002D;
pub const MSG_GIMBAL_LINEAR_CALIBRATE: u32 = 0x00002E;
pub const MSG_GIMBAL_SOFT_REBOOT: u32 = 0x00002F;
pub const MSG_GIMBAL_USE_FC_ATTITUDE: u32 = 0x000030;
pub const MSG_GIMBAL_CALIBRATE_ACCEL: u32 = 0x000031;
pub const MSG_GIMBAL_STABILIZE: u32 = 0x000033;

// Thermal camera.
pub const MSG_IR_READ_PARAMS: u32 = 0x000100;
pub const MSG_IR_ZOOM: u32 = 0x000105;
pub const MSG_IR_PALETTE: u32 = 0x000106;
pub const MSG_IR_TEMPERATURE_MEASUREMENT: u32 = 0x000108;
pub const MSG_IR_POINT_TEMPERATURE: u32 = 0x00010F;
pub const MSG_IR_AREA_TEMPERATURE: u32 = 0x000110;
pub const MSG_IR_TEMPERATURE_OVERLAY: u32 = 0x000125;
pub const MSG_IR_SUPER_RESOLUTION: u32 = 0x000180;

// Visible-light camera.
pub const MSG_VISIBLE_READ_PARAMS: u32 = 0x000200;
pub const MSG_VISIBLE_VIDEO_RESOLUTION: u32 = 0x000201;
pub const MSG_VISIBLE_PHOTO_RESOLUTION: u32 = 0x000202;

// Shared camera functions.
pub const MSG_SET_CAPTURE_MODE: u32 = 0x000300;
pub const MSG_SET_PHOTO_PARAMS: u32 = 0x000301;
pub const MSG_TAKE_PHOTO: u32 = 0x000302;
pub const MSG_RECORD: u32 = 0x000303;
pub const MSG_SET_ZOOM: u32 = 0x000304;
pub const MSG_CONTINUOUS_ZOOM: u32 = 0x000306;
pub const MSG_PRECISE_CAPTURE: u32 = 0x000307;
pub const MSG_SET_BITRATE: u32 = 0x000308;
pub const MSG_SET_OUTPUT_RESOLUTION: u32 = 0x00030A;
pub const MSG_SET_CODEC: u32 = 0x00030B;
pub const MSG_TIME_SYNC: u32 = 0x00030E;
pub const MSG_GET_IP: u32 = 0x000312;
pub const MSG_OSD: u32 = 0x000314;
pub const MSG_CAMERA_SHUTDOWN: u32 = 0x000316;
pub const MSG_CAMERA_VERSION: u32 = 0x000317;
pub const MSG_SET_IMAGE_MODE: u32 = 0x000318;
pub const MSG_AI_DETECT: u32 = 0x000319;
pub const MSG_TARGET_TRACKING: u32 = 0x000324;

// Laser rangefinder.
pub const MSG_LASER_RANGE: u32 = 0x000400;
pub const MSG_LASER_PERIODIC_RANGE: u32 = 0x000406;

/// High byte marking an acknowledgement of the id in the low 16 bits.
pub const ACK_PREFIX: u32 = 0x010000;

/// High byte marking a status report for the id in the low 16 bits.
pub const STATUS_PREFIX: u32 = 0x020000;

/// Short human-readable name for a message id, for logging.
///
/// ACK and status-frame ids resolve to the name of the command they refer
/// to. Returns `None` for ids this engine does not know.
pub fn message_name(message_id: u32) -> Option<&'static str> {
    let name = match message_id & 0xFFFF {
        MSG_GIMBAL_STATUS => "gimbal status",
        MSG_GIMBAL_ATTITUDE => "gimbal attitude",
        MSG_CAMERA_STATUS => "camera status",
        MSG_IR_STATUS => "IR status",
        MSG_VISIBLE_STATUS => "visible status",
        MSG_GIMBAL_CONTROL => "gimbal control",
        MSG_GIMBAL_SET_ANGLE => "gimbal set angle",
        MSG_GIMBAL_CALIBRATE => "gimbal drift calibrate",
        MSG_GIMBAL_SET_SPEED => "gimbal set speed",
        MSG_GIMBAL_VERSION => "gimbal version",
        MSG_GIMBAL_POINTING => "gimbal point-to-aim",
        MSG_GIMBAL_CLOSE_SERVO => "gimbal close servo",
        MSG_GIMBAL_LINEAR_CALIBRATE => "gimbal linear calibrate",
        MSG_GIMBAL_SOFT_REBOOT => "gimbal soft reboot",
        MSG_GIMBAL_USE_FC_ATTITUDE => "gimbal use FC attitude",
        MSG_GIMBAL_CALIBRATE_ACCEL => "gimbal accel calibrate",
        MSG_GIMBAL_STABILIZE => "gimbal stabilize",
        MSG_IR_READ_PARAMS => "IR read params",
        MSG_IR_ZOOM => "IR zoom",
        MSG_IR_PALETTE => "IR palette",
        MSG_IR_TEMPERATURE_MEASUREMENT => "IR temperature measurement",
        MSG_IR_POINT_TEMPERATURE => "IR point temperature",
        MSG_IR_AREA_TEMPERATURE => "IR area temperature",
        MSG_IR_TEMPERATURE_OVERLAY => "IR temperature overlay",
        MSG_IR_SUPER_RESOLUTION => "IR super resolution",
        MSG_VISIBLE_READ_PARAMS => "visible read params",
        MSG_VISIBLE_VIDEO_RESOLUTION => "visible video resolution",
        MSG_VISIBLE_PHOTO_RESOLUTION => "visible photo resolution",
        MSG_SET_CAPTURE_MODE => "capture mode",
        MSG_SET_PHOTO_PARAMS => "photo params",
        MSG_TAKE_PHOTO => "take photo",
        MSG_RECORD => "record",
        MSG_SET_ZOOM => "set zoom",
        MSG_CONTINUOUS_ZOOM => "continuous zoom",
        MSG_PRECISE_CAPTURE => "precise capture",
        MSG_SET_BITRATE => "bitrate",
        MSG_SET_OUTPUT_RESOLUTION => "output resolution",
        MSG_SET_CODEC => "codec",
        MSG_TIME_SYNC => "time sync",
        MSG_GET_IP => "get IP",
        MSG_OSD => "OSD",
        MSG_CAMERA_SHUTDOWN => "camera shutdown",
        MSG_CAMERA_VERSION => "camera version",
        MSG_SET_IMAGE_MODE => "image mode",
        MSG_AI_DETECT => "AI detection",
        MSG_TARGET_TRACKING => "target tracking",
        MSG_LASER_RANGE => "laser range",
        MSG_LASER_PERIODIC_RANGE => "laser periodic range",
        _ => return None,
    };

    match message_id >> 16 {
        0x00 | 0x01 | 0x02 => Some(name),
        _ => None,
    }
}

// ---------------------------------------------------------------
// Named code tables
// ---------------------------------------------------------------

/// Visible-light video resolution codes for [`cmd_visible_video_resolution`].
pub mod video_resolution {
    pub const FHD_1080P: u8 = 0x08;
    pub const UHD_4K: u8 = 0x26;
    pub const R4000X3000: u8 = 0x36;
}

/// Visible-light photo resolution codes for [`cmd_visible_photo_resolution`].
pub mod photo_resolution {
    pub const R8000X6000: u8 = 0x14;
    pub const R4000X3000: u8 = 0x15;
    pub const R5160X3870: u8 = 0x16;
    pub const R5664X4248: u8 = 0x17;
}

/// Output stream bitrate levels for [`cmd_set_bitrate`].
pub mod bitrate {
    pub const MBPS_1: u8 = 1;
    pub const MBPS_1_5: u8 = 2;
    pub const MBPS_2: u8 = 3;
    pub const MBPS_4: u8 = 4;
    pub const MBPS_8: u8 = 5;
    pub const MBPS_12: u8 = 6;
}

/// Thermal false-color palette names, index 0 is palette number 1.
pub const IR_PALETTES: [&str; 20] = [
    "white hot",
    "black hot",
    "rainbow",
    "high contrast rainbow",
    "ironbow",
    "lava",
    "sky",
    "medium gray",
    "gray red",
    "purple orange",
    "special 1",
    "warning red",
    "ice fire",
    "cyan red",
    "special 2",
    "gradient red",
    "gradient green",
    "gradient yellow",
    "warning green",
    "warning blue",
];

/// Name of a 1-based palette number, or `None` outside 1..=20.
pub fn ir_palette_name(palette: u8) -> Option<&'static str> {
    IR_PALETTES.get(usize::from(palette).checked_sub(1)?).copied()
}

// ---------------------------------------------------------------
// Parameter ranges
// ---------------------------------------------------------------

/// Rocker speed range accepted by [`cmd_gimbal_set_speed`] (5 ≈ 1°/s, 150 ≈ 30°/s).
pub const SPEED_MIN: u8 = 5;
pub const SPEED_MAX: u8 = 150;

pub const IR_ZOOM_MIN: u8 = 1;
pub const IR_ZOOM_MAX: u8 = 8;

pub const IR_PALETTE_MIN: u8 = 1;
pub const IR_PALETTE_MAX: u8 = 20;

pub const BITRATE_MIN: u8 = 1;
pub const BITRATE_MAX: u8 = 6;

/// Width of the folder name field in capture commands.
pub const FOLDER_FIELD_LEN: usize = 20;

/// Width of the file name field in capture commands.
pub const FILE_FIELD_LEN: usize = 32;

// ---------------------------------------------------------------
// Gimbal motion
// ---------------------------------------------------------------

/// Drive the gimbal: preset `mode` plus a direction on each axis.
///
/// While a direction is held the gimbal keeps turning; the controller is
/// expected to resend this frame periodically and finish with a stop.
pub fn cmd_gimbal_control(seq: u8, mode: GimbalMode, yaw: Direction, pitch: Direction) -> Vec<u8> {
    encode_frame(
        MSG_GIMBAL_CONTROL,
        &[mode.code(), yaw.code(), pitch.code(), 0x00],
        seq,
    )
}

/// Return both axes to center.
///
/// # Example
///
/// ```
/// use gimbal_heqi::commands::cmd_gimbal_center;
///
/// let frame = cmd_gimbal_center(7);
/// assert_eq!(&frame[10..14], &[0x10, 0x02, 0x02, 0x00]);
/// ```
pub fn cmd_gimbal_center(seq: u8) -> Vec<u8> {
    cmd_gimbal_control(seq, GimbalMode::Center, Direction::Stop, Direction::Stop)
}

/// Point the camera straight down.
pub fn cmd_gimbal_look_down(seq: u8) -> Vec<u8> {
    cmd_gimbal_control(seq, GimbalMode::LookDown, Direction::Stop, Direction::Stop)
}

/// Stop all motion.
pub fn cmd_gimbal_stop(seq: u8) -> Vec<u8> {
    cmd_gimbal_control(seq, GimbalMode::None, Direction::Stop, Direction::Stop)
}

/// Move to an absolute angle on each axis.
///
/// The device accepts pitch 0..=90 and yaw 0..=180 degrees; values are
/// passed through unchecked.
pub fn cmd_gimbal_set_angle(
    seq: u8,
    pitch_dir: Direction,
    pitch_angle: u16,
    yaw_dir: Direction,
    yaw_angle: u16,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(7);
    payload.push(pitch_dir.code());
    payload.extend_from_slice(&pitch_angle.to_le_bytes());
    payload.push(yaw_dir.code());
    payload.extend_from_slice(&yaw_angle.to_le_bytes());
    payload.push(0x00);
    encode_frame(MSG_GIMBAL_SET_ANGLE, &payload, seq)
}

/// One-key drift calibration.
pub fn cmd_gimbal_calibrate(seq: u8) -> Vec<u8> {
    encode_frame(MSG_GIMBAL_CALIBRATE, &[0x01, 0x00], seq)
}

/// Set rocker speed for each axis, clamped to [`SPEED_MIN`]..=[`SPEED_MAX`].
pub fn cmd_gimbal_set_speed(seq: u8, pitch_speed: u8, yaw_speed: u8) -> Vec<u8> {
    encode_frame(
        MSG_GIMBAL_SET_SPEED,
        &[
            pitch_speed.clamp(SPEED_MIN, SPEED_MAX),
            yaw_speed.clamp(SPEED_MIN, SPEED_MAX),
            0x00,
        ],
        seq,
    )
}

pub fn cmd_gimbal_version(seq: u8) -> Vec<u8> {
    encode_frame(MSG_GIMBAL_VERSION, &[0x01, 0x00], seq)
}

/// Aim the gimbal at pixel `(x, y)` of the image seen through `lens` at
/// `zoom_rate` (0.1x units).
pub fn cmd_gimbal_pointing(seq: u8, lens: LensType, zoom_rate: u16, x: u16, y: u16) -> Vec<u8> {
    let mut payload = Vec::with_capacity(7);
    payload.push(lens.code());
    payload.extend_from_slice(&zoom_rate.to_le_bytes());
    payload.extend_from_slice(&x.to_le_bytes());
    payload.extend_from_slice(&y.to_le_bytes());
    encode_frame(MSG_GIMBAL_POINTING, &payload, seq)
}

/// Switch the servo motors off.
pub fn cmd_gimbal_close_servo(seq: u8) -> Vec<u8> {
    encode_frame(MSG_GIMBAL_CLOSE_SERVO, &[0x00, 0x00], seq)
}

pub fn cmd_gimbal_linear_calibrate(seq: u8) -> Vec<u8> {
    encode_frame(MSG_GIMBAL_LINEAR_CALIBRATE, &[0x01, 0x00], seq)
}

pub fn cmd_gimbal_soft_reboot(seq: u8) -> Vec<u8> {
    encode_frame(MSG_GIMBAL_SOFT_REBOOT, &[0x01, 0x00], seq)
}

/// Electronic image stabilization on/off.
pub fn cmd_gimbal_stabilize(seq: u8, enable: bool) -> Vec<u8> {
    encode_frame(MSG_GIMBAL_STABILIZE, &[enable as u8, 0x00], seq)
}

// ---------------------------------------------------------------
// Thermal camera
// ---------------------------------------------------------------

/// Ask the thermal camera to report all its settings.
pub fn cmd_ir_read_params(seq: u8) -> Vec<u8> {
    encode_frame(MSG_IR_READ_PARAMS, &[0x01, 0x00], seq)
}

/// Thermal digital zoom, 1 (none) to 8x.
pub fn cmd_ir_zoom(seq: u8, zoom: u8) -> Vec<u8> {
    encode_frame(
        MSG_IR_ZOOM,
        &[zoom.clamp(IR_ZOOM_MIN, IR_ZOOM_MAX), 0x00],
        seq,
    )
}

/// Select a false-color palette, 1..=20 (see [`IR_PALETTES`]).
pub fn cmd_ir_palette(seq: u8, palette: u8) -> Vec<u8> {
    encode_frame(
        MSG_IR_PALETTE,
        &[palette.clamp(IR_PALETTE_MIN, IR_PALETTE_MAX), 0x00],
        seq,
    )
}

/// Temperature measurement on/off.
///
/// The device flag is inverted: `0` turns measurement on.
pub fn cmd_ir_temperature_measurement(seq: u8, enable: bool) -> Vec<u8> {
    encode_frame(
        MSG_IR_TEMPERATURE_MEASUREMENT,
        &[if enable { 0x00 } else { 0x01 }, 0x00],
        seq,
    )
}

/// Measure the temperature at thermal pixel `(x, y)`.
pub fn cmd_ir_point_temperature(seq: u8, x: u16, y: u16) -> Vec<u8> {
    let mut payload = Vec::with_capacity(5);
    payload.extend_from_slice(&x.to_le_bytes());
    payload.extend_from_slice(&y.to_le_bytes());
    payload.push(0x00);
    encode_frame(MSG_IR_POINT_TEMPERATURE, &payload, seq)
}

/// Measure over a `width` x `height` box centered on `(center_x, center_y)`.
pub fn cmd_ir_area_temperature(
    seq: u8,
    width: u16,
    height: u16,
    center_x: u16,
    center_y: u16,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(9);
    for v in [width, height, center_x, center_y] {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    payload.push(0x00);
    encode_frame(MSG_IR_AREA_TEMPERATURE, &payload, seq)
}

pub fn cmd_ir_temperature_overlay(seq: u8, enable: bool) -> Vec<u8> {
    encode_frame(MSG_IR_TEMPERATURE_OVERLAY, &[enable as u8, 0x00], seq)
}

pub fn cmd_ir_super_resolution(seq: u8, enable: bool) -> Vec<u8> {
    encode_frame(MSG_IR_SUPER_RESOLUTION, &[enable as u8, 0x00], seq)
}

// ---------------------------------------------------------------
// Visible-light camera
// ---------------------------------------------------------------

/// Ask the visible camera to report all its settings.
pub fn cmd_visible_read_params(seq: u8) -> Vec<u8> {
    encode_frame(MSG_VISIBLE_READ_PARAMS, &[0x01, 0x00], seq)
}

/// Set recording resolution; `code` is one of [`video_resolution`].
pub fn cmd_visible_video_resolution(seq: u8, code: u8) -> Vec<u8> {
    encode_frame(MSG_VISIBLE_VIDEO_RESOLUTION, &[0x00, code], seq)
}

/// Set still resolution; `code` is one of [`photo_resolution`].
pub fn cmd_visible_photo_resolution(seq: u8, code: u8) -> Vec<u8> {
    encode_frame(MSG_VISIBLE_PHOTO_RESOLUTION, &[0x00, code], seq)
}

// ---------------------------------------------------------------
// Capture
// ---------------------------------------------------------------

pub fn cmd_set_capture_mode(seq: u8, mode: CaptureMode) -> Vec<u8> {
    encode_frame(MSG_SET_CAPTURE_MODE, &[mode.code(), 0x00], seq)
}

/// Configure still shooting. `interval` is the timelapse period in seconds
/// (device accepts 5/7/30/60) and `burst` the burst count (3 or 5).
pub fn cmd_set_photo_params(seq: u8, mode: PhotoMode, interval: u8, burst: u8) -> Vec<u8> {
    encode_frame(
        MSG_SET_PHOTO_PARAMS,
        &[mode.code(), interval, burst, 0x00],
        seq,
    )
}

/// Take a photo (or start/stop a burst/timelapse sequence).
///
/// `folder` and `file` are optional storage names; pass `""` to let the
/// camera choose. Names longer than [`FOLDER_FIELD_LEN`] /
/// [`FILE_FIELD_LEN`] bytes are cut off.
pub fn cmd_take_photo(
    seq: u8,
    camera: CameraSelect,
    action: PhotoAction,
    folder: &str,
    file: &str,
) -> Vec<u8> {
    let payload = capture_payload(camera.code(), action.code(), folder, file);
    encode_frame(MSG_TAKE_PHOTO, &payload, seq)
}

/// Start or stop video recording. Same layout as [`cmd_take_photo`].
pub fn cmd_record(
    seq: u8,
    camera: CameraSelect,
    action: RecordAction,
    folder: &str,
    file: &str,
) -> Vec<u8> {
    let payload = capture_payload(camera.code(), action.code(), folder, file);
    encode_frame(MSG_RECORD, &payload, seq)
}

/// Jump to a hybrid zoom factor; `rate` is in 0.1x units (10 = 1.0x).
pub fn cmd_set_zoom(seq: u8, rate: u16) -> Vec<u8> {
    let [lo, hi] = rate.to_le_bytes();
    encode_frame(MSG_SET_ZOOM, &[0x00, lo, hi], seq)
}

pub fn cmd_continuous_zoom(seq: u8, control: ZoomControl) -> Vec<u8> {
    encode_frame(MSG_CONTINUOUS_ZOOM, &[control.code(), 0x00], seq)
}

/// Reproduce an earlier shot: restore `zoom` (0.1x units) and `focal`
/// length, then capture at `resolution` (a [`photo_resolution`] code).
pub fn cmd_precise_capture(
    seq: u8,
    camera: CameraSelect,
    resolution: u8,
    zoom: u16,
    focal: u16,
    folder: &str,
    file: &str,
) -> Vec<u8> {
    let mut payload = vec![0u8; 6 + FOLDER_FIELD_LEN + FILE_FIELD_LEN];
    payload[0] = camera.code();
    payload[1] = resolution;
    payload[2..4].copy_from_slice(&zoom.to_le_bytes());
    payload[4..6].copy_from_slice(&focal.to_le_bytes());
    put_name(&mut payload[6..6 + FOLDER_FIELD_LEN], folder);
    put_name(&mut payload[6 + FOLDER_FIELD_LEN..], file);
    encode_frame(MSG_PRECISE_CAPTURE, &payload, seq)
}

// ---------------------------------------------------------------
// Video output and camera system
// ---------------------------------------------------------------

/// Output stream bitrate level, clamped to 1..=6 (see [`bitrate`]).
pub fn cmd_set_bitrate(seq: u8, level: u8) -> Vec<u8> {
    encode_frame(
        MSG_SET_BITRATE,
        &[level.clamp(BITRATE_MIN, BITRATE_MAX), 0x00],
        seq,
    )
}

pub fn cmd_set_output_resolution(seq: u8, resolution: OutputResolution) -> Vec<u8> {
    encode_frame(MSG_SET_OUTPUT_RESOLUTION, &[resolution.code(), 0x00], seq)
}

pub fn cmd_set_codec(seq: u8, codec: VideoCodec) -> Vec<u8> {
    encode_frame(MSG_SET_CODEC, &[codec.code(), 0x00], seq)
}

/// On-screen watermark on/off.
pub fn cmd_osd(seq: u8, enable: bool) -> Vec<u8> {
    encode_frame(MSG_OSD, &[enable as u8, 0x00, 0x00], seq)
}

/// Tell the camera power is about to be cut.
pub fn cmd_camera_shutdown(seq: u8) -> Vec<u8> {
    encode_frame(MSG_CAMERA_SHUTDOWN, &[0x01, 0x00], seq)
}

pub fn cmd_camera_version(seq: u8) -> Vec<u8> {
    encode_frame(MSG_CAMERA_VERSION, &[0x01, 0x00], seq)
}

/// Choose which image the video output carries.
pub fn cmd_set_image_mode(seq: u8, mode: ImageMode) -> Vec<u8> {
    encode_frame(MSG_SET_IMAGE_MODE, &[mode.code(), 0x00], seq)
}

// ---------------------------------------------------------------
// Laser rangefinder
// ---------------------------------------------------------------

/// Single laser range measurement.
pub fn cmd_laser_range(seq: u8, enable: bool) -> Vec<u8> {
    encode_frame(MSG_LASER_RANGE, &[enable as u8, 0x00], seq)
}

/// Periodic ranging, one measurement per second while enabled.
pub fn cmd_laser_periodic_range(seq: u8, enable: bool) -> Vec<u8> {
    encode_frame(MSG_LASER_PERIODIC_RANGE, &[enable as u8, 0x00], seq)
}

// ---------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------

fn capture_payload(camera: u8, action: u8, folder: &str, file: &str) -> Vec<u8> {
    let mut payload = vec![0u8; 2 + FOLDER_FIELD_LEN + FILE_FIELD_LEN];
    payload[0] = camera;
    payload[1] = action;
    put_name(&mut payload[2..2 + FOLDER_FIELD_LEN], folder);
    put_name(&mut payload[2 + FOLDER_FIELD_LEN..], file);
    payload
}

/// Copy `name` into a zeroed fixed-width field, cutting it at the field
/// width. No terminator is written when the name fills the field.
fn put_name(field: &mut [u8], name: &str) {
    let bytes = name.as_bytes();
    let n = bytes.len().min(field.len());
    field[..n].copy_from_slice(&bytes[..n]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{HEADER_LEN, decode_frame};

    fn payload(frame: &[u8]) -> Vec<u8> {
        decode_frame(frame).expect("valid frame").payload
    }

    fn id(frame: &[u8]) -> u32 {
        decode_frame(frame).expect("valid frame").message_id
    }

    // ---------------------------------------------------------------
    // Gimbal motion
    // ---------------------------------------------------------------

    #[test]
    fn center_frame_seq_7() {
        let frame = cmd_gimbal_center(7);
        assert_eq!(frame.len(), 16);
        assert_eq!(frame[4], 7);
        assert_eq!(id(&frame), MSG_GIMBAL_CONTROL);
        assert_eq!(payload(&frame), vec![0x10, 0x02, 0x02, 0x00]);
        assert_eq!(&frame[14..], &[0x90, 0x8E]);
    }

    #[test]
    fn look_down_and_stop() {
        assert_eq!(payload(&cmd_gimbal_look_down(0)), vec![0x20, 2, 2, 0]);
        assert_eq!(payload(&cmd_gimbal_stop(0)), vec![0x00, 2, 2, 0]);
    }

    #[test]
    fn control_directions() {
        let frame = cmd_gimbal_control(1, GimbalMode::None, Direction::RIGHT, Direction::UP);
        assert_eq!(payload(&frame), vec![0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn set_angle_layout() {
        let frame = cmd_gimbal_set_angle(2, Direction::DOWN, 45, Direction::LEFT, 0x0102);
        assert_eq!(id(&frame), MSG_GIMBAL_SET_ANGLE);
        assert_eq!(payload(&frame), vec![1, 45, 0, 0, 0x02, 0x01, 0]);
    }

    #[test]
    fn set_speed_clamps_high_and_low() {
        assert_eq!(payload(&cmd_gimbal_set_speed(0, 200, 1)), vec![150, 5, 0]);
        assert_eq!(payload(&cmd_gimbal_set_speed(0, 50, 150)), vec![50, 150, 0]);
    }

    #[test]
    fn pointing_layout() {
        let frame = cmd_gimbal_pointing(0, LensType::Wide, 25, 960, 540);
        assert_eq!(id(&frame), MSG_GIMBAL_POINTING);
        assert_eq!(payload(&frame), vec![1, 25, 0, 0xC0, 0x03, 0x1C, 0x02]);
    }

    #[test]
    fn one_shot_gimbal_commands() {
        assert_eq!(payload(&cmd_gimbal_calibrate(0)), vec![1, 0]);
        assert_eq!(payload(&cmd_gimbal_version(0)), vec![1, 0]);
        assert_eq!(payload(&cmd_gimbal_close_servo(0)), vec![0, 0]);
        assert_eq!(payload(&cmd_gimbal_linear_calibrate(0)), vec![1, 0]);
        assert_eq!(payload(&cmd_gimbal_soft_reboot(0)), vec![1, 0]);
        assert_eq!(id(&cmd_gimbal_soft_reboot(0)), MSG_GIMBAL_SOFT_REBOOT);
        assert_eq!(payload(&cmd_gimbal_stabilize(0, true)), vec![1, 0]);
        assert_eq!(payload(&cmd_gimbal_stabilize(0, false)), vec![0, 0]);
    }

    // ---------------------------------------------------------------
    // Thermal camera
    // ---------------------------------------------------------------

    #[test]
    fn ir_zoom_clamped() {
        assert_eq!(payload(&cmd_ir_zoom(0, 0)), vec![1, 0]);
        assert_eq!(payload(&cmd_ir_zoom(0, 4)), vec![4, 0]);
        assert_eq!(payload(&cmd_ir_zoom(0, 12)), vec![8, 0]);
    }

    #[test]
    fn ir_palette_clamped() {
        assert_eq!(payload(&cmd_ir_palette(0, 0)), vec![1, 0]);
        assert_eq!(payload(&cmd_ir_palette(0, 20)), vec![20, 0]);
        assert_eq!(payload(&cmd_ir_palette(0, 99)), vec![20, 0]);
    }

    #[test]
    fn ir_temperature_measurement_is_inverted() {
        assert_eq!(payload(&cmd_ir_temperature_measurement(0, true)), vec![0, 0]);
        assert_eq!(payload(&cmd_ir_temperature_measurement(0, false)), vec![1, 0]);
    }

    #[test]
    fn ir_point_and_area_temperature() {
        assert_eq!(
            payload(&cmd_ir_point_temperature(0, 0x0780, 0x0440)),
            vec![0x80, 0x07, 0x40, 0x04, 0]
        );
        assert_eq!(
            payload(&cmd_ir_area_temperature(0, 100, 50, 320, 256)),
            vec![100, 0, 50, 0, 0x40, 0x01, 0x00, 0x01, 0]
        );
    }

    #[test]
    fn ir_switches() {
        assert_eq!(payload(&cmd_ir_read_params(0)), vec![1, 0]);
        assert_eq!(payload(&cmd_ir_temperature_overlay(0, true)), vec![1, 0]);
        assert_eq!(payload(&cmd_ir_super_resolution(0, false)), vec![0, 0]);
        assert_eq!(id(&cmd_ir_super_resolution(0, true)), MSG_IR_SUPER_RESOLUTION);
    }

    #[test]
    fn palette_names() {
        assert_eq!(ir_palette_name(1), Some("white hot"));
        assert_eq!(ir_palette_name(20), Some("warning blue"));
        assert_eq!(ir_palette_name(0), None);
        assert_eq!(ir_palette_name(21), None);
    }

    // ---------------------------------------------------------------
    // Visible camera and capture
    // ---------------------------------------------------------------

    #[test]
    fn visible_resolutions() {
        assert_eq!(
            payload(&cmd_visible_video_resolution(0, video_resolution::UHD_4K)),
            vec![0, 0x26]
        );
        assert_eq!(
            payload(&cmd_visible_photo_resolution(0, photo_resolution::R4000X3000)),
            vec![0, 0x15]
        );
        assert_eq!(payload(&cmd_visible_read_params(0)), vec![1, 0]);
    }

    #[test]
    fn take_photo_layout() {
        let frame = cmd_take_photo(3, CameraSelect::Visible, PhotoAction::Shoot, "dir", "img");
        let p = payload(&frame);
        assert_eq!(p.len(), 54);
        assert_eq!(&p[..2], &[2, 0]);
        assert_eq!(&p[2..5], b"dir");
        assert!(p[5..22].iter().all(|&b| b == 0));
        assert_eq!(&p[22..25], b"img");
        assert!(p[25..].iter().all(|&b| b == 0));
    }

    #[test]
    fn take_photo_truncates_names() {
        let folder = "A".repeat(25);
        let file = "B".repeat(40);
        let frame = cmd_take_photo(0, CameraSelect::Default, PhotoAction::Shoot, &folder, &file);
        let p = payload(&frame);
        assert_eq!(p.len(), 54);
        assert_eq!(&p[2..22], [b'A'; 20].as_slice());
        assert_eq!(&p[22..54], [b'B'; 32].as_slice());
        assert_eq!(frame.len(), HEADER_LEN + 54 + 2);
    }

    #[test]
    fn take_photo_utf8_names_are_byte_truncated() {
        // 7 three-byte characters = 21 bytes, one byte too many for the folder.
        let folder = "照片照片照片照";
        let frame = cmd_take_photo(0, CameraSelect::Default, PhotoAction::Shoot, folder, "");
        let p = payload(&frame);
        assert_eq!(&p[2..22], &folder.as_bytes()[..20]);
        assert_eq!(p[22], 0);
    }

    #[test]
    fn record_layout() {
        let frame = cmd_record(0, CameraSelect::StreamCapture, RecordAction::Stop, "", "");
        assert_eq!(id(&frame), MSG_RECORD);
        let p = payload(&frame);
        assert_eq!(p.len(), 54);
        assert_eq!(&p[..2], &[4, 2]);
    }

    #[test]
    fn precise_capture_layout() {
        let folder = "F".repeat(30);
        let frame = cmd_precise_capture(
            0,
            CameraSelect::Visible,
            photo_resolution::R4000X3000,
            25,
            0x1234,
            &folder,
            "shot",
        );
        let p = payload(&frame);
        assert_eq!(p.len(), 58);
        assert_eq!(&p[..6], &[2, 0x15, 25, 0, 0x34, 0x12]);
        assert_eq!(&p[6..26], [b'F'; 20].as_slice());
        assert_eq!(&p[26..30], b"shot");
        assert!(p[30..].iter().all(|&b| b == 0));
    }

    #[test]
    fn zoom_commands() {
        assert_eq!(payload(&cmd_set_zoom(0, 300)), vec![0, 0x2C, 0x01]);
        assert_eq!(
            payload(&cmd_continuous_zoom(0, ZoomControl::StepOut)),
            vec![4, 0]
        );
    }

    #[test]
    fn capture_mode_and_photo_params() {
        assert_eq!(
            payload(&cmd_set_capture_mode(0, CaptureMode::Record)),
            vec![1, 0]
        );
        assert_eq!(
            payload(&cmd_set_photo_params(0, PhotoMode::Timelapse, 30, 3)),
            vec![2, 30, 3, 0]
        );
    }

    // ---------------------------------------------------------------
    // Video output and system
    // ---------------------------------------------------------------

    #[test]
    fn bitrate_clamped() {
        assert_eq!(payload(&cmd_set_bitrate(0, 0)), vec![1, 0]);
        assert_eq!(payload(&cmd_set_bitrate(0, bitrate::MBPS_8)), vec![5, 0]);
        assert_eq!(payload(&cmd_set_bitrate(0, 9)), vec![6, 0]);
    }

    #[test]
    fn output_and_codec() {
        assert_eq!(
            payload(&cmd_set_output_resolution(0, OutputResolution::Hd720p30)),
            vec![2, 0]
        );
        assert_eq!(payload(&cmd_set_codec(0, VideoCodec::H265)), vec![1, 0]);
    }

    #[test]
    fn osd_has_two_reserved_bytes() {
        assert_eq!(payload(&cmd_osd(0, true)), vec![1, 0, 0]);
    }

    #[test]
    fn camera_system_commands() {
        assert_eq!(payload(&cmd_camera_shutdown(0)), vec![1, 0]);
        assert_eq!(payload(&cmd_camera_version(0)), vec![1, 0]);
        assert_eq!(
            payload(&cmd_set_image_mode(0, ImageMode::Split)),
            vec![7, 0]
        );
    }

    #[test]
    fn laser_commands() {
        assert_eq!(id(&cmd_laser_range(0, true)), MSG_LASER_RANGE);
        assert_eq!(payload(&cmd_laser_range(0, true)), vec![1, 0]);
        assert_eq!(id(&cmd_laser_periodic_range(0, false)), MSG_LASER_PERIODIC_RANGE);
        assert_eq!(payload(&cmd_laser_periodic_range(0, false)), vec![0, 0]);
    }

    #[test]
    fn builders_are_pure() {
        assert_eq!(cmd_gimbal_set_speed(9, 80, 80), cmd_gimbal_set_speed(9, 80, 80));
        assert_ne!(cmd_gimbal_stop(1), cmd_gimbal_stop(2));
    }

    // ---------------------------------------------------------------
    // Names
    // ---------------------------------------------------------------

    #[test]
    fn message_names() {
        assert_eq!(message_name(MSG_GIMBAL_CONTROL), Some("gimbal control"));
        assert_eq!(message_name(MSG_TIME_SYNC), Some("time sync"));
        assert_eq!(message_name(MSG_TARGET_TRACKING), Some("target tracking"));
        assert_eq!(message_name(ACK_PREFIX | MSG_GIMBAL_SET_ANGLE), Some("gimbal set angle"));
        assert_eq!(message_name(STATUS_PREFIX | MSG_RECORD), Some("record"));
        assert_eq!(message_name(0x000099), None);
        assert_eq!(message_name(0x050010), None);
    }
}
