//! Inbound message decoding.
//!
//! [`decode_message`] turns the message id and payload of a decoded frame
//! into a [`GimbalEvent`]. Ids fall into three disjoint groups:
//!
//! - `0x01xxxx`: acknowledgement of command `xxxx`
//! - `0x02xxxx`: status report for command `xxxx` (record, photo, zoom, laser)
//! - `0x0000xx`: periodic telemetry (status, attitude, camera, IR, visible)
//!
//! A payload shorter than its record needs yields `None`; no partially
//! filled record is ever produced.

use gimbal_core::{
    AckCode, CameraMode, CameraStatus, GimbalAttitude, GimbalEvent, GimbalStatus, IrStatus,
    PhotoStatus, PixelPoint, RecordStatus, VisibleStatus, ZoomStatus,
};

use crate::commands::{
    ACK_PREFIX, MSG_CAMERA_STATUS, MSG_GIMBAL_ATTITUDE, MSG_GIMBAL_STATUS, MSG_IR_STATUS,
    MSG_LASER_PERIODIC_RANGE, MSG_LASER_RANGE, MSG_RECORD, MSG_SET_ZOOM, MSG_TAKE_PHOTO,
    MSG_VISIBLE_STATUS, STATUS_PREFIX,
};

pub const GIMBAL_STATUS_LEN: usize = 6;
pub const GIMBAL_ATTITUDE_LEN: usize = 20;
pub const CAMERA_STATUS_LEN: usize = 16;
pub const IR_STATUS_LEN: usize = 30;
pub const VISIBLE_STATUS_LEN: usize = 15;

/// Decode one inbound message. Returns `None` for unknown ids and short
/// payloads.
pub fn decode_message(message_id: u32, payload: &[u8]) -> Option<GimbalEvent> {
    match message_id & 0xFF_0000 {
        ACK_PREFIX => Some(decode_ack(message_id & 0xFFFF, payload)),
        STATUS_PREFIX => decode_status_frame(message_id & 0xFFFF, payload),
        0 => match message_id {
            MSG_GIMBAL_STATUS => decode_gimbal_status(payload).map(GimbalEvent::GimbalStatus),
            MSG_GIMBAL_ATTITUDE => {
                decode_gimbal_attitude(payload).map(GimbalEvent::GimbalAttitude)
            }
            MSG_CAMERA_STATUS => decode_camera_status(payload).map(GimbalEvent::CameraStatus),
            MSG_IR_STATUS => decode_ir_status(payload).map(GimbalEvent::IrStatus),
            MSG_VISIBLE_STATUS => decode_visible_status(payload).map(GimbalEvent::VisibleStatus),
            _ => None,
        },
        _ => None,
    }
}

/// Build an ACK event for `command_id`. A payload too short to hold the
/// code counts as a failure.
fn decode_ack(command_id: u32, payload: &[u8]) -> GimbalEvent {
    let code = match payload {
        [lo, hi, ..] => AckCode::from_code(u16::from_le_bytes([*lo, *hi])),
        _ => AckCode::Fail,
    };
    GimbalEvent::Ack {
        message_id: command_id,
        code,
    }
}

fn decode_status_frame(command_id: u32, payload: &[u8]) -> Option<GimbalEvent> {
    match command_id {
        MSG_RECORD if payload.len() >= 4 => Some(GimbalEvent::RecordStatus(RecordStatus {
            recording: payload[1] == 1,
            elapsed_secs: u16_at(payload, 2),
        })),
        MSG_TAKE_PHOTO if payload.len() >= 4 => Some(GimbalEvent::PhotoStatus(PhotoStatus {
            mode: payload[0],
            status: payload[1],
            count: u16_at(payload, 2),
        })),
        MSG_SET_ZOOM if !payload.is_empty() => {
            Some(GimbalEvent::ZoomStatus(ZoomStatus { status: payload[0] }))
        }
        MSG_LASER_RANGE | MSG_LASER_PERIODIC_RANGE if payload.len() >= 4 => {
            Some(GimbalEvent::LaserRange {
                meters: f32::from(u16_at(payload, 2)) / 10.0,
            })
        }
        _ => None,
    }
}

pub fn decode_gimbal_status(payload: &[u8]) -> Option<GimbalStatus> {
    if payload.len() < GIMBAL_STATUS_LEN {
        return None;
    }
    let health = payload[2];
    Some(GimbalStatus {
        gimbal_connected: payload[0] & 0x0F == 0,
        camera_connected: payload[0] >> 4 == 0,
        upgrade_status: payload[1],
        ir_ok: health & 0x01 != 0,
        telephoto_ok: health & 0x02 != 0,
        wide_ok: health & 0x04 != 0,
        laser_ok: health & 0x08 != 0,
        stabilization: payload[3],
    })
}

pub fn decode_gimbal_attitude(payload: &[u8]) -> Option<GimbalAttitude> {
    if payload.len() < GIMBAL_ATTITUDE_LEN {
        return None;
    }
    let deg = |offset| f32::from(i16_at(payload, offset)) / 100.0;
    Some(GimbalAttitude {
        yaw_joint: deg(0),
        roll_joint: deg(2),
        pitch_joint: deg(4),
        yaw_attitude: deg(6),
        roll_attitude: deg(8),
        pitch_attitude: deg(10),
        yaw_speed: deg(12),
        pitch_speed: deg(14),
        // Offset 16 is reserved.
        roll_speed: deg(18),
    })
}

pub fn decode_camera_status(payload: &[u8]) -> Option<CameraStatus> {
    if payload.len() < CAMERA_STATUS_LEN {
        return None;
    }
    let mb = |offset| f32::from(u16_at(payload, offset)) / 10.0;
    Some(CameraStatus {
        mode: if payload[0] == 0 {
            CameraMode::Photo
        } else {
            CameraMode::Record
        },
        video_resolution: payload[1],
        codec: payload[2],
        stream_mode: payload[3],
        bitrate: payload[4],
        photo_mode: payload[5],
        timelapse_interval: payload[6],
        burst_count: payload[7],
        sd_status: payload[8],
        sd_total_mb: mb(9),
        sd_free_mb: mb(11),
        sd_used_mb: mb(13),
    })
}

pub fn decode_ir_status(payload: &[u8]) -> Option<IrStatus> {
    if payload.len() < IR_STATUS_LEN {
        return None;
    }
    let celsius = |offset| f32::from(i16_at(payload, offset)) / 10.0;
    let point = |offset| PixelPoint {
        x: u16_at(payload, offset),
        y: u16_at(payload, offset + 2),
    };
    Some(IrStatus {
        max_temp: celsius(0),
        min_temp: celsius(2),
        center_temp: celsius(4),
        point_temp: celsius(6),
        avg_temp: celsius(8),
        max_pos: point(10),
        min_pos: point(14),
        center_pos: point(18),
        point_pos: point(22),
        high_temp_warning: payload[26] == 1,
        low_temp_warning: payload[27] == 1,
        temp_diff_warning: payload[28] == 1,
        threshold_warning: payload[29] == 1,
    })
}

pub fn decode_visible_status(payload: &[u8]) -> Option<VisibleStatus> {
    if payload.len() < VISIBLE_STATUS_LEN {
        return None;
    }
    Some(VisibleStatus {
        zoom_status: payload[0],
        focal_length: f32::from(u16_at(payload, 1)) / 100.0,
        zoom_rate: f32::from(u16_at(payload, 3)) / 10.0,
        exposure_value: payload[5] as i8,
        iso: f32::from(u16_at(payload, 6)) / 10.0,
        shutter: u16_at(payload, 8),
        ae_locked: payload[10] == 1,
        focus_status: payload[11],
        precise_focal: u16_at(payload, 12),
    })
}

// Callers check the length first.
fn u16_at(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn i16_at(buf: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buf[offset], buf[offset + 1]])
}
