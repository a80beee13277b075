//! HeQi frame encoder/decoder.
//!
//! Every command and every telemetry report travels as one self-contained
//! UDP datagram holding exactly one frame. This module is pure byte work:
//! no I/O, no state.
//!
//! # Frame format
//!
//! ```text
//! 0xFD <len> <tgt sys> <tgt comp> <seq> <src sys> <src comp> <id0> <id1> <id2> <payload...> <crc lo> <crc hi>
//! ```
//!
//! - Start marker: `0xFD`
//! - `len`: payload length in bytes (0..=255)
//! - target / source: system and component ids (gimbal is `0x04/0x01`,
//!   controller is `0x01/0x01`)
//! - `seq`: rolling sequence number chosen by the sender
//! - message id: 24 bits, little-endian
//! - CRC: 16 bits, little-endian, over every byte after the start marker up
//!   to the end of the payload

use bytes::{BufMut, BytesMut};

/// First byte of every frame.
pub const START_MARKER: u8 = 0xFD;

/// Bytes before the payload: marker, length, 5 address/sequence bytes, 3 id bytes.
pub const HEADER_LEN: usize = 10;

/// Trailing CRC size.
pub const CRC_LEN: usize = 2;

/// Smallest possible frame (empty payload).
pub const MIN_FRAME_LEN: usize = HEADER_LEN + CRC_LEN;

/// Largest payload the one-byte length field can describe.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// System id of the gimbal.
pub const GIMBAL_SYSTEM_ID: u8 = 0x04;

/// Component id of the gimbal.
pub const GIMBAL_COMPONENT_ID: u8 = 0x01;

/// System id of this controller.
pub const CONTROLLER_SYSTEM_ID: u8 = 0x01;

/// Component id of this controller.
pub const CONTROLLER_COMPONENT_ID: u8 = 0x01;

/// A decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub target_system: u8,
    pub target_component: u8,
    pub sequence: u8,
    pub source_system: u8,
    pub source_component: u8,
    /// 24-bit message id.
    pub message_id: u32,
    pub payload: Vec<u8>,
}

/// Compute the frame checksum over `data`.
///
/// Seeded with `0xFFFF`, reflected, no final XOR (the CRC-16/MCRF4XX
/// parameter set). Note that the commonly available X-25 routine applies a
/// final XOR and produces different values.
///
/// # Example
///
/// ```
/// use gimbal_heqi::frame::crc16;
///
/// assert_eq!(crc16(b"123456789"), 0x6F91);
/// ```
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &b in data {
        let mut tmp = b ^ (crc & 0xFF) as u8;
        tmp ^= tmp << 4;
        let tmp = tmp as u16;
        crc = (crc >> 8) ^ (tmp << 8) ^ (tmp << 3) ^ (tmp >> 4);
    }
    crc
}

/// Encode a frame addressed from the controller to the gimbal.
///
/// Only the low 24 bits of `message_id` are sent. A payload longer than
/// [`MAX_PAYLOAD_LEN`] is truncated so the length byte stays truthful.
///
/// # Example
///
/// ```
/// use gimbal_heqi::frame::encode_frame;
///
/// // Center the gimbal, sequence 7.
/// let bytes = encode_frame(0x000010, &[0x10, 0x02, 0x02, 0x00], 7);
/// assert_eq!(bytes.len(), 16);
/// assert_eq!(&bytes[..10], &[0xFD, 0x04, 0x04, 0x01, 0x07, 0x01, 0x01, 0x10, 0x00, 0x00]);
/// ```
pub fn encode_frame(message_id: u32, payload: &[u8], sequence: u8) -> Vec<u8> {
    let payload = &payload[..payload.len().min(MAX_PAYLOAD_LEN)];

    let mut buf = BytesMut::with_capacity(HEADER_LEN + payload.len() + CRC_LEN);
    buf.put_u8(START_MARKER);
    buf.put_u8(payload.len() as u8);
    buf.put_u8(GIMBAL_SYSTEM_ID);
    buf.put_u8(GIMBAL_COMPONENT_ID);
    buf.put_u8(sequence);
    buf.put_u8(CONTROLLER_SYSTEM_ID);
    buf.put_u8(CONTROLLER_COMPONENT_ID);
    buf.put_u8(message_id as u8);
    buf.put_u8((message_id >> 8) as u8);
    buf.put_u8((message_id >> 16) as u8);
    buf.put_slice(payload);

    let crc = crc16(&buf[1..]);
    buf.put_u16_le(crc);
    buf.to_vec()
}

/// Decode one complete datagram into a [`Frame`].
///
/// Returns `None` when the buffer is too short, does not start with
/// [`START_MARKER`], has a length byte that disagrees with the buffer size,
/// or fails the CRC check. Malformed input never panics.
pub fn decode_frame(data: &[u8]) -> Option<Frame> {
    if data.len() < MIN_FRAME_LEN || data[0] != START_MARKER {
        return None;
    }

    let payload_len = data[1] as usize;
    let body_end = HEADER_LEN + payload_len;
    if data.len() != body_end + CRC_LEN {
        return None;
    }

    let expected = u16::from_le_bytes([data[body_end], data[body_end + 1]]);
    if crc16(&data[1..body_end]) != expected {
        return None;
    }

    Some(Frame {
        target_system: data[2],
        target_component: data[3],
        sequence: data[4],
        source_system: data[5],
        source_component: data[6],
        message_id: u32::from_le_bytes([data[7], data[8], data[9], 0]),
        payload: data[HEADER_LEN..body_end].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc_check_value() {
        assert_eq!(crc16(b"123456789"), 0x6F91);
    }

    #[test]
    fn crc_empty_is_seed() {
        assert_eq!(crc16(&[]), 0xFFFF);
    }

    /// Bit-at-a-time reflected CRC-16 (poly 0x8408, seed 0xFFFF).
    fn reflected_crc16(data: &[u8], xor_out: u16) -> u16 {
        let mut crc: u16 = 0xFFFF;
        for &b in data {
            crc ^= u16::from(b);
            for _ in 0..8 {
                crc = if crc & 1 != 0 { (crc >> 1) ^ 0x8408 } else { crc >> 1 };
            }
        }
        crc ^ xor_out
    }

    #[test]
    fn crc_differs_from_x25() {
        let x25 = reflected_crc16(b"123456789", 0xFFFF);
        assert_eq!(x25, 0x906E);
        assert_ne!(crc16(b"123456789"), x25);
    }

    #[test]
    fn crc_matches_bitwise_mcrf4xx() {
        let center = encode_frame(0x000010, &[0x10, 0x02, 0x02, 0x00], 7);
        let inputs: [&[u8]; 4] = [b"123456789", &[0x00], &[0xFF; 17], &center[1..14]];
        for data in inputs {
            assert_eq!(crc16(data), reflected_crc16(data, 0x0000), "{data:02X?}");
        }
    }

    // ---------------------------------------------------------------
    // Encoding
    // ---------------------------------------------------------------

    #[test]
    fn encode_center_seq_7() {
        let bytes = encode_frame(0x000010, &[0x10, 0x02, 0x02, 0x00], 7);
        assert_eq!(
            bytes,
            vec![
                0xFD, 0x04, 0x04, 0x01, 0x07, 0x01, 0x01, 0x10, 0x00, 0x00, 0x10, 0x02, 0x02,
                0x00, 0x90, 0x8E
            ]
        );
        let crc = crc16(&bytes[1..14]);
        assert_eq!(crc.to_le_bytes(), [bytes[14], bytes[15]]);
    }

    #[test]
    fn encode_set_speed() {
        let bytes = encode_frame(0x000017, &[150, 5, 0], 1);
        assert_eq!(
            bytes,
            vec![
                0xFD, 0x03, 0x04, 0x01, 0x01, 0x01, 0x01, 0x17, 0x00, 0x00, 0x96, 0x05, 0x00,
                0x53, 0x46
            ]
        );
    }

    #[test]
    fn encode_empty_payload() {
        let bytes = encode_frame(0x000018, &[], 0);
        assert_eq!(bytes.len(), MIN_FRAME_LEN);
        assert_eq!(bytes[1], 0);
    }

    #[test]
    fn encode_message_id_is_24_bit_le() {
        let bytes = encode_frame(0xAB_030201, &[], 0);
        assert_eq!(&bytes[7..10], &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn encode_truncates_oversized_payload() {
        let payload = vec![0x55u8; 300];
        let bytes = encode_frame(0x000302, &payload, 0);
        assert_eq!(bytes[1], 255);
        assert_eq!(bytes.len(), HEADER_LEN + 255 + CRC_LEN);
        assert!(decode_frame(&bytes).is_some());
    }

    // ---------------------------------------------------------------
    // Decoding
    // ---------------------------------------------------------------

    #[test]
    fn decode_recovers_fields() {
        let bytes = encode_frame(0x020303, &[0x00, 0x01, 0x2A, 0x00], 200);
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame.message_id, 0x020303);
        assert_eq!(frame.sequence, 200);
        assert_eq!(frame.payload, vec![0x00, 0x01, 0x2A, 0x00]);
        assert_eq!(frame.target_system, GIMBAL_SYSTEM_ID);
        assert_eq!(frame.target_component, GIMBAL_COMPONENT_ID);
        assert_eq!(frame.source_system, CONTROLLER_SYSTEM_ID);
        assert_eq!(frame.source_component, CONTROLLER_COMPONENT_ID);
    }

    #[test]
    fn decode_drops_high_id_byte() {
        let bytes = encode_frame(0xFF_010012, &[0, 0], 3);
        assert_eq!(decode_frame(&bytes).unwrap().message_id, 0x010012);
    }

    #[test]
    fn decode_rejects_short_input() {
        assert_eq!(decode_frame(&[]), None);
        assert_eq!(decode_frame(&[0xFD]), None);
        let bytes = encode_frame(0x000001, &[], 0);
        assert_eq!(decode_frame(&bytes[..MIN_FRAME_LEN - 1]), None);
    }

    #[test]
    fn decode_rejects_bad_marker() {
        let mut bytes = encode_frame(0x000010, &[0x10, 2, 2, 0], 7);
        bytes[0] = 0xFE;
        assert_eq!(decode_frame(&bytes), None);
    }

    #[test]
    fn decode_rejects_length_mismatch() {
        let bytes = encode_frame(0x000010, &[0x10, 2, 2, 0], 7);

        let mut longer = bytes.clone();
        longer.push(0x00);
        assert_eq!(decode_frame(&longer), None);

        let mut declared_short = bytes.clone();
        declared_short[1] = 3;
        assert_eq!(decode_frame(&declared_short), None);

        let mut declared_long = bytes;
        declared_long[1] = 5;
        assert_eq!(decode_frame(&declared_long), None);
    }

    #[test]
    fn decode_rejects_every_single_bit_flip() {
        let bytes = encode_frame(0x000004, &[0x12, 0x34, 0x56, 0x78, 0x9A], 42);
        let crc_start = bytes.len() - CRC_LEN;
        for i in 0..crc_start {
            for bit in 0..8 {
                let mut corrupted = bytes.clone();
                corrupted[i] ^= 1 << bit;
                assert_eq!(
                    decode_frame(&corrupted),
                    None,
                    "flip of byte {i} bit {bit} was accepted"
                );
            }
        }
    }

    #[test]
    fn decode_rejects_corrupt_crc() {
        let mut bytes = encode_frame(0x000002, &[0; 20], 9);
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert_eq!(decode_frame(&bytes), None);
    }
}
