//! SysEx frame codec (encode/decode)
//!
//! # Format
//!
//! ```text
//! [F0] [00 00 0E 00 41] [TYPE] [00 5D] [PAYLOAD?] [F7]
//! ```
//!
//! The payload is the 97-byte serialized configuration for update and reply
//! frames, and absent for query frames. Every fixed byte is validated
//! exactly; a frame with any surplus or missing bytes does not decode.

use bytes::Bytes;

use super::model::DeviceConfig;
use super::{
    END_BYTE, Error, FRAME_OVERHEAD, HEADER_END, HEADER_START, MessageKind, Result, START_BYTE,
    SysexMessage,
};

/// Exact frame length for a message kind
///
/// Lets a caller size a fixed-length read from a streaming transport without
/// constructing a message.
#[must_use]
pub fn frame_len(kind: MessageKind) -> usize {
    if kind.has_payload() {
        FRAME_OVERHEAD + DeviceConfig::num_bytes()
    } else {
        FRAME_OVERHEAD
    }
}

/// Encode a message to one complete frame
#[must_use]
pub fn encode(message: &SysexMessage) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frame_len(message.kind()));

    bytes.push(START_BYTE);
    bytes.extend_from_slice(&HEADER_START);
    bytes.push(message.kind().as_u8());
    bytes.extend_from_slice(&HEADER_END);
    if let Some(config) = message.config() {
        config.serialize_into(&mut bytes);
    }
    bytes.push(END_BYTE);

    bytes
}

/// Decode a message from one complete frame
///
/// # Errors
///
/// Returns an error if:
/// - the frame is shorter or longer than the exact length for its kind
/// - the start byte, any header byte, or the end byte mismatches
/// - the type byte is not update/query/reply
/// - the payload does not decode as a configuration snapshot
pub fn decode(bytes: Bytes) -> Result<SysexMessage> {
    // Everything up to the type byte is fixed, so its position is known
    // before the kind is.
    let type_offset = 1 + HEADER_START.len();
    if bytes.len() < FRAME_OVERHEAD {
        return Err(Error::FrameLength {
            expected: FRAME_OVERHEAD,
            got: bytes.len(),
        });
    }

    if bytes[0] != START_BYTE {
        return Err(Error::InvalidStartByte { found: bytes[0] });
    }
    check_fixed_run(&bytes, 1, &HEADER_START)?;

    let type_byte = bytes[type_offset];
    let kind = MessageKind::from_u8(type_byte).ok_or(Error::UnknownMessageType { type_byte })?;

    check_fixed_run(&bytes, type_offset + 1, &HEADER_END)?;

    let expected_len = frame_len(kind);
    if bytes.len() != expected_len {
        return Err(Error::FrameLength {
            expected: expected_len,
            got: bytes.len(),
        });
    }

    let payload_offset = type_offset + 1 + HEADER_END.len();
    let message = match kind {
        MessageKind::Query => SysexMessage::Query,
        MessageKind::Update => SysexMessage::Update(DeviceConfig::deserialize(
            &bytes[payload_offset..expected_len - 1],
        )?),
        MessageKind::Reply => SysexMessage::Reply(DeviceConfig::deserialize(
            &bytes[payload_offset..expected_len - 1],
        )?),
    };

    let end = bytes[expected_len - 1];
    if end != END_BYTE {
        return Err(Error::InvalidEndByte { found: end });
    }

    Ok(message)
}

fn check_fixed_run(bytes: &[u8], offset: usize, expected: &[u8]) -> Result<()> {
    for (i, &want) in expected.iter().enumerate() {
        let found = bytes[offset + i];
        if found != want {
            return Err(Error::InvalidHeaderByte {
                offset: offset + i,
                expected: want,
                found,
            });
        }
    }
    Ok(())
}
