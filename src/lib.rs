//! SysEx codec and configuration model for Alesis V-Series MIDI controllers
//!
//! The device's full parameter table (keys, wheels, sustain, four knobs,
//! eight pads, four buttons) is described by static schemas and carried as a
//! fixed 97-byte payload inside a vendor SysEx frame. This crate provides the
//! lossless, schema-validated mapping between structured values and those
//! bytes, plus the query/update/reply conversation on top of any transport.
//!
//! # Quick Start
//!
//! ```rust
//! use vsysex::{DeviceConfig, SysexMessage, Value};
//!
//! // Start from factory defaults and retarget the mod wheel
//! let mut config = DeviceConfig::default();
//! config
//!     .record_mut()
//!     .child_mut("mwheel")?
//!     .as_leaf_mut()
//!     .unwrap()
//!     .set("cc", Value::Int(0x21))?;
//!
//! // Frame it for the device
//! let frame = SysexMessage::Update(config).encode();
//!
//! // Decode a frame coming back
//! let decoded = SysexMessage::decode(frame.into())?;
//! assert_eq!(decoded.kind(), vsysex::MessageKind::Update);
//! # Ok::<(), vsysex::Error>(())
//! ```
//!
//! # Wire Format
//!
//! ```text
//! [F0] [00 00 0E 00 41] [TYPE] [00 5D] [PAYLOAD?] [F7]
//! ```
//!
//! with type bytes `0x61` update, `0x62` query, `0x63` reply; update and
//! reply carry the 97-byte payload, query carries none.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod device;
pub mod protocol;

pub use device::{Device, DeviceError, FileDevice, Transport};
pub use protocol::{
    DeviceConfig, EnumKind, EnumValue, Error, MessageKind, Result, SysexMessage, Value, ValueKind,
    decode, encode, frame_len,
};
