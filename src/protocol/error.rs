//! Protocol error types

use thiserror::Error;

/// V-Series protocol errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wrong positional argument count for a record constructor
    #[error("invalid argument count for '{record}': expected {expected}, got {got}")]
    ArgumentCount {
        /// Record kind being constructed
        record: &'static str,
        /// Schema arity
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// A value of the wrong kind was supplied for a leaf field
    #[error("invalid value for field '{field}' on '{record}': expected {expected}, got {got}")]
    FieldKindMismatch {
        /// Record kind
        record: &'static str,
        /// Field name
        field: &'static str,
        /// Required value kind
        expected: &'static str,
        /// Supplied value kind
        got: &'static str,
    },

    /// A record of the wrong kind was supplied for a composite slot
    #[error("invalid record for slot '{slot}' on '{record}': expected '{expected}', got '{got}'")]
    ChildKindMismatch {
        /// Composite record kind
        record: &'static str,
        /// Slot name
        slot: &'static str,
        /// Required record kind
        expected: &'static str,
        /// Supplied record kind
        got: &'static str,
    },

    /// Field name not present in a leaf schema
    #[error("unknown field '{field}' on record '{record}'")]
    UnknownField {
        /// Record kind
        record: &'static str,
        /// Offending field name
        field: String,
    },

    /// Slot name not present in a composite schema
    #[error("unknown slot '{slot}' on record '{record}'")]
    UnknownChild {
        /// Composite record kind
        record: &'static str,
        /// Offending slot name
        slot: String,
    },

    /// Enum code not present in the symbol table
    #[error("invalid code {code:#04x} for enum '{kind}'")]
    InvalidEnumCode {
        /// Enum kind name
        kind: &'static str,
        /// Offending code
        code: u8,
    },

    /// Enum name not present in the symbol table
    #[error("invalid name '{name}' for enum '{kind}'")]
    InvalidEnumName {
        /// Enum kind name
        kind: &'static str,
        /// Offending name
        name: String,
    },

    /// Record payload length does not match the schema width
    #[error("invalid payload length for '{record}': expected {expected} bytes, got {got}")]
    PayloadLength {
        /// Record kind being decoded
        record: &'static str,
        /// Schema byte width
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Frame does not begin with the SysEx start byte
    #[error("invalid start byte: expected 0xf0, got {found:#04x}")]
    InvalidStartByte {
        /// Found byte
        found: u8,
    },

    /// A fixed header byte does not match the expected value
    #[error("invalid header byte at offset {offset}: expected {expected:#04x}, got {found:#04x}")]
    InvalidHeaderByte {
        /// Offset within the frame
        offset: usize,
        /// Expected byte
        expected: u8,
        /// Found byte
        found: u8,
    },

    /// Message type code not one of update/query/reply
    #[error("unknown message type: {type_byte:#04x}")]
    UnknownMessageType {
        /// Invalid type byte
        type_byte: u8,
    },

    /// Frame does not end with the SysEx end byte
    #[error("invalid end byte: expected 0xf7, got {found:#04x}")]
    InvalidEndByte {
        /// Found byte
        found: u8,
    },

    /// Frame is shorter or longer than the exact expected length
    #[error("invalid frame length: expected {expected} bytes, got {got}")]
    FrameLength {
        /// Exact frame length for the decoded kind
        expected: usize,
        /// Supplied length
        got: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
