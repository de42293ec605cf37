//! Device-level error types

use thiserror::Error;

use crate::protocol::MessageKind;

/// Errors from talking to a device or backing file
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The frame or payload did not encode/decode cleanly
    #[error("protocol error: {0}")]
    Protocol(#[from] crate::protocol::Error),

    /// Underlying transport or filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device answered a query with something other than a reply
    #[error("unexpected answer to query: got '{got}' message")]
    UnexpectedReply {
        /// Kind of the message actually received
        got: MessageKind,
    },

    /// The configuration read back after an update does not match the one
    /// written
    #[error("update not applied: device configuration differs after write")]
    UpdateNotApplied,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DeviceError>;
