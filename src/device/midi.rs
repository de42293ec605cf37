//! Transport seam and the device conversation
//!
//! The crate never opens a MIDI port itself. A backend implements
//! [`Transport`] over whatever byte channel it has; [`Device`] drives the
//! query and update conversations on top of it.

use bytes::Bytes;
use tracing::{debug, trace};

use super::error::{DeviceError, Result};
use crate::protocol::{DeviceConfig, SysexMessage};

/// One-frame-at-a-time byte channel to a physical device
pub trait Transport {
    /// Send one complete SysEx frame
    fn send_frame(&mut self, frame: &[u8]) -> std::io::Result<()>;

    /// Receive one complete SysEx frame, blocking until it arrives
    ///
    /// Callers needing bounded waits must layer a timeout into the backend;
    /// this crate defines none.
    fn recv_frame(&mut self) -> std::io::Result<Bytes>;
}

/// A configurable controller reached through a [`Transport`]
#[derive(Debug)]
pub struct Device<T> {
    transport: T,
}

impl<T: Transport> Device<T> {
    /// Wrap a transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Consume the wrapper, returning the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Fetch the device's current configuration
    ///
    /// Sends a query frame and decodes the answer, which must be a reply.
    pub fn query_config(&mut self) -> Result<DeviceConfig> {
        self.send(&SysexMessage::Query)?;
        match self.recv()? {
            SysexMessage::Reply(config) => Ok(config),
            other => Err(DeviceError::UnexpectedReply { got: other.kind() }),
        }
    }

    /// Push a configuration and verify the device took it
    ///
    /// Sends an update frame, queries the configuration back, and compares
    /// serializations byte for byte. A mismatch means the device ignored or
    /// mangled the write.
    pub fn push_config(&mut self, config: &DeviceConfig) -> Result<()> {
        let intended = config.serialize();
        self.send(&SysexMessage::Update(config.clone()))?;

        let current = self.query_config()?;
        if current.serialize() != intended {
            debug!("configuration readback differs from intended bytes");
            return Err(DeviceError::UpdateNotApplied);
        }
        debug!("configuration update verified");
        Ok(())
    }

    fn send(&mut self, message: &SysexMessage) -> Result<()> {
        let frame = message.encode();
        trace!(kind = %message.kind(), len = frame.len(), "sending frame");
        self.transport.send_frame(&frame)?;
        Ok(())
    }

    fn recv(&mut self) -> Result<SysexMessage> {
        let frame = self.transport.recv_frame()?;
        trace!(len = frame.len(), "received frame");
        Ok(SysexMessage::decode(frame)?)
    }
}
