//! SysEx message kinds and the framed message type

use std::fmt;

use bytes::Bytes;

use super::model::DeviceConfig;

/// SysEx message kinds and their type bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Push a desired configuration to the device
    Update = 0x61,
    /// Ask the device for its current configuration
    Query = 0x62,
    /// Device answer carrying its current configuration
    Reply = 0x63,
}

impl MessageKind {
    /// Convert from the wire type byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x61 => Some(Self::Update),
            0x62 => Some(Self::Query),
            0x63 => Some(Self::Reply),
            _ => None,
        }
    }

    /// Convert to the wire type byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether frames of this kind carry a configuration payload
    #[must_use]
    pub const fn has_payload(self) -> bool {
        !matches!(self, Self::Query)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Update => "update",
            Self::Query => "query",
            Self::Reply => "reply",
        };
        f.write_str(name)
    }
}

/// One SysEx message
///
/// Update and reply frames always carry a full configuration snapshot;
/// query frames never do. Holding the snapshot in the variant makes a
/// payload-less update unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SysexMessage {
    /// Configuration request, no payload
    Query,
    /// Desired configuration pushed to the device
    Update(DeviceConfig),
    /// Current configuration reported by the device
    Reply(DeviceConfig),
}

impl SysexMessage {
    /// Message kind tag
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Query => MessageKind::Query,
            Self::Update(_) => MessageKind::Update,
            Self::Reply(_) => MessageKind::Reply,
        }
    }

    /// Carried configuration, `None` for queries
    #[must_use]
    pub const fn config(&self) -> Option<&DeviceConfig> {
        match self {
            Self::Query => None,
            Self::Update(config) | Self::Reply(config) => Some(config),
        }
    }

    /// Carried configuration by value, `None` for queries
    #[must_use]
    pub fn into_config(self) -> Option<DeviceConfig> {
        match self {
            Self::Query => None,
            Self::Update(config) | Self::Reply(config) => Some(config),
        }
    }

    /// Encode to one complete frame
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        super::encode(self)
    }

    /// Decode one complete frame
    pub fn decode(bytes: Bytes) -> super::Result<Self> {
        super::decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [MessageKind::Update, MessageKind::Query, MessageKind::Reply] {
            assert_eq!(MessageKind::from_u8(kind.as_u8()), Some(kind));
        }
        assert_eq!(MessageKind::from_u8(0x64), None);
    }

    #[test]
    fn test_payload_presence() {
        assert!(!MessageKind::Query.has_payload());
        assert!(MessageKind::Update.has_payload());
        assert!(MessageKind::Reply.has_payload());

        assert!(SysexMessage::Query.config().is_none());
        let msg = SysexMessage::Reply(DeviceConfig::default());
        assert!(msg.config().is_some());
        assert_eq!(msg.kind(), MessageKind::Reply);
    }
}
