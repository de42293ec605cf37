//! One-byte parameter values
//!
//! Every parameter the device exposes occupies exactly one wire byte. A
//! value is either an unconstrained integer or a symbol drawn from a fixed
//! per-kind table binding names to codes in both directions.

use std::fmt;

use super::{Error, Result};

/// Enumerated value kinds used by the V-Series parameter table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    /// Knob operating mode
    KnobMode,
    /// Pad operating mode
    PadMode,
    /// Button operating mode
    ButtonMode,
}

impl EnumKind {
    /// Symbol table for this kind, in code order
    #[must_use]
    pub const fn entries(self) -> &'static [(&'static str, u8)] {
        match self {
            Self::KnobMode => &[("CC", 0x00), ("Aftertouch", 0x01)],
            Self::PadMode => &[("Note", 0x00), ("Toggle CC", 0x01), ("Momentary CC", 0x02)],
            Self::ButtonMode => &[("Toggle CC", 0x00), ("Momentary CC", 0x01)],
        }
    }

    /// Kind name as used in error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::KnobMode => "KnobMode",
            Self::PadMode => "PadMode",
            Self::ButtonMode => "ButtonMode",
        }
    }

    /// Bind a wire code to a value of this kind
    pub fn from_code(self, code: u8) -> Result<EnumValue> {
        if self.entries().iter().any(|&(_, c)| c == code) {
            Ok(EnumValue { kind: self, code })
        } else {
            Err(Error::InvalidEnumCode {
                kind: self.name(),
                code,
            })
        }
    }

    /// Bind a symbolic name to a value of this kind
    pub fn from_name(self, name: &str) -> Result<EnumValue> {
        match self.entries().iter().find(|&&(n, _)| n == name) {
            Some(&(_, code)) => Ok(EnumValue { kind: self, code }),
            None => Err(Error::InvalidEnumName {
                kind: self.name(),
                name: name.to_owned(),
            }),
        }
    }
}

impl fmt::Display for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated symbolic value
///
/// Holds a code known to be present in its kind's table, so the name lookup
/// in [`EnumValue::as_str`] cannot miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    kind: EnumKind,
    code: u8,
}

impl EnumValue {
    /// Enum kind this value belongs to
    #[must_use]
    pub const fn kind(self) -> EnumKind {
        self.kind
    }

    /// Bound wire code
    #[must_use]
    pub const fn as_int(self) -> u8 {
        self.code
    }

    /// Bound symbolic name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.kind
            .entries()
            .iter()
            .find(|&&(_, c)| c == self.code)
            .map(|&(n, _)| n)
            .expect("code validated on construction")
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parameter value, exactly one byte on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// Unconstrained 0-255 integer
    Int(u8),
    /// Symbol from a fixed table
    Enum(EnumValue),
}

impl Value {
    /// Raw wire byte
    #[must_use]
    pub const fn as_int(self) -> u8 {
        match self {
            Self::Int(v) => v,
            Self::Enum(e) => e.as_int(),
        }
    }

    /// Descriptor for this value's kind
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Enum(e) => ValueKind::Enum(e.kind()),
        }
    }

    /// Symbol projection, `None` for integers
    #[must_use]
    pub const fn as_enum(self) -> Option<EnumValue> {
        match self {
            Self::Int(_) => None,
            Self::Enum(e) => Some(e),
        }
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

/// Static descriptor for a field's value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Unconstrained one-byte integer
    Int,
    /// Symbol from the given table
    Enum(EnumKind),
}

impl ValueKind {
    /// Wire width of any value of this kind
    #[must_use]
    pub const fn num_bytes(self) -> usize {
        1
    }

    /// Kind name as used in error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Enum(kind) => kind.name(),
        }
    }

    /// Decode one wire byte into a value of this kind
    pub fn decode(self, byte: u8) -> Result<Value> {
        match self {
            Self::Int => Ok(Value::Int(byte)),
            Self::Enum(kind) => kind.from_code(byte).map(Value::Enum),
        }
    }

    /// Check whether a value is of this kind
    #[must_use]
    pub fn accepts(self, value: Value) -> bool {
        value.kind() == self
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
