//! V-Series parameter table schemas
//!
//! One schema constant per record kind, frozen at compile time. Field order
//! here is wire order; see the crate docs for the full payload layout.

use super::record::{ChildSpec, CompositeRecord, CompositeSchema, FieldSpec, LeafSchema, Schema};
use super::value::{EnumKind, ValueKind};
use super::{Error, Result};

const fn int(name: &'static str, default: u8) -> FieldSpec {
    FieldSpec {
        name,
        kind: ValueKind::Int,
        default,
    }
}

const fn mode(name: &'static str, kind: EnumKind, default: u8) -> FieldSpec {
    FieldSpec {
        name,
        kind: ValueKind::Enum(kind),
        default,
    }
}

const fn slot(name: &'static str, schema: Schema) -> ChildSpec {
    ChildSpec {
        name,
        schema,
        overrides: &[],
    }
}

const fn slot_with(
    name: &'static str,
    schema: Schema,
    overrides: &'static [(&'static str, u8)],
) -> ChildSpec {
    ChildSpec {
        name,
        schema,
        overrides,
    }
}

/// Keyboard section
pub static KEYS: LeafSchema = LeafSchema {
    name: "Keys",
    fields: &[
        int("base_note", 0x0c),
        int("octave", 0x02),
        int("channel", 0x00),
        int("curve", 0x00),
    ],
};

/// Pitch wheel
pub static PITCH_WHEEL: LeafSchema = LeafSchema {
    name: "PitchWheel",
    fields: &[int("channel", 0x00)],
};

/// Modulation wheel
pub static MOD_WHEEL: LeafSchema = LeafSchema {
    name: "ModWheel",
    fields: &[
        int("channel", 0x00),
        int("cc", 0x01),
        int("min", 0x00),
        int("max", 0x7f),
    ],
};

/// Sustain pedal input
pub static SUSTAIN: LeafSchema = LeafSchema {
    name: "Sustain",
    fields: &[
        int("cc", 0x40),
        int("min", 0x00),
        int("max", 0x7f),
        int("channel", 0x00),
    ],
};

/// One rotary knob
pub static KNOB: LeafSchema = LeafSchema {
    name: "Knob",
    fields: &[
        mode("mode", EnumKind::KnobMode, 0x00),
        int("cc", 0xff), // intentionally invalid, overridden per slot
        int("min", 0x00),
        int("max", 0x7f),
        int("channel", 0x00),
    ],
};

/// The four knobs, each with its factory controller number
pub static KNOBS: CompositeSchema = CompositeSchema {
    name: "Knobs",
    children: &[
        slot_with("knob1", Schema::Leaf(&KNOB), &[("cc", 0x14)]),
        slot_with("knob2", Schema::Leaf(&KNOB), &[("cc", 0x15)]),
        slot_with("knob3", Schema::Leaf(&KNOB), &[("cc", 0x16)]),
        slot_with("knob4", Schema::Leaf(&KNOB), &[("cc", 0x17)]),
    ],
};

/// One drum pad
pub static PAD: LeafSchema = LeafSchema {
    name: "Pad",
    fields: &[
        mode("mode", EnumKind::PadMode, 0x00),
        int("note", 0xff), // intentionally invalid, overridden per slot
        int("fixed", 0x00),
        int("curve", 0x00),
        int("channel", 0x09),
    ],
};

/// The eight pads, each with its factory note assignment
pub static PADS: CompositeSchema = CompositeSchema {
    name: "Pads",
    children: &[
        slot_with("pad1", Schema::Leaf(&PAD), &[("note", 0x31)]),
        slot_with("pad2", Schema::Leaf(&PAD), &[("note", 0x20)]),
        slot_with("pad3", Schema::Leaf(&PAD), &[("note", 0x2a)]),
        slot_with("pad4", Schema::Leaf(&PAD), &[("note", 0x2e)]),
        slot_with("pad5", Schema::Leaf(&PAD), &[("note", 0x24)]),
        slot_with("pad6", Schema::Leaf(&PAD), &[("note", 0x25)]),
        slot_with("pad7", Schema::Leaf(&PAD), &[("note", 0x26)]),
        slot_with("pad8", Schema::Leaf(&PAD), &[("note", 0x27)]),
    ],
};

/// One assignable button
pub static BUTTON: LeafSchema = LeafSchema {
    name: "Button",
    fields: &[
        mode("mode", EnumKind::ButtonMode, 0x00),
        int("cc", 0xff), // intentionally invalid, overridden per slot
        int("on", 0x7f),
        int("off", 0x00),
        int("channel", 0x00),
    ],
};

/// The four buttons, each with its factory controller number
pub static BUTTONS: CompositeSchema = CompositeSchema {
    name: "Buttons",
    children: &[
        slot_with("button1", Schema::Leaf(&BUTTON), &[("cc", 0x30)]),
        slot_with("button2", Schema::Leaf(&BUTTON), &[("cc", 0x31)]),
        slot_with("button3", Schema::Leaf(&BUTTON), &[("cc", 0x32)]),
        slot_with("button4", Schema::Leaf(&BUTTON), &[("cc", 0x33)]),
    ],
};

/// The full parameter table, in wire order
pub static DEVICE_CONFIG: CompositeSchema = CompositeSchema {
    name: "DeviceConfig",
    children: &[
        slot("keys", Schema::Leaf(&KEYS)),
        slot("pwheel", Schema::Leaf(&PITCH_WHEEL)),
        slot("mwheel", Schema::Leaf(&MOD_WHEEL)),
        slot("sustain", Schema::Leaf(&SUSTAIN)),
        slot("knobs", Schema::Composite(&KNOBS)),
        slot("pads", Schema::Composite(&PADS)),
        slot("buttons", Schema::Composite(&BUTTONS)),
    ],
};

/// One complete device configuration snapshot
///
/// A typed wrapper over the top-level record. Its serialization is the bare
/// payload carried by update/reply frames and written verbatim by the file
/// backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig(CompositeRecord);

impl DeviceConfig {
    /// Serialized payload width
    #[must_use]
    pub fn num_bytes() -> usize {
        DEVICE_CONFIG.num_bytes()
    }

    /// Wrap a top-level record, rejecting any other record kind
    pub fn from_record(record: CompositeRecord) -> Result<Self> {
        if std::ptr::eq(record.schema(), &DEVICE_CONFIG) {
            Ok(Self(record))
        } else {
            Err(Error::ChildKindMismatch {
                record: DEVICE_CONFIG.name,
                slot: "config",
                expected: DEVICE_CONFIG.name,
                got: record.schema().name,
            })
        }
    }

    /// Borrow the underlying record
    #[must_use]
    pub const fn record(&self) -> &CompositeRecord {
        &self.0
    }

    /// Mutably borrow the underlying record
    pub const fn record_mut(&mut self) -> &mut CompositeRecord {
        &mut self.0
    }

    /// Serialized payload
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        self.0.serialize()
    }

    /// Append the serialized payload
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        self.0.serialize_into(out);
    }

    /// Decode a snapshot from exactly [`DeviceConfig::num_bytes`] bytes
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        CompositeRecord::deserialize(&DEVICE_CONFIG, bytes).map(Self)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self(CompositeRecord::new(&DEVICE_CONFIG))
    }
}
