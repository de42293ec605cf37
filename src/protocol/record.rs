//! Schema-driven record engine
//!
//! A record is the unit of fixed-width struct packing: an ordered, named
//! collection of one-byte fields (leaf) or nested records (composite). The
//! shape of every record kind is frozen in a `'static` schema table; instances
//! carry a reference to their schema plus owned per-slot storage. Serialized
//! width is a property of the schema alone, never of field values.

use super::{Error, Result, Value, ValueKind};

/// Descriptor for one leaf field: name, value kind, default wire byte
#[derive(Debug)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Value kind for this slot
    pub kind: ValueKind,
    /// Default wire byte, decoded fresh per construction
    pub default: u8,
}

/// Schema for a leaf record kind
#[derive(Debug)]
pub struct LeafSchema {
    /// Record kind name
    pub name: &'static str,
    /// Ordered field descriptors
    pub fields: &'static [FieldSpec],
}

impl LeafSchema {
    /// Serialized width: one byte per field
    #[must_use]
    pub const fn num_bytes(&self) -> usize {
        self.fields.len()
    }

    fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Descriptor for one composite slot: name, required record kind, and
/// default-overrides patched onto the child's own defaults
#[derive(Debug)]
pub struct ChildSpec {
    /// Slot name
    pub name: &'static str,
    /// Required record kind for this slot
    pub schema: Schema,
    /// `(field, wire byte)` pairs overriding the child's defaults
    pub overrides: &'static [(&'static str, u8)],
}

/// Schema for a composite record kind
#[derive(Debug)]
pub struct CompositeSchema {
    /// Record kind name
    pub name: &'static str,
    /// Ordered slot descriptors
    pub children: &'static [ChildSpec],
}

impl CompositeSchema {
    /// Serialized width: sum of the children's widths
    #[must_use]
    pub fn num_bytes(&self) -> usize {
        self.children.iter().map(|c| c.schema.num_bytes()).sum()
    }

    fn child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name == name)
    }
}

/// Closed leaf/composite tag over schema references
///
/// Identity is reference identity: two slots require the same kind exactly
/// when they point at the same schema table.
#[derive(Debug, Clone, Copy)]
pub enum Schema {
    /// Leaf record kind
    Leaf(&'static LeafSchema),
    /// Composite record kind
    Composite(&'static CompositeSchema),
}

impl Schema {
    /// Record kind name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Leaf(s) => s.name,
            Self::Composite(s) => s.name,
        }
    }

    /// Serialized width of any instance of this kind
    #[must_use]
    pub fn num_bytes(self) -> usize {
        match self {
            Self::Leaf(s) => s.num_bytes(),
            Self::Composite(s) => s.num_bytes(),
        }
    }

    /// Build an instance populated with schema defaults
    #[must_use]
    pub fn instantiate(self) -> Record {
        match self {
            Self::Leaf(s) => Record::Leaf(LeafRecord::new(s)),
            Self::Composite(s) => Record::Composite(CompositeRecord::new(s)),
        }
    }

    /// Decode an instance from exactly `num_bytes()` bytes
    pub fn deserialize(self, bytes: &[u8]) -> Result<Record> {
        match self {
            Self::Leaf(s) => LeafRecord::deserialize(s, bytes).map(Record::Leaf),
            Self::Composite(s) => CompositeRecord::deserialize(s, bytes).map(Record::Composite),
        }
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => std::ptr::eq(*a, *b),
            (Self::Composite(a), Self::Composite(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for Schema {}

/// Leaf record instance: one owned value per schema field
#[derive(Debug, Clone)]
pub struct LeafRecord {
    schema: &'static LeafSchema,
    values: Vec<Value>,
}

impl LeafRecord {
    /// Build an instance from the schema defaults
    ///
    /// Each default is decoded fresh; instances never share field storage.
    #[must_use]
    pub fn new(schema: &'static LeafSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| f.kind.decode(f.default).expect("schema defaults are valid"))
            .collect();
        Self { schema, values }
    }

    /// Build an instance from positional values
    ///
    /// The argument count must equal the schema arity exactly, and each value
    /// must match its slot's kind.
    pub fn from_values(schema: &'static LeafSchema, values: Vec<Value>) -> Result<Self> {
        if values.len() != schema.fields.len() {
            return Err(Error::ArgumentCount {
                record: schema.name,
                expected: schema.fields.len(),
                got: values.len(),
            });
        }
        for (spec, value) in schema.fields.iter().zip(&values) {
            if !spec.kind.accepts(*value) {
                return Err(Error::FieldKindMismatch {
                    record: schema.name,
                    field: spec.name,
                    expected: spec.kind.name(),
                    got: value.kind().name(),
                });
            }
        }
        Ok(Self { schema, values })
    }

    /// Build an instance from defaults plus named overrides
    pub fn with_fields<'a, I>(schema: &'static LeafSchema, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut record = Self::new(schema);
        for (name, value) in fields {
            record.set(name, value)?;
        }
        Ok(record)
    }

    /// Schema this instance was built from
    #[must_use]
    pub const fn schema(&self) -> &'static LeafSchema {
        self.schema
    }

    /// Serialized width
    #[must_use]
    pub const fn num_bytes(&self) -> usize {
        self.schema.num_bytes()
    }

    /// Read a field by name
    pub fn get(&self, field: &str) -> Result<Value> {
        self.schema
            .field_index(field)
            .map(|i| self.values[i])
            .ok_or_else(|| Error::UnknownField {
                record: self.schema.name,
                field: field.to_owned(),
            })
    }

    /// Write a field by name, kind-checked against the schema slot
    pub fn set(&mut self, field: &str, value: Value) -> Result<()> {
        let Some(index) = self.schema.field_index(field) else {
            return Err(Error::UnknownField {
                record: self.schema.name,
                field: field.to_owned(),
            });
        };
        let spec = &self.schema.fields[index];
        if !spec.kind.accepts(value) {
            return Err(Error::FieldKindMismatch {
                record: self.schema.name,
                field: spec.name,
                expected: spec.kind.name(),
                got: value.kind().name(),
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Append the wire encoding, one byte per field in schema order
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        out.extend(self.values.iter().map(|v| v.as_int()));
    }

    /// Wire encoding as an owned buffer
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.num_bytes());
        self.serialize_into(&mut out);
        out
    }

    /// Decode from exactly `schema.num_bytes()` bytes
    pub fn deserialize(schema: &'static LeafSchema, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != schema.num_bytes() {
            return Err(Error::PayloadLength {
                record: schema.name,
                expected: schema.num_bytes(),
                got: bytes.len(),
            });
        }
        let values = schema
            .fields
            .iter()
            .zip(bytes)
            .map(|(spec, &byte)| spec.kind.decode(byte))
            .collect::<Result<Vec<_>>>()?;
        Self::from_values(schema, values)
    }
}

impl PartialEq for LeafRecord {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl Eq for LeafRecord {}

/// Composite record instance: one owned child record per schema slot
#[derive(Debug, Clone)]
pub struct CompositeRecord {
    schema: &'static CompositeSchema,
    children: Vec<Record>,
}

impl CompositeRecord {
    /// Build an instance from the schema defaults, with each slot's
    /// overrides patched onto its child's own defaults
    #[must_use]
    pub fn new(schema: &'static CompositeSchema) -> Self {
        let children = schema
            .children
            .iter()
            .map(|slot| {
                let mut child = slot.schema.instantiate();
                for &(field, byte) in slot.overrides {
                    child.set_default_byte(field, byte);
                }
                child
            })
            .collect();
        Self { schema, children }
    }

    /// Build an instance from positional children
    ///
    /// The argument count must equal the schema arity exactly, and each
    /// child's kind must match its slot's required kind.
    pub fn from_children(schema: &'static CompositeSchema, children: Vec<Record>) -> Result<Self> {
        if children.len() != schema.children.len() {
            return Err(Error::ArgumentCount {
                record: schema.name,
                expected: schema.children.len(),
                got: children.len(),
            });
        }
        for (slot, child) in schema.children.iter().zip(&children) {
            if child.schema() != slot.schema {
                return Err(Error::ChildKindMismatch {
                    record: schema.name,
                    slot: slot.name,
                    expected: slot.schema.name(),
                    got: child.schema().name(),
                });
            }
        }
        Ok(Self { schema, children })
    }

    /// Build an instance from defaults plus named child overrides
    pub fn with_children<'a, I>(schema: &'static CompositeSchema, children: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Record)>,
    {
        let mut record = Self::new(schema);
        for (name, child) in children {
            record.set_child(name, child)?;
        }
        Ok(record)
    }

    /// Schema this instance was built from
    #[must_use]
    pub const fn schema(&self) -> &'static CompositeSchema {
        self.schema
    }

    /// Serialized width
    #[must_use]
    pub fn num_bytes(&self) -> usize {
        self.schema.num_bytes()
    }

    /// Borrow a child by slot name
    pub fn child(&self, name: &str) -> Result<&Record> {
        self.schema
            .child_index(name)
            .map(|i| &self.children[i])
            .ok_or_else(|| Error::UnknownChild {
                record: self.schema.name,
                slot: name.to_owned(),
            })
    }

    /// Mutably borrow a child by slot name
    pub fn child_mut(&mut self, name: &str) -> Result<&mut Record> {
        let Some(index) = self.schema.child_index(name) else {
            return Err(Error::UnknownChild {
                record: self.schema.name,
                slot: name.to_owned(),
            });
        };
        Ok(&mut self.children[index])
    }

    /// Replace a child by slot name, kind-checked against the slot
    pub fn set_child(&mut self, name: &str, child: Record) -> Result<()> {
        let Some(index) = self.schema.child_index(name) else {
            return Err(Error::UnknownChild {
                record: self.schema.name,
                slot: name.to_owned(),
            });
        };
        let slot = &self.schema.children[index];
        if child.schema() != slot.schema {
            return Err(Error::ChildKindMismatch {
                record: self.schema.name,
                slot: slot.name,
                expected: slot.schema.name(),
                got: child.schema().name(),
            });
        }
        self.children[index] = child;
        Ok(())
    }

    /// Append the wire encoding of every child in schema order
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        for child in &self.children {
            child.serialize_into(out);
        }
    }

    /// Wire encoding as an owned buffer
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.num_bytes());
        self.serialize_into(&mut out);
        out
    }

    /// Decode from exactly `schema.num_bytes()` bytes, each child consuming
    /// its own width from the buffer in schema order
    pub fn deserialize(schema: &'static CompositeSchema, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != schema.num_bytes() {
            return Err(Error::PayloadLength {
                record: schema.name,
                expected: schema.num_bytes(),
                got: bytes.len(),
            });
        }
        let mut rest = bytes;
        let mut children = Vec::with_capacity(schema.children.len());
        for slot in schema.children {
            let (chunk, tail) = rest.split_at(slot.schema.num_bytes());
            children.push(slot.schema.deserialize(chunk)?);
            rest = tail;
        }
        Self::from_children(schema, children)
    }
}

impl PartialEq for CompositeRecord {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.children == other.children
    }
}

impl Eq for CompositeRecord {}

/// Closed leaf/composite tag over record instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Leaf instance
    Leaf(LeafRecord),
    /// Composite instance
    Composite(CompositeRecord),
}

impl Record {
    /// Schema this instance was built from
    #[must_use]
    pub fn schema(&self) -> Schema {
        match self {
            Self::Leaf(r) => Schema::Leaf(r.schema()),
            Self::Composite(r) => Schema::Composite(r.schema()),
        }
    }

    /// Serialized width
    #[must_use]
    pub fn num_bytes(&self) -> usize {
        self.schema().num_bytes()
    }

    /// Append the wire encoding
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Leaf(r) => r.serialize_into(out),
            Self::Composite(r) => r.serialize_into(out),
        }
    }

    /// Wire encoding as an owned buffer
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.num_bytes());
        self.serialize_into(&mut out);
        out
    }

    /// Leaf projection
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafRecord> {
        match self {
            Self::Leaf(r) => Some(r),
            Self::Composite(_) => None,
        }
    }

    /// Mutable leaf projection
    pub const fn as_leaf_mut(&mut self) -> Option<&mut LeafRecord> {
        match self {
            Self::Leaf(r) => Some(r),
            Self::Composite(_) => None,
        }
    }

    /// Composite projection
    #[must_use]
    pub const fn as_composite(&self) -> Option<&CompositeRecord> {
        match self {
            Self::Leaf(_) => None,
            Self::Composite(r) => Some(r),
        }
    }

    /// Mutable composite projection
    pub const fn as_composite_mut(&mut self) -> Option<&mut CompositeRecord> {
        match self {
            Self::Leaf(_) => None,
            Self::Composite(r) => Some(r),
        }
    }

    /// Patch one default field while building a composite's slot defaults.
    /// Overrides in schema tables only ever target leaf fields.
    fn set_default_byte(&mut self, field: &'static str, byte: u8) {
        let leaf = self
            .as_leaf_mut()
            .expect("schema overrides target leaf children");
        let value = leaf
            .schema()
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.kind.decode(byte).expect("schema overrides are valid"))
            .expect("schema overrides name declared fields");
        leaf.set(field, value).expect("schema overrides name declared fields");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::model::{KEYS, KNOB, KNOBS};
    use crate::protocol::{EnumKind, Value};

    fn keys_positional() -> LeafRecord {
        LeafRecord::from_values(
            &KEYS,
            vec![
                Value::Int(0x01),
                Value::Int(0x02),
                Value::Int(0x03),
                Value::Int(0x04),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_positional_construction() {
        let k = keys_positional();
        assert_eq!(k.get("base_note").unwrap().as_int(), 0x01);
        assert_eq!(k.get("octave").unwrap().as_int(), 0x02);
        assert_eq!(k.get("channel").unwrap().as_int(), 0x03);
        assert_eq!(k.get("curve").unwrap().as_int(), 0x04);
    }

    #[test]
    fn test_positional_arity_checked() {
        let err = LeafRecord::from_values(&KEYS, vec![Value::Int(0x01)]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArgumentCount {
                record: "Keys",
                expected: 4,
                got: 1
            }
        ));
    }

    #[test]
    fn test_keyword_construction() {
        let k = LeafRecord::with_fields(&KEYS, [("octave", Value::Int(0x99))]).unwrap();
        assert_eq!(k.get("octave").unwrap().as_int(), 0x99);
        assert_eq!(k.get("base_note").unwrap().as_int(), 0x0c);
    }

    #[test]
    fn test_keyword_unknown_field() {
        let err = LeafRecord::with_fields(&KEYS, [("foo", Value::Int(0x99))]).unwrap_err();
        assert!(matches!(err, Error::UnknownField { record: "Keys", .. }));
    }

    #[test]
    fn test_get_unknown_field() {
        let k = LeafRecord::new(&KEYS);
        assert!(matches!(
            k.get("foo"),
            Err(Error::UnknownField { record: "Keys", .. })
        ));
    }

    #[test]
    fn test_set_kind_checked() {
        let mut knob = LeafRecord::new(&KNOB);
        let err = knob.set("mode", Value::Int(0x00)).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldKindMismatch {
                record: "Knob",
                field: "mode",
                ..
            }
        ));
        let aftertouch = EnumKind::KnobMode.from_code(0x01).unwrap();
        knob.set("mode", aftertouch.into()).unwrap();
        assert_eq!(knob.get("mode").unwrap().as_int(), 0x01);
    }

    #[test]
    fn test_serialize_schema_order() {
        let k = LeafRecord::from_values(
            &KEYS,
            vec![
                Value::Int(0x0a),
                Value::Int(0x0b),
                Value::Int(0x0c),
                Value::Int(0x0d),
            ],
        )
        .unwrap();
        assert_eq!(k.serialize(), vec![0x0a, 0x0b, 0x0c, 0x0d]);
    }

    #[test]
    fn test_deserialize_positional_order() {
        let k = LeafRecord::deserialize(&KEYS, &[0x0d, 0x0c, 0x0b, 0x0a]).unwrap();
        assert_eq!(k.get("base_note").unwrap().as_int(), 0x0d);
        assert_eq!(k.get("curve").unwrap().as_int(), 0x0a);
    }

    #[test]
    fn test_deserialize_length_checked() {
        let err = LeafRecord::deserialize(&KEYS, &[0x00; 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::PayloadLength {
                record: "Keys",
                expected: 4,
                got: 3
            }
        ));
        let err = LeafRecord::deserialize(&KEYS, &[0x00; 5]).unwrap_err();
        assert!(matches!(err, Error::PayloadLength { got: 5, .. }));
    }

    #[test]
    fn test_leaf_roundtrip() {
        let k = keys_positional();
        assert_eq!(LeafRecord::deserialize(&KEYS, &k.serialize()).unwrap(), k);
    }

    #[test]
    fn test_copy_independence() {
        let mut a = LeafRecord::with_fields(&KEYS, [("octave", Value::Int(0x00))]).unwrap();
        let mut b = a.clone();

        a.set("octave", Value::Int(0xaa)).unwrap();
        assert_eq!(a.get("octave").unwrap().as_int(), 0xaa);
        assert_eq!(b.get("octave").unwrap().as_int(), 0x00);

        b.set("octave", Value::Int(0xbb)).unwrap();
        assert_eq!(a.get("octave").unwrap().as_int(), 0xaa);
        assert_eq!(b.get("octave").unwrap().as_int(), 0xbb);
    }

    #[test]
    fn test_composite_copy_independence() {
        let a = CompositeRecord::new(&KNOBS);
        let mut b = a.clone();
        b.child_mut("knob1")
            .unwrap()
            .as_leaf_mut()
            .unwrap()
            .set("cc", Value::Int(0x10))
            .unwrap();
        let knob1 = |r: &CompositeRecord| {
            r.child("knob1")
                .unwrap()
                .as_leaf()
                .unwrap()
                .get("cc")
                .unwrap()
                .as_int()
        };
        assert_eq!(knob1(&a), 0x14);
        assert_eq!(knob1(&b), 0x10);
    }

    #[test]
    fn test_composite_positional_kind_checked() {
        let keys = Record::Leaf(LeafRecord::new(&KEYS));
        let err = CompositeRecord::from_children(&KNOBS, vec![keys.clone(), keys.clone(), keys.clone(), keys])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ChildKindMismatch {
                record: "Knobs",
                slot: "knob1",
                expected: "Knob",
                got: "Keys"
            }
        ));
    }

    #[test]
    fn test_composite_arity_checked() {
        let knob = Record::Leaf(LeafRecord::new(&KNOB));
        let err = CompositeRecord::from_children(&KNOBS, vec![knob]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArgumentCount {
                record: "Knobs",
                expected: 4,
                got: 1
            }
        ));
    }

    #[test]
    fn test_composite_unknown_slot() {
        let mut knobs = CompositeRecord::new(&KNOBS);
        assert!(matches!(
            knobs.child("knob5"),
            Err(Error::UnknownChild { record: "Knobs", .. })
        ));
        let err = knobs
            .set_child("knob5", Record::Leaf(LeafRecord::new(&KNOB)))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownChild { record: "Knobs", .. }));
    }

    #[test]
    fn test_composite_keyword_construction() {
        let loud = LeafRecord::with_fields(&KNOB, [("cc", Value::Int(0x2a))]).unwrap();
        let knobs =
            CompositeRecord::with_children(&KNOBS, [("knob3", Record::Leaf(loud))]).unwrap();
        let cc = |name: &str| {
            knobs
                .child(name)
                .unwrap()
                .as_leaf()
                .unwrap()
                .get("cc")
                .unwrap()
                .as_int()
        };
        assert_eq!(cc("knob3"), 0x2a);
        assert_eq!(cc("knob1"), 0x14);

        let err = CompositeRecord::with_children(
            &KNOBS,
            [("knob9", Record::Leaf(LeafRecord::new(&KNOB)))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownChild { record: "Knobs", .. }));
    }

    #[test]
    fn test_num_bytes_is_value_independent() {
        let defaults = CompositeRecord::new(&KNOBS);
        let mut changed = defaults.clone();
        changed
            .child_mut("knob4")
            .unwrap()
            .as_leaf_mut()
            .unwrap()
            .set("max", Value::Int(0x00))
            .unwrap();
        assert_eq!(defaults.serialize().len(), defaults.num_bytes());
        assert_eq!(changed.serialize().len(), defaults.num_bytes());
    }

    #[test]
    fn test_schema_identity() {
        assert_eq!(Schema::Leaf(&KNOB), Schema::Leaf(&KNOB));
        assert_ne!(Schema::Leaf(&KNOB), Schema::Leaf(&KEYS));
        assert_ne!(Schema::Leaf(&KNOB), Schema::Composite(&KNOBS));
    }
}
