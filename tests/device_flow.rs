use std::collections::VecDeque;
use std::io;

use bytes::Bytes;

use vsysex::protocol::model::{DEVICE_CONFIG, KNOBS, PADS};
use vsysex::protocol::record::CompositeRecord;
use vsysex::{Device, DeviceConfig, DeviceError, FileDevice, SysexMessage, Transport, Value};

/// In-memory controller honoring the query/update conversation.
struct SimDevice {
    config: DeviceConfig,
    /// Drop update frames instead of applying them.
    ignore_updates: bool,
    /// Answer queries with an update frame instead of a reply.
    answer_wrong_kind: bool,
    outbound: VecDeque<Bytes>,
}

impl SimDevice {
    fn new() -> Self {
        Self {
            config: DeviceConfig::default(),
            ignore_updates: false,
            answer_wrong_kind: false,
            outbound: VecDeque::new(),
        }
    }
}

impl Transport for SimDevice {
    fn send_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        let message = SysexMessage::decode(Bytes::copy_from_slice(frame))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        match message {
            SysexMessage::Update(config) => {
                if !self.ignore_updates {
                    self.config = config;
                }
            }
            SysexMessage::Query => {
                let answer = if self.answer_wrong_kind {
                    SysexMessage::Update(self.config.clone())
                } else {
                    SysexMessage::Reply(self.config.clone())
                };
                self.outbound.push_back(Bytes::from(answer.encode()));
            }
            SysexMessage::Reply(_) => {}
        }
        Ok(())
    }

    fn recv_frame(&mut self) -> io::Result<Bytes> {
        self.outbound
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::WouldBlock, "no frame pending"))
    }
}

fn retuned_config() -> DeviceConfig {
    let mut config = DeviceConfig::default();
    let knobs = config
        .record_mut()
        .child_mut("knobs")
        .unwrap()
        .as_composite_mut()
        .unwrap();
    knobs
        .child_mut("knob2")
        .unwrap()
        .as_leaf_mut()
        .unwrap()
        .set("cc", Value::Int(0x2a))
        .unwrap();
    config
}

#[test]
fn query_returns_current_config() {
    let mut device = Device::new(SimDevice::new());
    let config = device.query_config().unwrap();
    assert_eq!(config, DeviceConfig::default());
}

#[test]
fn push_then_verify_succeeds() {
    let intended = retuned_config();
    let mut device = Device::new(SimDevice::new());
    device.push_config(&intended).unwrap();

    let readback = device.query_config().unwrap();
    assert_eq!(readback.serialize(), intended.serialize());
}

#[test]
fn push_to_deaf_device_reports_integrity_failure() {
    let mut sim = SimDevice::new();
    sim.ignore_updates = true;
    let mut device = Device::new(sim);

    let err = device.push_config(&retuned_config()).unwrap_err();
    assert!(matches!(err, DeviceError::UpdateNotApplied));
}

#[test]
fn wrong_answer_kind_is_distinct_from_integrity_failure() {
    let mut sim = SimDevice::new();
    sim.answer_wrong_kind = true;
    let mut device = Device::new(sim);

    let err = device.query_config().unwrap_err();
    assert!(matches!(err, DeviceError::UnexpectedReply { .. }));
}

#[test]
fn file_roundtrip_preserves_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileDevice::new(dir.path().join("v25.cfg"));

    let config = retuned_config();
    store.save(&config).unwrap();

    let on_disk = std::fs::read(store.path()).unwrap();
    assert_eq!(on_disk, config.serialize());
    assert_eq!(on_disk.len(), DeviceConfig::num_bytes());

    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn file_of_wrong_length_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileDevice::new(dir.path().join("short.cfg"));
    std::fs::write(store.path(), [0u8; 42]).unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, DeviceError::Protocol(_)));
}

#[test]
fn schema_widths_match_serialized_lengths() {
    let config = CompositeRecord::new(&DEVICE_CONFIG);
    assert_eq!(config.serialize().len(), DEVICE_CONFIG.num_bytes());
    assert_eq!(
        CompositeRecord::new(&KNOBS).serialize().len(),
        KNOBS.num_bytes()
    );
    assert_eq!(
        CompositeRecord::new(&PADS).serialize().len(),
        PADS.num_bytes()
    );
}
