//! Mock transport
//!
//! Records every signal and transmitter state record. Clones share state, so
//! a test keeps one handle and gives the interface another.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use l16gw_interface::{EntityId, PlatformIndex, SignalPdu, TransmitterPdu, Transport};

#[derive(Debug, Default)]
struct MockTransportState {
    entities: HashMap<PlatformIndex, EntityId>,
    signals: Vec<(f64, SignalPdu)>,
    transmitters: Vec<(f64, TransmitterPdu)>,
    suppressed: bool,
    initial_distribution_interval: f64,
}

/// Recording transport shared between a test and the interface under test
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockTransportState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `platform` on the transport as `entity_id`.
    pub fn add_entity(&self, platform: PlatformIndex, entity_id: EntityId) {
        self.state.borrow_mut().entities.insert(platform, entity_id);
    }

    pub fn set_suppressed(&self, suppressed: bool) {
        self.state.borrow_mut().suppressed = suppressed;
    }

    pub fn set_initial_distribution_interval(&self, interval: f64) {
        self.state.borrow_mut().initial_distribution_interval = interval;
    }

    /// Signal records sent so far.
    pub fn signals(&self) -> Vec<(f64, SignalPdu)> {
        self.state.borrow().signals.clone()
    }

    /// The most recent signal record.
    pub fn last_signal(&self) -> Option<SignalPdu> {
        self.state.borrow().signals.last().map(|(_, pdu)| pdu.clone())
    }

    /// Transmitter state records sent so far.
    pub fn transmitters(&self) -> Vec<(f64, TransmitterPdu)> {
        self.state.borrow().transmitters.clone()
    }

    /// Removes and returns all recorded signal records.
    pub fn take_signals(&self) -> Vec<(f64, SignalPdu)> {
        std::mem::take(&mut self.state.borrow_mut().signals)
    }
}

impl Transport for MockTransport {
    fn entity_id_for(&self, platform: PlatformIndex) -> Option<EntityId> {
        self.state.borrow().entities.get(&platform).copied()
    }

    fn put_signal(&mut self, sim_time: f64, pdu: SignalPdu) {
        self.state.borrow_mut().signals.push((sim_time, pdu));
    }

    fn put_transmitter(&mut self, sim_time: f64, pdu: TransmitterPdu) {
        self.state.borrow_mut().transmitters.push((sim_time, pdu));
    }

    fn output_suppressed(&self) -> bool {
        self.state.borrow().suppressed
    }

    fn initial_distribution_interval(&self) -> f64 {
        self.state.borrow().initial_distribution_interval
    }
}
