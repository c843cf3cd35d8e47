//! Test fixtures and configuration helpers
//!
//! Provides the scenario clock, a baseline interface configuration and a
//! fully wired [`TestLink`].

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use l16gw_common::{HeaderType, InterfaceConfig, LabelNpgPair};
use l16gw_header::TimeSlotClock;
use l16gw_interface::{EntityId, LinkInterface, PlatformIndex, Sender};

use crate::mock_codec::{MockCodec, TestMessage};
use crate::mock_coordinator::MockCoordinator;
use crate::mock_transport::MockTransport;

/// Local platform published as [`ENTITY_A`]
pub const PLATFORM_A: PlatformIndex = 1;

/// Local platform published as [`ENTITY_B`]
pub const PLATFORM_B: PlatformIndex = 2;

/// Local platform with no transport entity
pub const UNKNOWN_PLATFORM: PlatformIndex = 99;

pub const ENTITY_A: EntityId = EntityId {
    site: 1,
    application: 10,
    entity: 100,
};

pub const ENTITY_B: EntityId = EntityId {
    site: 1,
    application: 10,
    entity: 200,
};

/// Scenario start: 06:00:05, five seconds into a frame (slot offset 640)
pub fn test_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(6, 0, 5))
        .expect("valid scenario start")
}

pub fn test_clock() -> TimeSlotClock {
    TimeSlotClock::new(test_start())
}

/// Header 100, J31.7 fill on, TSA level 1, label 3 routed to NPG 15.
pub fn base_config() -> InterfaceConfig {
    InterfaceConfig {
        tdl_header: HeaderType::Tdl100,
        fill_with_31_7: true,
        tsa_level: 1,
        label_npg_pairs: vec![LabelNpgPair { label: 3, npg: 15 }],
        ..InterfaceConfig::default()
    }
}

/// A link interface wired to mock collaborators
pub struct TestLink {
    pub link: LinkInterface<MockCodec>,
    pub transport: MockTransport,
    pub coordinator: MockCoordinator,
    /// Messages delivered to the subscriber, with their simulation time
    pub received: Rc<RefCell<Vec<(f64, TestMessage)>>>,
}

impl TestLink {
    /// Builds a link with [`PLATFORM_A`] and [`PLATFORM_B`] published.
    pub fn new(config: InterfaceConfig) -> Self {
        let transport = MockTransport::new();
        transport.add_entity(PLATFORM_A, ENTITY_A);
        transport.add_entity(PLATFORM_B, ENTITY_B);

        let coordinator = MockCoordinator::new();
        let mut link = LinkInterface::new(config, test_clock(), MockCodec, Box::new(transport.clone()))
            .expect("valid test configuration")
            .with_coordinator(Box::new(coordinator.clone()));

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        link.subscribe(Box::new(move |sim_time, message: &TestMessage| {
            sink.borrow_mut().push((sim_time, message.clone()));
        }));

        Self {
            link,
            transport,
            coordinator,
            received,
        }
    }

    /// Builds a link from [`base_config`].
    pub fn with_defaults() -> Self {
        Self::new(base_config())
    }

    pub fn sender_a() -> Sender {
        Sender::new(PLATFORM_A)
    }

    pub fn sender_b() -> Sender {
        Sender::new(PLATFORM_B)
    }

    /// Messages delivered to the subscriber so far.
    pub fn received_messages(&self) -> Vec<TestMessage> {
        self.received.borrow().iter().map(|(_, message)| message.clone()).collect()
    }
}
