//! Inbound pipeline tests

use bytes::Bytes;
use integration_tests::{
    base_config, inbound_pdu, init_test_logging, test_clock, CoordinatorEvent, TestLink,
    TestMessage, ENTITY_B, PLATFORM_A,
};
use l16gw_common::{HeaderType, InterfaceConfig, SwapMethod};
use l16gw_header::{HeaderCodec, SlotParameters};
use l16gw_interface::{ReceiveError, SignalPdu, ENCODING_RAW_BINARY};

fn header_bytes(sim_time: f64, swap: SwapMethod) -> Vec<u8> {
    let codec = HeaderCodec::new(HeaderType::Tdl100, swap);
    let record = codec.build_record(&test_clock(), 1, sim_time, &SlotParameters::new(15, 1, 3, 4, 100));
    codec.encode(&record).to_vec()
}

#[test]
fn test_j11_routed_to_weapon_coordination() {
    init_test_logging();
    let mut t = TestLink::with_defaults();

    let j11 = TestMessage::new(11, 2, 1);
    let pdu = inbound_pdu(ENTITY_B, 6, &[], &[j11]);
    t.link.receive(3.0, &pdu).unwrap();

    assert!(t.received_messages().is_empty());
    match &t.coordinator.events()[..] {
        [CoordinatorEvent::J11 {
            sim_time,
            sender,
            message,
            sublabel,
        }] => {
            assert_eq!(*sim_time, 3.0);
            assert_eq!(*sender, ENTITY_B);
            assert_eq!(message.label, 11);
            assert_eq!(*sublabel, 2);
        }
        events => panic!("unexpected coordinator events: {events:?}"),
    }
    assert_eq!(t.link.stats().forwarded_j11, 1);
    assert_eq!(t.link.stats().published, 0);
}

#[test]
fn test_short_pdu_rejected() {
    let mut t = TestLink::with_defaults();

    let pdu = inbound_pdu(ENTITY_B, 100, &[0u8; 12], &[]);
    assert_eq!(t.link.receive(1.0, &pdu), Err(ReceiveError::InvalidLength(12)));
    assert!(t.received_messages().is_empty());
    assert!(t.coordinator.events().is_empty());
    assert_eq!(t.link.stats().rejected, 1);
}

#[test]
fn test_unsupported_tdl_type() {
    let mut t = TestLink::with_defaults();
    let pdu = inbound_pdu(ENTITY_B, 7, &[], &[TestMessage::new(3, 0, 1)]);
    assert_eq!(t.link.receive(1.0, &pdu), Err(ReceiveError::UnsupportedType(7)));
    assert!(t.received_messages().is_empty());
}

#[test]
fn test_length_limits() {
    let mut t = TestLink::with_defaults();

    let empty = SignalPdu::new(ENTITY_B, 6, 0, Bytes::new());
    assert_eq!(t.link.receive(1.0, &empty), Err(ReceiveError::InvalidLength(0)));

    let oversize = SignalPdu::new(ENTITY_B, 6, 0, Bytes::from(vec![0u8; 324]));
    assert_eq!(t.link.receive(1.0, &oversize), Err(ReceiveError::InvalidLength(324)));

    let largest = SignalPdu::new(ENTITY_B, 6, 0, Bytes::from(vec![0u8; 320]));
    assert_eq!(t.link.receive(1.0, &largest), Ok(()));
}

#[test]
fn test_publish_with_header() {
    let mut t = TestLink::with_defaults();
    let header = header_bytes(12.0, SwapMethod::FieldsOnly);
    let message = TestMessage::new(3, 2, 2).with_payload(0xCAFE);

    let pdu = inbound_pdu(ENTITY_B, 100, &header, &[message.clone()]);
    t.link.receive(12.5, &pdu).unwrap();

    let received = t.received.borrow().clone();
    assert_eq!(received, vec![(12.5, message)]);

    let last = t.link.last_header().unwrap();
    assert_eq!(last.npg, 15);
    assert_eq!(t.link.to_local_slot(last.slot_index()), 100);
    assert_eq!(t.link.stats().received, 1);
    assert_eq!(t.link.stats().published, 1);
}

#[test]
fn test_inbound_header_uses_configured_swap_method() {
    let config = InterfaceConfig {
        swap_method: SwapMethod::FieldsThenWordBoundary,
        ..base_config()
    };
    let mut t = TestLink::new(config);
    let header = header_bytes(12.0, SwapMethod::FieldsThenWordBoundary);

    let pdu = inbound_pdu(ENTITY_B, 100, &header, &[TestMessage::new(2, 2, 1)]);
    t.link.receive(12.0, &pdu).unwrap();

    let last = t.link.last_header().unwrap();
    assert_eq!(last.npg, 15);
    assert_eq!(last.net_number, 1);
    assert_eq!(t.received_messages().len(), 1);
}

#[test]
fn test_undecodable_message_skipped() {
    let mut t = TestLink::with_defaults();
    let messages = [
        TestMessage::new(3, 2, 1),
        TestMessage::new(30, 0, 1),
        TestMessage::new(2, 2, 2),
    ];

    let pdu = inbound_pdu(ENTITY_B, 6, &[], &messages);
    t.link.receive(1.0, &pdu).unwrap();

    let labels: Vec<_> = t
        .received_messages()
        .iter()
        .map(|message| (message.label, message.sublabel))
        .collect();
    assert_eq!(labels, vec![(3, 2), (2, 2)]);
    assert_eq!(t.link.stats().decode_failures, 1);
}

#[test]
fn test_word_budget_from_encoding_scheme() {
    let mut t = TestLink::with_defaults();
    let messages = [
        TestMessage::new(2, 0, 1),
        TestMessage::new(3, 0, 1),
        TestMessage::new(7, 0, 1),
    ];

    let mut pdu = inbound_pdu(ENTITY_B, 6, &[], &messages);
    pdu.encoding_scheme = ENCODING_RAW_BINARY | 2;
    t.link.receive(1.0, &pdu).unwrap();

    assert_eq!(t.received_messages().len(), 2);
}

#[test]
fn test_ignore_inbound_still_forwards_j11() {
    let config = InterfaceConfig {
        ignore_inbound_messages: true,
        ..base_config()
    };
    let mut t = TestLink::new(config);
    let messages = [TestMessage::new(3, 0, 1), TestMessage::new(11, 1, 1)];

    let pdu = inbound_pdu(ENTITY_B, 6, &[], &messages);
    t.link.receive(1.0, &pdu).unwrap();

    assert!(t.received_messages().is_empty());
    assert_eq!(t.coordinator.j11_count(), 1);
    assert_eq!(t.link.stats().ignored_inbound, 1);
}

#[test]
fn test_global_filter_applies_inbound() {
    let mut t = TestLink::with_defaults();
    t.link.add_filter(None, 3, Some(2));
    // Platform filters only concern local senders
    t.link.add_filter(Some(PLATFORM_A), 2, None);

    let messages = [
        TestMessage::new(3, 2, 1),
        TestMessage::new(3, 3, 1),
        TestMessage::new(2, 0, 1),
    ];
    let pdu = inbound_pdu(ENTITY_B, 6, &[], &messages);
    t.link.receive(1.0, &pdu).unwrap();

    let labels: Vec<_> = t
        .received_messages()
        .iter()
        .map(|message| (message.label, message.sublabel))
        .collect();
    assert_eq!(labels, vec![(3, 3), (2, 0)]);
}

#[test]
fn test_debug_logging_path() {
    init_test_logging();
    let config = InterfaceConfig {
        debug: true,
        ..base_config()
    };
    let mut t = TestLink::new(config);
    let messages = [TestMessage::new(3, 0, 1), TestMessage::new(30, 0, 1)];

    let pdu = inbound_pdu(ENTITY_B, 6, &[], &messages);
    t.link.receive(1.0, &pdu).unwrap();
    assert_eq!(t.received_messages().len(), 1);
}
