//! Integration test framework for the Link-16 gateway
#![allow(missing_docs)]
//!
//! This crate provides mock collaborators and fixtures for driving a
//! [`LinkInterface`](l16gw_interface::LinkInterface) end to end.
//!
//! # Components
//!
//! - [`mock_codec`] - Minimal J-series codec with a fixed 80-bit word layout
//! - [`mock_transport`] - Recording transport with configurable entities
//! - [`mock_coordinator`] - Recording weapon coordination handler
//! - [`test_fixtures`] - Scenario clock, configurations and a wired-up link
//! - [`test_utils`] - Logging setup and PDU helpers
//!
//! # Test Categories
//!
//! 1. **Outbound pipeline** - header, routing, fill, filtering, raw sends
//! 2. **Inbound pipeline** - validation, demultiplexing, partial decode
//! 3. **Link scenarios** - loopback between interfaces, weapon events, reports

pub mod mock_codec;
pub mod mock_transport;
pub mod test_fixtures;

pub use mock_codec::{MockCodec, TestMessage, FILLER_LABEL, FILLER_SUBLABEL, UNDECODABLE_LABEL};
pub use mock_coordinator::{CoordinatorEvent, MockCoordinator};
pub use mock_transport::MockTransport;
pub use test_fixtures::{
    base_config, test_clock, test_start, TestLink, ENTITY_A, ENTITY_B, PLATFORM_A, PLATFORM_B,
    UNKNOWN_PLATFORM,
};
pub use test_utils::{encode_messages, init_test_logging, inbound_pdu, TestResult};
