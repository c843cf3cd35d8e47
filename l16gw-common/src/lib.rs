//! Common types and utilities for the Link-16 gateway
//!
//! This crate provides the shared error type, logging setup, the interface
//! configuration surface and the 32-bit word bit packer that message codecs
//! write into.

pub mod config;
pub mod error;
pub mod logging;
pub mod word_buffer;

pub use config::{
    ConfigError, ConfigValidationError, HeaderType, InterfaceConfig, LabelNpgPair, SwapMethod,
};
pub use error::Error;
pub use logging::{
    init_logging, init_logging_with_filter, log_tdl_message, Direction, HexDump, LogLevel,
};
pub use word_buffer::{WordReader, WordWriter};
