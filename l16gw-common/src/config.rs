//! Link-16 interface configuration
//!
//! The configuration block recognizes a fixed set of keys. Unknown keys and
//! malformed values are rejected when the block is loaded; a scenario with a
//! bad interface block does not start.
//!
//! # Example
//!
//! ```
//! use l16gw_common::config::{HeaderType, InterfaceConfig, SwapMethod};
//!
//! let yaml = r#"
//! tdl_header: 100
//! fill_with_31.7: true
//! tsa_level: 1
//! swap_tdl_header_100_method: fields_then_word_boundary
//! set_label_npg_pair:
//!   - { label: 3, npg: 15 }
//! "#;
//!
//! let config = InterfaceConfig::from_yaml(yaml).unwrap();
//! assert_eq!(config.tdl_header, HeaderType::Tdl100);
//! assert_eq!(config.swap_method, SwapMethod::FieldsThenWordBoundary);
//! assert!(config.fill_with_31_7);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest valid J-series label (5-bit field).
pub const MAX_LABEL: u8 = 31;

/// Exclusive upper bound of air/land specific type codes (12-bit field).
pub const SPECIFIC_TYPE_LIMIT: u32 = 4096;

/// Errors that can occur while loading the interface configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error, including unknown keys and malformed values
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Semantic validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ConfigValidationError),
}

/// Errors raised by [`InterfaceConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Label outside the 5-bit label range
    #[error("Invalid label {0}: must be 0..={max}", max = MAX_LABEL)]
    InvalidLabel(u8),

    /// Specific type code does not fit the 12-bit field
    #[error("Invalid specific type {code} for '{platform_type}': must be less than {limit}", limit = SPECIFIC_TYPE_LIMIT)]
    InvalidSpecificType {
        /// Platform type name
        platform_type: String,
        /// Offending code
        code: u32,
    },

    /// Two platform types share one specific type code
    #[error("Specific type {code} assigned to both '{first}' and '{second}'")]
    DuplicateSpecificType {
        /// Shared code
        code: u32,
        /// First platform type
        first: String,
        /// Second platform type
        second: String,
    },

    /// Negative time-slot-assignment level
    #[error("Invalid tsa_level {0}: must not be negative")]
    InvalidTsaLevel(i32),
}

/// TDL header layout carried by the transport PDU.
///
/// Configured with `tdl_header: 6` or `tdl_header: 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum HeaderType {
    /// No header, J-series words start at offset 0
    Tdl6,
    /// 20-byte Link-16 standardized header precedes the words
    #[default]
    Tdl100,
}

impl HeaderType {
    /// Size of the 100 header in bytes
    pub const TDL_100_HEADER_SIZE: usize = 20;

    /// Returns the TDL type tag placed in the transport PDU.
    pub fn tdl_type(self) -> u8 {
        match self {
            HeaderType::Tdl6 => 6,
            HeaderType::Tdl100 => 100,
        }
    }

    /// Returns the number of header bytes preceding the message words.
    pub fn header_size(self) -> usize {
        match self {
            HeaderType::Tdl6 => 0,
            HeaderType::Tdl100 => Self::TDL_100_HEADER_SIZE,
        }
    }

    /// Maps a transport TDL type tag to a header type.
    pub fn from_tdl_type(tdl_type: u8) -> Option<Self> {
        match tdl_type {
            6 => Some(HeaderType::Tdl6),
            100 => Some(HeaderType::Tdl100),
            _ => None,
        }
    }
}

impl TryFrom<u16> for HeaderType {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(HeaderType::from_tdl_type)
            .ok_or_else(|| format!("unsupported tdl_header {value}: expected 6 or 100"))
    }
}

impl From<HeaderType> for u16 {
    fn from(header_type: HeaderType) -> u16 {
        u16::from(header_type.tdl_type())
    }
}

impl fmt::Display for HeaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TDL-{}", self.tdl_type())
    }
}

/// Byte-swap convention applied to the 100 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapMethod {
    /// Big-endian field swap only
    #[default]
    FieldsOnly,
    /// Big-endian field swap followed by a 32-bit word boundary swap,
    /// as expected by the legacy external recording tool
    FieldsThenWordBoundary,
}

impl fmt::Display for SwapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapMethod::FieldsOnly => write!(f, "fields_only"),
            SwapMethod::FieldsThenWordBoundary => write!(f, "fields_then_word_boundary"),
        }
    }
}

impl FromStr for SwapMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fields_only" => Ok(SwapMethod::FieldsOnly),
            "fields_then_word_boundary" => Ok(SwapMethod::FieldsThenWordBoundary),
            _ => Err(format!("unknown swap method: {s}")),
        }
    }
}

/// One `set_label_npg_pair` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelNpgPair {
    /// J-series label (message family)
    pub label: u8,
    /// Network participation group the family is sent on
    pub npg: u16,
}

/// Configuration block of the Link-16 interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterfaceConfig {
    /// Whether participants send precise participant location messages
    pub send_ppli: bool,
    /// Header layout of outbound PDUs
    pub tdl_header: HeaderType,
    /// Verbose per-message logging
    pub debug: bool,
    /// Pad transmissions with J31.7 filler words to 3/6/12 word blocks
    #[serde(rename = "fill_with_31.7")]
    pub fill_with_31_7: bool,
    /// Message family to NPG routing entries, in priority order
    #[serde(rename = "set_label_npg_pair")]
    pub label_npg_pairs: Vec<LabelNpgPair>,
    /// Time slot assignment fidelity; 0 replaces slot and time fields with sentinels
    pub tsa_level: i32,
    /// Value forwarded into every outgoing message header
    pub time_slot_type: u32,
    /// Swap convention of the 100 header
    #[serde(rename = "swap_tdl_header_100_method")]
    pub swap_method: SwapMethod,
    /// Passed through to the message codec for J3.x tracks
    pub include_dis_entity_id_in_j3x_tracks: bool,
    /// Drop inbound messages instead of publishing them
    pub ignore_inbound_messages: bool,
    /// Platform type name to air specific type code
    pub air_specific_types: BTreeMap<String, u32>,
    /// Platform type name to land specific type code
    pub land_specific_types: BTreeMap<String, u32>,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            send_ppli: false,
            tdl_header: HeaderType::Tdl100,
            debug: false,
            fill_with_31_7: false,
            label_npg_pairs: Vec::new(),
            tsa_level: 0,
            time_slot_type: 0,
            swap_method: SwapMethod::FieldsOnly,
            include_dis_entity_id_in_j3x_tracks: false,
            ignore_inbound_messages: false,
            air_specific_types: BTreeMap::new(),
            land_specific_types: BTreeMap::new(),
        }
    }
}

impl InterfaceConfig {
    /// Parses and validates a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: InterfaceConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Checks value ranges that the YAML types alone cannot express.
    ///
    /// # Validation Rules
    ///
    /// - NPG routing labels must fit the 5-bit label field
    /// - Specific type codes must be below 4096 and unique per table
    /// - `tsa_level` must not be negative
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(pair) = self.label_npg_pairs.iter().find(|p| p.label > MAX_LABEL) {
            return Err(ConfigValidationError::InvalidLabel(pair.label));
        }

        validate_specific_types(&self.air_specific_types)?;
        validate_specific_types(&self.land_specific_types)?;

        if self.tsa_level < 0 {
            return Err(ConfigValidationError::InvalidTsaLevel(self.tsa_level));
        }

        Ok(())
    }

    /// Returns true when slot assignment is not simulated (TSA level 0).
    pub fn is_degraded_fidelity(&self) -> bool {
        self.tsa_level == 0
    }
}

fn validate_specific_types(table: &BTreeMap<String, u32>) -> Result<(), ConfigValidationError> {
    let mut seen: BTreeMap<u32, &str> = BTreeMap::new();
    for (platform_type, &code) in table {
        if code >= SPECIFIC_TYPE_LIMIT {
            return Err(ConfigValidationError::InvalidSpecificType {
                platform_type: platform_type.clone(),
                code,
            });
        }
        if let Some(first) = seen.insert(code, platform_type) {
            return Err(ConfigValidationError::DuplicateSpecificType {
                code,
                first: first.to_string(),
                second: platform_type.clone(),
            });
        }
    }
    Ok(())
}
