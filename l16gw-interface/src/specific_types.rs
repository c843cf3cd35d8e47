//! Air and land specific type tables
//!
//! Maps platform type names to the 12-bit specific type codes carried in
//! track messages, and back.

use std::collections::BTreeMap;

/// Bidirectional platform type / specific type code table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecificTypeTable {
    by_name: BTreeMap<String, u32>,
    by_code: BTreeMap<u32, String>,
}

impl SpecificTypeTable {
    /// Builds the table from a validated configuration map.
    pub fn from_config(entries: &BTreeMap<String, u32>) -> Self {
        let by_code = entries
            .iter()
            .map(|(name, &code)| (code, name.clone()))
            .collect();
        Self {
            by_name: entries.clone(),
            by_code,
        }
    }

    /// Code for a platform type, 0 if unknown.
    pub fn code(&self, platform_type: &str) -> u32 {
        self.by_name.get(platform_type).copied().unwrap_or(0)
    }

    /// Platform type for a code.
    pub fn platform_type(&self, code: u32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
