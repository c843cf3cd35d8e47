//! Message suppression filters
//!
//! A filter entry either names a whole label family (`label`) or a single
//! message (`label`, `sublabel`). The two kinds are kept in separate sets:
//! removing a family entry leaves any single-message entries for that label
//! in place, and the reverse.

use std::collections::{BTreeSet, HashMap};

use crate::transport::PlatformIndex;

/// One set of filter entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    labels: BTreeSet<u8>,
    messages: BTreeSet<(u8, u8)>,
}

impl MessageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. `None` sublabel filters the whole label family.
    ///
    /// Returns false if the entry was already present.
    pub fn add(&mut self, label: u8, sublabel: Option<u8>) -> bool {
        match sublabel {
            Some(sublabel) => self.messages.insert((label, sublabel)),
            None => self.labels.insert(label),
        }
    }

    /// Removes exactly the given entry.
    ///
    /// Returns false if it was not present.
    pub fn remove(&mut self, label: u8, sublabel: Option<u8>) -> bool {
        match sublabel {
            Some(sublabel) => self.messages.remove(&(label, sublabel)),
            None => self.labels.remove(&label),
        }
    }

    /// True if the family or the specific message is filtered.
    pub fn matches(&self, label: u8, sublabel: u8) -> bool {
        self.labels.contains(&label) || self.messages.contains(&(label, sublabel))
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.messages.is_empty()
    }
}

/// Global filter plus one filter per sending platform.
#[derive(Debug, Clone, Default)]
pub struct FilterTable {
    global: MessageFilter,
    per_platform: HashMap<PlatformIndex, MessageFilter>,
}

impl FilterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry to the platform's filter, or the global one for `None`.
    ///
    /// The platform's filter is created on first use.
    pub fn add_filter(&mut self, platform: Option<PlatformIndex>, label: u8, sublabel: Option<u8>) -> bool {
        match platform {
            Some(index) => self.per_platform.entry(index).or_default().add(label, sublabel),
            None => self.global.add(label, sublabel),
        }
    }

    /// Removes an entry from the platform's filter, or the global one for `None`.
    pub fn remove_filter(&mut self, platform: Option<PlatformIndex>, label: u8, sublabel: Option<u8>) -> bool {
        match platform {
            Some(index) => self
                .per_platform
                .get_mut(&index)
                .is_some_and(|filter| filter.remove(label, sublabel)),
            None => self.global.remove(label, sublabel),
        }
    }

    /// True if the message is filtered globally or for the sending platform.
    pub fn is_filtered(&self, platform: Option<PlatformIndex>, label: u8, sublabel: u8) -> bool {
        if self.global.matches(label, sublabel) {
            return true;
        }
        platform
            .and_then(|index| self.per_platform.get(&index))
            .is_some_and(|filter| filter.matches(label, sublabel))
    }

    /// True if the message is filtered by the global filter alone.
    pub fn is_globally_filtered(&self, label: u8, sublabel: u8) -> bool {
        self.global.matches(label, sublabel)
    }

    /// Drops a platform's filter. Returns false if it had none.
    pub fn remove_platform(&mut self, platform: PlatformIndex) -> bool {
        self.per_platform.remove(&platform).is_some()
    }

    /// Number of platforms with their own filter.
    pub fn platform_count(&self) -> usize {
        self.per_platform.len()
    }
}
