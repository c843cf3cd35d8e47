//! Link-16 interface instance
//!
//! Owns everything that outlives a single send or receive: configuration,
//! link clock, header codec, filters, NPG routing, specific type tables and
//! counters. The pipelines live in [`crate::outbound`] and [`crate::inbound`].

use l16gw_common::{ConfigError, InterfaceConfig};
use l16gw_header::{HeaderCodec, HeaderRecord, TimeSlotClock};

use crate::coordination::{WeaponCoordinator, WeaponEngagement};
use crate::filter::FilterTable;
use crate::message::MessageCodec;
use crate::npg::NpgTable;
use crate::specific_types::SpecificTypeTable;
use crate::stats::LinkStats;
use crate::transport::{PlatformIndex, Transport};

/// Callback invoked with each published inbound message
pub type MessageCallback<M> = Box<dyn FnMut(f64, &M)>;

/// Link-16 gateway between the host simulation and the transport.
///
/// # Example
///
/// ```ignore
/// let config = InterfaceConfig::from_yaml_file("link16.yaml")?;
/// let clock = TimeSlotClock::new(scenario_start);
/// let mut link = LinkInterface::new(config, clock, codec, Box::new(transport))?
///     .with_coordinator(Box::new(j11));
/// link.subscribe(Box::new(|t, msg| println!("{t}: {}", msg.name())));
/// ```
pub struct LinkInterface<C: MessageCodec> {
    pub(crate) config: InterfaceConfig,
    pub(crate) clock: TimeSlotClock,
    pub(crate) header_codec: HeaderCodec,
    pub(crate) codec: C,
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) coordinator: Option<Box<dyn WeaponCoordinator<C::Message>>>,
    pub(crate) subscribers: Vec<MessageCallback<C::Message>>,
    pub(crate) filters: FilterTable,
    pub(crate) npg_table: NpgTable,
    air_types: SpecificTypeTable,
    land_types: SpecificTypeTable,
    pub(crate) stats: LinkStats,
    pub(crate) last_header: Option<HeaderRecord>,
}

impl<C: MessageCodec> LinkInterface<C> {
    /// Creates the interface from a configuration block.
    ///
    /// The configuration is validated again here so blocks built in code
    /// get the same checks as loaded ones.
    pub fn new(
        config: InterfaceConfig,
        clock: TimeSlotClock,
        codec: C,
        transport: Box<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let header_codec = HeaderCodec::new(config.tdl_header, config.swap_method);
        let npg_table = NpgTable::from_pairs(&config.label_npg_pairs);
        let air_types = SpecificTypeTable::from_config(&config.air_specific_types);
        let land_types = SpecificTypeTable::from_config(&config.land_specific_types);

        tracing::info!(
            header = %config.tdl_header,
            swap = %config.swap_method,
            tsa_level = config.tsa_level,
            fill = config.fill_with_31_7,
            npg_pairs = npg_table.len(),
            slot_offset = clock.slot_offset(),
            "Link-16 interface initialized"
        );

        Ok(Self {
            config,
            clock,
            header_codec,
            codec,
            transport,
            coordinator: None,
            subscribers: Vec::new(),
            filters: FilterTable::new(),
            npg_table,
            air_types,
            land_types,
            stats: LinkStats::new(),
            last_header: None,
        })
    }

    /// Attaches the J11 weapon coordination handler.
    pub fn with_coordinator(mut self, coordinator: Box<dyn WeaponCoordinator<C::Message>>) -> Self {
        self.coordinator = Some(coordinator);
        self
    }

    /// Registers a callback for published inbound messages.
    pub fn subscribe(&mut self, callback: MessageCallback<C::Message>) {
        self.subscribers.push(callback);
    }

    /// Validated interface configuration.
    pub fn config(&self) -> &InterfaceConfig {
        &self.config
    }

    /// Link clock anchored at the scenario start.
    pub fn clock(&self) -> &TimeSlotClock {
        &self.clock
    }

    /// Message codec used by both pipelines.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Traffic counters since construction.
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Header of the most recent inbound signal that carried one.
    pub fn last_header(&self) -> Option<&HeaderRecord> {
        self.last_header.as_ref()
    }

    /// Converts a link slot number to the local slot numbering.
    pub fn to_local_slot(&self, link_slot: u32) -> u32 {
        self.clock.to_local_slot(link_slot)
    }

    // Filters

    /// Filters a label family (`sublabel` = `None`) or a single message,
    /// for one platform or globally.
    pub fn add_filter(&mut self, platform: Option<PlatformIndex>, label: u8, sublabel: Option<u8>) -> bool {
        self.filters.add_filter(platform, label, sublabel)
    }

    /// Removes exactly the entry `add_filter` would have added.
    pub fn remove_filter(&mut self, platform: Option<PlatformIndex>, label: u8, sublabel: Option<u8>) -> bool {
        self.filters.remove_filter(platform, label, sublabel)
    }

    pub fn is_filtered(&self, platform: Option<PlatformIndex>, label: u8, sublabel: u8) -> bool {
        self.filters.is_filtered(platform, label, sublabel)
    }

    /// Drops the filter of a platform leaving the simulation.
    pub fn remove_platform_filters(&mut self, platform: PlatformIndex) -> bool {
        self.filters.remove_platform(platform)
    }

    // NPG routing

    /// Adds a label to NPG routing entry. Returns false for an exact duplicate.
    pub fn set_label_npg_pair(&mut self, label: u8, npg: u16) -> bool {
        self.npg_table.set_pair(label, npg)
    }

    pub fn npg_for_label(&self, label: u8) -> u16 {
        self.npg_table.lookup(label)
    }

    // Specific types

    pub fn air_specific_type(&self, platform_type: &str) -> u32 {
        self.air_types.code(platform_type)
    }

    pub fn air_platform_type(&self, code: u32) -> Option<&str> {
        self.air_types.platform_type(code)
    }

    pub fn land_specific_type(&self, platform_type: &str) -> u32 {
        self.land_types.code(platform_type)
    }

    pub fn land_platform_type(&self, code: u32) -> Option<&str> {
        self.land_types.platform_type(code)
    }

    // Weapon events

    /// Forwards a weapon launch to the weapon coordination handler.
    pub fn weapon_fired(&mut self, sim_time: f64, engagement: &WeaponEngagement) {
        if let Some(coordinator) = self.coordinator.as_mut() {
            coordinator.weapon_fired(sim_time, engagement);
        }
    }

    /// Forwards the end of a weapon engagement to the weapon coordination handler.
    pub fn weapon_terminated(&mut self, sim_time: f64, engagement: &WeaponEngagement) {
        if let Some(coordinator) = self.coordinator.as_mut() {
            coordinator.weapon_terminated(sim_time, engagement);
        }
    }
}
