//! Weapon coordination collaborator
//!
//! J11 traffic (weapon coordination and management) is not published as
//! ordinary inbound messages. It goes to a dedicated handler that tracks
//! in-flight weapons and their controllers, together with the host's
//! weapon fired and terminated events.

use crate::transport::{EntityId, PlatformIndex};

/// A weapon engagement reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponEngagement {
    /// Host identifier of the engagement
    pub serial_number: u32,
    /// Platform that launched the weapon
    pub shooter: PlatformIndex,
    /// Weapon platform, if the weapon is modelled as one
    pub weapon: Option<PlatformIndex>,
    /// Intended target, if known
    pub target: Option<PlatformIndex>,
}

/// Receives J11 messages and weapon events.
pub trait WeaponCoordinator<M> {
    /// A J11 message arrived from `sender`.
    fn on_j11_message(&mut self, sim_time: f64, sender: EntityId, message: &M, sublabel: u8);

    /// A weapon was launched.
    fn weapon_fired(&mut self, sim_time: f64, engagement: &WeaponEngagement);

    /// A weapon engagement ended.
    fn weapon_terminated(&mut self, sim_time: f64, engagement: &WeaponEngagement);
}
