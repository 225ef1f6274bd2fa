//! Shared types used across the source node firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::{network_id_for, NUM_CHANNELS};

/// Milliseconds since boot, the time base shared with the schedule policy
pub type Millis = u64;

/// Identifies one alarm request so a superseded fire can be recognized
pub type AlarmTag = u32;

/// Logical radio channel
///
/// Always within `0..NUM_CHANNELS`. "No channel" is expressed as
/// `Option<ChannelId>::None` rather than a sentinel value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Channel 0
    pub const FIRST: Self = Self(0);

    /// Create a channel id, returns None if out of range
    #[must_use]
    pub const fn new(channel: u8) -> Option<Self> {
        if channel < NUM_CHANNELS {
            Some(Self(channel))
        } else {
            None
        }
    }

    /// Get the raw channel number
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// PAN id used on this channel
    #[must_use]
    pub const fn network_id(self) -> NetworkId {
        network_id_for(self)
    }

    /// Iterate over every valid channel
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_CHANNELS).map(Self)
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelId({})", self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ch{}", self.0);
    }
}

/// Two-byte network identifier (PAN id)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkId(u16);

impl NetworkId {
    /// Wrap a raw PAN id
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Decode from two little-endian bytes
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Get the raw value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Encode as two little-endian bytes
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl fmt::Debug for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkId({:#06x})", self.0)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pan={:#x}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for NetworkId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "pan={=u16:#x}", self.0);
    }
}

/// IEEE 802.15.4 short (16-bit) address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShortAddress(u16);

impl ShortAddress {
    /// Wrap a raw short address
    #[must_use]
    pub const fn new(addr: u16) -> Self {
        Self(addr)
    }

    /// Get the raw value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Encode as two little-endian bytes
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// Indicator LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl LedState {
    /// Toggle the LED state
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Check if the LED is lit
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Indicator LEDs on the node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Led {
    /// Yellow: node initialized (always on)
    Power,
    /// Green: toggled on every accepted beacon
    Beacon,
    /// Red: toggled on every transmission
    Transmit,
}

impl Led {
    /// All LEDs, in board order
    pub const ALL: [Self; 3] = [Self::Power, Self::Beacon, Self::Transmit];

    /// Index into per-LED tables
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Power => 0,
            Self::Beacon => 1,
            Self::Transmit => 2,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Led {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Power => defmt::write!(f, "power"),
            Self::Beacon => defmt::write!(f, "beacon"),
            Self::Transmit => defmt::write!(f, "transmit"),
        }
    }
}
