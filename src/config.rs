//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the source node.
//! Network parameters, queue depths and pin mappings are centralized here.

use crate::types::{ChannelId, NetworkId, ShortAddress};

/// Number of logical channels the node hops between
pub const NUM_CHANNELS: u8 = 3;

/// Offset added to a channel id to obtain its PAN id
pub const PAN_ID_OFFSET: u16 = 0x11;

/// Short address of this source node
pub const MY_SHORT_ADDRESS: u16 = 0x42;

/// Constant payload byte carried by every outgoing data frame
pub const PAYLOAD: u8 = 0x11;

/// Length of both the outgoing data frame and an accepted beacon
pub const FRAME_LEN: usize = 12;

/// Largest PSDU the transceiver can hand us (802.15.4 aMaxPHYPacketSize minus FCS)
pub const MAX_RX_FRAME_LEN: usize = 127;

/// IEEE 802.15.4 channel used for logical channel 0
pub const RADIO_CHANNEL_BASE: u8 = 11;

/// Transmit power in dBm (nRF52840 maximum)
pub const TX_POWER_DBM: i8 = 8;

/// Depth of the event queue feeding the arbiter
pub const EVENT_QUEUE_SIZE: usize = 8;

/// Most radio commands the arbiter can have waiting on the radio
///
/// Nothing is issued behind a stop or a transmit until its completion has
/// been handled, and every command before it has run by then. The worst
/// case is the startup tune (power off, set channel) followed by power
/// off, set channel, start receive and stop receive.
pub const MAX_OUTSTANDING_RADIO_COMMANDS: usize = 6;

/// Depth of the command queue feeding the radio task
pub const RADIO_COMMAND_QUEUE_SIZE: usize = 8;

/// Pin assignments for GPIO (nRF52840-DK)
pub mod pins {
    //! GPIO pin assignments matching the development kit

    /// Power LED (yellow on the node, LED1 on the DK)
    pub const LED_POWER: &str = "P0_13";

    /// Beacon LED (green on the node, LED2 on the DK)
    pub const LED_BEACON: &str = "P0_14";

    /// Transmit LED (red on the node, LED3 on the DK)
    pub const LED_TRANSMIT: &str = "P0_15";
}

/// This node's short address as a typed value
#[must_use]
pub const fn my_short_address() -> ShortAddress {
    ShortAddress::new(MY_SHORT_ADDRESS)
}

/// Channel the radio powers up on before the policy is consulted
#[must_use]
pub const fn default_channel() -> ChannelId {
    ChannelId::FIRST
}

/// PAN id for logical channel `channel`
#[must_use]
pub const fn network_id_for(channel: ChannelId) -> NetworkId {
    NetworkId::new(PAN_ID_OFFSET + channel.as_u8() as u16)
}
