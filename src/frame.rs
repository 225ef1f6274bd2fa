//! Frame Codec
//!
//! Builds the outgoing data frame template and validates incoming
//! beacons. Both layouts are fixed at 12 bytes and follow the IEEE
//! 802.15.4 MAC header encoding:
//!
//! ```text
//! offset  0     1      2     3..5     5..7      7..9     9..11    11
//!        ┌────┬──────┬─────┬────────┬─────────┬────────┬─────────┬─────────┐
//! data   │ FC │ addr │ seq │ dst PAN│ dst addr│ src PAN│ src addr│ payload │
//!        └────┴──────┴─────┴────────┴─────────┴────────┴─────────┴─────────┘
//! beacon │ FC │  ..  │ ..  │ src PAN│            ..              │ payload │
//! ```

use core::fmt;

use crate::config::FRAME_LEN;
use crate::types::{ChannelId, NetworkId, ShortAddress};

/// Frame control: mask selecting the frame type bits
pub const FCF_TYPE_MASK: u8 = 0x07;

/// Frame control: beacon frame type
pub const FCF_BEACON: u8 = 0x00;

/// Frame control: data frame type
pub const FCF_DATA: u8 = 0x01;

/// Addressing: destination short address present
pub const FCA_DST_SADDR: u8 = 0x08;

/// Addressing: source short address present
pub const FCA_SRC_SADDR: u8 = 0x80;

const OFFSET_DST_PAN: usize = 3;
const OFFSET_DST_ADDR: usize = 5;
const OFFSET_SRC_PAN: usize = 7;
const OFFSET_SRC_ADDR: usize = 9;
const OFFSET_PAYLOAD: usize = 11;

/// Outgoing data frame template
///
/// Built once at startup. The channel-dependent fields are rewritten in
/// place every time the radio changes channel.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OutgoingFrame {
    bytes: [u8; FRAME_LEN],
}

impl OutgoingFrame {
    /// Build the template with this node's address and the constant payload
    #[must_use]
    pub const fn new(source: ShortAddress, payload: u8) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = FCF_DATA;
        bytes[1] = FCA_SRC_SADDR | FCA_DST_SADDR;
        let src = source.to_le_bytes();
        bytes[OFFSET_SRC_ADDR] = src[0];
        bytes[OFFSET_SRC_ADDR + 1] = src[1];
        bytes[OFFSET_PAYLOAD] = payload;
        Self { bytes }
    }

    /// Point the frame at `channel`
    ///
    /// Destination PAN, destination address and source PAN all become the
    /// channel's network id.
    pub fn rewrite_channel_fields(&mut self, channel: ChannelId) {
        let id = channel.network_id().to_le_bytes();
        for offset in [OFFSET_DST_PAN, OFFSET_DST_ADDR, OFFSET_SRC_PAN] {
            self.bytes[offset..offset + 2].copy_from_slice(&id);
        }
    }

    /// Raw frame bytes as put on the air
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Destination PAN id
    #[must_use]
    pub fn dst_network_id(&self) -> NetworkId {
        self.read_network_id(OFFSET_DST_PAN)
    }

    /// Destination short address
    #[must_use]
    pub fn dst_address(&self) -> ShortAddress {
        ShortAddress::new(self.read_u16(OFFSET_DST_ADDR))
    }

    /// Source PAN id
    #[must_use]
    pub fn src_network_id(&self) -> NetworkId {
        self.read_network_id(OFFSET_SRC_PAN)
    }

    /// Source short address
    #[must_use]
    pub fn src_address(&self) -> ShortAddress {
        ShortAddress::new(self.read_u16(OFFSET_SRC_ADDR))
    }

    /// Payload byte
    #[must_use]
    pub const fn payload(&self) -> u8 {
        self.bytes[OFFSET_PAYLOAD]
    }

    fn read_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    fn read_network_id(&self, offset: usize) -> NetworkId {
        NetworkId::new(self.read_u16(offset))
    }
}

impl fmt::Debug for OutgoingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutgoingFrame({:02x?})", self.bytes)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OutgoingFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "OutgoingFrame({=[u8]:x})", &self.bytes[..]);
    }
}

/// A validated beacon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beacon {
    /// PAN id the beacon was sent on
    pub network_id: NetworkId,
    /// Payload byte handed to the schedule policy
    pub payload: u8,
}

/// Reasons a received frame is not a usable beacon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Frame is not exactly 12 bytes
    Length(usize),
    /// Frame type bits do not mark a beacon
    NotBeacon(u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(len) => write!(f, "wrong length {len}"),
            Self::NotBeacon(fc) => write!(f, "not a beacon (fc={fc:#04x})"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrameError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Length(len) => defmt::write!(f, "wrong length {}", len),
            Self::NotBeacon(fc) => defmt::write!(f, "not a beacon (fc={=u8:#x})", fc),
        }
    }
}

/// Validate a received frame as a beacon
///
/// # Errors
///
/// Returns [`FrameError::Length`] unless `bytes` is exactly 12 bytes long,
/// and [`FrameError::NotBeacon`] when the frame type is anything else.
pub fn parse_beacon(bytes: &[u8]) -> Result<Beacon, FrameError> {
    if bytes.len() != FRAME_LEN {
        return Err(FrameError::Length(bytes.len()));
    }

    if bytes[0] & FCF_TYPE_MASK != FCF_BEACON {
        return Err(FrameError::NotBeacon(bytes[0]));
    }

    Ok(Beacon {
        network_id: NetworkId::from_le_bytes([bytes[OFFSET_DST_PAN], bytes[OFFSET_DST_PAN + 1]]),
        payload: bytes[OFFSET_PAYLOAD],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_fixed_fields() {
        let frame = OutgoingFrame::new(ShortAddress::new(0x42), 0x11);
        let bytes = frame.as_bytes();
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[1], 0x88);
        assert_eq!(bytes[2], 0);
        assert_eq!(&bytes[9..11], &[0x42, 0x00]);
        assert_eq!(bytes[11], 0x11);
    }

    #[test]
    fn template_channel_fields_start_zeroed() {
        let frame = OutgoingFrame::new(ShortAddress::new(0x42), 0x11);
        assert_eq!(&frame.as_bytes()[3..9], &[0; 6]);
    }

    #[test]
    fn beacon_pan_offset_shared_with_dst_pan() {
        // Beacons carry their PAN where data frames carry the destination PAN
        let mut bytes = [0u8; FRAME_LEN];
        bytes[3] = 0x34;
        bytes[4] = 0x12;
        let beacon = parse_beacon(&bytes).unwrap();
        assert_eq!(beacon.network_id.as_u16(), 0x1234);
    }

    #[test]
    fn type_check_ignores_upper_control_bits() {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = 0xF8;
        assert!(parse_beacon(&bytes).is_ok());
    }
}
