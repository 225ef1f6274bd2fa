//! Frame Codec Tests
//!
//! Tests for the outgoing data frame template and beacon validation.
//! Run with: cargo test --no-default-features --features std --test frame_tests

use source_node::config::{FRAME_LEN, MY_SHORT_ADDRESS, PAYLOAD};
use source_node::frame::{parse_beacon, FrameError, OutgoingFrame, FCF_BEACON, FCF_DATA};
use source_node::types::{ChannelId, NetworkId, ShortAddress};

fn template() -> OutgoingFrame {
    OutgoingFrame::new(ShortAddress::new(MY_SHORT_ADDRESS), PAYLOAD)
}

fn beacon_bytes(pan: u16, payload: u8) -> [u8; FRAME_LEN] {
    let mut bytes = [0u8; FRAME_LEN];
    bytes[0] = FCF_BEACON;
    bytes[3..5].copy_from_slice(&pan.to_le_bytes());
    bytes[11] = payload;
    bytes
}

// =============================================================================
// Outgoing Template Tests
// =============================================================================

#[test]
fn template_layout() {
    let frame = template();
    assert_eq!(frame.as_bytes().len(), 12);
    assert_eq!(frame.as_bytes()[0], FCF_DATA);
    assert_eq!(frame.src_address(), ShortAddress::new(0x42));
    assert_eq!(frame.payload(), 0x11);
}

#[test]
fn rewrite_sets_all_channel_fields() {
    for channel in ChannelId::all() {
        let mut frame = template();
        frame.rewrite_channel_fields(channel);
        let expected = 0x11 + u16::from(channel.as_u8());
        assert_eq!(frame.dst_network_id().as_u16(), expected);
        assert_eq!(frame.dst_address().as_u16(), expected);
        assert_eq!(frame.src_network_id().as_u16(), expected);
    }
}

#[test]
fn rewrite_keeps_fixed_fields() {
    let mut frame = template();
    frame.rewrite_channel_fields(ChannelId::new(2).unwrap());
    let bytes = frame.as_bytes();
    assert_eq!(bytes[0], 0x01);
    assert_eq!(bytes[1], 0x88);
    assert_eq!(bytes[2], 0x00);
    assert_eq!(&bytes[9..11], &[0x42, 0x00]);
    assert_eq!(bytes[11], 0x11);
}

#[test]
fn rewrite_channel_1_exact_bytes() {
    let mut frame = template();
    frame.rewrite_channel_fields(ChannelId::new(1).unwrap());
    assert_eq!(
        frame.as_bytes(),
        &[0x01, 0x88, 0x00, 0x12, 0x00, 0x12, 0x00, 0x12, 0x00, 0x42, 0x00, 0x11]
    );
}

#[test]
fn rewrite_overwrites_previous_channel() {
    let mut frame = template();
    frame.rewrite_channel_fields(ChannelId::new(2).unwrap());
    frame.rewrite_channel_fields(ChannelId::new(0).unwrap());
    assert_eq!(frame.dst_network_id(), NetworkId::new(0x11));
    assert_eq!(frame.src_network_id(), NetworkId::new(0x11));
}

// =============================================================================
// Beacon Parsing Tests
// =============================================================================

#[test]
fn parse_valid_beacon() {
    let beacon = parse_beacon(&beacon_bytes(0x11, 5)).unwrap();
    assert_eq!(beacon.network_id, NetworkId::new(0x11));
    assert_eq!(beacon.payload, 5);
}

#[test]
fn parse_full_payload_range() {
    let beacon = parse_beacon(&beacon_bytes(0x12, 0xFF)).unwrap();
    assert_eq!(beacon.payload, 255);
}

#[test]
fn parse_rejects_wrong_lengths() {
    let long = [0u8; 64];
    for len in (0..64).filter(|&len| len != FRAME_LEN) {
        assert_eq!(parse_beacon(&long[..len]), Err(FrameError::Length(len)));
    }
}

#[test]
fn parse_rejects_non_beacon_types() {
    for frame_type in 1..=7u8 {
        let mut bytes = beacon_bytes(0x11, 5);
        bytes[0] = frame_type;
        assert_eq!(parse_beacon(&bytes), Err(FrameError::NotBeacon(frame_type)));
    }
}

#[test]
fn parse_rejects_our_own_data_frame() {
    let mut frame = template();
    frame.rewrite_channel_fields(ChannelId::new(0).unwrap());
    assert!(matches!(parse_beacon(frame.as_bytes()), Err(FrameError::NotBeacon(_))));
}

#[test]
fn frame_error_display() {
    assert_eq!(FrameError::Length(3).to_string(), "wrong length 3");
    assert_eq!(FrameError::NotBeacon(1).to_string(), "not a beacon (fc=0x01)");
}
