//! Types Module Tests
//!
//! Tests for channel ids, PAN ids, addresses and LED state.
//! Run with: cargo test --no-default-features --features std --test types_tests

use source_node::types::{ChannelId, Led, LedState, NetworkId, ShortAddress};

// =============================================================================
// ChannelId Tests
// =============================================================================

#[test]
fn channel_valid_range() {
    assert!(ChannelId::new(0).is_some());
    assert!(ChannelId::new(1).is_some());
    assert!(ChannelId::new(2).is_some());
}

#[test]
fn channel_out_of_range() {
    assert!(ChannelId::new(3).is_none());
    assert!(ChannelId::new(255).is_none());
}

#[test]
fn channel_network_id() {
    assert_eq!(ChannelId::new(0).unwrap().network_id(), NetworkId::new(0x11));
    assert_eq!(ChannelId::new(2).unwrap().network_id(), NetworkId::new(0x13));
}

#[test]
fn channel_all_iterates_in_order() {
    let all: Vec<u8> = ChannelId::all().map(ChannelId::as_u8).collect();
    assert_eq!(all, vec![0, 1, 2]);
}

#[test]
fn channel_display() {
    assert_eq!(format!("{}", ChannelId::new(1).unwrap()), "ch1");
}

// =============================================================================
// NetworkId / ShortAddress Tests
// =============================================================================

#[test]
fn network_id_little_endian() {
    let id = NetworkId::new(0x1234);
    assert_eq!(id.to_le_bytes(), [0x34, 0x12]);
    assert_eq!(NetworkId::from_le_bytes([0x34, 0x12]), id);
}

#[test]
fn network_id_display() {
    assert_eq!(format!("{}", NetworkId::new(0x11)), "pan=0x11");
}

#[test]
fn short_address_little_endian() {
    let addr = ShortAddress::new(0x0042);
    assert_eq!(addr.to_le_bytes(), [0x42, 0x00]);
    assert_eq!(addr.as_u16(), 0x42);
}

// =============================================================================
// LED Tests
// =============================================================================

#[test]
fn led_state_default_off() {
    assert_eq!(LedState::default(), LedState::Off);
    assert!(!LedState::default().is_on());
}

#[test]
fn led_state_toggle() {
    assert_eq!(LedState::Off.toggle(), LedState::On);
    assert_eq!(LedState::On.toggle(), LedState::Off);
    assert_eq!(LedState::On.toggle().toggle(), LedState::On);
}

#[test]
fn led_indices_unique() {
    let mut seen = [false; 3];
    for led in Led::ALL {
        assert!(!seen[led.index()]);
        seen[led.index()] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
