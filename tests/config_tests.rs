//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --no-default-features --features std --test config_tests

use source_node::config::*;
use source_node::types::ChannelId;

// =============================================================================
// Network Parameter Tests
// =============================================================================

#[test]
fn channel_count() {
    assert_eq!(NUM_CHANNELS, 3);
}

#[test]
fn pan_id_offset() {
    assert_eq!(PAN_ID_OFFSET, 0x11);
}

#[test]
fn node_address_and_payload() {
    assert_eq!(MY_SHORT_ADDRESS, 0x42);
    assert_eq!(my_short_address().as_u16(), 0x42);
    assert_eq!(PAYLOAD, 0x11);
}

#[test]
fn pan_ids_distinct_per_channel() {
    let ids: Vec<u16> = ChannelId::all().map(|c| network_id_for(c).as_u16()).collect();
    assert_eq!(ids, vec![0x11, 0x12, 0x13]);
}

#[test]
fn default_channel_is_first() {
    assert_eq!(default_channel(), ChannelId::FIRST);
    assert_eq!(default_channel().as_u8(), 0);
}

// =============================================================================
// Radio Configuration Tests
// =============================================================================

#[test]
fn frame_fits_radio_buffer() {
    assert_eq!(FRAME_LEN, 12);
    assert!(FRAME_LEN <= MAX_RX_FRAME_LEN);
}

#[test]
fn all_channels_map_into_802154_band() {
    // 2.4 GHz O-QPSK channels are 11..=26
    let highest = RADIO_CHANNEL_BASE + NUM_CHANNELS - 1;
    assert!(RADIO_CHANNEL_BASE >= 11);
    assert!(highest <= 26);
}

#[test]
fn tx_power_is_chip_maximum() {
    // nRF52840 tops out at +8 dBm
    assert_eq!(TX_POWER_DBM, 8);
}

// =============================================================================
// Queue Sizing Tests
// =============================================================================

#[test]
fn command_queue_holds_worst_case_backlog() {
    // startup tune, then a retune with start and stop receive
    assert_eq!(MAX_OUTSTANDING_RADIO_COMMANDS, 6);
    assert!(RADIO_COMMAND_QUEUE_SIZE >= MAX_OUTSTANDING_RADIO_COMMANDS);
}

#[test]
fn event_queue_nonempty() {
    assert!(EVENT_QUEUE_SIZE >= 2);
}

// =============================================================================
// Pin Assignment Tests
// =============================================================================

#[test]
fn led_pins_distinct() {
    assert_ne!(pins::LED_POWER, pins::LED_BEACON);
    assert_ne!(pins::LED_BEACON, pins::LED_TRANSMIT);
    assert_ne!(pins::LED_POWER, pins::LED_TRANSMIT);
}
