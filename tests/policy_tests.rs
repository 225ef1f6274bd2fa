//! Schedule Policy Tests
//!
//! Tests for the built-in static policy.
//! Run with: cargo test --no-default-features --features std --test policy_tests

use source_node::policy::{SchedulePolicy, StaticPolicy};
use source_node::types::ChannelId;

#[test]
fn listen_on_reports_channel() {
    let policy = StaticPolicy::listen_on(ChannelId::new(2).unwrap());
    assert_eq!(policy.current_channel(), ChannelId::new(2));
}

#[test]
fn silent_reports_nothing() {
    let mut policy = StaticPolicy::silent();
    assert_eq!(policy.current_channel(), None);
    assert_eq!(policy.fire_channel(), None);
    assert_eq!(policy.next_fire_time(), None);
}

#[test]
fn never_transmits_or_wakes() {
    let mut policy = StaticPolicy::listen_on(ChannelId::FIRST);
    for now in [0, 10, 1_000] {
        policy.register_next_fire(now);
        assert_eq!(policy.fire_channel(), None);
        assert_eq!(policy.next_fire_time(), None);
    }
}

#[test]
fn counts_beacons_and_wakes() {
    let mut policy = StaticPolicy::listen_on(ChannelId::FIRST);
    assert_eq!(policy.beacons_seen(), 0);
    assert_eq!(policy.last_wake(), None);

    policy.read_beacon(100, 5);
    policy.read_beacon(200, 4);
    policy.register_next_fire(200);

    assert_eq!(policy.beacons_seen(), 2);
    assert_eq!(policy.last_wake(), Some(200));
}
