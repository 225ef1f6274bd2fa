//! Schedule Policy
//!
//! The arbiter does not decide when to wake, where to listen or where to
//! transmit. It asks a [`SchedulePolicy`] and feeds it the events it
//! observes. Implementations hold the hopping and beacon-tracking logic.

use crate::types::{ChannelId, Millis};

/// Decision service consulted by the channel arbiter
///
/// All methods are called from inside the arbiter's event handling and
/// must return without blocking.
pub trait SchedulePolicy {
    /// Channel the node should be listening on, if any
    fn current_channel(&self) -> Option<ChannelId>;

    /// Absolute time of the next wake-up, if one is due
    ///
    /// A returned time of zero is treated the same as `None`.
    fn next_fire_time(&self) -> Option<Millis>;

    /// Channel a frame should be transmitted on now, if any
    fn fire_channel(&mut self) -> Option<ChannelId>;

    /// Record that the node woke at `now`
    fn register_next_fire(&mut self, now: Millis);

    /// Record a beacon received at `now` carrying `payload`
    fn read_beacon(&mut self, now: Millis, payload: u8);
}

/// Policy that listens on one channel and never transmits
///
/// Lets the firmware run with no scheduler linked in; beacons are counted
/// but otherwise ignored.
#[derive(Clone, Copy, Debug)]
pub struct StaticPolicy {
    channel: Option<ChannelId>,
    beacons_seen: u32,
    last_wake: Option<Millis>,
}

impl StaticPolicy {
    /// Listen on `channel` forever
    #[must_use]
    pub const fn listen_on(channel: ChannelId) -> Self {
        Self {
            channel: Some(channel),
            beacons_seen: 0,
            last_wake: None,
        }
    }

    /// Keep the receiver off
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            channel: None,
            beacons_seen: 0,
            last_wake: None,
        }
    }

    /// Number of beacons forwarded so far
    #[must_use]
    pub const fn beacons_seen(&self) -> u32 {
        self.beacons_seen
    }

    /// Time of the most recent wake registration
    #[must_use]
    pub const fn last_wake(&self) -> Option<Millis> {
        self.last_wake
    }
}

impl SchedulePolicy for StaticPolicy {
    fn current_channel(&self) -> Option<ChannelId> {
        self.channel
    }

    fn next_fire_time(&self) -> Option<Millis> {
        None
    }

    fn fire_channel(&mut self) -> Option<ChannelId> {
        None
    }

    fn register_next_fire(&mut self, now: Millis) {
        self.last_wake = Some(now);
    }

    fn read_beacon(&mut self, _now: Millis, _payload: u8) {
        self.beacons_seen = self.beacons_seen.saturating_add(1);
    }
}
