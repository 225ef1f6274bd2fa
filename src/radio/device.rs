//! Hardware Facades
//!
//! The arbiter drives the transceiver, the alarm and the indicator LEDs
//! only through these traits. Every operation returns immediately;
//! completions arrive later as [`NodeEvent`](super::event::NodeEvent)s.

use crate::frame::OutgoingFrame;
use crate::types::{AlarmTag, ChannelId, Led, LedState, Millis, NetworkId};

/// Half-duplex 802.15.4 transceiver
pub trait Transceiver {
    /// Channel the hardware is tuned to
    fn channel(&self) -> ChannelId;

    /// Tune to `channel` and filter on `network_id`
    ///
    /// Only valid while neither receiving nor transmitting.
    fn set_channel(&mut self, channel: ChannelId, network_id: NetworkId);

    /// Power the transceiver down
    fn power_off(&mut self);

    /// Open a receive session
    ///
    /// Yields zero or more received frames, then exactly one "receive
    /// ended" notification after [`stop_receive`](Self::stop_receive).
    fn start_receive(&mut self);

    /// Close the open receive session
    fn stop_receive(&mut self);

    /// Send `frame` with clear-channel assessment at maximum power
    ///
    /// Yields exactly one "transmit complete" notification, whether or
    /// not the frame made it out.
    fn transmit(&mut self, frame: &OutgoingFrame);
}

/// Single absolute-time alarm
pub trait AlarmTimer {
    /// Fire once at or after `at`, replacing any pending alarm
    ///
    /// The resulting `TimerFired` event carries `tag`.
    fn set_at(&mut self, at: Millis, tag: AlarmTag);

    /// Drop the pending alarm, if any
    fn cancel(&mut self);
}

/// Fire-and-forget indicator lights
pub trait Indicators {
    /// Current state of `led`
    fn state(&self, led: Led) -> LedState;

    /// Drive `led` to `state`
    fn set(&mut self, led: Led, state: LedState);

    /// Flip `led`
    fn toggle(&mut self, led: Led) {
        let next = self.state(led).toggle();
        self.set(led, next);
    }
}
