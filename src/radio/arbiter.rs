//! Channel Arbiter
//!
//! Owns the transceiver, the alarm and the indicator LEDs and decides,
//! after every hardware event, what the radio does next.
//!
//! ```text
//!             TimerFired ──┐
//!   FrameReceived(beacon) ─┤   update flags    ┌─► transmit on target channel
//!   FrameReceived(None)   ─┼──────────────────►│   (switch first if idle)
//!      TransmitCompleted ──┘     reconcile     ├─► receive on listen channel
//!                                              └─► stop receiving
//! ```
//!
//! The transceiver is half-duplex and cannot retune while a receive
//! session is open or a frame is in flight. [`ChannelArbiter::try_change_channel`]
//! is the only path to a channel switch; when the radio is busy it starts
//! winding the radio down and reports failure, and the transmit target is
//! parked in `pending_send_channel` until the next event.
//!
//! After a `stop_receive` or a `transmit` nothing else is issued until the
//! matching completion event has been handled, so at most six commands
//! (two from [`ChannelArbiter::start`], then power off, set channel, start
//! receive and stop receive) are ever waiting on the radio.

use crate::config::{my_short_address, PAYLOAD};
use crate::frame::{parse_beacon, OutgoingFrame};
use crate::policy::SchedulePolicy;
use crate::types::{AlarmTag, ChannelId, Led, LedState, Millis};

use super::device::{AlarmTimer, Indicators, Transceiver};
use super::event::NodeEvent;

/// Radio activity flags owned by the arbiter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RadioState {
    /// A receive session is open
    rx_on: bool,
    /// A transmission is in flight
    tx_on: bool,
    /// Transmit target deferred because the radio was busy
    pending_send_channel: Option<ChannelId>,
    /// `stop_receive` already issued for the open session
    rx_stop_requested: bool,
    /// A session closed locally still owes its receive-ended notification
    rx_detached: bool,
}

impl RadioState {
    /// Radio off, nothing pending
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rx_on: false,
            tx_on: false,
            pending_send_channel: None,
            rx_stop_requested: false,
            rx_detached: false,
        }
    }

    /// Check if a receive session is open
    #[must_use]
    pub const fn rx_on(&self) -> bool {
        self.rx_on
    }

    /// Check if a transmission is in flight
    #[must_use]
    pub const fn tx_on(&self) -> bool {
        self.tx_on
    }

    /// Deferred transmit target
    #[must_use]
    pub const fn pending_send_channel(&self) -> Option<ChannelId> {
        self.pending_send_channel
    }

    /// Check if a locally closed session has yet to report its end
    #[must_use]
    pub const fn rx_detached(&self) -> bool {
        self.rx_detached
    }

    /// Check if the radio is free for a new operation
    ///
    /// A locally closed session keeps the radio busy until its end is reported.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.rx_on && !self.tx_on && !self.rx_detached
    }
}

/// The channel-arbitration and event-reconciliation engine
pub struct ChannelArbiter<R, A, I, P> {
    radio: R,
    alarm: A,
    indicators: I,
    policy: P,
    state: RadioState,
    frame: OutgoingFrame,
    /// Tag of the alarm currently armed
    armed_alarm: Option<AlarmTag>,
    last_alarm_tag: AlarmTag,
}

impl<R, A, I, P> ChannelArbiter<R, A, I, P>
where
    R: Transceiver,
    A: AlarmTimer,
    I: Indicators,
    P: SchedulePolicy,
{
    /// Take ownership of the hardware and the policy
    ///
    /// Nothing is touched until [`start`](Self::start).
    pub fn new(radio: R, alarm: A, indicators: I, policy: P) -> Self {
        Self {
            radio,
            alarm,
            indicators,
            policy,
            state: RadioState::new(),
            frame: OutgoingFrame::new(my_short_address(), PAYLOAD),
            armed_alarm: None,
            last_alarm_tag: 0,
        }
    }

    /// Bring the radio up
    ///
    /// Tunes to the policy's listen channel (or re-applies the current
    /// one so the frame template is filled in), runs the first
    /// reconciliation and switches the power LED on.
    pub fn start(&mut self) {
        let channel = self
            .policy
            .current_channel()
            .unwrap_or_else(|| self.radio.channel());
        self.change_channel(channel);
        self.reconcile();
        self.indicators.set(Led::Power, LedState::On);
        info!("source node up on {}", channel);
    }

    /// Dispatch one hardware event
    pub fn handle(&mut self, event: NodeEvent) {
        match event {
            NodeEvent::TimerFired { now, tag } => {
                // A fire queued before the alarm was cancelled or re-armed
                if self.armed_alarm != Some(tag) {
                    trace!("stale alarm {} dropped", tag);
                    return;
                }
                self.armed_alarm = None;
                self.on_timer_fired(now);
            }
            NodeEvent::FrameReceived {
                now,
                frame: Some(frame),
            } => self.on_frame_received(now, &frame),
            NodeEvent::FrameReceived { frame: None, .. } => self.on_receive_ended(),
            NodeEvent::TransmitCompleted { .. } => self.on_transmit_completed(),
        }
    }

    /// The alarm expired
    pub fn on_timer_fired(&mut self, now: Millis) {
        trace!("timer fired at {}", now);
        self.policy.register_next_fire(now);
        self.reconcile();
    }

    /// A frame arrived during a receive session
    ///
    /// Anything that is not a beacon for the policy's current channel is
    /// noise: no state changes and no reconciliation.
    pub fn on_frame_received(&mut self, now: Millis, bytes: &[u8]) {
        let beacon = match parse_beacon(bytes) {
            Ok(beacon) => beacon,
            Err(err) => {
                trace!("frame dropped: {}", err);
                return;
            }
        };

        // A beacon sent just before we switched channel can still arrive
        let expected = self.policy.current_channel().map(ChannelId::network_id);
        if expected != Some(beacon.network_id) {
            trace!("beacon dropped: {} is not ours", beacon.network_id);
            return;
        }

        debug!("beacon payload={} at {}", beacon.payload, now);
        self.indicators.toggle(Led::Beacon);
        self.policy.read_beacon(now, beacon.payload);
        // Wake registration refreshes any sends the beacon made due
        self.policy.register_next_fire(now);
        self.reconcile();
    }

    /// The receive session ended
    pub fn on_receive_ended(&mut self) {
        if self.state.rx_detached {
            self.state.rx_detached = false;
        } else {
            self.state.rx_on = false;
            self.state.rx_stop_requested = false;
        }
        trace!("receive ended");
        self.reconcile();
    }

    /// The transmission finished
    pub fn on_transmit_completed(&mut self) {
        self.state.tx_on = false;
        trace!("transmit complete");
        self.reconcile();
    }

    /// Re-derive the radio's next action from the flags and the policy
    ///
    /// Safe to call at any time; a second call with nothing new to do
    /// issues no radio operations besides re-arming the alarm.
    pub fn reconcile(&mut self) {
        self.alarm.cancel();
        self.armed_alarm = None;
        if let Some(at) = self.policy.next_fire_time().filter(|&at| at > 0) {
            self.last_alarm_tag = self.last_alarm_tag.wrapping_add(1);
            self.alarm.set_at(at, self.last_alarm_tag);
            self.armed_alarm = Some(self.last_alarm_tag);
        }

        let target = self
            .state
            .pending_send_channel
            .take()
            .or_else(|| self.policy.fire_channel());

        if let Some(channel) = target {
            if self.ready_to_transmit(channel) {
                self.radio.transmit(&self.frame);
                self.state.tx_on = true;
                self.indicators.toggle(Led::Transmit);
                debug!("transmit on {}", channel);
            } else {
                // Never dropped: retried on the next event
                self.state.pending_send_channel = Some(channel);
                trace!("transmit on {} deferred", channel);
            }
        } else if let Some(channel) = self.policy.current_channel() {
            if self.try_change_channel(channel) && self.state.is_idle() {
                self.radio.start_receive();
                self.state.rx_on = true;
                debug!("listening on {}", channel);
            }
        } else if self.state.rx_on {
            self.close_receive_session();
        }

        debug_assert!(
            !(self.state.rx_on && self.state.tx_on),
            "receive and transmit both active"
        );
    }

    /// Move the hardware to `channel` if it is free to move
    ///
    /// Returns `true` when the radio is on `channel` afterwards. While a
    /// receive session is open it is asked to stop and `false` is
    /// returned; while a frame is in flight or a closed session is
    /// still winding down nothing is done.
    pub fn try_change_channel(&mut self, channel: ChannelId) -> bool {
        if self.radio.channel() == channel {
            return true;
        }

        if self.state.rx_on {
            self.request_stop_receive();
            return false;
        }

        if self.state.tx_on || self.state.rx_detached {
            return false;
        }

        self.change_channel(channel);
        true
    }

    /// Activity flags
    #[must_use]
    pub const fn state(&self) -> &RadioState {
        &self.state
    }

    /// Check if a receive session is open
    #[must_use]
    pub const fn rx_on(&self) -> bool {
        self.state.rx_on
    }

    /// Check if a transmission is in flight
    #[must_use]
    pub const fn tx_on(&self) -> bool {
        self.state.tx_on
    }

    /// Deferred transmit target
    #[must_use]
    pub const fn pending_send_channel(&self) -> Option<ChannelId> {
        self.state.pending_send_channel
    }

    /// Tag of the armed alarm, if any
    #[must_use]
    pub const fn armed_alarm(&self) -> Option<AlarmTag> {
        self.armed_alarm
    }

    /// Outgoing frame template
    #[must_use]
    pub const fn frame(&self) -> &OutgoingFrame {
        &self.frame
    }

    /// The transceiver
    #[must_use]
    pub const fn radio(&self) -> &R {
        &self.radio
    }

    /// The alarm
    #[must_use]
    pub const fn alarm(&self) -> &A {
        &self.alarm
    }

    /// The indicator LEDs
    #[must_use]
    pub const fn indicators(&self) -> &I {
        &self.indicators
    }

    /// The schedule policy
    #[must_use]
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// The schedule policy, mutably
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    fn ready_to_transmit(&mut self, channel: ChannelId) -> bool {
        if !self.try_change_channel(channel) {
            return false;
        }

        // Already tuned, but the receiver holds the radio
        if self.state.rx_on {
            self.request_stop_receive();
            return false;
        }

        self.state.is_idle()
    }

    fn change_channel(&mut self, channel: ChannelId) {
        self.radio.power_off();
        self.radio.set_channel(channel, channel.network_id());
        self.frame.rewrite_channel_fields(channel);
        debug!("switched to {} ({})", channel, channel.network_id());
    }

    fn request_stop_receive(&mut self) {
        if !self.state.rx_stop_requested {
            self.radio.stop_receive();
            self.state.rx_stop_requested = true;
        }
    }

    /// Stop receiving without waiting for the session to end
    fn close_receive_session(&mut self) {
        debug_assert!(!self.state.rx_detached, "two sessions winding down");
        if !self.state.rx_stop_requested {
            self.radio.stop_receive();
        }
        self.state.rx_on = false;
        self.state.rx_stop_requested = false;
        self.state.rx_detached = true;
        debug!("receiver off");
    }
}
