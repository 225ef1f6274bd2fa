//! Alarm Timer
//!
//! One absolute-time alarm backed by `embassy-time`. The arbiter side
//! ([`AlarmPort`]) writes into a [`Signal`], so a newer request always
//! replaces an older one; the alarm task waits on whichever deadline is
//! current and posts [`NodeEvent::TimerFired`] when it passes. Each
//! request carries the arbiter's tag, echoed back in the event, so a fire
//! that was already queued when the alarm was replaced can be told apart.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};

use crate::radio::device::AlarmTimer;
use crate::radio::event::NodeEvent;
use crate::types::{AlarmTag, Millis};

use super::EventSender;

/// Request for the alarm task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlarmCommand {
    /// Fire at this instant, reporting the tag
    At(Instant, AlarmTag),
    /// Disarm
    Cancel,
}

impl defmt::Format for AlarmCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::At(at, tag) => defmt::write!(f, "At({}ms, #{})", at.as_millis(), tag),
            Self::Cancel => defmt::write!(f, "Cancel"),
        }
    }
}

/// Latest alarm request; older requests are overwritten
pub type AlarmSignal = Signal<CriticalSectionRawMutex, AlarmCommand>;

/// [`AlarmTimer`] handed to the arbiter
pub struct AlarmPort {
    signal: &'static AlarmSignal,
}

impl AlarmPort {
    /// Create a port writing into `signal`
    #[must_use]
    pub const fn new(signal: &'static AlarmSignal) -> Self {
        Self { signal }
    }
}

impl AlarmTimer for AlarmPort {
    fn set_at(&mut self, at: Millis, tag: AlarmTag) {
        self.signal.signal(AlarmCommand::At(Instant::from_millis(at), tag));
    }

    fn cancel(&mut self) {
        self.signal.signal(AlarmCommand::Cancel);
    }
}

/// Alarm task body
pub async fn run(signal: &'static AlarmSignal, events: EventSender) {
    let mut deadline: Option<(Instant, AlarmTag)> = None;

    loop {
        let Some((at, tag)) = deadline else {
            deadline = arm(signal.wait().await);
            continue;
        };

        match select(Timer::at(at), signal.wait()).await {
            Either::First(()) => {
                deadline = None;
                let now = Instant::now().as_millis();
                defmt::trace!("alarm #{} fired at {}ms", tag, now);
                events.send(NodeEvent::TimerFired { now, tag }).await;
            }
            Either::Second(command) => deadline = arm(command),
        }
    }
}

fn arm(command: AlarmCommand) -> Option<(Instant, AlarmTag)> {
    match command {
        AlarmCommand::At(at, tag) => Some((at, tag)),
        AlarmCommand::Cancel => None,
    }
}
