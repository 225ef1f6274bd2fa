//! Hardware Events
//!
//! Everything that can wake the arbiter, as one enum. Producers stamp
//! each event with the time it happened.

use core::fmt;

use heapless::Vec;

use crate::config::MAX_RX_FRAME_LEN;
use crate::types::{AlarmTag, Millis};

/// Bytes of one received frame
pub type RxFrame = Vec<u8, MAX_RX_FRAME_LEN>;

/// Asynchronous notification delivered to the arbiter
#[derive(Clone, PartialEq, Eq)]
pub enum NodeEvent {
    /// The alarm expired
    TimerFired {
        /// Time of expiry
        now: Millis,
        /// Tag of the alarm request that expired
        tag: AlarmTag,
    },
    /// A frame arrived, or the receive session ended (`frame` is `None`)
    FrameReceived {
        /// Time of reception
        now: Millis,
        /// Received bytes
        frame: Option<RxFrame>,
    },
    /// The last transmission finished, successfully or not
    TransmitCompleted {
        /// Time of completion
        now: Millis,
    },
}

impl NodeEvent {
    /// A received frame; bytes beyond the largest PSDU are dropped
    #[must_use]
    pub fn frame(now: Millis, bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_RX_FRAME_LEN);
        let mut frame = RxFrame::new();
        // Cannot fail: `len` fits the buffer
        let _ = frame.extend_from_slice(&bytes[..len]);
        Self::FrameReceived {
            now,
            frame: Some(frame),
        }
    }

    /// The receive session ended
    #[must_use]
    pub const fn receive_ended(now: Millis) -> Self {
        Self::FrameReceived { now, frame: None }
    }
}

impl fmt::Debug for NodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimerFired { now, tag } => write!(f, "TimerFired#{tag}@{now}"),
            Self::FrameReceived { now, frame: Some(frame) } => {
                write!(f, "FrameReceived@{now}({} bytes)", frame.len())
            }
            Self::FrameReceived { now, frame: None } => write!(f, "ReceiveEnded@{now}"),
            Self::TransmitCompleted { now } => write!(f, "TransmitCompleted@{now}"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for NodeEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::TimerFired { now, tag } => defmt::write!(f, "TimerFired#{}@{}", tag, now),
            Self::FrameReceived { now, frame: Some(frame) } => {
                defmt::write!(f, "FrameReceived@{}({} bytes)", now, frame.len());
            }
            Self::FrameReceived { now, frame: None } => defmt::write!(f, "ReceiveEnded@{}", now),
            Self::TransmitCompleted { now } => defmt::write!(f, "TransmitCompleted@{}", now),
        }
    }
}
