//! Hardware Abstraction Layer
//!
//! Implements the radio, alarm and LED facades on the nRF52840 and owns
//! the event queue that serializes every entry into the arbiter. Producers
//! (radio task, alarm task) only ever post [`NodeEvent`]s; the main task is
//! the single consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::EVENT_QUEUE_SIZE;
use crate::radio::event::NodeEvent;

pub mod gpio;
pub mod radio;
pub mod timer;

/// Queue of hardware events awaiting the arbiter
pub type EventQueue = Channel<CriticalSectionRawMutex, NodeEvent, EVENT_QUEUE_SIZE>;
/// Producer end of the event queue
pub type EventSender = Sender<'static, CriticalSectionRawMutex, NodeEvent, EVENT_QUEUE_SIZE>;
/// Consumer end of the event queue
pub type EventReceiver = Receiver<'static, CriticalSectionRawMutex, NodeEvent, EVENT_QUEUE_SIZE>;
