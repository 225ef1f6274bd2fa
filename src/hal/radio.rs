//! 802.15.4 Radio
//!
//! Bridges the arbiter's fire-and-forget [`Transceiver`] calls to the
//! nRF52840 radio. The arbiter side ([`RadioPort`]) queues commands; the
//! radio task executes them in order and reports completions on the
//! event queue. Because commands are strictly FIFO, a channel change
//! queued behind a stop request only runs once the session has closed.

use embassy_futures::select::{select, Either};
use embassy_nrf::peripherals::RADIO;
use embassy_nrf::radio::ieee802154::{Cca, Packet, Radio};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Instant;

use crate::config::{
    MAX_OUTSTANDING_RADIO_COMMANDS, RADIO_CHANNEL_BASE, RADIO_COMMAND_QUEUE_SIZE, TX_POWER_DBM,
};
use crate::frame::OutgoingFrame;
use crate::radio::device::Transceiver;
use crate::radio::event::NodeEvent;
use crate::types::{ChannelId, NetworkId};

use super::EventSender;

/// Work item for the radio task
#[derive(Clone, Copy, Debug)]
pub enum RadioCommand {
    /// Retune
    SetChannel(ChannelId),
    /// Power down
    PowerOff,
    /// Open a receive session
    StartReceive,
    /// Close the receive session
    StopReceive,
    /// Send one frame
    Transmit(OutgoingFrame),
}

impl defmt::Format for RadioCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::SetChannel(channel) => defmt::write!(f, "SetChannel({})", channel),
            Self::PowerOff => defmt::write!(f, "PowerOff"),
            Self::StartReceive => defmt::write!(f, "StartReceive"),
            Self::StopReceive => defmt::write!(f, "StopReceive"),
            Self::Transmit(frame) => defmt::write!(f, "Transmit({})", frame),
        }
    }
}

const _: () = assert!(MAX_OUTSTANDING_RADIO_COMMANDS <= RADIO_COMMAND_QUEUE_SIZE);

/// Queue from the arbiter to the radio task
pub type CommandQueue = Channel<CriticalSectionRawMutex, RadioCommand, RADIO_COMMAND_QUEUE_SIZE>;
/// Arbiter end of the command queue
pub type CommandSender = Sender<'static, CriticalSectionRawMutex, RadioCommand, RADIO_COMMAND_QUEUE_SIZE>;
/// Radio task end of the command queue
pub type CommandReceiver = Receiver<'static, CriticalSectionRawMutex, RadioCommand, RADIO_COMMAND_QUEUE_SIZE>;

/// [`Transceiver`] handed to the arbiter
pub struct RadioPort {
    commands: CommandSender,
    channel: ChannelId,
}

impl RadioPort {
    /// Create a port for a radio that powers up on `channel`
    #[must_use]
    pub const fn new(commands: CommandSender, channel: ChannelId) -> Self {
        Self { commands, channel }
    }

    fn send(&self, command: RadioCommand) {
        // Cannot fill up: the arbiter keeps at most
        // MAX_OUTSTANDING_RADIO_COMMANDS queued
        if self.commands.try_send(command).is_err() {
            defmt::panic!("radio command queue full at {}", command);
        }
    }
}

impl Transceiver for RadioPort {
    fn channel(&self) -> ChannelId {
        self.channel
    }

    fn set_channel(&mut self, channel: ChannelId, _network_id: NetworkId) {
        // PAN filtering happens in the arbiter; the radio only needs the frequency
        self.channel = channel;
        self.send(RadioCommand::SetChannel(channel));
    }

    fn power_off(&mut self) {
        self.send(RadioCommand::PowerOff);
    }

    fn start_receive(&mut self) {
        self.send(RadioCommand::StartReceive);
    }

    fn stop_receive(&mut self) {
        self.send(RadioCommand::StopReceive);
    }

    fn transmit(&mut self, frame: &OutgoingFrame) {
        self.send(RadioCommand::Transmit(*frame));
    }
}

/// Apply the fixed transmit settings: carrier-sense CCA at full power
pub fn configure(radio: &mut Radio<'static, RADIO>) {
    radio.set_cca(Cca::CarrierSense);
    radio.set_transmission_power(TX_POWER_DBM);
}

/// IEEE 802.15.4 channel number for a logical channel
#[must_use]
pub const fn ieee_channel(channel: ChannelId) -> u8 {
    RADIO_CHANNEL_BASE + channel.as_u8()
}

/// Radio task body: execute commands, report completions
pub async fn run(mut radio: Radio<'static, RADIO>, commands: CommandReceiver, events: EventSender) {
    let mut packet = Packet::new();
    let mut carried = None;

    loop {
        let command = match carried.take() {
            Some(command) => command,
            None => commands.receive().await,
        };

        match command {
            RadioCommand::SetChannel(channel) => {
                radio.set_channel(ieee_channel(channel));
                defmt::trace!("radio tuned to {}", ieee_channel(channel));
            }
            // The nRF radio is disabled whenever no operation is running
            RadioCommand::PowerOff => {}
            RadioCommand::StartReceive => {
                carried = receive_session(&mut radio, &mut packet, &commands, &events).await;
            }
            RadioCommand::StopReceive => {
                defmt::trace!("stop with no open session");
            }
            RadioCommand::Transmit(frame) => {
                packet.copy_from_slice(frame.as_bytes());
                if let Err(err) = radio.try_send(&mut packet).await {
                    defmt::warn!("transmit failed: {}", err);
                }
                events.send(NodeEvent::TransmitCompleted { now: now_ms() }).await;
            }
        }
    }
}

/// Receive until told to stop, forwarding every good frame
///
/// Any other command closes the session too and is handed back so it
/// still runs, after the session has ended.
async fn receive_session(
    radio: &mut Radio<'static, RADIO>,
    packet: &mut Packet,
    commands: &CommandReceiver,
    events: &EventSender,
) -> Option<RadioCommand> {
    loop {
        match select(radio.receive(packet), commands.receive()).await {
            Either::First(Ok(())) => {
                events.send(NodeEvent::frame(now_ms(), packet)).await;
            }
            Either::First(Err(err)) => {
                defmt::warn!("receive error: {}", err);
            }
            Either::Second(command) => {
                events.send(NodeEvent::receive_ended(now_ms())).await;
                if matches!(command, RadioCommand::StopReceive) {
                    return None;
                }
                defmt::warn!("{} while receiving, session closed first", command);
                return Some(command);
            }
        }
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}
