//! Source Node Main Application
//!
//! Entry point for the nRF52840 source node firmware.
//! Initializes hardware, spawns the radio and alarm tasks, then runs the
//! channel arbiter on the event queue.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::radio::ieee802154::Radio;
use embassy_nrf::{bind_interrupts, peripherals, radio};
use {defmt_rtt as _, panic_probe as _};

use source_node::hal::gpio::{BoardLeds, StatusLed};
use source_node::hal::radio::{CommandQueue, RadioPort};
use source_node::hal::timer::{AlarmPort, AlarmSignal};
use source_node::hal::{self, EventQueue};
use source_node::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    RADIO => radio::InterruptHandler<peripherals::RADIO>;
});

static EVENTS: EventQueue = EventQueue::new();
static RADIO_COMMANDS: CommandQueue = CommandQueue::new();
static ALARM: AlarmSignal = AlarmSignal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Source Node Firmware v{}", env!("CARGO_PKG_VERSION"));

    // 802.15.4 timing needs the crystal oscillator
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(config);

    info!("Peripherals initialized");

    let mut radio = Radio::new(p.RADIO, Irqs);
    hal::radio::configure(&mut radio);

    // DK LEDs are active low
    let leds = BoardLeds::new(
        StatusLed::active_low(Output::new(p.P0_13, Level::High, OutputDrive::Standard)),
        StatusLed::active_low(Output::new(p.P0_14, Level::High, OutputDrive::Standard)),
        StatusLed::active_low(Output::new(p.P0_15, Level::High, OutputDrive::Standard)),
    );

    // Spawn background tasks
    spawner.spawn(radio_task(radio)).unwrap();
    spawner.spawn(alarm_task()).unwrap();

    info!("Tasks spawned, starting arbiter");

    let port = RadioPort::new(RADIO_COMMANDS.sender(), default_channel());
    let policy = StaticPolicy::listen_on(default_channel());
    let mut arbiter = ChannelArbiter::new(port, AlarmPort::new(&ALARM), leds, policy);
    arbiter.start();

    // Single consumer: each event is handled to completion before the next
    let events = EVENTS.receiver();
    loop {
        let event = events.receive().await;
        arbiter.handle(event);
    }
}

/// Radio task - executes radio commands and reports completions
#[embassy_executor::task]
async fn radio_task(radio: Radio<'static, peripherals::RADIO>) {
    hal::radio::run(radio, RADIO_COMMANDS.receiver(), EVENTS.sender()).await;
}

/// Alarm task - fires the single wake-up alarm
#[embassy_executor::task]
async fn alarm_task() {
    hal::timer::run(&ALARM, EVENTS.sender()).await;
}
