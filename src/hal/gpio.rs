//! GPIO Abstractions
//!
//! Indicator LED drivers for the source node.

use embedded_hal::digital::OutputPin;

use crate::radio::device::Indicators;
use crate::types::{Led, LedState};

/// Indicator LED driver for an active-low LED
///
/// Remembers its own state so it can be toggled without reading the pin.
pub struct StatusLed<P> {
    pin: P,
    state: LedState,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create an LED that lights when the pin is low (initially off)
    pub fn active_low(pin: P) -> Self {
        let mut led = Self {
            pin,
            state: LedState::On,
        };
        led.set(LedState::Off);
        led
    }

    /// Toggle LED state
    pub fn toggle(&mut self) {
        self.set(self.state.toggle());
    }

    /// Drive the LED to `state`
    pub fn set(&mut self, state: LedState) {
        // GPIO writes on the nRF are infallible
        let _ = if state.is_on() {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        self.state = state;
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> LedState {
        self.state
    }
}

/// The node's three indicator LEDs
pub struct BoardLeds<P> {
    leds: [StatusLed<P>; 3],
}

impl<P: OutputPin> BoardLeds<P> {
    /// Group the power, beacon and transmit LEDs
    pub fn new(power: StatusLed<P>, beacon: StatusLed<P>, transmit: StatusLed<P>) -> Self {
        Self {
            leds: [power, beacon, transmit],
        }
    }
}

impl<P: OutputPin> Indicators for BoardLeds<P> {
    fn state(&self, led: Led) -> LedState {
        self.leds[led.index()].state()
    }

    fn set(&mut self, led: Led, state: LedState) {
        self.leds[led.index()].set(state);
    }

    fn toggle(&mut self, led: Led) {
        self.leds[led.index()].toggle();
    }
}
