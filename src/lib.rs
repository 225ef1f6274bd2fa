//! Source Node Firmware Library
//!
//! This library provides the radio-control core of a battery-powered
//! sensor node in a multi-channel, beacon-synchronized IEEE 802.15.4
//! network. The node owns one half-duplex transceiver and one alarm and
//! time-multiplexes the radio across several PAN ids to follow beacons
//! and transmit when its schedule says so.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Schedule Policy (external)  │  Channel Arbiter              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      CODEC LAYER                             │
//! │  Outgoing data frame template  │  Beacon validation          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  802.15.4 Radio  │  Alarm  │  LEDs  │  Event queue            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single consumer**: every hardware event funnels through one queue
//!   into [`radio::arbiter::ChannelArbiter::handle`]
//! - **Type-driven design**: channels, PAN ids and LED states are types
//! - **No unsafe in application code**: All unsafe isolated in HAL/FFI layers
//! - **Functional core, imperative shell**: the arbiter talks to hardware
//!   only through traits, so it runs unchanged on the host
//! - **Nothing blocks**: radio and alarm operations complete later as events

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_nrf;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Embassy tasks implementing the radio, alarm and LED facades on the nRF52840.
#[cfg(feature = "embedded")]
pub mod hal;

/// Radio Control Logic
///
/// Hardware facades, events and the channel arbiter.
pub mod radio;

/// Frame Codec
///
/// Outgoing data frame template and beacon validation.
pub mod frame;

/// Schedule Policy
///
/// The decision service the arbiter consults.
pub mod policy;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Core
    pub use crate::policy::{SchedulePolicy, StaticPolicy};
    pub use crate::radio::arbiter::ChannelArbiter;
    pub use crate::radio::event::NodeEvent;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
