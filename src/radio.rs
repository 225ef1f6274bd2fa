//! Radio Control Logic
//!
//! Hardware facades, the events they produce, and the channel arbiter
//! that reconciles both after every event.

pub mod arbiter;
pub mod device;
pub mod event;
