//! Single-channel 8-bit PWM generator core.
//!
//! Converts a duty-cycle value in `[0, 255]` into a periodic binary
//! waveform whose high-time fraction is `duty/256`, under a clocked,
//! resettable, enable-gated execution model. The counter, comparator and
//! registered output are cycle-accurate to the reference pipeline, so the
//! crate doubles as a behavioural simulation model: [`sim::Testbench`]
//! drives the pin-level wrapper one rising edge at a time, and
//! [`hal::PwmPin`] bit-bangs the waveform onto any `embedded-hal` output
//! pin.
//!
//! Deliberately fixed: 8-bit resolution, 256-tick period, one channel.

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use)]

pub mod hal;
pub mod pins;
pub mod pwm;
pub mod sim;

pub use pins::{PinInputs, PinOutputs, PwmTop};
pub use pwm::{PERIOD_TICKS, PwmCore};
