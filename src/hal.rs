//! embedded-hal adapter: bit-bang the generated waveform onto a GPIO pin.
//!
//! [`PwmPin`] wraps a [`PwmCore`] together with an output pin and a duty
//! register. A timer interrupt (or a simulation loop) calls
//! [`PwmPin::tick`] once per PWM clock; the registered output bit is
//! mirrored onto the pin.
//!
//! The adapter also implements [`embedded_hal::pwm::SetDutyCycle`] so the
//! generator slots into drivers written against the standard trait. The
//! trait's `max_duty_cycle` is 255, matching the 8-bit duty register; note
//! the comparator itself divides by 256, so a duty of 255 yields 255/256
//! high time — full-on is not reachable, by the generator's contract.
//!
//! The core stays infallible; the only fallible seam here is the pin
//! write, whose error propagates unchanged.

use crate::pwm::PwmCore;
use core::convert::Infallible;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::debug;

/// Software PWM output: core, duty register, and the driven pin.
#[derive(Debug)]
pub struct PwmPin<P: OutputPin> {
    core: PwmCore,
    duty: u8,
    enabled: bool,
    pin: P,
}

impl<P: OutputPin> PwmPin<P> {
    /// Wrap `pin`. Starts disabled with duty 0; the pin is not touched
    /// until the first [`tick`](Self::tick) or [`reset`](Self::reset).
    pub const fn new(pin: P) -> Self {
        Self {
            core: PwmCore::new(),
            duty: 0,
            enabled: false,
            pin,
        }
    }

    /// Gate the generator. While disabled, ticks hold state and keep the
    /// pin at the held output level.
    pub fn set_enabled(&mut self, enabled: bool) {
        debug!("pwm pin {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;
    }

    /// Current duty register value.
    pub const fn duty(&self) -> u8 {
        self.duty
    }

    /// The wrapped core, for inspection.
    pub const fn core(&self) -> &PwmCore {
        &self.core
    }

    /// Advance one PWM clock and mirror the output onto the pin.
    ///
    /// Returns the output level that was driven.
    pub fn tick(&mut self) -> Result<bool, P::Error> {
        let (out, _) = self.core.tick(self.duty, self.enabled, false);
        if out {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        Ok(out)
    }

    /// Force the generator to its reset state and drive the pin low.
    pub fn reset(&mut self) -> Result<(), P::Error> {
        self.core.tick(self.duty, false, true);
        self.pin.set_low()
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> embedded_hal::pwm::ErrorType for PwmPin<P> {
    // Updating the duty register cannot fail; pin errors surface from
    // tick() instead.
    type Error = Infallible;
}

impl<P: OutputPin> SetDutyCycle for PwmPin<P> {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty.min(255) as u8;
        Ok(())
    }
}
