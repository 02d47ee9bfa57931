//! Pin-level contract for the PWM generator.
//!
//! Single source of truth for the signal mapping — the simulation harness
//! and any board integration reference this module rather than hard-coding
//! bit positions.
//!
//! | Signal            | Dir | Width | Meaning                                  |
//! |-------------------|-----|-------|------------------------------------------|
//! | duty_cycle_in     | in  | 8     | target high-time level, sampled each cycle |
//! | clock             | in  | 1     | rising edge advances state               |
//! | reset_n           | in  | 1     | active-low, overrides enable             |
//! | enable            | in  | 1     | low (with reset released) freezes state  |
//! | pwm_out           | out | 1     | generated waveform                       |
//! | counter_debug_out | out | 7     | counter bits [6:0]                       |
//!
//! The debug bus deliberately exposes only the low 7 counter bits; bit 7
//! still drives the modulo-256 rollover internally but is unobservable
//! here. That asymmetry comes from the reference pin mapping and is kept
//! as a testable boundary condition.

use crate::pwm::PwmCore;

/// Bit position of `pwm_out` on the packed output bus.
pub const PWM_OUT_BIT: u8 = 0;
/// Shift of the counter debug window on the packed output bus.
pub const COUNTER_DEBUG_SHIFT: u8 = 1;
/// Mask selecting the exposed counter bits [6:0].
pub const COUNTER_DEBUG_MASK: u8 = 0x7F;

/// Input pins sampled at each rising clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinInputs {
    /// Target high-time level, numerator over 256.
    pub duty_cycle_in: u8,
    /// Clock-enable. Low freezes the generator (unless reset is asserted).
    pub enable: bool,
    /// Active-low reset. Low forces counter = 0, pwm_out = 0.
    pub reset_n: bool,
}

impl Default for PinInputs {
    /// Idle bench state: duty 0, enabled, reset released.
    fn default() -> Self {
        Self {
            duty_cycle_in: 0,
            enable: true,
            reset_n: true,
        }
    }
}

/// Output pins after a rising clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinOutputs {
    /// The generated PWM waveform bit.
    pub pwm_out: bool,
    /// Counter bits [6:0]. Bit 7 of the internal counter is not exposed.
    pub counter_debug_out: u8,
}

impl PinOutputs {
    /// Pack onto the 8-bit output bus: `pwm_out` at bit 0, counter debug
    /// window at bits [7:1]. A bench decodes the counter back out with
    /// `(bus >> 1) & 0x7F`.
    pub const fn output_bus(&self) -> u8 {
        ((self.pwm_out as u8) << PWM_OUT_BIT)
            | ((self.counter_debug_out & COUNTER_DEBUG_MASK) << COUNTER_DEBUG_SHIFT)
    }
}

/// Pin-level wrapper owning one [`PwmCore`].
///
/// Translates the active-low reset pin into the core's reset condition and
/// narrows the counter to the 7-bit debug window.
#[derive(Debug, Default)]
pub struct PwmTop {
    core: PwmCore,
}

impl PwmTop {
    pub const fn new() -> Self {
        Self {
            core: PwmCore::new(),
        }
    }

    /// Apply one rising clock edge with the given input pin values.
    pub fn rising_edge(&mut self, inputs: &PinInputs) -> PinOutputs {
        let (pwm_out, _) = self
            .core
            .tick(inputs.duty_cycle_in, inputs.enable, !inputs.reset_n);

        PinOutputs {
            pwm_out,
            counter_debug_out: self.core.counter() & COUNTER_DEBUG_MASK,
        }
    }

    /// The wrapped core, for white-box inspection in tests.
    pub const fn core(&self) -> &PwmCore {
        &self.core
    }
}
