//! Single-threaded clocked simulation harness.
//!
//! Drives a [`PwmTop`] the way a hardware testbench drives the wired-up
//! device: hold input pins at a value, apply rising edges, observe output
//! pins. The bench owns the top exclusively and advances it only through
//! `&mut self`, so the strictly-once-per-edge contract holds by
//! construction — no shared clock singleton, no threads.
//!
//! Waveform capture is bounded: one full period fits in a stack-allocated
//! `heapless::Vec`, so the harness itself allocates nothing.

use crate::pins::{PinInputs, PinOutputs, PwmTop};
use crate::pwm::PERIOD_TICKS;
use log::{debug, trace};

/// Samples of `pwm_out` over one full 256-tick period.
#[derive(Debug, Clone)]
pub struct PeriodMeasurement {
    samples: heapless::Vec<bool, PERIOD_TICKS>,
}

impl PeriodMeasurement {
    /// Number of ticks the output was high during the period.
    pub fn high_ticks(&self) -> usize {
        self.samples.iter().filter(|&&s| s).count()
    }

    /// Number of ticks the output was low during the period.
    pub fn low_ticks(&self) -> usize {
        PERIOD_TICKS - self.high_ticks()
    }

    /// Raw per-tick samples, in order.
    pub fn samples(&self) -> &[bool] {
        &self.samples
    }

    /// True when the high ticks form one contiguous run starting at the
    /// first sample (the shape a counter-comparator PWM must produce when
    /// measured from counter 0).
    pub fn high_run_is_contiguous_prefix(&self) -> bool {
        let highs = self.high_ticks();
        self.samples.iter().take(highs).all(|&s| s)
    }
}

/// Testbench around one [`PwmTop`].
///
/// Input pins persist between calls, mirroring how a bench leaves signal
/// values driven until reassigned.
#[derive(Debug, Default)]
pub struct Testbench {
    top: PwmTop,
    inputs: PinInputs,
    cycle: u64,
}

impl Testbench {
    /// Bench with reset released, enable high, duty 0.
    pub fn new() -> Self {
        Self {
            top: PwmTop::new(),
            inputs: PinInputs::default(),
            cycle: 0,
        }
    }

    /// Drive `duty_cycle_in`. Takes effect at the next edge's comparison.
    pub fn set_duty(&mut self, duty: u8) {
        self.inputs.duty_cycle_in = duty;
    }

    /// Drive the `enable` pin.
    pub fn set_enable(&mut self, enable: bool) {
        self.inputs.enable = enable;
    }

    /// Current input pin values.
    pub const fn inputs(&self) -> &PinInputs {
        &self.inputs
    }

    /// The device under test.
    pub const fn top(&self) -> &PwmTop {
        &self.top
    }

    /// Total rising edges applied since construction.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Apply one rising edge with the currently driven inputs.
    pub fn step(&mut self) -> PinOutputs {
        let outputs = self.top.rising_edge(&self.inputs);
        self.cycle += 1;
        trace!(
            "cycle {}: duty={} ena={} rst_n={} -> pwm={} counter_dbg={}",
            self.cycle,
            self.inputs.duty_cycle_in,
            self.inputs.enable,
            self.inputs.reset_n,
            outputs.pwm_out,
            outputs.counter_debug_out
        );
        outputs
    }

    /// Apply `n` rising edges and return the outputs after the last one.
    pub fn run_cycles(&mut self, n: usize) -> PinOutputs {
        let mut last = PinOutputs {
            pwm_out: self.top.core().output(),
            counter_debug_out: self.top.core().counter() & crate::pins::COUNTER_DEBUG_MASK,
        };
        for _ in 0..n {
            last = self.step();
        }
        last
    }

    /// Hold `reset_n` low for `cycles` edges, then release it.
    pub fn apply_reset(&mut self, cycles: usize) {
        debug!("asserting reset_n for {cycles} cycles");
        self.inputs.reset_n = false;
        self.run_cycles(cycles);
        self.inputs.reset_n = true;
    }

    /// Capture `pwm_out` over one full period (256 edges) with the
    /// currently driven inputs.
    pub fn measure_period(&mut self) -> PeriodMeasurement {
        let mut samples = heapless::Vec::new();
        for _ in 0..PERIOD_TICKS {
            let out = self.step();
            // Capacity equals PERIOD_TICKS, push cannot fail.
            let _ = samples.push(out.pwm_out);
        }
        let measurement = PeriodMeasurement { samples };
        debug!(
            "period measured: duty={} high={}/{}",
            self.inputs.duty_cycle_in,
            measurement.high_ticks(),
            PERIOD_TICKS
        );
        measurement
    }
}
