//! Counter / comparator / output-register pipeline.
//!
//! The generator is a free-running 8-bit counter compared against an
//! externally supplied duty-cycle value. The comparison result is held in
//! a one-cycle-delayed output register, matching synchronous-register
//! semantics: the output observed after a tick reflects the counter value
//! that was present *before* that tick's increment.
//!
//! ## Execution model
//!
//! There is no internal clock. The owner calls [`PwmCore::tick`] exactly
//! once per simulated rising edge; `&mut self` ownership makes concurrent
//! or out-of-order ticking unrepresentable.
//!
//! ## Signal precedence
//!
//! 1. **Reset** — zeroes counter and output, wins over enable.
//! 2. **Enable** — counter advances, output register updates.
//! 3. **Neither** — state is frozen.

/// Number of clock ticks in one full PWM period.
pub const PERIOD_TICKS: usize = 256;

/// Single-channel 8-bit PWM generator state.
///
/// Two fields of state, nothing else: the free-running counter and the
/// registered output bit. The duty-cycle input is sampled on every tick
/// rather than latched, so a changed duty value participates in the very
/// next comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmCore {
    counter: u8,
    output: bool,
}

impl PwmCore {
    /// A core in its post-reset state: counter 0, output low.
    pub const fn new() -> Self {
        Self {
            counter: 0,
            output: false,
        }
    }

    /// Advance the core by one clock edge.
    ///
    /// `reset` models the active-low `reset_n` pin already inverted
    /// (true = reset condition asserted). It takes priority over
    /// `enabled` and zeroes both counter and output on the same tick.
    ///
    /// When enabled, the output register is loaded with the comparison
    /// of the *pre-increment* counter against `duty_cycle`. Comparing
    /// the post-increment counter instead would look simpler but breaks
    /// cycle-accurate equivalence with the registered hardware pipeline.
    ///
    /// Returns the registered output together with the post-update
    /// counter bits (LSB first) for observability.
    pub fn tick(&mut self, duty_cycle: u8, enabled: bool, reset: bool) -> (bool, [bool; 8]) {
        if reset {
            self.counter = 0;
            self.output = false;
        } else if enabled {
            let next_output = self.counter < duty_cycle;
            self.counter = self.counter.wrapping_add(1);
            self.output = next_output;
        }
        // Disabled and not in reset: hold.

        (self.output, self.counter_bits())
    }

    /// Current registered output bit.
    pub const fn output(&self) -> bool {
        self.output
    }

    /// Current counter value, full 8 bits.
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// Counter as individual bits, LSB first.
    pub const fn counter_bits(&self) -> [bool; 8] {
        let c = self.counter;
        [
            c & 0x01 != 0,
            c & 0x02 != 0,
            c & 0x04 != 0,
            c & 0x08 != 0,
            c & 0x10 != 0,
            c & 0x20 != 0,
            c & 0x40 != 0,
            c & 0x80 != 0,
        ]
    }
}

impl Default for PwmCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run one full period from counter 0 and count high ticks.
    fn high_ticks_per_period(duty: u8) -> usize {
        let mut core = PwmCore::new();
        (0..PERIOD_TICKS)
            .filter(|_| core.tick(duty, true, false).0)
            .count()
    }

    #[test]
    fn zero_duty_never_high() {
        let mut core = PwmCore::new();
        for _ in 0..3 * PERIOD_TICKS {
            let (out, _) = core.tick(0, true, false);
            assert!(!out);
        }
    }

    #[test]
    fn max_duty_high_on_255_of_256_ticks() {
        assert_eq!(high_ticks_per_period(255), 255);

        // The single low tick is the one whose pre-increment counter was 255.
        let mut core = PwmCore::new();
        for expected_prior in 0..=255u8 {
            let (out, _) = core.tick(255, true, false);
            assert_eq!(out, expected_prior != 255);
        }
    }

    #[test]
    fn half_duty_is_contiguous_128_high_then_128_low() {
        let mut core = PwmCore::new();
        for prior in 0..=255u16 {
            let (out, _) = core.tick(128, true, false);
            assert_eq!(out, prior < 128, "tick with prior counter {prior}");
        }
    }

    #[test]
    fn duty_fidelity_for_every_boundary_value() {
        for duty in [0u8, 1, 2, 127, 128, 129, 254, 255] {
            assert_eq!(high_ticks_per_period(duty), duty as usize);
        }
    }

    #[test]
    fn counter_wraps_without_skip_or_repeat() {
        let mut core = PwmCore::new();
        // Advance to 253.
        for _ in 0..253 {
            core.tick(0, true, false);
        }
        let mut seen = heapless::Vec::<u8, 5>::new();
        seen.push(core.counter()).unwrap();
        for _ in 0..4 {
            core.tick(0, true, false);
            seen.push(core.counter()).unwrap();
        }
        assert_eq!(seen.as_slice(), &[253, 254, 255, 0, 1]);
    }

    #[test]
    fn reset_wins_over_enable_on_the_same_tick() {
        let mut core = PwmCore::new();
        for _ in 0..50 {
            core.tick(200, true, false);
        }
        assert_ne!(core.counter(), 0);
        assert!(core.output());

        let (out, bits) = core.tick(200, true, true);
        assert!(!out);
        assert_eq!(core.counter(), 0);
        assert_eq!(bits, [false; 8]);
    }

    #[test]
    fn disabled_core_holds_counter_and_output() {
        let mut core = PwmCore::new();
        for _ in 0..10 {
            core.tick(128, true, false);
        }
        let held_counter = core.counter();
        let held_output = core.output();

        for _ in 0..100 {
            let (out, _) = core.tick(128, false, false);
            assert_eq!(out, held_output);
            assert_eq!(core.counter(), held_counter);
        }

        // Resumes from the held value, not from zero.
        core.tick(128, true, false);
        assert_eq!(core.counter(), held_counter.wrapping_add(1));
    }

    #[test]
    fn duty_change_takes_effect_at_the_next_registered_comparison() {
        let mut core = PwmCore::new();
        // duty 0 up to counter == 10; output stays low throughout.
        for _ in 0..10 {
            core.tick(0, true, false);
        }
        assert_eq!(core.counter(), 10);
        assert!(!core.output());

        // The register still holds the old comparison until a tick
        // evaluates the new duty against the counter.
        let (out, _) = core.tick(255, true, false);
        assert!(out, "new duty compared against prior counter 10");
        assert_eq!(core.counter(), 11);
    }

    #[test]
    fn output_lags_counter_by_one_cycle() {
        let mut core = PwmCore::new();
        // duty 1: only the tick whose prior counter was 0 goes high.
        let (out, _) = core.tick(1, true, false);
        assert!(out, "prior counter 0 < duty 1");
        assert_eq!(core.counter(), 1, "output high while counter already 1");
        let (out, _) = core.tick(1, true, false);
        assert!(!out);
    }
}
