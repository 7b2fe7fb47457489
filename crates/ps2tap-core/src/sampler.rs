use crate::frame::Frame;
use crate::probe::LineProbe;

/// Wait budgets, expressed in polling quanta.
#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    /// How long to wait for a transmission to start. At the 5 µs default
    /// quantum, 200 000 quanta is roughly one second of idle line.
    pub idle_timeout_quanta: u32,
    /// How long the resynchronizer waits for both lines to return HIGH.
    pub resync_timeout_quanta: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            idle_timeout_quanta: 200_000,
            resync_timeout_quanta: 20_000,
        }
    }
}

/// Edge-driven receiver for device-to-host PS/2 transmissions.
///
/// The device owns the clock; the sampler reads the data line on each falling
/// edge. Only the initial wait for a falling edge is time-bounded — once a
/// transmission has started the device is trusted to finish clocking it, so
/// the in-frame waits block without a budget.
pub struct BitSampler<P> {
    probe: P,
    cfg: SamplerConfig,
}

impl<P: LineProbe> BitSampler<P> {
    pub fn new(probe: P, cfg: SamplerConfig) -> Self {
        Self { probe, cfg }
    }

    /// Samples one full frame, or `None` when no transmission begins within
    /// the idle budget. An idle line is the normal state of a keyboard, so
    /// the timeout is ordinary control flow rather than an error.
    pub fn sample_frame(&mut self) -> Option<Frame> {
        if !self.wait_clock_low_bounded() {
            return None;
        }
        let start = self.probe.data_high();
        self.wait_clock_high();

        let mut data = [false; 8];
        for slot in data.iter_mut() {
            self.wait_clock_low();
            *slot = self.probe.data_high();
            self.wait_clock_high();
        }

        self.wait_clock_low();
        let parity = self.probe.data_high();
        self.wait_clock_high();

        self.wait_clock_low();
        let stop = self.probe.data_high();
        // Consume the rising edge of the stop cell, otherwise the next call
        // would read the tail of this frame as a new start bit.
        self.wait_clock_high();

        Some(Frame { start, data, parity, stop })
    }

    /// Resynchronizer: after a malformed frame, wait for both lines to rest
    /// HIGH. Returns whether the idle state was reached within budget; a
    /// timed-out wait is indistinguishable from an unplugged device and is
    /// not fatal, so this never raises.
    pub fn wait_for_idle(&mut self) -> bool {
        let mut waited = 0u32;
        while !(self.probe.clock_high() && self.probe.data_high()) {
            if waited >= self.cfg.resync_timeout_quanta {
                return false;
            }
            self.probe.settle();
            waited += 1;
        }
        true
    }

    fn wait_clock_low_bounded(&mut self) -> bool {
        let mut waited = 0u32;
        while self.probe.clock_high() {
            if waited >= self.cfg.idle_timeout_quanta {
                return false;
            }
            self.probe.settle();
            waited += 1;
        }
        true
    }

    fn wait_clock_low(&mut self) {
        while self.probe.clock_high() {
            self.probe.settle();
        }
    }

    fn wait_clock_high(&mut self) {
        while !self.probe.clock_high() {
            self.probe.settle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameFault, SimProbe};

    fn test_cfg() -> SamplerConfig {
        SamplerConfig { idle_timeout_quanta: 500, resync_timeout_quanta: 200 }
    }

    #[test]
    fn samples_a_clean_frame() {
        let mut probe = SimProbe::new();
        probe.push_frame(0x1C);
        let mut sampler = BitSampler::new(probe, test_cfg());

        let frame = sampler.sample_frame().expect("frame expected");
        assert_eq!(frame.decode(), Ok(0x1C));
        assert!(frame.parity_ok());
    }

    #[test]
    fn samples_consecutive_frames() {
        let mut probe = SimProbe::new();
        probe.push_frame(0xE0);
        probe.push_frame(0x75);
        let mut sampler = BitSampler::new(probe, test_cfg());

        assert_eq!(sampler.sample_frame().unwrap().decode(), Ok(0xE0));
        assert_eq!(sampler.sample_frame().unwrap().decode(), Ok(0x75));
    }

    #[test]
    fn idle_line_times_out_without_a_frame() {
        let mut probe = SimProbe::new();
        probe.push_idle(10);
        let mut sampler = BitSampler::new(probe, test_cfg());
        assert!(sampler.sample_frame().is_none());
    }

    #[test]
    fn corrupt_stop_bit_is_sampled_and_rejected_downstream() {
        let mut probe = SimProbe::new();
        probe.push_frame_with(0x5A, FrameFault::BadStop);
        let mut sampler = BitSampler::new(probe, test_cfg());

        let frame = sampler.sample_frame().expect("frame expected");
        let err = frame.decode().unwrap_err();
        assert_eq!(err.value, 0x5A);
        assert!(!err.stop);
    }

    #[test]
    fn parity_fault_still_yields_the_byte() {
        let mut probe = SimProbe::new();
        probe.push_frame_with(0x32, FrameFault::BadParity);
        let mut sampler = BitSampler::new(probe, test_cfg());

        let frame = sampler.sample_frame().expect("frame expected");
        assert!(!frame.parity_ok());
        assert_eq!(frame.decode(), Ok(0x32));
    }

    #[test]
    fn wait_for_idle_succeeds_on_a_resting_line() {
        let mut probe = SimProbe::new();
        probe.push_idle(4);
        let mut sampler = BitSampler::new(probe, test_cfg());
        assert!(sampler.wait_for_idle());
    }

    #[test]
    fn wait_for_idle_gives_up_when_a_line_is_held_low() {
        let mut probe = SimProbe::new();
        for _ in 0..1000 {
            probe.push_level(false, true);
        }
        let mut sampler = BitSampler::new(probe, test_cfg());
        assert!(!sampler.wait_for_idle());
    }

    #[test]
    fn wait_for_idle_recovers_once_lines_release() {
        let mut probe = SimProbe::new();
        for _ in 0..50 {
            probe.push_level(true, false);
        }
        probe.push_idle(2);
        let mut sampler = BitSampler::new(probe, test_cfg());
        assert!(sampler.wait_for_idle());
    }
}
