use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Polling quantum between line reads, in microseconds.
pub const DEFAULT_QUANTUM_US: u32 = 5;

/// Read access to the two PS/2 bus lines plus the polling clock.
///
/// `settle` blocks for one quantum; it is the only time source the sampler
/// knows about, so a scripted implementation can stand in for real hardware.
pub trait LineProbe {
    fn clock_high(&mut self) -> bool;
    fn data_high(&mut self) -> bool;
    fn settle(&mut self);
}

/// `LineProbe` over a pair of `embedded-hal` input pins.
pub struct HalProbe<C, D, T> {
    clock: C,
    data: D,
    delay: T,
    quantum_us: u32,
}

impl<C, D, T> HalProbe<C, D, T>
where
    C: InputPin,
    D: InputPin,
    T: DelayNs,
{
    pub fn new(clock: C, data: D, delay: T) -> Self {
        Self::with_quantum(clock, data, delay, DEFAULT_QUANTUM_US)
    }

    pub fn with_quantum(clock: C, data: D, delay: T, quantum_us: u32) -> Self {
        Self { clock, data, delay, quantum_us }
    }
}

impl<C, D, T> LineProbe for HalProbe<C, D, T>
where
    C: InputPin,
    D: InputPin,
    T: DelayNs,
{
    fn clock_high(&mut self) -> bool {
        // Both lines are pull-up biased; a failed read resolves to the rest state.
        self.clock.is_high().unwrap_or(true)
    }

    fn data_high(&mut self) -> bool {
        self.data.is_high().unwrap_or(true)
    }

    fn settle(&mut self) {
        self.delay.delay_us(self.quantum_us);
    }
}
