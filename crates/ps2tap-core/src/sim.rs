use crate::probe::LineProbe;

/// Deliberate corruption applied to a scripted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFault {
    Clean,
    BadStart,
    BadStop,
    BadParity,
}

#[derive(Debug, Clone, Copy)]
struct Level {
    clock: bool,
    data: bool,
}

/// Scripted stand-in for the two bus lines.
///
/// Each `settle` advances one recorded sample; once the script is exhausted
/// the lines rest at the pull-up idle state. Replay files and hardware-free
/// tests both drive the sampler through this.
#[derive(Debug, Default)]
pub struct SimProbe {
    script: Vec<Level>,
    pos: usize,
}

impl SimProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waveform for a byte sequence, one clean frame per byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut probe = Self::new();
        for &byte in bytes {
            probe.push_frame(byte);
        }
        probe
    }

    pub fn push_level(&mut self, clock: bool, data: bool) {
        self.script.push(Level { clock, data });
    }

    pub fn push_idle(&mut self, quanta: usize) {
        for _ in 0..quanta {
            self.push_level(true, true);
        }
    }

    pub fn push_frame(&mut self, byte: u8) {
        self.push_frame_with(byte, FrameFault::Clean);
    }

    /// Scripts one 11-bit frame: a falling then rising clock edge per bit,
    /// data held stable across the cell.
    pub fn push_frame_with(&mut self, byte: u8, fault: FrameFault) {
        let start = fault == FrameFault::BadStart;
        let stop = fault != FrameFault::BadStop;
        // Odd parity: the parity bit tops the data ones up to an odd count.
        let mut parity = byte.count_ones() % 2 == 0;
        if fault == FrameFault::BadParity {
            parity = !parity;
        }

        self.push_idle(1);
        self.push_bit(start);
        for i in 0..8 {
            self.push_bit((byte >> i) & 1 == 1);
        }
        self.push_bit(parity);
        self.push_bit(stop);
        self.push_idle(2);
    }

    pub fn exhausted(&self) -> bool {
        self.pos >= self.script.len()
    }

    fn push_bit(&mut self, bit: bool) {
        self.push_level(false, bit);
        self.push_level(true, bit);
    }

    fn current(&self) -> Level {
        self.script
            .get(self.pos)
            .copied()
            .unwrap_or(Level { clock: true, data: true })
    }
}

impl LineProbe for SimProbe {
    fn clock_high(&mut self) -> bool {
        self.current().clock
    }

    fn data_high(&mut self) -> bool {
        self.current().data
    }

    fn settle(&mut self) {
        if self.pos < self.script.len() {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_script_rests_at_idle() {
        let mut probe = SimProbe::new();
        probe.push_level(false, false);
        assert!(!probe.clock_high());
        probe.settle();
        assert!(probe.exhausted());
        assert!(probe.clock_high());
        assert!(probe.data_high());
    }

    #[test]
    fn frame_script_carries_eleven_bit_cells() {
        let mut probe = SimProbe::new();
        probe.push_frame(0x00);
        // 1 lead-in + 11 bits x 2 edges + 2 trailing idle samples.
        assert_eq!(probe.script.len(), 25);
    }
}
