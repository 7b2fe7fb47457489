use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::probe::LineProbe;
use crate::sampler::{BitSampler, SamplerConfig};

#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// One validated scan-code byte.
    Byte(u8),
    /// No transmission began within the idle budget. Expected while nothing
    /// is typed; replay consumers treat it as end-of-script.
    Idle,
    /// Malformed framing bits. `resynced` reports whether the line returned
    /// to idle within the resync budget afterwards.
    InvalidFrame { value: u8, resynced: bool },
    Stopped,
}

enum Command {
    Stop,
}

#[derive(Debug, Clone, Default)]
pub struct CaptureStats {
    pub frames_ok: u64,
    pub frames_invalid: u64,
    pub resync_failures: u64,
    pub idle_timeouts: u64,
}

/// Owns the sampling thread and hands decoded bytes out over a channel.
///
/// The loop itself never fails: invalid frames and resync timeouts are
/// reported as events and sampling simply continues. It runs until `stop`
/// is called.
pub struct CaptureService {
    cfg: SamplerConfig,
    tx_cmd: Sender<Command>,
    rx_evt: Receiver<CaptureEvent>,
    stats: Arc<Mutex<CaptureStats>>,
}

impl CaptureService {
    pub fn start<P>(probe: P, cfg: SamplerConfig) -> Self
    where
        P: LineProbe + Send + 'static,
    {
        let (tx_cmd, rx_cmd) = unbounded::<Command>();
        let (tx_evt, rx_evt) = unbounded::<CaptureEvent>();
        let stats = Arc::new(Mutex::new(CaptureStats::default()));
        let loop_stats = stats.clone();

        std::thread::spawn(move || {
            let mut sampler = BitSampler::new(probe, cfg);
            loop {
                if let Ok(Command::Stop) = rx_cmd.try_recv() {
                    let _ = tx_evt.send(CaptureEvent::Stopped);
                    return;
                }
                match sampler.sample_frame() {
                    None => {
                        loop_stats.lock().idle_timeouts += 1;
                        let _ = tx_evt.send(CaptureEvent::Idle);
                    }
                    Some(frame) => match frame.decode() {
                        Ok(value) => {
                            if !frame.parity_ok() {
                                debug!("parity mismatch on {value:#04X}, byte accepted");
                            }
                            loop_stats.lock().frames_ok += 1;
                            let _ = tx_evt.send(CaptureEvent::Byte(value));
                        }
                        Err(err) => {
                            warn!("{err}");
                            let resynced = sampler.wait_for_idle();
                            if !resynced {
                                warn!("line did not return to idle after invalid frame");
                            }
                            {
                                let mut s = loop_stats.lock();
                                s.frames_invalid += 1;
                                if !resynced {
                                    s.resync_failures += 1;
                                }
                            }
                            let _ = tx_evt.send(CaptureEvent::InvalidFrame {
                                value: err.value,
                                resynced,
                            });
                        }
                    },
                }
            }
        });

        Self { cfg, tx_cmd, rx_evt, stats }
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(Command::Stop);
    }

    pub fn events(&self) -> &Receiver<CaptureEvent> {
        &self.rx_evt
    }

    pub fn stats(&self) -> CaptureStats {
        self.stats.lock().clone()
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.cfg
    }
}
