//! Core functionalities: line probing, bit sampling, frame validation,
//! the capture service, and the session event store.

pub mod capture;
pub mod eventlog;
pub mod frame;
pub mod probe;
pub mod sampler;
pub mod sim;

pub use capture::{CaptureEvent, CaptureService, CaptureStats};
pub use eventlog::{format_entry, EntryKind, EventEntry, EventStore};
pub use frame::{Frame, InvalidFrame};
pub use probe::{HalProbe, LineProbe, DEFAULT_QUANTUM_US};
pub use sampler::{BitSampler, SamplerConfig};
pub use sim::{FrameFault, SimProbe};
