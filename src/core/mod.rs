//! Core modules for siglock

pub mod clock;
pub mod seed;
pub mod synth;
pub mod stamper;
pub mod scheduler;
pub mod lock;
pub mod sink;
pub mod config;
pub mod orchestrator;

pub use clock::{Clock, SystemClock, FixedClock};
pub use synth::ValueSynthesizer;
pub use scheduler::{Task, TaskHandle, TaskQueue};
pub use lock::LockController;
pub use sink::{DisplaySink, RecordingSink, JsonSink, TerminalSink};
pub use config::Settings;
pub use orchestrator::GenerationOrchestrator;
