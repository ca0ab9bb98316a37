//! siglock: time-seeded signal batches behind a cooldown lock
//!
//! Flow: request → Analyzing delay → SeedSource → ValueSynthesizer +
//! ScheduleTimeStamper → DisplaySink → LockController countdown → Unlocked

pub mod core;
pub mod types;

// =============================================================================
// VALUE BOUNDS
// =============================================================================

/// Lower bound for every generated value
pub const VALUE_MIN: f64 = 5.00;

/// Upper bound for every generated value
pub const VALUE_MAX: f64 = 16.00;

/// Span of the base value: base = VALUE_MIN + seed * BASE_SPAN
pub const BASE_SPAN: f64 = 11.0;

/// Structured offsets, one per slot: lower, near-base, higher, medium
pub const OFFSET_SET: [f64; 4] = [-0.8, 0.4, 2.0, -0.2];

/// Jitter is drawn uniformly from [-JITTER_AMPLITUDE, JITTER_AMPLITUDE]
pub const JITTER_AMPLITUDE: f64 = 0.3;

/// Marker appended to every rendered value
pub const UNIT_SUFFIX: &str = "x";

// =============================================================================
// SCHEDULE + LOCK WINDOW
// =============================================================================

/// Minutes from generation time for each slot
pub const SCHEDULE_OFFSETS: [u32; 4] = [2, 10, 20, 30];

/// Number of slots in a batch
pub const SLOT_COUNT: usize = 4;

/// Cooldown after a batch: lasts until the furthest slot has elapsed
pub const LOCK_WINDOW_SECS: u32 = SCHEDULE_OFFSETS[SLOT_COUNT - 1] * 60;

// =============================================================================
// TIMING
// =============================================================================

/// Shortest analyzing delay (milliseconds)
pub const ANALYZING_MIN_MS: u64 = 3000;

/// Longest analyzing delay (milliseconds)
pub const ANALYZING_MAX_MS: u64 = 4200;

/// Countdown tick period (milliseconds)
pub const TICK_MS: u64 = 1000;

// =============================================================================
// DISPLAY TEXT
// =============================================================================

pub const TEXT_PENDING: &str = "PENDING";
pub const TEXT_ANALYZING_SLOT: &str = "--";
pub const TEXT_ANALYZING: &str = "Analyzing signals...";
pub const TEXT_UNLOCKED: &str = "Unlocked";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
