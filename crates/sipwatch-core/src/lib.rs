//! # sipwatch-core
//!
//! **Synthetic telemetry for a SIP/VoIP security operations dashboard.**
//!
//! `sipwatch-core` produces the data a SOC-style dashboard renders: call
//! counts, endpoint counts, a threat score, packet throughput, link quality,
//! a security alert feed, recent call sessions and a small network topology.
//! All of it is mock data. Counters come from a random source, everything
//! else from a fixed catalog.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sipwatch_core::{RefreshScheduler, SchedulerConfig, TelemetryGenerator};
//!
//! let mut scheduler = RefreshScheduler::new(
//!     SchedulerConfig::from_millis(5000).expect("positive interval"),
//!     TelemetryGenerator::from_os(),
//! );
//!
//! // The first snapshot exists before any tick.
//! println!("{} active calls", scheduler.current().overview.active_calls);
//!
//! scheduler.subscribe(|snap| println!("tick {}", snap.tick));
//! // ... call `scheduler.poll(Instant::now())` from your event loop ...
//! scheduler.stop();
//! ```
//!
//! ## Architecture
//!
//! RandomSource → TelemetryGenerator → RefreshScheduler (cell + subscribers) → renderer
//!
//! - [`random`]: the uniform-draw seam; seeded, OS-seeded or constant.
//! - [`generator`]: one [`Snapshot`] per call, bounded fields only.
//! - [`scheduler`]: owns the current snapshot, ticks on a fixed cadence,
//!   notifies subscribers; sync (`poll`) and tokio (`run`) drivers.
//! - [`catalog`] / [`topology`]: fixed alerts, calls, analytics and nodes.
//! - [`display`] / [`presentation`]: display strings and categorical styling.

pub mod catalog;
pub mod display;
pub mod error;
pub mod generator;
pub mod model;
pub mod presentation;
pub mod random;
pub mod scheduler;
pub mod topology;

pub use catalog::{CallAnalytics, CallMetrics, PeakHour, ProtocolShare, QualityMetric};
pub use display::{CallDuration, Tenths, format_millions, format_percent, parse_millions};
pub use error::{ConfigError, ParseError};
pub use generator::{DefaultGenerator, SnapshotSource, TelemetryGenerator};
pub use model::{
    Alert, AlertKind, CallSession, CallStatus, NetworkNode, NetworkStats, NodeKind, NodeStatus,
    Overview, Position, Snapshot, ThreatClass,
};
pub use random::{ConstantSource, RandomSource, RngSource, SequenceSource};
pub use scheduler::{
    DEFAULT_INTERVAL_MS, RefreshScheduler, SchedulerConfig, StopHandle, StopSignal,
    SubscriptionId, spawn_scheduler, stop_pair,
};
pub use topology::{Link, Topology};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
