//! Synthetic telemetry generator.
//!
//! Each call to [`TelemetryGenerator::generate`] produces a complete
//! [`Snapshot`]: overview and network counters are drawn from the random
//! source, alerts and recent calls come from the fixed [`catalog`].
//!
//! That split mirrors the demo data the dashboard was built around. It is
//! almost certainly an artifact of mock content rather than a design
//! choice: a real feed would refresh alerts and calls too.
//!
//! [`catalog`]: crate::catalog

use std::ops::Range;

use rand::rngs::StdRng;

use crate::catalog;
use crate::display::Tenths;
use crate::model::{NetworkStats, Overview, Snapshot};
use crate::random::{RandomSource, RngSource, draw_range};

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

pub const ACTIVE_CALLS: Range<u32> = 50..200;
pub const TOTAL_ENDPOINTS: Range<u32> = 1200..1700;
pub const THREAT_SCORE: Range<u32> = 10..50;
pub const PACKETS_PROCESSED: Range<u64> = 5_000_000..6_000_000;

pub const BANDWIDTH_PCT: Range<u32> = 70..100;
pub const LATENCY_MS: Range<u32> = 5..30;
/// Tenths of a percent: 0.0 % to 0.9 %.
pub const PACKET_LOSS_TENTHS: Range<u32> = 0..10;
/// Tenths of a millisecond: 1.0 ms to 5.9 ms.
pub const JITTER_TENTHS: Range<u32> = 10..60;

fn draw_u32(source: &mut impl RandomSource, range: Range<u32>) -> u32 {
    // The range is u32, so the draw fits back into one.
    draw_range(source, u64::from(range.start), u64::from(range.end)) as u32
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generator over the standard seedable RNG.
pub type DefaultGenerator = TelemetryGenerator<RngSource<StdRng>>;

/// Produces snapshots from a random source. Never fails.
#[derive(Debug, Clone)]
pub struct TelemetryGenerator<S> {
    source: S,
    next_tick: u64,
}

impl DefaultGenerator {
    /// Generator over a reproducible seeded stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource::seeded(seed))
    }

    /// Generator seeded from OS entropy.
    pub fn from_os() -> Self {
        Self::new(RngSource::from_os())
    }
}

impl<S: RandomSource> TelemetryGenerator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            next_tick: 0,
        }
    }

    /// Build the next snapshot.
    ///
    /// Draw order is fixed (overview fields, then network fields) so a
    /// seeded source always yields the same sequence.
    pub fn generate(&mut self) -> Snapshot {
        let overview = self.overview();
        let network_stats = self.network_stats();
        let tick = self.next_tick;
        self.next_tick += 1;

        Snapshot {
            tick,
            overview,
            alerts: catalog::alert_feed(),
            recent_calls: catalog::recent_calls(),
            network_stats,
        }
    }

    /// Number of snapshots generated so far.
    pub fn generated(&self) -> u64 {
        self.next_tick
    }

    fn overview(&mut self) -> Overview {
        Overview {
            active_calls: draw_u32(&mut self.source, ACTIVE_CALLS),
            total_endpoints: draw_u32(&mut self.source, TOTAL_ENDPOINTS),
            threat_score: draw_u32(&mut self.source, THREAT_SCORE),
            packets_processed: draw_range(
                &mut self.source,
                PACKETS_PROCESSED.start,
                PACKETS_PROCESSED.end,
            ),
        }
    }

    fn network_stats(&mut self) -> NetworkStats {
        NetworkStats {
            bandwidth_pct: draw_u32(&mut self.source, BANDWIDTH_PCT),
            latency_ms: draw_u32(&mut self.source, LATENCY_MS),
            packet_loss_pct: Tenths(draw_u32(&mut self.source, PACKET_LOSS_TENTHS)),
            jitter_ms: Tenths(draw_u32(&mut self.source, JITTER_TENTHS)),
        }
    }
}

/// Anything that can produce a fresh snapshot on demand.
///
/// The scheduler is generic over this so tests can drive it with a
/// scripted producer.
pub trait SnapshotSource {
    fn generate(&mut self) -> Snapshot;
}

impl<S: RandomSource> SnapshotSource for TelemetryGenerator<S> {
    fn generate(&mut self) -> Snapshot {
        TelemetryGenerator::generate(self)
    }
}

impl<F: FnMut() -> Snapshot> SnapshotSource for F {
    fn generate(&mut self) -> Snapshot {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantSource, SequenceSource};

    #[test]
    fn constant_half_hits_midpoints() {
        let mut g = TelemetryGenerator::new(ConstantSource(0.5));
        let s = g.generate();
        assert_eq!(s.overview.active_calls, 125);
        assert_eq!(s.overview.total_endpoints, 1450);
        assert_eq!(s.overview.threat_score, 30);
        assert_eq!(s.overview.packets_processed, 5_500_000);
    }

    #[test]
    fn constant_half_network_stats() {
        let mut g = TelemetryGenerator::new(ConstantSource(0.5));
        let n = g.generate().network_stats;
        assert_eq!(n.bandwidth_pct, 85);
        assert_eq!(n.latency_ms, 17);
        assert_eq!(n.packet_loss_pct, Tenths(5));
        assert_eq!(n.jitter_ms, Tenths(35));
    }

    #[test]
    fn zero_draws_hit_lower_bounds() {
        let s = TelemetryGenerator::new(ConstantSource(0.0)).generate();
        assert_eq!(s.overview.active_calls, ACTIVE_CALLS.start);
        assert_eq!(s.overview.packets_processed, PACKETS_PROCESSED.start);
        assert_eq!(s.network_stats.packet_loss_pct, Tenths(0));
    }

    #[test]
    fn near_one_draws_stay_below_upper_bounds() {
        let s = TelemetryGenerator::new(ConstantSource(0.999_999_999_9)).generate();
        assert_eq!(s.overview.active_calls, ACTIVE_CALLS.end - 1);
        assert_eq!(s.overview.total_endpoints, TOTAL_ENDPOINTS.end - 1);
        assert_eq!(s.overview.threat_score, THREAT_SCORE.end - 1);
        assert_eq!(s.overview.packets_processed, PACKETS_PROCESSED.end - 1);
        assert_eq!(s.network_stats.jitter_ms, Tenths(JITTER_TENTHS.end - 1));
    }

    #[test]
    fn draws_are_consumed_in_field_order() {
        let draws = vec![0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875];
        let s = TelemetryGenerator::new(SequenceSource::new(draws)).generate();
        assert_eq!(s.overview.active_calls, 50);
        assert_eq!(s.overview.total_endpoints, 1262);
        assert_eq!(s.overview.threat_score, 20);
        assert_eq!(s.overview.packets_processed, 5_375_000);
        assert_eq!(s.network_stats.bandwidth_pct, 85);
        assert_eq!(s.network_stats.latency_ms, 20);
        assert_eq!(s.network_stats.packet_loss_pct, Tenths(7));
        assert_eq!(s.network_stats.jitter_ms, Tenths(53));
    }

    #[test]
    fn ticks_count_up_from_zero() {
        let mut g = TelemetryGenerator::seeded(1);
        assert_eq!(g.generate().tick, 0);
        assert_eq!(g.generate().tick, 1);
        assert_eq!(g.generated(), 2);
    }

    #[test]
    fn static_records_are_not_rerolled() {
        let mut g = TelemetryGenerator::seeded(3);
        let a = g.generate();
        let b = g.generate();
        assert_eq!(a.alerts, b.alerts);
        assert_eq!(a.recent_calls, b.recent_calls);
        assert_eq!(a.alerts, catalog::alert_feed());
    }

    #[test]
    fn closures_are_snapshot_sources() {
        let template = TelemetryGenerator::new(ConstantSource(0.5)).generate();
        let mut n = 0;
        let mut src = move || {
            n += 1;
            Snapshot {
                tick: n,
                ..template.clone()
            }
        };
        assert_eq!(SnapshotSource::generate(&mut src).tick, 1);
        assert_eq!(SnapshotSource::generate(&mut src).tick, 2);
    }
}
