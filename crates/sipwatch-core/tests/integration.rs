//! Integration tests for sipwatch-core.
//!
//! These tests exercise the public pipeline end to end:
//! random source → generator → scheduler → subscriber / JSON consumer.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use sipwatch_core::generator::{
    ACTIVE_CALLS, BANDWIDTH_PCT, JITTER_TENTHS, LATENCY_MS, PACKET_LOSS_TENTHS, PACKETS_PROCESSED,
    THREAT_SCORE, TOTAL_ENDPOINTS,
};
use sipwatch_core::{
    CallDuration, ConstantSource, RefreshScheduler, SchedulerConfig, Snapshot, Tenths,
    TelemetryGenerator, Topology, format_millions, parse_millions,
};

fn assert_in_bounds(s: &Snapshot) {
    let o = &s.overview;
    assert!(ACTIVE_CALLS.contains(&o.active_calls), "activeCalls {}", o.active_calls);
    assert!(
        TOTAL_ENDPOINTS.contains(&o.total_endpoints),
        "totalEndpoints {}",
        o.total_endpoints
    );
    assert!(THREAT_SCORE.contains(&o.threat_score), "threatScore {}", o.threat_score);
    assert!(
        PACKETS_PROCESSED.contains(&o.packets_processed),
        "packetsProcessed {}",
        o.packets_processed
    );

    let n = &s.network_stats;
    assert!(BANDWIDTH_PCT.contains(&n.bandwidth_pct));
    assert!(LATENCY_MS.contains(&n.latency_ms));
    assert!(PACKET_LOSS_TENTHS.contains(&n.packet_loss_pct.0));
    assert!(JITTER_TENTHS.contains(&n.jitter_ms.0));
}

#[test]
fn generated_snapshots_respect_bounds() {
    for seed in 0..50 {
        let mut g = TelemetryGenerator::seeded(seed);
        for _ in 0..200 {
            assert_in_bounds(&g.generate());
        }
    }
}

#[test]
fn os_seeded_generator_respects_bounds() {
    let mut g = TelemetryGenerator::from_os();
    for _ in 0..1000 {
        assert_in_bounds(&g.generate());
    }
}

#[test]
fn same_seed_same_snapshots() {
    let mut a = TelemetryGenerator::seeded(0xC0FFEE);
    let mut b = TelemetryGenerator::seeded(0xC0FFEE);
    let run_a: Vec<Snapshot> = (0..25).map(|_| a.generate()).collect();
    let run_b: Vec<Snapshot> = (0..25).map(|_| b.generate()).collect();
    assert_eq!(run_a, run_b);
}

#[test]
fn different_seeds_diverge() {
    let a: Vec<Snapshot> = {
        let mut g = TelemetryGenerator::seeded(1);
        (0..10).map(|_| g.generate()).collect()
    };
    let b: Vec<Snapshot> = {
        let mut g = TelemetryGenerator::seeded(2);
        (0..10).map(|_| g.generate()).collect()
    };
    assert_ne!(a, b);
}

#[test]
fn constant_half_scenario() {
    let s = TelemetryGenerator::new(ConstantSource(0.5)).generate();
    assert_eq!(s.overview.active_calls, 125);
    assert_eq!(s.overview.total_endpoints, 1450);
    assert_eq!(s.overview.threat_score, 30);
    assert_eq!(s.overview.packets_processed, 5_500_000);
}

#[test]
fn display_fields_round_trip() {
    let mut g = TelemetryGenerator::seeded(77);
    for _ in 0..100 {
        let s = g.generate();
        let n = s.network_stats;
        assert_eq!(n.packet_loss_pct.to_string().parse::<Tenths>().unwrap(), n.packet_loss_pct);
        assert_eq!(n.jitter_ms.to_string().parse::<Tenths>().unwrap(), n.jitter_ms);

        let packets = s.overview.packets_processed;
        let back = parse_millions(&format_millions(packets)).unwrap();
        assert!(back.abs_diff(packets) <= 50_000);

        for call in &s.recent_calls {
            let d: CallDuration = call.duration.to_string().parse().unwrap();
            assert_eq!(d, call.duration);
        }
    }
}

#[test]
fn scheduler_end_to_end_with_simulated_clock() {
    let interval = Duration::from_millis(250);
    let t0 = Instant::now();
    let mut s = RefreshScheduler::start_at(
        SchedulerConfig::from_interval(interval).unwrap(),
        TelemetryGenerator::seeded(5),
        t0,
    );

    let published = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&published);
    s.subscribe(move |snap| sink.lock().unwrap().push(Arc::clone(snap)));

    assert_eq!(s.current().tick, 0);

    let k = 8u32;
    for ms in (0..=(250 * k)).step_by(50) {
        s.poll(t0 + Duration::from_millis(u64::from(ms)));
    }

    let published = published.lock().unwrap();
    assert_eq!(published.len(), k as usize);
    let ticks: Vec<u64> = published.iter().map(|p| p.tick).collect();
    assert_eq!(ticks, (1..=u64::from(k)).collect::<Vec<_>>());
    for snap in published.iter() {
        assert_in_bounds(snap);
    }
    assert!(Arc::ptr_eq(published.last().unwrap(), &s.current()));

    s.stop();
    for i in 1..=5 {
        assert_eq!(s.poll(t0 + interval * (k + i)), None);
    }
}

#[test]
fn scheduler_is_deterministic_for_a_seed() {
    let run = || {
        let t0 = Instant::now();
        let interval = Duration::from_secs(1);
        let mut s = RefreshScheduler::start_at(
            SchedulerConfig::from_interval(interval).unwrap(),
            TelemetryGenerator::seeded(11),
            t0,
        );
        let mut out = vec![s.current()];
        for i in 1..=4 {
            s.poll(t0 + interval * i);
            out.push(s.current());
        }
        out.into_iter().map(|a| (*a).clone()).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn snapshot_json_shape() {
    let s = TelemetryGenerator::new(ConstantSource(0.5)).generate();
    let json = serde_json::to_value(&s).unwrap();

    assert_eq!(json["overview"]["activeCalls"], 125);
    assert_eq!(json["overview"]["packetsProcessed"], 5_500_000);
    assert_eq!(json["networkStats"]["bandwidthPct"], 85);
    assert_eq!(json["networkStats"]["jitterMs"], 3.5);
    assert_eq!(json["recentCalls"][0]["duration"], "02:34");
    assert_eq!(json["recentCalls"][1]["status"], "completed");
    assert_eq!(json["alerts"][0]["type"], "critical");

    let back: Snapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, s);
}

#[test]
fn topology_is_independent_of_refresh() {
    let before = Topology::demo();
    let t0 = Instant::now();
    let mut s = RefreshScheduler::start_at(
        SchedulerConfig::default(),
        TelemetryGenerator::seeded(3),
        t0,
    );
    s.poll(t0 + Duration::from_secs(5));
    assert_eq!(Topology::demo(), before);
    assert_eq!(before.links().len(), 10);
}
