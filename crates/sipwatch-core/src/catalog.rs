//! Fixed illustrative content: the alert feed, the overview's alert
//! summary, recent calls, the call analytics panel and the protocol mix.
//!
//! The overview summary is its own short list, worded differently from the
//! feed on the alerts tab; the two are not derived from one another.
//!
//! None of this is rerolled on refresh. Only the overview and network
//! counters come from the random source; see [`crate::generator`].

use serde::{Deserialize, Serialize};

use crate::display::{CallDuration, Tenths};
use crate::model::{Alert, AlertKind, CallSession, CallStatus, ThreatClass};

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

fn alert(
    id: u32,
    kind: AlertKind,
    title: &str,
    message: &str,
    timestamp: &str,
    source: &str,
    severity: u8,
) -> Alert {
    Alert {
        id,
        kind,
        title: title.to_string(),
        message: message.to_string(),
        timestamp: timestamp.to_string(),
        source: source.to_string(),
        severity,
    }
}

/// The security alert feed, most recent first.
pub fn alert_feed() -> Vec<Alert> {
    vec![
        alert(
            1,
            AlertKind::Critical,
            "Threat Detected",
            "Suspicious call pattern detected from 192.168.1.100 - potential fraud attempt",
            "2 min ago",
            "ML Detector",
            9,
        ),
        alert(
            2,
            AlertKind::Warning,
            "High Call Frequency",
            "Unusual call frequency detected from endpoint 172.16.0.25",
            "5 min ago",
            "Pattern Analysis",
            6,
        ),
        alert(
            3,
            AlertKind::Critical,
            "Protocol Anomaly",
            "Malformed SIP headers detected from 10.0.0.45",
            "7 min ago",
            "Protocol Monitor",
            8,
        ),
        alert(
            4,
            AlertKind::Info,
            "New Registration",
            "SIP endpoint registered from 192.168.50.100",
            "8 min ago",
            "Registration Server",
            2,
        ),
        alert(
            5,
            AlertKind::Warning,
            "Quality Alert",
            "Packet loss threshold exceeded on call session 0xA4F2",
            "12 min ago",
            "Quality Monitor",
            5,
        ),
    ]
}

/// The short alert summary on the overview tab.
pub fn overview_alerts() -> Vec<Alert> {
    vec![
        alert(
            1,
            AlertKind::Critical,
            "Suspicious Call Pattern",
            "High-frequency short calls detected from 192.168.1.100",
            "2 min ago",
            "SIP Monitor",
            8,
        ),
        alert(
            2,
            AlertKind::Warning,
            "Connection Quality Alert",
            "Increased latency detected on subnet 10.0.1.0/24",
            "5 min ago",
            "Network Monitor",
            5,
        ),
        alert(
            3,
            AlertKind::Info,
            "New Endpoint Registered",
            "SIP endpoint registered from 172.16.0.45",
            "8 min ago",
            "Registration Server",
            2,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

fn call(
    id: u32,
    from: &str,
    to: &str,
    status: CallStatus,
    duration: CallDuration,
    threat: ThreatClass,
) -> CallSession {
    CallSession {
        id,
        from: from.to_string(),
        to: to.to_string(),
        status,
        duration,
        threat,
    }
}

/// Recent call sessions, most recent first.
pub fn recent_calls() -> Vec<CallSession> {
    vec![
        call(
            1,
            "+1-555-0123",
            "+1-555-0456",
            CallStatus::Active,
            CallDuration::from_mm_ss(2, 34),
            ThreatClass::Low,
        ),
        call(
            2,
            "+1-555-0789",
            "+1-555-0012",
            CallStatus::Completed,
            CallDuration::from_mm_ss(0, 45),
            ThreatClass::Medium,
        ),
        call(
            3,
            "+1-555-0345",
            "+1-555-0678",
            CallStatus::Active,
            CallDuration::from_mm_ss(1, 12),
            ThreatClass::Low,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Call analytics
// ---------------------------------------------------------------------------

/// Calls handled during one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHour {
    pub hour: u8,
    pub calls: u32,
}

/// A named 0–100 quality score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetric {
    pub name: String,
    pub value: u32,
}

/// Share of traffic carried by one protocol, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolShare {
    pub name: String,
    pub percent: u32,
}

/// Aggregate call statistics for the analytics tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMetrics {
    pub total_calls: u32,
    pub active_calls: u32,
    pub average_duration: CallDuration,
    pub call_quality: u32,
    pub success_rate: Tenths,
    pub peak_hours: Vec<PeakHour>,
}

/// Everything the analytics tab shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAnalytics {
    pub metrics: CallMetrics,
    pub quality: Vec<QualityMetric>,
}

impl CallAnalytics {
    /// Busiest hour in `peak_hours`, if any.
    pub fn busiest_hour(&self) -> Option<PeakHour> {
        self.metrics.peak_hours.iter().copied().max_by_key(|h| h.calls)
    }
}

fn quality(name: &str, value: u32) -> QualityMetric {
    QualityMetric {
        name: name.to_string(),
        value,
    }
}

fn protocol(name: &str, percent: u32) -> ProtocolShare {
    ProtocolShare {
        name: name.to_string(),
        percent,
    }
}

pub fn call_analytics() -> CallAnalytics {
    CallAnalytics {
        metrics: CallMetrics {
            total_calls: 1247,
            active_calls: 38,
            average_duration: CallDuration::from_mm_ss(2, 34),
            call_quality: 92,
            success_rate: Tenths(985),
            peak_hours: vec![
                PeakHour { hour: 9, calls: 45 },
                PeakHour { hour: 14, calls: 67 },
                PeakHour { hour: 16, calls: 82 },
                PeakHour { hour: 20, calls: 34 },
            ],
        },
        quality: vec![
            quality("Audio Quality", 94),
            quality("Connection Stability", 89),
            quality("Latency Score", 76),
            quality("Packet Loss", 91),
        ],
    }
}

// ---------------------------------------------------------------------------
// Protocols
// ---------------------------------------------------------------------------

/// Traffic share per signalling/media protocol, shown on the network tab.
pub fn protocol_distribution() -> Vec<ProtocolShare> {
    vec![
        protocol("SIP/UDP", 65),
        protocol("SIP/TLS", 25),
        protocol("RTP/SRTP", 10),
    ]
}

// ---------------------------------------------------------------------------
// Threat score
// ---------------------------------------------------------------------------

/// Risk label for the overview threat score card.
pub fn threat_score_class(score: u32) -> ThreatClass {
    match score {
        0..20 => ThreatClass::Low,
        20..35 => ThreatClass::Medium,
        _ => ThreatClass::High,
    }
}
