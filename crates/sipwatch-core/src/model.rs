//! Dashboard data model.
//!
//! A [`Snapshot`] is the unit the scheduler publishes: one immutable,
//! fully-populated view of the monitored SIP network. [`NetworkNode`]s are
//! static topology and live outside the snapshot.
//!
//! Field and tag names serialize in the camelCase / lowercase shape the
//! dashboard's JSON consumers expect (`activeCalls`, `"critical"`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::display::{CallDuration, Tenths};
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Categorical labels
// ---------------------------------------------------------------------------

/// Severity class of a security alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Critical,
    Warning,
    Info,
}

impl AlertKind {
    pub const ALL: [Self; 3] = [Self::Critical, Self::Warning, Self::Info];

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Lifecycle state of a call session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Active,
    Completed,
    Failed,
}

impl CallStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Completed, Self::Failed];

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Risk label attached to a call or a topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatClass {
    Low,
    Medium,
    High,
}

impl ThreatClass {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Role of a topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Endpoint,
    Server,
    Gateway,
}

impl NodeKind {
    pub const ALL: [Self; 3] = [Self::Endpoint, Self::Server, Self::Gateway];

    pub fn label(self) -> &'static str {
        match self {
            Self::Endpoint => "endpoint",
            Self::Server => "server",
            Self::Gateway => "gateway",
        }
    }
}

/// Reachability / trust state of a topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Offline,
    Suspicious,
}

impl NodeStatus {
    pub const ALL: [Self; 3] = [Self::Online, Self::Offline, Self::Suspicious];

    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Suspicious => "suspicious",
        }
    }
}

fn parse_label<T: Copy>(
    all: &[T],
    label: fn(T) -> &'static str,
    kind: &'static str,
    s: &str,
) -> Result<T, ParseError> {
    let wanted = s.trim();
    all.iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ParseError::Label {
            kind,
            label: s.to_string(),
        })
}

impl FromStr for AlertKind {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "alert", s)
    }
}

impl FromStr for CallStatus {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "call status", s)
    }
}

impl FromStr for ThreatClass {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "threat", s)
    }
}

impl FromStr for NodeKind {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "node type", s)
    }
}

impl FromStr for NodeStatus {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "node status", s)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ThreatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Headline counters shown on the four overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub active_calls: u32,
    pub total_endpoints: u32,
    pub threat_score: u32,
    pub packets_processed: u64,
}

/// One entry of the security alert feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    /// Relative display time ("2 min ago"), not a parsed timestamp.
    pub timestamp: String,
    pub source: String,
    /// 0 (informational) to 10 (critical).
    pub severity: u8,
}

/// A SIP call session as listed on the live calls tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    pub id: u32,
    pub from: String,
    pub to: String,
    pub status: CallStatus,
    pub duration: CallDuration,
    pub threat: ThreatClass,
}

/// Link quality counters for the network tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub bandwidth_pct: u32,
    pub latency_ms: u32,
    pub packet_loss_pct: Tenths,
    pub jitter_ms: Tenths,
}

/// Everything the dashboard shows for one refresh, captured at once.
///
/// Consumers receive snapshots behind `Arc` and never see one change;
/// a refresh publishes a new value instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Refresh sequence number; 0 is the snapshot built at construction.
    pub tick: u64,
    pub overview: Overview,
    /// Display order, most recent first.
    pub alerts: Vec<Alert>,
    /// Display order, most recent first.
    pub recent_calls: Vec<CallSession>,
    pub network_stats: NetworkStats,
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

/// Position on the topology map, in percent of width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

/// A simulated network entity on the topology map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: String,
    pub ip: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub status: NodeStatus,
    pub location: Position,
    pub threat_level: ThreatClass,
}
