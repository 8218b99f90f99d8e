//! Categorical display mappings.
//!
//! Renderers style snapshot and topology values through these. Every
//! mapping is an exhaustive `match` over a closed enum; the `*_for_label`
//! entry points accept free-form labels and fall back to a neutral tag for
//! anything unrecognized.

use crate::model::{AlertKind, CallStatus, NetworkNode, NodeKind, NodeStatus, ThreatClass};

/// Badge style, in the vocabulary of the dashboard's component kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl BadgeVariant {
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Secondary => "secondary",
            Self::Destructive => "destructive",
            Self::Outline => "outline",
        }
    }
}

/// Semantic color tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Green: normal operation.
    Success,
    /// Amber: worth a look.
    Warning,
    /// Red: active threat.
    Destructive,
    /// Gray: unreachable / inactive.
    Muted,
    /// Accent color for neutral highlights.
    Primary,
}

/// Icon glyph names used by the alert panel and topology map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    AlertTriangle,
    Shield,
    Target,
    Server,
    Wifi,
    Globe,
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

pub fn threat_badge(threat: ThreatClass) -> BadgeVariant {
    match threat {
        ThreatClass::Low => BadgeVariant::Default,
        ThreatClass::Medium => BadgeVariant::Secondary,
        ThreatClass::High => BadgeVariant::Destructive,
    }
}

/// Threat badge for a free-form label. Alert severities are accepted too:
/// `critical` reads as destructive and `warning` as secondary.
pub fn threat_badge_for_label(label: &str) -> BadgeVariant {
    if let Ok(threat) = label.parse::<ThreatClass>() {
        return threat_badge(threat);
    }
    match label.parse::<AlertKind>() {
        Ok(AlertKind::Critical) => BadgeVariant::Destructive,
        Ok(AlertKind::Warning) => BadgeVariant::Secondary,
        Ok(AlertKind::Info) | Err(_) => BadgeVariant::Default,
    }
}

pub fn status_badge(status: CallStatus) -> BadgeVariant {
    match status {
        CallStatus::Active => BadgeVariant::Default,
        CallStatus::Completed => BadgeVariant::Secondary,
        CallStatus::Failed => BadgeVariant::Destructive,
    }
}

pub fn status_badge_for_label(label: &str) -> BadgeVariant {
    label
        .parse()
        .map(status_badge)
        .unwrap_or(BadgeVariant::Secondary)
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

pub fn alert_badge(kind: AlertKind) -> BadgeVariant {
    match kind {
        AlertKind::Critical => BadgeVariant::Destructive,
        AlertKind::Warning => BadgeVariant::Secondary,
        AlertKind::Info => BadgeVariant::Outline,
    }
}

pub fn alert_badge_for_label(label: &str) -> BadgeVariant {
    label
        .parse()
        .map(alert_badge)
        .unwrap_or(BadgeVariant::Outline)
}

pub fn alert_icon(kind: AlertKind) -> Icon {
    match kind {
        AlertKind::Critical => Icon::AlertTriangle,
        AlertKind::Warning => Icon::Shield,
        AlertKind::Info => Icon::Target,
    }
}

pub fn alert_tone(kind: AlertKind) -> Tone {
    match kind {
        AlertKind::Critical => Tone::Destructive,
        AlertKind::Warning => Tone::Warning,
        AlertKind::Info => Tone::Primary,
    }
}

pub fn alert_icon_for_label(label: &str) -> Icon {
    label.parse().map(alert_icon).unwrap_or(Icon::Target)
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

pub fn node_icon(kind: NodeKind) -> Icon {
    match kind {
        NodeKind::Server => Icon::Server,
        NodeKind::Gateway => Icon::Wifi,
        NodeKind::Endpoint => Icon::Globe,
    }
}

pub fn node_icon_for_label(label: &str) -> Icon {
    label.parse().map(node_icon).unwrap_or(Icon::Globe)
}

/// Map color of a node. Suspicious status wins over a high threat level,
/// which wins over being offline.
pub fn node_color(node: &NetworkNode) -> Tone {
    match (node.status, node.threat_level) {
        (NodeStatus::Suspicious, _) => Tone::Destructive,
        (_, ThreatClass::High) => Tone::Warning,
        (NodeStatus::Offline, _) => Tone::Muted,
        (NodeStatus::Online, ThreatClass::Low | ThreatClass::Medium) => Tone::Success,
    }
}

pub fn node_status_badge(status: NodeStatus) -> BadgeVariant {
    match status {
        NodeStatus::Suspicious => BadgeVariant::Destructive,
        NodeStatus::Online | NodeStatus::Offline => BadgeVariant::Outline,
    }
}

pub fn node_threat_badge(threat: ThreatClass) -> BadgeVariant {
    match threat {
        ThreatClass::High => BadgeVariant::Destructive,
        ThreatClass::Low | ThreatClass::Medium => BadgeVariant::Secondary,
    }
}

/// Legend entries for the map, in display order.
pub const MAP_LEGEND: [(Tone, &str); 4] = [
    (Tone::Success, "Normal"),
    (Tone::Warning, "Warning"),
    (Tone::Destructive, "Threat"),
    (Tone::Muted, "Offline"),
];

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Bucket for a 0–100 quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTier {
    Excellent,
    Good,
    Poor,
}

impl QualityTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Excellent => Tone::Success,
            Self::Good => Tone::Warning,
            Self::Poor => Tone::Destructive,
        }
    }
}

pub fn quality_tier(value: u32) -> QualityTier {
    match value {
        90.. => QualityTier::Excellent,
        70..90 => QualityTier::Good,
        _ => QualityTier::Poor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;
    use crate::topology::Topology;

    fn node(status: NodeStatus, threat_level: ThreatClass) -> NetworkNode {
        NetworkNode {
            id: "x".into(),
            ip: "10.0.0.1".into(),
            kind: NodeKind::Endpoint,
            status,
            location: Position { x: 0, y: 0 },
            threat_level,
        }
    }

    #[test]
    fn threat_badges() {
        assert_eq!(threat_badge(ThreatClass::Low), BadgeVariant::Default);
        assert_eq!(threat_badge(ThreatClass::Medium), BadgeVariant::Secondary);
        assert_eq!(threat_badge(ThreatClass::High), BadgeVariant::Destructive);
    }

    #[test]
    fn status_badges() {
        assert_eq!(status_badge(CallStatus::Active), BadgeVariant::Default);
        assert_eq!(status_badge(CallStatus::Completed), BadgeVariant::Secondary);
        assert_eq!(status_badge(CallStatus::Failed), BadgeVariant::Destructive);
    }

    #[test]
    fn alert_badges_and_icons() {
        assert_eq!(alert_badge(AlertKind::Critical), BadgeVariant::Destructive);
        assert_eq!(alert_badge(AlertKind::Warning), BadgeVariant::Secondary);
        assert_eq!(alert_badge(AlertKind::Info), BadgeVariant::Outline);
        assert_eq!(alert_icon(AlertKind::Critical), Icon::AlertTriangle);
        assert_eq!(alert_icon(AlertKind::Warning), Icon::Shield);
        assert_eq!(alert_icon(AlertKind::Info), Icon::Target);
    }

    #[test]
    fn label_entry_points_agree_with_enums() {
        for t in ThreatClass::ALL {
            assert_eq!(threat_badge_for_label(t.label()), threat_badge(t));
        }
        for s in CallStatus::ALL {
            assert_eq!(status_badge_for_label(s.label()), status_badge(s));
        }
        for k in AlertKind::ALL {
            assert_eq!(alert_badge_for_label(k.label()), alert_badge(k));
            assert_eq!(alert_icon_for_label(k.label()), alert_icon(k));
        }
        for k in NodeKind::ALL {
            assert_eq!(node_icon_for_label(k.label()), node_icon(k));
        }
    }

    #[test]
    fn unknown_labels_fall_back() {
        assert_eq!(threat_badge_for_label("severe"), BadgeVariant::Default);
        assert_eq!(threat_badge_for_label("info"), BadgeVariant::Default);
        assert_eq!(status_badge_for_label("ringing"), BadgeVariant::Secondary);
        assert_eq!(alert_badge_for_label(""), BadgeVariant::Outline);
        assert_eq!(alert_icon_for_label("debug"), Icon::Target);
        assert_eq!(node_icon_for_label("router"), Icon::Globe);
    }

    #[test]
    fn threat_badge_accepts_alert_severities() {
        assert_eq!(threat_badge_for_label("critical"), BadgeVariant::Destructive);
        assert_eq!(threat_badge_for_label("warning"), BadgeVariant::Secondary);
        assert_eq!(threat_badge_for_label("Critical "), BadgeVariant::Destructive);
        assert_eq!(threat_badge_for_label("high"), BadgeVariant::Destructive);
        assert_eq!(threat_badge_for_label("medium"), BadgeVariant::Secondary);
    }

    #[test]
    fn node_color_precedence() {
        let cases = [
            (NodeStatus::Suspicious, ThreatClass::Low, Tone::Destructive),
            (NodeStatus::Suspicious, ThreatClass::High, Tone::Destructive),
            (NodeStatus::Online, ThreatClass::High, Tone::Warning),
            (NodeStatus::Offline, ThreatClass::High, Tone::Warning),
            (NodeStatus::Offline, ThreatClass::Medium, Tone::Muted),
            (NodeStatus::Online, ThreatClass::Medium, Tone::Success),
        ];
        for (status, threat, tone) in cases {
            assert_eq!(node_color(&node(status, threat)), tone, "{status:?}/{threat:?}");
        }
    }

    #[test]
    fn node_color_covers_every_combination() {
        for status in NodeStatus::ALL {
            for threat in ThreatClass::ALL {
                let tone = node_color(&node(status, threat));
                assert!(MAP_LEGEND.iter().any(|(t, _)| *t == tone));
            }
        }
    }

    #[test]
    fn demo_topology_colors() {
        let tones: Vec<Tone> = Topology::demo().nodes().iter().map(node_color).collect();
        let expected = [
            Tone::Success,
            Tone::Destructive,
            Tone::Success,
            Tone::Success,
            Tone::Muted,
        ];
        assert_eq!(tones, expected);
    }

    #[test]
    fn node_detail_badges() {
        assert_eq!(node_status_badge(NodeStatus::Suspicious), BadgeVariant::Destructive);
        assert_eq!(node_status_badge(NodeStatus::Offline), BadgeVariant::Outline);
        assert_eq!(node_threat_badge(ThreatClass::High), BadgeVariant::Destructive);
        assert_eq!(node_threat_badge(ThreatClass::Low), BadgeVariant::Secondary);
    }

    #[test]
    fn quality_tiers() {
        assert_eq!(quality_tier(100), QualityTier::Excellent);
        assert_eq!(quality_tier(90), QualityTier::Excellent);
        assert_eq!(quality_tier(89), QualityTier::Good);
        assert_eq!(quality_tier(70), QualityTier::Good);
        assert_eq!(quality_tier(69), QualityTier::Poor);
        assert_eq!(quality_tier(0), QualityTier::Poor);
        assert_eq!(QualityTier::Good.label(), "Good");
    }

    #[test]
    fn badge_labels() {
        assert_eq!(BadgeVariant::Destructive.label(), "destructive");
        assert_eq!(BadgeVariant::Outline.label(), "outline");
    }
}
