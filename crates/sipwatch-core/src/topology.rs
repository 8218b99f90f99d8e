//! Static network topology for the map view.
//!
//! Nodes are configuration supplied once per session; the refresh scheduler
//! never touches them.

use serde::{Deserialize, Serialize};

use crate::model::{NetworkNode, NodeKind, NodeStatus, Position, ThreatClass};

/// Undirected connection between two nodes, by index into [`Topology::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub a: usize,
    pub b: usize,
}

/// Node set plus the links drawn between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    nodes: Vec<NetworkNode>,
}

impl Topology {
    pub fn new(nodes: Vec<NetworkNode>) -> Self {
        Self { nodes }
    }

    /// The five-node demo network.
    pub fn demo() -> Self {
        Self::new(vec![
            node(
                "1",
                "192.168.1.100",
                NodeKind::Server,
                NodeStatus::Online,
                (20, 30),
                ThreatClass::Low,
            ),
            node(
                "2",
                "192.168.1.150",
                NodeKind::Endpoint,
                NodeStatus::Suspicious,
                (60, 20),
                ThreatClass::High,
            ),
            node(
                "3",
                "192.168.1.200",
                NodeKind::Gateway,
                NodeStatus::Online,
                (40, 60),
                ThreatClass::Medium,
            ),
            node(
                "4",
                "10.0.0.50",
                NodeKind::Endpoint,
                NodeStatus::Online,
                (80, 50),
                ThreatClass::Low,
            ),
            node(
                "5",
                "172.16.0.10",
                NodeKind::Server,
                NodeStatus::Offline,
                (30, 80),
                ThreatClass::Medium,
            ),
        ])
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Every unordered pair of nodes, in `(0,1), (0,2), .., (1,2), ..` order.
    pub fn links(&self) -> Vec<Link> {
        let n = self.nodes.len();
        let mut links = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in (a + 1)..n {
                links.push(Link { a, b });
            }
        }
        links
    }

    /// Nodes needing attention: suspicious, or carrying a high threat level.
    pub fn flagged(&self) -> impl Iterator<Item = &NetworkNode> {
        self.nodes
            .iter()
            .filter(|n| n.status == NodeStatus::Suspicious || n.threat_level == ThreatClass::High)
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::demo()
    }
}

fn node(
    id: &str,
    ip: &str,
    kind: NodeKind,
    status: NodeStatus,
    (x, y): (u8, u8),
    threat_level: ThreatClass,
) -> NetworkNode {
    NetworkNode {
        id: id.to_string(),
        ip: ip.to_string(),
        kind,
        status,
        location: Position { x, y },
        threat_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_has_five_nodes() {
        let t = Topology::demo();
        assert_eq!(t.len(), 5);
        assert!(!t.is_empty());
    }

    #[test]
    fn links_form_complete_graph() {
        let t = Topology::demo();
        let links = t.links();
        assert_eq!(links.len(), 5 * 4 / 2);
        assert_eq!(links[0], Link { a: 0, b: 1 });
        assert_eq!(links.last(), Some(&Link { a: 3, b: 4 }));
        assert!(links.iter().all(|l| l.a < l.b));
    }

    #[test]
    fn links_of_degenerate_topologies() {
        assert!(Topology::new(vec![]).links().is_empty());
        let one = Topology::new(Topology::demo().nodes()[..1].to_vec());
        assert!(one.links().is_empty());
    }

    #[test]
    fn positions_are_percentages() {
        for n in Topology::demo().nodes() {
            assert!(n.location.x <= 100 && n.location.y <= 100);
        }
    }

    #[test]
    fn lookup_by_id() {
        let t = Topology::demo();
        assert_eq!(t.get("4").map(|n| n.ip.as_str()), Some("10.0.0.50"));
        assert!(t.get("99").is_none());
    }

    #[test]
    fn flagged_nodes() {
        let t = Topology::demo();
        let ids: Vec<&str> = t.flagged().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }
}
