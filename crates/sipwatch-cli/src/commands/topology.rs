use sipwatch_core::Topology;

pub fn run() {
    let topology = Topology::demo();
    let nodes = topology.nodes();
    let links: Vec<serde_json::Value> = topology
        .links()
        .iter()
        .map(|link| serde_json::json!({ "from": nodes[link.a].id, "to": nodes[link.b].id }))
        .collect();
    let flagged: Vec<&str> = topology.flagged().map(|n| n.id.as_str()).collect();

    super::print_json(&serde_json::json!({
        "nodes": nodes,
        "links": links,
        "flagged": flagged,
    }));
}
