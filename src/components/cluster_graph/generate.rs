//! Random clustered graph generation.
//!
//! Classic clusters model: every node is assigned to a uniform random
//! cluster, then links are drawn one at a time. Half of the links (in
//! expectation) connect two members of one random cluster, the rest connect
//! two uniform random nodes, so clusters end up visibly denser than the
//! background.

use super::random::SeededRng;
use super::types::{GraphData, GraphLink, GraphNode};

/// Probability that a link is drawn inside a single cluster.
const CLUSTER_DENSITY: f64 = 0.5;

/// Generate a clustered random graph with `order` nodes, `size` links and
/// `clusters` clusters.
///
/// `clusters` is clamped to at least 1. Graphs of fewer than two nodes get
/// no links at all since every link would be a self-loop.
pub fn clustered_graph(order: u32, size: u32, clusters: u32, rng: &mut SeededRng) -> GraphData {
	let clusters = clusters.max(1);
	let mut nodes = Vec::with_capacity(order as usize);
	let mut members: Vec<Vec<u32>> = vec![Vec::new(); clusters as usize];

	for id in 0..order {
		let cluster = rng.next_below(clusters);
		members[cluster as usize].push(id);
		nodes.push(GraphNode { id, cluster, x: 0.0, y: 0.0 });
	}

	let mut links = Vec::with_capacity(size as usize);
	if order > 1 {
		for _ in 0..size {
			let link = if rng.next_f64() < CLUSTER_DENSITY {
				cluster_link(&members, rng)
			} else {
				None
			};
			links.push(link.unwrap_or_else(|| random_link(order, rng)));
		}
	}

	GraphData { nodes, links, cluster_colors: Vec::new() }
}

/// Link between two distinct members of one random cluster, or `None` when
/// the picked cluster is too small to host one.
fn cluster_link(members: &[Vec<u32>], rng: &mut SeededRng) -> Option<GraphLink> {
	let cluster = &members[rng.next_below(members.len() as u32) as usize];
	if cluster.len() < 2 {
		return None;
	}
	let a = rng.next_below(cluster.len() as u32) as usize;
	let mut b = rng.next_below(cluster.len() as u32) as usize;
	if b == a {
		b = (b + 1) % cluster.len();
	}
	Some(GraphLink { source: cluster[a], target: cluster[b] })
}

/// Link between two distinct uniform random nodes.
fn random_link(order: u32, rng: &mut SeededRng) -> GraphLink {
	let source = rng.next_below(order);
	let mut target = rng.next_below(order);
	if target == source {
		target = (target + 1) % order;
	}
	GraphLink { source, target }
}
