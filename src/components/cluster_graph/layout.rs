//! Circle-pack initial layout.
//!
//! Packs each cluster into its own disc (nodes on a phyllotaxis spiral) and
//! arranges the discs on a ring around the origin wide enough that no two
//! discs can overlap. The result gives the force layout a bounded starting
//! point and makes clusters readable before any simulation runs.

use std::f64::consts::PI;

use super::types::GraphData;

/// Golden angle, the usual phyllotaxis step.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Graph-space distance between neighboring nodes inside a disc.
const NODE_SPACING: f64 = 6.0;

/// Assign an `(x, y)` position to every node of `data` in place.
pub fn assign(data: &mut GraphData) {
	let clusters = data
		.nodes
		.iter()
		.map(|n| n.cluster as usize + 1)
		.max()
		.unwrap_or(1);

	let mut members: Vec<Vec<usize>> = vec![Vec::new(); clusters];
	for (i, node) in data.nodes.iter().enumerate() {
		members[node.cluster as usize].push(i);
	}

	// A disc of n spiral nodes has radius about NODE_SPACING * sqrt(n).
	let max_radius = members
		.iter()
		.map(|m| NODE_SPACING * (m.len() as f64).sqrt())
		.fold(NODE_SPACING, f64::max);
	let ring_radius = if clusters > 1 {
		max_radius / (PI / clusters as f64).sin()
	} else {
		0.0
	};

	for (c, member_ids) in members.iter().enumerate() {
		let angle = c as f64 / clusters as f64 * 2.0 * PI;
		let center_x = ring_radius * angle.cos();
		let center_y = ring_radius * angle.sin();
		for (j, &i) in member_ids.iter().enumerate() {
			let r = NODE_SPACING * (j as f64 + 0.5).sqrt();
			let a = j as f64 * GOLDEN_ANGLE;
			data.nodes[i].x = center_x + r * a.cos();
			data.nodes[i].y = center_y + r * a.sin();
		}
	}
}
