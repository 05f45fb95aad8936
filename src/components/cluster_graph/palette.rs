//! Cluster color assignment.

use super::random::SeededRng;

/// Edge color shared by both edge programs.
pub const EDGE_COLOR: &str = "#e6e6e6";

/// Draw one random `#rrggbb` color per cluster from the shared stream.
pub fn cluster_colors(clusters: u32, rng: &mut SeededRng) -> Vec<String> {
	(0..clusters.max(1))
		.map(|_| format!("#{:06x}", (rng.next_f64() * 16_777_215.0) as u32))
		.collect()
}
