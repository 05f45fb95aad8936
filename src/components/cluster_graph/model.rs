//! Graph store: the `force_graph` simulation plus per-node display
//! attributes, and the only place node state is mutated.
//!
//! Built once from a [`GraphData`], it owns label, color, size, and the
//! highlight flag for every node. The drag controller moves and highlights
//! nodes through it, the renderer reads it back through the visit methods.

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, Node, NodeData, SimulationParameters};

use super::camera::BBox;
use super::types::GraphData;

/// Color used when a node's cluster has no palette entry.
const FALLBACK_COLOR: &str = "#999999";

/// Node mass handed to the simulation.
const NODE_MASS: f32 = 10.0;

/// Display attributes attached to each simulation node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Human-readable label, shown on hover and while dragged.
	pub label: String,
	/// CSS fill color inherited from the node's cluster.
	pub color: String,
	/// Display radius in graph units, one third of the node's degree.
	pub size: f64,
	/// Cluster the node belongs to.
	#[allow(dead_code, reason = "raw cluster id backing the derived label and color")]
	pub cluster: u32,
	/// Set while the node is held by a drag gesture.
	pub highlighted: bool,
}

/// The graph being displayed.
pub struct GraphModel {
	graph: ForceGraph<NodeInfo, ()>,
	/// Simulation handle for each node id, in id order.
	node_idx: Vec<DefaultNodeIdx>,
	link_count: usize,
}

impl GraphModel {
	/// Build the simulation from generated data. Expects layout coordinates
	/// and cluster colors to be filled in already.
	pub fn new(data: &GraphData) -> Self {
		let mut graph = ForceGraph::new(simulation_parameters(data.order()));
		let mut node_idx = Vec::with_capacity(data.order());

		let mut degrees = vec![0u32; data.order()];
		for link in &data.links {
			if let Some(d) = degrees.get_mut(link.source as usize) {
				*d += 1;
			}
			if let Some(d) = degrees.get_mut(link.target as usize) {
				*d += 1;
			}
		}

		for (i, node) in data.nodes.iter().enumerate() {
			let color = data
				.cluster_colors
				.get(node.cluster as usize)
				.cloned()
				.unwrap_or_else(|| FALLBACK_COLOR.to_string());
			let idx = graph.add_node(NodeData {
				x: node.x as f32,
				y: node.y as f32,
				mass: NODE_MASS,
				is_anchor: false,
				user_data: NodeInfo {
					label: format!("Node n°{}, in cluster n°{}", i + 1, node.cluster),
					color,
					size: f64::from(degrees[i]) / 3.0,
					cluster: node.cluster,
					highlighted: false,
				},
			});
			node_idx.push(idx);
		}

		let mut link_count = 0;
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				node_idx.get(link.source as usize),
				node_idx.get(link.target as usize),
			) {
				graph.add_edge(src, tgt, EdgeData::default());
				link_count += 1;
			}
		}

		Self { graph, node_idx, link_count }
	}

	/// Move a node to an absolute graph-space position.
	pub fn set_node_position(&mut self, idx: DefaultNodeIdx, gx: f64, gy: f64) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = gx as f32;
				node.data.y = gy as f32;
			}
		});
	}

	/// Flag a node as held and pin it so the simulation leaves it alone.
	pub fn set_highlighted(&mut self, idx: DefaultNodeIdx) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.user_data.highlighted = true;
				node.data.is_anchor = true;
			}
		});
	}

	/// Drop the held flag. The node stays pinned where it was released.
	pub fn clear_highlighted(&mut self, idx: DefaultNodeIdx) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.user_data.highlighted = false;
			}
		});
	}

	/// Topmost node whose disc covers the graph-space point, if any.
	///
	/// `min_radius` keeps low-degree nodes grabbable; hit discs never
	/// shrink below it.
	pub fn node_at_position(&self, gx: f64, gy: f64, min_radius: f64) -> Option<DefaultNodeIdx> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let radius = node.data.user_data.size.max(min_radius);
			if dx * dx + dy * dy < radius * radius {
				// Later nodes draw on top, so the last hit wins.
				found = Some(node.index());
			}
		});
		found
	}

	/// Tightest box around all node positions, `None` for an empty graph.
	pub fn bbox(&self) -> Option<BBox> {
		let mut bbox: Option<BBox> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			match &mut bbox {
				Some(b) => {
					b.min_x = b.min_x.min(x);
					b.min_y = b.min_y.min(y);
					b.max_x = b.max_x.max(x);
					b.max_y = b.max_y.max(y);
				}
				None => bbox = Some(BBox { min_x: x, min_y: y, max_x: x, max_y: y }),
			}
		});
		bbox
	}

	/// Advance the simulation by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	/// Visit every node read-only, in insertion order.
	pub fn visit_nodes<F: FnMut(&Node<NodeInfo>)>(&self, visitor: F) {
		self.graph.visit_nodes(visitor);
	}

	/// Visit every link with both endpoint nodes.
	pub fn visit_edges<F: FnMut(&Node<NodeInfo>, &Node<NodeInfo>)>(&self, mut visitor: F) {
		self.graph.visit_edges(|a, b, _| visitor(a, b));
	}
}

#[allow(dead_code, reason = "state inspection beyond what the render loop needs")]
impl GraphModel {
	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.node_idx.len()
	}

	/// Number of links.
	pub fn link_count(&self) -> usize {
		self.link_count
	}

	/// Simulation handle for a generated node id.
	pub fn index_of(&self, id: u32) -> Option<DefaultNodeIdx> {
		self.node_idx.get(id as usize).copied()
	}

	/// Current position of a node.
	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut position = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				position = Some((node.x() as f64, node.y() as f64));
			}
		});
		position
	}

	/// Whether a node is currently held.
	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		let mut highlighted = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				highlighted = node.data.user_data.highlighted;
			}
		});
		highlighted
	}
}

/// Simulation constants, softened for large graphs so the layout settles
/// instead of oscillating.
fn simulation_parameters(order: usize) -> SimulationParameters {
	let softish = (order as f32 / 100.0).max(1.0).sqrt();
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05 / softish,
		force_max: 100.0,
		node_speed: 3000.0 / softish,
		damping_factor: 0.9,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::cluster_graph::generate::clustered_graph;
	use crate::components::cluster_graph::layout;
	use crate::components::cluster_graph::palette::cluster_colors;
	use crate::components::cluster_graph::random::SeededRng;

	fn demo_data(order: u32, size: u32, clusters: u32) -> GraphData {
		let mut rng = SeededRng::from_seed("sigma");
		let mut data = clustered_graph(order, size, clusters, &mut rng);
		data.cluster_colors = cluster_colors(clusters, &mut rng);
		layout::assign(&mut data);
		data
	}

	#[test]
	fn builds_every_node_and_link() {
		let model = GraphModel::new(&demo_data(40, 80, 3));
		assert_eq!(model.node_count(), 40);
		assert_eq!(model.link_count(), 80);
	}

	#[test]
	fn labels_are_one_based_with_raw_cluster() {
		let data = demo_data(5, 0, 3);
		let model = GraphModel::new(&data);
		let mut labels = Vec::new();
		model.visit_nodes(|node| labels.push(node.data.user_data.label.clone()));
		assert_eq!(labels[0], format!("Node n°1, in cluster n°{}", data.nodes[0].cluster));
		assert_eq!(labels[4], format!("Node n°5, in cluster n°{}", data.nodes[4].cluster));
	}

	#[test]
	fn nodes_take_their_cluster_color() {
		let data = demo_data(30, 0, 3);
		let model = GraphModel::new(&data);
		model.visit_nodes(|node| {
			let info = &node.data.user_data;
			assert_eq!(info.color, data.cluster_colors[info.cluster as usize]);
		});
	}

	#[test]
	fn size_is_a_third_of_the_degree() {
		use crate::components::cluster_graph::types::GraphLink;
		let mut data = demo_data(3, 0, 1);
		data.links.push(GraphLink { source: 0, target: 1 });
		data.links.push(GraphLink { source: 0, target: 2 });
		data.links.push(GraphLink { source: 0, target: 1 });
		let model = GraphModel::new(&data);
		let mut sizes = Vec::new();
		model.visit_nodes(|node| sizes.push(node.data.user_data.size));
		assert!((sizes[0] - 1.0).abs() < 1e-12);
		assert!((sizes[1] - 2.0 / 3.0).abs() < 1e-12);
		assert!((sizes[2] - 1.0 / 3.0).abs() < 1e-12);
	}

	#[test]
	fn positions_come_from_the_layout() {
		let data = demo_data(20, 0, 2);
		let model = GraphModel::new(&data);
		let idx = model.index_of(7).unwrap();
		let (x, y) = model.node_position(idx).unwrap();
		assert!((x - data.nodes[7].x).abs() < 1e-3);
		assert!((y - data.nodes[7].y).abs() < 1e-3);
	}

	#[test]
	fn set_position_round_trips() {
		let mut model = GraphModel::new(&demo_data(10, 0, 2));
		let idx = model.index_of(3).unwrap();
		model.set_node_position(idx, 123.5, -44.25);
		let (x, y) = model.node_position(idx).unwrap();
		assert!((x - 123.5).abs() < 1e-3);
		assert!((y + 44.25).abs() < 1e-3);
	}

	#[test]
	fn highlight_flag_toggles() {
		let mut model = GraphModel::new(&demo_data(10, 0, 2));
		let idx = model.index_of(0).unwrap();
		assert!(!model.is_highlighted(idx));
		model.set_highlighted(idx);
		assert!(model.is_highlighted(idx));
		model.clear_highlighted(idx);
		assert!(!model.is_highlighted(idx));
	}

	#[test]
	fn held_node_survives_simulation_ticks() {
		let mut model = GraphModel::new(&demo_data(10, 30, 2));
		let idx = model.index_of(5).unwrap();
		model.set_highlighted(idx);
		model.set_node_position(idx, 42.0, 17.0);
		for _ in 0..30 {
			model.tick(0.016);
		}
		let (x, y) = model.node_position(idx).unwrap();
		assert!((x - 42.0).abs() < 1e-3 && (y - 17.0).abs() < 1e-3);
	}

	#[test]
	fn hit_test_finds_the_node_under_the_point() {
		let mut model = GraphModel::new(&demo_data(10, 20, 2));
		let idx = model.index_of(4).unwrap();
		model.set_node_position(idx, 1000.0, 1000.0);
		assert_eq!(model.node_at_position(1000.0, 1000.0, 2.0), Some(idx));
		assert_eq!(model.node_at_position(1000.0, 1000.0 + 1.5, 2.0), Some(idx));
		assert_eq!(model.node_at_position(2000.0, 2000.0, 2.0), None);
	}

	#[test]
	fn bbox_covers_all_nodes() {
		let data = demo_data(25, 0, 3);
		let model = GraphModel::new(&data);
		let bbox = model.bbox().unwrap();
		for node in &data.nodes {
			assert!(node.x >= bbox.min_x - 1e-3 && node.x <= bbox.max_x + 1e-3);
			assert!(node.y >= bbox.min_y - 1e-3 && node.y <= bbox.max_y + 1e-3);
		}
	}

	#[test]
	fn empty_model_has_no_bbox() {
		let model = GraphModel::new(&GraphData::default());
		assert!(model.bbox().is_none());
		assert_eq!(model.node_count(), 0);
		assert!(model.index_of(0).is_none());
	}

	#[test]
	fn missing_palette_falls_back() {
		let mut rng = SeededRng::from_seed("sigma");
		let data = clustered_graph(5, 0, 2, &mut rng);
		let model = GraphModel::new(&data);
		model.visit_nodes(|node| assert_eq!(node.data.user_data.color, FALLBACK_COLOR));
	}
}
