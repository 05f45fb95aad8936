//! Data produced by the graph generation pipeline.
//!
//! A [`GraphData`] starts out as bare topology from the generator and is
//! enriched in place: the layout step fills node coordinates, the palette
//! step fills the per-cluster colors. Display attributes that depend on
//! topology (degree-based sizes, labels) are derived later when the
//! simulation model is built.

use serde::Serialize;

/// A generated node: dense id plus the cluster it was assigned to.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GraphNode {
	/// Dense id in `0..order`, also the node's position in `nodes`.
	pub id: u32,
	/// Cluster index in `0..clusters`.
	pub cluster: u32,
	/// Initial x coordinate in graph space, filled by the layout step.
	pub x: f64,
	/// Initial y coordinate in graph space, filled by the layout step.
	pub y: f64,
}

/// An undirected link between two node ids.
#[derive(Clone, Debug, Serialize)]
pub struct GraphLink {
	/// Id of one endpoint.
	pub source: u32,
	/// Id of the other endpoint.
	pub target: u32,
}

/// A complete generated graph plus its cluster palette.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GraphData {
	/// Nodes in id order.
	pub nodes: Vec<GraphNode>,
	/// Links between node ids. May contain duplicates, never self-loops.
	pub links: Vec<GraphLink>,
	/// One `#rrggbb` color per cluster, filled by the palette step.
	pub cluster_colors: Vec<String>,
}

impl GraphData {
	/// Number of nodes.
	pub fn order(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links.
	pub fn size(&self) -> usize {
		self.links.len()
	}
}
