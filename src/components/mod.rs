//! UI components.

pub mod cluster_graph;
