//! Interactive clustered-graph component.
//!
//! Renders a randomly generated clustered graph on an HTML canvas with:
//! - Seeded generation, circle-pack initial layout, per-cluster colors
//! - Pan, zoom, and node dragging interactions
//! - A force layout that can be started and stopped at runtime
//! - Two edge programs, per-edge strokes or one batched fast path
//!
//! # Example
//!
//! ```ignore
//! use cluster_graph_canvas::{ClusterGraphCanvas, EdgesRenderer, build_graph, DemoConfig};
//!
//! let data = build_graph(&DemoConfig::default());
//!
//! view! {
//!     <ClusterGraphCanvas
//!         data=Signal::derive(move || data.clone())
//!         edges_renderer=Signal::derive(|| EdgesRenderer::Default)
//!         layout_running=Signal::derive(|| false)
//!         fullscreen=true
//!     />
//! }
//! ```

mod camera;
mod component;
mod drag;
pub mod generate;
pub mod layout;
mod model;
pub mod palette;
pub mod random;
mod render;
mod types;

pub use component::ClusterGraphCanvas;
pub use render::EdgesRenderer;
pub use types::{GraphData, GraphLink, GraphNode};
