//! cluster-graph-canvas: interactive clustered-graph demo.
//!
//! Generates a seeded random clustered graph, packs it by cluster, and
//! renders it on an HTML canvas with draggable nodes, pan/zoom, and a force
//! layout that can be toggled at runtime. Generation parameters come from
//! the query string and are edited through a small settings form.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info};

pub mod components;
mod config;

use components::cluster_graph::{generate, layout, palette, random::SeededRng};

pub use components::cluster_graph::{
	ClusterGraphCanvas, EdgesRenderer, GraphData, GraphLink, GraphNode,
};
pub use config::DemoConfig;

/// Seed shared by the generator and the palette, so reloading the page with
/// the same parameters reproduces the same picture.
const GRAPH_SEED: &str = "sigma";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("cluster-graph-canvas: logging initialized");
}

/// Build the demo graph for `config`: generate the clustered topology, pack
/// it into per-cluster discs, and draw the cluster palette.
pub fn build_graph(config: &DemoConfig) -> GraphData {
	let mut rng = SeededRng::from_seed(GRAPH_SEED);
	let mut data =
		generate::clustered_graph(config.order, config.size, config.clusters, &mut rng);
	layout::assign(&mut data);
	data.cluster_colors = palette::cluster_colors(config.clusters, &mut rng);

	info!(
		"cluster-graph-canvas: generated {} nodes, {} links in {} clusters",
		data.order(),
		data.size(),
		config.clusters
	);
	debug!(
		"cluster-graph-canvas: graph data: {}",
		serde_json::to_string(&data).unwrap_or_default()
	);
	data
}

/// Main application component.
/// Reads the configuration from the URL, builds the graph, and renders the
/// canvas with its settings overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = DemoConfig::from_location();
	let data = build_graph(&config);
	let graph_signal = Signal::derive(move || data.clone());
	let edges_signal = Signal::derive(move || config.edges_renderer);
	let (layout_running, set_layout_running) = signal(false);
	let default_edges = config.edges_renderer == EdgesRenderer::Default;
	let fast_edges = config.edges_renderer == EdgesRenderer::Fast;

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Clustered Graph Playground" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ClusterGraphCanvas
				data=graph_signal
				edges_renderer=edges_signal
				layout_running=layout_running
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Clustered Graph Playground"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
				</p>
				<form class="graph-controls" method="get">
					<label>
						"nodes"
						<input type="number" name="order" min="1" value=config.order.to_string() />
					</label>
					<label>
						"edges"
						<input type="number" name="size" min="0" value=config.size.to_string() />
					</label>
					<label>
						"clusters"
						<input
							type="number"
							name="clusters"
							min="1"
							value=config.clusters.to_string()
						/>
					</label>
					<label>
						<input
							type="radio"
							name="edges-renderer"
							value=EdgesRenderer::Default.form_value()
							checked=default_edges
						/>
						"default edges"
					</label>
					<label>
						<input
							type="radio"
							name="edges-renderer"
							value=EdgesRenderer::Fast.form_value()
							checked=fast_edges
						/>
						"fast edges"
					</label>
					<button type="submit">"Generate"</button>
				</form>
				<button
					class="layout-toggle"
					on:click=move |_| set_layout_running.update(|running| *running = !*running)
				>
					{move || if layout_running.get() { "Stop layout ⏸" } else { "Start layout ▶" }}
				</button>
			</div>
		</div>
	}
}
