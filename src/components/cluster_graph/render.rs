//! Canvas rendering of the clustered graph.
//!
//! Flat 2D look: colored discs over light gray edges. Edges and nodes are
//! drawn under the camera transform; labels are drawn afterwards in screen
//! space so the view tilt never rotates text.

use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::camera::Camera;
use super::model::GraphModel;
use super::palette::EDGE_COLOR;

/// Page background.
const BACKGROUND_COLOR: &str = "#ffffff";

/// Ring stroked around the held node.
const HIGHLIGHT_COLOR: &str = "#444444";

/// Label text color.
const LABEL_COLOR: &str = "#000000";

/// Label font, sized in viewport pixels.
const LABEL_FONT: &str = "12px sans-serif";

/// Smallest node radius drawn, in viewport pixels.
const MIN_NODE_PX: f64 = 2.0;

/// Edge drawing program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgesRenderer {
	/// Stroke each edge separately with a zoom-scaled width.
	#[default]
	Default,
	/// Batch every edge into one single-pixel path. Much cheaper on large
	/// graphs, at the cost of constant-width edges.
	Fast,
}

impl EdgesRenderer {
	/// Value used in the settings form and the query string.
	pub fn form_value(self) -> &'static str {
		match self {
			EdgesRenderer::Default => "edges-default",
			EdgesRenderer::Fast => "edges-fast",
		}
	}

	/// Parse a form value back, `None` for anything unknown.
	pub fn from_form_value(value: &str) -> Option<Self> {
		match value {
			"edges-default" => Some(EdgesRenderer::Default),
			"edges-fast" => Some(EdgesRenderer::Fast),
			_ => None,
		}
	}
}

/// Draw one frame.
pub fn render(
	model: &GraphModel,
	camera: &Camera,
	ctx: &CanvasRenderingContext2d,
	edges: EdgesRenderer,
	hovered: Option<DefaultNodeIdx>,
) {
	let (width, height) = (camera.width(), camera.height());
	ctx.set_fill_style_str(BACKGROUND_COLOR);
	ctx.fill_rect(0.0, 0.0, width, height);

	let s = camera.scale();
	let (cx, cy) = camera.view_center();

	ctx.save();
	let _ = ctx.translate(width / 2.0, height / 2.0);
	let _ = ctx.rotate(camera.angle());
	let _ = ctx.scale(s, s);
	let _ = ctx.translate(-cx, -cy);

	match edges {
		EdgesRenderer::Default => draw_edges_default(model, ctx, s),
		EdgesRenderer::Fast => draw_edges_fast(model, ctx, s),
	}
	draw_nodes(model, ctx, s);

	ctx.restore();

	draw_labels(model, camera, ctx, hovered);
}

fn draw_edges_default(model: &GraphModel, ctx: &CanvasRenderingContext2d, s: f64) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	// At least one pixel on screen, growing with zoom past the fit scale.
	ctx.set_line_width((1.0 / s).max(0.4));
	model.visit_edges(|a, b| {
		ctx.begin_path();
		ctx.move_to(a.x() as f64, a.y() as f64);
		ctx.line_to(b.x() as f64, b.y() as f64);
		ctx.stroke();
	});
}

fn draw_edges_fast(model: &GraphModel, ctx: &CanvasRenderingContext2d, s: f64) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(1.0 / s);
	ctx.begin_path();
	model.visit_edges(|a, b| {
		ctx.move_to(a.x() as f64, a.y() as f64);
		ctx.line_to(b.x() as f64, b.y() as f64);
	});
	ctx.stroke();
}

fn draw_nodes(model: &GraphModel, ctx: &CanvasRenderingContext2d, s: f64) {
	let min_radius = MIN_NODE_PX / s;
	model.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let radius = info.size.max(min_radius);

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if info.highlighted {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / s, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(HIGHLIGHT_COLOR);
			ctx.set_line_width(1.5 / s);
			ctx.stroke();
		}
	});
}

/// Labels for the held and hovered nodes, horizontal in screen space.
fn draw_labels(
	model: &GraphModel,
	camera: &Camera,
	ctx: &CanvasRenderingContext2d,
	hovered: Option<DefaultNodeIdx>,
) {
	let s = camera.scale();
	let min_radius = MIN_NODE_PX / s;
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font(LABEL_FONT);
	model.visit_nodes(|node| {
		let info = &node.data.user_data;
		if !info.highlighted && hovered != Some(node.index()) {
			return;
		}
		let (x, y) = camera.graph_to_viewport(node.x() as f64, node.y() as f64);
		let radius = info.size.max(min_radius) * s;
		let _ = ctx.fill_text(&info.label, x + radius + 4.0, y + 3.0);
	});
}
