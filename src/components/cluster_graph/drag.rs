//! Drag-and-drop of individual nodes.
//!
//! A [`DragController`] is a small two-state machine (idle or dragging) fed
//! by the canvas pointer handlers: [`DragController::handle_press`] on every
//! mousedown, [`DragController::handle_node_down`] when the press landed on
//! a node, then [`DragController::handle_move`], [`DragController::handle_up`]
//! and [`DragController::cancel`]. While a node is held it is highlighted
//! and camera navigation is suspended, so pointer movement repositions the
//! node instead of panning the view.
//!
//! Events may arrive in any order. A move or an up without a preceding down
//! is a no-op, and only one node can be held at a time.

use force_graph::DefaultNodeIdx;

use super::camera::Camera;
use super::model::GraphModel;

/// The gesture in progress. `node` is `Some` exactly while `active`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragSession {
	/// Whether a node is currently held.
	pub active: bool,
	/// The held node.
	pub node: Option<DefaultNodeIdx>,
}

impl DragSession {
	fn begin(&mut self, node: DefaultNodeIdx) {
		self.active = true;
		self.node = Some(node);
	}

	fn end(&mut self) {
		self.active = false;
		self.node = None;
	}
}

/// Turns pointer events into node moves and camera control.
///
/// Each canvas owns its controller, so two graphs on one page cannot steal
/// each other's gestures.
#[derive(Debug, Default)]
pub struct DragController {
	session: DragSession,
}

impl DragController {
	/// Controller starting out idle.
	pub fn new() -> Self {
		Self::default()
	}

	/// The current session.
	pub fn session(&self) -> DragSession {
		self.session
	}

	/// Whether a node is currently held.
	pub fn is_dragging(&self) -> bool {
		self.session().active
	}

	/// Any mousedown on the canvas, before hit-testing.
	///
	/// The first press ever freezes the camera's frame of reference by
	/// installing the live extent as the custom bounding box; the view
	/// stops refitting once the user starts interacting. Later presses
	/// find the box already set and leave it alone.
	pub fn handle_press(&mut self, camera: &mut Camera) {
		if camera.custom_bbox().is_none() {
			camera.set_custom_bbox(camera.bbox());
		}
	}

	/// Mousedown that landed on `node`: start holding it.
	///
	/// Highlights the node and suspends camera navigation until release.
	/// Ignored while another gesture is active, so a second button pressed
	/// mid-drag cannot hijack the session.
	pub fn handle_node_down(
		&mut self,
		node: DefaultNodeIdx,
		graph: &mut GraphModel,
		camera: &mut Camera,
	) {
		if self.session.active {
			return;
		}
		self.session.begin(node);
		graph.set_highlighted(node);
		camera.disable();
	}

	/// Mousemove: place the held node under the pointer.
	///
	/// The viewport position is inverse-projected through the camera and
	/// written to the node as its absolute position. No-op while idle.
	pub fn handle_move(&mut self, sx: f64, sy: f64, graph: &mut GraphModel, camera: &Camera) {
		let Some(node) = self.session.node else {
			return;
		};
		let (gx, gy) = camera.viewport_to_graph(sx, sy);
		graph.set_node_position(node, gx, gy);
	}

	/// Mouseup: release the held node.
	///
	/// Clears the highlight, ends the session, and re-enables camera
	/// navigation. The node keeps its last position. No-op while idle, so
	/// duplicate or spurious releases are harmless.
	pub fn handle_up(&mut self, graph: &mut GraphModel, camera: &mut Camera) {
		let Some(node) = self.session.node else {
			return;
		};
		graph.clear_highlighted(node);
		self.session.end();
		camera.enable();
	}

	/// The pointer left the canvas: abort the gesture.
	///
	/// A release outside the canvas never delivers its mouseup here, which
	/// would otherwise leave the node highlighted and the camera disabled
	/// until the next gesture. Cleanup is identical to [`Self::handle_up`].
	pub fn cancel(&mut self, graph: &mut GraphModel, camera: &mut Camera) {
		self.handle_up(graph, camera);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::cluster_graph::generate::clustered_graph;
	use crate::components::cluster_graph::layout;
	use crate::components::cluster_graph::palette::cluster_colors;
	use crate::components::cluster_graph::random::SeededRng;
	use crate::components::cluster_graph::types::{GraphData, GraphNode};

	fn setup() -> (DragController, GraphModel, Camera) {
		let mut rng = SeededRng::from_seed("sigma");
		let mut data = clustered_graph(12, 20, 3, &mut rng);
		data.cluster_colors = cluster_colors(3, &mut rng);
		layout::assign(&mut data);
		let model = GraphModel::new(&data);
		let mut camera = Camera::new(800.0, 600.0);
		camera.set_angle(0.2);
		camera.sync_extent(model.bbox());
		(DragController::new(), model, camera)
	}

	fn assert_session_invariant(controller: &DragController) {
		let session = controller.session();
		assert_eq!(session.active, session.node.is_some());
	}

	#[test]
	fn full_gesture_moves_highlights_and_releases() {
		let (mut controller, mut model, mut camera) = setup();
		let node = model.index_of(3).unwrap();

		controller.handle_press(&mut camera);
		controller.handle_node_down(node, &mut model, &mut camera);
		assert!(controller.is_dragging());
		assert!(model.is_highlighted(node));
		assert!(!camera.is_enabled());

		controller.handle_move(220.0, 140.0, &mut model, &camera);
		let expected = camera.viewport_to_graph(220.0, 140.0);
		let (x, y) = model.node_position(node).unwrap();
		assert!((x - expected.0).abs() < 1e-3 && (y - expected.1).abs() < 1e-3);

		controller.handle_up(&mut model, &mut camera);
		assert!(!controller.is_dragging());
		assert!(!model.is_highlighted(node));
		assert!(camera.is_enabled());
	}

	#[test]
	fn moved_position_survives_release() {
		let (mut controller, mut model, mut camera) = setup();
		let node = model.index_of(0).unwrap();

		controller.handle_press(&mut camera);
		controller.handle_node_down(node, &mut model, &mut camera);
		controller.handle_move(500.0, 90.0, &mut model, &camera);
		let held = model.node_position(node).unwrap();
		controller.handle_up(&mut model, &mut camera);

		let released = model.node_position(node).unwrap();
		assert_eq!(held, released);
		assert!(!model.is_highlighted(node));
	}

	#[test]
	fn second_down_mid_drag_is_ignored() {
		let (mut controller, mut model, mut camera) = setup();
		let first = model.index_of(1).unwrap();
		let second = model.index_of(2).unwrap();

		controller.handle_node_down(first, &mut model, &mut camera);
		controller.handle_node_down(second, &mut model, &mut camera);

		assert_eq!(controller.session().node, Some(first));
		assert!(model.is_highlighted(first));
		assert!(!model.is_highlighted(second));

		let second_before = model.node_position(second).unwrap();
		let first_before = model.node_position(first).unwrap();
		controller.handle_move(50.0, 50.0, &mut model, &camera);
		assert_eq!(model.node_position(second).unwrap(), second_before);
		assert_ne!(
			model.node_position(first).unwrap(),
			first_before,
			"the held node should keep following the pointer"
		);
	}

	#[test]
	fn first_press_freezes_the_bounding_box_once() {
		let (mut controller, mut model, mut camera) = setup();
		assert!(camera.custom_bbox().is_none());

		controller.handle_press(&mut camera);
		let frozen = camera.custom_bbox().unwrap();
		assert_eq!(frozen, camera.bbox());

		// Grow the live extent, press again: the frozen box must not move.
		let node = model.index_of(0).unwrap();
		model.set_node_position(node, 10_000.0, 10_000.0);
		camera.sync_extent(model.bbox());
		controller.handle_press(&mut camera);
		assert_eq!(camera.custom_bbox().unwrap(), frozen);
	}

	#[test]
	fn move_while_idle_changes_nothing() {
		let (mut controller, mut model, camera) = setup();
		let before: Vec<_> = (0..12)
			.map(|id| model.node_position(model.index_of(id).unwrap()).unwrap())
			.collect();

		controller.handle_move(300.0, 300.0, &mut model, &camera);

		let after: Vec<_> = (0..12)
			.map(|id| model.node_position(model.index_of(id).unwrap()).unwrap())
			.collect();
		assert_eq!(before, after);
		assert!(!controller.is_dragging());
	}

	#[test]
	fn spurious_up_while_idle_is_harmless() {
		let (mut controller, mut model, mut camera) = setup();
		let before: Vec<_> = (0..12)
			.map(|id| model.node_position(model.index_of(id).unwrap()).unwrap())
			.collect();
		controller.handle_up(&mut model, &mut camera);
		assert!(!controller.is_dragging());
		assert!(camera.is_enabled());
		assert!(camera.custom_bbox().is_none());
		let after: Vec<_> = (0..12)
			.map(|id| model.node_position(model.index_of(id).unwrap()).unwrap())
			.collect();
		assert_eq!(before, after);

		// Even straight after a completed gesture.
		let node = model.index_of(6).unwrap();
		controller.handle_node_down(node, &mut model, &mut camera);
		controller.handle_up(&mut model, &mut camera);
		controller.handle_up(&mut model, &mut camera);
		assert!(!controller.is_dragging());
		assert!(camera.is_enabled());
	}

	#[test]
	fn cancel_releases_like_up() {
		let (mut controller, mut model, mut camera) = setup();
		let node = model.index_of(4).unwrap();

		controller.handle_node_down(node, &mut model, &mut camera);
		controller.cancel(&mut model, &mut camera);
		assert!(!controller.is_dragging());
		assert!(!model.is_highlighted(node));
		assert!(camera.is_enabled());

		// Cancel while idle is a no-op too.
		controller.cancel(&mut model, &mut camera);
		assert!(camera.is_enabled());
	}

	#[test]
	fn camera_navigation_is_blocked_during_a_drag() {
		let (mut controller, mut model, mut camera) = setup();
		let node = model.index_of(2).unwrap();

		controller.handle_node_down(node, &mut model, &mut camera);
		let pinned = camera.graph_to_viewport(0.0, 0.0);
		camera.pan_by(80.0, 80.0);
		camera.zoom_at(10.0, 10.0, 2.0);
		assert_eq!(camera.graph_to_viewport(0.0, 0.0), pinned);

		controller.handle_up(&mut model, &mut camera);
		camera.pan_by(80.0, 80.0);
		assert_ne!(camera.graph_to_viewport(0.0, 0.0), pinned);
	}

	#[test]
	fn session_invariant_holds_across_transitions() {
		let (mut controller, mut model, mut camera) = setup();
		let node = model.index_of(9).unwrap();

		assert_session_invariant(&controller);
		controller.handle_press(&mut camera);
		assert_session_invariant(&controller);
		controller.handle_node_down(node, &mut model, &mut camera);
		assert_session_invariant(&controller);
		controller.handle_move(10.0, 10.0, &mut model, &camera);
		assert_session_invariant(&controller);
		controller.handle_up(&mut model, &mut camera);
		assert_session_invariant(&controller);
		controller.cancel(&mut model, &mut camera);
		assert_session_invariant(&controller);
	}

	#[test]
	fn drag_lands_where_the_pointer_is_despite_zoom_and_pan() {
		let (mut controller, mut model, mut camera) = setup();
		camera.zoom_at(400.0, 300.0, 1.8);
		camera.pan_by(-60.0, 25.0);
		let node = model.index_of(7).unwrap();

		controller.handle_press(&mut camera);
		controller.handle_node_down(node, &mut model, &mut camera);
		controller.handle_move(123.0, 456.0, &mut model, &camera);

		let (x, y) = model.node_position(node).unwrap();
		let (sx, sy) = camera.graph_to_viewport(x, y);
		assert!((sx - 123.0).abs() < 0.1 && (sy - 456.0).abs() < 0.1);
	}

	#[test]
	fn dragging_a_lone_node_is_not_inert() {
		// A one-node graph has a point-sized extent.
		let data = GraphData {
			nodes: vec![GraphNode { id: 0, cluster: 0, x: 2.0, y: 3.0 }],
			links: Vec::new(),
			cluster_colors: vec!["#336699".to_string()],
		};
		let mut model = GraphModel::new(&data);
		let mut camera = Camera::new(800.0, 600.0);
		camera.sync_extent(model.bbox());
		let mut controller = DragController::new();
		let node = model.index_of(0).unwrap();

		controller.handle_press(&mut camera);
		controller.handle_node_down(node, &mut model, &mut camera);
		controller.handle_move(500.0, 200.0, &mut model, &camera);
		controller.handle_up(&mut model, &mut camera);

		let (x, y) = model.node_position(node).unwrap();
		let (sx, sy) = camera.graph_to_viewport(x, y);
		assert!((sx - 500.0).abs() < 0.1 && (sy - 200.0).abs() < 0.1);
		// At the unit-span fit, 100 pixels of travel cover a visible
		// fraction of a graph unit.
		let moved = ((x - 2.0).powi(2) + (y - 3.0).powi(2)).sqrt();
		assert!(moved > 0.1, "the node barely moved: {moved}");
	}
}
