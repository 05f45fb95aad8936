//! Leptos component wrapping the clustered-graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, stepping the force layout when it is enabled and
//! rendering each frame.

use std::cell::RefCell;
use std::rc::Rc;

use force_graph::DefaultNodeIdx;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::camera::{Camera, PanState};
use super::drag::DragController;
use super::model::GraphModel;
use super::render::{self, EdgesRenderer};
use super::types::GraphData;

/// View rotation applied at startup, in radians.
const CAMERA_ANGLE: f64 = 0.2;

/// Smallest hit disc, in viewport pixels.
const MIN_HIT_PX: f64 = 8.0;

/// Everything one canvas needs: the graph, its camera, and gesture state.
struct CanvasContext {
	model: GraphModel,
	camera: Camera,
	controller: DragController,
	pan: PanState,
	hovered: Option<DefaultNodeIdx>,
}

/// Topmost node under the viewport point, if any.
fn hit_node(model: &GraphModel, camera: &Camera, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
	let (gx, gy) = camera.viewport_to_graph(sx, sy);
	model.node_at_position(gx, gy, MIN_HIT_PX / camera.scale())
}

/// Renders an interactive clustered graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal. The component sizes itself
/// to its parent container by default; set `fullscreen = true` to fill the
/// viewport and resize automatically with the window. Explicit `width`/`height`
/// override automatic sizing. `layout_running` starts and stops the force
/// layout, `edges_renderer` picks the edge program per frame.
#[component]
pub fn ClusterGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] edges_renderer: Signal<EdgesRenderer>,
	#[prop(into)] layout_running: Signal<bool>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let model = GraphModel::new(&data.get());
		let mut camera = Camera::new(w, h);
		camera.set_angle(CAMERA_ANGLE);
		camera.sync_extent(model.bbox());

		*context_init.borrow_mut() = Some(CanvasContext {
			model,
			camera,
			controller: DragController::new(),
			pan: PanState::default(),
			hovered: None,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.camera.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if layout_running.get_untracked() {
					c.model.tick(0.016);
				}
				c.camera.sync_extent(c.model.bbox());
				render::render(
					&c.model,
					&c.camera,
					&ctx,
					edges_renderer.get_untracked(),
					c.hovered,
				);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.controller.handle_press(&mut c.camera);
			if let Some(idx) = hit_node(&c.model, &c.camera, x, y) {
				c.controller.handle_node_down(idx, &mut c.model, &mut c.camera);
			} else if c.camera.is_enabled() {
				c.pan = PanState { active: true, last_x: x, last_y: y };
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.controller.is_dragging() {
				c.controller.handle_move(x, y, &mut c.model, &c.camera);
			} else {
				c.hovered = hit_node(&c.model, &c.camera, x, y);
				if c.pan.active {
					c.camera.pan_by(x - c.pan.last_x, y - c.pan.last_y);
					c.pan.last_x = x;
					c.pan.last_y = y;
				}
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.controller.handle_up(&mut c.model, &mut c.camera);
			c.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.controller.cancel(&mut c.model, &mut c.camera);
			c.pan.active = false;
			c.hovered = None;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.camera.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="cluster-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
