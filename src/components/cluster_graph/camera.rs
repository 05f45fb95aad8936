//! Camera: projection between graph space and canvas pixels.
//!
//! The camera fits the live graph extent into the canvas every frame
//! (autoscale) until a custom bounding box is installed, which freezes the
//! frame of reference for good. Zoom, pan, and a fixed tilt angle apply on
//! top of the base fit. Disabling the camera suspends user navigation (pan
//! and zoom) while keeping projection available, which is what lets a drag
//! gesture move a node without the view sliding underneath the pointer.

/// Axis-aligned extent of graph-space content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
	/// Smallest x of the content.
	pub min_x: f64,
	/// Smallest y of the content.
	pub min_y: f64,
	/// Largest x of the content.
	pub max_x: f64,
	/// Largest y of the content.
	pub max_y: f64,
}

impl BBox {
	/// Fallback extent for empty graphs.
	pub const UNIT: BBox = BBox { min_x: -0.5, min_y: -0.5, max_x: 0.5, max_y: 0.5 };

	/// Tightest box around `points`, or `None` when there are none.
	#[allow(dead_code, reason = "completes the extent API for callers without a graph model")]
	pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		let mut bbox: Option<BBox> = None;
		for (x, y) in points {
			match &mut bbox {
				Some(b) => {
					b.min_x = b.min_x.min(x);
					b.min_y = b.min_y.min(y);
					b.max_x = b.max_x.max(x);
					b.max_y = b.max_y.max(y);
				}
				None => bbox = Some(BBox { min_x: x, min_y: y, max_x: x, max_y: y }),
			}
		}
		bbox
	}

	/// Center of the box.
	pub fn center(&self) -> (f64, f64) {
		((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
	}

	/// Width of the box.
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	/// Height of the box.
	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	/// Largest side. Point-like extents report the unit span, which gives
	/// a lone node the same fit as a unit box centered on it.
	pub fn span(&self) -> f64 {
		let span = self.width().max(self.height());
		if span < MIN_SPAN { 1.0 } else { span }
	}
}

/// Below this size an extent counts as a single point.
const MIN_SPAN: f64 = 1e-6;

/// Fraction of the short canvas side the fitted extent occupies.
const FIT_MARGIN: f64 = 0.9;

/// Wheel zoom bounds.
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

/// Projection state for one canvas.
pub struct Camera {
	width: f64,
	height: f64,
	/// Zoom ratio on top of the base fit.
	k: f64,
	/// View rotation in radians.
	angle: f64,
	/// Pan offset in graph units, added to the fitted center.
	offset_x: f64,
	offset_y: f64,
	enabled: bool,
	graph_bbox: BBox,
	custom_bbox: Option<BBox>,
}

impl Camera {
	/// Camera over a `width` x `height` viewport, fitted to the unit box
	/// until an extent is synced.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			k: 1.0,
			angle: 0.0,
			offset_x: 0.0,
			offset_y: 0.0,
			enabled: true,
			graph_bbox: BBox::UNIT,
			custom_bbox: None,
		}
	}

	/// Update the viewport size after a canvas resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Viewport width in pixels.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Viewport height in pixels.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Set the view rotation in radians.
	pub fn set_angle(&mut self, angle: f64) {
		self.angle = angle;
	}

	/// View rotation in radians.
	pub fn angle(&self) -> f64 {
		self.angle
	}

	/// Current zoom ratio.
	#[allow(dead_code, reason = "readback counterpart of zoom_at")]
	pub fn zoom(&self) -> f64 {
		self.k
	}

	/// Refresh the live graph extent. While no custom bounding box is set
	/// this refits the view; afterwards it only updates [`Self::bbox`].
	pub fn sync_extent(&mut self, bbox: Option<BBox>) {
		if let Some(bbox) = bbox {
			self.graph_bbox = bbox;
		}
	}

	/// Live extent of the graph as last synced.
	pub fn bbox(&self) -> BBox {
		self.graph_bbox
	}

	/// The frozen frame of reference, if one was installed.
	pub fn custom_bbox(&self) -> Option<BBox> {
		self.custom_bbox
	}

	/// Freeze the frame of reference to `bbox`. From here on the view no
	/// longer follows the live extent.
	pub fn set_custom_bbox(&mut self, bbox: BBox) {
		self.custom_bbox = Some(bbox);
	}

	/// Re-enable pan and zoom.
	pub fn enable(&mut self) {
		self.enabled = true;
	}

	/// Suspend pan and zoom. Projection keeps working.
	pub fn disable(&mut self) {
		self.enabled = false;
	}

	/// Whether pan and zoom are currently accepted.
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn reference_bbox(&self) -> BBox {
		self.custom_bbox.unwrap_or(self.graph_bbox)
	}

	/// Center of the view in graph space, pan included.
	pub fn view_center(&self) -> (f64, f64) {
		let (cx, cy) = self.reference_bbox().center();
		(cx + self.offset_x, cy + self.offset_y)
	}

	/// Pixels per graph unit at the current zoom.
	pub fn scale(&self) -> f64 {
		FIT_MARGIN * self.width.min(self.height) / self.reference_bbox().span() * self.k
	}

	/// Project a graph-space point to viewport pixels.
	pub fn graph_to_viewport(&self, gx: f64, gy: f64) -> (f64, f64) {
		let (cx, cy) = self.view_center();
		let s = self.scale();
		let dx = (gx - cx) * s;
		let dy = (gy - cy) * s;
		let (sin, cos) = self.angle.sin_cos();
		(
			self.width / 2.0 + dx * cos - dy * sin,
			self.height / 2.0 + dx * sin + dy * cos,
		)
	}

	/// Project a viewport pixel back to graph space. Exact inverse of
	/// [`Self::graph_to_viewport`].
	pub fn viewport_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		let (cx, cy) = self.view_center();
		let s = self.scale();
		let dx = sx - self.width / 2.0;
		let dy = sy - self.height / 2.0;
		let (sin, cos) = self.angle.sin_cos();
		(cx + (dx * cos + dy * sin) / s, cy + (-dx * sin + dy * cos) / s)
	}

	/// Shift the view by a viewport-pixel delta, so content follows the
	/// pointer. No-op while disabled.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		if !self.enabled {
			return;
		}
		let (ax, ay) = self.viewport_to_graph(0.0, 0.0);
		let (bx, by) = self.viewport_to_graph(dx, dy);
		self.offset_x -= bx - ax;
		self.offset_y -= by - ay;
	}

	/// Multiply the zoom by `factor`, keeping the graph point under
	/// `(sx, sy)` fixed on screen. No-op while disabled.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		if !self.enabled {
			return;
		}
		let (gx, gy) = self.viewport_to_graph(sx, sy);
		self.k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let (nx, ny) = self.viewport_to_graph(sx, sy);
		self.offset_x += gx - nx;
		self.offset_y += gy - ny;
	}
}

/// An in-progress background pan gesture.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanState {
	/// Whether the pointer went down on empty stage and is still held.
	pub active: bool,
	/// Last pointer x, in viewport pixels.
	pub last_x: f64,
	/// Last pointer y, in viewport pixels.
	pub last_y: f64,
}
