//! Zoom/pan transform state and the one-shot fit-to-content computation.

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 5.0;

/// Scale-and-translate applied to the whole scene when drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	/// Map a screen coordinate back into scene coordinates.
	pub fn screen_to_map(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

/// Axis-aligned bounds of the projected content, used to fit the initial
/// view. Grown point by point as content is projected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentBounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Default for ContentBounds {
	fn default() -> Self {
		Self {
			min_x: f64::INFINITY,
			min_y: f64::INFINITY,
			max_x: f64::NEG_INFINITY,
			max_y: f64::NEG_INFINITY,
		}
	}
}

impl ContentBounds {
	pub fn extend(&mut self, x: f64, y: f64) {
		self.min_x = self.min_x.min(x);
		self.min_y = self.min_y.min(y);
		self.max_x = self.max_x.max(x);
		self.max_y = self.max_y.max(y);
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}

	/// Bounds are usable for fitting only with positive extent.
	pub fn is_valid(&self) -> bool {
		self.width() > 0.0 && self.height() > 0.0
	}
}

/// Owns the view transform. The fit runs once per data load; every later
/// change comes from user gestures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Viewport {
	pub transform: ViewTransform,
}

impl Viewport {
	/// Scale and center the content bounds into a viewport, leaving a 10%
	/// margin. No-op when the bounds are degenerate.
	pub fn fit_to_content(&mut self, bounds: &ContentBounds, width: f64, height: f64) {
		if !bounds.is_valid() {
			return;
		}
		let scale = (0.9 * width / bounds.width())
			.min(0.9 * height / bounds.height())
			.clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = bounds.center();
		self.transform = ViewTransform {
			x: width / 2.0 - cx * scale,
			y: height / 2.0 - cy * scale,
			k: scale,
		};
	}

	/// Multiply the scale by `factor`, clamped, keeping the scene point
	/// under the focal screen position fixed.
	pub fn zoom_by(&mut self, focal_x: f64, focal_y: f64, factor: f64) {
		let t = &mut self.transform;
		let new_k = (t.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / t.k;
		t.x = focal_x - (focal_x - t.x) * ratio;
		t.y = focal_y - (focal_y - t.y) * ratio;
		t.k = new_k;
	}

	/// Shift the view. Translation is unclamped; content may leave the
	/// screen entirely.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.transform.x += dx;
		self.transform.y += dy;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> ContentBounds {
		ContentBounds { min_x, min_y, max_x, max_y }
	}

	#[test]
	fn fit_scale_is_positive_and_clamped() {
		let mut viewport = Viewport::default();
		viewport.fit_to_content(&bounds(0.0, 0.0, 400.0, 300.0), 800.0, 600.0);
		let k = viewport.transform.k;
		assert!(k > 0.0 && (MIN_ZOOM..=MAX_ZOOM).contains(&k));
		assert_eq!(k, 1.8);

		// Tiny content would fit at a huge scale, clamp holds it at max.
		viewport.fit_to_content(&bounds(0.0, 0.0, 1.0, 1.0), 800.0, 600.0);
		assert_eq!(viewport.transform.k, MAX_ZOOM);

		// Huge content clamps at the low end.
		viewport.fit_to_content(&bounds(0.0, 0.0, 1e5, 1e5), 800.0, 600.0);
		assert_eq!(viewport.transform.k, MIN_ZOOM);
	}

	#[test]
	fn fit_centers_the_content() {
		let mut viewport = Viewport::default();
		viewport.fit_to_content(&bounds(100.0, 100.0, 300.0, 200.0), 800.0, 600.0);
		let t = viewport.transform;
		// The bounds center must land on the viewport center.
		assert!((t.x + 200.0 * t.k - 400.0).abs() < 1e-9);
		assert!((t.y + 150.0 * t.k - 300.0).abs() < 1e-9);
	}

	#[test]
	fn fit_ignores_degenerate_bounds() {
		let mut viewport = Viewport::default();
		viewport.fit_to_content(&bounds(10.0, 10.0, 10.0, 40.0), 800.0, 600.0);
		assert_eq!(viewport.transform, ViewTransform::default());
		viewport.fit_to_content(&ContentBounds::default(), 800.0, 600.0);
		assert_eq!(viewport.transform, ViewTransform::default());
	}

	#[test]
	fn zoom_keeps_focal_point_fixed() {
		let mut viewport = Viewport::default();
		viewport.pan_by(30.0, -20.0);
		let before = viewport.transform.screen_to_map(250.0, 140.0);
		viewport.zoom_by(250.0, 140.0, 1.5);
		let after = viewport.transform.screen_to_map(250.0, 140.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn zoom_clamps_to_range() {
		let mut viewport = Viewport::default();
		for _ in 0..50 {
			viewport.zoom_by(0.0, 0.0, 1.4);
		}
		assert_eq!(viewport.transform.k, MAX_ZOOM);
		for _ in 0..50 {
			viewport.zoom_by(0.0, 0.0, 0.6);
		}
		assert_eq!(viewport.transform.k, MIN_ZOOM);
	}

	#[test]
	fn pan_accumulates_without_clamping() {
		let mut viewport = Viewport::default();
		viewport.pan_by(1e6, -1e6);
		viewport.pan_by(5.0, 5.0);
		assert_eq!(viewport.transform.x, 1e6 + 5.0);
		assert_eq!(viewport.transform.y, -1e6 + 5.0);
	}
}
