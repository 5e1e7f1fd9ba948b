//! Mercator projection from geographic coordinates to viewport pixels.

/// Geographic center of the projection, chosen to keep the whole network
/// roughly centered in the viewport before any fit or gesture applies.
pub const CENTER_LNG: f64 = 82.0;
pub const CENTER_LAT: f64 = 23.0;

/// Projection scale relative to viewport width.
const SCALE_PER_WIDTH: f64 = 1.3;

/// A fixed Mercator projection for one viewport size. Pure and stateless:
/// the same (lat, lng) always projects to the same pixel pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
	scale: f64,
	translate_x: f64,
	translate_y: f64,
	center_lng: f64,
	center_lat: f64,
}

impl MapProjection {
	/// Projection centered in a viewport, scaled from its width.
	pub fn for_viewport(width: f64, height: f64) -> Self {
		Self {
			scale: width * SCALE_PER_WIDTH,
			translate_x: width / 2.0,
			translate_y: height / 2.0,
			center_lng: CENTER_LNG,
			center_lat: CENTER_LAT,
		}
	}

	/// Project a geographic coordinate to viewport pixels.
	pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
		let x = self.translate_x + self.scale * (lng - self.center_lng).to_radians();
		let y = self.translate_y - self.scale * (mercator_y(lat) - mercator_y(self.center_lat));
		(x, y)
	}
}

fn mercator_y(lat: f64) -> f64 {
	(std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn projection_is_deterministic() {
		let projection = MapProjection::for_viewport(800.0, 600.0);
		let first = projection.project(19.0895, 72.8656);
		let second = projection.project(19.0895, 72.8656);
		assert_eq!(first, second);
	}

	#[test]
	fn center_projects_to_viewport_center() {
		let projection = MapProjection::for_viewport(800.0, 600.0);
		let (x, y) = projection.project(CENTER_LAT, CENTER_LNG);
		assert!((x - 400.0).abs() < 1e-9);
		assert!((y - 300.0).abs() < 1e-9);
	}

	#[test]
	fn axes_point_east_and_south() {
		let projection = MapProjection::for_viewport(800.0, 600.0);
		let (center_x, center_y) = projection.project(CENTER_LAT, CENTER_LNG);
		// East of center lands right of it, north of center lands above it.
		let (east_x, _) = projection.project(CENTER_LAT, CENTER_LNG + 5.0);
		let (_, north_y) = projection.project(CENTER_LAT + 5.0, CENTER_LNG);
		assert!(east_x > center_x);
		assert!(north_y < center_y);
	}
}
