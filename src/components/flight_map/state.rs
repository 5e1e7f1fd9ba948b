use std::collections::HashMap;
use std::rc::Rc;

use super::projection::MapProjection;
use super::scene::PixelRing;
use super::types::{BaseMap, NetworkData};
use super::viewport::{ContentBounds, Viewport};

pub const NODE_RADIUS: f64 = 5.0;
pub const SELECTED_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 12.0;

/// Screen-space movement below which a press-release counts as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;

/// An in-progress pan gesture. `moved` flips once the pointer leaves the
/// click tolerance, suppressing node activation on release.
#[derive(Clone, Debug, Default)]
pub struct PanGesture {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub origin_x: f64,
	pub origin_y: f64,
}

/// Everything the map view owns: the loaded network, resolved node
/// positions, projected base-map rings, and the viewport transform.
pub struct MapState {
	pub network: NetworkData,
	basemap: BaseMap,
	pub positions: HashMap<String, (f64, f64)>,
	pub basemap_rings: Rc<Vec<PixelRing>>,
	pub viewport: Viewport,
	pub pan: PanGesture,
	pub width: f64,
	pub height: f64,
}

impl MapState {
	/// Project the loaded data into the viewport and fit the initial view.
	/// This is the only automatic transform; later changes come from
	/// gestures until the next data load rebuilds the state.
	pub fn new(network: NetworkData, basemap: BaseMap, width: f64, height: f64) -> Self {
		let mut state = Self {
			network,
			basemap,
			positions: HashMap::new(),
			basemap_rings: Rc::new(Vec::new()),
			viewport: Viewport::default(),
			pan: PanGesture::default(),
			width,
			height,
		};
		state.reproject();

		let mut bounds = ContentBounds::default();
		if state.basemap_rings.is_empty() {
			for &(x, y) in state.positions.values() {
				bounds.extend(x, y);
			}
		} else {
			for ring in state.basemap_rings.iter() {
				for &(x, y) in ring {
					bounds.extend(x, y);
				}
			}
		}
		state.viewport.fit_to_content(&bounds, width, height);
		state
	}

	/// Nearest node glyph within the hit radius of a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&str> {
		let (mx, my) = self.viewport.transform.screen_to_map(sx, sy);
		let mut best: Option<(&str, f64)> = None;
		for (id, &(x, y)) in &self.positions {
			let dist = ((x - mx).powi(2) + (y - my).powi(2)).sqrt();
			if dist < HIT_RADIUS && best.is_none_or(|(_, d)| dist < d) {
				best = Some((id, dist));
			}
		}
		best.map(|(id, _)| id)
	}

	/// Re-project for a new viewport size, keeping the user's transform.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.reproject();
	}

	fn reproject(&mut self) {
		let projection = MapProjection::for_viewport(self.width, self.height);
		self.positions = resolve_positions(&self.network, &projection);
		self.basemap_rings = Rc::new(project_rings(&self.basemap, &projection));
	}
}

fn resolve_positions(
	network: &NetworkData,
	projection: &MapProjection,
) -> HashMap<String, (f64, f64)> {
	let mut positions = HashMap::with_capacity(network.airports.len());
	for airport in &network.airports {
		let position = match (airport.lat, airport.lng) {
			(Some(lat), Some(lng)) => Some(projection.project(lat, lng)),
			// Degradation path: no geographic coordinates, use the
			// pre-projected fallback if the data carries one.
			_ => airport.x.zip(airport.y),
		};
		if let Some(p) = position {
			positions.insert(airport.id.clone(), p);
		}
	}
	positions
}

fn project_rings(basemap: &BaseMap, projection: &MapProjection) -> Vec<PixelRing> {
	basemap
		.rings
		.iter()
		.map(|ring| {
			ring.iter()
				.map(|&(lng, lat)| projection.project(lat, lng))
				.collect()
		})
		.collect()
}
