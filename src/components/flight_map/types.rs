use serde::Deserialize;

/// A network node: an airport, geographically located when `lat`/`lng` are
/// present, otherwise positioned by the pre-projected `x`/`y` fallback.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Airport {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub lat: Option<f64>,
	#[serde(default)]
	pub lng: Option<f64>,
	#[serde(default)]
	pub x: Option<f64>,
	#[serde(default)]
	pub y: Option<f64>,
}

/// An undirected connection between two airports, display-only.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RouteEdge {
	pub source: String,
	pub target: String,
}

/// Airports and routes as loaded from the data source at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkData {
	pub airports: Vec<Airport>,
	pub routes: Vec<RouteEdge>,
}

/// Display role of a node glyph, derived from the current selection each
/// render pass, never stored on the node itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeRole {
	#[default]
	Default,
	Source,
	Destination,
	Waypoint,
}

impl NodeRole {
	/// Whether the node belongs to any selected slot.
	pub fn is_selected(self) -> bool {
		!matches!(self, NodeRole::Default)
	}
}

/// The user's current picks. Source and destination come from map clicks,
/// the waypoint from the explicit picker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionView {
	pub source: Option<String>,
	pub destination: Option<String>,
	pub waypoint: Option<String>,
}

impl SelectionView {
	/// Role of `id` under this selection. Source wins over destination wins
	/// over waypoint if the slots are ever inconsistent.
	pub fn role_of(&self, id: &str) -> NodeRole {
		if self.source.as_deref() == Some(id) {
			NodeRole::Source
		} else if self.destination.as_deref() == Some(id) {
			NodeRole::Destination
		} else if self.waypoint.as_deref() == Some(id) {
			NodeRole::Waypoint
		} else {
			NodeRole::Default
		}
	}
}

/// Base map loaded from a GeoJSON feature collection, flattened into
/// (lng, lat) rings. Only Polygon and MultiPolygon geometries contribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseMap {
	pub rings: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
	#[serde(default)]
	pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
	#[serde(default)]
	pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub coordinates: serde_json::Value,
}

impl BaseMap {
	/// Flatten a parsed feature collection into rings. Unknown geometry
	/// kinds and malformed coordinate arrays are skipped, not errors.
	pub fn from_feature_collection(fc: FeatureCollection) -> Self {
		let mut rings = Vec::new();
		for feature in fc.features {
			let Some(geometry) = feature.geometry else {
				continue;
			};
			match geometry.kind.as_str() {
				"Polygon" => collect_polygon(&geometry.coordinates, &mut rings),
				"MultiPolygon" => {
					if let Some(polygons) = geometry.coordinates.as_array() {
						for polygon in polygons {
							collect_polygon(polygon, &mut rings);
						}
					}
				}
				_ => {}
			}
		}
		Self { rings }
	}

	pub fn is_empty(&self) -> bool {
		self.rings.is_empty()
	}
}

fn collect_polygon(coordinates: &serde_json::Value, rings: &mut Vec<Vec<(f64, f64)>>) {
	let Some(raw_rings) = coordinates.as_array() else {
		return;
	};
	for raw_ring in raw_rings {
		let Some(points) = raw_ring.as_array() else {
			continue;
		};
		let ring: Vec<(f64, f64)> = points
			.iter()
			.filter_map(|p| {
				let pair = p.as_array()?;
				Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
			})
			.collect();
		if ring.len() >= 3 {
			rings.push(ring);
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn parse(json: &str) -> BaseMap {
		let fc: FeatureCollection = serde_json::from_str(json).unwrap();
		BaseMap::from_feature_collection(fc)
	}

	#[test]
	fn polygon_and_multipolygon_flatten_to_rings() {
		let map = parse(
			r#"{
				"type": "FeatureCollection",
				"features": [
					{"type": "Feature", "geometry": {"type": "Polygon",
						"coordinates": [[[70.0, 20.0], [72.0, 20.0], [71.0, 22.0], [70.0, 20.0]]]}},
					{"type": "Feature", "geometry": {"type": "MultiPolygon",
						"coordinates": [
							[[[80.0, 10.0], [81.0, 10.0], [80.5, 11.0], [80.0, 10.0]]],
							[[[90.0, 25.0], [91.0, 25.0], [90.5, 26.0], [90.0, 25.0]]]
						]}}
				]
			}"#,
		);
		assert_eq!(map.rings.len(), 3);
		assert_eq!(map.rings[0][0], (70.0, 20.0));
	}

	#[test]
	fn unknown_geometries_and_short_rings_are_skipped() {
		let map = parse(
			r#"{
				"type": "FeatureCollection",
				"features": [
					{"type": "Feature", "geometry": {"type": "Point", "coordinates": [80.0, 10.0]}},
					{"type": "Feature", "geometry": {"type": "Polygon",
						"coordinates": [[[70.0, 20.0], [72.0, 20.0]]]}},
					{"type": "Feature"}
				]
			}"#,
		);
		assert!(map.is_empty());
	}

	#[test]
	fn role_priority_is_source_then_destination_then_waypoint() {
		let selection = SelectionView {
			source: Some("BOM".into()),
			destination: Some("BOM".into()),
			waypoint: Some("DEL".into()),
		};
		assert_eq!(selection.role_of("BOM"), NodeRole::Source);
		assert_eq!(selection.role_of("DEL"), NodeRole::Waypoint);
		assert_eq!(selection.role_of("MAA"), NodeRole::Default);
		assert!(!NodeRole::Default.is_selected());
		assert!(NodeRole::Waypoint.is_selected());
	}
}
