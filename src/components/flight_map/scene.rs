//! Pure scene construction: raw network data plus the current selection and
//! path become ordered drawing layers. No canvas types in here.

use std::collections::HashMap;
use std::rc::Rc;

use super::types::{NetworkData, NodeRole, SelectionView};

/// A projected base-map ring in scene coordinates.
pub type PixelRing = Vec<(f64, f64)>;

/// One line segment in scene coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// A node glyph plus its label.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub role: NodeRole,
}

/// Drawing layers in their fixed order: base map beneath everything, then
/// edges, then the highlighted path, then node glyphs on top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub basemap: Rc<Vec<PixelRing>>,
	pub edges: Vec<SceneLine>,
	pub path: Vec<SceneLine>,
	pub nodes: Vec<SceneNode>,
}

/// Build the scene for one render pass. An edge or path segment whose
/// endpoint has no resolved position is skipped rather than an error, so
/// partial data still draws.
pub fn build_scene(
	network: &NetworkData,
	positions: &HashMap<String, (f64, f64)>,
	basemap: Rc<Vec<PixelRing>>,
	selection: &SelectionView,
	path: &[String],
) -> Scene {
	let mut edges = Vec::with_capacity(network.routes.len());
	for route in &network.routes {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&route.source), positions.get(&route.target))
		else {
			continue;
		};
		edges.push(SceneLine { x1, y1, x2, y2 });
	}

	// A single-node path carries no segments and is treated as empty.
	let mut path_lines = Vec::new();
	if path.len() >= 2 {
		for pair in path.windows(2) {
			let (Some(&(x1, y1)), Some(&(x2, y2))) =
				(positions.get(&pair[0]), positions.get(&pair[1]))
			else {
				continue;
			};
			path_lines.push(SceneLine { x1, y1, x2, y2 });
		}
	}

	let nodes = network
		.airports
		.iter()
		.filter_map(|airport| {
			let &(x, y) = positions.get(&airport.id)?;
			Some(SceneNode {
				id: airport.id.clone(),
				x,
				y,
				role: selection.role_of(&airport.id),
			})
		})
		.collect();

	Scene {
		basemap,
		edges,
		path: path_lines,
		nodes,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::flight_map::types::{Airport, RouteEdge};

	fn airport(id: &str) -> Airport {
		Airport {
			id: id.into(),
			name: format!("{id} Airport"),
			lat: None,
			lng: None,
			x: None,
			y: None,
		}
	}

	fn network() -> NetworkData {
		NetworkData {
			airports: vec![airport("AAA"), airport("BBB"), airport("CCC"), airport("ZZZ")],
			routes: vec![
				RouteEdge { source: "AAA".into(), target: "BBB".into() },
				RouteEdge { source: "BBB".into(), target: "CCC".into() },
				// ZZZ has no resolved position, this edge must be skipped.
				RouteEdge { source: "CCC".into(), target: "ZZZ".into() },
			],
		}
	}

	fn positions() -> HashMap<String, (f64, f64)> {
		HashMap::from([
			("AAA".to_string(), (10.0, 10.0)),
			("BBB".to_string(), (50.0, 10.0)),
			("CCC".to_string(), (50.0, 60.0)),
		])
	}

	#[test]
	fn unresolved_endpoints_are_skipped_silently() {
		let scene = build_scene(
			&network(),
			&positions(),
			Rc::new(Vec::new()),
			&SelectionView::default(),
			&[],
		);
		assert_eq!(scene.edges.len(), 2);
		assert_eq!(scene.nodes.len(), 3);
		assert!(scene.path.is_empty());
	}

	#[test]
	fn path_layer_has_one_segment_per_consecutive_pair() {
		let path = ["AAA".to_string(), "BBB".to_string(), "CCC".to_string()];
		let scene = build_scene(
			&network(),
			&positions(),
			Rc::new(Vec::new()),
			&SelectionView::default(),
			&path,
		);
		assert_eq!(
			scene.path,
			vec![
				SceneLine { x1: 10.0, y1: 10.0, x2: 50.0, y2: 10.0 },
				SceneLine { x1: 50.0, y1: 10.0, x2: 50.0, y2: 60.0 },
			]
		);
	}

	#[test]
	fn single_node_path_draws_nothing() {
		let scene = build_scene(
			&network(),
			&positions(),
			Rc::new(Vec::new()),
			&SelectionView::default(),
			&["AAA".to_string()],
		);
		assert!(scene.path.is_empty());
	}

	#[test]
	fn path_segment_with_unknown_node_is_dropped() {
		let path = ["AAA".to_string(), "ZZZ".to_string(), "CCC".to_string()];
		let scene = build_scene(
			&network(),
			&positions(),
			Rc::new(Vec::new()),
			&SelectionView::default(),
			&path,
		);
		assert!(scene.path.is_empty());
	}

	#[test]
	fn node_roles_follow_selection() {
		let selection = SelectionView {
			source: Some("AAA".into()),
			destination: Some("CCC".into()),
			waypoint: Some("BBB".into()),
		};
		let scene = build_scene(
			&network(),
			&positions(),
			Rc::new(Vec::new()),
			&selection,
			&[],
		);
		let role = |id: &str| scene.nodes.iter().find(|n| n.id == id).unwrap().role;
		assert_eq!(role("AAA"), NodeRole::Source);
		assert_eq!(role("BBB"), NodeRole::Waypoint);
		assert_eq!(role("CCC"), NodeRole::Destination);
	}

	#[test]
	fn rebuild_with_identical_inputs_is_identical() {
		let selection = SelectionView {
			source: Some("AAA".into()),
			..Default::default()
		};
		let path = ["AAA".to_string(), "BBB".to_string()];
		let basemap = Rc::new(vec![vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]]);
		let first = build_scene(&network(), &positions(), basemap.clone(), &selection, &path);
		let second = build_scene(&network(), &positions(), basemap, &selection, &path);
		assert_eq!(first, second);
	}
}
