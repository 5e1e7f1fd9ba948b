use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::Scene;
use super::state::{NODE_RADIUS, SELECTED_RADIUS};
use super::types::NodeRole;
use super::viewport::ViewTransform;

const BACKGROUND: &str = "#f8f9fa";
const BASEMAP_FILL: &str = "#e0e0e0";
const BASEMAP_STROKE: &str = "#999";
const EDGE_STROKE: &str = "#aaa";
const PATH_STROKE: &str = "#ff6b6b";
const LABEL_FILL: &str = "#333";

fn node_fill(role: NodeRole) -> &'static str {
	match role {
		NodeRole::Source => "#4caf50",
		NodeRole::Destination => "#f44336",
		NodeRole::Waypoint => "#eab308",
		NodeRole::Default => "#3498db",
	}
}

/// Draw one complete frame. The canvas is cleared and every layer rebuilt
/// from the scene, so repeated draws with the same scene are identical.
pub fn render(scene: &Scene, transform: &ViewTransform, width: f64, height: f64, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	draw_basemap(scene, ctx);
	draw_edges(scene, ctx);
	draw_path(scene, ctx);
	draw_nodes(scene, ctx);
	ctx.restore();
}

fn draw_basemap(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for ring in scene.basemap.iter() {
		let Some(&(x0, y0)) = ring.first() else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(x0, y0);
		for &(x, y) in &ring[1..] {
			ctx.line_to(x, y);
		}
		ctx.close_path();
		ctx.set_fill_style_str(BASEMAP_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(BASEMAP_STROKE);
		ctx.set_line_width(0.5);
		ctx.stroke();
	}
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_STROKE);
	ctx.set_line_width(1.0);
	for edge in &scene.edges {
		ctx.begin_path();
		ctx.move_to(edge.x1, edge.y1);
		ctx.line_to(edge.x2, edge.y2);
		ctx.stroke();
	}
}

fn draw_path(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	if scene.path.is_empty() {
		return;
	}
	ctx.set_stroke_style_str(PATH_STROKE);
	ctx.set_line_width(3.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(5.0),
		&JsValue::from_f64(5.0),
	));
	for segment in &scene.path {
		ctx.begin_path();
		ctx.move_to(segment.x1, segment.y1);
		ctx.line_to(segment.x2, segment.y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	for node in &scene.nodes {
		let selected = node.role.is_selected();
		let radius = if selected { SELECTED_RADIUS } else { NODE_RADIUS };

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_fill(node.role));
		ctx.fill();
		ctx.set_stroke_style_str("#fff");
		ctx.set_line_width(1.5);
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_FILL);
		ctx.set_font(if selected {
			"bold 9px sans-serif"
		} else {
			"9px sans-serif"
		});
		let _ = ctx.fill_text(&node.id, node.x, node.y + 14.0);
	}
	ctx.set_text_align("start");
}
