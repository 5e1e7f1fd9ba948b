use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scene;
use super::state::{CLICK_TOLERANCE, MapState};
use super::types::{BaseMap, NetworkData, SelectionView};

/// The interactive map: base map, route network, highlighted path, and
/// selectable airport glyphs on a pan/zoom canvas. A click that lands on a
/// glyph (and was not a pan) emits one node-activated event.
#[component]
pub fn FlightMapCanvas(
	#[prop(into)] data: Signal<NetworkData>,
	#[prop(into)] basemap: Signal<BaseMap>,
	#[prop(into)] selection: Signal<SelectionView>,
	#[prop(into)] path: Signal<Vec<String>>,
	#[prop(into)] on_node_activated: Callback<String>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<MapState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

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
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0),
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0),
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
		// Rebuilds on every data/basemap change, which re-runs the fit.
		*state_init.borrow_mut() = Some(MapState::new(data.get(), basemap.get(), w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				let frame = scene::build_scene(
					&s.network,
					&s.positions,
					s.basemap_rings.clone(),
					&selection.get_untracked(),
					&path.get_untracked(),
				);
				render::render(&frame, &s.viewport.transform, s.width, s.height, &ctx);
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

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pan.active = true;
			s.pan.moved = false;
			s.pan.start_x = x;
			s.pan.start_y = y;
			s.pan.origin_x = s.viewport.transform.x;
			s.pan.origin_y = s.viewport.transform.y;
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.pan.active {
				return;
			}
			let (dx, dy) = (x - s.pan.start_x, y - s.pan.start_y);
			if (dx * dx + dy * dy).sqrt() > CLICK_TOLERANCE {
				s.pan.moved = true;
			}
			if s.pan.moved {
				s.viewport.transform.x = s.pan.origin_x + dx;
				s.viewport.transform.y = s.pan.origin_y + dy;
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let hit = {
			let mut borrow = state_mu.borrow_mut();
			let Some(ref mut s) = *borrow else {
				return;
			};
			let was_click = s.pan.active && !s.pan.moved;
			s.pan.active = false;
			if was_click {
				s.node_at_position(x, y).map(str::to_string)
			} else {
				None
			}
		};
		// Clicks on empty space are ignored, only glyph hits select.
		if let Some(id) = hit {
			on_node_activated.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pan.active = false;
			s.pan.moved = false;
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.viewport.zoom_by(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="flight-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
