use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::components::flight_map::{BaseMap, FlightMapCanvas, NetworkData};
use crate::components::planner::state::PlannerState;
use crate::components::planner::{PlannerPanel, submit_query};
use crate::services::api;

/// Startup data fetch phases. The map cannot function without airports,
/// routes, and the base map, so a failure here is terminal until reload.
#[derive(Clone, Debug, PartialEq)]
enum LoadState {
	Loading,
	Ready {
		network: NetworkData,
		basemap: BaseMap,
	},
	Failed(String),
}

async fn load_data() -> Result<(NetworkData, BaseMap), api::ApiError> {
	let airports = api::get_airports().await?;
	let routes = api::get_routes().await?;
	let basemap = api::get_base_map().await?;
	Ok((NetworkData { airports, routes }, basemap))
}

/// The flight-route map page: canvas on the right, planner panel on the
/// left, with full-screen states while loading or after a fatal load error.
#[component]
pub fn Home() -> impl IntoView {
	let load = RwSignal::new(LoadState::Loading);
	let planner = RwSignal::new(PlannerState::default());

	spawn_local(async move {
		match load_data().await {
			Ok((network, basemap)) => {
				info!(
					"loaded {} airports, {} routes, {} base-map rings",
					network.airports.len(),
					network.routes.len(),
					basemap.rings.len()
				);
				load.set(LoadState::Ready { network, basemap });
			}
			Err(err) => {
				error!("initial data load failed: {err}");
				load.set(LoadState::Failed(err.to_string()));
			}
		}
	});

	let network = Signal::derive(move || match load.get() {
		LoadState::Ready { network, .. } => network,
		_ => NetworkData::default(),
	});
	let basemap = Signal::derive(move || match load.get() {
		LoadState::Ready { basemap, .. } => basemap,
		_ => BaseMap::default(),
	});
	let airports = Signal::derive(move || network.get().airports);
	let selection = Signal::derive(move || planner.get().selection());
	let path = Signal::derive(move || planner.get().path);

	let on_node_activated = Callback::new(move |id: String| {
		let mut issued = None;
		planner.update(|p| issued = p.node_activated(&id));
		if let Some(issued) = issued {
			submit_query(planner, issued);
		}
	});

	let reload = move |_| {
		if let Some(window) = web_sys::window() {
			let _ = window.location().reload();
		}
	};

	view! {
		{move || match load.get() {
			LoadState::Loading => view! {
				<div class="fullscreen-status">
					<p>"Loading flight network..."</p>
				</div>
			}
			.into_any(),
			LoadState::Failed(message) => view! {
				<div class="fullscreen-status load-error">
					<h2>"Error Loading Data"</h2>
					<p>{message}</p>
					<p class="hint">
						"Make sure the backend server is reachable at "
						{api::API_URL}
					</p>
					<button on:click=reload>"Retry"</button>
				</div>
			}
			.into_any(),
			LoadState::Ready { .. } => view! {
				<div class="app-layout">
					<div class="sidebar">
						<PlannerPanel planner=planner airports=airports />
					</div>
					<div class="map-pane">
						<FlightMapCanvas
							data=network
							basemap=basemap
							selection=selection
							path=path
							on_node_activated=on_node_activated
						/>
						{move || {
							planner.get().pending.then(|| {
								view! {
									<div class="loading-overlay">
										<p>"Calculating route..."</p>
									</div>
								}
							})
						}}
					</div>
				</div>
			}
			.into_any(),
		}}
	}
}
