use leptos::prelude::*;

use super::state::{Phase, PlannerState};
use super::submit_query;
use crate::components::flight_map::types::Airport;

/// Sidebar panel: selection readout, waypoint picker, metric toggle,
/// find/reset actions, query errors, and the route summary.
#[component]
pub fn PlannerPanel(
	planner: RwSignal<PlannerState>,
	#[prop(into)] airports: Signal<Vec<Airport>>,
) -> impl IntoView {
	let airport_label = move |id: &str| {
		airports
			.get()
			.iter()
			.find(|a| a.id == id)
			.map(|a| format!("{} ({})", a.name, a.id))
			.unwrap_or_else(|| id.to_string())
	};

	let slot_text = move |slot: Option<String>, empty: &'static str| {
		slot.map(|id| airport_label(&id))
			.unwrap_or_else(|| empty.to_string())
	};

	let on_waypoint_change = move |ev| {
		let value = event_target_value(&ev);
		let choice = if value.is_empty() { None } else { Some(value) };
		let mut issued = None;
		planner.update(|p| issued = p.set_waypoint(choice));
		if let Some(issued) = issued {
			submit_query(planner, issued);
		}
	};

	let on_toggle_metric = move |_| {
		let mut issued = None;
		planner.update(|p| issued = p.toggle_metric());
		if let Some(issued) = issued {
			submit_query(planner, issued);
		}
	};

	let on_find_route = move |_| {
		let mut issued = None;
		planner.update(|p| issued = p.refresh());
		if let Some(issued) = issued {
			submit_query(planner, issued);
		}
	};

	let on_reset = move |_| planner.update(|p| p.reset());

	view! {
		<div class="planner-panel">
			<h2>"Route Planner"</h2>
			<p class="hint">"Click an airport to pick the source, then another for the destination."</p>

			<div class="selection-readout">
				<div>
					<span class="slot-label">"Source"</span>
					{move || slot_text(planner.get().source, "click an airport")}
				</div>
				<div>
					<span class="slot-label">"Destination"</span>
					{move || slot_text(planner.get().destination, "click a second airport")}
				</div>
			</div>

			<span class="slot-label">"Layover airport (optional)"</span>
			<select id="waypoint-picker" on:change=on_waypoint_change>
				<option value="" selected=move || planner.get().waypoint.is_none()>
					"Direct (no layover)"
				</option>
				{move || {
					let current = planner.get();
					airports
						.get()
						.into_iter()
						.filter(|a| {
							current.source.as_deref() != Some(&a.id)
								&& current.destination.as_deref() != Some(&a.id)
						})
						.map(|a| {
							let selected = current.waypoint.as_deref() == Some(a.id.as_str());
							let label = format!("{} ({})", a.name, a.id);
							view! {
								<option value=a.id.clone() selected=selected>{label}</option>
							}
						})
						.collect_view()
				}}
			</select>

			<div class="metric-toggle">
				<span>"Optimize for:"</span>
				<button on:click=on_toggle_metric>
					{move || planner.get().metric.label()}
				</button>
			</div>

			<div class="actions">
				<button
					on:click=on_find_route
					disabled=move || planner.get().phase() != Phase::RouteChosen
				>
					"Find Route"
				</button>
				<button on:click=on_reset>"Reset"</button>
			</div>

			{move || {
				planner.get().error.map(|message| {
					view! { <div class="query-error">{message}</div> }
				})
			}}

			{move || {
				let current = planner.get();
				(!current.path.is_empty() && current.error.is_none()).then(|| {
					let summary = current.summary.unwrap_or_default();
					view! {
						<div class="route-summary">
							<div class="route-chain">{current.path.join(" \u{2192} ")}</div>
							<dl>
								<dt>"Total Cost"</dt>
								<dd>{format!("\u{20b9}{}", summary.cost.round() as i64)}</dd>
								<dt>"Flight Time"</dt>
								<dd>{format_hours(summary.time)}</dd>
								<dt>"Distance"</dt>
								<dd>{format!("{:.0} km", summary.distance)}</dd>
							</dl>
						</div>
					}
				})
			}}
		</div>
	}
}

/// Fractional hours as a short human string.
fn format_hours(hours: f64) -> String {
	if hours < 1.0 {
		format!("{} mins", (hours * 60.0).round() as i64)
	} else {
		format!(
			"{}h {}m",
			hours.floor() as i64,
			((hours % 1.0) * 60.0).round() as i64
		)
	}
}
