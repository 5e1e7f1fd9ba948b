mod component;
pub mod state;

pub use component::PlannerPanel;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::services::api::{self, PathRequest};
use state::{IssuedQuery, PlannerState, RouteOutcome, RouteSummary};

/// Dispatch an issued query to the routing service and apply the settled
/// outcome back onto the planner. Outcomes of superseded queries are
/// dropped inside `apply_outcome`.
pub fn submit_query(planner: RwSignal<PlannerState>, issued: IssuedQuery) {
	info!(
		"finding path {} -> {} (metric {:?}, waypoint {:?})",
		issued.query.source, issued.query.destination, issued.query.metric, issued.query.waypoint
	);
	spawn_local(async move {
		let request = PathRequest {
			source: issued.query.source,
			destination: issued.query.destination,
			metric: issued.query.metric,
			waypoint: issued.query.waypoint,
		};
		let outcome = match api::find_path(&request).await {
			Ok(response) => match response.error {
				Some(message) => RouteOutcome::Failure(message),
				None => RouteOutcome::Success {
					path: response.path,
					summary: RouteSummary {
						cost: response.total_cost,
						distance: response.total_distance,
						time: response.total_time,
					},
				},
			},
			Err(err) => {
				error!("route query failed: {err}");
				RouteOutcome::Failure(err.to_string())
			}
		};
		planner.update(|p| p.apply_outcome(issued.seq, outcome));
	});
}
