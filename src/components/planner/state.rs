//! The route-planning state machine: selection slots, metric preference,
//! query issuance, and result application. Pure transitions, no I/O.

use serde::Serialize;

use crate::components::flight_map::types::SelectionView;

/// Optimization criterion sent with a route query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
	#[default]
	Cost,
	Distance,
}

impl Metric {
	pub fn toggled(self) -> Self {
		match self {
			Metric::Cost => Metric::Distance,
			Metric::Distance => Metric::Cost,
		}
	}

	/// Label used by the toggle control.
	pub fn label(self) -> &'static str {
		match self {
			Metric::Cost => "Cost",
			Metric::Distance => "Time",
		}
	}
}

/// Totals for the current path, valid only while the path itself is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteSummary {
	pub cost: f64,
	pub distance: f64,
	pub time: f64,
}

/// Selection phase, derived from the slots rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Empty,
	SourceChosen,
	RouteChosen,
}

/// One route request as handed to the gateway.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteQuery {
	pub source: String,
	pub destination: String,
	pub metric: Metric,
	pub waypoint: Option<String>,
}

/// A query tagged with its sequence number; only the outcome of the most
/// recently issued query may be applied.
#[derive(Clone, Debug, PartialEq)]
pub struct IssuedQuery {
	pub seq: u64,
	pub query: RouteQuery,
}

/// Terminal result of a query, transport and application errors folded
/// into the failure arm.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteOutcome {
	Success {
		path: Vec<String>,
		summary: RouteSummary,
	},
	Failure(String),
}

/// All planner-owned state. Mutated only through the methods below; the
/// methods that can trigger a query return the query to dispatch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlannerState {
	pub source: Option<String>,
	pub destination: Option<String>,
	pub waypoint: Option<String>,
	pub metric: Metric,
	pub path: Vec<String>,
	pub summary: Option<RouteSummary>,
	pub error: Option<String>,
	pub pending: bool,
	seq: u64,
}

impl PlannerState {
	pub fn phase(&self) -> Phase {
		match (&self.source, &self.destination) {
			(None, _) => Phase::Empty,
			(Some(_), None) => Phase::SourceChosen,
			(Some(_), Some(_)) => Phase::RouteChosen,
		}
	}

	/// The selection as the scene sees it.
	pub fn selection(&self) -> SelectionView {
		SelectionView {
			source: self.source.clone(),
			destination: self.destination.clone(),
			waypoint: self.waypoint.clone(),
		}
	}

	/// A node glyph was clicked on the map.
	pub fn node_activated(&mut self, id: &str) -> Option<IssuedQuery> {
		match self.phase() {
			Phase::Empty => {
				// The waypoint may already be picked; it must never share a
				// node with the source slot.
				if self.waypoint.as_deref() == Some(id) {
					self.waypoint = None;
				}
				self.source = Some(id.to_string());
				None
			}
			Phase::SourceChosen => {
				if self.source.as_deref() == Some(id) {
					return None;
				}
				if self.waypoint.as_deref() == Some(id) {
					self.waypoint = None;
				}
				self.destination = Some(id.to_string());
				Some(self.issue())
			}
			Phase::RouteChosen => {
				// Any click restarts the selection from this node.
				self.source = Some(id.to_string());
				self.destination = None;
				self.waypoint = None;
				self.path.clear();
				self.summary = None;
				None
			}
		}
	}

	/// Set or clear the waypoint from the picker. While a full route is
	/// chosen, any change re-issues the query.
	pub fn set_waypoint(&mut self, id: Option<String>) -> Option<IssuedQuery> {
		if id == self.waypoint {
			return None;
		}
		if id.is_some() && (id == self.source || id == self.destination) {
			return None;
		}
		self.waypoint = id;
		match self.phase() {
			Phase::RouteChosen => Some(self.issue()),
			_ => None,
		}
	}

	/// Flip the metric. Re-issues the query only while a route is chosen,
	/// otherwise just stores the preference for the next query.
	pub fn toggle_metric(&mut self) -> Option<IssuedQuery> {
		self.metric = self.metric.toggled();
		match self.phase() {
			Phase::RouteChosen => Some(self.issue()),
			_ => None,
		}
	}

	/// Re-issue the current query, the "find route" affordance. Useful to
	/// retry after a failure without re-picking nodes.
	pub fn refresh(&mut self) -> Option<IssuedQuery> {
		match self.phase() {
			Phase::RouteChosen => Some(self.issue()),
			_ => None,
		}
	}

	/// Clear every slot, the path, the summary, and any error. Bumping the
	/// sequence number strands any in-flight response.
	pub fn reset(&mut self) {
		self.seq += 1;
		let (metric, seq) = (self.metric, self.seq);
		*self = Self {
			metric,
			seq,
			..Self::default()
		};
	}

	/// Apply a settled query outcome. Outcomes from queries that are no
	/// longer the latest are discarded wholesale.
	pub fn apply_outcome(&mut self, seq: u64, outcome: RouteOutcome) {
		if seq != self.seq {
			return;
		}
		self.pending = false;
		match outcome {
			RouteOutcome::Success { mut path, summary } => {
				// A one-node path means no route, same as an empty one.
				if path.len() < 2 {
					path.clear();
				}
				self.summary = if path.is_empty() { None } else { Some(summary) };
				self.path = path;
				self.error = None;
			}
			RouteOutcome::Failure(message) => {
				self.path.clear();
				self.summary = None;
				self.error = Some(message);
			}
		}
	}

	fn issue(&mut self) -> IssuedQuery {
		self.seq += 1;
		self.pending = true;
		IssuedQuery {
			seq: self.seq,
			query: RouteQuery {
				source: self.source.clone().unwrap_or_default(),
				destination: self.destination.clone().unwrap_or_default(),
				metric: self.metric,
				waypoint: self.waypoint.clone(),
			},
		}
	}
}
