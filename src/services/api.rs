//! HTTP gateway to the routing backend. Every async failure is converted
//! into an `ApiError` value here; nothing past this boundary throws.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::flight_map::types::{Airport, BaseMap, FeatureCollection, RouteEdge};
use crate::components::planner::state::Metric;

/// Backend base URL.
pub const API_URL: &str = "http://localhost:8000";

/// Failure taxonomy at the query boundary. A `Status` error carries the
/// backend's `detail` message when one is present.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request failed: {0}")]
	Transport(String),
	#[error("{message}")]
	Status { status: u16, message: String },
	#[error("malformed response: {0}")]
	Decode(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		ApiError::Transport(err.to_string())
	}
}

/// Route query request body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathRequest {
	pub source: String,
	pub destination: String,
	pub metric: Metric,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub waypoint: Option<String>,
}

/// Route query response. Summary fields default to zero when the backend
/// omits them, which it does alongside an application-level `error`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PathResponse {
	#[serde(default)]
	pub path: Vec<String>,
	#[serde(default)]
	pub total_cost: f64,
	#[serde(default)]
	pub total_distance: f64,
	#[serde(default)]
	pub total_time: f64,
	#[serde(default)]
	pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	#[serde(default)]
	detail: Option<String>,
}

async fn check(response: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiError> {
	if response.ok() {
		return Ok(response);
	}
	let status = response.status();
	let message = match response.json::<ErrorBody>().await {
		Ok(ErrorBody { detail: Some(detail) }) => detail,
		_ => format!("server returned status {status}"),
	};
	Err(ApiError::Status { status, message })
}

async fn get_json<T: for<'de> Deserialize<'de>>(endpoint: &str) -> Result<T, ApiError> {
	let response = check(Request::get(&format!("{API_URL}{endpoint}")).send().await?).await?;
	response
		.json()
		.await
		.map_err(|err| ApiError::Decode(err.to_string()))
}

/// All airports, loaded once at startup.
pub async fn get_airports() -> Result<Vec<Airport>, ApiError> {
	get_json("/airports").await
}

/// All routes, loaded once at startup.
pub async fn get_routes() -> Result<Vec<RouteEdge>, ApiError> {
	get_json("/routes").await
}

/// The base-map feature collection, flattened into drawable rings.
pub async fn get_base_map() -> Result<BaseMap, ApiError> {
	let fc: FeatureCollection = get_json("/india-map").await?;
	Ok(BaseMap::from_feature_collection(fc))
}

/// Ask the routing service for the optimal path. An `error` field in the
/// response body is the application-level failure arm; callers must treat
/// it as terminal, the same as a transport failure.
pub async fn find_path(request: &PathRequest) -> Result<PathResponse, ApiError> {
	let response = Request::post(&format!("{API_URL}/find-path"))
		.json(request)?
		.send()
		.await?;
	let response = check(response).await?;
	response
		.json()
		.await
		.map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn request_serializes_with_lowercase_metric_and_no_null_waypoint() {
		let request = PathRequest {
			source: "BOM".into(),
			destination: "CCU".into(),
			metric: Metric::Cost,
			waypoint: None,
		};
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({"source": "BOM", "destination": "CCU", "metric": "cost"})
		);

		let with_waypoint = PathRequest {
			waypoint: Some("HYD".into()),
			metric: Metric::Distance,
			..request
		};
		assert_eq!(
			serde_json::to_value(&with_waypoint).unwrap(),
			json!({
				"source": "BOM",
				"destination": "CCU",
				"metric": "distance",
				"waypoint": "HYD"
			})
		);
	}

	#[test]
	fn response_fields_default_when_missing() {
		let response: PathResponse =
			serde_json::from_str(r#"{"error": "No valid path found between these airports"}"#)
				.unwrap();
		assert!(response.path.is_empty());
		assert_eq!(response.total_cost, 0.0);
		assert_eq!(response.total_time, 0.0);
		assert_eq!(
			response.error.as_deref(),
			Some("No valid path found between these airports")
		);
	}

	#[test]
	fn full_response_parses() {
		let response: PathResponse = serde_json::from_str(
			r#"{"path": ["BOM", "HYD", "CCU"], "total_cost": 430.0,
				"total_distance": 1650.5, "total_time": 3.2, "error": null}"#,
		)
		.unwrap();
		assert_eq!(response.path, vec!["BOM", "HYD", "CCU"]);
		assert_eq!(response.total_distance, 1650.5);
		assert_eq!(response.error, None);
	}
}
