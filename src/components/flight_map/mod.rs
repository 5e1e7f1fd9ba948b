mod component;
pub mod projection;
mod render;
pub mod scene;
mod state;
pub mod types;
pub mod viewport;

pub use component::FlightMapCanvas;
pub use types::{Airport, BaseMap, FeatureCollection, NetworkData, RouteEdge, SelectionView};
