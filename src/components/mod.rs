pub mod flight_map;
pub mod planner;
