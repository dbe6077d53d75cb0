mod generate_waypoints;

pub use generate_waypoints::GenerateWaypoints;
