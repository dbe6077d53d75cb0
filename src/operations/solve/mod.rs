mod solve_control_points;

pub use solve_control_points::SolveControlPoints;
