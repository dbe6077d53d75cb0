pub mod creation;
pub mod solve;
