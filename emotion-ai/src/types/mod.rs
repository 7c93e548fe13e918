pub mod generation;
pub mod sentiment;
