pub mod geometry;
pub mod proximity;
pub mod scheduler;
