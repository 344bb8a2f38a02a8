pub mod initial;
pub mod physics;
pub mod solver;
