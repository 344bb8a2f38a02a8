pub mod annealer;
pub mod multistart;
pub mod perturb;
pub mod schedule;
pub mod traits;
