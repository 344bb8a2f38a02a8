use floorplan_common::db::core::{Module, Net};

/// Scalar cost of a module configuration; lower is better.
pub trait Objective {
    fn evaluate(&self, modules: &[Module], nets: &[Net]) -> f64;
}
