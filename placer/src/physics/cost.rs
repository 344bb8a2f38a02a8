//! Area and wire length cost used to score floorplans.

use crate::solver::traits::Objective;
use floorplan_common::db::core::{Module, Net, bounding_area, total_wire_length};
use std::str::FromStr;

/// Linear blend of bounding-box area and total wire length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub weight_area: f64,
    pub weight_wire: f64,
}

impl CostModel {
    pub fn new(weight_area: f64, weight_wire: f64) -> Self {
        Self {
            weight_area,
            weight_wire,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(0.04, 0.06)
    }
}

impl Objective for CostModel {
    fn evaluate(&self, modules: &[Module], nets: &[Net]) -> f64 {
        let area = bounding_area(modules) as f64;
        let wire_length = total_wire_length(modules, nets) as f64;
        self.weight_area * area + self.weight_wire * wire_length
    }
}

/// Which module set a candidate move is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostEvaluation {
    /// Score the perturbed candidate itself.
    #[default]
    Candidate,
    /// Score the live layout as it stood before the move was applied. The
    /// score trails the candidate by one accepted state, which matches traces
    /// recorded by earlier versions of this floorplanner.
    LiveLayout,
}

impl FromStr for CostEvaluation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate" => Ok(Self::Candidate),
            "live-layout" => Ok(Self::LiveLayout),
            other => Err(anyhow::anyhow!(
                "Unknown cost evaluation '{}' (expected 'candidate' or 'live-layout')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_common::db::core::Layout;

    #[test]
    fn default_weights_on_two_modules() {
        let layout = Layout::new(
            vec![Module::placed(20, 20, 0, 0), Module::placed(10, 10, 20, 0)],
            vec![Net::from_one_based(0, &[2, 1], 2).unwrap()],
        )
        .unwrap();
        let cost = CostModel::default().evaluate(layout.modules(), layout.nets());
        assert!((cost - 25.2).abs() < 1e-9, "cost was {}", cost);
    }

    #[test]
    fn empty_configuration_costs_nothing() {
        assert_eq!(CostModel::default().evaluate(&[], &[]), 0.0);
    }

    #[test]
    fn weights_scale_components() {
        let modules = [Module::placed(4, 5, 0, 0)];
        let area_only = CostModel::new(1.0, 0.0).evaluate(&modules, &[]);
        assert_eq!(area_only, 20.0);
        assert_eq!(CostModel::new(0.0, 3.0).evaluate(&modules, &[]), 0.0);
    }

    #[test]
    fn parses_evaluation_mode() {
        assert_eq!(
            "candidate".parse::<CostEvaluation>().unwrap(),
            CostEvaluation::Candidate
        );
        assert_eq!(
            "live-layout".parse::<CostEvaluation>().unwrap(),
            CostEvaluation::LiveLayout
        );
        assert!("lagged".parse::<CostEvaluation>().is_err());
    }
}
