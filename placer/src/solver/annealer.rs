//! Simulated annealing over module positions.
//!
//! Every inner iteration copies the live modules, applies one random [`Move`],
//! scores the copy and accepts it with the Metropolis rule
//! `exp(-delta / T) > U(0, 1)`, where `delta` is measured against the best
//! cost seen so far. Accepted candidates replace the live modules even when
//! they are worse than the best; the best configuration is kept separately
//! and written back when the temperature reaches its floor.

use super::perturb::Move;
use super::schedule::CoolingSchedule;
use super::traits::Objective;
use crate::physics::cost::{CostEvaluation, CostModel};
use floorplan_common::db::core::{Layout, Module};
use floorplan_common::db::error::LayoutError;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealParams {
    pub schedule: CoolingSchedule,
    pub moves_per_temperature: usize,
    pub jitter_range: i64,
    pub evaluation: CostEvaluation,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            schedule: CoolingSchedule::default(),
            moves_per_temperature: 100,
            jitter_range: 15,
            evaluation: CostEvaluation::Candidate,
        }
    }
}

impl AnnealParams {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.schedule.validate()?;
        if self.jitter_range < 0 {
            anyhow::bail!("Jitter range must not be negative, got {}", self.jitter_range);
        }
        Ok(())
    }
}

/// State of the run after the inner loop of one temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureStep {
    pub temperature: f64,
    pub area: i64,
    pub wire_length: i64,
    pub best_cost: f64,
    pub accepted: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealReport {
    pub initial_cost: f64,
    pub best_cost: f64,
    pub moves_evaluated: usize,
    pub moves_accepted: usize,
    pub trace: Vec<TemperatureStep>,
}

impl AnnealReport {
    fn new(initial_cost: f64) -> Self {
        Self {
            initial_cost,
            best_cost: initial_cost,
            moves_evaluated: 0,
            moves_accepted: 0,
            trace: Vec::new(),
        }
    }
}

pub struct Annealer<R: Rng, O: Objective = CostModel> {
    params: AnnealParams,
    objective: O,
    rng: R,
    best_modules: Vec<Module>,
    best_cost: f64,
    progress_level: log::Level,
}

impl<R: Rng, O: Objective> Annealer<R, O> {
    pub fn new(params: AnnealParams, objective: O, rng: R) -> Self {
        Self {
            params,
            objective,
            rng,
            best_modules: Vec::new(),
            best_cost: 0.0,
            progress_level: log::Level::Info,
        }
    }

    /// Level of the per-temperature progress line.
    pub fn with_progress_level(mut self, level: log::Level) -> Self {
        self.progress_level = level;
        self
    }

    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    pub fn best_modules(&self) -> &[Module] {
        &self.best_modules
    }

    /// Runs the full schedule on `layout` and leaves the best configuration
    /// found in it.
    pub fn optimize(&mut self, layout: &mut Layout) -> Result<AnnealReport, LayoutError> {
        let initial_cost = self.objective.evaluate(layout.modules(), layout.nets());
        self.best_cost = initial_cost;
        self.best_modules = layout.modules().to_vec();

        let mut report = AnnealReport::new(initial_cost);
        if layout.num_modules() == 0 {
            log::info!("No modules to anneal.");
            return Ok(report);
        }

        log::debug!(
            "Annealing {} modules, initial cost {:.4}",
            layout.num_modules(),
            initial_cost
        );

        for temperature in self.params.schedule.temperatures() {
            let mut accepted = 0;

            for _ in 0..self.params.moves_per_temperature {
                let mut candidate = layout.modules().to_vec();
                let Some(mv) =
                    Move::propose(&mut self.rng, candidate.len(), self.params.jitter_range)
                else {
                    continue;
                };
                mv.apply(&mut candidate);

                let new_cost = match self.params.evaluation {
                    CostEvaluation::Candidate => {
                        self.objective.evaluate(&candidate, layout.nets())
                    }
                    CostEvaluation::LiveLayout => {
                        self.objective.evaluate(layout.modules(), layout.nets())
                    }
                };
                report.moves_evaluated += 1;

                let delta = new_cost - self.best_cost;
                if delta < 0.0 || (-delta / temperature).exp() > self.rng.gen_range(0.0..1.0) {
                    if new_cost < self.best_cost {
                        self.best_modules.clone_from(&candidate);
                        self.best_cost = new_cost;
                    }
                    layout.set_modules(candidate)?;
                    accepted += 1;
                }
            }

            let step = TemperatureStep {
                temperature,
                area: layout.area(),
                wire_length: layout.wire_length(),
                best_cost: self.best_cost,
                accepted,
            };
            log::log!(
                self.progress_level,
                "Temperature: {:.4}, Area: {}, Wire Length: {}, bestCost: {:.4}",
                step.temperature,
                step.area,
                step.wire_length,
                step.best_cost
            );
            report.moves_accepted += accepted;
            report.trace.push(step);
        }

        layout.set_modules(self.best_modules.clone())?;
        report.best_cost = self.best_cost;
        Ok(report)
    }
}
