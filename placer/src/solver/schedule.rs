use anyhow::{Result, bail};

/// Geometric cooling whose ratio itself grows each step until it saturates,
/// so cooling slows down as the run progresses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingSchedule {
    pub initial_temperature: f64,
    pub min_temperature: f64,
    pub initial_alpha: f64,
    pub alpha_growth: f64,
    pub max_alpha: f64,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            min_temperature: 0.1,
            initial_alpha: 0.9,
            alpha_growth: 1.05,
            max_alpha: 0.95,
        }
    }
}

impl CoolingSchedule {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() {
            bail!("Initial temperature must be finite");
        }
        if !(self.min_temperature > 0.0 && self.min_temperature.is_finite()) {
            bail!(
                "Minimum temperature must be positive, got {}",
                self.min_temperature
            );
        }
        for (name, alpha) in [
            ("initial_alpha", self.initial_alpha),
            ("max_alpha", self.max_alpha),
        ] {
            if !(alpha > 0.0 && alpha < 1.0) {
                bail!("{} must lie in (0, 1), got {}", name, alpha);
            }
        }
        if !(self.alpha_growth > 0.0 && self.alpha_growth.is_finite()) {
            bail!("alpha_growth must be positive, got {}", self.alpha_growth);
        }
        Ok(())
    }

    /// Temperatures of successive outer iterations, stopping at the floor.
    pub fn temperatures(&self) -> Temperatures {
        Temperatures {
            temperature: self.initial_temperature,
            alpha: self.initial_alpha,
            schedule: *self,
        }
    }
}

pub struct Temperatures {
    temperature: f64,
    alpha: f64,
    schedule: CoolingSchedule,
}

impl Iterator for Temperatures {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.temperature <= self.schedule.min_temperature {
            return None;
        }
        let current = self.temperature;
        self.alpha = (self.alpha * self.schedule.alpha_growth).min(self.schedule.max_alpha);
        self.temperature *= self.alpha;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_ratchets_up_to_its_cap() {
        let temps: Vec<f64> = CoolingSchedule::default().temperatures().take(4).collect();
        assert_eq!(temps[0], 1000.0);
        assert!((temps[1] - 945.0).abs() < 1e-9);
        assert!((temps[2] - 897.75).abs() < 1e-9);
        assert!((temps[3] - 897.75 * 0.95).abs() < 1e-9);
    }

    #[test]
    fn default_schedule_length() {
        let schedule = CoolingSchedule::default();
        let temps: Vec<f64> = schedule.temperatures().collect();
        assert_eq!(temps.len(), 180);
        assert!(temps.iter().all(|&t| t > schedule.min_temperature));
        assert!(temps.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn starting_below_floor_yields_nothing() {
        let schedule = CoolingSchedule {
            initial_temperature: 0.05,
            ..CoolingSchedule::default()
        };
        assert_eq!(schedule.temperatures().count(), 0);
    }

    #[test]
    fn validate_rejects_non_terminating_settings() {
        assert!(CoolingSchedule::default().validate().is_ok());
        let stuck = CoolingSchedule {
            max_alpha: 1.0,
            ..CoolingSchedule::default()
        };
        assert!(stuck.validate().is_err());
        let zero_floor = CoolingSchedule {
            min_temperature: 0.0,
            ..CoolingSchedule::default()
        };
        assert!(zero_floor.validate().is_err());
        let shrinking = CoolingSchedule {
            alpha_growth: -1.0,
            ..CoolingSchedule::default()
        };
        assert!(shrinking.validate().is_err());
    }
}
