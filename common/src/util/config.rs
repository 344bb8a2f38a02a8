use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub annealing: AnnealingConfig,
    #[serde(default)]
    pub cost: CostConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub module_file: Option<String>,
    #[serde(default)]
    pub connection_file: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlacementConfig {
    /// Shelf width after which the initial packer starts a new row.
    #[serde(default = "default_row_width")]
    pub row_width: i64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            row_width: default_row_width(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnnealingConfig {
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,
    #[serde(default = "default_min_temperature")]
    pub min_temperature: f64,
    #[serde(default = "default_initial_alpha")]
    pub initial_alpha: f64,
    #[serde(default = "default_alpha_growth")]
    pub alpha_growth: f64,
    #[serde(default = "default_max_alpha")]
    pub max_alpha: f64,
    #[serde(default = "default_moves_per_temperature")]
    pub moves_per_temperature: usize,
    #[serde(default = "default_jitter_range")]
    pub jitter_range: i64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_restarts")]
    pub restarts: usize,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: default_initial_temperature(),
            min_temperature: default_min_temperature(),
            initial_alpha: default_initial_alpha(),
            alpha_growth: default_alpha_growth(),
            max_alpha: default_max_alpha(),
            moves_per_temperature: default_moves_per_temperature(),
            jitter_range: default_jitter_range(),
            seed: None,
            restarts: default_restarts(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CostConfig {
    #[serde(default = "default_weight_area")]
    pub weight_area: f64,
    #[serde(default = "default_weight_wire")]
    pub weight_wire: f64,
    /// `"candidate"` or `"live-layout"`.
    #[serde(default = "default_cost_evaluation")]
    pub evaluation: String,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            weight_area: default_weight_area(),
            weight_wire: default_weight_wire(),
            evaluation: default_cost_evaluation(),
        }
    }
}

/// Output paths; an empty string disables that output.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_placement_file")]
    pub placement_file: Option<String>,
    #[serde(default = "default_floorplan_image")]
    pub floorplan_image: Option<String>,
    #[serde(default = "default_cost_curve_image")]
    pub cost_curve_image: Option<String>,
    #[serde(default = "default_image_size")]
    pub image_size: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            placement_file: default_placement_file(),
            floorplan_image: default_floorplan_image(),
            cost_curve_image: default_cost_curve_image(),
            image_size: default_image_size(),
        }
    }
}

fn default_row_width() -> i64 {
    100
}

fn default_initial_temperature() -> f64 {
    1000.0
}

fn default_min_temperature() -> f64 {
    0.1
}

fn default_initial_alpha() -> f64 {
    0.9
}

fn default_alpha_growth() -> f64 {
    1.05
}

fn default_max_alpha() -> f64 {
    0.95
}

fn default_moves_per_temperature() -> usize {
    100
}

fn default_jitter_range() -> i64 {
    15
}

fn default_restarts() -> usize {
    1
}

fn default_weight_area() -> f64 {
    0.04
}

fn default_weight_wire() -> f64 {
    0.06
}

fn default_cost_evaluation() -> String {
    "candidate".to_string()
}

fn default_placement_file() -> Option<String> {
    Some("output/placement.txt".to_string())
}

fn default_floorplan_image() -> Option<String> {
    Some("output/floorplan.png".to_string())
}

fn default_cost_curve_image() -> Option<String> {
    Some("output/sa_curve.png".to_string())
}

fn default_image_size() -> u32 {
    1000
}
