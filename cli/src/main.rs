use anyhow::Context;
use clap::{Parser, Subcommand};
use floorplan_common::db::core::Layout;
use floorplan_common::db::parser;
use floorplan_common::util::config::Config;
use floorplan_common::util::generator::{self, BenchmarkSpec};
use floorplan_common::util::profiler::ScopedTimer;
use floorplan_common::util::{check, logger, visualization};
use floorplan_placer::initial::shelf::ShelfPacker;
use floorplan_placer::physics::cost::{CostEvaluation, CostModel};
use floorplan_placer::solver::annealer::{AnnealParams, AnnealReport, Annealer};
use floorplan_placer::solver::multistart::anneal_multistart;
use floorplan_placer::solver::schedule::CoolingSchedule;
use floorplan_placer::solver::traits::Objective;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "floorplan.toml")]
    config: PathBuf,

    /// Seed for the annealer; overrides `annealing.seed`.
    #[arg(long)]
    seed: Option<u64>,

    /// Module dimension file.
    #[arg(value_name = "MODULES")]
    modules: Option<String>,

    /// Connection (net) file.
    #[arg(value_name = "CONNECTIONS")]
    connections: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a random module file and connection file.
    Generate {
        #[arg(long, default_value_t = 50)]
        modules: usize,
        #[arg(long, default_value_t = 80)]
        nets: usize,
        #[arg(long, default_value_t = 40)]
        max_dimension: i64,
        #[arg(long, default_value_t = 4)]
        max_fanout: usize,
        #[arg(long, default_value = "inputs/random.modules")]
        module_file: String,
        #[arg(long, default_value = "inputs/random.nets")]
        connection_file: String,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    match args.command {
        Some(Commands::Generate {
            modules,
            nets,
            max_dimension,
            max_fanout,
            module_file,
            connection_file,
            seed,
        }) => {
            prepare_output_dir(&module_file)?;
            prepare_output_dir(&connection_file)?;
            let spec = BenchmarkSpec {
                num_modules: modules,
                num_nets: nets,
                max_dimension,
                max_fanout,
            };
            let mut rng = seeded_rng(seed);
            generator::generate_random_benchmark(&module_file, &connection_file, &spec, &mut rng)?;
            log::info!("Generated: {} and {}", module_file, connection_file);
        }
        None => {
            let module_file = args
                .modules
                .or_else(|| config.input.module_file.clone())
                .context("No module file given (positional MODULES or input.module_file)")?;
            let connection_file = args
                .connections
                .or_else(|| config.input.connection_file.clone())
                .context("No connection file given (positional CONNECTIONS or input.connection_file)")?;

            if let Err(e) = run_floorplan(&config, &module_file, &connection_file, args.seed) {
                log::error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("Random seed: {}", seed);
    StdRng::seed_from_u64(seed)
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn anneal_params(config: &Config) -> anyhow::Result<AnnealParams> {
    let annealing = &config.annealing;
    let params = AnnealParams {
        schedule: CoolingSchedule {
            initial_temperature: annealing.initial_temperature,
            min_temperature: annealing.min_temperature,
            initial_alpha: annealing.initial_alpha,
            alpha_growth: annealing.alpha_growth,
            max_alpha: annealing.max_alpha,
        },
        moves_per_temperature: annealing.moves_per_temperature,
        jitter_range: annealing.jitter_range,
        evaluation: config.cost.evaluation.parse::<CostEvaluation>()?,
    };
    params.validate().context("Invalid [annealing] configuration")?;
    if params.evaluation == CostEvaluation::LiveLayout {
        log::warn!("Scoring moves on the live layout: costs trail candidates by one move.");
    }
    Ok(params)
}

fn run_floorplan(
    config: &Config,
    module_file: &str,
    connection_file: &str,
    seed_override: Option<u64>,
) -> anyhow::Result<()> {
    let params = anneal_params(config)?;
    let cost = CostModel::new(config.cost.weight_area, config.cost.weight_wire);

    let run_timer = ScopedTimer::new("Floorplanning");
    let mut layout = parser::load(module_file, connection_file)?;

    {
        let _timer = ScopedTimer::new("Initial packing");
        ShelfPacker::new(config.placement.row_width).pack(&mut layout)?;
    }

    let report = {
        let _timer = ScopedTimer::new("Simulated annealing");
        let base_seed = seed_override
            .or(config.annealing.seed)
            .unwrap_or_else(rand::random);
        log::info!("Random seed: {}", base_seed);
        anneal(&mut layout, &params, &cost, base_seed, config.annealing.restarts)?
    };

    log::info!(
        "Best cost {:.4} (initial {:.4}), {} of {} moves accepted",
        report.best_cost,
        report.initial_cost,
        report.moves_accepted,
        report.moves_evaluated
    );
    check::run_placement_check(&layout);

    println!("Final Total Area: {}", layout.area());
    println!("Final Total Wire Length: {}", layout.wire_length());
    log::info!("Placement ready after {:.3}s", run_timer.elapsed().as_secs_f64());

    write_outputs(config, &layout, &cost, &report)
}

fn anneal(
    layout: &mut Layout,
    params: &AnnealParams,
    cost: &CostModel,
    base_seed: u64,
    restarts: usize,
) -> anyhow::Result<AnnealReport> {
    if restarts <= 1 {
        let mut annealer = Annealer::new(params.clone(), *cost, StdRng::seed_from_u64(base_seed));
        return Ok(annealer.optimize(layout)?);
    }
    let seeds: Vec<u64> = (0..restarts as u64)
        .map(|i| base_seed.wrapping_add(i))
        .collect();
    anneal_multistart(layout, params, cost, &seeds)
}

fn enabled(path: &Option<String>) -> Option<&str> {
    path.as_deref().filter(|p| !p.is_empty())
}

fn write_outputs(
    config: &Config,
    layout: &Layout,
    cost: &CostModel,
    report: &AnnealReport,
) -> anyhow::Result<()> {
    let output = &config.output;

    if let Some(path) = enabled(&output.placement_file) {
        prepare_output_dir(path)?;
        log::info!("Writing placement to {}", path);
        save_placement(layout, cost, path)
            .with_context(|| format!("Failed to write placement file '{}'", path))?;
    }

    if let Some(path) = enabled(&output.floorplan_image) {
        prepare_output_dir(path)?;
        log::info!("Generating floorplan visualization...");
        visualization::draw_floorplan(layout, path, output.image_size, output.image_size)
            .with_context(|| format!("Failed to write image '{}'", path))?;
    }

    if let Some(path) = enabled(&output.cost_curve_image) {
        prepare_output_dir(path)?;
        log::info!("Generating cost curve...");
        let samples: Vec<(f64, f64)> = report
            .trace
            .iter()
            .map(|step| (step.temperature, step.best_cost))
            .collect();
        visualization::draw_cost_curve(&samples, path, output.image_size, output.image_size * 3 / 4)
            .with_context(|| format!("Failed to write image '{}'", path))?;
    }

    Ok(())
}

fn save_placement(layout: &Layout, cost: &CostModel, filename: &str) -> std::io::Result<()> {
    use std::io::Write;
    let mut file = std::io::BufWriter::new(std::fs::File::create(filename)?);

    writeln!(file, "# modules {}", layout.num_modules())?;
    writeln!(file, "# area {}", layout.area())?;
    writeln!(file, "# wire_length {}", layout.wire_length())?;
    writeln!(
        file,
        "# cost {:.4}",
        cost.evaluate(layout.modules(), layout.nets())
    )?;
    writeln!(file, "# index x y width height")?;
    for (i, module) in layout.modules().iter().enumerate() {
        writeln!(
            file,
            "{} {} {} {} {}",
            i + 1,
            module.x(),
            module.y(),
            module.width(),
            module.height()
        )?;
    }
    file.flush()
}
