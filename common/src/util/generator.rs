use rand::Rng;
use rand::seq::index::sample;
use std::fs::File;
use std::io::{BufWriter, Write};

pub struct BenchmarkSpec {
    pub num_modules: usize,
    pub num_nets: usize,
    pub max_dimension: i64,
    pub max_fanout: usize,
}

/// Writes a random floorplanning instance as a module file and a connection
/// file in the formats read by [`crate::db::parser`].
pub fn generate_random_benchmark<R: Rng>(
    module_filename: &str,
    connection_filename: &str,
    spec: &BenchmarkSpec,
    rng: &mut R,
) -> std::io::Result<()> {
    let max_dim = spec.max_dimension.max(1);

    log::info!(
        "Generating Benchmark: {} modules (max side {}), {} nets (max fanout {})",
        spec.num_modules,
        max_dim,
        spec.num_nets,
        spec.max_fanout
    );

    let mut modules = BufWriter::new(File::create(module_filename)?);
    writeln!(modules, "{}", spec.num_modules)?;
    for _ in 0..spec.num_modules {
        let w = rng.gen_range(1..=max_dim);
        let h = rng.gen_range(1..=max_dim);
        writeln!(modules, "{} {}", w, h)?;
    }
    modules.flush()?;

    let mut nets = BufWriter::new(File::create(connection_filename)?);
    writeln!(nets, "{}", spec.num_nets)?;
    for _ in 0..spec.num_nets {
        if spec.num_modules == 0 {
            writeln!(nets)?;
            continue;
        }
        let upper = spec.max_fanout.max(2).min(spec.num_modules);
        let degree = if upper < 2 {
            upper
        } else {
            rng.gen_range(2..=upper)
        };
        // Distinct members; the first one drives the net.
        let members: Vec<String> = sample(rng, spec.num_modules, degree)
            .into_iter()
            .map(|idx| (idx + 1).to_string())
            .collect();
        writeln!(nets, "{}", members.join(" "))?;
    }
    nets.flush()?;

    Ok(())
}
